use serde::{Deserialize, Serialize};

/// Query sent on manual fetch. Idempotent and side-effect-free on the
/// server, so the view can re-issue it on demand.
pub const GAME_QUERY: &str = "query gameById($gameId: String!) { gameById(gameId: $gameId) { channelId answers puzzle createdAt updatedAt active } }";

#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameVariables<'a> {
    pub game_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameByIdData {
    #[serde(rename = "gameById")]
    pub game_by_id: GameRecord,
}

/// Full game state returned by the fetch-by-identifier query. `puzzle` is a
/// nested JSON document, decoded separately via [`crate::Puzzle::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub channel_id: String,
    pub answers: Vec<String>,
    pub puzzle: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// One push-subscription message: a wholesale replacement of the answer
/// snapshot, never a partial patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameUpdate {
    pub answers: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
struct SubscribeFrame<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    topic: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct UpdateData {
    #[serde(rename = "subscribeToGameUpdate")]
    subscribe_to_game_update: GameUpdate,
}

/// Frame sent over the subscription socket to register for a game's updates.
pub fn encode_subscribe(topic: &str) -> Option<String> {
    serde_json::to_string(&SubscribeFrame {
        kind: "subscribe",
        topic,
    })
    .ok()
}

/// Tolerant decoder for inbound subscription frames. Accepts both the
/// GraphQL envelope and a bare update object; anything else is dropped.
pub fn decode_game_update(raw: &str) -> Option<GameUpdate> {
    if let Ok(envelope) = serde_json::from_str::<GraphqlResponse<UpdateData>>(raw) {
        if let Some(data) = envelope.data {
            return Some(data.subscribe_to_game_update);
        }
    }
    serde_json::from_str::<GameUpdate>(raw).ok()
}
