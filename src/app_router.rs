use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

use kurosuwado_core::{decode_game_id, GameId, GAME_ID_LEN};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ViewConfig {
    pub(crate) game_id: String,
    pub(crate) clear_hash: bool,
}

pub(crate) fn load_view_config() -> Option<ViewConfig> {
    let window = web_sys::window()?;
    let hash = window.location().hash().ok()?;
    if let Some(config) = parse_view_config_from_hash(&hash) {
        return Some(config);
    }
    let search = window.location().search().ok()?;
    parse_view_config_from_query(&search)
}

pub(crate) fn clear_location_hash() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    let new_url = format!("{path}{search}");
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&new_url));
    } else {
        let _ = location.set_hash("");
    }
}

pub(crate) fn default_api_base() -> Option<String> {
    if let Some(raw) = option_env!("KUROSUWADO_API_BASE")
        .or(option_env!("TRUNK_PUBLIC_KUROSUWADO_API_BASE"))
        .or(option_env!("TRUNK_PUBLIC_API_BASE"))
    {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.trim_end_matches('/').to_string());
        }
    }
    let window = web_sys::window()?;
    let location = window.location();
    let host = location.host().ok()?;
    if host.trim().is_empty() {
        return None;
    }
    let protocol = location.protocol().ok()?;
    Some(format!("{protocol}//{host}/graphql"))
}

pub(crate) fn default_ws_base() -> Option<String> {
    if let Some(raw) = option_env!("KUROSUWADO_WS_BASE")
        .or(option_env!("TRUNK_PUBLIC_KUROSUWADO_WS_BASE"))
        .or(option_env!("TRUNK_PUBLIC_WS_BASE"))
    {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(normalize_ws_base(trimmed));
        }
    }
    let window = web_sys::window()?;
    let location = window.location();
    let host = location.host().ok()?;
    if host.trim().is_empty() {
        return None;
    }
    let protocol = location.protocol().ok()?.to_ascii_lowercase();
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    Some(format!("{scheme}://{host}/subscriptions"))
}

pub(crate) fn build_subscription_url(ws_base: &str, game_id: &str) -> String {
    let base = ws_base.trim_end_matches('/');
    format!("{base}/{game_id}")
}

fn normalize_ws_base(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("https://") {
        format!("wss://{rest}")
    } else {
        trimmed.to_string()
    }
}

fn decode_hash_value(value: &str) -> String {
    let raw = value.trim();
    if raw.is_empty() {
        return String::new();
    }
    js_sys::decode_uri_component(raw)
        .ok()
        .and_then(|decoded| decoded.as_string())
        .unwrap_or_else(|| raw.to_string())
}

// Share links may carry the game id either as bare hex or in the shorter
// base64 form. The base64 codec drops leading zeros, so the hex is re-padded
// to the full id width before validating.
fn normalize_game_id(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(id) = GameId::parse(value) {
        return Some(id.as_str().to_string());
    }
    let decoded = decode_game_id(value).ok()?;
    let padded = format!("{decoded:0>width$}", width = GAME_ID_LEN);
    GameId::parse(&padded).ok().map(|id| id.as_str().to_string())
}

fn parse_view_config_from_hash(hash: &str) -> Option<ViewConfig> {
    let raw = hash.trim();
    if raw.is_empty() {
        return None;
    }
    let raw = raw.trim_start_matches('#').trim();
    if raw.is_empty() {
        return None;
    }
    let mut game_id = None;
    for chunk in raw.split(';') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let mut iter = chunk.splitn(2, '=');
        let key = iter.next().unwrap_or("").trim();
        let value = iter.next().unwrap_or("").trim();
        if key.eq_ignore_ascii_case("game") || key.eq_ignore_ascii_case("game_id") {
            game_id = Some(decode_hash_value(value));
        }
    }
    let game_id = normalize_game_id(&game_id?)?;
    Some(ViewConfig {
        game_id,
        clear_hash: true,
    })
}

fn parse_view_config_from_query(search: &str) -> Option<ViewConfig> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    let params = UrlSearchParams::new_with_str(search).ok()?;
    let raw = params.get("game").or_else(|| params.get("game_id"))?;
    let game_id = normalize_game_id(&raw)?;
    Some(ViewConfig {
        game_id,
        clear_hash: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurosuwado_core::encode_game_id;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn subscription_url_appends_game_id() {
        assert_eq!(
            build_subscription_url("wss://example.test/subscriptions", "6208b6730917c7d6c9a77bee"),
            "wss://example.test/subscriptions/6208b6730917c7d6c9a77bee"
        );
        assert_eq!(
            build_subscription_url("ws://localhost:4000/subscriptions/", "abc123abc123abc123abc123"),
            "ws://localhost:4000/subscriptions/abc123abc123abc123abc123"
        );
    }

    #[wasm_bindgen_test]
    fn normalizes_bare_hex_ids() {
        assert_eq!(
            normalize_game_id("6208B6730917C7D6C9A77BEE").as_deref(),
            Some("6208b6730917c7d6c9a77bee")
        );
        assert!(normalize_game_id("").is_none());
        assert!(normalize_game_id("not-a-game-id").is_none());
    }

    #[wasm_bindgen_test]
    fn accepts_base64_share_ids() {
        assert_eq!(
            normalize_game_id("Ygi2cwkXx9bJp3vu").as_deref(),
            Some("6208b6730917c7d6c9a77bee")
        );
        // leading zeros are lost in the integer form; re-padding restores them
        let short = encode_game_id("0008b6730917c7d6c9a77bee").unwrap();
        assert_eq!(
            normalize_game_id(&short).as_deref(),
            Some("0008b6730917c7d6c9a77bee")
        );
    }

    #[wasm_bindgen_test]
    fn hash_route_wins_and_requests_hash_clear() {
        let config = parse_view_config_from_hash("#game=6208b6730917c7d6c9a77bee").unwrap();
        assert_eq!(config.game_id, "6208b6730917c7d6c9a77bee");
        assert!(config.clear_hash);
        assert!(parse_view_config_from_hash("#").is_none());
        assert!(parse_view_config_from_hash("#game=").is_none());
    }
}
