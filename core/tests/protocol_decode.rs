use kurosuwado_core::{
    decode_game_update, encode_subscribe, GameByIdData, GraphqlResponse,
};

#[test]
fn decodes_fetch_envelope() {
    let raw = r#"{
        "data": {
            "gameById": {
                "channelId": "chan-9",
                "answers": ["C", "", "A"],
                "puzzle": "{\"size\":{\"cols\":3,\"rows\":1},\"grid\":[\"C\",\"A\",\"T\"],\"gridnums\":[1,0,0]}",
                "createdAt": "2022-02-13T08:00:00Z",
                "updatedAt": "2022-02-13T09:30:00Z",
                "active": true
            }
        }
    }"#;
    let envelope: GraphqlResponse<GameByIdData> = serde_json::from_str(raw).unwrap();
    let record = envelope.data.unwrap().game_by_id;
    assert_eq!(record.channel_id, "chan-9");
    assert_eq!(record.answers, vec!["C", "", "A"]);
    assert!(record.active);
    assert!(record.puzzle.contains("gridnums"));
}

#[test]
fn decodes_update_envelope() {
    let raw = r#"{
        "data": {
            "subscribeToGameUpdate": {
                "answers": ["C", "A", ""],
                "updatedAt": "2022-02-13T09:31:00Z",
                "active": true
            }
        }
    }"#;
    let update = decode_game_update(raw).unwrap();
    assert_eq!(update.answers, vec!["C", "A", ""]);
    assert_eq!(update.updated_at.as_deref(), Some("2022-02-13T09:31:00Z"));
}

#[test]
fn decodes_bare_update() {
    let raw = r#"{"answers": ["", "X"]}"#;
    let update = decode_game_update(raw).unwrap();
    assert_eq!(update.answers, vec!["", "X"]);
    assert!(update.updated_at.is_none());
    assert!(!update.active);
}

#[test]
fn drops_malformed_frames() {
    assert!(decode_game_update("").is_none());
    assert!(decode_game_update("not json").is_none());
    assert!(decode_game_update(r#"{"data": null}"#).is_none());
    assert!(decode_game_update(r#"{"data": {"somethingElse": 1}}"#).is_none());
    assert!(decode_game_update(r#"{"answers": "not-an-array"}"#).is_none());
}

#[test]
fn subscribe_frame_carries_topic() {
    let frame = encode_subscribe("6208b6730917c7d6c9a77bee").unwrap();
    let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(value["type"], "subscribe");
    assert_eq!(value["topic"], "6208b6730917c7d6c9a77bee");
}
