#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::identity::*;
    use crate::message::*;
    use crate::wire::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = ChatMessage::user("What are my rights?");
        assert_eq!(msg.kind, MessageKind::User);
        assert_eq!(msg.content, "What are my rights?");
        assert!(msg.session_id.is_none());
        assert!(msg.quick_actions.is_empty());
        assert_eq!(msg.id, msg.timestamp_ms.to_string());
    }

    #[test]
    fn test_message_assistant() {
        let msg = ChatMessage::assistant("I can help with that");
        assert_eq!(msg.kind, MessageKind::Assistant);
        assert_eq!(msg.content, "I can help with that");
    }

    #[test]
    fn test_message_error_text() {
        let msg = ChatMessage::error_text("not sent");
        assert_eq!(msg.kind, MessageKind::Error);
        assert_eq!(msg.content, "not sent");
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = ChatMessage::system("session started");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.kind, MessageKind::System);
        assert_eq!(deserialized.content, "session started");
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(serde_json::to_string(&MessageKind::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&MessageKind::Assistant).unwrap(),
            r#""assistant""#
        );
        assert_eq!(serde_json::to_string(&MessageKind::System).unwrap(), r#""system""#);
        assert_eq!(serde_json::to_string(&MessageKind::Error).unwrap(), r#""error""#);
    }

    #[test]
    fn test_kind_from_wire() {
        assert_eq!(MessageKind::from_wire("user"), MessageKind::User);
        assert_eq!(MessageKind::from_wire("error"), MessageKind::Error);
        assert_eq!(MessageKind::from_wire("assistant"), MessageKind::Assistant);
        // unknown tags fall back to assistant
        assert_eq!(MessageKind::from_wire("robot"), MessageKind::Assistant);
        assert_eq!(MessageKind::from_wire(""), MessageKind::Assistant);
    }

    #[test]
    fn test_empty_quick_actions_not_serialized() {
        let msg = ChatMessage::user("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("quick_actions"));
    }

    // ─── Wire Tests ──────────────────────────────────────────

    #[test]
    fn test_server_frame_full() {
        let json = r#"{
            "message_id": 42,
            "type": "assistant",
            "content": "Hello",
            "timestamp": "2024-01-01T00:00:00Z",
            "session_id": "s-9",
            "quick_actions": [
                {"id": "qa1", "title": "Book a consultation", "description": "Find an advocate"}
            ]
        }"#;
        let frame: ServerFrame = serde_json::from_str(json).unwrap();
        let msg = frame.into_message(999);
        assert_eq!(msg.id, "42");
        assert_eq!(msg.kind, MessageKind::Assistant);
        assert_eq!(msg.content, "Hello");
        assert_eq!(msg.timestamp_ms, 1_704_067_200_000);
        assert_eq!(msg.session_id.as_deref(), Some("s-9"));
        assert_eq!(msg.quick_actions.len(), 1);
        assert_eq!(msg.quick_actions[0].title, "Book a consultation");
    }

    #[test]
    fn test_server_frame_defaults() {
        let frame: ServerFrame = serde_json::from_str("{}").unwrap();
        let msg = frame.into_message(1234);
        assert_eq!(msg.id, "1234");
        assert_eq!(msg.kind, MessageKind::Assistant);
        assert_eq!(msg.content, "");
        assert_eq!(msg.timestamp_ms, 1234);
        assert!(msg.session_id.is_none());
        assert!(msg.quick_actions.is_empty());
    }

    #[test]
    fn test_server_frame_message_fallback() {
        let frame: ServerFrame =
            serde_json::from_str(r#"{"message": "from the fallback field"}"#).unwrap();
        let msg = frame.into_message(0);
        assert_eq!(msg.content, "from the fallback field");
    }

    #[test]
    fn test_server_frame_content_preferred_over_message() {
        let frame: ServerFrame =
            serde_json::from_str(r#"{"content": "primary", "message": "fallback"}"#).unwrap();
        let msg = frame.into_message(0);
        assert_eq!(msg.content, "primary");
    }

    #[test]
    fn test_server_frame_string_message_id() {
        let frame: ServerFrame =
            serde_json::from_str(r#"{"message_id": "srv-7", "content": "x"}"#).unwrap();
        let msg = frame.into_message(0);
        assert_eq!(msg.id, "srv-7");
    }

    #[test]
    fn test_server_frame_bad_timestamp_defaults_to_receipt() {
        let frame: ServerFrame =
            serde_json::from_str(r#"{"content": "x", "timestamp": "yesterday"}"#).unwrap();
        let msg = frame.into_message(777);
        assert_eq!(msg.timestamp_ms, 777);
    }

    #[test]
    fn test_server_frame_unknown_fields_ignored() {
        let frame: ServerFrame =
            serde_json::from_str(r#"{"content": "x", "confidence": 0.9}"#).unwrap();
        assert_eq!(frame.into_message(0).content, "x");
    }

    #[test]
    fn test_server_frame_error_kind() {
        let frame: ServerFrame =
            serde_json::from_str(r#"{"type": "error", "content": "rate limited"}"#).unwrap();
        let msg = frame.into_message(0);
        assert_eq!(msg.kind, MessageKind::Error);
    }

    #[test]
    fn test_client_frame_shape() {
        let frame = ClientFrame::user("What are my rights?");
        let value: serde_json::Value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["message"], "What are my rights?");
        assert_eq!(value["type"], "user");
        let ts = value["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    // ─── Identity Tests ──────────────────────────────────────

    #[test]
    fn test_resolve_explicit_wins() {
        let id = resolve_user_id(Some("u-1"), Some("auth-2"));
        assert_eq!(id, "u-1");
    }

    #[test]
    fn test_resolve_authenticated_second() {
        let id = resolve_user_id(None, Some("auth-2"));
        assert_eq!(id, "auth-2");
    }

    #[test]
    fn test_resolve_empty_strings_ignored() {
        let id = resolve_user_id(Some(""), Some("auth-2"));
        assert_eq!(id, "auth-2");
        let id = resolve_user_id(Some(""), Some(""));
        assert!(id.starts_with("guest_"));
    }

    #[test]
    fn test_guest_id_shape() {
        let id = generate_guest_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "guest");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_guest_ids_differ() {
        assert_ne!(generate_guest_id(), generate_guest_id());
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.ws_base, DEFAULT_WS_BASE);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.user_id.is_none());
    }

    #[test]
    fn test_endpoint_shape() {
        let config = ChatConfig::default();
        assert_eq!(
            config.endpoint("u-1"),
            "ws://localhost:8000/ws/chat/u-1"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = ChatConfig {
            ws_base: "wss://api.example.com/".to_string(),
            ..ChatConfig::default()
        };
        assert_eq!(
            config.endpoint("guest_1_abc"),
            "wss://api.example.com/ws/chat/guest_1_abc"
        );
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ChatConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ChatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.ws_base, DEFAULT_WS_BASE);
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::RetryScheduled {
            attempt: 2,
            max: 5,
            delay_ms: 2000,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RetryScheduled"));
        assert!(json.contains("2000"));
    }

    #[test]
    fn test_chat_event_disconnected_roundtrip() {
        let event = ChatEvent::Disconnected {
            code: 1006,
            reason: String::new(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: ChatEvent = serde_json::from_str(&json).unwrap();
        if let ChatEvent::Disconnected { code, reason } = deserialized {
            assert_eq!(code, 1006);
            assert!(reason.is_empty());
        } else {
            panic!("Wrong variant");
        }
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = ChatError::Socket("refused".to_string());
        assert_eq!(err.to_string(), "Socket error: refused");

        let err = ChatError::Network("offline".to_string());
        assert_eq!(err.to_string(), "Network error: offline");

        let err = ChatError::Config("bad base url".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad base url");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{nope}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
