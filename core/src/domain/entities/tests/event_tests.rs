use crate::domain::entities::{EventType, UserEvent};

#[test]
fn test_event_wire_shape() {
    let event = UserEvent::new(EventType::LoggedIn, 9, "a@x.com", Some("10.0.0.1".into()));
    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["type"], "user.logged_in");
    assert_eq!(json["user_id"], 9);
    assert_eq!(json["email"], "a@x.com");
    assert_eq!(json["ip"], "10.0.0.1");
    assert!(json["timestamp"].is_string());
}

#[test]
fn test_partition_key_is_user_id() {
    let event = UserEvent::new(EventType::Registered, 123, "a@x.com", None);
    assert_eq!(event.partition_key(), "123");
    assert_eq!(EventType::LoggedOut.to_string(), "user.logged_out");
}
