use sso_core::domain::{EventType, UserEvent};
use sso_core::services::EventPublisher;

use super::redis_stream::stream_fields;
use super::TracingEventPublisher;

fn sample_event() -> UserEvent {
    UserEvent::new(
        EventType::LoggedIn,
        7,
        "ada@example.com",
        Some("10.0.0.1".to_string()),
    )
}

#[test]
fn test_stream_fields_carry_key_type_and_payload() {
    let event = sample_event();
    let fields = stream_fields(&event.partition_key(), &event).unwrap();

    assert_eq!(fields[0], ("key", "7".to_string()));
    assert_eq!(fields[1], ("type", "user.logged_in".to_string()));

    let payload: serde_json::Value = serde_json::from_str(&fields[2].1).unwrap();
    assert_eq!(payload["type"], "user.logged_in");
    assert_eq!(payload["user_id"], 7);
    assert_eq!(payload["email"], "ada@example.com");
    assert_eq!(payload["ip"], "10.0.0.1");
}

#[tokio::test]
async fn test_tracing_publisher_never_fails() {
    let publisher = TracingEventPublisher::new();
    let event = sample_event();

    assert!(publisher.publish("7", &event).await.is_ok());
}
