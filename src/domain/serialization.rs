use crate::domain::event::DomainEvent;
use thiserror::Error;

/// シリアライゼーションエラー
#[derive(Debug, Error, Clone)]
pub enum SerializationError {
    #[error("JSON serialization failed: {message}. Event type: {event_type}")]
    JsonSerializationFailed { message: String, event_type: String },

    #[error("JSON deserialization failed: {message}. Input: {input_preview}")]
    JsonDeserializationFailed {
        message: String,
        input_preview: String,
    },
}

impl SerializationError {
    /// 入力データのプレビューを生成（デバッグ用、最大100文字）
    fn create_input_preview(input: &str) -> String {
        if input.len() <= 100 {
            input.to_string()
        } else {
            let head: String = input.chars().take(97).collect();
            format!("{}...", head)
        }
    }
}

/// イベントシリアライザー
/// ドメインイベントのJSON表現への変換・復元を提供する
/// イベントバスが発行内容をログに残す際に使用する
#[derive(Debug, Clone, Default)]
pub struct EventSerializer;

impl EventSerializer {
    /// 新しいイベントシリアライザーを作成
    pub fn new() -> Self {
        Self
    }

    /// ドメインイベントをJSONにシリアライズ
    pub fn serialize_event(&self, event: &DomainEvent) -> Result<String, SerializationError> {
        serde_json::to_string(event).map_err(|e| SerializationError::JsonSerializationFailed {
            message: e.to_string(),
            event_type: event.event_type().to_string(),
        })
    }

    /// JSONからドメインイベントにデシリアライズ
    pub fn deserialize_event(&self, json: &str) -> Result<DomainEvent, SerializationError> {
        if json.trim().is_empty() {
            return Err(SerializationError::JsonDeserializationFailed {
                message: "Empty JSON input".to_string(),
                input_preview: String::new(),
            });
        }

        serde_json::from_str(json).map_err(|e| SerializationError::JsonDeserializationFailed {
            message: e.to_string(),
            input_preview: SerializationError::create_input_preview(json),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::BookingConfirmed;
    use crate::domain::model::{BookingId, EventId, Money, UserId};
    use uuid::Uuid;

    fn sample_event() -> DomainEvent {
        DomainEvent::BookingConfirmed(BookingConfirmed::with_correlation_id(
            BookingId::new(1),
            UserId::new(2),
            EventId::new(3),
            "VIP".to_string(),
            2,
            Money::parse("200.00").unwrap(),
            Uuid::new_v4(),
        ))
    }

    #[test]
    fn test_serialize_and_deserialize_round_trip() {
        let serializer = EventSerializer::new();
        let event = sample_event();

        let json = serializer.serialize_event(&event).unwrap();
        let restored = serializer.deserialize_event(&json).unwrap();

        match restored {
            DomainEvent::BookingConfirmed(e) => {
                assert_eq!(e.booking_id, BookingId::new(1));
                assert_eq!(e.tier_name, "VIP");
                assert_eq!(e.tickets, 2);
            }
            other => panic!("Expected BookingConfirmed, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_empty_input_fails() {
        let serializer = EventSerializer::new();
        assert!(serializer.deserialize_event("   ").is_err());
    }

    #[test]
    fn test_deserialize_garbage_fails_with_preview() {
        let serializer = EventSerializer::new();
        let result = serializer.deserialize_event("{not json");
        match result {
            Err(SerializationError::JsonDeserializationFailed { input_preview, .. }) => {
                assert_eq!(input_preview, "{not json");
            }
            other => panic!("Expected deserialization failure, got {:?}", other),
        }
    }
}
