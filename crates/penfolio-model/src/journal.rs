pub mod partial;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr)]
pub enum MoodTag {
    #[serde(rename = "MERRY", alias = "merry", alias = "Merry")]
    Merry,
    #[serde(rename = "GLOOMY", alias = "gloomy", alias = "Gloomy")]
    Gloomy,
    #[serde(rename = "COVERT", alias = "covert", alias = "Covert")]
    Covert,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Journal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    /// Withheld for covert journals unless the operation verified the PIN.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<String>,
    pub mood_tag: MoodTag,
    pub is_covert: bool,
    pub created_at: chrono::DateTime<FixedOffset>,
    pub updated_at: chrono::DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        assert_eq!(r#""MERRY""#, serde_json::to_string(&MoodTag::Merry).unwrap());
        assert_eq!(r#""GLOOMY""#, serde_json::to_string(&MoodTag::Gloomy).unwrap());
        assert_eq!(r#""COVERT""#, serde_json::to_string(&MoodTag::Covert).unwrap());
    }

    #[test]
    fn test_deserialize_aliases() {
        for raw in [r#""COVERT""#, r#""covert""#, r#""Covert""#] {
            let tag: MoodTag = serde_json::from_str(raw).unwrap();
            assert_eq!(tag, MoodTag::Covert);
        }
    }

    #[test]
    fn test_redacted_content_is_absent() {
        let journal = Journal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "quiet".to_owned(),
            content: None,
            mood_tag: MoodTag::Covert,
            is_covert: true,
            created_at: chrono::DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap(),
            updated_at: chrono::DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap(),
        };
        let json = serde_json::to_value(&journal).unwrap();
        assert!(json.get("content").is_none(), "content must be omitted, not null");
    }
}
