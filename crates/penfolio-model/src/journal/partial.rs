use super::MoodTag;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewJournal {
    pub title: String,
    pub content: String,
    pub mood_tag: MoodTag,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct JournalChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub mood_tag: Option<MoodTag>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PinPayload {
    pub pin: String,
}
