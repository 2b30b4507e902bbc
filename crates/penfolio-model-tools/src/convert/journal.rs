use crate::convert::{FromDbModel, FromModel, IntoModel};
use penfolio_entity::journal;
use penfolio_model::journal::{Journal, MoodTag};

impl FromDbModel<journal::MoodTag> for MoodTag {
    fn from_db_model(model: journal::MoodTag) -> Self {
        match model {
            journal::MoodTag::Merry => Self::Merry,
            journal::MoodTag::Gloomy => Self::Gloomy,
            journal::MoodTag::Covert => Self::Covert,
        }
    }
}

impl FromModel<MoodTag> for journal::MoodTag {
    fn from_model(model: MoodTag) -> Self {
        match model {
            MoodTag::Merry => Self::Merry,
            MoodTag::Gloomy => Self::Gloomy,
            MoodTag::Covert => Self::Covert,
        }
    }
}

/// The guarded projection: covert content is withheld.
impl FromDbModel<journal::Model> for Journal {
    fn from_db_model(model: journal::Model) -> Self {
        let is_covert = model.mood_tag == journal::MoodTag::Covert;
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            content: (!is_covert).then_some(model.content),
            mood_tag: model.mood_tag.into_model(),
            is_covert,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A journal whose content may be serialized because the operation that
/// produced it verified the owner's PIN.
pub struct Revealed(pub journal::Model);

impl FromDbModel<Revealed> for Journal {
    fn from_db_model(Revealed(model): Revealed) -> Self {
        let is_covert = model.mood_tag == journal::MoodTag::Covert;
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            content: Some(model.content),
            mood_tag: model.mood_tag.into_model(),
            is_covert,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn covert_model() -> journal::Model {
        let now = Utc::now().fixed_offset();
        journal::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "hidden".to_owned(),
            content: "secret body".to_owned(),
            mood_tag: journal::MoodTag::Covert,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_covert_is_redacted() {
        let journal = Journal::from_db_model(covert_model());
        assert!(journal.is_covert);
        assert_eq!(journal.content, None);
    }

    #[test]
    fn test_revealed_keeps_content() {
        let journal = Journal::from_db_model(Revealed(covert_model()));
        assert!(journal.is_covert);
        assert_eq!(journal.content.as_deref(), Some("secret body"));
    }

    #[test]
    fn test_merry_keeps_content() {
        let mut model = covert_model();
        model.mood_tag = journal::MoodTag::Merry;
        let journal = Journal::from_db_model(model);
        assert!(!journal.is_covert);
        assert_eq!(journal.content.as_deref(), Some("secret body"));
    }
}
