use crate::convert::{FromDbModel, IntoModel};
use penfolio_entity::{user, user_profile};
use penfolio_model::user::{User, UserProfile};

impl FromDbModel<user_profile::Model> for UserProfile {
    fn from_db_model(model: user_profile::Model) -> Self {
        Self {
            current_streak: model.current_streak,
            longest_streak: model.longest_streak,
            last_content_date: model.last_content_date,
            has_pin: model.pin_hash.is_some(),
        }
    }
}

impl FromDbModel<(user::Model, user_profile::Model)> for User {
    fn from_db_model((user, profile): (user::Model, user_profile::Model)) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            profile: profile.into_model(),
        }
    }
}
