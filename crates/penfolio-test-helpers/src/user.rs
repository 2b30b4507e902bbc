use chrono::Utc;
use penfolio_entity::journal::{self, MoodTag};
use penfolio_entity::{user, user_profile};
use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel};
use uuid::Uuid;

pub async fn create_test_user(db: &DatabaseConnection) -> user::Model {
    let id = Uuid::new_v4();
    let user = user::Model {
        id,
        username: format!("user-{id}"),
        email: format!("user-{id}@example.org"),
        password_hash: "$argon2id$test$not-a-real-hash".to_owned(),
        created_at: Utc::now().fixed_offset(),
    };
    user::Entity::insert(user.clone().into_active_model())
        .exec(db)
        .await
        .unwrap();
    user
}

pub async fn create_test_profile(db: &DatabaseConnection, user_id: Uuid) -> user_profile::Model {
    let profile = user_profile::Model {
        user_id,
        pin_hash: None,
        current_streak: 0,
        longest_streak: 0,
        last_content_date: None,
    };
    user_profile::Entity::insert(profile.clone().into_active_model())
        .exec(db)
        .await
        .unwrap();
    profile
}

/// A user together with its profile, the shape registration produces.
pub async fn create_test_account(db: &DatabaseConnection) -> (user::Model, user_profile::Model) {
    let user = create_test_user(db).await;
    let profile = create_test_profile(db, user.id).await;
    (user, profile)
}

pub async fn create_test_journal(
    db: &DatabaseConnection,
    user_id: Uuid,
    title: &str,
    content: &str,
    mood_tag: MoodTag,
) -> journal::Model {
    let now = Utc::now().fixed_offset();
    let journal = journal::Model {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_owned(),
        content: content.to_owned(),
        mood_tag,
        created_at: now,
        updated_at: now,
    };
    journal::Entity::insert(journal.clone().into_active_model())
        .exec(db)
        .await
        .unwrap();
    journal
}
