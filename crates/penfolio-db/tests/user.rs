use chrono::Utc;
use penfolio_db::{access_token, user, user_profile};
use penfolio_test_helpers::setup_schema;
use penfolio_test_helpers::user::{create_test_account, create_test_user};
use sea_orm::{Database, DatabaseConnection, DbErr};
use test_log::test;
use uuid::Uuid;

async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    db
}

#[test(tokio::test)]
async fn test_create_user_and_find_by_token() {
    let db = setup_db().await;

    let user = user::Mutation::create_user(
        &db,
        "ada".to_owned(),
        "ada@example.org".to_owned(),
        "$argon2id$fake".to_owned(),
    )
    .await
    .unwrap();

    let token = access_token::Mutation::create_access_token(&db, user.id).await.unwrap();

    let found = user::Query::find_by_token(&db, &token.access_token).await.unwrap();
    assert_eq!(found.map(|user| user.id), Some(user.id));

    assert!(user::Query::find_by_token(&db, "no such token").await.unwrap().is_none());
}

#[test(tokio::test)]
async fn test_access_token_is_stable_per_user() {
    let db = setup_db().await;
    let user = create_test_user(&db).await;

    let first = access_token::Mutation::create_access_token(&db, user.id).await.unwrap();
    let second = access_token::Mutation::create_access_token(&db, user.id).await.unwrap();
    assert_eq!(first.access_token, second.access_token);
}

#[test(tokio::test)]
async fn test_identity_taken() {
    let db = setup_db().await;
    let user = create_test_user(&db).await;

    assert!(user::Query::identity_taken(&db, &user.username, "other@example.org").await.unwrap());
    assert!(user::Query::identity_taken(&db, "somebody-else", &user.email).await.unwrap());
    assert!(
        !user::Query::identity_taken(&db, "somebody-else", "other@example.org")
            .await
            .unwrap()
    );
}

#[test(tokio::test)]
async fn test_profile_lifecycle() {
    let db = setup_db().await;
    let user = create_test_user(&db).await;

    let profile = user_profile::Mutation::create_profile(&db, user.id).await.unwrap();
    assert_eq!(profile.current_streak, 0);
    assert_eq!(profile.pin_hash, None);

    user_profile::Mutation::set_pin_hash(&db, user.id, "$argon2id$pin".to_owned())
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    user_profile::Mutation::update_streak(&db, user.id, 2, 4, today).await.unwrap();

    let profile = user_profile::Query::find_by_user_id(&db, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.pin_hash.as_deref(), Some("$argon2id$pin"));
    assert_eq!(profile.current_streak, 2);
    assert_eq!(profile.longest_streak, 4);
    assert_eq!(profile.last_content_date, Some(today));
}

#[test(tokio::test)]
async fn test_profile_updates_need_an_existing_row() {
    let db = setup_db().await;

    let res = user_profile::Mutation::set_pin_hash(&db, Uuid::new_v4(), "$argon2id$pin".to_owned()).await;
    assert!(matches!(res, Err(DbErr::RecordNotFound(_))));

    let res = user_profile::Mutation::update_streak(&db, Uuid::new_v4(), 1, 1, Utc::now().date_naive()).await;
    assert!(matches!(res, Err(DbErr::RecordNotFound(_))));
}

#[test(tokio::test)]
async fn test_delete_user_cascades() {
    let db = setup_db().await;
    let (user, _) = create_test_account(&db).await;

    user::Mutation::delete(&db, user.id).await.unwrap();

    assert!(user::Query::find_user_by_id(&db, user.id).await.unwrap().is_none());
    assert!(
        user_profile::Query::find_by_user_id(&db, user.id)
            .await
            .unwrap()
            .is_none()
    );
}
