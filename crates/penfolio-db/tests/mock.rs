use penfolio_db::user_profile::Query;
use penfolio_entity::user_profile;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_find_profile_by_user_id() -> Result<(), DbErr> {
    let user_id = Uuid::new_v4();
    let model = user_profile::Model {
        user_id,
        pin_hash: None,
        current_streak: 3,
        longest_streak: 7,
        last_content_date: None,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[model.clone()]])
        .into_connection();

    assert_eq!(Query::find_by_user_id(&db, user_id).await?, Some(model));

    Ok(())
}

#[test(tokio::test)]
async fn test_find_profile_for_unknown_user() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user_profile::Model>::new()])
        .into_connection();

    assert_eq!(Query::find_by_user_id(&db, Uuid::new_v4()).await?, None);

    Ok(())
}
