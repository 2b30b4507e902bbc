pub mod user;

use sea_orm::{ConnectionTrait, DbConn, DbErr};

/// Create the full schema on a fresh (usually `sqlite::memory:`) database.
pub async fn setup_schema(db: &DbConn) -> Result<(), DbErr> {
    let schema = match db.get_database_backend() {
        sea_orm::DatabaseBackend::Postgres => include_str!("postgres.sql"),
        sea_orm::DatabaseBackend::Sqlite => include_str!("sqlite.sql"),
        #[allow(clippy::unimplemented)]
        sea_orm::DatabaseBackend::MySql => unimplemented!(),
    };

    db.execute_unprepared(schema).await?;
    Ok(())
}
