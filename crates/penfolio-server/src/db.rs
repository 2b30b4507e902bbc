use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

/// Create any missing tables at boot. The statements are idempotent;
/// versioned migration tooling is deliberately not part of this service.
pub(crate) async fn bootstrap(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = match conn.get_database_backend() {
        sea_orm::DatabaseBackend::Postgres => include_str!("db/postgres.sql"),
        sea_orm::DatabaseBackend::Sqlite => include_str!("db/sqlite.sql"),
        other => return Err(DbErr::Custom(format!("unsupported database backend: {other:?}"))),
    };

    tracing::debug!("creating schema");
    conn.execute_unprepared(schema).await?;
    Ok(())
}
