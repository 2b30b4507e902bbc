use penfolio_core::secret::{HashError, SecretHasher};
use sea_orm::{Database, DatabaseConnection};

/// Stores the plaintext with a marker instead of doing real key
/// stretching, so tests don't pay for Argon2.
#[allow(dead_code)]
pub struct PlainHasher;

impl SecretHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        Ok(format!("plain:{plaintext}"))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        hash == format!("plain:{plaintext}")
    }
}

#[allow(dead_code)]
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    penfolio_test_helpers::setup_schema(&db).await.unwrap();
    db
}
