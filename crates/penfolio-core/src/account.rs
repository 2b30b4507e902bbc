use crate::error::CoreError;
use crate::secret::SecretHasher;
use penfolio_db::util::FlattenTransactionResultExt;
use penfolio_db::{access_token, user, user_profile};
use penfolio_entity::{access_token as access_token_entity, user as user_entity, user_profile as user_profile_entity};
use penfolio_model::user::NewAccount;
use sea_orm::{ConnectionTrait, DbErr, SqlErr, TransactionTrait};
use uuid::Uuid;

pub struct RegisteredAccount {
    pub user: user_entity::Model,
    pub profile: user_profile_entity::Model,
    pub token: access_token_entity::Model,
}

/// Create an account: user row, profile row and access token, in one
/// transaction. The profile is an explicit step of this workflow, not a
/// side effect, so the 1:1 pairing can't silently go missing.
pub async fn register<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    hasher: &dyn SecretHasher,
    new: NewAccount,
) -> Result<RegisteredAccount, CoreError> {
    if new.username.trim().is_empty() || new.email.trim().is_empty() || new.password.is_empty() {
        return Err(CoreError::Validation(
            "Username, email and password must not be empty.".into(),
        ));
    }

    if user::Query::identity_taken(conn, &new.username, &new.email).await? {
        return Err(CoreError::Conflict("Username or email already exists.".into()));
    }

    let password_hash = hasher.hash(&new.password)?;

    conn.transaction::<_, RegisteredAccount, DbErr>(|txn| {
        Box::pin(async move {
            let user = user::Mutation::create_user(txn, new.username, new.email, password_hash).await?;
            let profile = user_profile::Mutation::create_profile(txn, user.id).await?;
            let token = access_token::Mutation::create_access_token(txn, user.id).await?;
            Ok(RegisteredAccount { user, profile, token })
        })
    })
    .await
    .flatten_res()
    .map_err(|error| match error.sql_err() {
        // Two racing registrations can both pass the pre-check, the unique
        // constraint settles it.
        Some(SqlErr::UniqueConstraintViolation(_)) => CoreError::Conflict("Username or email already exists.".into()),
        _ => CoreError::from(error),
    })
}

pub async fn profile<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> Result<(user_entity::Model, user_profile_entity::Model), CoreError> {
    let user = user::Query::find_user_by_id(conn, user_id)
        .await?
        .ok_or(CoreError::NotFound("User not found".into()))?;
    let profile = user_profile::Query::find_by_user_id(conn, user_id)
        .await?
        .ok_or(CoreError::NotFound("User profile not found".into()))?;
    Ok((user, profile))
}

/// Set or replace the covert PIN. Only the salted hash is stored.
pub async fn set_pin<C: ConnectionTrait>(
    conn: &C,
    hasher: &dyn SecretHasher,
    user_id: Uuid,
    pin: &str,
) -> Result<(), CoreError> {
    if pin.trim().is_empty() {
        return Err(CoreError::Validation("PIN must not be empty.".into()));
    }

    let pin_hash = hasher.hash(pin)?;
    match user_profile::Mutation::set_pin_hash(conn, user_id, pin_hash).await {
        Err(DbErr::RecordNotFound(_)) => Err(CoreError::NotFound("User profile not found".into())),
        res => Ok(res?),
    }
}

/// Remove the account with everything attached to it (profile, token,
/// journals follow via the schema's cascades).
pub async fn delete_account<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<(), CoreError> {
    user::Mutation::delete(conn, user_id).await?;
    Ok(())
}
