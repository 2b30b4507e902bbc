use axum::extract::FromRequestParts;
use axum::{Extension, RequestPartsExt};
use axum_auth::AuthBearer;
use axum_extra::extract::Cached;
use http::StatusCode;
use http::request::Parts;
use penfolio_db::user;
use sea_orm::DatabaseConnection;
use std::error::Error;
use uuid::Uuid;

type Rejection = (StatusCode, &'static str);

#[derive(Clone)]
struct Session {
    user_id: Uuid,
}

#[derive(Clone)]
pub(crate) struct ExtractUserId(pub Uuid);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Ok(AuthBearer(token)) = parts.extract::<AuthBearer>().await else {
            return Err((StatusCode::UNAUTHORIZED, "No authentication token provided"));
        };

        let Extension::<DatabaseConnection>(conn) =
            parts
                .extract::<Extension<DatabaseConnection>>()
                .await
                .map_err(|error| {
                    tracing::error!(
                        error = &error as &dyn Error,
                        "database connection not found in app data"
                    );
                    (StatusCode::INTERNAL_SERVER_ERROR, "Database Connection not found")
                })?;

        let Ok(Some(user)) = user::Query::find_by_token(&conn, &token).await else {
            return Err((StatusCode::UNAUTHORIZED, "Authentication failed."));
        };

        sentry::configure_scope(|scope| {
            scope.set_user(Some(sentry::User {
                id: Some(user.id.as_hyphenated().to_string()),
                ..Default::default()
            }));
        });

        Ok(Self { user_id: user.id })
    }
}

impl<S> FromRequestParts<S> for ExtractUserId
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session: Session = Cached::<Session>::from_request_parts(parts, state).await?.0;
        Ok(Self(session.user_id))
    }
}
