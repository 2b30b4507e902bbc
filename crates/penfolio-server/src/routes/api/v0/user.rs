use crate::app::AppConfig;
use crate::routes::error::ApiError;
use crate::user::ExtractUserId;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use http::StatusCode;
use penfolio_core::account;
use penfolio_db::sea_orm::DatabaseConnection;
use penfolio_model::journal::partial::PinPayload;
use penfolio_model::user::{NewAccount, Registration, User};
use penfolio_model_tools::convert::FromDbModel;

pub(crate) fn create_router<S>(deletable: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/register", post(register))
        .route("/", get(get_user_info))
        .route("/pin", put(set_pin));

    if deletable {
        router = router.route("/delete", delete(delete_user));
    }

    router.with_state(())
}

#[utoipa::path(
    post,
    path = "/api/v0/user/register",
    request_body = NewAccount,
    responses(
        (status = CREATED, description = "Account, profile and access token created", body = Registration),
        (status = CONFLICT, description = "Username or email already exists"),
    ),
    tag = "v0/user"
)]
pub(crate) async fn register(
    Extension(conn): Extension<DatabaseConnection>,
    Extension(config): Extension<AppConfig>,
    Json(new_account): Json<NewAccount>,
) -> Result<impl IntoResponse, ApiError> {
    let registered = account::register(&conn, config.hasher(), new_account).await?;

    let access_token = registered.token.access_token;
    let user = User::from_db_model((registered.user, registered.profile));
    Ok((StatusCode::CREATED, Json(Registration { user, access_token })))
}

#[utoipa::path(
    get,
    path = "/api/v0/user",
    responses(
        (status = OK, body = User, description = "The current user with profile and streaks"),
    ),
    tag = "v0/user",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_user_info(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, profile) = account::profile(&conn, user_id).await?;
    Ok(Json(User::from_db_model((user, profile))))
}

#[utoipa::path(
    put,
    path = "/api/v0/user/pin",
    request_body = PinPayload,
    responses(
        (status = NO_CONTENT, description = "PIN stored"),
        (status = BAD_REQUEST, description = "Blank PIN"),
    ),
    tag = "v0/user",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn set_pin(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Extension(config): Extension<AppConfig>,
    Json(PinPayload { pin }): Json<PinPayload>,
) -> Result<impl IntoResponse, ApiError> {
    account::set_pin(&conn, config.hasher(), user_id, &pin).await?;

    tracing::debug!(%user_id, "pin updated");

    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_user(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<impl IntoResponse, ApiError> {
    account::delete_account(&conn, user_id).await?;

    tracing::debug!(%user_id, "user deleted!");

    Ok(StatusCode::NO_CONTENT)
}
