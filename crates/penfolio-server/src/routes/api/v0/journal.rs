use crate::app::AppConfig;
use crate::routes::error::ApiError;
use crate::user::ExtractUserId;
use axum::Extension;
use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Json};
use axum::routing::{Router, get, post};
use http::StatusCode;
use penfolio_core::journal;
use penfolio_db::sea_orm::DatabaseConnection;
use penfolio_model::journal::partial::{JournalChanges, NewJournal, PinPayload};
use penfolio_model::journal::{Journal, MoodTag, Page};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .nest(
            "/entries",
            Router::new()
                .route("/", get(list_journals).post(create_journal))
                .route("/covert", post(list_covert_journals))
                .route(
                    "/{journal}",
                    get(get_journal).put(update_journal).delete(delete_journal),
                )
                .route("/{journal}/reveal", post(reveal_journal)),
        )
        .route("/search", get(search_journals))
        .with_state(())
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct ListParams {
    /// Mood to filter by. Asking for the covert mood here yields the
    /// covert-free listing; covert entries are only served by the
    /// dedicated covert listing.
    #[serde(default)]
    mood_tag: Option<MoodTag>,
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_per_page")]
    per_page: u64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct PageParams {
    #[serde(default = "default_page")]
    page: u64,
    #[serde(default = "default_per_page")]
    per_page: u64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct SearchParams {
    #[serde(default)]
    q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v0/journal/entries",
    params(ListParams),
    responses(
        (status = OK, description = "One page of the user's journals, covert entries excluded", body = Page<Journal>),
    ),
    tag = "v0/journal",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn list_journals(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = journal::list_visible(&conn, user, params.mood_tag, params.page, params.per_page).await?;
    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/v0/journal/entries/covert",
    params(PageParams),
    request_body = PinPayload,
    responses(
        (status = OK, description = "One page of the user's covert journals, content included", body = Page<Journal>),
        (status = FORBIDDEN, description = "PIN verification failed"),
    ),
    tag = "v0/journal",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn list_covert_journals(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Extension(config): Extension<AppConfig>,
    Query(params): Query<PageParams>,
    Json(PinPayload { pin }): Json<PinPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let page = journal::list_covert(&conn, config.hasher(), user, &pin, params.page, params.per_page).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v0/journal/entries/{journal}",
    responses(
        (status = OK, description = "The journal, redacted when covert", body = Journal),
        (status = NOT_FOUND, description = "No such journal for this user"),
    ),
    tag = "v0/journal",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn get_journal(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(journal): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let journal = journal::get(&conn, user, journal).await?;
    Ok(Json(journal))
}

#[utoipa::path(
    post,
    path = "/api/v0/journal/entries/{journal}/reveal",
    request_body = PinPayload,
    responses(
        (status = OK, description = "The covert journal including its content", body = Journal),
        (status = FORBIDDEN, description = "PIN verification failed"),
        (status = BAD_REQUEST, description = "The journal is not covert"),
    ),
    tag = "v0/journal",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn reveal_journal(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Extension(config): Extension<AppConfig>,
    Path(journal): Path<Uuid>,
    Json(PinPayload { pin }): Json<PinPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let journal = journal::reveal(&conn, config.hasher(), user, journal, &pin).await?;
    Ok(Json(journal))
}

#[utoipa::path(
    post,
    path = "/api/v0/journal/entries",
    request_body = NewJournal,
    responses(
        (status = CREATED, description = "Create a journal", body = Journal),
        (status = FORBIDDEN, description = "Covert journal requested without a PIN on file"),
    ),
    tag = "v0/journal",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn create_journal(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Json(new): Json<NewJournal>,
) -> Result<impl IntoResponse, ApiError> {
    let journal = journal::create(&conn, user, new).await?;
    Ok((StatusCode::CREATED, Json(journal)))
}

#[utoipa::path(
    put,
    path = "/api/v0/journal/entries/{journal}",
    request_body = JournalChanges,
    responses(
        (status = OK, description = "The updated journal", body = Journal),
        (status = FORBIDDEN, description = "Transition into covert without a PIN on file"),
        (status = NOT_FOUND, description = "No such journal for this user"),
    ),
    tag = "v0/journal",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn update_journal(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(journal): Path<Uuid>,
    Json(changes): Json<JournalChanges>,
) -> Result<impl IntoResponse, ApiError> {
    let journal = journal::update(&conn, user, journal, changes).await?;
    Ok(Json(journal))
}

#[utoipa::path(
    delete,
    path = "/api/v0/journal/entries/{journal}",
    responses(
        (status = NO_CONTENT, description = "Journal deleted"),
        (status = NOT_FOUND, description = "No such journal for this user"),
    ),
    tag = "v0/journal",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn delete_journal(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(journal): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    journal::delete(&conn, user, journal).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v0/journal/search",
    params(SearchParams),
    responses(
        (status = OK, description = "Matching non-covert journals; a blank query matches nothing", body = [Journal]),
    ),
    tag = "v0/journal",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn search_journals(
    ExtractUserId(user): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let journals = journal::search(&conn, user, params.q.as_deref().unwrap_or_default()).await?;
    Ok(Json(journals))
}
