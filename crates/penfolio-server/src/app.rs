use crate::routes;
use axum::{Extension, Router};
use http::{Method, header};
use penfolio_core::secret::{Argon2Hasher, SecretHasher};
use sea_orm::DatabaseConnection;
use sentry_tower::NewSentryLayer;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub(crate) struct InnerAppConfig {
    hasher: Box<dyn SecretHasher>,
}

#[derive(Clone)]
pub(crate) struct AppConfig(Arc<InnerAppConfig>);

impl AppConfig {
    fn new(hasher: Box<dyn SecretHasher>) -> Self {
        Self(Arc::new(InnerAppConfig { hasher }))
    }

    pub(crate) fn hasher(&self) -> &dyn SecretHasher {
        self.0.hasher.as_ref()
    }
}

pub fn create_app(origins: Vec<String>, deletable: bool, pool: DatabaseConnection) -> anyhow::Result<Router> {
    let api_cors = CorsLayer::new()
        .allow_origin(
            origins
                .iter()
                .map(|origin| origin.parse())
                .collect::<Result<Vec<_>, _>>()?,
        )
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ORIGIN,
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/user", routes::api::v0::user::create_router(deletable))
                .nest("/journal", routes::api::v0::journal::create_router())
                .layer(api_cors),
        )
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(NewSentryLayer::new_from_top())
                .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
                .layer(Extension(AppConfig::new(Box::new(Argon2Hasher))))
                .layer(Extension(pool)),
        )
        .with_state(());
    Ok(app)
}
