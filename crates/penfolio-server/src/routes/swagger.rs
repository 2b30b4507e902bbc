use super::api;

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder};
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

struct SecurityAddon;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::user::register,
        api::v0::user::get_user_info,
        api::v0::user::set_pin,
        api::v0::journal::list_journals,
        api::v0::journal::list_covert_journals,
        api::v0::journal::get_journal,
        api::v0::journal::reveal_journal,
        api::v0::journal::create_journal,
        api::v0::journal::update_journal,
        api::v0::journal::delete_journal,
        api::v0::journal::search_journals,
    ),
    modifiers(&SecurityAddon),
    tags()
)]
struct ApiDoc;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // we can unwrap safely, since there already are components registered.
        let components = openapi.components.as_mut().expect("components not registered");
        components.add_security_scheme(
            "token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Api Token"))
                    .build(),
            ),
        );
    }
}

pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        // The OpenApi document is already served via SwaggerUi, rapidoc
        // only has to point at it.
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
}
