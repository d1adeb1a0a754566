//! HTTP layer: route handlers, DTOs, and router composition.
//!
//! The lookup page lives at `/`; JSON endpoints are mounted under `/api/v1`.

pub mod doc;
pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete router with the page, JSON, and system endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::consulta::page_routes())
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", doc::ApiDoc::openapi()),
        )
    };

    router
}
