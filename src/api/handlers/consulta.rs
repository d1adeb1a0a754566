//! Lookup handlers: the HTML form page and its JSON counterpart.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Form, Json, Router};

use crate::api::dto::ConsultaForm;
use crate::app_state::AppState;
use crate::domain::QueryResult;
use crate::error::{ErrorResponse, GatewayError};
use crate::view::{Flash, IndexPage};

/// `GET /` — Empty lookup form.
pub async fn index_page() -> Html<String> {
    Html(IndexPage::default().render())
}

/// `POST /` — Look up the submitted `codigo` and render the page.
///
/// Always answers 200: an empty `codigo` or a failed lookup becomes a flash
/// message on the re-rendered form.
pub async fn submit_consulta(
    State(state): State<AppState>,
    Form(form): Form<ConsultaForm>,
) -> Html<String> {
    let codigo = form.codigo.trim();
    let mut page = IndexPage {
        codigo: codigo.to_string(),
        ..IndexPage::default()
    };

    match state.consulta_service.consult(codigo).await {
        Ok(result) => page.result = Some(result),
        Err(e) => page.flashes.push(Flash::error(e.to_string())),
    }

    Html(page.render())
}

/// `GET /api/v1/consultas/{codigo}` — Look up one cédula as JSON.
///
/// # Errors
///
/// Returns [`GatewayError`] on a blank `codigo` or a failed lookup.
#[utoipa::path(
    get,
    path = "/api/v1/consultas/{codigo}",
    tag = "Consultas",
    summary = "Look up a cédula",
    description = "Runs one lookup for the barcode number and records the result when a database is configured. Recording never affects the response.",
    params(("codigo" = String, Path, description = "Barcode number of the cédula")),
    responses(
        (status = 200, description = "Lookup result", body = QueryResult),
        (status = 400, description = "Blank barcode number", body = ErrorResponse),
        (status = 404, description = "Unknown barcode number", body = ErrorResponse),
        (status = 502, description = "Lookup service failed", body = ErrorResponse),
        (status = 504, description = "Lookup timed out", body = ErrorResponse),
    )
)]
pub async fn get_consulta(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let result = state.consulta_service.consult(&codigo).await?;
    Ok(Json(result))
}

/// Page routes mounted at the root.
pub fn page_routes() -> Router<AppState> {
    Router::new().route("/", get(index_page).post(submit_consulta))
}

/// JSON routes, nested under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/consultas/{codigo}", get(get_consulta))
}
