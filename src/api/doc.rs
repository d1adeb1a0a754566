//! OpenAPI document for the JSON endpoints.

use utoipa::OpenApi;

use crate::api::handlers::{consulta, system};
use crate::domain::QueryResult;
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of `/api/v1` and `/health`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "cedula-gateway", description = "Cédula lookup gateway"),
    paths(consulta::get_consulta, system::health_handler),
    components(schemas(QueryResult, ErrorResponse, ErrorBody, system::HealthResponse)),
    tags(
        (name = "Consultas", description = "Cédula lookups"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
