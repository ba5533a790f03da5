use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use axum::Router;
use std::sync::Arc;

use crate::{
    models::{Company, CountResponse, ErrorResponse, HiringCriteria, SalaryBand},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        crate::routes::companies::queries::count_companies,
        crate::routes::companies::queries::top_paid_companies,
        crate::routes::companies::queries::companies_by_skill,
        crate::routes::companies::queries::companies_by_location,
        crate::routes::companies::queries::companies_by_headcount_range,
        crate::routes::companies::queries::companies_by_benefit,
    ),
    components(
        schemas(Company, HiringCriteria, SalaryBand, CountResponse, ErrorResponse)
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "companies", description = "Read-only company queries"),
    ),
    info(
        title = "Companies API",
        version = "0.1.0",
        description = "Read-only queries over the companies collection"
    )
)]
pub struct ApiDoc;

pub fn create_swagger_router() -> Router<Arc<AppState>> {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
