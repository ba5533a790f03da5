use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};
use std::sync::Arc;
use tracing::debug;

use super::extract::{path_segment, FirstQuery};
use super::types::{CountQuery, HeadcountRangeQuery, TopPaidQuery};
use crate::{
    errors::CompanyError,
    models::{Company, CompanyFilter, CompanyQuery, CompanySort, CountResponse, ErrorResponse},
    AppState,
};

const COUNT: &str = "GET /api/companies/count";
const TOP_PAID: &str = "GET /api/companies/top-paid";
const BY_SKILL: &str = "GET /api/companies/by-skill";
const BY_LOCATION: &str = "GET /api/companies/by-location";
const HEADCOUNT_RANGE: &str = "GET /api/companies/headcount-range";
const BENEFIT: &str = "GET /api/companies/benefit";

#[utoipa::path(
    get,
    path = "/api/companies/count",
    tag = "companies",
    params(CountQuery),
    responses(
        (status = 200, description = "Number of matching companies", body = CountResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn count_companies(
    State(state): State<Arc<AppState>>,
    FirstQuery(query): FirstQuery<CountQuery>,
) -> Result<Json<CountResponse>, CompanyError> {
    let filter = query
        .name()
        .map_or(CompanyFilter::All, |name| CompanyFilter::NameContains(name.to_string()));

    let total = state
        .store
        .count(&filter)
        .await
        .map_err(CompanyError::internal(COUNT))?;

    Ok(Json(CountResponse { total }))
}

#[utoipa::path(
    get,
    path = "/api/companies/top-paid",
    tag = "companies",
    params(TopPaidQuery),
    responses(
        (status = 200, description = "Companies ordered by base salary, highest first", body = Vec<Company>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn top_paid_companies(
    State(state): State<Arc<AppState>>,
    FirstQuery(query): FirstQuery<TopPaidQuery>,
) -> Result<Json<Vec<Company>>, CompanyError> {
    let limit = query.resolve_limit(
        state.config.top_paid_default_limit,
        state.config.top_paid_max_limit,
    );
    debug!("Fetching top {} paid companies", limit);

    let query = CompanyQuery::new(CompanyFilter::All)
        .sorted_by(CompanySort::SalaryDescending)
        .limited_to(limit);

    find(&state, &query, TOP_PAID).await
}

#[utoipa::path(
    get,
    path = "/api/companies/by-skill/{skill}",
    tag = "companies",
    params(("skill" = String, Path, description = "Skill to search for, case-insensitive substring")),
    responses(
        (status = 200, description = "Companies hiring for the skill", body = Vec<Company>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn companies_by_skill(
    State(state): State<Arc<AppState>>,
    skill: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Company>>, CompanyError> {
    let skill = path_segment(skill, BY_SKILL)?;
    let query = CompanyQuery::new(CompanyFilter::SkillContains(skill));
    find(&state, &query, BY_SKILL).await
}

#[utoipa::path(
    get,
    path = "/api/companies/by-location/{location}",
    tag = "companies",
    params(("location" = String, Path, description = "Location to search for, case-insensitive substring")),
    responses(
        (status = 200, description = "Companies in the location", body = Vec<Company>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn companies_by_location(
    State(state): State<Arc<AppState>>,
    location: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Company>>, CompanyError> {
    let location = path_segment(location, BY_LOCATION)?;
    let query = CompanyQuery::new(CompanyFilter::LocationContains(location));
    find(&state, &query, BY_LOCATION).await
}

#[utoipa::path(
    get,
    path = "/api/companies/headcount-range",
    tag = "companies",
    params(HeadcountRangeQuery),
    responses(
        (status = 200, description = "Companies within the headcount range", body = Vec<Company>),
        (status = 400, description = "Non-numeric max", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn companies_by_headcount_range(
    State(state): State<Arc<AppState>>,
    FirstQuery(query): FirstQuery<HeadcountRangeQuery>,
) -> Result<Json<Vec<Company>>, CompanyError> {
    let (min, max) = query.resolve_bounds(HEADCOUNT_RANGE)?;

    let query = CompanyQuery::new(CompanyFilter::HeadcountBetween { min, max });
    find(&state, &query, HEADCOUNT_RANGE).await
}

#[utoipa::path(
    get,
    path = "/api/companies/benefit/{benefit}",
    tag = "companies",
    params(("benefit" = String, Path, description = "Benefit to search for, case-insensitive substring")),
    responses(
        (status = 200, description = "Companies offering the benefit", body = Vec<Company>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn companies_by_benefit(
    State(state): State<Arc<AppState>>,
    benefit: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Company>>, CompanyError> {
    let benefit = path_segment(benefit, BENEFIT)?;
    let query = CompanyQuery::new(CompanyFilter::BenefitContains(benefit));
    find(&state, &query, BENEFIT).await
}

async fn find(
    state: &AppState,
    query: &CompanyQuery,
    endpoint: &'static str,
) -> Result<Json<Vec<Company>>, CompanyError> {
    let companies = state
        .store
        .find(query)
        .await
        .map_err(CompanyError::internal(endpoint))?;

    Ok(Json(companies))
}
