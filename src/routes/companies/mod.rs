use axum::{routing::get, Router};
use std::sync::Arc;
use crate::AppState;

pub mod extract;
pub mod queries;
pub mod types;

pub use queries::*;
pub use types::*;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/count", get(count_companies))
        .route("/top-paid", get(top_paid_companies))
        .route("/by-skill/{skill}", get(companies_by_skill))
        .route("/by-location/{location}", get(companies_by_location))
        .route("/headcount-range", get(companies_by_headcount_range))
        .route("/benefit/{benefit}", get(companies_by_benefit))
}
