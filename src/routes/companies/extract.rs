use axum::{
    extract::{rejection::PathRejection, FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::CompanyError;

/// Query string extractor that never rejects a request on its own.
///
/// A repeated parameter keeps its first value (`?limit=3&limit=9` reads as
/// `limit=3`) and invalid percent-encoding is decoded lossily, so every
/// endpoint decides for itself which inputs are errors.
#[derive(Debug, Clone, Default)]
pub struct FirstQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for FirstQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CompanyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|err| CompanyError::internal(QUERY_STRING)(err.into()))?;

        let mut params = Map::new();
        for (key, value) in pairs {
            params.entry(key).or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(params))
            .map(FirstQuery)
            .map_err(|err| CompanyError::internal(QUERY_STRING)(err.into()))
    }
}

const QUERY_STRING: &str = "query string";

/// Unwrap a single path segment, turning axum's plain-text rejection (for
/// example a segment that is not valid UTF-8) into the endpoint's JSON error.
pub fn path_segment(
    path: Result<Path<String>, PathRejection>,
    endpoint: &'static str,
) -> Result<String, CompanyError> {
    path.map(|Path(segment)| segment)
        .map_err(|err| CompanyError::internal(endpoint)(err.into()))
}
