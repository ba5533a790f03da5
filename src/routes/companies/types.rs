use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::CompanyError;

// Numeric parameters are kept as raw strings so bad input can fall back to a
// default (or be rejected) per endpoint instead of failing extraction.

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CountQuery {
    /// Case-insensitive substring to match against the company name
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopPaidQuery {
    /// Maximum number of companies to return (default: 5, max: 50)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HeadcountRangeQuery {
    /// Minimum headcount, inclusive (default: 0, also used when non-numeric)
    #[param(value_type = Option<i64>)]
    pub min: Option<String>,
    /// Maximum headcount, inclusive
    #[param(value_type = Option<i64>)]
    pub max: Option<String>,
}

impl CountQuery {
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }
}

impl TopPaidQuery {
    /// Resolve the effective limit. Non-numeric, zero and negative values use
    /// `default`; anything above `max` is clamped.
    pub fn resolve_limit(&self, default: i64, max: i64) -> i64 {
        match non_empty(self.limit.as_deref()).and_then(parse_leading_int) {
            Some(limit) if limit > 0 => limit.min(max),
            _ => default.min(max),
        }
    }
}

impl HeadcountRangeQuery {
    /// Resolve `(min, max)` bounds. A missing or non-numeric `min` is 0;
    /// a present but non-numeric `max` is a validation error.
    pub fn resolve_bounds(&self, endpoint: &'static str) -> Result<(i64, Option<i64>), CompanyError> {
        let min = non_empty(self.min.as_deref())
            .and_then(parse_leading_int)
            .unwrap_or(0);

        let max = match non_empty(self.max.as_deref()) {
            Some(raw) => Some(
                parse_leading_int(raw)
                    .ok_or_else(|| CompanyError::invalid_query(endpoint, format!("max={}", raw)))?,
            ),
            None => None,
        };

        Ok((min, max))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse the leading integer of `raw`: optional surrounding whitespace, an
/// optional sign, then digits. Trailing text is ignored (`"10abc"` is 10).
/// Returns `None` when no digits lead the value or it overflows.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(|c: char| c == '+' || c == '-'));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "GET /api/companies/headcount-range";

    fn top_paid(limit: Option<&str>) -> TopPaidQuery {
        TopPaidQuery {
            limit: limit.map(str::to_string),
        }
    }

    fn range(min: Option<&str>, max: Option<&str>) -> HeadcountRangeQuery {
        HeadcountRangeQuery {
            min: min.map(str::to_string),
            max: max.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  42"), Some(42));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("10abc"), Some(10));
        assert_eq!(parse_leading_int("10.9"), Some(10));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }

    #[test]
    fn test_limit_defaults_and_ceiling() {
        assert_eq!(top_paid(None).resolve_limit(5, 50), 5);
        assert_eq!(top_paid(Some("")).resolve_limit(5, 50), 5);
        assert_eq!(top_paid(Some("10")).resolve_limit(5, 50), 10);
        assert_eq!(top_paid(Some("50")).resolve_limit(5, 50), 50);
        assert_eq!(top_paid(Some("500")).resolve_limit(5, 50), 50);
    }

    #[test]
    fn test_limit_bad_values_use_default() {
        assert_eq!(top_paid(Some("abc")).resolve_limit(5, 50), 5);
        assert_eq!(top_paid(Some("0")).resolve_limit(5, 50), 5);
        assert_eq!(top_paid(Some("-3")).resolve_limit(5, 50), 5);
    }

    #[test]
    fn test_headcount_bounds() {
        assert_eq!(range(None, None).resolve_bounds(ENDPOINT).unwrap(), (0, None));
        assert_eq!(
            range(Some("1000"), None).resolve_bounds(ENDPOINT).unwrap(),
            (1000, None)
        );
        assert_eq!(
            range(Some("1000"), Some("5000")).resolve_bounds(ENDPOINT).unwrap(),
            (1000, Some(5000))
        );
        assert_eq!(
            range(Some(""), Some("")).resolve_bounds(ENDPOINT).unwrap(),
            (0, None)
        );
    }

    #[test]
    fn test_headcount_non_numeric_min_defaults_to_zero() {
        assert_eq!(range(Some("abc"), None).resolve_bounds(ENDPOINT).unwrap(), (0, None));
        assert_eq!(
            range(Some("abc"), Some("5000")).resolve_bounds(ENDPOINT).unwrap(),
            (0, Some(5000))
        );
        assert_eq!(range(Some("-20"), None).resolve_bounds(ENDPOINT).unwrap(), (-20, None));
    }

    #[test]
    fn test_headcount_non_numeric_max_is_rejected() {
        assert!(matches!(
            range(Some("10"), Some("lots")).resolve_bounds(ENDPOINT),
            Err(CompanyError::InvalidQueryParameters { .. })
        ));
    }

    #[test]
    fn test_count_name_ignores_blank() {
        let query = CountQuery {
            name: Some("  ".to_string()),
        };
        assert_eq!(query.name(), None);

        let query = CountQuery {
            name: Some("Microsoft".to_string()),
        };
        assert_eq!(query.name(), Some("Microsoft"));
    }
}
