/// Tests to ensure route modules compile and the OpenAPI document covers them

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use crate::swagger::ApiDoc;
    use crate::test_utils::TestContext;

    #[test]
    fn test_companies_router_compiles() {
        let _router = crate::routes::companies::router();
    }

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/health",
            "/api/companies/count",
            "/api/companies/top-paid",
            "/api/companies/by-skill/{skill}",
            "/api/companies/by-location/{location}",
            "/api/companies/headcount-range",
            "/api/companies/benefit/{benefit}",
        ] {
            assert!(paths.contains(&expected), "missing path {}", expected);
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let ctx = TestContext::new();
        let (status, body) = ctx.get_json("/api/health").await;

        assert_eq!(status, axum::http::StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_openapi_json_is_served() {
        let ctx = TestContext::new();
        let (status, body) = ctx.get_json("/api-docs/openapi.json").await;

        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body["paths"]["/api/companies/top-paid"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let ctx = TestContext::new();
        let (status, _) = ctx.get_json("/api/companies/by-skill").await;

        assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    }
}
