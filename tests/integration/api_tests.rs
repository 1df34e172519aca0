//! HTTP surface tests
//!
//! The full actix application over in-memory stores and a stub analyzer.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{SMALL_TALK, TYPE_ERROR};
    use crate::common::TestApp;
    use crate::init_app;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use async_trait::async_trait;
    use errexplain::config::Config;
    use errexplain::core::analysis::{Analyzer, AnalyzerError, ErrorAnalysis};
    use errexplain::core::clock::system_clock;
    use errexplain::server::{AppState, HttpServer};
    use errexplain::storage::StorageLayer;
    use mockall::mock;
    use serde_json::{Value, json};
    use std::sync::Arc;

    mock! {
        pub Backend {}

        #[async_trait]
        impl Analyzer for Backend {
            async fn analyze(&self, error_text: &str, language: &str) -> Result<ErrorAnalysis, AnalyzerError>;
            fn name(&self) -> &'static str;
        }
    }

    fn analyze_request(message: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/analyze-error")
            .insert_header(("x-forwarded-for", "203.0.113.7"))
            .insert_header(("user-agent", "integration-tests"))
            .set_json(json!({ "errorMessage": message, "language": "JavaScript" }))
    }

    fn status_request() -> test::TestRequest {
        test::TestRequest::get()
            .uri("/api/analyze-status")
            .insert_header(("x-forwarded-for", "203.0.113.7"))
            .insert_header(("user-agent", "integration-tests"))
    }

    // ==================== Analyze ====================

    #[actix_web::test]
    async fn test_analyze_type_error() {
        let app = TestApp::new();
        let service = init_app!(app);

        let resp = test::call_service(&service, analyze_request(TYPE_ERROR).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["rateLimit"]["remaining"], 4);
        assert_eq!(body["analysis"]["language"], "JavaScript");
        assert!(
            ["low", "medium", "high"].contains(&body["analysis"]["severity"].as_str().unwrap())
        );
        assert!(!body["analysis"]["causes"].as_array().unwrap().is_empty());
        assert!(body["analysis"]["id"].is_string());

        assert_eq!(app.analyzer.calls(), 1);
        assert_eq!(app.analyzer.last_language().as_deref(), Some("JavaScript"));
        assert_eq!(app.store.submission_count(), 1);
    }

    #[actix_web::test]
    async fn test_small_talk_never_reaches_analyzer() {
        let mut backend = MockBackend::new();
        backend.expect_analyze().never();
        backend.expect_name().return_const("mock");

        let state = AppState::new(
            Config::default(),
            StorageLayer::local(),
            Arc::new(backend) as Arc<dyn Analyzer>,
            system_clock(),
        );
        let service =
            test::init_service(HttpServer::create_app(actix_web::web::Data::new(state))).await;

        let resp = test::call_service(&service, analyze_request(SMALL_TALK).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_AN_ERROR_MESSAGE");
        assert!(body["error"]["suggestion"].is_string());

        let resp = test::call_service(&service, status_request().to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["remaining"], 5);
        assert_eq!(body["canAnalyze"], true);
    }

    #[actix_web::test]
    async fn test_sixth_analysis_is_rejected() {
        let app = TestApp::new();
        let service = init_app!(app);

        for expected in (0..5).rev() {
            let resp =
                test::call_service(&service, analyze_request(TYPE_ERROR).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["rateLimit"]["remaining"], expected);
        }

        let resp = test::call_service(&service, analyze_request(TYPE_ERROR).to_request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "QUOTA_EXCEEDED");
        assert_eq!(body["error"]["remaining"], 0);
        assert_eq!(body["error"]["resetTime"], "2025-03-13T10:00:00Z");
        assert_eq!(app.analyzer.calls(), 5);

        let resp = test::call_service(&service, status_request().to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["remaining"], 0);
        assert_eq!(body["canAnalyze"], false);
    }

    #[actix_web::test]
    async fn test_quota_is_per_client() {
        let app = TestApp::new();
        let service = init_app!(app);

        for _ in 0..5 {
            test::call_service(&service, analyze_request(TYPE_ERROR).to_request()).await;
        }

        let resp = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/api/analyze-error")
                .insert_header(("x-forwarded-for", "198.51.100.20"))
                .set_json(json!({ "errorMessage": TYPE_ERROR, "language": "JavaScript" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_fields_are_validation_errors() {
        let app = TestApp::new();
        let service = init_app!(app);

        let resp = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/api/analyze-error")
                .set_json(json!({ "errorMessage": TYPE_ERROR }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Error message and language are required");
        assert_eq!(app.analyzer.calls(), 0);
    }

    #[actix_web::test]
    async fn test_overlong_message_rejected() {
        let app = TestApp::new();
        let service = init_app!(app);
        let long = format!("TypeError: {}", "x".repeat(6000));

        let resp = test::call_service(&service, analyze_request(&long).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .starts_with("Error message too long")
        );
    }

    #[actix_web::test]
    async fn test_malformed_json_is_validation_error() {
        let app = TestApp::new();
        let service = init_app!(app);

        let resp = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/api/analyze-error")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_analyzer_failure_is_service_unavailable() {
        let app = TestApp::new();
        app.analyzer.fail_with_upstream(500);
        let service = init_app!(app);

        let resp = test::call_service(&service, analyze_request(TYPE_ERROR).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "AI_SERVICE_UNAVAILABLE");
        assert_eq!(app.store.submission_count(), 0);
    }

    #[actix_web::test]
    async fn test_local_mode_analysis_has_no_id() {
        let app = TestApp::local();
        let service = init_app!(app);

        let resp = test::call_service(&service, analyze_request(TYPE_ERROR).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["analysis"]["id"].is_null());
        assert_eq!(body["rateLimit"]["remaining"], 4);
    }

    // ==================== Classify ====================

    #[actix_web::test]
    async fn test_classify_endpoint() {
        let app = TestApp::new();
        let service = init_app!(app);

        let resp = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/api/classify")
                .set_json(json!({ "errorMessage": TYPE_ERROR, "language": "JavaScript" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["valid"], true);
        assert!(body["score"].as_u64().unwrap() >= 2);
        assert!(body["rulesetVersion"].is_string());

        let resp = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/api/classify")
                .set_json(json!({ "errorMessage": SMALL_TALK }))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["valid"], false);
        assert!(body["reason"].is_string());
        assert_eq!(app.analyzer.calls(), 0);
    }

    // ==================== Health and headers ====================

    #[actix_web::test]
    async fn test_health_endpoints() {
        let app = TestApp::new();
        let service = init_app!(app);

        let resp =
            test::call_service(&service, test::TestRequest::get().uri("/health").to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("server").unwrap(), "ErrExplain");
        assert!(resp.headers().contains_key("x-request-id"));
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["quotaBackend"], "durable");
        assert_eq!(body["data"]["analyzer"], "stub");

        let resp = test::call_service(
            &service,
            test::TestRequest::get().uri("/health/detailed").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_request_id_is_echoed() {
        let app = TestApp::new();
        let service = init_app!(app);

        let resp = test::call_service(
            &service,
            test::TestRequest::get()
                .uri("/health")
                .insert_header(("x-request-id", "trace-abc_123"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-abc_123");
    }
}
