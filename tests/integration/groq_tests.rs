//! Groq client against a mock server

#[cfg(test)]
mod tests {
    use errexplain::config::AnalyzerConfig;
    use errexplain::core::analysis::{Analyzer, AnalyzerError, GroqAnalyzer, Severity};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn analyzer(server: &MockServer, timeout_secs: u64) -> GroqAnalyzer {
        GroqAnalyzer::new(&AnalyzerConfig {
            api_key: Some("gsk_test".to_string()),
            api_base: server.uri(),
            timeout_secs,
            ..AnalyzerConfig::default()
        })
        .unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_successful_analysis() {
        let server = MockServer::start().await;
        let content = json!({
            "explanation": "map was called on undefined.",
            "causes": ["Data is still loading"],
            "solutions": ["Default to an empty array"],
            "severity": "medium",
            "category": "Type Error",
            "exampleCode": "(items ?? []).map(render)"
        })
        .to_string();

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .and(body_partial_json(json!({ "response_format": { "type": "json_object" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(&content)))
            .expect(1)
            .mount(&server)
            .await;

        let analysis = analyzer(&server, 5)
            .analyze("TypeError: Cannot read properties of undefined", "JavaScript")
            .await
            .unwrap();

        assert_eq!(analysis.severity, Severity::Medium);
        assert_eq!(analysis.category, "Type Error");
        assert_eq!(analysis.causes, vec!["Data is still loading".to_string()]);
        assert!(analysis.example_code.is_some());
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = analyzer(&server, 5)
            .analyze("TypeError: x is undefined", "JavaScript")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Upstream { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_malformed_model_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("I think this is a bug")),
            )
            .mount(&server)
            .await;

        let err = analyzer(&server, 5)
            .analyze("TypeError: x is undefined", "JavaScript")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_are_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = analyzer(&server, 5)
            .analyze("TypeError: x is undefined", "JavaScript")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("{}"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = analyzer(&server, 1)
            .analyze("TypeError: x is undefined", "JavaScript")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Timeout(1)));
    }
}
