//! History and sharing over HTTP

#[cfg(test)]
mod tests {
    use crate::common::fixtures::TYPE_ERROR;
    use crate::common::{SubmissionFactory, TestApp};
    use crate::init_app;
    use actix_web::body::MessageBody;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use errexplain::core::clock::Clock;
    use errexplain::core::identity::ClientIdentity;
    use errexplain::storage::SubmissionStore;
    use serde_json::{Value, json};

    const OWNER_IP: &str = "203.0.113.7";
    const OTHER_IP: &str = "198.51.100.20";

    fn owner_identity() -> ClientIdentity {
        ClientIdentity::derive(Some(OWNER_IP), None, None)
    }

    fn analyze_request() -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/analyze-error")
            .insert_header(("x-forwarded-for", OWNER_IP))
            .set_json(json!({ "errorMessage": TYPE_ERROR, "language": "JavaScript" }))
    }

    async fn submission_id<B: MessageBody>(resp: ServiceResponse<B>) -> String {
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body["analysis"]["id"].as_str().unwrap().to_string()
    }

    fn share_request(ip: &str, error_id: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/share-error")
            .insert_header(("x-forwarded-for", ip))
            .set_json(json!({ "errorId": error_id }))
    }

    #[actix_web::test]
    async fn test_history_lists_own_submissions() {
        let app = TestApp::new();
        let service = init_app!(app);
        let id = submission_id(test::call_service(&service, analyze_request().to_request()).await).await;

        let resp = test::call_service(
            &service,
            test::TestRequest::get()
                .uri("/api/user-history")
                .insert_header(("x-forwarded-for", OWNER_IP))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["history"][0]["id"], id.as_str());
        assert_eq!(body["history"][0]["language"], "JavaScript");
        assert_eq!(body["stats"]["total"], 1);
        assert_eq!(body["stats"]["timeline"].as_array().unwrap().len(), 7);

        let resp = test::call_service(
            &service,
            test::TestRequest::get()
                .uri("/api/user-history")
                .insert_header(("x-forwarded-for", OTHER_IP))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert!(body["history"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_delete_requires_owner() {
        let app = TestApp::new();
        let service = init_app!(app);
        let id = submission_id(test::call_service(&service, analyze_request().to_request()).await).await;

        let resp = test::call_service(
            &service,
            test::TestRequest::delete()
                .uri(&format!("/api/user-history?id={}", id))
                .insert_header(("x-forwarded-for", OTHER_IP))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(
            &service,
            test::TestRequest::delete()
                .uri(&format!("/api/user-history?id={}", id))
                .insert_header(("x-forwarded-for", OWNER_IP))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(app.store.submission_count(), 0);

        let resp = test::call_service(
            &service,
            test::TestRequest::delete()
                .uri("/api/user-history")
                .insert_header(("x-forwarded-for", OWNER_IP))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_share_and_fetch() {
        let app = TestApp::new();
        let service = init_app!(app);
        let id = submission_id(test::call_service(&service, analyze_request().to_request()).await).await;

        let resp = test::call_service(&service, share_request(OWNER_IP, &id).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let first: Value = test::read_body_json(resp).await;
        let share_id = first["shareId"].as_str().unwrap().to_string();
        assert_eq!(
            first["shareUrl"],
            format!("http://localhost:3000/shared/{}", share_id)
        );

        let resp = test::call_service(&service, share_request(OWNER_IP, &id).to_request()).await;
        let second: Value = test::read_body_json(resp).await;
        assert_eq!(second["shareId"], share_id.as_str());

        let resp = test::call_service(
            &service,
            test::TestRequest::get()
                .uri(&format!("/api/shared-error?shareId={}", share_id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["shared"]["errorMessage"], TYPE_ERROR);
        assert!(body["shared"].get("clientId").is_none());
    }

    #[actix_web::test]
    async fn test_share_denied_for_strangers_and_private() {
        let app = TestApp::new();
        let service = init_app!(app);
        let id = submission_id(test::call_service(&service, analyze_request().to_request()).await).await;

        let resp = test::call_service(&service, share_request(OTHER_IP, &id).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let private = SubmissionFactory::private(&owner_identity(), app.clock.now());
        app.store.create(&private).await.unwrap();
        let resp = test::call_service(&service, share_request(OWNER_IP, &private.id).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "Cannot share private error analysis");

        let resp = test::call_service(&service, share_request(OWNER_IP, "missing").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unshared_submission_is_not_public() {
        let app = TestApp::new();
        let service = init_app!(app);
        test::call_service(&service, analyze_request().to_request()).await;

        let resp = test::call_service(
            &service,
            test::TestRequest::get()
                .uri("/api/shared-error?shareId=does-not-exist")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(
            &service,
            test::TestRequest::get().uri("/api/shared-error").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_without_store_history_is_empty_and_sharing_unavailable() {
        let app = TestApp::local();
        let service = init_app!(app);

        let resp = test::call_service(
            &service,
            test::TestRequest::get().uri("/api/user-history").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["history"].as_array().unwrap().is_empty());

        let resp = test::call_service(&service, share_request(OWNER_IP, "any").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let resp = test::call_service(
            &service,
            test::TestRequest::delete()
                .uri("/api/user-history?id=any")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
