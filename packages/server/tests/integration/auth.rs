use serde_json::json;

use crate::common::{AUDIENCE, ISSUER, TestApp, routes, token_for, token_with_claims, untrusted_token};

mod bearer_token {
    use super::*;

    #[tokio::test]
    async fn missing_authorization_header_is_token_missing() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::VERIFY_USER, &json!({})).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_token_invalid() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::WATCHLIST, "not-a-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_token_invalid() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .get(format!("{}{}", app.base_url(), routes::WATCHLIST))
            .header("Authorization", "Basic YWRhOnNlY3JldA==")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 401);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn token_signed_by_untrusted_key_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get_with_token(routes::WATCHLIST, &untrusted_token("auth0|mallory"))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let app = TestApp::spawn().await;
        let token = token_with_claims(json!({
            "sub": "auth0|ada",
            "aud": AUDIENCE,
            "iss": ISSUER,
            "exp": chrono::Utc::now().timestamp() - 600,
        }));

        let res = app.get_with_token(routes::WATCHLIST, &token).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn token_for_another_audience_is_rejected() {
        let app = TestApp::spawn().await;
        let token = token_with_claims(json!({
            "sub": "auth0|ada",
            "aud": "https://someone-else.example/api",
            "iss": ISSUER,
            "exp": chrono::Utc::now().timestamp() + 600,
        }));

        let res = app.get_with_token(routes::WATCHLIST, &token).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn valid_token_is_accepted() {
        let app = TestApp::spawn().await;
        let token = token_for("auth0|ada", "ada@example.com", "Ada");

        let res = app.get_with_token(routes::WATCHLIST, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body, json!([]));
    }
}

mod public_endpoints {
    use super::*;

    #[tokio::test]
    async fn ping_answers_pong() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::PING).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "pong");
    }

    #[tokio::test]
    async fn movie_listings_need_no_token() {
        let app = TestApp::spawn().await;

        let reviews = app.get_without_token(&routes::review(42)).await;
        let recommendations = app.get_without_token(&routes::recommendation(42)).await;

        assert_eq!(reviews.status, 200);
        assert_eq!(reviews.body, json!([]));
        assert_eq!(recommendations.status, 200);
        assert_eq!(recommendations.body, json!([]));
    }

    #[tokio::test]
    async fn openapi_document_lists_every_path() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::OPENAPI).await;

        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().expect("paths object");
        for path in [
            "/ping",
            "/verify-user",
            "/users/{subject_id}",
            "/reviews",
            "/reviews/{id}",
            "/user/reviews/{subject_id}",
            "/recommendations",
            "/recommendations/{id}",
            "/user/recommendations/{subject_id}",
            "/watchlist",
            "/watchlist/{movie_id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(res.body["components"]["securitySchemes"]["jwt"].is_object());
    }
}
