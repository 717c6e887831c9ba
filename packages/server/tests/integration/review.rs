use serde_json::{Value, json};
use server::config::ApiConfig;

use crate::common::{TestApp, routes};

mod create_review {
    use super::*;

    #[tokio::test]
    async fn stores_review_for_the_caller() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;

        let res = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"movieId": 42, "text": "Great film", "stars": 5}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["movieId"], 42);
        assert_eq!(res.body["review"], "Great film");
        assert_eq!(res.body["stars"], 5);
        assert_eq!(res.body["auth0Id"], "auth0|ada");
        assert!(res.body["createdAt"].is_string());
    }

    #[tokio::test]
    async fn star_bounds_are_inclusive() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;

        for stars in [1, 5] {
            let res = app
                .post_with_token(
                    routes::REVIEWS,
                    &json!({"movieId": 42, "text": "ok", "stars": stars}),
                    &token,
                )
                .await;
            assert_eq!(res.status, 201, "stars={stars}: {}", res.text);
        }

        for stars in [0, 6] {
            let res = app
                .post_with_token(
                    routes::REVIEWS,
                    &json!({"movieId": 42, "text": "ok", "stars": stars}),
                    &token,
                )
                .await;
            assert_eq!(res.status, 400, "stars={stars}");
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn rejects_blank_text() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;

        let res = app
            .post_with_token(
                routes::REVIEWS,
                &json!({"movieId": 42, "text": "   ", "stars": 3}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_body_without_movie_id() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;

        let res = app
            .post_with_token(routes::REVIEWS, &json!({"text": "ok", "stars": 3}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn same_movie_can_be_reviewed_twice() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;

        let first = app.create_review(&token, 42, "First take", 2).await;
        let second = app.create_review(&token, 42, "Second take", 4).await;

        assert_ne!(first, second);
        let listed = app.get_without_token(&routes::review(42)).await;
        assert_eq!(listed.body.as_array().unwrap().len(), 2);
    }
}

mod list_reviews {
    use super::*;

    #[tokio::test]
    async fn movie_listing_carries_author_email() {
        let app = TestApp::spawn().await;
        let ada = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;
        let bob = app
            .create_authenticated_user("auth0|bob", "bob@example.com")
            .await;
        app.create_review(&ada, 42, "Loved it", 5).await;
        app.create_review(&bob, 42, "Meh", 2).await;
        app.create_review(&bob, 7, "Other movie", 4).await;

        let res = app.get_without_token(&routes::review(42)).await;

        assert_eq!(res.status, 200);
        let listed = res.body.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["content"], "Loved it");
        assert_eq!(listed[0]["stars"], 5);
        assert_eq!(listed[0]["user"], "ada@example.com");
        assert!(listed[0]["time"].is_string());
        assert_eq!(listed[1]["content"], "Meh");
        assert_eq!(listed[1]["user"], "bob@example.com");
    }

    #[tokio::test]
    async fn repeated_listing_without_writes_is_stable() {
        let app = TestApp::spawn().await;
        let ada = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;
        app.create_review(&ada, 42, "Loved it", 5).await;
        app.create_review(&ada, 42, "Second look", 4).await;

        let first = app.get_without_token(&routes::review(42)).await;
        let second = app.get_without_token(&routes::review(42)).await;

        assert_eq!(first.status, 200);
        assert_eq!(first.body, second.body);
    }

    #[tokio::test]
    async fn malformed_movie_id_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token("/reviews/not-a-number").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn user_listing_returns_raw_records() {
        let app = TestApp::spawn().await;
        let ada = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;
        let bob = app
            .create_authenticated_user("auth0|bob", "bob@example.com")
            .await;
        app.create_review(&ada, 42, "Loved it", 5).await;
        app.create_review(&ada, 7, "Fine", 3).await;
        app.create_review(&bob, 42, "Meh", 2).await;

        let res = app
            .get_with_token(&routes::user_reviews("auth0|ada"), &bob)
            .await;

        assert_eq!(res.status, 200);
        let listed = res.body.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|r| r["auth0Id"] == "auth0|ada"));
        assert_eq!(listed[0]["movieId"], 42);
        assert_eq!(listed[1]["movieId"], 7);
    }

    #[tokio::test]
    async fn user_listing_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::user_reviews("auth0|ada")).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod orphaned_author {
    use super::*;

    #[tokio::test]
    async fn unknown_author_is_listed_with_null_user() {
        let app = TestApp::spawn().await;
        let ada = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;
        app.create_review(&ada, 42, "Loved it", 5).await;
        app.insert_orphan_review(42, "auth0|ghost").await;

        let res = app.get_without_token(&routes::review(42)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let listed = res.body.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["user"], "ada@example.com");
        assert_eq!(listed[1]["user"], Value::Null);
    }

    #[tokio::test]
    async fn strict_mode_fails_the_whole_listing() {
        let app = TestApp::spawn_with(ApiConfig {
            strict_authors: true,
            ..Default::default()
        })
        .await;
        let ada = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;
        app.create_review(&ada, 42, "Loved it", 5).await;
        app.insert_orphan_review(42, "auth0|ghost").await;

        let res = app.get_without_token(&routes::review(42)).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "INTERNAL_ERROR");
        assert!(!res.text.contains("auth0|ghost"));

        let unaffected = app.get_without_token(&routes::review(7)).await;
        assert_eq!(unaffected.status, 200);
    }
}

mod update_and_delete {
    use super::*;

    #[tokio::test]
    async fn update_overwrites_text_and_stars() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;
        let id = app.create_review(&token, 42, "Good", 3).await;

        let res = app
            .put_with_token(
                &routes::review(id),
                &json!({"text": "Even better the second time", "stars": 5}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.id(), id);
        assert_eq!(res.body["review"], "Even better the second time");
        assert_eq!(res.body["stars"], 5);
        assert_eq!(res.body["movieId"], 42);
    }

    #[tokio::test]
    async fn update_rejects_out_of_range_stars() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;
        let id = app.create_review(&token, 42, "Good", 3).await;

        let res = app
            .put_with_token(&routes::review(id), &json!({"text": "Good", "stars": 9}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_of_missing_review_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;

        let res = app
            .put_with_token(&routes::review(9999), &json!({"text": "x", "stars": 3}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_returns_the_deleted_review() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("auth0|ada", "ada@example.com")
            .await;
        let id = app.create_review(&token, 42, "Short-lived", 1).await;

        let res = app.delete_with_token(&routes::review(id), &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.id(), id);
        assert_eq!(res.body["review"], "Short-lived");

        let again = app.delete_with_token(&routes::review(id), &token).await;
        assert_eq!(again.status, 404);
        assert_eq!(again.body["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn review_lifecycle_end_to_end() {
    let app = TestApp::spawn().await;
    let token = app
        .create_authenticated_user("auth0|ada", "ada@example.com")
        .await;

    let id = app.create_review(&token, 42, "Great film", 5).await;

    let listed = app.get_without_token(&routes::review(42)).await;
    assert_eq!(
        listed.body,
        json!([{
            "time": listed.body[0]["time"],
            "stars": 5,
            "content": "Great film",
            "user": "ada@example.com",
        }])
    );

    let updated = app
        .put_with_token(&routes::review(id), &json!({"text": "Still great", "stars": 4}), &token)
        .await;
    assert_eq!(updated.status, 200);

    let mine = app.get_with_token(&routes::user_reviews("auth0|ada"), &token).await;
    assert_eq!(mine.body[0]["review"], "Still great");
    assert_eq!(mine.body[0]["stars"], 4);

    let deleted = app.delete_with_token(&routes::review(id), &token).await;
    assert_eq!(deleted.status, 200);

    let after = app.get_without_token(&routes::review(42)).await;
    assert_eq!(after.body, json!([]));
}
