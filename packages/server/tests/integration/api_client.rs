use client::{ClientConfig, ClientError, MarqueeClient, Session};
use common::Author;
use common::recommendation::CreateRecommendationRequest;
use common::review::{CreateReviewRequest, UpdateReviewRequest};
use common::user::UpdateUserRequest;

use crate::common::{TestApp, token_for};

fn client_for(app: &TestApp) -> MarqueeClient {
    MarqueeClient::new(ClientConfig {
        base_url: app.base_url(),
    })
    .unwrap()
}

#[tokio::test]
async fn client_drives_the_whole_api() {
    let app = TestApp::spawn().await;
    let api = client_for(&app);
    let session = Session::new(token_for("auth0|ada", "ada@example.com", "Ada"));

    assert_eq!(api.ping().await.unwrap(), "pong");

    let me = api.verify_user(&session).await.unwrap();
    assert_eq!(me.auth0_id, "auth0|ada");
    assert_eq!(api.user(&session, "auth0|ada").await.unwrap(), Some(me.clone()));
    assert_eq!(api.user(&session, "auth0|nobody").await.unwrap(), None);

    let renamed = api
        .update_user(
            &session,
            "auth0|ada",
            &UpdateUserRequest {
                name: Some("Countess".into()),
                email: Some("countess@example.com".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.id, me.id);
    assert_eq!(renamed.name.as_deref(), Some("Countess"));

    let review = api
        .create_review(
            &session,
            &CreateReviewRequest {
                movie_id: 42,
                text: "Great film".into(),
                stars: 5,
            },
        )
        .await
        .unwrap();
    let listed = api.movie_reviews(42).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Great film");
    assert_eq!(listed[0].user.email(), Some("countess@example.com"));

    let updated = api
        .update_review(
            &session,
            review.id,
            &UpdateReviewRequest {
                text: "Still great".into(),
                stars: 4,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.stars, 4);
    assert_eq!(api.user_reviews(&session, "auth0|ada").await.unwrap(), vec![updated.clone()]);
    assert_eq!(api.delete_review(&session, review.id).await.unwrap(), updated);

    let rec = api
        .create_recommendation(
            &session,
            &CreateRecommendationRequest {
                movie_id_parent: 42,
                movie_id_recommend: 603,
                comment: "Same mood".into(),
            },
        )
        .await
        .unwrap();
    let recs = api.movie_recommendations(42).await.unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].recommendation, rec);
    assert_eq!(recs[0].title, "Same mood");
    assert_eq!(recs[0].user, Author::Known { email: Some("countess@example.com".into()) });
    assert_eq!(api.user_recommendations(&session, "auth0|ada").await.unwrap(), vec![rec.clone()]);
    assert_eq!(api.delete_recommendation(&session, rec.id).await.unwrap(), rec);

    let item = api.add_to_watchlist(&session, 42).await.unwrap();
    assert_eq!(api.watchlist(&session).await.unwrap(), vec![item]);
    assert_eq!(api.remove_from_watchlist(&session, 42).await.unwrap(), 1);
    assert_eq!(api.remove_from_watchlist(&session, 42).await.unwrap(), 0);
}

#[tokio::test]
async fn client_surfaces_api_errors() {
    let app = TestApp::spawn().await;
    let api = client_for(&app);
    let session = Session::new(token_for("auth0|ada", "ada@example.com", "Ada"));
    api.verify_user(&session).await.unwrap();

    let err = api
        .create_review(
            &session,
            &CreateReviewRequest {
                movie_id: 42,
                text: "Too generous".into(),
                stars: 6,
            },
        )
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, "VALIDATION_ERROR");
        }
        other => panic!("expected API error, got {other:?}"),
    }

    let err = api
        .watchlist(&Session::new("not-a-jwt"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));

    let err = api.delete_review(&session, 9999).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, ref code, .. } if code == "NOT_FOUND"));
}
