//! Typed async client for the Marquee REST API.
//!
//! Authenticated calls take an explicit [`Session`]; the client itself holds
//! no identity.

mod error;

pub use error::ClientError;

use common::ErrorBody;
use common::recommendation::{
    CreateRecommendationRequest, MovieRecommendation, RecommendationResponse,
};
use common::review::{CreateReviewRequest, MovieReview, ReviewResponse, UpdateReviewRequest};
use common::user::{UpdateUserRequest, UserResponse};
use common::watchlist::{AddWatchlistItemRequest, DeleteCountResponse, WatchlistItemResponse};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
}

/// Bearer token of a signed-in user.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

#[derive(Debug, Clone)]
pub struct MarqueeClient {
    http: reqwest::Client,
    base: Url,
}

impl MarqueeClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(config.base_url));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Base URL joined with `segments`, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authed(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.bearer_auth(session.token())
    }

    pub async fn ping(&self) -> Result<String, ClientError> {
        let res = self.http.get(self.endpoint(&["ping"])).send().await?;
        Ok(check(res).await?.text().await?)
    }

    /// Resolve (creating on first login) the session's local user.
    pub async fn verify_user(&self, session: &Session) -> Result<UserResponse, ClientError> {
        let req = self.http.post(self.endpoint(&["verify-user"]));
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn user(
        &self,
        session: &Session,
        subject_id: &str,
    ) -> Result<Option<UserResponse>, ClientError> {
        let req = self.http.get(self.endpoint(&["users", subject_id]));
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn update_user(
        &self,
        session: &Session,
        subject_id: &str,
        update: &UpdateUserRequest,
    ) -> Result<UserResponse, ClientError> {
        let req = self.http.put(self.endpoint(&["users", subject_id])).json(update);
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn movie_reviews(&self, movie_id: i32) -> Result<Vec<MovieReview>, ClientError> {
        let id = movie_id.to_string();
        let res = self.http.get(self.endpoint(&["reviews", &id])).send().await?;
        decode(res).await
    }

    pub async fn create_review(
        &self,
        session: &Session,
        review: &CreateReviewRequest,
    ) -> Result<ReviewResponse, ClientError> {
        let req = self.http.post(self.endpoint(&["reviews"])).json(review);
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn user_reviews(
        &self,
        session: &Session,
        subject_id: &str,
    ) -> Result<Vec<ReviewResponse>, ClientError> {
        let req = self.http.get(self.endpoint(&["user", "reviews", subject_id]));
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn update_review(
        &self,
        session: &Session,
        review_id: i32,
        update: &UpdateReviewRequest,
    ) -> Result<ReviewResponse, ClientError> {
        let id = review_id.to_string();
        let req = self.http.put(self.endpoint(&["reviews", &id])).json(update);
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn delete_review(
        &self,
        session: &Session,
        review_id: i32,
    ) -> Result<ReviewResponse, ClientError> {
        let id = review_id.to_string();
        let req = self.http.delete(self.endpoint(&["reviews", &id]));
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn movie_recommendations(
        &self,
        movie_id: i32,
    ) -> Result<Vec<MovieRecommendation>, ClientError> {
        let id = movie_id.to_string();
        let res = self
            .http
            .get(self.endpoint(&["recommendations", &id]))
            .send()
            .await?;
        decode(res).await
    }

    pub async fn create_recommendation(
        &self,
        session: &Session,
        recommendation: &CreateRecommendationRequest,
    ) -> Result<RecommendationResponse, ClientError> {
        let req = self
            .http
            .post(self.endpoint(&["recommendations"]))
            .json(recommendation);
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn user_recommendations(
        &self,
        session: &Session,
        subject_id: &str,
    ) -> Result<Vec<RecommendationResponse>, ClientError> {
        let req = self
            .http
            .get(self.endpoint(&["user", "recommendations", subject_id]));
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn delete_recommendation(
        &self,
        session: &Session,
        recommendation_id: i32,
    ) -> Result<RecommendationResponse, ClientError> {
        let id = recommendation_id.to_string();
        let req = self.http.delete(self.endpoint(&["recommendations", &id]));
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn watchlist(
        &self,
        session: &Session,
    ) -> Result<Vec<WatchlistItemResponse>, ClientError> {
        let req = self.http.get(self.endpoint(&["watchlist"]));
        decode(self.authed(req, session).send().await?).await
    }

    pub async fn add_to_watchlist(
        &self,
        session: &Session,
        movie_id: i32,
    ) -> Result<WatchlistItemResponse, ClientError> {
        let req = self
            .http
            .post(self.endpoint(&["watchlist"]))
            .json(&AddWatchlistItemRequest { movie_id });
        decode(self.authed(req, session).send().await?).await
    }

    /// Returns how many items were removed; 0 when the movie was not listed.
    pub async fn remove_from_watchlist(
        &self,
        session: &Session,
        movie_id: i32,
    ) -> Result<u64, ClientError> {
        let id = movie_id.to_string();
        let req = self.http.delete(self.endpoint(&["watchlist", &id]));
        let removed: DeleteCountResponse = decode(self.authed(req, session).send().await?).await?;
        Ok(removed.count)
    }
}

async fn check(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let text = res.text().await?;
    debug!(status = status.as_u16(), body = %text, "API request failed");
    Err(api_error(status.as_u16(), text))
}

/// Error for a non-2xx answer, keeping the raw body when it is not an
/// error document.
fn api_error(status: u16, text: String) -> ClientError {
    let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => (body.code, body.message),
        Err(_) => (String::new(), text),
    };
    ClientError::Api {
        status,
        code,
        message,
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    Ok(check(res).await?.json().await?)
}
