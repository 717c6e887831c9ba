use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

use crate::config::AuthConfig;

/// Reasons a bearer token could not be verified.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("no signing key matches kid {0:?}")]
    UnknownKey(Option<String>),
    #[error("failed to fetch JWKS: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("unusable key material: {0}")]
    KeyMaterial(String),
}

/// Claims carried by an identity-provider access token.
///
/// Only `sub` and `exp` are typed; everything else (including `aud`, `iss`
/// and the namespaced profile claims) lands in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Look up a profile claim such as `email`, preferring the
    /// `<namespace>/<name>` form the provider uses for custom claims.
    pub fn profile_claim(&self, namespace: &str, name: &str) -> Option<String> {
        let namespaced = format!("{}/{}", namespace.trim_end_matches('/'), name);
        self.extra
            .get(&namespaced)
            .or_else(|| self.extra.get(name))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }
}

/// Source of the public keys that sign access tokens.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Return the decoding key for the token header's `kid`.
    async fn key(&self, kid: Option<&str>) -> Result<DecodingKey, AuthError>;
}

/// A single RSA public key from configuration. Ignores `kid`.
pub struct StaticKeySource {
    key: DecodingKey,
}

impl StaticKeySource {
    pub fn from_pem(pem: &[u8]) -> Result<Self, AuthError> {
        let key =
            DecodingKey::from_rsa_pem(pem).map_err(|e| AuthError::KeyMaterial(e.to_string()))?;
        Ok(Self { key })
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn key(&self, _kid: Option<&str>) -> Result<DecodingKey, AuthError> {
        Ok(self.key.clone())
    }
}

/// Minimum time between two JWKS fetches.
pub const JWKS_REFRESH_COOLDOWN: Duration = Duration::from_secs(30);

/// Keys published by the identity provider as a JWKS document.
///
/// Keys are cached by `kid`. A token signed with an unknown `kid` triggers a
/// refetch, which picks up provider key rotation. Refetches are serialized
/// and at most one happens per cooldown window; unknown kids inside the
/// window are rejected from the cache.
pub struct JwksKeySource {
    url: String,
    http: reqwest::Client,
    keys: RwLock<HashMap<String, DecodingKey>>,
    cooldown: Duration,
    /// Start of the last fetch attempt. Held while fetching.
    last_refresh: Mutex<Option<Instant>>,
}

impl JwksKeySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_cooldown(url, JWKS_REFRESH_COOLDOWN)
    }

    pub fn with_cooldown(url: impl Into<String>, cooldown: Duration) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
            keys: RwLock::new(HashMap::new()),
            cooldown,
            last_refresh: Mutex::new(None),
        }
    }

    async fn cached(&self, kid: Option<&str>) -> Option<DecodingKey> {
        let keys = self.keys.read().await;
        match kid {
            Some(kid) => keys.get(kid).cloned(),
            // Without a kid the token is only usable against a single-key set.
            None if keys.len() == 1 => keys.values().next().cloned(),
            None => None,
        }
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        let set: JwkSet = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut keys = HashMap::new();
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                tracing::debug!("Skipping JWK without kid");
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(e) => tracing::warn!(kid = %kid, "Skipping unusable JWK: {}", e),
            }
        }

        tracing::info!(url = %self.url, count = keys.len(), "Loaded signing keys");
        *self.keys.write().await = keys;
        Ok(())
    }
}

#[async_trait]
impl KeySource for JwksKeySource {
    async fn key(&self, kid: Option<&str>) -> Result<DecodingKey, AuthError> {
        if let Some(key) = self.cached(kid).await {
            return Ok(key);
        }

        let mut last_refresh = self.last_refresh.lock().await;
        // A concurrent caller may have refreshed while we waited for the lock.
        if let Some(key) = self.cached(kid).await {
            return Ok(key);
        }
        if last_refresh.is_some_and(|at| at.elapsed() < self.cooldown) {
            tracing::debug!(kid = ?kid, "Unknown kid within JWKS refresh cooldown");
            return Err(AuthError::UnknownKey(kid.map(str::to_owned)));
        }

        // Failed fetches count against the cooldown too.
        *last_refresh = Some(Instant::now());
        self.refresh().await?;
        drop(last_refresh);

        self.cached(kid)
            .await
            .ok_or_else(|| AuthError::UnknownKey(kid.map(str::to_owned)))
    }
}

/// Verifies RS256 access tokens against the configured audience and issuer.
pub struct TokenVerifier {
    keys: Arc<dyn KeySource>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: Arc<dyn KeySource>, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer]);
        validation.leeway = config.leeway_secs;
        Self { keys, validation }
    }

    /// Build a verifier from configuration: a static PEM key when one is
    /// configured, the provider's JWKS endpoint otherwise.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let keys: Arc<dyn KeySource> = match &config.public_key_pem {
            Some(pem) => Arc::new(StaticKeySource::from_pem(pem.as_bytes())?),
            None => Arc::new(JwksKeySource::new(config.jwks_url())),
        };
        Ok(Self::new(keys, config))
    }

    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;
        let key = self.keys.key(header.kid.as_deref()).await?;
        let data = decode::<Claims>(token, &key, &self.validation)?;
        Ok(data.claims)
    }
}
