use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

fn default_cors_max_age() -> u64 {
    3600
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Bearer token validation against the external identity provider.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Expected `aud` claim. Also the namespace of the email/name claims.
    pub audience: String,
    /// Expected `iss` claim, the provider's issuer base URL.
    pub issuer: String,
    /// JWKS endpoint. Defaults to `<issuer>/.well-known/jwks.json`.
    #[serde(default)]
    pub jwks_url: Option<String>,
    /// RSA public key (PEM). When set, the JWKS endpoint is never contacted.
    #[serde(default)]
    pub public_key_pem: Option<String>,
    /// Allowed clock skew for `exp`/`nbf`, in seconds.
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

fn default_leeway_secs() -> u64 {
    60
}

impl AuthConfig {
    pub fn jwks_url(&self) -> String {
        match &self.jwks_url {
            Some(url) => url.clone(),
            None => format!(
                "{}/.well-known/jwks.json",
                self.issuer.trim_end_matches('/')
            ),
        }
    }
}

/// Behavior switches for the resource handlers.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiConfig {
    /// Fail a whole list response when any record's author has no user row,
    /// instead of reporting that author as unknown. This all-or-nothing
    /// failure is how the listing endpoints originally behaved.
    #[serde(default)]
    pub strict_authors: bool,
    /// Only let authors update or delete their reviews and recommendations,
    /// and only let users edit their own profile.
    #[serde(default)]
    pub enforce_ownership: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., MARQUEE__AUTH__AUDIENCE)
            .add_source(
                Environment::with_prefix("MARQUEE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins"),
            )
            .build()?;

        s.try_deserialize()
    }
}
