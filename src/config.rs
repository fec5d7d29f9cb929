/*
 * Responsibility
 * - Load settings from the environment (.env via dotenvy): listen port, CORS, identity provider, OAuth client
 * - Validate them and fail startup on missing or unparsable values
 * - Derive issuer / JWKS URL from the provider domain
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_value(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Identity-provider settings for bearer-token validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub jwks_url: Url,
    pub algorithm: Algorithm,
    pub leeway_seconds: u64,

    // `None` disables key-set caching.
    pub jwks_cache_ttl: Option<Duration>,
    pub jwks_min_refresh: Duration,
    pub jwks_fetch_timeout: Duration,
}

/// OAuth client registration used by the browser login collaborator.
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth: AuthConfig,
    pub oauth: OAuthClientConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let seconds = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
                None => Ok(default),
            }
        };

        let port: u16 = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_value(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let domain = required("AUTH_DOMAIN")?;
        let base = provider_base_url(&domain).ok_or(ConfigError::Invalid("AUTH_DOMAIN"))?;

        let audience = required("AUTH_AUDIENCE")?;

        let issuer = lookup("AUTH_ISSUER")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| base.to_string());

        let jwks_url = match lookup("AUTH_JWKS_URL") {
            Some(v) => Url::parse(v.trim()).map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?,
            None => base
                .join(".well-known/jwks.json")
                .map_err(|_| ConfigError::Invalid("AUTH_DOMAIN"))?,
        };

        let algorithm = match lookup("AUTH_ALGORITHM") {
            Some(v) => parse_algorithm(&v).ok_or(ConfigError::Invalid("AUTH_ALGORITHM"))?,
            None => Algorithm::RS256,
        };

        let leeway_seconds = seconds("ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        let jwks_cache_ttl = match seconds("JWKS_CACHE_TTL_SECONDS", 300)? {
            0 => None,
            s => Some(Duration::from_secs(s)),
        };
        let jwks_min_refresh = Duration::from_secs(seconds("JWKS_MIN_REFRESH_SECONDS", 10)?);
        let jwks_fetch_timeout = match seconds("JWKS_FETCH_TIMEOUT_SECONDS", 5)? {
            0 => return Err(ConfigError::Invalid("JWKS_FETCH_TIMEOUT_SECONDS")),
            s => Duration::from_secs(s),
        };

        let oauth = OAuthClientConfig {
            client_id: required("OAUTH_CLIENT_ID")?,
            client_secret: required("OAUTH_CLIENT_SECRET")?,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            auth: AuthConfig {
                issuer,
                audience,
                jwks_url,
                algorithm,
                leeway_seconds,
                jwks_cache_ttl,
                jwks_min_refresh,
                jwks_fetch_timeout,
            },
            oauth,
        })
    }
}

// `tenant.auth0.com`, `https://tenant.auth0.com` and `https://tenant.auth0.com/`
// all become `https://tenant.auth0.com/`.
fn provider_base_url(domain: &str) -> Option<Url> {
    let domain = domain.trim().trim_end_matches('/');
    let with_scheme = if domain.contains("://") {
        format!("{domain}/")
    } else {
        format!("https://{domain}/")
    };

    let url = Url::parse(&with_scheme).ok()?;
    (url.host_str().is_some() && url.path() == "/").then_some(url)
}

// Only asymmetric RSA signatures are accepted from the provider.
fn parse_algorithm(value: &str) -> Option<Algorithm> {
    match Algorithm::from_str(value.trim().to_ascii_uppercase().as_str()).ok()? {
        alg @ (Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512) => Some(alg),
        _ => None,
    }
}
