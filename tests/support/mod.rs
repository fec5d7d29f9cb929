//! Fixtures shared by the router-level tests: RSA keys, tokens, a mock JWKS
//! endpoint and a fully layered app pointing at it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rsa::RsaPrivateKey;
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use resource_guard::app::{build_router, build_state};
use resource_guard::config::Config;
use resource_guard::state::AppState;

pub const DOMAIN: &str = "tenant.example.com";
pub const ISSUER: &str = "https://tenant.example.com/";
pub const AUDIENCE: &str = "https://chat.example.com/api";
pub const JWKS_PATH: &str = "/.well-known/jwks.json";

pub struct TestKey {
    encoding_key: EncodingKey,
    n: String,
    e: String,
}

pub static KEY_1: LazyLock<TestKey> = LazyLock::new(TestKey::generate);
pub static KEY_2: LazyLock<TestKey> = LazyLock::new(TestKey::generate);

impl TestKey {
    fn generate() -> Self {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("rsa keygen");
        let pem = private.to_pkcs1_pem(LineEnding::LF).expect("pem");
        Self {
            encoding_key: EncodingKey::from_rsa_pem(pem.as_bytes()).expect("encoding key"),
            n: URL_SAFE_NO_PAD.encode(private.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(private.e().to_bytes_be()),
        }
    }

    pub fn jwk(&self, kid: &str) -> Value {
        json!({"kty": "RSA", "kid": kid, "use": "sig", "alg": "RS256", "n": self.n, "e": self.e})
    }

    pub fn sign(&self, kid: &str, claims: &Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).expect("sign")
    }
}

pub fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

pub fn claims(scope: &str) -> Value {
    json!({
        "iss": ISSUER,
        "sub": "auth0|user-1",
        "aud": AUDIENCE,
        "exp": now() + 3600,
        "iat": now(),
        "scope": scope,
    })
}

pub fn key_set(keys: &[Value]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "keys": keys }))
}

pub async fn jwks_server(keys: &[Value]) -> MockServer {
    let server = MockServer::start().await;
    mount_key_set(&server, keys).await;
    server
}

pub async fn mount_key_set(server: &MockServer, keys: &[Value]) {
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(key_set(keys))
        .mount(server)
        .await;
}

pub fn config(server: &MockServer, overrides: &[(&'static str, &str)]) -> Config {
    let mut env: HashMap<&str, String> = HashMap::from([
        ("AUTH_DOMAIN", DOMAIN.to_string()),
        ("AUTH_AUDIENCE", AUDIENCE.to_string()),
        ("AUTH_JWKS_URL", format!("{}{}", server.uri(), JWKS_PATH)),
        ("OAUTH_CLIENT_ID", "client-123".to_string()),
        ("OAUTH_CLIENT_SECRET", "s3cr3t".to_string()),
    ]);
    for (key, value) in overrides {
        env.insert(*key, value.to_string());
    }
    Config::from_lookup(|key| env.get(key).cloned()).expect("test config")
}

pub fn state(config: &Config) -> AppState {
    build_state(config).expect("state")
}

pub fn app(config: &Config) -> Router {
    build_router(state(config), config)
}

pub fn request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("infallible")
}

pub async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}
