use reservation_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::sqlite_repositories,
    domain::models::{
        auth::Identity,
        payment_method::{PaymentMethod, PaymentMethodType},
        venue::{NewVenueParams, Venue},
    },
    domain::ports::IdentityProvider,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_EMAIL: &str = "manager@hotel.test";

/// Accepts tokens of the form `uid|email|display name`.
pub struct MockIdentityProvider;

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn verify(&self, id_token: &str) -> Result<Identity, AppError> {
        let mut parts = id_token.splitn(3, '|');
        let uid = parts.next().filter(|s| !s.is_empty()).ok_or(AppError::Unauthorized)?;
        let email = parts.next().filter(|s| !s.is_empty()).ok_or(AppError::Unauthorized)?;
        Ok(Identity {
            uid: uid.to_string(),
            email: email.to_string(),
            display_name: parts.next().map(str::to_string),
        })
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            session_signing_key: priv_key_pem.to_string(),
            session_verify_key: pub_key_pem.to_string(),
            session_issuer: "test-issuer".to_string(),
            session_ttl_minutes: 60,
            idp_public_key: pub_key_pem.to_string(),
            idp_issuer: "test-idp".to_string(),
            idp_audience: "test-app".to_string(),
            admin_emails: vec![ADMIN_EMAIL.to_string()],
            request_timeout: Duration::from_secs(30),
            db_acquire_timeout: Duration::from_secs(5),
        };

        let state = Arc::new(
            AppState::assemble(config, sqlite_repositories(pool.clone()), Arc::new(MockIdentityProvider))
                .expect("Failed to assemble state"),
        );

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn login(&self, uid: &str, email: &str) -> AuthHeaders {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/session")
                .header(header::AUTHORIZATION, format!("Bearer {}|{}|Test User", uid, email))
                .body(Body::empty())
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    pub async fn login_admin(&self) -> AuthHeaders {
        self.login("admin-uid", ADMIN_EMAIL).await
    }

    /// Sends a request and returns the status with the parsed JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn send(&self, method: &str, uri: &str, auth: Option<&AuthHeaders>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, json)
    }

    pub async fn seed_venue(&self, name: &str, capacity: i32, price: i64) -> Venue {
        let venue = Venue::new(NewVenueParams {
            name: name.to_string(),
            category: "ballroom".to_string(),
            capacity,
            price,
            description: String::new(),
            amenities: vec!["projector".to_string()],
            images: vec![],
            is_available: true,
        });
        self.state.venue_repo.create(&venue).await.unwrap()
    }

    pub async fn seed_payment_method(&self, name: &str, active: bool) -> PaymentMethod {
        let mut method = PaymentMethod::new(
            name.to_string(),
            PaymentMethodType::Bank,
            "1234567890".to_string(),
            "Hotel Reservations".to_string(),
            None,
        );
        method.is_active = active;
        self.state.payment_method_repo.create(&method).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
