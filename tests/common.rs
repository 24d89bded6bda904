use salon_backend::{
    api::router::create_router,
    config::Config,
    domain::models::loyalty::{CustomerLoyalty, LoyaltyEntry},
    domain::ports::{LoyaltyRepository, NotificationService},
    error::AppError,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo, sqlite_loyalty_repo::SqliteLoyaltyRepo,
        sqlite_service_repo::SqliteServiceRepo, sqlite_settings_repo::SqliteSettingsRepo,
        sqlite_staff_repo::SqliteStaffRepo,
    },
    state::AppState,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockNotificationService {
    pub fail: Arc<AtomicBool>,
    pub sent: Arc<AtomicUsize>,
}

#[async_trait]
impl NotificationService for MockNotificationService {
    async fn send(&self, _recipient: &str, _subject: &str, _body: &str) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::InternalWithMsg("mock notifier down".into()));
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Delegates to the real SQLite ledger but can be made to fail earns, to
/// exercise the degraded paths around loyalty accrual.
pub struct FlakyLoyaltyRepo {
    inner: SqliteLoyaltyRepo,
    pub fail_earn: Arc<AtomicBool>,
}

#[async_trait]
impl LoyaltyRepository for FlakyLoyaltyRepo {
    async fn find(&self, email: &str) -> Result<Option<CustomerLoyalty>, AppError> {
        self.inner.find(email).await
    }

    async fn history(&self, email: &str) -> Result<Vec<LoyaltyEntry>, AppError> {
        self.inner.history(email).await
    }

    async fn earn(&self, entry: &LoyaltyEntry) -> Result<CustomerLoyalty, AppError> {
        if self.fail_earn.load(Ordering::SeqCst) {
            return Err(AppError::InternalWithMsg("ledger unavailable".into()));
        }
        self.inner.earn(entry).await
    }

    async fn redeem(&self, entry: &LoyaltyEntry) -> Result<CustomerLoyalty, AppError> {
        self.inner.redeem(entry).await
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub notify_fail: Arc<AtomicBool>,
    pub notify_sent: Arc<AtomicUsize>,
    pub loyalty_fail: Arc<AtomicBool>,
}

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

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            notify_service_url: "http://localhost".to_string(),
            notify_service_token: "token".to_string(),
        };

        let notify_fail = Arc::new(AtomicBool::new(false));
        let notify_sent = Arc::new(AtomicUsize::new(0));
        let notifier = Arc::new(MockNotificationService {
            fail: notify_fail.clone(),
            sent: notify_sent.clone(),
        });

        let loyalty_fail = Arc::new(AtomicBool::new(false));
        let loyalty_repo = Arc::new(FlakyLoyaltyRepo {
            inner: SqliteLoyaltyRepo::new(pool.clone()),
            fail_earn: loyalty_fail.clone(),
        });

        let state = Arc::new(AppState {
            config,
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            service_repo: Arc::new(SqliteServiceRepo::new(pool.clone())),
            staff_repo: Arc::new(SqliteStaffRepo::new(pool.clone())),
            loyalty_repo,
            settings_repo: Arc::new(SqliteSettingsRepo::new(pool.clone())),
            notifier,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            notify_fail,
            notify_sent,
            loyalty_fail,
        }
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        role: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            builder = builder.header("x-staff-role", role);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// First Monday at least a week out; the default calendar is open Mondays.
#[allow(dead_code)]
pub fn next_monday() -> NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday() != Weekday::Mon {
        date += Duration::days(1);
    }
    date
}

/// First Sunday at least a week out; closed in the default calendar.
#[allow(dead_code)]
pub fn next_sunday() -> NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday() != Weekday::Sun {
        date += Duration::days(1);
    }
    date
}

/// Creates a 60-minute service through the admin API and returns its id.
#[allow(dead_code)]
pub async fn seed_service(app: &TestApp, name: &str, duration_min: i64) -> String {
    let response = app
        .send(
            "POST",
            "/api/v1/admin/services",
            Some("admin"),
            Some(serde_json::json!({
                "name": name,
                "description": "Test service",
                "duration_min": duration_min,
                "price_cents": 4500,
                "category": "hair"
            })),
        )
        .await;
    assert!(response.status().is_success(), "seed_service failed");
    parse_body(response).await["id"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub async fn seed_staff(app: &TestApp, name: &str, service_ids: &[&str]) -> String {
    let response = app
        .send(
            "POST",
            "/api/v1/admin/staff",
            Some("admin"),
            Some(serde_json::json!({
                "name": name,
                "title": "Stylist",
                "service_ids": service_ids,
            })),
        )
        .await;
    assert!(response.status().is_success(), "seed_staff failed");
    parse_body(response).await["id"].as_str().unwrap().to_string()
}

/// Books `service_id` at the given slot and returns (booking_id, token).
#[allow(dead_code)]
pub async fn seed_booking(
    app: &TestApp,
    service_id: &str,
    staff_id: Option<&str>,
    date: NaiveDate,
    time: &str,
    email: &str,
) -> (String, String) {
    let response = app
        .send(
            "POST",
            "/api/v1/bookings",
            None,
            Some(serde_json::json!({
                "customer_name": "Test Customer",
                "customer_email": email,
                "service_id": service_id,
                "staff_id": staff_id,
                "date": date.to_string(),
                "time": time,
            })),
        )
        .await;
    assert!(response.status().is_success(), "seed_booking failed");
    let body = parse_body(response).await;
    (
        body["id"].as_str().unwrap().to_string(),
        body["management_token"].as_str().unwrap().to_string(),
    )
}
