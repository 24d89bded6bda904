use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::infra::notify::http_notification_service::HttpNotificationService;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_loyalty_repo::SqliteLoyaltyRepo,
    sqlite_service_repo::SqliteServiceRepo, sqlite_settings_repo::SqliteSettingsRepo,
    sqlite_staff_repo::SqliteStaffRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let notifier = Arc::new(HttpNotificationService::new(
        config.notify_service_url.clone(),
        config.notify_service_token.clone(),
    ));

    AppState {
        config: config.clone(),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
        service_repo: Arc::new(SqliteServiceRepo::new(pool.clone())),
        staff_repo: Arc::new(SqliteStaffRepo::new(pool.clone())),
        loyalty_repo: Arc::new(SqliteLoyaltyRepo::new(pool.clone())),
        settings_repo: Arc::new(SqliteSettingsRepo::new(pool.clone())),
        notifier,
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run migrations");
}
