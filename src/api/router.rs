use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{
    availability, booking, booking_management, catalog, health, loyalty, settings, staff,
};
use crate::state::AppState;
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public browsing
        .route("/api/v1/availability", get(availability::get_availability))
        .route("/api/v1/services", get(catalog::list_services))
        .route("/api/v1/staff", get(staff::list_staff))

        // Public booking flow
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/manage/{token}", get(booking_management::get_booking_by_token))
        .route("/api/v1/bookings/manage/{token}/cancel", post(booking_management::cancel_booking))

        // Loyalty
        .route("/api/v1/loyalty/{email}", get(loyalty::get_balance))
        .route("/api/v1/loyalty/{email}/history", get(loyalty::get_history))
        .route("/api/v1/loyalty/{email}/redeem", post(loyalty::redeem_points))

        // Staff booking management
        .route("/api/v1/admin/bookings", get(booking::list_bookings))
        .route("/api/v1/admin/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/admin/bookings/{booking_id}/confirm", post(booking::confirm_booking))
        .route("/api/v1/admin/bookings/{booking_id}/complete", post(booking::complete_booking))
        .route("/api/v1/admin/bookings/{booking_id}/cancel", post(booking::cancel_booking))
        .route("/api/v1/admin/bookings/{booking_id}/status", put(booking::set_booking_status))

        // Catalog & staff administration
        .route("/api/v1/admin/services", get(catalog::list_all_services).post(catalog::create_service))
        .route("/api/v1/admin/services/{service_id}", put(catalog::update_service))
        .route("/api/v1/admin/staff", get(staff::list_all_staff).post(staff::create_staff))
        .route("/api/v1/admin/staff/{staff_id}", put(staff::update_staff))

        // Settings
        .route("/api/v1/admin/settings/hours", get(settings::get_business_hours).put(settings::update_business_hours))
        .route("/api/v1/admin/loyalty/program", get(settings::get_loyalty_program).put(settings::update_loyalty_program))
        .route("/api/v1/admin/loyalty/{email}/earn", post(loyalty::earn_points))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
