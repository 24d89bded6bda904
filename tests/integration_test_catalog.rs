mod common;

use axum::http::StatusCode;
use common::{next_monday, parse_body, seed_service, seed_staff, TestApp};
use serde_json::json;

#[tokio::test]
async fn admin_catalog_routes_reject_customers() {
    let app = TestApp::new().await;

    let res = app
        .send(
            "POST",
            "/api/v1/admin/services",
            None,
            Some(json!({ "name": "Cut", "duration_min": 30, "price_cents": 3000 })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.send("GET", "/api/v1/admin/services", None, None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_service_validates_fields() {
    let app = TestApp::new().await;

    let res = app
        .send(
            "POST",
            "/api/v1/admin/services",
            Some("staff"),
            Some(json!({ "name": "  ", "duration_min": 30, "price_cents": 3000 })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .send(
            "POST",
            "/api/v1/admin/services",
            Some("staff"),
            Some(json!({ "name": "Cut", "duration_min": 0, "price_cents": 3000 })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .send(
            "POST",
            "/api/v1/admin/services",
            Some("staff"),
            Some(json!({ "name": "Cut", "duration_min": 30, "price_cents": -5 })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deactivated_service_is_hidden_not_deleted() {
    let app = TestApp::new().await;
    let service_id = seed_service(&app, "Cut", 60).await;

    let res = app
        .send(
            "PUT",
            &format!("/api/v1/admin/services/{}", service_id),
            Some("staff"),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["is_active"], false);

    // Gone from the public listing.
    let res = app.send("GET", "/api/v1/services", None, None).await;
    assert!(parse_body(res).await.as_array().unwrap().is_empty());

    // Still visible to staff.
    let res = app
        .send("GET", "/api/v1/admin/services", Some("staff"), None)
        .await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn booking_a_deactivated_service_is_rejected() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let service_id = seed_service(&app, "Cut", 60).await;

    app.send(
        "PUT",
        &format!("/api/v1/admin/services/{}", service_id),
        Some("staff"),
        Some(json!({ "is_active": false })),
    )
    .await;

    let res = app
        .send(
            "POST",
            "/api/v1/bookings",
            None,
            Some(json!({
                "customer_name": "Dana",
                "customer_email": "dana@example.com",
                "service_id": service_id,
                "date": monday.to_string(),
                "time": "10:00"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn service_update_is_partial() {
    let app = TestApp::new().await;
    let service_id = seed_service(&app, "Cut", 60).await;

    let res = app
        .send(
            "PUT",
            &format!("/api/v1/admin/services/{}", service_id),
            Some("staff"),
            Some(json!({ "price_cents": 5500 })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["price_cents"], 5500);
    assert_eq!(body["name"], "Cut");
    assert_eq!(body["duration_min"], 60);
}

#[tokio::test]
async fn staff_creation_checks_service_ids() {
    let app = TestApp::new().await;

    let res = app
        .send(
            "POST",
            "/api/v1/admin/staff",
            Some("admin"),
            Some(json!({
                "name": "Robin",
                "service_ids": ["no-such-service"]
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn staff_cannot_be_booked_for_unassigned_service() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let cut = seed_service(&app, "Cut", 30).await;
    let colour = seed_service(&app, "Colour", 60).await;
    let staff_id = seed_staff(&app, "Robin", &[&cut]).await;

    let res = app
        .send(
            "POST",
            "/api/v1/bookings",
            None,
            Some(json!({
                "customer_name": "Dana",
                "customer_email": "dana@example.com",
                "service_id": colour,
                "staff_id": staff_id,
                "date": monday.to_string(),
                "time": "10:00"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn staff_contact_fields_clear_on_explicit_null() {
    let app = TestApp::new().await;
    let service_id = seed_service(&app, "Cut", 30).await;
    let staff_id = seed_staff(&app, "Robin", &[&service_id]).await;

    let res = app
        .send(
            "PUT",
            &format!("/api/v1/admin/staff/{}", staff_id),
            Some("admin"),
            Some(json!({ "email": "robin@example.com", "phone": "555-0100" })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["email"], "robin@example.com");
    assert_eq!(body["phone"], "555-0100");

    // Absent fields stay untouched.
    let res = app
        .send(
            "PUT",
            &format!("/api/v1/admin/staff/{}", staff_id),
            Some("admin"),
            Some(json!({ "title": "Senior Stylist" })),
        )
        .await;
    assert_eq!(parse_body(res).await["email"], "robin@example.com");

    // Explicit null clears.
    let res = app
        .send(
            "PUT",
            &format!("/api/v1/admin/staff/{}", staff_id),
            Some("admin"),
            Some(json!({ "email": null })),
        )
        .await;
    let body = parse_body(res).await;
    assert!(body["email"].is_null());
    assert_eq!(body["phone"], "555-0100");
}

#[tokio::test]
async fn deactivated_staff_hidden_from_public_list() {
    let app = TestApp::new().await;
    let service_id = seed_service(&app, "Cut", 30).await;
    let staff_id = seed_staff(&app, "Robin", &[&service_id]).await;

    let res = app
        .send(
            "PUT",
            &format!("/api/v1/admin/staff/{}", staff_id),
            Some("admin"),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.send("GET", "/api/v1/staff", None, None).await;
    assert!(parse_body(res).await.as_array().unwrap().is_empty());

    let res = app
        .send("GET", "/api/v1/admin/staff", Some("staff"), None)
        .await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn business_hours_update_reshapes_availability() {
    let app = TestApp::new().await;
    let monday = next_monday();

    let res = app
        .send("GET", "/api/v1/admin/settings/hours", Some("staff"), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let hours = parse_body(res).await;
    assert_eq!(hours["slot_interval_min"], 30);

    let res = app
        .send(
            "PUT",
            "/api/v1/admin/settings/hours",
            Some("staff"),
            Some(json!({
                "week": {
                    "monday": { "start": "10:00", "end": "12:00", "is_working": true }
                }
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .send(
            "GET",
            &format!("/api/v1/availability?start={}&end={}", monday, monday),
            None,
            None,
        )
        .await;
    let body = parse_body(res).await;
    let slots = body[monday.to_string()].as_array().unwrap();
    assert_eq!(slots.first().unwrap(), "10:00");
    assert_eq!(slots.last().unwrap(), "11:30");
}

#[tokio::test]
async fn loyalty_program_update_is_admin_only() {
    let app = TestApp::new().await;

    let res = app
        .send(
            "PUT",
            "/api/v1/admin/loyalty/program",
            Some("staff"),
            Some(json!({ "points_per_booking": 20 })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .send(
            "PUT",
            "/api/v1/admin/loyalty/program",
            Some("admin"),
            Some(json!({ "points_per_booking": 20 })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .send("GET", "/api/v1/admin/loyalty/program", Some("staff"), None)
        .await;
    assert_eq!(parse_body(res).await["points_per_booking"], 20);
}
