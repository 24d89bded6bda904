mod common;

use axum::http::StatusCode;
use common::{next_monday, next_sunday, parse_body, seed_booking, seed_service, seed_staff, TestApp};
use serde_json::json;

#[tokio::test]
async fn closed_day_has_empty_availability() {
    let app = TestApp::new().await;
    let sunday = next_sunday();

    let res = app
        .send(
            "GET",
            &format!("/api/v1/availability?start={}&end={}", sunday, sunday),
            None,
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert!(body[sunday.to_string()].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn open_day_serves_half_hour_slots() {
    let app = TestApp::new().await;
    let monday = next_monday();

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

    // 09:00 through 17:00 at 30-minute spacing.
    assert_eq!(slots.len(), 17);
    assert_eq!(slots[0], "09:00");
    assert_eq!(slots[1], "09:30");
    assert_eq!(slots[16], "17:00");
}

#[tokio::test]
async fn hour_booking_consumes_two_slots() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let service_id = seed_service(&app, "Cut & Finish", 60).await;
    seed_booking(&app, &service_id, None, monday, "10:00", "a@example.com").await;

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

    assert!(slots.contains(&json!("09:00")));
    assert!(slots.contains(&json!("09:30")));
    assert!(!slots.contains(&json!("10:00")));
    assert!(!slots.contains(&json!("10:30")));
    assert!(slots.contains(&json!("11:00")));
}

#[tokio::test]
async fn cancelled_booking_releases_its_slots() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let service_id = seed_service(&app, "Cut", 60).await;
    let (_, token) = seed_booking(&app, &service_id, None, monday, "10:00", "a@example.com").await;

    let res = app
        .send(
            "POST",
            &format!("/api/v1/bookings/manage/{}/cancel", token),
            None,
            None,
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
    assert!(slots.contains(&json!("10:00")));
}

#[tokio::test]
async fn service_duration_drops_short_gaps() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let service_id = seed_service(&app, "Colour", 60).await;
    seed_booking(&app, &service_id, None, monday, "10:00", "a@example.com").await;

    let res = app
        .send(
            "GET",
            &format!(
                "/api/v1/availability?start={}&end={}&service_id={}",
                monday, monday, service_id
            ),
            None,
            None,
        )
        .await;
    let body = parse_body(res).await;
    let slots = body[monday.to_string()].as_array().unwrap();

    // 09:30 is free but cannot fit 60 minutes before the 10:00 booking.
    assert!(slots.contains(&json!("09:00")));
    assert!(!slots.contains(&json!("09:30")));
    assert!(slots.contains(&json!("11:00")));
}

#[tokio::test]
async fn staff_filter_limits_to_their_hours() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let service_id = seed_service(&app, "Cut", 30).await;
    let staff_id = seed_staff(&app, "Robin", &[&service_id]).await;

    let res = app
        .send(
            "PUT",
            &format!("/api/v1/admin/staff/{}", staff_id),
            Some("admin"),
            Some(json!({
                "working_hours": {
                    "monday": { "start": "12:00", "end": "15:00", "is_working": true }
                }
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .send(
            "GET",
            &format!(
                "/api/v1/availability?start={}&end={}&staff_id={}",
                monday, monday, staff_id
            ),
            None,
            None,
        )
        .await;
    let body = parse_body(res).await;
    let slots = body[monday.to_string()].as_array().unwrap();

    assert_eq!(slots.first().unwrap(), "12:00");
    assert_eq!(slots.last().unwrap(), "14:30");
}

#[tokio::test]
async fn staff_bookings_do_not_block_other_staff() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let service_id = seed_service(&app, "Cut", 60).await;
    let robin = seed_staff(&app, "Robin", &[&service_id]).await;
    let sam = seed_staff(&app, "Sam", &[&service_id]).await;
    seed_booking(&app, &service_id, Some(&robin), monday, "10:00", "a@example.com").await;

    let res = app
        .send(
            "GET",
            &format!(
                "/api/v1/availability?start={}&end={}&staff_id={}",
                monday, monday, sam
            ),
            None,
            None,
        )
        .await;
    let body = parse_body(res).await;
    let slots = body[monday.to_string()].as_array().unwrap();
    assert!(slots.contains(&json!("10:00")));
}

#[tokio::test]
async fn unknown_staff_fails_safe_with_empty_days() {
    let app = TestApp::new().await;
    let monday = next_monday();

    let res = app
        .send(
            "GET",
            &format!(
                "/api/v1/availability?start={}&end={}&staff_id=no-such-stylist",
                monday, monday
            ),
            None,
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert!(body[monday.to_string()].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn inverted_range_yields_empty_mapping() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let earlier = monday.pred_opt().unwrap();

    let res = app
        .send(
            "GET",
            &format!("/api/v1/availability?start={}&end={}", monday, earlier),
            None,
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert!(body.as_object().unwrap().is_empty());
}

#[tokio::test]
async fn range_covers_multiple_days() {
    let app = TestApp::new().await;
    let monday = next_monday();
    let wednesday = monday + chrono::Duration::days(2);

    let res = app
        .send(
            "GET",
            &format!("/api/v1/availability?start={}&end={}", monday, wednesday),
            None,
            None,
        )
        .await;
    let body = parse_body(res).await;
    assert_eq!(body.as_object().unwrap().len(), 3);
}
