//! Bookings and projects over the full router

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{TestApp, booking, project, service, user};
use kronium_core::domain::auth::UserRole;
use kronium_core::domain::bookings::BookingStatus;
use kronium_core::domain::projects::ProjectStatus;

#[tokio::test]
async fn test_booking_list_counts_ignore_filter() {
    let app = TestApp::new().await;
    let customer = user("Amina Otieno", "amina@example.com", UserRole::Customer, None);
    let drilling = service("Borehole Drilling", "Water", "90000");
    app.db.insert_user(customer.clone());
    app.db.insert_service(drilling.clone());
    app.db.insert_booking(booking(&customer, &drilling, BookingStatus::Pending, 1, None));
    app.db.insert_booking(booking(&customer, &drilling, BookingStatus::Pending, 2, None));
    app.db.insert_booking(booking(&customer, &drilling, BookingStatus::Completed, 3, Some(90000)));

    let response = app.get("/api/v1/bookings?status=pending").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["bookings"].as_array().unwrap().len(), 2);
    assert_eq!(response.body["counts"]["total"], 3);
    assert_eq!(response.body["counts"]["pending"], 2);
    assert_eq!(response.body["counts"]["completed"], 1);

    let first = &response.body["bookings"][0];
    assert_eq!(first["customer"]["name"], "Amina Otieno");
    assert_eq!(first["service"]["title"], "Borehole Drilling");
}

#[tokio::test]
async fn test_unknown_status_filter_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/bookings?status=paused").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"]["field"], "status");
}

#[tokio::test]
async fn test_booking_follows_lifecycle() {
    let app = TestApp::new().await;
    let customer = user("Amina Otieno", "amina@example.com", UserRole::Customer, None);
    let drilling = service("Borehole Drilling", "Water", "90000");
    let pending = booking(&customer, &drilling, BookingStatus::Pending, 1, None);
    let booking_id = pending.booking_id;
    app.db.insert_user(customer);
    app.db.insert_service(drilling);
    app.db.insert_booking(pending);

    let uri = format!("/api/v1/bookings/{}/status", booking_id.as_uuid());

    let confirmed = app
        .admin("PATCH", &uri, Some(json!({ "status": "confirmed" })))
        .await;
    assert_eq!(confirmed.status, StatusCode::OK);
    assert_eq!(confirmed.body["status"], "confirmed");

    let skipped = app
        .admin("PATCH", &uri, Some(json!({ "status": "completed" })))
        .await;
    assert_eq!(skipped.status, StatusCode::CONFLICT);
    assert_eq!(skipped.code(), "INVALID_TRANSITION");
    assert_eq!(
        app.db.booking_status(&booking_id),
        Some(BookingStatus::Confirmed)
    );

    let started = app
        .admin("PATCH", &uri, Some(json!({ "status": "inProgress" })))
        .await;
    assert_eq!(started.status, StatusCode::OK);
    assert_eq!(started.body["status"], "inProgress");
}

#[tokio::test]
async fn test_booking_status_must_be_known() {
    let app = TestApp::new().await;
    let customer = user("Amina Otieno", "amina@example.com", UserRole::Customer, None);
    let drilling = service("Borehole Drilling", "Water", "90000");
    let pending = booking(&customer, &drilling, BookingStatus::Pending, 1, None);
    let uri = format!("/api/v1/bookings/{}/status", pending.booking_id.as_uuid());
    app.db.insert_booking(pending);

    let response = app
        .admin("PATCH", &uri, Some(json!({ "status": "archived" })))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"]["field"], "status");
}

#[tokio::test]
async fn test_booking_without_customer_still_lists() {
    let app = TestApp::new().await;
    let ghost = user("Gone Customer", "gone@example.com", UserRole::Customer, None);
    let drilling = service("Borehole Drilling", "Water", "90000");
    app.db.insert_booking(booking(&ghost, &drilling, BookingStatus::Pending, 1, None));

    let response = app.get("/api/v1/bookings").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["bookings"][0]["customer"].is_null());
    assert!(response.body["bookings"][0]["service"].is_null());
}

#[tokio::test]
async fn test_unknown_booking_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .get(&format!("/api/v1/bookings/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_status_and_delete() {
    let app = TestApp::new().await;
    let owner = user("Brian Mwangi", "brian@example.com", UserRole::Customer, None);
    let borehole = project(&owner, "Farm Borehole", ProjectStatus::Pending);
    let id = borehole.project_id.as_uuid();
    app.db.insert_user(owner);
    app.db.insert_project(borehole);
    app.db.insert_project(project(
        &user("Other", "other@example.com", UserRole::Customer, None),
        "Office Solar",
        ProjectStatus::Active,
    ));

    let listed = app.get("/api/v1/projects?status=pending").await;
    assert_eq!(listed.body["projects"].as_array().unwrap().len(), 1);
    assert_eq!(listed.body["projects"][0]["owner"]["name"], "Brian Mwangi");
    assert_eq!(listed.body["counts"]["total"], 2);
    assert_eq!(listed.body["counts"]["active"], 1);

    let uri = format!("/api/v1/projects/{}/status", id);
    let held = app
        .admin("PATCH", &uri, Some(json!({ "status": "on-hold" })))
        .await;
    assert_eq!(held.status, StatusCode::OK);
    assert_eq!(held.body["status"], "on-hold");

    let again = app
        .admin("PATCH", &uri, Some(json!({ "status": "on-hold" })))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.code(), "CONFLICT");

    let deleted = app
        .admin("DELETE", &format!("/api/v1/projects/{}", id), None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app
        .admin("DELETE", &format!("/api/v1/projects/{}", id), None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_returns_temporary_password() {
    let app = TestApp::new().await;

    let response = app
        .admin(
            "POST",
            "/api/v1/users",
            Some(json!({
                "name": "New Technician",
                "email": "tech@kronium.test",
                "phone": "+254700000009",
                "role": "technician"
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["role"], "technician");
    assert!(!response.body["temporary_password"].as_str().unwrap().is_empty());

    let duplicate = app
        .admin(
            "POST",
            "/api/v1/users",
            Some(json!({
                "name": "Again",
                "email": "tech@kronium.test",
                "phone": "+254700000010"
            })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let filtered = app.get("/api/v1/users?role=technician").await;
    assert_eq!(filtered.body["total"], 1);
}
