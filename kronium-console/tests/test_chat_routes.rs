//! Customer support chat over the full router

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use common::{TestApp, booking, service, user};
use kronium_core::domain::auth::{User, UserRole};
use kronium_core::domain::bookings::BookingStatus;

/// One customer with a booking and one without
async fn seeded() -> (TestApp, User) {
    let app = TestApp::new().await;
    let amina = user("Amina Otieno", "amina@example.com", UserRole::Customer, None);
    let idle = user("Idle Visitor", "idle@example.com", UserRole::Customer, None);
    let drilling = service("Borehole Drilling", "Water", "90000");
    app.db.insert_user(amina.clone());
    app.db.insert_user(idle);
    app.db.insert_service(drilling.clone());
    app.db.insert_booking(booking(&amina, &drilling, BookingStatus::Pending, 1, None));
    (app, amina)
}

#[tokio::test]
async fn test_sessions_list_customers_with_bookings() {
    let (app, amina) = seeded().await;

    let response = app.get("/api/v1/chat/sessions").await;
    assert_eq!(response.status, StatusCode::OK);

    let sessions = response.body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["customer_id"], amina.user_id.as_uuid().to_string());
    assert_eq!(sessions[0]["customer_name"], "Amina Otieno");
    assert_eq!(sessions[0]["unread_count"], 1);
    assert!(sessions[0]["last_message"].as_str().is_some());
}

#[tokio::test]
async fn test_reply_is_appended_and_clears_unread() {
    let (app, amina) = seeded().await;
    let uri = format!(
        "/api/v1/chat/sessions/{}/messages",
        amina.user_id.as_uuid()
    );

    let before = app.get(&uri).await;
    assert_eq!(before.status, StatusCode::OK);
    let messages = before.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    let stamps: Vec<DateTime<Utc>> = messages
        .iter()
        .map(|m| m["created_at"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));

    let sent = app
        .admin("POST", &uri, Some(json!({ "message": "  We will call you tomorrow.  " })))
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);
    assert_eq!(sent.body["from_admin"], true);
    assert_eq!(sent.body["body"], "We will call you tomorrow.");

    let after = app.get(&uri).await;
    let messages = after.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[3]["body"], "We will call you tomorrow.");

    let sessions = app.get("/api/v1/chat/sessions").await;
    assert_eq!(sessions.body["sessions"][0]["unread_count"], 0);
    assert_eq!(
        sessions.body["sessions"][0]["last_message"],
        "We will call you tomorrow."
    );
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let (app, amina) = seeded().await;
    let uri = format!(
        "/api/v1/chat/sessions/{}/messages",
        amina.user_id.as_uuid()
    );

    let response = app.admin("POST", &uri, Some(json!({ "message": "   " }))).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"]["field"], "message");

    let messages = app.get(&uri).await;
    assert_eq!(messages.body["messages"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_customer_is_not_found() {
    let (app, _) = seeded().await;
    let uri = format!("/api/v1/chat/sessions/{}/messages", Uuid::new_v4());

    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
    let response = app.admin("POST", &uri, Some(json!({ "message": "hello" }))).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
