//! Test data factories

use chrono::{DateTime, TimeZone, Utc};
use kronium_core::domain::analytics::{BookingRecord, ServiceSnapshot};
use kronium_core::domain::auth::{
    AdminSession, Email, PasswordHash, User, UserForm, UserId, UserRole,
};
use kronium_core::domain::bookings::{BookingId, BookingStatus};
use kronium_core::domain::catalog::ServiceId;
use rust_decimal::Decimal;

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
}

pub fn record(
    created_at: DateTime<Utc>,
    service_id: ServiceId,
    category: &str,
    amount: Option<i64>,
    price: i64,
) -> BookingRecord {
    BookingRecord {
        booking_id: BookingId::generate(),
        service_id,
        customer_id: UserId::generate(),
        created_at,
        amount: amount.map(Decimal::from),
        status: BookingStatus::Completed,
        service: Some(ServiceSnapshot {
            title: format!("{} service", category),
            price: Decimal::from(price),
            category: Some(category.to_string()),
        }),
    }
}

pub fn user(email: &str, role: UserRole, password_hash: Option<PasswordHash>) -> User {
    let profile = UserForm {
        name: "Amina Njoroge".to_string(),
        email: email.to_string(),
        phone: "+254700000000".to_string(),
        address: None,
        role: Some(role.as_str().to_string()),
        is_active: Some(true),
    }
    .validate()
    .unwrap();

    let mut user = User::new(profile, PasswordHash::new(String::new()));
    user.password_hash = password_hash;
    user
}

pub fn admin_session() -> AdminSession {
    AdminSession::open(
        UserId::generate(),
        Email::new("admin@kronium.test".to_string()).unwrap(),
        UserRole::Admin,
    )
    .unwrap()
}
