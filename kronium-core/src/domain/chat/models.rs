//! Chat models

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::UserId;
use crate::domain::errors::DomainError;

/// Upper bound on a single message body, in characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// One message in a customer conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    /// Customer whose conversation this message belongs to
    pub customer_id: UserId,
    /// Admin who wrote the message; `None` for customer messages
    pub admin_id: Option<UserId>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn is_admin(&self) -> bool {
        self.admin_id.is_some()
    }
}

/// A conversation with one customer
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub customer_id: UserId,
    pub customer_name: String,
    pub customer_email: String,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: u32,
}

/// Validate an outgoing message body
pub fn message_body(raw: &str) -> Result<String, DomainError> {
    let body = raw.trim();
    if body.is_empty() {
        return Err(DomainError::validation("message", "message cannot be empty"));
    }
    if body.chars().count() > MAX_MESSAGE_CHARS {
        return Err(DomainError::validation(
            "message",
            format!("message exceeds {} characters", MAX_MESSAGE_CHARS),
        ));
    }
    Ok(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_body_validation() {
        assert_eq!(message_body("  hello ").unwrap(), "hello");
        assert_eq!(message_body(" \n ").unwrap_err().field(), Some("message"));
        assert!(message_body(&"x".repeat(MAX_MESSAGE_CHARS + 1)).is_err());
    }
}
