//! Message store boundary

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::models::ChatMessage;
use crate::domain::auth::{AdminSession, UserId};
use crate::domain::errors::DomainError;

/// Storage and live feed for chat messages.
///
/// Callers depend only on this trait so a persistent, push-capable store
/// can replace the canned one without touching them.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Conversation with `customer_id`, oldest first
    async fn messages(&self, customer_id: &UserId) -> Result<Vec<ChatMessage>, DomainError>;

    /// Append an admin reply to a conversation
    async fn send(
        &self,
        customer_id: &UserId,
        sender: &AdminSession,
        body: String,
    ) -> Result<ChatMessage, DomainError>;

    /// Live feed of messages accepted by [`ChatStore::send`]
    fn subscribe(&self) -> broadcast::Receiver<ChatMessage>;
}
