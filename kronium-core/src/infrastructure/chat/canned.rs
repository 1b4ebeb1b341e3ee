//! In-process chat store seeded with canned conversations
//!
//! Every conversation starts from the same three-message exchange, anchored
//! to the moment it is first opened. Admin replies are appended in memory and
//! published on a broadcast channel; nothing survives a restart.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;
use uuid::Uuid;

use crate::domain::auth::{AdminSession, UserId};
use crate::domain::chat::{ChatMessage, ChatStore};
use crate::domain::errors::DomainError;

const FEED_CAPACITY: usize = 256;

/// Sender id attached to the canned admin reply
const CANNED_ADMIN: UserId = UserId(Uuid::nil());

fn canned_conversation(customer_id: UserId, now: DateTime<Utc>) -> Vec<ChatMessage> {
    let message = |admin_id: Option<UserId>, body: &str, minutes_ago: i64| ChatMessage {
        id: Uuid::new_v4(),
        customer_id,
        admin_id,
        body: body.to_string(),
        created_at: now - Duration::minutes(minutes_ago),
    };

    vec![
        message(None, "Hello, I have a question about my booking.", 60),
        message(
            Some(CANNED_ADMIN),
            "Hi! I'd be happy to help you with your booking. What can I assist you with?",
            50,
        ),
        message(None, "I need to reschedule my appointment for next week.", 30),
    ]
}

pub struct CannedChatStore {
    conversations: RwLock<HashMap<UserId, Vec<ChatMessage>>>,
    feed: broadcast::Sender<ChatMessage>,
}

impl CannedChatStore {
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            conversations: RwLock::new(HashMap::new()),
            feed,
        }
    }
}

impl Default for CannedChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStore for CannedChatStore {
    async fn messages(&self, customer_id: &UserId) -> Result<Vec<ChatMessage>, DomainError> {
        if let Some(messages) = self.conversations.read().await.get(customer_id) {
            return Ok(messages.clone());
        }

        let mut conversations = self.conversations.write().await;
        Ok(conversations
            .entry(*customer_id)
            .or_insert_with(|| canned_conversation(*customer_id, Utc::now()))
            .clone())
    }

    async fn send(
        &self,
        customer_id: &UserId,
        sender: &AdminSession,
        body: String,
    ) -> Result<ChatMessage, DomainError> {
        let now = Utc::now();
        let message = ChatMessage {
            id: Uuid::new_v4(),
            customer_id: *customer_id,
            admin_id: Some(sender.user_id),
            body,
            created_at: now,
        };

        self.conversations
            .write()
            .await
            .entry(*customer_id)
            .or_insert_with(|| canned_conversation(*customer_id, now))
            .push(message.clone());

        // No subscribers is not an error
        let receivers = self.feed.send(message.clone()).unwrap_or(0);
        debug!(customer_id = %customer_id, receivers, "Chat message sent");

        Ok(message)
    }

    fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::{Email, UserRole};

    fn admin() -> AdminSession {
        AdminSession::open(
            UserId::generate(),
            Email::new("ops@kronium.test".to_string()).unwrap(),
            UserRole::Admin,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_new_conversation_is_canned_and_stable() {
        let store = CannedChatStore::new();
        let customer = UserId::generate();

        let first = store.messages(&customer).await.unwrap();
        assert_eq!(first.len(), 3);
        assert!(!first[0].is_admin());
        assert!(first[1].is_admin());
        assert!(first.windows(2).all(|w| w[0].created_at < w[1].created_at));

        let again = store.messages(&customer).await.unwrap();
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn test_send_appends_and_broadcasts() {
        let store = CannedChatStore::new();
        let customer = UserId::generate();
        let admin = admin();
        let mut feed = store.subscribe();

        let sent = store
            .send(&customer, &admin, "Rescheduled to Tuesday".to_string())
            .await
            .unwrap();

        assert_eq!(sent.admin_id, Some(admin.user_id));
        assert_eq!(feed.recv().await.unwrap(), sent);

        let messages = store.messages(&customer).await.unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages.last(), Some(&sent));
    }

    #[tokio::test]
    async fn test_conversations_are_per_customer() {
        let store = CannedChatStore::new();
        let a = UserId::generate();
        let b = UserId::generate();

        store.send(&a, &admin(), "hi".to_string()).await.unwrap();
        assert_eq!(store.messages(&a).await.unwrap().len(), 4);
        assert_eq!(store.messages(&b).await.unwrap().len(), 3);
    }
}
