//! Chat use cases

use futures::future::try_join_all;
use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::auth::{AdminSession, IUserRepository, User, UserId};
use crate::domain::chat::{ChatMessage, ChatSession, ChatStore, message_body};
use crate::domain::errors::DomainError;

/// Customer messages received after the last admin reply
fn unread_count(messages: &[ChatMessage]) -> u32 {
    messages
        .iter()
        .rev()
        .take_while(|m| !m.is_admin())
        .count() as u32
}

fn session_for(customer: &User, messages: &[ChatMessage]) -> ChatSession {
    let last = messages.last();
    ChatSession {
        customer_id: customer.user_id,
        customer_name: customer.name.clone(),
        customer_email: customer.email.as_str().to_string(),
        last_message: last.map(|m| m.body.clone()),
        last_message_at: last.map(|m| m.created_at),
        unread_count: unread_count(messages),
    }
}

/// One conversation per customer with at least one booking
pub struct ListChatSessionsUseCase {
    user_repository: Arc<dyn IUserRepository>,
    chat_store: Arc<dyn ChatStore>,
}

impl ListChatSessionsUseCase {
    pub fn new(user_repository: Arc<dyn IUserRepository>, chat_store: Arc<dyn ChatStore>) -> Self {
        Self {
            user_repository,
            chat_store,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<ChatSession>, ApplicationError> {
        let customers = self.user_repository.customers_with_bookings().await?;

        let conversations = try_join_all(
            customers
                .iter()
                .map(|customer| self.chat_store.messages(&customer.user_id)),
        )
        .await?;

        Ok(customers
            .iter()
            .zip(conversations.iter())
            .map(|(customer, messages)| session_for(customer, messages))
            .collect())
    }
}

pub struct GetChatMessagesUseCase {
    user_repository: Arc<dyn IUserRepository>,
    chat_store: Arc<dyn ChatStore>,
}

impl GetChatMessagesUseCase {
    pub fn new(user_repository: Arc<dyn IUserRepository>, chat_store: Arc<dyn ChatStore>) -> Self {
        Self {
            user_repository,
            chat_store,
        }
    }

    pub async fn execute(&self, customer_id: UserId) -> Result<Vec<ChatMessage>, ApplicationError> {
        ensure_customer(self.user_repository.as_ref(), &customer_id).await?;
        Ok(self.chat_store.messages(&customer_id).await?)
    }
}

pub struct SendChatMessageUseCase {
    user_repository: Arc<dyn IUserRepository>,
    chat_store: Arc<dyn ChatStore>,
}

impl SendChatMessageUseCase {
    pub fn new(user_repository: Arc<dyn IUserRepository>, chat_store: Arc<dyn ChatStore>) -> Self {
        Self {
            user_repository,
            chat_store,
        }
    }

    #[tracing::instrument(skip(self, sender, text), fields(customer_id = %customer_id))]
    pub async fn execute(
        &self,
        customer_id: UserId,
        sender: &AdminSession,
        text: &str,
    ) -> Result<ChatMessage, ApplicationError> {
        let body = message_body(text)?;
        ensure_customer(self.user_repository.as_ref(), &customer_id).await?;
        Ok(self.chat_store.send(&customer_id, sender, body).await?)
    }
}

async fn ensure_customer(
    user_repository: &dyn IUserRepository,
    customer_id: &UserId,
) -> Result<(), ApplicationError> {
    match user_repository.find_by_id(customer_id).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::not_found("User", customer_id).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn message(customer_id: UserId, from_admin: bool, minutes_ago: i64) -> ChatMessage {
        ChatMessage {
            id: Uuid::new_v4(),
            customer_id,
            admin_id: from_admin.then(UserId::generate),
            body: "Is the installer coming tomorrow?".to_string(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_unread_counts_trailing_customer_messages() {
        let customer = UserId::generate();
        let messages = vec![
            message(customer, false, 30),
            message(customer, true, 20),
            message(customer, false, 10),
            message(customer, false, 5),
        ];
        assert_eq!(unread_count(&messages), 2);
        assert_eq!(unread_count(&messages[..2]), 0);
        assert_eq!(unread_count(&[]), 0);
    }
}
