use crate::database_provider::{DbError, DbProvider};
use crate::entities::NewNotification;
use async_trait::async_trait;
use std::sync::Arc;

/// Best-effort notification delivery. Callers fire after their own commit
/// and must treat a failure here as non-fatal.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn notify(&self, note: NewNotification) -> Result<(), DbError>;
}

/// Persists notifications as rows; the delivery channel polls them.
pub struct DbNotificationSender {
    db: Arc<dyn DbProvider>,
}

impl DbNotificationSender {
    pub fn new(db: Arc<dyn DbProvider>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationSender for DbNotificationSender {
    async fn notify(&self, note: NewNotification) -> Result<(), DbError> {
        self.db.insert_notification(note).await
    }
}
