//! Notification sink that writes messages to the application log.
//!
//! Used in development and tests where no mail relay is available.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{Notification, NotificationSink, NotificationSinkError};

/// Logs each notification instead of delivering it.
#[derive(Debug, Clone)]
pub struct LocalNotificationSink {
    from: String,
    to: String,
}

impl LocalNotificationSink {
    /// Create a sink that reports the given sender and recipient.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for LocalNotificationSink {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationSinkError> {
        info!(
            "Mail from {} to {}, with LocalNotificationSink.",
            self.from, self.to
        );
        info!("Subject: {}", notification.subject);
        info!("Message: {}", notification.message);
        Ok(())
    }
}
