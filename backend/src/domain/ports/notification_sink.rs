//! Port for the fire-and-forget notification side channel.
//!
//! Callers never let a [`NotificationSinkError`] fail the request that
//! triggered the notification; they log it and move on.

use async_trait::async_trait;

/// A message to deliver to operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub message: String,
}

impl Notification {
    /// Build a notification from a subject and message body.
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by notification sink adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationSinkError {
    /// The message could not be handed to the transport.
    #[error("notification transport failed: {message}")]
    Transport { message: String },
    /// The remote relay refused the message.
    #[error("notification relay rejected message with status {status}")]
    Rejected { status: u16 },
}

impl NotificationSinkError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a rejection error for the given HTTP status.
    pub fn rejected(status: u16) -> Self {
        Self::Rejected { status }
    }
}

/// Delivery contract for notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver `notification`.
    async fn send(&self, notification: &Notification) -> Result<(), NotificationSinkError>;
}
