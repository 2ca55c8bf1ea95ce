//! Notification sink adapters.
//!
//! - [`LocalNotificationSink`] writes messages to the log.
//! - [`HttpMailNotificationSink`] forwards them to an HTTP mail relay.

mod http_mail;
mod local;

pub use http_mail::{HttpMailNotificationSink, MailAddresses};
pub use local::LocalNotificationSink;
