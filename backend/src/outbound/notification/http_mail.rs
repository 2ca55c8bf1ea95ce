//! Reqwest-backed mail relay sink.
//!
//! Posts each notification as JSON to an HTTP mail relay. Only transport and
//! status mapping live here; callers decide what a failed delivery means.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use crate::domain::ports::{Notification, NotificationSink, NotificationSinkError};

/// Relay request body.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Sender and recipient addresses for relayed mail.
#[derive(Debug, Clone)]
pub struct MailAddresses {
    pub from: String,
    pub to: String,
}

/// Notification sink that forwards messages to an HTTP mail relay.
pub struct HttpMailNotificationSink {
    client: Client,
    endpoint: Url,
    addresses: MailAddresses,
}

impl HttpMailNotificationSink {
    /// Build a sink posting to `endpoint` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        addresses: MailAddresses,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            addresses,
        })
    }

    fn request<'a>(&'a self, notification: &'a Notification) -> MailRequest<'a> {
        MailRequest {
            from: self.addresses.from.as_str(),
            to: self.addresses.to.as_str(),
            subject: notification.subject.as_str(),
            body: notification.message.as_str(),
        }
    }
}

#[async_trait]
impl NotificationSink for HttpMailNotificationSink {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationSinkError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&self.request(notification))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        debug!(endpoint = %self.endpoint, "notification relayed");
        Ok(())
    }
}

fn map_transport_error(error: reqwest::Error) -> NotificationSinkError {
    if error.is_timeout() {
        NotificationSinkError::transport(format!("mail relay timed out: {error}"))
    } else {
        NotificationSinkError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> NotificationSinkError {
    NotificationSinkError::rejected(status.as_u16())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for relay payloads and failure mapping.

    use super::*;
    use rstest::rstest;

    fn sink(endpoint: &str) -> HttpMailNotificationSink {
        HttpMailNotificationSink::new(
            Url::parse(endpoint).expect("endpoint url"),
            MailAddresses {
                from: "noreply@cityinfo.test".into(),
                to: "admin@cityinfo.test".into(),
            },
            Duration::from_secs(2),
        )
        .expect("client")
    }

    #[test]
    fn request_body_carries_addresses_and_message() {
        let sink = sink("http://relay.invalid/send");
        let notification = Notification::new("Point of interest deleted", "gone");

        let body = serde_json::to_value(sink.request(&notification)).expect("json");
        assert_eq!(
            body,
            serde_json::json!({
                "from": "noreply@cityinfo.test",
                "to": "admin@cityinfo.test",
                "subject": "Point of interest deleted",
                "body": "gone",
            })
        );
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST)]
    #[case(StatusCode::SERVICE_UNAVAILABLE)]
    fn non_success_status_is_a_rejection(#[case] status: StatusCode) {
        assert_eq!(
            map_status_error(status),
            NotificationSinkError::rejected(status.as_u16())
        );
    }

    #[tokio::test]
    async fn unreachable_relay_is_a_transport_error() {
        let sink = sink("http://127.0.0.1:9/send");
        let err = sink
            .send(&Notification::new("subject", "message"))
            .await
            .expect_err("nothing listens on the discard port");

        assert!(matches!(err, NotificationSinkError::Transport { .. }));
    }
}
