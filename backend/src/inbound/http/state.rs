//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the repository facade and the notification port and can be exercised
//! without real I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::CityInfoRepository;
use crate::domain::ports::NotificationSink;

/// Longest a request waits on the notification sink.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(2);

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub repository: CityInfoRepository,
    pub notifications: Arc<dyn NotificationSink>,
    pub notification_timeout: Duration,
}

impl HttpState {
    /// Bundle the repository and notification sink.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use city_info::domain::CityInfoRepository;
    /// use city_info::inbound::http::state::HttpState;
    /// use city_info::outbound::memory::InMemoryCityInfoStore;
    /// use city_info::outbound::notification::LocalNotificationSink;
    ///
    /// let repository = CityInfoRepository::new(Arc::new(InMemoryCityInfoStore::new()));
    /// let sink = Arc::new(LocalNotificationSink::new("noreply@example.com", "admin@example.com"));
    /// let state = HttpState::new(repository, sink);
    /// let _notifications = state.notifications.clone();
    /// ```
    pub fn new(repository: CityInfoRepository, notifications: Arc<dyn NotificationSink>) -> Self {
        Self {
            repository,
            notifications,
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }

    /// Override how long handlers wait for a notification to be accepted.
    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }
}
