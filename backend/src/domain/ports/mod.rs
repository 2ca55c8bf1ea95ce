//! Domain ports for the hexagonal boundary.

mod city_info_store;
mod notification_sink;

#[cfg(test)]
pub use city_info_store::MockCityInfoStore;
pub use city_info_store::{CityInfoStore, CityInfoStoreError};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{Notification, NotificationSink, NotificationSinkError};
