//! Shared fixtures for the HTTP integration suites.
//!
//! Apps are built against a seeded in-memory store. Seed ids are stable:
//! New York City is 1 (points 1, 2), Antwerp 2 (points 3, 4) and Paris 3
//! (points 5, 6).

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;

use city_info::domain::ports::{
    CityInfoStore, CityInfoStoreError, Notification, NotificationSink, NotificationSinkError,
};
use city_info::domain::{
    ChangeSet, City, CityId, CityInfoRepository, NewCity, PointOfInterest, PointOfInterestId,
    SaveReport, ensure_seed_data,
};
use city_info::inbound::http::configure_api;
use city_info::inbound::http::state::HttpState;
use city_info::outbound::memory::InMemoryCityInfoStore;

pub const NEW_YORK: CityId = 1;
pub const ANTWERP: CityId = 2;
pub const PARIS: CityId = 3;
pub const CENTRAL_PARK: PointOfInterestId = 1;
pub const UNKNOWN_CITY: CityId = 999;

#[derive(Default, Clone, Copy)]
enum Delivery {
    #[default]
    Accept,
    Fail,
    Hang,
}

/// Notification sink remembering every message it was handed.
#[derive(Default)]
pub struct RecordingNotificationSink {
    sent: Mutex<Vec<Notification>>,
    delivery: Delivery,
}

impl RecordingNotificationSink {
    /// A sink that records and then reports a transport failure.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            delivery: Delivery::Fail,
        }
    }

    /// A sink that records and then never completes.
    pub fn hanging() -> Self {
        Self {
            sent: Mutex::default(),
            delivery: Delivery::Hang,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("sink lock").clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationSinkError> {
        self.sent
            .lock()
            .expect("sink lock")
            .push(notification.clone());
        match self.delivery {
            Delivery::Accept => Ok(()),
            Delivery::Fail => Err(NotificationSinkError::transport("relay unreachable")),
            Delivery::Hang => std::future::pending().await,
        }
    }
}

/// Store that reads from an inner store but fails every `save`.
pub struct FailingSaveStore {
    inner: InMemoryCityInfoStore,
}

#[async_trait]
impl CityInfoStore for FailingSaveStore {
    async fn list_cities(&self) -> Result<Vec<City>, CityInfoStoreError> {
        self.inner.list_cities().await
    }

    async fn find_city(
        &self,
        id: CityId,
        include_points_of_interest: bool,
    ) -> Result<Option<City>, CityInfoStoreError> {
        self.inner.find_city(id, include_points_of_interest).await
    }

    async fn list_points_of_interest(
        &self,
        city_id: CityId,
    ) -> Result<Vec<PointOfInterest>, CityInfoStoreError> {
        self.inner.list_points_of_interest(city_id).await
    }

    async fn find_point_of_interest(
        &self,
        city_id: CityId,
        id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityInfoStoreError> {
        self.inner.find_point_of_interest(city_id, id).await
    }

    async fn city_exists(&self, id: CityId) -> Result<bool, CityInfoStoreError> {
        self.inner.city_exists(id).await
    }

    async fn count_cities(&self) -> Result<u64, CityInfoStoreError> {
        self.inner.count_cities().await
    }

    async fn insert_city(&self, city: &NewCity) -> Result<City, CityInfoStoreError> {
        self.inner.insert_city(city).await
    }

    async fn save(&self, _changes: ChangeSet) -> Result<SaveReport, CityInfoStoreError> {
        Err(CityInfoStoreError::connection("database went away"))
    }
}

pub async fn seeded_store() -> InMemoryCityInfoStore {
    let store = InMemoryCityInfoStore::new();
    ensure_seed_data(&store).await.expect("seed data");
    store
}

pub async fn failing_save_store() -> FailingSaveStore {
    FailingSaveStore {
        inner: seeded_store().await,
    }
}

/// Build the `/api` scope around `store` and `sink`.
pub async fn init_app(
    store: Arc<dyn CityInfoStore>,
    sink: Arc<RecordingNotificationSink>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    init_app_with_state(HttpState::new(CityInfoRepository::new(store), sink)).await
}

/// Build the `/api` scope around a fully configured `state`.
pub async fn init_app_with_state(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api").configure(configure_api)),
    )
    .await
}
