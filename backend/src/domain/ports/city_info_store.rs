//! Port for city and point-of-interest storage.
//!
//! The [`CityInfoStore`] trait is the data store contract behind
//! [`crate::domain::CityInfoRepository`]. Adapters translate between their
//! storage representation and the domain entities; they hold no business
//! rules of their own.

use async_trait::async_trait;

use crate::domain::{
    ChangeSet, City, CityId, NewCity, PointOfInterest, PointOfInterestId, SaveReport,
};

/// Errors raised by city info store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CityInfoStoreError {
    /// The backing store could not be reached.
    #[error("city info store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("city info store query failed: {message}")]
    Query { message: String },
}

impl CityInfoStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage contract for cities and their points of interest.
///
/// Reads return points of interest in store order (ascending identifier).
/// Mutations are only ever applied through [`CityInfoStore::save`], which
/// must apply the whole [`ChangeSet`] or none of it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityInfoStore: Send + Sync {
    /// All cities ordered by name ascending, without their points.
    async fn list_cities(&self) -> Result<Vec<City>, CityInfoStoreError>;

    /// Fetch one city, optionally loading its points of interest.
    async fn find_city(
        &self,
        id: CityId,
        include_points_of_interest: bool,
    ) -> Result<Option<City>, CityInfoStoreError>;

    /// Points of interest belonging to `city_id`.
    async fn list_points_of_interest(
        &self,
        city_id: CityId,
    ) -> Result<Vec<PointOfInterest>, CityInfoStoreError>;

    /// Fetch a point of interest scoped to its owning city.
    async fn find_point_of_interest(
        &self,
        city_id: CityId,
        id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityInfoStoreError>;

    /// Whether a city with `id` exists.
    async fn city_exists(&self, id: CityId) -> Result<bool, CityInfoStoreError>;

    /// Number of stored cities.
    async fn count_cities(&self) -> Result<u64, CityInfoStoreError>;

    /// Insert a city together with its points of interest.
    async fn insert_city(&self, city: &NewCity) -> Result<City, CityInfoStoreError>;

    /// Apply the staged changes atomically.
    async fn save(&self, changes: ChangeSet) -> Result<SaveReport, CityInfoStoreError>;
}
