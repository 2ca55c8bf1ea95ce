//! Resource repository used by the HTTP handlers.
//!
//! [`CityInfoRepository`] forwards to a [`CityInfoStore`] and translates
//! store failures into domain errors. It decouples handlers from the storage
//! technology: any store implementation can sit behind it.

use std::sync::Arc;

use tracing::error;

use crate::domain::ports::{CityInfoStore, CityInfoStoreError};
use crate::domain::{
    ChangeSet, City, CityId, Error, NewPointOfInterest, PointOfInterest, PointOfInterestId,
    SaveReport,
};

/// Outcome of [`CityInfoRepository::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The store accepted the change set.
    Saved(SaveReport),
    /// The store failed; the cause has already been logged.
    Failed,
}

impl SaveOutcome {
    /// Whether the save counts as successful.
    ///
    /// Any non-negative affected count is a success, including zero. A save
    /// that changes nothing therefore still reports success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved(report) if report.affected >= 0)
    }

    /// Points inserted by the save, with their assigned identifiers.
    pub fn inserted(&self) -> &[PointOfInterest] {
        match self {
            Self::Saved(report) => report.inserted.as_slice(),
            Self::Failed => &[],
        }
    }
}

/// Facade over the city info store.
#[derive(Clone)]
pub struct CityInfoRepository {
    store: Arc<dyn CityInfoStore>,
}

impl CityInfoRepository {
    /// Create a repository over the given store.
    pub fn new(store: Arc<dyn CityInfoStore>) -> Self {
        Self { store }
    }

    fn map_store_error(error: CityInfoStoreError) -> Error {
        match error {
            CityInfoStoreError::Connection { message } => {
                Error::internal(format!("city info store unavailable: {message}"))
            }
            CityInfoStoreError::Query { message } => {
                Error::internal(format!("city info store error: {message}"))
            }
        }
    }

    /// All cities ordered by name.
    pub async fn cities(&self) -> Result<Vec<City>, Error> {
        self.store
            .list_cities()
            .await
            .map_err(Self::map_store_error)
    }

    /// One city, with its points of interest when `include_points_of_interest`.
    pub async fn city(
        &self,
        id: CityId,
        include_points_of_interest: bool,
    ) -> Result<Option<City>, Error> {
        self.store
            .find_city(id, include_points_of_interest)
            .await
            .map_err(Self::map_store_error)
    }

    /// Points of interest of `city_id`.
    pub async fn points_of_interest(&self, city_id: CityId) -> Result<Vec<PointOfInterest>, Error> {
        self.store
            .list_points_of_interest(city_id)
            .await
            .map_err(Self::map_store_error)
    }

    /// One point of interest under `city_id`.
    pub async fn point_of_interest(
        &self,
        city_id: CityId,
        id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, Error> {
        self.store
            .find_point_of_interest(city_id, id)
            .await
            .map_err(Self::map_store_error)
    }

    /// Whether `id` names an existing city.
    pub async fn city_exists(&self, id: CityId) -> Result<bool, Error> {
        self.store
            .city_exists(id)
            .await
            .map_err(Self::map_store_error)
    }

    /// Number of stored cities; doubles as a store reachability check.
    pub async fn city_count(&self) -> Result<u64, Error> {
        self.store
            .count_cities()
            .await
            .map_err(Self::map_store_error)
    }

    /// Stage `point` for insertion under `city_id`.
    ///
    /// The city is expected to exist; callers check before staging.
    pub fn add_point_of_interest(
        &self,
        changes: &mut ChangeSet,
        city_id: CityId,
        point: NewPointOfInterest,
    ) {
        changes.add(city_id, point);
    }

    /// Stage an overwrite of `point`.
    pub fn update_point_of_interest(&self, changes: &mut ChangeSet, point: PointOfInterest) {
        changes.update(point);
    }

    /// Stage the removal of `point`.
    pub fn delete_point_of_interest(&self, changes: &mut ChangeSet, point: &PointOfInterest) {
        changes.remove(point);
    }

    /// Persist the staged changes.
    pub async fn save(&self, changes: ChangeSet) -> SaveOutcome {
        let staged = changes.len();
        match self.store.save(changes).await {
            Ok(report) => SaveOutcome::Saved(report),
            Err(err) => {
                error!(error = %err, staged, "city info store rejected change set");
                SaveOutcome::Failed
            }
        }
    }
}
