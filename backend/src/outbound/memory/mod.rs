//! Process-local, non-persistent `CityInfoStore`.
//!
//! Backs the `memory` store mode and the handler test suites. State lives
//! behind a single mutex; every `save` applies its change set to a copy and
//! swaps it in only when every change succeeded.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{CityInfoStore, CityInfoStoreError};
use crate::domain::{
    ChangeSet, City, CityId, NewCity, PendingChange, PointOfInterest, PointOfInterestId,
    SaveReport,
};

#[derive(Debug, Clone)]
struct CityRecord {
    id: CityId,
    name: String,
    description: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct State {
    cities: Vec<CityRecord>,
    points: Vec<PointOfInterest>,
    last_city_id: CityId,
    last_point_id: PointOfInterestId,
}

impl State {
    fn city_exists(&self, id: CityId) -> bool {
        self.cities.iter().any(|city| city.id == id)
    }

    fn points_of(&self, city_id: CityId) -> Vec<PointOfInterest> {
        self.points
            .iter()
            .filter(|point| point.city_id == city_id)
            .cloned()
            .collect()
    }

    fn to_city(&self, record: &CityRecord, include_points_of_interest: bool) -> City {
        City {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            points_of_interest: if include_points_of_interest {
                self.points_of(record.id)
            } else {
                Vec::new()
            },
        }
    }

    /// Apply one change, returning the affected row count and any insert.
    fn apply(
        &mut self,
        change: PendingChange,
    ) -> Result<(i64, Option<PointOfInterest>), CityInfoStoreError> {
        match change {
            PendingChange::Add { city_id, point } => {
                if !self.city_exists(city_id) {
                    return Err(CityInfoStoreError::query(format!(
                        "city {city_id} does not exist"
                    )));
                }
                self.last_point_id += 1;
                let persisted = point.into_persisted(city_id, self.last_point_id);
                self.points.push(persisted.clone());
                Ok((1, Some(persisted)))
            }
            PendingChange::Update(point) => {
                let target = self
                    .points
                    .iter_mut()
                    .find(|stored| stored.id == point.id && stored.city_id == point.city_id);
                Ok(match target {
                    Some(stored) => {
                        stored.name = point.name;
                        stored.description = point.description;
                        (1, None)
                    }
                    None => (0, None),
                })
            }
            PendingChange::Remove { city_id, id } => {
                let before = self.points.len();
                self.points
                    .retain(|stored| !(stored.id == id && stored.city_id == city_id));
                Ok((i64::from(before != self.points.len()), None))
            }
        }
    }
}

/// In-memory implementation of [`CityInfoStore`].
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCityInfoStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryCityInfoStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, CityInfoStoreError> {
        self.state
            .lock()
            .map_err(|_| CityInfoStoreError::query("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl CityInfoStore for InMemoryCityInfoStore {
    async fn list_cities(&self) -> Result<Vec<City>, CityInfoStoreError> {
        let state = self.lock()?;
        let mut cities: Vec<City> = state
            .cities
            .iter()
            .map(|record| state.to_city(record, false))
            .collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(cities)
    }

    async fn find_city(
        &self,
        id: CityId,
        include_points_of_interest: bool,
    ) -> Result<Option<City>, CityInfoStoreError> {
        let state = self.lock()?;
        Ok(state
            .cities
            .iter()
            .find(|record| record.id == id)
            .map(|record| state.to_city(record, include_points_of_interest)))
    }

    async fn list_points_of_interest(
        &self,
        city_id: CityId,
    ) -> Result<Vec<PointOfInterest>, CityInfoStoreError> {
        Ok(self.lock()?.points_of(city_id))
    }

    async fn find_point_of_interest(
        &self,
        city_id: CityId,
        id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityInfoStoreError> {
        Ok(self
            .lock()?
            .points
            .iter()
            .find(|point| point.city_id == city_id && point.id == id)
            .cloned())
    }

    async fn city_exists(&self, id: CityId) -> Result<bool, CityInfoStoreError> {
        Ok(self.lock()?.city_exists(id))
    }

    async fn count_cities(&self) -> Result<u64, CityInfoStoreError> {
        let count = self.lock()?.cities.len();
        u64::try_from(count).map_err(|err| CityInfoStoreError::query(err.to_string()))
    }

    async fn insert_city(&self, city: &NewCity) -> Result<City, CityInfoStoreError> {
        let mut state = self.lock()?;
        state.last_city_id += 1;
        let record = CityRecord {
            id: state.last_city_id,
            name: city.name.clone(),
            description: city.description.clone(),
        };
        for point in &city.points_of_interest {
            state.last_point_id += 1;
            let persisted = point.clone().into_persisted(record.id, state.last_point_id);
            state.points.push(persisted);
        }
        let inserted = state.to_city(&record, true);
        state.cities.push(record);
        Ok(inserted)
    }

    async fn save(&self, changes: ChangeSet) -> Result<SaveReport, CityInfoStoreError> {
        let mut state = self.lock()?;
        let mut working = state.clone();
        let mut report = SaveReport::default();
        for change in changes {
            let (affected, inserted) = working.apply(change)?;
            report.affected += affected;
            report.inserted.extend(inserted);
        }
        *state = working;
        Ok(report)
    }
}
