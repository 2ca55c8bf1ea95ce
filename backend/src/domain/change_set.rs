//! Explicit unit of work for point-of-interest mutations.
//!
//! Handlers stage changes here and hand the whole set to the store in one
//! `save` call. Nothing is persisted until then.

use super::{CityId, NewPointOfInterest, PointOfInterest, PointOfInterestId};

/// A staged mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    /// Append a point of interest to a city.
    Add {
        city_id: CityId,
        point: NewPointOfInterest,
    },
    /// Overwrite the mutable fields of an existing point of interest.
    Update(PointOfInterest),
    /// Remove a point of interest.
    Remove {
        city_id: CityId,
        id: PointOfInterestId,
    },
}

/// Ordered list of staged mutations.
///
/// # Examples
/// ```
/// use city_info::domain::{ChangeSet, NewPointOfInterest};
///
/// let mut changes = ChangeSet::new();
/// assert!(changes.is_empty());
/// changes.add(1, NewPointOfInterest::new("Grote Markt", None));
/// assert_eq!(changes.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<PendingChange>,
}

impl ChangeSet {
    /// Start an empty unit of work.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an insert under `city_id`.
    pub fn add(&mut self, city_id: CityId, point: NewPointOfInterest) {
        self.changes.push(PendingChange::Add { city_id, point });
    }

    /// Stage a full overwrite of `point`'s mutable fields.
    pub fn update(&mut self, point: PointOfInterest) {
        self.changes.push(PendingChange::Update(point));
    }

    /// Stage the removal of `point`.
    pub fn remove(&mut self, point: &PointOfInterest) {
        self.changes.push(PendingChange::Remove {
            city_id: point.city_id,
            id: point.id,
        });
    }

    /// Number of staged changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Staged changes in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &PendingChange> {
        self.changes.iter()
    }
}

impl IntoIterator for ChangeSet {
    type Item = PendingChange;
    type IntoIter = std::vec::IntoIter<PendingChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Result reported by the store after applying a [`ChangeSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Number of rows the store reports as affected.
    pub affected: i64,
    /// Inserted points with their store-assigned identifiers, in staging order.
    pub inserted: Vec<PointOfInterest>,
}
