//! City and point-of-interest entities.
//!
//! A [`PointOfInterest`] is owned by exactly one [`City`]; removing a city
//! removes its points. Identifiers are assigned by the store and never change
//! afterwards.

/// Store-assigned city identifier.
pub type CityId = i32;

/// Store-assigned point-of-interest identifier, unique across the store.
pub type PointOfInterestId = i32;

/// A persisted city.
///
/// `points_of_interest` is only populated when the caller asked the store to
/// include them; summary reads leave it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub description: Option<String>,
    pub points_of_interest: Vec<PointOfInterest>,
}

/// A persisted point of interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointOfInterest {
    pub id: PointOfInterestId,
    pub city_id: CityId,
    pub name: String,
    pub description: Option<String>,
}

/// A point of interest that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPointOfInterest {
    pub name: String,
    pub description: Option<String>,
}

impl NewPointOfInterest {
    /// Build a new point of interest from borrowed text.
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_owned),
        }
    }

    /// Attach the store-assigned identity.
    pub fn into_persisted(self, city_id: CityId, id: PointOfInterestId) -> PointOfInterest {
        PointOfInterest {
            id,
            city_id,
            name: self.name,
            description: self.description,
        }
    }
}

/// A city and its points, ready to be inserted as one aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCity {
    pub name: String,
    pub description: Option<String>,
    pub points_of_interest: Vec<NewPointOfInterest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn into_persisted_keeps_fields_and_assigns_identity() {
        let point = NewPointOfInterest::new("Eiffel Tower", Some("Iron lattice"));
        let persisted = point.into_persisted(3, 11);

        assert_eq!(persisted.id, 11);
        assert_eq!(persisted.city_id, 3);
        assert_eq!(persisted.name, "Eiffel Tower");
        assert_eq!(persisted.description.as_deref(), Some("Iron lattice"));
    }
}
