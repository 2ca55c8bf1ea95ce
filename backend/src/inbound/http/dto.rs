//! Request and response shapes for the cities API, plus their mapping.
//!
//! Every conversion is a plain field copy. Summary views drop the points of
//! interest; update payloads never touch identity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    City, CityId, FieldErrors, NewPointOfInterest, PointOfInterest, PointOfInterestId,
    validate_point_of_interest,
};

/// City without its points of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityWithoutPointsOfInterestDto {
    #[schema(example = 1)]
    pub id: CityId,
    #[schema(example = "New York City")]
    pub name: String,
    pub description: Option<String>,
}

impl From<City> for CityWithoutPointsOfInterestDto {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            description: city.description,
        }
    }
}

/// City with its points of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    pub id: CityId,
    pub name: String,
    pub description: Option<String>,
    pub points_of_interest: Vec<PointOfInterestDto>,
}

impl From<City> for CityDto {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            description: city.description,
            points_of_interest: city
                .points_of_interest
                .into_iter()
                .map(PointOfInterestDto::from)
                .collect(),
        }
    }
}

/// Point of interest as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestDto {
    #[schema(example = 1)]
    pub id: PointOfInterestId,
    #[schema(example = "Central Park")]
    pub name: String,
    pub description: Option<String>,
}

impl From<PointOfInterest> for PointOfInterestDto {
    fn from(point: PointOfInterest) -> Self {
        Self {
            id: point.id,
            name: point.name,
            description: point.description,
        }
    }
}

/// Body of `POST /cities/{cityId}/pointsofinterest`.
///
/// A missing `name` deserialises to an empty string so that validation, not
/// the JSON decoder, reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestForCreationDto {
    #[serde(default, alias = "Name")]
    #[schema(example = "Brooklyn Bridge", max_length = 50)]
    pub name: String,
    #[serde(default, alias = "Description")]
    #[schema(max_length = 200)]
    pub description: Option<String>,
}

impl PointOfInterestForCreationDto {
    /// Check the declared constraints.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_point_of_interest(&self.name, self.description.as_deref())
    }
}

impl From<PointOfInterestForCreationDto> for NewPointOfInterest {
    fn from(dto: PointOfInterestForCreationDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

/// Body of `PUT`, and the document `PATCH` operations apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestForUpdateDto {
    #[serde(default, alias = "Name")]
    #[schema(example = "Central Park", max_length = 50)]
    pub name: String,
    #[serde(default, alias = "Description")]
    #[schema(max_length = 200)]
    pub description: Option<String>,
}

impl PointOfInterestForUpdateDto {
    /// Check the declared constraints.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_point_of_interest(&self.name, self.description.as_deref())
    }

    /// Overwrite the mutable fields of `point`; identity is left alone.
    pub fn apply_to(self, point: &mut PointOfInterest) {
        point.name = self.name;
        point.description = self.description;
    }
}

impl From<&PointOfInterest> for PointOfInterestForUpdateDto {
    fn from(point: &PointOfInterest) -> Self {
        Self {
            name: point.name.clone(),
            description: point.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn central_park() -> PointOfInterest {
        PointOfInterest {
            id: 1,
            city_id: 1,
            name: "Central Park".into(),
            description: Some("The most visited urban park in the United States.".into()),
        }
    }

    #[rstest]
    fn summary_drops_points_of_interest(central_park: PointOfInterest) {
        let city = City {
            id: 1,
            name: "New York City".into(),
            description: None,
            points_of_interest: vec![central_park],
        };

        let summary = CityWithoutPointsOfInterestDto::from(city.clone());
        let full = CityDto::from(city);
        assert_eq!(summary.id, full.id);
        assert_eq!(summary.name, full.name);
        assert_eq!(full.points_of_interest.len(), 1);
    }

    #[rstest]
    fn update_preserves_identity(mut central_park: PointOfInterest) {
        let update = PointOfInterestForUpdateDto {
            name: "Prospect Park".into(),
            description: None,
        };
        update.apply_to(&mut central_park);

        assert_eq!(central_park.id, 1);
        assert_eq!(central_park.city_id, 1);
        assert_eq!(central_park.name, "Prospect Park");
        assert!(central_park.description.is_none());
    }

    #[rstest]
    fn creation_payload_accepts_pascal_case_and_missing_fields() {
        let pascal: PointOfInterestForCreationDto =
            serde_json::from_value(json!({ "Name": "Zoo", "Description": "Animals" }))
                .expect("pascal case");
        assert_eq!(pascal.name, "Zoo");
        assert_eq!(pascal.description.as_deref(), Some("Animals"));

        let empty: PointOfInterestForCreationDto =
            serde_json::from_value(json!({})).expect("empty object");
        assert!(empty.validate().expect_err("name required").has_field("Name"));
    }

    #[rstest]
    fn responses_use_camel_case(central_park: PointOfInterest) {
        let city = CityDto {
            id: 1,
            name: "New York City".into(),
            description: None,
            points_of_interest: vec![central_park.into()],
        };
        let value = serde_json::to_value(city).expect("json");
        assert!(value.get("pointsOfInterest").is_some());
        assert_eq!(value["description"], serde_json::Value::Null);
    }
}
