//! First-run seed data.
//!
//! Three cities with two points of interest each are inserted when the store
//! holds no cities. If any city exists the seed is skipped, so running it on
//! every startup is safe.

use tracing::info;

use crate::domain::NewCity;
use crate::domain::NewPointOfInterest;
use crate::domain::ports::{CityInfoStore, CityInfoStoreError};

/// Result of [`ensure_seed_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seed cities were inserted.
    Applied { cities: usize },
    /// The store already held cities; nothing was written.
    AlreadySeeded,
}

fn city(name: &str, description: &str, points: [(&str, &str); 2]) -> NewCity {
    NewCity {
        name: name.to_owned(),
        description: Some(description.to_owned()),
        points_of_interest: points
            .into_iter()
            .map(|(name, description)| NewPointOfInterest::new(name, Some(description)))
            .collect(),
    }
}

/// The fixed seed cities, in insertion order.
pub fn seed_cities() -> Vec<NewCity> {
    vec![
        city(
            "New York City",
            "The one with the big park.",
            [
                ("Central Park", "The most visited urban park in the U.S."),
                (
                    "Empire State Building",
                    "A 102-story skyscraper located in Midtown Manhattan.",
                ),
            ],
        ),
        city(
            "Antwerp",
            "The one with the cathedral that was never finished.",
            [
                (
                    "Cathedral of our Lady",
                    "A Gothic style cathedral, conceived by the architects Jan and Pieter Appelmans.",
                ),
                (
                    "Antwerp Central Station",
                    "The finest example of railway architecture in Belgium.",
                ),
            ],
        ),
        city(
            "Paris",
            "The one with the big tower.",
            [
                (
                    "Eiffel Tower",
                    "A wrought iron lattice tower on the Champ de Mars.",
                ),
                ("The Louvre", "The world's largest museum"),
            ],
        ),
    ]
}

/// Insert the seed cities unless the store already holds any city.
///
/// # Errors
/// Propagates store failures from the emptiness check or the inserts.
pub async fn ensure_seed_data(
    store: &dyn CityInfoStore,
) -> Result<SeedOutcome, CityInfoStoreError> {
    let existing = store.count_cities().await?;
    if existing > 0 {
        info!(existing, "seed data already present; skipping");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let cities = seed_cities();
    for city in &cities {
        store.insert_city(city).await?;
    }
    info!(cities = cities.len(), "seed data applied");
    Ok(SeedOutcome::Applied {
        cities: cities.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::City;
    use crate::domain::ports::MockCityInfoStore;
    use crate::domain::validate_point_of_interest;
    use rstest::rstest;

    #[rstest]
    fn seed_has_three_cities_with_two_valid_points_each() {
        let cities = seed_cities();
        assert_eq!(cities.len(), 3);
        for city in &cities {
            assert_eq!(city.points_of_interest.len(), 2);
            for point in &city.points_of_interest {
                assert!(
                    validate_point_of_interest(&point.name, point.description.as_deref()).is_ok(),
                    "{} should satisfy validation",
                    point.name
                );
            }
        }
    }

    #[tokio::test]
    async fn skips_when_any_city_exists() {
        let mut store = MockCityInfoStore::new();
        store.expect_count_cities().returning(|| Ok(1));
        store.expect_insert_city().never();

        let outcome = ensure_seed_data(&store).await.expect("seed");
        assert_eq!(outcome, SeedOutcome::AlreadySeeded);
    }

    #[tokio::test]
    async fn inserts_every_city_when_empty() {
        let mut store = MockCityInfoStore::new();
        store.expect_count_cities().returning(|| Ok(0));
        store.expect_insert_city().times(3).returning(|city| {
            Ok(City {
                id: 1,
                name: city.name.clone(),
                description: city.description.clone(),
                points_of_interest: Vec::new(),
            })
        });

        let outcome = ensure_seed_data(&store).await.expect("seed");
        assert_eq!(outcome, SeedOutcome::Applied { cities: 3 });
    }
}
