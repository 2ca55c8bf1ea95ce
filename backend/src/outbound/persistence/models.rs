//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; the store converts them to
//! domain entities at the boundary.

use diesel::prelude::*;

use super::schema::{cities, points_of_interest};

/// Row read from the `cities` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CityRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Insertable city record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cities)]
pub(crate) struct NewCityRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Row read from the `points_of_interest` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = points_of_interest)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PointOfInterestRow {
    pub id: i32,
    pub city_id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Insertable point-of-interest record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = points_of_interest)]
pub(crate) struct NewPointOfInterestRow<'a> {
    pub city_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Changeset overwriting the mutable point-of-interest columns.
///
/// `None` clears the description rather than leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = points_of_interest)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PointOfInterestUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}
