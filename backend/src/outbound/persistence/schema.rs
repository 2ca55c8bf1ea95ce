//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Cities, one row per city.
    cities (id) {
        /// Primary key assigned by the database.
        id -> Int4,
        /// City name (max 50 characters).
        name -> Varchar,
        /// Optional free-text description (max 200 characters).
        description -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Points of interest, each owned by one city.
    ///
    /// Rows are removed with their city (`ON DELETE CASCADE`).
    points_of_interest (id) {
        /// Primary key assigned by the database.
        id -> Int4,
        /// Owning city.
        city_id -> Int4,
        /// Point-of-interest name (max 50 characters).
        name -> Varchar,
        /// Optional description (max 200 characters).
        description -> Nullable<Varchar>,
    }
}

diesel::joinable!(points_of_interest -> cities (city_id));
diesel::allow_tables_to_appear_in_same_query!(cities, points_of_interest);
