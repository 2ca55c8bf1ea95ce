//! PostgreSQL persistence adapter using Diesel.
//!
//! Provides [`DieselCityInfoStore`], the durable implementation of the
//! `CityInfoStore` port, over an async `bb8` pool from `diesel-async`.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module.
//!
//! # Example
//!
//! ```ignore
//! use city_info::outbound::persistence::{DbPool, DieselCityInfoStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/cityinfo")).await?;
//! let store = DieselCityInfoStore::new(pool);
//! ```

mod diesel_city_info_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_city_info_store::DieselCityInfoStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
