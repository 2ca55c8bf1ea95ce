//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed `CityInfoStore` using Diesel.
//! - **memory**: process-local `CityInfoStore` for development and tests.
//! - **notification**: log and mail relay `NotificationSink` implementations.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod notification;
pub mod persistence;
