//! Domain entities, rules and ports.
//!
//! Purpose: model cities and their points of interest independently of HTTP
//! and of the storage technology. Adapters depend on this module, never the
//! other way round.
//!
//! Public surface:
//! - `City`, `PointOfInterest` and their unsaved counterparts.
//! - `ChangeSet` / `SaveReport`: explicit unit of work handed to the store.
//! - `CityInfoRepository`: the facade handlers talk to.
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `ports`: the store and notification contracts.

pub mod change_set;
pub mod city;
pub mod error;
pub mod ports;
pub mod repository;
pub mod seed;
pub mod trace_id;
pub mod validation;

pub use self::change_set::{ChangeSet, PendingChange, SaveReport};
pub use self::city::{City, CityId, NewCity, NewPointOfInterest, PointOfInterest, PointOfInterestId};
pub use self::error::{Error, ErrorCode};
pub use self::repository::{CityInfoRepository, SaveOutcome};
pub use self::seed::{SeedOutcome, ensure_seed_data, seed_cities};
pub use self::trace_id::TraceId;
pub use self::validation::{FieldError, FieldErrors, validate_point_of_interest};

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
