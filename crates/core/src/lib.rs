//! # Identity Core
//!
//! Identity resolution for the health platform.
//!
//! This crate contains the resolution logic and its collaborator seams:
//! - classification and validation of citizen and expatriate identifiers
//! - cache-aside resolution of patients and practitioners against the upstream registries
//! - translation of registry payloads into canonical records
//! - compatibility formatting for legacy consumers
//! - background write-back of freshly fetched records
//!
//! **No API concerns**: HTTP servers and registry transport clients belong in `api-rest` and in
//! implementations of the [`upstream`] traits.

pub mod calculator;
pub mod compat;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod features;
pub mod memory_store;
pub mod query;
pub mod store;
pub mod translate;
pub mod upstream;
pub mod validation;
pub mod write_back;

pub use compat::{format_legacy, format_v2, FormatterDefaults};
pub use config::CoreConfig;
pub use controller::IdentityController;
pub use error::{IdentityError, IdentityResult};
pub use features::FeatureSwitches;
pub use memory_store::{MemoryStore, StoreSeed};
pub use query::{classify, IdentityKind, IdentityQuery};
pub use store::{Lookup, Store, StoreError, StoreResult};
pub use upstream::{
    CivilRegistry, IdentityRegistry, LicensingRegistry, Registries, UnconfiguredRegistry,
    UpstreamError, UpstreamResult,
};
pub use validation::{validate, validate_id_only};
pub use write_back::WriteBack;
