//! Core model for the atom builder simulation.
//! This crate is the single source of truth for atom composition invariants.

pub mod cloud;
pub mod logging;
pub mod model;

pub use cloud::radius::{
    radius_for, raw_radius_pm, CloudRadiusError, ElectronCloudRadius, EMPTY_CLOUD_RADIUS,
    MAX_SUPPORTED_ELECTRONS,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::atom::{
    AtomComposition, AtomObserver, AtomResult, AtomStateError, CountField, DerivedQuantities,
    ListenerId, NumberAtom,
};
pub use model::element::{element_for, Element, MAX_KNOWN_ATOMIC_NUMBER};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
