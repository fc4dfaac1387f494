//! Electron cloud sizing.
//!
//! Pure functions used to size the electron cloud drawn around the nucleus.

pub mod radius;
