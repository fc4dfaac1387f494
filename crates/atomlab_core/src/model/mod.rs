//! Atom composition model consumed by the presentation layer.
//!
//! # Responsibility
//! - Hold base particle counts and the quantities derived from them.
//! - Resolve element identity for the current proton count.
//!
//! # Invariants
//! - Derived values are never observable in a stale state.
//! - Every composition change is a single committed update.

pub mod atom;
pub mod element;
