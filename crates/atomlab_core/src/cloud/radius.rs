//! Electron count to cloud radius mapping.
//!
//! # Responsibility
//! - Map an electron count to a display radius for the electron cloud.
//! - Compress empirical covalent radii into a narrow output band so the
//!   cloud never dwarfs or vanishes behind the nucleus.
//!
//! # Invariants
//! - Zero electrons maps to [`EMPTY_CLOUD_RADIUS`], never exactly zero.
//! - Counts above [`MAX_SUPPORTED_ELECTRONS`] are rejected in every build.
//! - Compression uses the min/max over the whole table, not a prefix of it.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Highest electron count covered by the radius table.
pub const MAX_SUPPORTED_ELECTRONS: u32 = 10;
/// Radius reported for an atom without electrons.
pub const EMPTY_CLOUD_RADIUS: f64 = 1e-5;
pub const DEFAULT_MIN_CHANGED_RADIUS: f64 = 40.0;
pub const DEFAULT_MAX_CHANGED_RADIUS: f64 = 55.0;

// Covalent radii in picometers, indexed by electron count - 1. Entries 3 and 4
// are pre-scaled (134 * 0.75 and 90 * 0.97) to tame their visual size.
const RAW_RADII_PM: [f64; MAX_SUPPORTED_ELECTRONS as usize] =
    [38.0, 32.0, 100.5, 87.3, 82.0, 77.0, 75.0, 73.0, 71.0, 69.0];

/// Cloud radius mapping errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloudRadiusError {
    UnsupportedElectronCount { count: u32, max: u32 },
    InvalidRange { min: f64, max: f64 },
}

impl Display for CloudRadiusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedElectronCount { count, max } => write!(
                f,
                "electron count {count} is not supported; expected at most {max}"
            ),
            Self::InvalidRange { min, max } => write!(
                f,
                "cloud radius range is invalid: min={min} max={max}"
            ),
        }
    }
}

impl Error for CloudRadiusError {}

/// Returns the table value in picometers for `electron_count`.
///
/// `None` for zero electrons and for counts beyond the table.
pub fn raw_radius_pm(electron_count: u32) -> Option<f64> {
    let index = usize::try_from(electron_count.checked_sub(1)?).ok()?;
    RAW_RADII_PM.get(index).copied()
}

fn raw_bounds() -> (f64, f64) {
    RAW_RADII_PM
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &value| {
            (min.min(value), max.max(value))
        })
}

/// Electron cloud radius mapper with a configurable output band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronCloudRadius {
    min_changed_radius: f64,
    max_changed_radius: f64,
}

impl ElectronCloudRadius {
    /// Builds a mapper that compresses table radii into `[min, max]`.
    ///
    /// # Errors
    /// - [`CloudRadiusError::InvalidRange`] when a bound is not finite or
    ///   `min > max`.
    pub fn new(min_changed_radius: f64, max_changed_radius: f64) -> Result<Self, CloudRadiusError> {
        if !min_changed_radius.is_finite()
            || !max_changed_radius.is_finite()
            || min_changed_radius > max_changed_radius
        {
            return Err(CloudRadiusError::InvalidRange {
                min: min_changed_radius,
                max: max_changed_radius,
            });
        }
        Ok(Self {
            min_changed_radius,
            max_changed_radius,
        })
    }

    pub fn min_changed_radius(&self) -> f64 {
        self.min_changed_radius
    }

    pub fn max_changed_radius(&self) -> f64 {
        self.max_changed_radius
    }

    /// Maps `electron_count` to a display radius.
    ///
    /// Output is not monotonic in the electron count because the table
    /// itself is not.
    pub fn radius_for(&self, electron_count: u32) -> Result<f64, CloudRadiusError> {
        if electron_count == 0 {
            return Ok(EMPTY_CLOUD_RADIUS);
        }
        let raw = raw_radius_pm(electron_count).ok_or(
            CloudRadiusError::UnsupportedElectronCount {
                count: electron_count,
                max: MAX_SUPPORTED_ELECTRONS,
            },
        )?;
        let (raw_min, raw_max) = raw_bounds();
        Ok(self.min_changed_radius
            + (raw - raw_min) / (raw_max - raw_min)
                * (self.max_changed_radius - self.min_changed_radius))
    }
}

impl Default for ElectronCloudRadius {
    fn default() -> Self {
        Self {
            min_changed_radius: DEFAULT_MIN_CHANGED_RADIUS,
            max_changed_radius: DEFAULT_MAX_CHANGED_RADIUS,
        }
    }
}

/// Maps `electron_count` to a display radius using the default band.
pub fn radius_for(electron_count: u32) -> Result<f64, CloudRadiusError> {
    ElectronCloudRadius::default().radius_for(electron_count)
}
