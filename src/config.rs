//! Geometry configuration

use crate::error::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How signed SEG-Y coordinate scalars are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarConvention {
    /// SEG-Y rev1: negative divides, positive multiplies, zero means one
    #[default]
    Segy,
    /// Only negative (dividing) scalars are accepted
    DivideOnly,
}

/// Tolerances and conventions shared by grid construction, conversion and
/// derivation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Relative tolerance on |det| of the spacing matrix, scaled by the
    /// squared Frobenius norm
    pub determinant_tolerance: f64,

    /// Absolute tolerance, in steps, for an annotated value to count as
    /// aligned to its axis
    pub alignment_tolerance: f64,

    /// Header coordinate scalar convention
    pub scalar_convention: ScalarConvention,
}

impl GeometryConfig {
    pub const DEFAULT_DETERMINANT_TOLERANCE: f64 = 1e-9;
    pub const DEFAULT_ALIGNMENT_TOLERANCE: f64 = 1e-6;

    pub fn new() -> Self {
        Self::default()
    }

    /// Set determinant tolerance
    pub fn with_determinant_tolerance(mut self, tolerance: f64) -> Self {
        self.determinant_tolerance = tolerance;
        self
    }

    /// Set alignment tolerance
    pub fn with_alignment_tolerance(mut self, tolerance: f64) -> Self {
        self.alignment_tolerance = tolerance;
        self
    }

    /// Set scalar convention
    pub fn with_scalar_convention(mut self, convention: ScalarConvention) -> Self {
        self.scalar_convention = convention;
        self
    }

    /// Check that the tolerances are usable
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("determinant_tolerance", self.determinant_tolerance),
            ("alignment_tolerance", self.alignment_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::Configuration(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if self.alignment_tolerance >= 0.5 {
            return Err(GeometryError::Configuration(format!(
                "alignment_tolerance must be below half a step, got {}",
                self.alignment_tolerance
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            determinant_tolerance: Self::DEFAULT_DETERMINANT_TOLERANCE,
            alignment_tolerance: Self::DEFAULT_ALIGNMENT_TOLERANCE,
            scalar_convention: ScalarConvention::Segy,
        }
    }
}
