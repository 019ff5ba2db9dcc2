//! Validation of axis sets and grids before they are used or persisted

use crate::config::GeometryConfig;
use crate::error::{GeometryError, Result};
use crate::grid::GridModel;
use crate::types::{AxisDescriptor, AxisName, AxisType};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three axes of a survey, keyed by direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSet {
    pub inline: AxisDescriptor,
    pub crossline: AxisDescriptor,
    pub sample: AxisDescriptor,
}

impl AxisSet {
    /// Axes in inline, crossline, sample order
    pub fn ordered(&self) -> [&AxisDescriptor; 3] {
        [&self.inline, &self.crossline, &self.sample]
    }

    /// Get the axis for a direction
    pub fn get(&self, axis_type: AxisType) -> &AxisDescriptor {
        match axis_type {
            AxisType::Inline => &self.inline,
            AxisType::Crossline => &self.crossline,
            AxisType::Sample => &self.sample,
        }
    }
}

/// Rejects axis sets and grids that violate survey invariants
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: GeometryConfig,
}

impl Validator {
    /// Create a validator with the given tolerances
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    /// Validate three declared axes, in any order, and key them by direction
    pub fn validate_axes(&self, axes: &[AxisDescriptor]) -> Result<AxisSet> {
        if axes.len() != 3 {
            return Err(GeometryError::InvalidDimensions(format!(
                "expected 3 axes, got {}",
                axes.len()
            )));
        }

        // Per axis: name, then direction uniqueness, then sampling
        let mut by_type: HashMap<AxisType, &AxisDescriptor> = HashMap::new();
        for axis in axes {
            let axis_type = axis.axis_name()?.axis_type();
            if let Some(existing) = by_type.insert(axis_type, axis) {
                return Err(GeometryError::AmbiguousAxisDirection(format!(
                    "axes '{}' and '{}' both describe the {} direction",
                    existing.name, axis.name, axis_type
                )));
            }
            self.check_sampling(axis)?;
        }

        // Three distinct types out of three possible
        let take = |axis_type: AxisType| by_type[&axis_type].clone();
        let set = AxisSet {
            inline: take(AxisType::Inline),
            crossline: take(AxisType::Crossline),
            sample: take(AxisType::Sample),
        };
        debug!(
            "validated axes: {} x {} x {}",
            set.inline.num_samples, set.crossline.num_samples, set.sample.num_samples
        );
        Ok(set)
    }

    /// Validate a single axis and return its parsed name
    pub fn validate_axis(&self, axis: &AxisDescriptor) -> Result<AxisName> {
        let name = axis.axis_name()?;
        self.check_sampling(axis)?;
        Ok(name)
    }

    /// Sample count, finite bounds and positive step
    fn check_sampling(&self, axis: &AxisDescriptor) -> Result<()> {
        if axis.num_samples == 0 {
            return Err(GeometryError::InvalidAxis(format!(
                "axis {} has no samples",
                axis.name
            )));
        }

        if !axis.coord_min.is_finite() || !axis.coord_max.is_finite() {
            return Err(GeometryError::InvalidAxis(format!(
                "axis {} has non-finite bounds [{}, {}]",
                axis.name, axis.coord_min, axis.coord_max
            )));
        }

        if axis.num_samples > 1 && axis.coord_max <= axis.coord_min {
            return Err(GeometryError::NegativeStep(format!(
                "expecting positive stepsize in axis {}, got max ({}) <= min ({})",
                axis.name, axis.coord_max, axis.coord_min
            )));
        }

        if axis.num_samples == 1 && axis.coord_max != axis.coord_min {
            return Err(GeometryError::InvalidAxis(format!(
                "single-sample axis {} has min {} != max {}",
                axis.name, axis.coord_min, axis.coord_max
            )));
        }

        Ok(())
    }

    /// Re-check a grid against this validator's determinant tolerance
    pub fn validate_grid(&self, grid: &GridModel) -> Result<()> {
        GridModel::with_tolerance(
            grid.origin(),
            grid.inline_spacing(),
            grid.xline_spacing(),
            self.config.determinant_tolerance,
        )?;
        Ok(())
    }
}
