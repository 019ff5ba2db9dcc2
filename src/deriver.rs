//! Reconstruct a survey's grid model from trace header samples

use crate::config::GeometryConfig;
use crate::error::{GeometryError, Result};
use crate::grid::GridModel;
use crate::header::HeaderSample;
use crate::types::AxisDescriptor;
use log::debug;

/// The three traces a grid is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationSamples {
    /// First trace of the survey
    pub origin: HeaderSample,
    /// Another trace on the origin's crossline, on a different inline
    pub next_inline: HeaderSample,
    /// Another trace on the origin's inline, on a different crossline
    pub next_crossline: HeaderSample,
}

impl DerivationSamples {
    /// Pick the samples from a trace list in file order: the first trace,
    /// then the first later trace sharing its crossline and the first later
    /// trace sharing its inline
    pub fn select(headers: &[HeaderSample]) -> Result<Self> {
        if headers.len() < 3 {
            return Err(GeometryError::MissingSamples(format!(
                "need at least 3 traces, got {}",
                headers.len()
            )));
        }

        let origin = headers[0];
        let next_inline = headers[1..]
            .iter()
            .find(|h| h.crossline == origin.crossline && h.inline != origin.inline)
            .copied()
            .ok_or_else(|| {
                GeometryError::MissingSamples(format!(
                    "no second inline on crossline {}",
                    origin.crossline
                ))
            })?;
        let next_crossline = headers[1..]
            .iter()
            .find(|h| h.inline == origin.inline && h.crossline != origin.crossline)
            .copied()
            .ok_or_else(|| {
                GeometryError::MissingSamples(format!(
                    "no second crossline on inline {}",
                    origin.inline
                ))
            })?;

        Ok(Self {
            origin,
            next_inline,
            next_crossline,
        })
    }
}

/// Derives grid models from header samples
#[derive(Debug, Clone, Default)]
pub struct GridDeriver {
    config: GeometryConfig,
}

impl GridDeriver {
    /// Create a deriver with the given tolerances and scalar convention
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Derive the grid from an inline-sorted trace list
    pub fn derive_from_headers(
        &self,
        headers: &[HeaderSample],
        inline: &AxisDescriptor,
        crossline: &AxisDescriptor,
    ) -> Result<GridModel> {
        let samples = DerivationSamples::select(headers)?;
        self.derive(&samples, inline, crossline)
    }

    /// Derive the grid from three samples.
    ///
    /// Spacing vectors are per unit of line number. The origin is the world
    /// position of the first inline and first crossline of the axes.
    pub fn derive(
        &self,
        samples: &DerivationSamples,
        inline: &AxisDescriptor,
        crossline: &AxisDescriptor,
    ) -> Result<GridModel> {
        let DerivationSamples {
            origin,
            next_inline,
            next_crossline,
        } = samples;

        for axis in [inline, crossline] {
            if axis.num_samples < 2 {
                return Err(GeometryError::MissingSamples(format!(
                    "{} axis has {} line(s), spacing is undetermined",
                    axis.name, axis.num_samples
                )));
            }
        }

        if next_inline.crossline != origin.crossline || next_inline.inline == origin.inline {
            return Err(GeometryError::MissingSamples(format!(
                "inline sample ({}, {}) must share crossline {} with the origin and change inline",
                next_inline.inline, next_inline.crossline, origin.crossline
            )));
        }
        if next_crossline.inline != origin.inline || next_crossline.crossline == origin.crossline {
            return Err(GeometryError::MissingSamples(format!(
                "crossline sample ({}, {}) must share inline {} with the origin and change crossline",
                next_crossline.inline, next_crossline.crossline, origin.inline
            )));
        }

        let tolerance = self.config.alignment_tolerance;
        for header in [origin, next_inline, next_crossline] {
            inline.annotation_to_index(header.inline as f64, tolerance)?;
            crossline.annotation_to_index(header.crossline as f64, tolerance)?;
        }

        let convention = self.config.scalar_convention;
        let origin_world = origin.world(convention)?.to_vector();
        let inline_world = next_inline.world(convention)?.to_vector();
        let crossline_world = next_crossline.world(convention)?.to_vector();

        let inline_delta = next_inline.inline as f64 - origin.inline as f64;
        let crossline_delta = next_crossline.crossline as f64 - origin.crossline as f64;

        let inline_spacing = (inline_world - origin_world) / inline_delta;
        let xline_spacing = (crossline_world - origin_world) / crossline_delta;

        let inline_offset = origin.inline as f64 - inline.first();
        let crossline_offset = origin.crossline as f64 - crossline.first();
        let grid_origin =
            origin_world - inline_spacing * inline_offset - xline_spacing * crossline_offset;

        let grid = GridModel::with_tolerance(
            grid_origin.into(),
            inline_spacing,
            xline_spacing,
            self.config.determinant_tolerance,
        )?;

        debug!(
            "derived grid: origin {}, inline spacing ({}, {}), crossline spacing ({}, {}), rotation {:.4} deg",
            grid.origin(),
            inline_spacing.x,
            inline_spacing.y,
            xline_spacing.x,
            xline_spacing.y,
            grid.rotation_degrees()
        );

        Ok(grid)
    }
}
