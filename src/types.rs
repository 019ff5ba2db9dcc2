//! Core data types for survey geometry

use crate::error::{GeometryError, Result};
use crate::utils::snap_to_integer;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognized axis names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisName {
    Inline,
    Crossline,
    Sample,
    Time,
    Depth,
}

impl AxisName {
    pub const ALL: [AxisName; 5] = [
        AxisName::Inline,
        AxisName::Crossline,
        AxisName::Sample,
        AxisName::Time,
        AxisName::Depth,
    ];

    /// Canonical spelling of the name
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisName::Inline => "Inline",
            AxisName::Crossline => "Crossline",
            AxisName::Sample => "Sample",
            AxisName::Time => "Time",
            AxisName::Depth => "Depth",
        }
    }

    /// The physical direction this axis describes
    pub fn axis_type(&self) -> AxisType {
        match self {
            AxisName::Inline => AxisType::Inline,
            AxisName::Crossline => AxisType::Crossline,
            AxisName::Sample | AxisName::Time | AxisName::Depth => AxisType::Sample,
        }
    }
}

impl FromStr for AxisName {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        AxisName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                GeometryError::UnknownAxisName(format!(
                    "'{}', valid names are: Inline, Crossline, Sample, Time, Depth",
                    s
                ))
            })
    }
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical direction of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisType {
    Inline,
    Crossline,
    Sample,
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisType::Inline => f.write_str("inline"),
            AxisType::Crossline => f.write_str("xline"),
            AxisType::Sample => f.write_str("sample"),
        }
    }
}

/// Coordinate system selector used by point lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Zero-based (i, j)
    #[serde(rename = "ij")]
    Index,
    /// Inline/crossline numbers
    #[serde(rename = "ilxl")]
    Annotation,
    /// Projected world coordinates
    #[serde(rename = "cdp")]
    Cdp,
}

impl CoordinateSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateSystem::Index => "ij",
            CoordinateSystem::Annotation => "ilxl",
            CoordinateSystem::Cdp => "cdp",
        }
    }
}

impl FromStr for CoordinateSystem {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ij" => Ok(CoordinateSystem::Index),
            "ilxl" => Ok(CoordinateSystem::Annotation),
            "cdp" => Ok(CoordinateSystem::Cdp),
            _ => Err(GeometryError::UnknownCoordinateSystem(format!(
                "'{}', valid options are: ij, ilxl, cdp",
                s
            ))),
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis descriptor with name, unit, and coordinate information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDescriptor {
    /// Number of samples along this axis
    pub num_samples: usize,
    /// Name of the axis (e.g., "Inline", "Crossline", "Depth")
    pub name: String,
    /// Unit of measurement (e.g., "m", "ms", "unitless")
    pub unit: String,
    /// Annotated value of the first sample
    pub coord_min: f64,
    /// Annotated value of the last sample
    pub coord_max: f64,
}

impl AxisDescriptor {
    /// Create a new axis descriptor
    pub fn new(
        num_samples: usize,
        name: impl Into<String>,
        unit: impl Into<String>,
        coord_min: f64,
        coord_max: f64,
    ) -> Self {
        Self {
            num_samples,
            name: name.into(),
            unit: unit.into(),
            coord_min,
            coord_max,
        }
    }

    /// Describe an axis by its sampled values; only the count and the two
    /// end values are kept
    pub fn from_values(values: &[f64], name: impl Into<String>, unit: impl Into<String>) -> Self {
        let first = values.first().copied().unwrap_or(0.0);
        let last = values.last().copied().unwrap_or(first);
        Self::new(values.len(), name, unit, first, last)
    }

    /// Describe an axis by count, first value and step
    pub fn from_step(
        num_samples: usize,
        first: f64,
        step: f64,
        name: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        let last = first + num_samples.saturating_sub(1) as f64 * step;
        Self::new(num_samples, name, unit, first, last)
    }

    /// Parse the axis name
    pub fn axis_name(&self) -> Result<AxisName> {
        self.name.parse()
    }

    /// Annotated value of the first sample
    pub fn first(&self) -> f64 {
        self.coord_min
    }

    /// Get the step size between samples
    pub fn step_size(&self) -> f64 {
        if self.num_samples <= 1 {
            0.0
        } else {
            (self.coord_max - self.coord_min) / (self.num_samples - 1) as f64
        }
    }

    /// Step used to scale between index and annotation. A single-sample
    /// axis has no step; only index 0 exists on it, so any non-zero
    /// stride maps it consistently.
    pub fn stride(&self) -> f64 {
        if self.num_samples <= 1 {
            1.0
        } else {
            self.step_size()
        }
    }

    /// Index of the last sample
    pub fn max_index(&self) -> usize {
        self.num_samples.saturating_sub(1)
    }

    /// Convert sample index to coordinate
    pub fn index_to_coord(&self, index: usize) -> f64 {
        self.coord_min + index as f64 * self.step_size()
    }

    /// Fractional sample position of an annotated coordinate
    pub fn coord_to_position(&self, coord: f64) -> f64 {
        (coord - self.coord_min) / self.stride()
    }

    /// Whether the coordinate falls within half a step of the sampled range
    pub fn inrange(&self, coord: f64) -> bool {
        let half = 0.5 * self.stride().abs();
        let (low, high) = if self.coord_min <= self.coord_max {
            (self.coord_min, self.coord_max)
        } else {
            (self.coord_max, self.coord_min)
        };
        low - half <= coord && coord < high + half
    }

    /// Exact index of an annotated value. The value must sit on a sample
    /// (within `tolerance` steps) and inside the sampled range.
    pub fn annotation_to_index(&self, value: f64, tolerance: f64) -> Result<usize> {
        let position = self.coord_to_position(value);
        let index = snap_to_integer(position, tolerance).ok_or_else(|| {
            GeometryError::OutOfRange(format!(
                "{} {} is not aligned to step {} from {}",
                self.name,
                value,
                self.step_size(),
                self.coord_min
            ))
        })?;

        if index < 0.0 || index > self.max_index() as f64 {
            return Err(GeometryError::OutOfRange(format!(
                "{} {} outside [{}, {}]",
                self.name, value, self.coord_min, self.coord_max
            )));
        }
        Ok(index as usize)
    }
}

/// Zero-based logical position on the survey grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexPoint {
    pub i: i64,
    pub j: i64,
}

impl IndexPoint {
    pub fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }
}

impl From<IndexPoint> for [i64; 2] {
    fn from(p: IndexPoint) -> Self {
        [p.i, p.j]
    }
}

/// Fractional position in index space, as produced by inverse mappings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPosition {
    pub i: f64,
    pub j: f64,
}

impl IndexPosition {
    pub fn new(i: f64, j: f64) -> Self {
        Self { i, j }
    }

    /// Snap to the nearest grid node if within `tolerance` on both axes
    pub fn to_index(&self, tolerance: f64) -> Option<IndexPoint> {
        let i = snap_to_integer(self.i, tolerance)?;
        let j = snap_to_integer(self.j, tolerance)?;
        Some(IndexPoint::new(i as i64, j as i64))
    }
}

impl From<IndexPoint> for IndexPosition {
    fn from(p: IndexPoint) -> Self {
        Self::new(p.i as f64, p.j as f64)
    }
}

/// Inline/crossline numbers of a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotatedPoint {
    pub inline: i64,
    pub crossline: i64,
}

impl AnnotatedPoint {
    pub fn new(inline: i64, crossline: i64) -> Self {
        Self { inline, crossline }
    }
}

impl From<AnnotatedPoint> for [i64; 2] {
    fn from(p: AnnotatedPoint) -> Self {
        [p.inline, p.crossline]
    }
}

/// Projected (CDP/UTM) position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for WorldPoint {
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<WorldPoint> for [f64; 2] {
    fn from(p: WorldPoint) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
