//! Affine grid model linking grid coordinates and world space
//!
//! The model maps grid coordinates `(a, b)` to world space by
//!
//! ```text
//! world(a, b) = origin + a * inline_spacing + b * xline_spacing
//! ```
//!
//! The spacing vectors are stored directly rather than as an angle and two
//! increments. This supports skewed (non-orthogonal) surveys and avoids
//! trigonometric round-trip error. Rotation and increments are derived for
//! display only.

use crate::config::GeometryConfig;
use crate::error::{GeometryError, Result};
use crate::types::{IndexPosition, WorldPoint};
use crate::utils::format_point;
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

/// Serialized form of a [`GridModel`]; validated on conversion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub origin: [f64; 2],
    pub inline_spacing: [f64; 2],
    pub xline_spacing: [f64; 2],
}

impl GridDocument {
    /// Validate into a grid model under the given determinant tolerance
    pub fn to_model(&self, tolerance: f64) -> Result<GridModel> {
        GridModel::with_tolerance(
            WorldPoint::new(self.origin[0], self.origin[1]),
            Vector2::new(self.inline_spacing[0], self.inline_spacing[1]),
            Vector2::new(self.xline_spacing[0], self.xline_spacing[1]),
            tolerance,
        )
    }
}

/// Immutable affine description of one survey's grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridDocument", into = "GridDocument")]
pub struct GridModel {
    origin: Vector2<f64>,
    inline_spacing: Vector2<f64>,
    xline_spacing: Vector2<f64>,
}

impl GridModel {
    /// Create a grid model, rejecting parallel or degenerate spacing vectors
    pub fn new(
        origin: WorldPoint,
        inline_spacing: Vector2<f64>,
        xline_spacing: Vector2<f64>,
    ) -> Result<Self> {
        Self::with_tolerance(
            origin,
            inline_spacing,
            xline_spacing,
            GeometryConfig::DEFAULT_DETERMINANT_TOLERANCE,
        )
    }

    /// Create a grid model with an explicit relative determinant tolerance
    pub fn with_tolerance(
        origin: WorldPoint,
        inline_spacing: Vector2<f64>,
        xline_spacing: Vector2<f64>,
        tolerance: f64,
    ) -> Result<Self> {
        let model = Self {
            origin: origin.to_vector(),
            inline_spacing,
            xline_spacing,
        };

        let finite = model
            .origin
            .iter()
            .chain(inline_spacing.iter())
            .chain(xline_spacing.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(GeometryError::DegenerateGrid(
                "grid contains non-finite values".to_string(),
            ));
        }

        let matrix = model.matrix();
        let det = matrix.determinant();
        if det.abs() <= tolerance * matrix.norm_squared() {
            return Err(GeometryError::DegenerateGrid(format!(
                "inline spacing {} and crossline spacing {} are parallel (determinant {})",
                format_point(inline_spacing.x, inline_spacing.y),
                format_point(xline_spacing.x, xline_spacing.y),
                det
            )));
        }

        Ok(model)
    }

    /// Build an orthogonal grid from increments and a rotation of the inline
    /// direction, counter-clockwise in degrees
    pub fn from_polar(
        origin: WorldPoint,
        inline_increment: f64,
        xline_increment: f64,
        rotation_degrees: f64,
    ) -> Result<Self> {
        let (sin, cos) = rotation_degrees.to_radians().sin_cos();
        Self::new(
            origin,
            Vector2::new(cos, sin) * inline_increment,
            Vector2::new(-sin, cos) * xline_increment,
        )
    }

    /// Get the world position of grid coordinates (0, 0)
    pub fn origin(&self) -> WorldPoint {
        self.origin.into()
    }

    /// Get the world offset per inline number
    pub fn inline_spacing(&self) -> Vector2<f64> {
        self.inline_spacing
    }

    /// Get the world offset per crossline number
    pub fn xline_spacing(&self) -> Vector2<f64> {
        self.xline_spacing
    }

    /// The matrix `[inline_spacing | xline_spacing]`
    pub fn matrix(&self) -> Matrix2<f64> {
        Matrix2::from_columns(&[self.inline_spacing, self.xline_spacing])
    }

    /// Signed area of one grid cell
    pub fn determinant(&self) -> f64 {
        self.matrix().determinant()
    }

    /// Project grid coordinates to world space
    pub fn index_to_world(&self, a: f64, b: f64) -> WorldPoint {
        (self.origin + self.inline_spacing * a + self.xline_spacing * b).into()
    }

    /// Invert the affine law
    pub fn world_to_index(&self, world: WorldPoint) -> Result<IndexPosition> {
        let inverse = self.matrix().try_inverse().ok_or_else(|| {
            GeometryError::DegenerateGrid("spacing matrix is not invertible".to_string())
        })?;
        let grid = inverse * (world.to_vector() - self.origin);
        Ok(IndexPosition::new(grid.x, grid.y))
    }

    /// Same spacing, origin moved to the given grid coordinates
    pub fn reanchored(&self, a: f64, b: f64) -> Self {
        Self {
            origin: self.index_to_world(a, b).to_vector(),
            ..*self
        }
    }

    /// Angle of the inline direction, counter-clockwise from +x, in [0, 360)
    pub fn rotation_degrees(&self) -> f64 {
        self.inline_spacing
            .y
            .atan2(self.inline_spacing.x)
            .to_degrees()
            .rem_euclid(360.0)
    }

    /// Length of one inline step in world units
    pub fn inline_increment(&self) -> f64 {
        self.inline_spacing.norm()
    }

    /// Length of one crossline step in world units
    pub fn xline_increment(&self) -> f64 {
        self.xline_spacing.norm()
    }

    /// Component-wise comparison within an absolute tolerance
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.origin - other.origin).amax() <= tolerance
            && (self.inline_spacing - other.inline_spacing).amax() <= tolerance
            && (self.xline_spacing - other.xline_spacing).amax() <= tolerance
    }
}

impl TryFrom<GridDocument> for GridModel {
    type Error = GeometryError;

    fn try_from(doc: GridDocument) -> Result<Self> {
        doc.to_model(GeometryConfig::DEFAULT_DETERMINANT_TOLERANCE)
    }
}

impl From<GridModel> for GridDocument {
    fn from(model: GridModel) -> Self {
        Self {
            origin: [model.origin.x, model.origin.y],
            inline_spacing: [model.inline_spacing.x, model.inline_spacing.y],
            xline_spacing: [model.xline_spacing.x, model.xline_spacing.y],
        }
    }
}
