//! Resolution of arbitrary point lists (fences) onto the survey grid

use crate::converter::CoordinateConverter;
use crate::error::{GeometryError, Result};
use crate::types::{AxisDescriptor, CoordinateSystem};
use crate::utils::round_half_up;
use log::debug;
use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sample interpolation requested for a fence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Nearest,
    Linear,
    Cubic,
    Angular,
    Triangular,
}

impl Interpolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Linear => "linear",
            Interpolation::Cubic => "cubic",
            Interpolation::Angular => "angular",
            Interpolation::Triangular => "triangular",
        }
    }
}

impl FromStr for Interpolation {
    type Err = GeometryError;

    /// An empty string selects nearest
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "nearest" => Ok(Interpolation::Nearest),
            "linear" => Ok(Interpolation::Linear),
            "cubic" => Ok(Interpolation::Cubic),
            "angular" => Ok(Interpolation::Angular),
            "triangular" => Ok(Interpolation::Triangular),
            _ => Err(GeometryError::UnknownInterpolation(s.to_string())),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with points outside the survey
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Fail the whole request with `OutOfRange`
    #[default]
    Reject,
    /// Mark the point unfilled; the caller writes this value for it
    Fill(f32),
}

/// A fence lookup: points in some coordinate system plus sampling options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FenceRequest {
    pub coordinate_system: CoordinateSystem,
    pub interpolation: Interpolation,
    pub fill: FillPolicy,
}

impl FenceRequest {
    pub fn new(coordinate_system: CoordinateSystem, interpolation: Interpolation) -> Self {
        Self {
            coordinate_system,
            interpolation,
            fill: FillPolicy::Reject,
        }
    }

    /// Build a request from its textual selectors
    pub fn parse(coordinate_system: &str, interpolation: &str) -> Result<Self> {
        Ok(Self::new(coordinate_system.parse()?, interpolation.parse()?))
    }

    /// Report out-of-bounds points instead of rejecting them
    pub fn with_fill(mut self, value: f32) -> Self {
        self.fill = FillPolicy::Fill(value);
        self
    }

    /// Resolve an `(n, 2)` point array to index positions.
    ///
    /// With nearest interpolation positions are snapped to the closest
    /// sample, rounding half up. Other methods keep fractional positions.
    pub fn resolve(
        &self,
        converter: &CoordinateConverter,
        points: ArrayView2<f64>,
    ) -> Result<FencePlan> {
        let mut positions = converter.to_index_positions(self.coordinate_system, points)?;
        let inline = converter.inline_axis();
        let crossline = converter.crossline_axis();

        let mut inside = Vec::with_capacity(positions.nrows());
        for (n, mut row) in positions.axis_iter_mut(Axis(0)).enumerate() {
            let ok = within(inline, row[0]) && within(crossline, row[1]);
            if !ok {
                if let FillPolicy::Reject = self.fill {
                    return Err(GeometryError::OutOfRange(format!(
                        "fence point {} ({}, {}) in {} is outside the survey",
                        n, points[[n, 0]], points[[n, 1]], self.coordinate_system
                    )));
                }
            } else if self.interpolation == Interpolation::Nearest {
                row[0] = round_half_up(row[0]);
                row[1] = round_half_up(row[1]);
            }
            inside.push(ok);
        }

        let plan = FencePlan {
            positions,
            inside,
            fill: match self.fill {
                FillPolicy::Fill(value) => Some(value),
                FillPolicy::Reject => None,
            },
        };
        debug!(
            "resolved fence of {} points, {} unfilled",
            plan.len(),
            plan.unfilled().count()
        );
        Ok(plan)
    }
}

/// Index positions of a resolved fence
#[derive(Debug, Clone, PartialEq)]
pub struct FencePlan {
    /// `(n, 2)` index positions, one row per requested point
    pub positions: Array2<f64>,
    /// Whether each point lies inside the survey
    pub inside: Vec<bool>,
    /// Value to write for points outside, if filling was requested
    pub fill: Option<f32>,
}

impl FencePlan {
    pub fn len(&self) -> usize {
        self.inside.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inside.is_empty()
    }

    /// Row numbers of points the caller must fill
    pub fn unfilled(&self) -> impl Iterator<Item = usize> + '_ {
        self.inside
            .iter()
            .enumerate()
            .filter(|(_, &inside)| !inside)
            .map(|(n, _)| n)
    }
}

// [-0.5, n - 0.5)
fn within(axis: &AxisDescriptor, position: f64) -> bool {
    -0.5 <= position && position < axis.num_samples as f64 - 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::grid::GridModel;
    use crate::types::WorldPoint;
    use nalgebra::Vector2;
    use ndarray::array;

    fn converter() -> CoordinateConverter {
        let grid = GridModel::new(
            WorldPoint::new(2.0, 0.0),
            Vector2::new(3.0, 2.0),
            Vector2::new(-2.0, 3.0),
        )
        .unwrap();
        CoordinateConverter::new(
            grid,
            AxisDescriptor::from_step(3, 1.0, 2.0, "Inline", "unitless"),
            AxisDescriptor::from_step(2, 10.0, 1.0, "Crossline", "unitless"),
        )
    }

    #[test]
    fn test_parse_interpolation() {
        assert_eq!("".parse::<Interpolation>().unwrap(), Interpolation::Nearest);
        assert_eq!("Linear".parse::<Interpolation>().unwrap(), Interpolation::Linear);
        assert_eq!("CUBIC".parse::<Interpolation>().unwrap(), Interpolation::Cubic);
        let err = "bilinear".parse::<Interpolation>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownInterpolation);
    }

    #[test]
    fn test_parse_request() {
        let request = FenceRequest::parse("CDP", "").unwrap();
        assert_eq!(request.coordinate_system, CoordinateSystem::Cdp);
        assert_eq!(request.interpolation, Interpolation::Nearest);

        let err = FenceRequest::parse("xy", "linear").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCoordinateSystem);
    }

    #[test]
    fn test_nearest_rounds_half_up() {
        let request = FenceRequest::new(CoordinateSystem::Index, Interpolation::Nearest);
        let plan = request
            .resolve(&converter(), array![[0.5, 0.49], [1.5, -0.5], [2.49, 0.0]].view())
            .unwrap();
        assert_eq!(plan.positions, array![[1.0, 0.0], [2.0, 0.0], [2.0, 0.0]]);
        assert!(plan.inside.iter().all(|&b| b));
        assert_eq!(plan.fill, None);
    }

    #[test]
    fn test_linear_keeps_fraction() {
        let request = FenceRequest::new(CoordinateSystem::Annotation, Interpolation::Linear);
        let plan = request
            .resolve(&converter(), array![[4.0, 10.5]].view())
            .unwrap();
        assert_eq!(plan.positions, array![[1.5, 0.5]]);
    }

    #[test]
    fn test_boundary_rejected() {
        let request = FenceRequest::new(CoordinateSystem::Index, Interpolation::Nearest);
        for point in [[2.5, 0.0], [-0.51, 0.0], [0.0, 1.5]] {
            let err = request
                .resolve(&converter(), array![point].view())
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange, "{:?}", point);
        }
    }

    #[test]
    fn test_fill_marks_unfilled() {
        let request =
            FenceRequest::new(CoordinateSystem::Cdp, Interpolation::Nearest).with_fill(-999.25);
        let plan = request
            .resolve(&converter(), array![[14.0, 8.0], [100.0, 100.0]].view())
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.inside, vec![true, false]);
        assert_eq!(plan.unfilled().collect::<Vec<_>>(), vec![1]);
        assert_eq!(plan.fill, Some(-999.25));
        assert_eq!(plan.positions[[0, 0]], 2.0);
        assert_eq!(plan.positions[[0, 1]], 0.0);
    }
}
