//! Conversions between Index, Annotated and World space
//!
//! The grid model's spacing vectors are expressed per unit of line number,
//! so an index step along an axis moves `step` grid units:
//!
//! ```text
//! world(i, j) = origin + (i * inline.step) * inline_spacing
//!                      + (j * xline.step)  * xline_spacing
//! ```
//!
//! where `origin` is the world position of index (0, 0). With the grid
//! model alone, `GridModel::index_to_world(a, b)` takes line-number offsets,
//! so the two agree only on axes with a step of 1. For a grid with origin
//! (2, 0) and spacings (3, 2) and (-2, 3), the grid model puts (2, 1) at
//! (6, 7), while a converter over inline step 2 puts index (2, 1) at (12, 11).

use crate::boundingbox::BoundingBox;
use crate::config::GeometryConfig;
use crate::error::{GeometryError, Result};
use crate::grid::GridModel;
use crate::types::{
    AnnotatedPoint, AxisDescriptor, CoordinateSystem, IndexPoint, IndexPosition, WorldPoint,
};
use log::trace;
use ndarray::{Array2, ArrayView2, Axis};

/// Pure coordinate conversions for one survey
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateConverter {
    grid: GridModel,
    inline: AxisDescriptor,
    crossline: AxisDescriptor,
    alignment_tolerance: f64,
}

impl CoordinateConverter {
    /// Create a converter with default tolerances
    pub fn new(grid: GridModel, inline: AxisDescriptor, crossline: AxisDescriptor) -> Self {
        Self::with_config(grid, inline, crossline, &GeometryConfig::default())
    }

    pub fn with_config(
        grid: GridModel,
        inline: AxisDescriptor,
        crossline: AxisDescriptor,
        config: &GeometryConfig,
    ) -> Self {
        Self {
            grid,
            inline,
            crossline,
            alignment_tolerance: config.alignment_tolerance,
        }
    }

    /// Get the grid model
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Get the inline axis
    pub fn inline_axis(&self) -> &AxisDescriptor {
        &self.inline
    }

    /// Get the crossline axis
    pub fn crossline_axis(&self) -> &AxisDescriptor {
        &self.crossline
    }

    /// Project an index point to world space. Defined for any index,
    /// including points outside the survey.
    pub fn index_to_world(&self, index: IndexPoint) -> WorldPoint {
        self.position_to_world(index.into())
    }

    /// Project a fractional index position to world space
    pub fn position_to_world(&self, position: IndexPosition) -> WorldPoint {
        self.grid.index_to_world(
            position.i * self.inline.stride(),
            position.j * self.crossline.stride(),
        )
    }

    /// Fractional index position of a world point.
    ///
    /// Not snapped and not bounds-checked; use
    /// [`world_to_node`](Self::world_to_node) for an index point.
    pub fn world_to_index(&self, world: WorldPoint) -> Result<IndexPosition> {
        let grid = self.grid.world_to_index(world)?;
        Ok(IndexPosition::new(
            grid.i / self.inline.stride(),
            grid.j / self.crossline.stride(),
        ))
    }

    /// Index point of a world point that lies on a node inside the survey
    pub fn world_to_node(&self, world: WorldPoint) -> Result<IndexPoint> {
        let position = self.world_to_index(world)?;
        let index = position.to_index(self.alignment_tolerance).ok_or_else(|| {
            GeometryError::OutOfRange(format!(
                "{} is not on a grid node (index ({}, {}))",
                world, position.i, position.j
            ))
        })?;
        check_index(&self.inline, index.i)?;
        check_index(&self.crossline, index.j)?;
        Ok(index)
    }

    /// Line numbers of an index point inside the survey
    pub fn index_to_annotated(&self, index: IndexPoint) -> Result<AnnotatedPoint> {
        check_index(&self.inline, index.i)?;
        check_index(&self.crossline, index.j)?;
        Ok(self.annotate(index))
    }

    /// Index of a line-number pair. Both numbers must be on the survey's
    /// lines.
    pub fn annotated_to_index(&self, annotated: AnnotatedPoint) -> Result<IndexPoint> {
        let i = self
            .inline
            .annotation_to_index(annotated.inline as f64, self.alignment_tolerance)?;
        let j = self
            .crossline
            .annotation_to_index(annotated.crossline as f64, self.alignment_tolerance)?;
        Ok(IndexPoint::new(i as i64, j as i64))
    }

    /// World position of a line-number pair on the survey's lines
    pub fn annotated_to_world(&self, annotated: AnnotatedPoint) -> Result<WorldPoint> {
        Ok(self.index_to_world(self.annotated_to_index(annotated)?))
    }

    /// Fractional line numbers of a world point
    pub fn world_to_annotation(&self, world: WorldPoint) -> Result<(f64, f64)> {
        let position = self.world_to_index(world)?;
        Ok((
            self.inline.first() + position.i * self.inline.stride(),
            self.crossline.first() + position.j * self.crossline.stride(),
        ))
    }

    /// Fractional index position of a point given in any coordinate system
    pub fn to_index_position(
        &self,
        system: CoordinateSystem,
        x: f64,
        y: f64,
    ) -> Result<IndexPosition> {
        match system {
            CoordinateSystem::Index => Ok(IndexPosition::new(x, y)),
            CoordinateSystem::Annotation => Ok(IndexPosition::new(
                self.inline.coord_to_position(x),
                self.crossline.coord_to_position(y),
            )),
            CoordinateSystem::Cdp => self.world_to_index(WorldPoint::new(x, y)),
        }
    }

    /// Batch form of [`to_index_position`](Self::to_index_position) over an
    /// `(n, 2)` array
    pub fn to_index_positions(
        &self,
        system: CoordinateSystem,
        points: ArrayView2<f64>,
    ) -> Result<Array2<f64>> {
        check_point_array(&points)?;
        trace!("converting {} {} points to index", points.nrows(), system);

        let mut out = Array2::zeros(points.raw_dim());
        for (row, mut target) in points.axis_iter(Axis(0)).zip(out.axis_iter_mut(Axis(0))) {
            let position = self.to_index_position(system, row[0], row[1])?;
            target[0] = position.i;
            target[1] = position.j;
        }
        Ok(out)
    }

    /// Project an `(n, 2)` array of index positions to world space
    pub fn positions_to_world(&self, positions: ArrayView2<f64>) -> Result<Array2<f64>> {
        check_point_array(&positions)?;
        trace!("projecting {} index positions to world", positions.nrows());

        let mut out = Array2::zeros(positions.raw_dim());
        for (row, mut target) in positions
            .axis_iter(Axis(0))
            .zip(out.axis_iter_mut(Axis(0)))
        {
            let world = self.position_to_world(IndexPosition::new(row[0], row[1]));
            target[0] = world.x;
            target[1] = world.y;
        }
        Ok(out)
    }

    /// Survey corners in index, annotated and world space
    pub fn bounding_box(&self) -> BoundingBox {
        let index = BoundingBox::index_corners(
            self.inline.max_index() as i64,
            self.crossline.max_index() as i64,
        );
        BoundingBox {
            index,
            annotation: index.map(|p| self.annotate(p)),
            world: index.map(|p| self.index_to_world(p)),
        }
    }

    fn annotate(&self, index: IndexPoint) -> AnnotatedPoint {
        AnnotatedPoint::new(
            (self.inline.first() + index.i as f64 * self.inline.step_size()).round() as i64,
            (self.crossline.first() + index.j as f64 * self.crossline.step_size()).round() as i64,
        )
    }
}

fn check_index(axis: &AxisDescriptor, index: i64) -> Result<()> {
    if index < 0 || index > axis.max_index() as i64 {
        return Err(GeometryError::OutOfRange(format!(
            "{} index {} outside [0, {}]",
            axis.name,
            index,
            axis.max_index()
        )));
    }
    Ok(())
}

fn check_point_array(points: &ArrayView2<f64>) -> Result<()> {
    if points.ncols() != 2 {
        return Err(GeometryError::InvalidDimensions(format!(
            "expected points of shape (n, 2), got (n, {})",
            points.ncols()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use nalgebra::Vector2;
    use ndarray::array;

    fn fixture() -> CoordinateConverter {
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

    fn assert_close(a: WorldPoint, b: WorldPoint) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{} != {}",
            a,
            b
        );
    }

    #[test]
    fn test_bounding_box() {
        let bbox = fixture().bounding_box();

        let ij: Vec<[i64; 2]> = bbox.index.iter().map(|&p| p.into()).collect();
        assert_eq!(ij, vec![[0, 0], [2, 0], [2, 1], [0, 1]]);

        let ilxl: Vec<[i64; 2]> = bbox.annotation.iter().map(|&p| p.into()).collect();
        assert_eq!(ilxl, vec![[1, 10], [5, 10], [5, 11], [1, 11]]);

        let expected = [(2.0, 0.0), (14.0, 8.0), (12.0, 11.0), (0.0, 3.0)];
        for (world, (x, y)) in bbox.world.iter().zip(expected) {
            assert_close(*world, WorldPoint::new(x, y));
        }
    }

    #[test]
    fn test_round_trip_index_world() {
        let converter = fixture();
        for i in 0..3 {
            for j in 0..2 {
                let world = converter.index_to_world(IndexPoint::new(i, j));
                let back = converter.world_to_index(world).unwrap();
                assert!((back.i - i as f64).abs() < 1e-6);
                assert!((back.j - j as f64).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_bijection_index_annotated() {
        let converter = fixture();
        for i in 0..3 {
            for j in 0..2 {
                let index = IndexPoint::new(i, j);
                let annotated = converter.index_to_annotated(index).unwrap();
                assert_eq!(converter.annotated_to_index(annotated).unwrap(), index);
            }
        }
        for il in [1, 3, 5] {
            for xl in [10, 11] {
                let annotated = AnnotatedPoint::new(il, xl);
                let index = converter.annotated_to_index(annotated).unwrap();
                assert_eq!(converter.index_to_annotated(index).unwrap(), annotated);
            }
        }
    }

    #[test]
    fn test_annotated_out_of_range() {
        let converter = fixture();
        for bad in [
            AnnotatedPoint::new(2, 10),
            AnnotatedPoint::new(7, 10),
            AnnotatedPoint::new(1, 12),
            AnnotatedPoint::new(-1, 10),
        ] {
            let err = converter.annotated_to_index(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange, "{:?}", bad);
        }

        let err = converter.index_to_annotated(IndexPoint::new(3, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        let err = converter.index_to_annotated(IndexPoint::new(0, -1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_world_to_node() {
        let converter = fixture();
        assert_eq!(
            converter.world_to_node(WorldPoint::new(14.0, 8.0)).unwrap(),
            IndexPoint::new(2, 0)
        );

        let off_node = converter.world_to_node(WorldPoint::new(13.0, 8.0)).unwrap_err();
        assert_eq!(off_node.kind(), ErrorKind::OutOfRange);

        // On the grid, one inline before the survey
        let outside = converter.world_to_node(WorldPoint::new(-4.0, -4.0)).unwrap_err();
        assert_eq!(outside.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_index_to_world_is_total() {
        let converter = fixture();
        let outside = converter.index_to_world(IndexPoint::new(-1, 0));
        assert_close(outside, WorldPoint::new(-4.0, -4.0));
    }

    #[test]
    fn test_annotated_world() {
        let converter = fixture();
        let world = converter.annotated_to_world(AnnotatedPoint::new(5, 11)).unwrap();
        assert_close(world, WorldPoint::new(12.0, 11.0));

        let (il, xl) = converter.world_to_annotation(WorldPoint::new(12.0, 11.0)).unwrap();
        assert!((il - 5.0).abs() < 1e-9);
        assert!((xl - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_index_position_systems() {
        let converter = fixture();

        let ij = converter.to_index_position(CoordinateSystem::Index, 1.5, 0.5).unwrap();
        assert_eq!(ij, IndexPosition::new(1.5, 0.5));

        let ilxl = converter
            .to_index_position(CoordinateSystem::Annotation, 4.0, 10.5)
            .unwrap();
        assert_eq!(ilxl, IndexPosition::new(1.5, 0.5));

        let cdp = converter.to_index_position(CoordinateSystem::Cdp, 14.0, 8.0).unwrap();
        assert!((cdp.i - 2.0).abs() < 1e-9);
        assert!(cdp.j.abs() < 1e-9);
    }

    #[test]
    fn test_batch_conversions() {
        let converter = fixture();
        let points = array![[2.0, 0.0], [14.0, 8.0], [12.0, 11.0], [0.0, 3.0]];
        let positions = converter
            .to_index_positions(CoordinateSystem::Cdp, points.view())
            .unwrap();
        let expected = array![[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]];
        assert!(positions
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| (a - b).abs() < 1e-9));

        let world = converter.positions_to_world(positions.view()).unwrap();
        assert!(world
            .iter()
            .zip(points.iter())
            .all(|(a, b)| (a - b).abs() < 1e-9));
    }

    #[test]
    fn test_batch_rejects_bad_shape() {
        let converter = fixture();
        let points = array![[1.0, 2.0, 3.0]];
        let err = converter
            .to_index_positions(CoordinateSystem::Index, points.view())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    }
}
