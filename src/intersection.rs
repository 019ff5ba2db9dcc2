//! Overlap of two surveys sharing one grid

use crate::config::GeometryConfig;
use crate::error::{GeometryError, Result};
use crate::grid::GridModel;
use crate::metadata::ImportInfo;
use crate::survey::Survey;
use crate::types::{AxisDescriptor, IndexPoint};
use crate::utils::{approx_eq, format_point, snap_to_integer};
use log::debug;

/// Relative tolerance for comparing two grids
const GRID_TOLERANCE: f64 = 1e-9;

/// The lines two surveys have in common
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// Survey covering exactly the shared lines and samples
    pub survey: Survey,
    /// Index in the first survey of the intersection's (0, 0)
    pub offset_a: IndexPoint,
    /// Index in the second survey of the intersection's (0, 0)
    pub offset_b: IndexPoint,
    /// First shared sample in each survey
    pub sample_offsets: (usize, usize),
}

/// Intersect two surveys.
///
/// Both must share CRS and grid, and for each axis the same name, unit and
/// step. First lines may differ, but only by whole steps.
pub fn intersect(a: &Survey, b: &Survey) -> Result<Intersection> {
    intersect_with_config(a, b, &GeometryConfig::default())
}

/// Intersect two surveys, aligning lines under `config`
pub fn intersect_with_config(
    a: &Survey,
    b: &Survey,
    config: &GeometryConfig,
) -> Result<Intersection> {
    if a.crs() != b.crs() {
        return Err(GeometryError::GridMismatch(format!(
            "coordinate reference system (CRS) mismatch: {} versus {}",
            a.crs(),
            b.crs()
        )));
    }

    let (grid_a, grid_b) = (annotation_grid(a), annotation_grid(b));
    let scale = [grid_a.origin(), grid_b.origin()]
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(1.0, f64::max);
    if !grid_a.approx_eq(&grid_b, GRID_TOLERANCE * scale) {
        let (oa, ob) = (grid_a.origin(), grid_b.origin());
        return Err(GeometryError::GridMismatch(format!(
            "grids differ: origin {} versus {}",
            format_point(oa.x, oa.y),
            format_point(ob.x, ob.y)
        )));
    }

    let tolerance = config.alignment_tolerance;
    let (axes_a, axes_b) = (a.axes(), b.axes());
    let (inline, il_a, il_b) = shared_axis(&axes_a.inline, &axes_b.inline, tolerance)?;
    let (crossline, xl_a, xl_b) = shared_axis(&axes_a.crossline, &axes_b.crossline, tolerance)?;
    let (sample, s_a, s_b) = shared_axis(&axes_a.sample, &axes_b.sample, tolerance)?;

    // Grid coordinates are line-number offsets from the first line
    let grid = a.grid().reanchored(
        inline.first() - axes_a.inline.first(),
        crossline.first() - axes_a.crossline.first(),
    );

    let info = ImportInfo {
        crs: a.crs().to_string(),
        input_file_name: format!("{} & {}", a.info().input_file_name, b.info().input_file_name),
        import_time_stamp: a.info().import_time_stamp.max(b.info().import_time_stamp),
    };

    let survey = Survey::with_config(&[inline, crossline, sample], grid, info, config)?;
    debug!(
        "intersection is {} x {} x {}",
        survey.axes().inline.num_samples,
        survey.axes().crossline.num_samples,
        survey.axes().sample.num_samples
    );

    Ok(Intersection {
        survey,
        offset_a: IndexPoint::new(il_a as i64, xl_a as i64),
        offset_b: IndexPoint::new(il_b as i64, xl_b as i64),
        sample_offsets: (s_a, s_b),
    })
}

/// Grid re-anchored at annotation (0, 0), comparable across surveys
fn annotation_grid(survey: &Survey) -> GridModel {
    survey.grid().reanchored(
        -survey.axes().inline.first(),
        -survey.axes().crossline.first(),
    )
}

/// Overlap of two axes plus the index of its first sample in each
fn shared_axis(
    a: &AxisDescriptor,
    b: &AxisDescriptor,
    tolerance: f64,
) -> Result<(AxisDescriptor, usize, usize)> {
    if a.name != b.name {
        return Err(GeometryError::GridMismatch(format!(
            "axis name mismatch: {} versus {}",
            a.name, b.name
        )));
    }
    if a.unit != b.unit {
        return Err(GeometryError::GridMismatch(format!(
            "unit mismatch in axis {}: {} versus {}",
            a.name, a.unit, b.unit
        )));
    }
    if !approx_eq(a.step_size(), b.step_size(), tolerance * a.stride().abs()) {
        return Err(GeometryError::GridMismatch(format!(
            "stepsize mismatch in axis {}: {} versus {}",
            a.name,
            a.step_size(),
            b.step_size()
        )));
    }

    let offset = (b.first() - a.first()) / a.stride();
    if snap_to_integer(offset, tolerance).is_none() {
        return Err(GeometryError::NoSharedLines(format!(
            "surveys contain no shared line numbers in axis {}",
            a.name
        )));
    }

    let min = a.coord_min.max(b.coord_min);
    let max = a.coord_max.min(b.coord_max);
    if max < min {
        return Err(GeometryError::NoSharedLines(format!(
            "axis {} ranges [{}, {}] and [{}, {}] do not overlap",
            a.name, a.coord_min, a.coord_max, b.coord_min, b.coord_max
        )));
    }

    let count = 1 + ((max - min) / a.stride()).round() as usize;
    let axis = AxisDescriptor::new(count, a.name.clone(), a.unit.clone(), min, max);
    let start_a = a.annotation_to_index(min, tolerance)?;
    let start_b = b.annotation_to_index(min, tolerance)?;
    Ok((axis, start_a, start_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{AnnotatedPoint, WorldPoint};
    use nalgebra::Vector2;

    // Both cubes sit on one grid with world (0, 0) at annotation (0, 0)
    fn cube(il: (f64, usize), xl: (f64, usize), samples: (f64, usize)) -> Survey {
        let inline = AxisDescriptor::from_step(il.1, il.0, 3.0, "Inline", "unitless");
        let crossline = AxisDescriptor::from_step(xl.1, xl.0, 2.0, "Crossline", "unitless");
        let sample = AxisDescriptor::from_step(samples.1, samples.0, 4.0, "Sample", "ms");
        let inline_spacing = Vector2::new(3.0, 2.0);
        let xline_spacing = Vector2::new(-2.0, 3.0);
        let origin = inline_spacing * il.0 + xline_spacing * xl.0;
        let grid = GridModel::new(WorldPoint::new(origin.x, origin.y), inline_spacing, xline_spacing)
            .unwrap();
        Survey::new(
            &[inline, crossline, sample],
            grid,
            ImportInfo::new("utmXX", "cube.segy"),
        )
        .unwrap()
    }

    #[test]
    fn test_shifted_cubes() {
        let a = cube((3.0, 8), (10.0, 2), (4.0, 32));
        let b = cube((15.0, 8), (8.0, 5), (20.0, 40));

        let result = intersect(&a, &b).unwrap();
        let axes = result.survey.axes();
        assert_eq!((axes.inline.coord_min, axes.inline.coord_max), (15.0, 24.0));
        assert_eq!(axes.inline.num_samples, 4);
        assert_eq!((axes.crossline.coord_min, axes.crossline.coord_max), (10.0, 12.0));
        assert_eq!((axes.sample.coord_min, axes.sample.coord_max), (20.0, 128.0));
        assert_eq!(axes.sample.num_samples, 28);

        assert_eq!(result.offset_a, IndexPoint::new(4, 0));
        assert_eq!(result.offset_b, IndexPoint::new(0, 1));
        assert_eq!(result.sample_offsets, (4, 0));

        // (0, 0) of the intersection is the same world point in all three
        let world = result.survey.converter().index_to_world(IndexPoint::new(0, 0));
        let in_a = a.converter().index_to_world(result.offset_a);
        let in_b = b.converter().index_to_world(result.offset_b);
        assert!((world.x - in_a.x).abs() < 1e-9 && (world.y - in_a.y).abs() < 1e-9);
        assert!((world.x - in_b.x).abs() < 1e-9 && (world.y - in_b.y).abs() < 1e-9);

        let corner = result
            .survey
            .converter()
            .index_to_annotated(IndexPoint::new(3, 1))
            .unwrap();
        assert_eq!(corner, AnnotatedPoint::new(24, 12));
    }

    #[test]
    fn test_intersection_is_symmetric_in_extent() {
        let a = cube((3.0, 8), (10.0, 2), (4.0, 32));
        let b = cube((15.0, 8), (8.0, 5), (20.0, 40));
        let ab = intersect(&a, &b).unwrap();
        let ba = intersect(&b, &a).unwrap();
        assert_eq!(ab.survey.axes(), ba.survey.axes());
        assert_eq!(ab.offset_a, ba.offset_b);
    }

    #[test]
    fn test_misaligned_lines() {
        let a = cube((3.0, 8), (10.0, 2), (4.0, 32));
        let b = cube((4.0, 8), (10.0, 2), (4.0, 32));
        let err = intersect(&a, &b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSharedLines);
    }

    #[test]
    fn test_disjoint_ranges() {
        let a = cube((3.0, 2), (10.0, 2), (4.0, 32));
        let b = cube((30.0, 2), (10.0, 2), (4.0, 32));
        let err = intersect(&a, &b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSharedLines);
    }

    #[test]
    fn test_grid_mismatch() {
        let a = cube((3.0, 8), (10.0, 2), (4.0, 32));

        let shifted = Survey::new(
            &a.axes().ordered().map(Clone::clone),
            a.grid().reanchored(0.5, 0.0),
            a.info().clone(),
        )
        .unwrap();
        let err = intersect(&a, &shifted).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GridMismatch);

        let other_crs = Survey::new(
            &a.axes().ordered().map(Clone::clone),
            *a.grid(),
            ImportInfo::new("utmYY", "cube.segy"),
        )
        .unwrap();
        let err = intersect(&a, &other_crs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GridMismatch);
    }

    #[test]
    fn test_axis_mismatch() {
        let a = cube((3.0, 8), (10.0, 2), (4.0, 32));
        let mut axes = a.axes().ordered().map(Clone::clone);
        axes[2].unit = "s".to_string();
        let b = Survey::new(&axes, *a.grid(), a.info().clone()).unwrap();
        let err = intersect(&a, &b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GridMismatch);
    }
}
