//! VDS Geometry - survey grid geometry for seismic volumes
//!
//! Relates the three coordinate spaces of a 3D seismic survey:
//!
//! - **Index** space: zero-based `(i, j)` positions in the stored cube
//! - **Annotated** space: inline and crossline numbers as recorded in
//!   trace headers
//! - **World** space: projected CDP `(x, y)` coordinates
//!
//! # Features
//!
//! - Affine grid model stored as spacing vectors, supporting rotated and
//!   skewed surveys
//! - Grid derivation from three SEG-Y trace headers with coordinate scalar
//!   decoding
//! - Validation of axis sets and grids before use
//! - Metadata documents (axes and bounding box) for consumers
//! - Fence point resolution and intersection of surveys on a shared grid
//! - Async persistence of survey definitions on local storage
//!
//! # Example
//!
//! ```rust,ignore
//! use vds_geometry::{AxisDescriptor, GeometryConfig, HeaderSample, ImportInfo, Survey};
//!
//! # fn example(headers: &[HeaderSample]) -> vds_geometry::Result<()> {
//! let axes = [
//!     AxisDescriptor::from_step(3, 1.0, 2.0, "Inline", "unitless"),
//!     AxisDescriptor::from_step(2, 10.0, 1.0, "Crossline", "unitless"),
//!     AxisDescriptor::from_step(10, 4.0, 4.0, "Sample", "ms"),
//! ];
//! let survey = Survey::from_headers(
//!     &axes,
//!     headers,
//!     ImportInfo::new("utmXX", "survey.segy"),
//!     &GeometryConfig::default(),
//! )?;
//! let metadata = serde_json::to_string_pretty(&survey.metadata())?;
//! # Ok(())
//! # }
//! ```

pub mod boundingbox;
pub mod config;
pub mod converter;
pub mod deriver;
pub mod error;
pub mod fence;
pub mod grid;
pub mod header;
pub mod intersection;
pub mod io;
pub mod metadata;
pub mod store;
pub mod survey;
pub mod types;
pub mod utils;
pub mod validate;

// Re-exports
pub use boundingbox::BoundingBox;
pub use config::{GeometryConfig, ScalarConvention};
pub use converter::CoordinateConverter;
pub use deriver::{DerivationSamples, GridDeriver};
pub use error::{ErrorKind, GeometryError, Result};
pub use fence::{FencePlan, FenceRequest, FillPolicy, Interpolation};
pub use grid::GridModel;
pub use header::{CoordinateScalar, HeaderSample};
pub use intersection::{intersect, Intersection};
pub use io::{StorageBackend, SurveyStorage};
pub use metadata::{ImportInfo, SurveyMetadata};
pub use store::SurveyStore;
pub use survey::Survey;
pub use types::{
    AnnotatedPoint, AxisDescriptor, AxisName, AxisType, CoordinateSystem, IndexPoint,
    IndexPosition, WorldPoint,
};
pub use validate::{AxisSet, Validator};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
