//! Survey metadata documents exposed to volume-metadata consumers

use crate::boundingbox::BoundingBox;
use crate::types::AxisDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provenance of an ingested survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    /// Coordinate reference system, usually WKT
    pub crs: String,

    /// Name of the file the survey was imported from
    pub input_file_name: String,

    /// Import timestamp
    pub import_time_stamp: DateTime<Utc>,
}

impl ImportInfo {
    /// Create import info stamped with the current time
    pub fn new(crs: impl Into<String>, input_file_name: impl Into<String>) -> Self {
        Self {
            crs: crs.into(),
            input_file_name: input_file_name.into(),
            import_time_stamp: Utc::now(),
        }
    }

    /// Set import timestamp
    pub fn with_time_stamp(mut self, time_stamp: DateTime<Utc>) -> Self {
        self.import_time_stamp = time_stamp;
        self
    }
}

impl Default for ImportInfo {
    fn default() -> Self {
        Self::new("", "unknown")
    }
}

/// One entry of the `axis` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisMetadata {
    pub annotation: String,
    pub min: f64,
    pub max: f64,
    pub samples: usize,
    pub stepsize: f64,
    pub unit: String,
}

impl From<&AxisDescriptor> for AxisMetadata {
    fn from(axis: &AxisDescriptor) -> Self {
        Self {
            annotation: axis.name.clone(),
            min: axis.coord_min,
            max: axis.index_to_coord(axis.max_index()),
            samples: axis.num_samples,
            stepsize: axis.step_size(),
            unit: axis.unit.clone(),
        }
    }
}

/// Bounding box corners as nested arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxMetadata {
    pub cdp: Vec<[f64; 2]>,
    pub ilxl: Vec<[i64; 2]>,
    pub ij: Vec<[i64; 2]>,
}

impl From<&BoundingBox> for BoundingBoxMetadata {
    fn from(bbox: &BoundingBox) -> Self {
        Self {
            cdp: bbox.world.iter().map(|&p| p.into()).collect(),
            ilxl: bbox.annotation.iter().map(|&p| p.into()).collect(),
            ij: bbox.index.iter().map(|&p| p.into()).collect(),
        }
    }
}

/// Complete metadata document for a survey.
///
/// `axis` holds exactly three entries in inline, crossline, sample order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyMetadata {
    pub crs: String,
    pub input_file_name: String,
    pub import_time_stamp: DateTime<Utc>,
    pub axis: Vec<AxisMetadata>,
    pub bounding_box: BoundingBoxMetadata,
}
