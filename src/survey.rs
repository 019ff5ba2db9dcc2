//! A validated survey: axes, grid and import provenance

use crate::boundingbox::BoundingBox;
use crate::config::GeometryConfig;
use crate::converter::CoordinateConverter;
use crate::deriver::GridDeriver;
use crate::error::{GeometryError, Result};
use crate::grid::{GridDocument, GridModel};
use crate::header::HeaderSample;
use crate::metadata::{AxisMetadata, BoundingBoxMetadata, ImportInfo, SurveyMetadata};
use crate::types::AxisDescriptor;
use crate::validate::{AxisSet, Validator};
use log::debug;
use serde::{Deserialize, Serialize};

/// Geometry of one ingested survey. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurveyDocument", into = "SurveyDocument")]
pub struct Survey {
    axes: AxisSet,
    converter: CoordinateConverter,
    info: ImportInfo,
}

impl Survey {
    /// Build a survey from declared axes and a known grid
    pub fn new(axes: &[AxisDescriptor], grid: GridModel, info: ImportInfo) -> Result<Self> {
        Self::with_config(axes, grid, info, &GeometryConfig::default())
    }

    /// Build a survey under explicit tolerances
    pub fn with_config(
        axes: &[AxisDescriptor],
        grid: GridModel,
        info: ImportInfo,
        config: &GeometryConfig,
    ) -> Result<Self> {
        config.validate()?;
        let validator = Validator::new(*config);
        let axes = validator.validate_axes(axes)?;
        validator.validate_grid(&grid)?;
        Ok(Self::assemble(axes, grid, info, config))
    }

    /// Rebuild a survey from its persisted form, re-validating under `config`
    pub fn from_document(doc: SurveyDocument, config: &GeometryConfig) -> Result<Self> {
        config.validate()?;
        let grid = doc.grid.to_model(config.determinant_tolerance)?;
        Self::with_config(&doc.axes, grid, doc.info, config)
    }

    /// Ingest a survey from trace headers, deriving its grid
    pub fn from_headers(
        axes: &[AxisDescriptor],
        headers: &[HeaderSample],
        info: ImportInfo,
        config: &GeometryConfig,
    ) -> Result<Self> {
        config.validate()?;
        let axes = Validator::new(*config).validate_axes(axes)?;
        let grid = GridDeriver::new(*config).derive_from_headers(
            headers,
            &axes.inline,
            &axes.crossline,
        )?;
        debug!(
            "ingested {} with rotation {:.4} deg",
            info.input_file_name,
            grid.rotation_degrees()
        );
        Ok(Self::assemble(axes, grid, info, config))
    }

    fn assemble(axes: AxisSet, grid: GridModel, info: ImportInfo, config: &GeometryConfig) -> Self {
        let converter = CoordinateConverter::with_config(
            grid,
            axes.inline.clone(),
            axes.crossline.clone(),
            config,
        );
        Self {
            axes,
            converter,
            info,
        }
    }

    /// Get the axes, keyed by direction
    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    /// Get the grid model
    pub fn grid(&self) -> &GridModel {
        self.converter.grid()
    }

    /// Get the coordinate converter
    pub fn converter(&self) -> &CoordinateConverter {
        &self.converter
    }

    /// Get the import provenance
    pub fn info(&self) -> &ImportInfo {
        &self.info
    }

    /// Get the coordinate reference system name
    pub fn crs(&self) -> &str {
        &self.info.crs
    }

    /// Survey corners in all three coordinate spaces
    pub fn bounding_box(&self) -> BoundingBox {
        self.converter.bounding_box()
    }

    /// Metadata document for this survey
    pub fn metadata(&self) -> SurveyMetadata {
        SurveyMetadata {
            crs: self.info.crs.clone(),
            input_file_name: self.info.input_file_name.clone(),
            import_time_stamp: self.info.import_time_stamp,
            axis: self.axes.ordered().into_iter().map(AxisMetadata::from).collect(),
            bounding_box: BoundingBoxMetadata::from(&self.bounding_box()),
        }
    }
}

/// Persisted form of a [`Survey`]; re-validated on load
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDocument {
    pub axes: Vec<AxisDescriptor>,
    pub grid: GridDocument,
    #[serde(flatten)]
    pub info: ImportInfo,
}

impl TryFrom<SurveyDocument> for Survey {
    type Error = GeometryError;

    fn try_from(doc: SurveyDocument) -> Result<Self> {
        Survey::from_document(doc, &GeometryConfig::default())
    }
}

impl From<Survey> for SurveyDocument {
    fn from(survey: Survey) -> Self {
        Self {
            axes: survey.axes.ordered().into_iter().cloned().collect(),
            grid: GridDocument::from(*survey.grid()),
            info: survey.info,
        }
    }
}
