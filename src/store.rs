//! Persisted surveys - create once at ingest, open for every request

use crate::config::GeometryConfig;
use crate::error::{GeometryError, Result};
use crate::io::{create_storage, SurveyStorage};
use crate::metadata::SurveyMetadata;
use crate::survey::{Survey, SurveyDocument};
use crate::validate::Validator;
use futures::future::try_join_all;
use log::info;
use std::sync::Arc;

/// Definition document, read back on open
pub const SURVEY_DOCUMENT: &str = "survey.json";

/// Exposed metadata document
pub const METADATA_DOCUMENT: &str = "metadata.json";

/// Handle to a survey held in storage
pub struct SurveyStore {
    url: String,
    survey: Arc<Survey>,
    storage: Arc<dyn SurveyStorage>,
}

impl SurveyStore {
    /// Validate and persist a survey at `url`, overwriting any previous one
    pub async fn create(url: impl Into<String>, survey: &Survey) -> Result<Self> {
        Self::create_with_config(url, survey, &GeometryConfig::default()).await
    }

    /// Validate under `config` and persist a survey at `url`
    pub async fn create_with_config(
        url: impl Into<String>,
        survey: &Survey,
        config: &GeometryConfig,
    ) -> Result<Self> {
        let url = url.into();
        let storage: Arc<dyn SurveyStorage> = Arc::from(create_storage(&url)?);

        config.validate()?;
        let validator = Validator::new(*config);
        let axes: Vec<_> = survey.axes().ordered().into_iter().cloned().collect();
        validator.validate_axes(&axes)?;
        validator.validate_grid(survey.grid())?;

        let survey = survey.clone();
        let definition = serde_json::to_vec_pretty(&survey)?;
        let metadata = serde_json::to_vec_pretty(&survey.metadata())?;
        storage.write(SURVEY_DOCUMENT, &definition).await?;
        storage.write(METADATA_DOCUMENT, &metadata).await?;

        info!(
            "stored survey {} from {} ({} x {} x {})",
            url,
            survey.info().input_file_name,
            survey.axes().inline.num_samples,
            survey.axes().crossline.num_samples,
            survey.axes().sample.num_samples
        );

        Ok(Self {
            url,
            survey: Arc::new(survey),
            storage,
        })
    }

    /// Open a stored survey, re-validating its definition
    pub async fn open(url: impl Into<String>) -> Result<Self> {
        Self::open_with_config(url, &GeometryConfig::default()).await
    }

    /// Open a stored survey, re-validating its definition under `config`
    pub async fn open_with_config(url: impl Into<String>, config: &GeometryConfig) -> Result<Self> {
        let url = url.into();
        let storage: Arc<dyn SurveyStorage> = Arc::from(create_storage(&url)?);

        if !storage.exists(SURVEY_DOCUMENT).await? {
            return Err(GeometryError::NotFound(format!(
                "no survey definition at {}",
                url
            )));
        }

        let bytes = storage.read(SURVEY_DOCUMENT).await?;
        let document: SurveyDocument = serde_json::from_slice(&bytes)?;
        let survey = Survey::from_document(document, config)?;
        info!("opened survey {}", url);

        Ok(Self {
            url,
            survey: Arc::new(survey),
            storage,
        })
    }

    /// Open several stored surveys concurrently
    pub async fn open_all<I, S>(urls: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        try_join_all(urls.into_iter().map(Self::open)).await
    }

    /// Location the survey was created at or opened from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shared handle to the survey
    pub fn survey(&self) -> Arc<Survey> {
        Arc::clone(&self.survey)
    }

    /// Metadata document of the in-memory survey
    pub fn metadata(&self) -> SurveyMetadata {
        self.survey.metadata()
    }

    /// Read the metadata document as it was written
    pub async fn stored_metadata(&self) -> Result<SurveyMetadata> {
        let bytes = self.storage.read(METADATA_DOCUMENT).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
