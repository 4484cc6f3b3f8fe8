use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use super::domain::ParameterSet;
use super::inference::{predict, InferenceError};
use super::preprocess::{preprocess, PreprocessError, SchemaError, ValidationError};
use super::recommend::synthesize;
use super::registry::{ModelMetadata, PotabilityModel};
use super::report::{importance_ranking, AssessmentRecord, ImportanceEntry};
use super::risk::{assess_risks_with, RiskConfig};

/// Facade composing the fitted artifacts with the assessment pipeline. One
/// instance serves the whole process; it holds no per-request state, so
/// concurrent assessments share it freely.
pub struct AssessmentService {
    model: Arc<dyn PotabilityModel>,
    risk_config: RiskConfig,
}

impl AssessmentService {
    pub fn new(model: Arc<dyn PotabilityModel>) -> Self {
        Self::with_risk_config(model, RiskConfig::default())
    }

    pub fn with_risk_config(model: Arc<dyn PotabilityModel>, risk_config: RiskConfig) -> Self {
        Self { model, risk_config }
    }

    /// Assess one sample, stamping the record with the local wall clock.
    pub fn assess(&self, parameters: ParameterSet) -> Result<AssessmentRecord, AssessmentError> {
        self.assess_at(parameters, Local::now().naive_local())
    }

    /// Assess one sample with a caller-supplied timestamp.
    ///
    /// The inference path and the rule engine each look at the raw sample
    /// independently; imputed values never reach the rule engine.
    pub fn assess_at(
        &self,
        parameters: ParameterSet,
        generated_at: NaiveDateTime,
    ) -> Result<AssessmentRecord, AssessmentError> {
        let vector = preprocess(&parameters, self.model.as_ref())?;
        let prediction = predict(self.model.as_ref(), &vector)?;

        let risk_factors = assess_risks_with(&parameters, &self.risk_config);
        let recommendations = synthesize(&prediction, &risk_factors, &parameters);

        debug!(
            label = prediction.label.display(),
            risks = risk_factors.len(),
            "assessment complete"
        );

        Ok(AssessmentRecord::package(
            parameters,
            prediction,
            risk_factors,
            recommendations,
            generated_at,
        ))
    }

    /// Importance projection from the artifacts; empty when the classifier
    /// does not expose per-feature weights.
    pub fn importance_ranking(&self) -> Vec<ImportanceEntry> {
        importance_ranking(self.model.feature_importances())
    }

    pub fn model_metadata(&self) -> Option<ModelMetadata> {
        self.model.metadata().cloned()
    }

    pub fn risk_config(&self) -> &RiskConfig {
        &self.risk_config
    }
}

/// Per-request pipeline failure, surfaced to the caller as typed variants.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl From<PreprocessError> for AssessmentError {
    fn from(value: PreprocessError) -> Self {
        match value {
            PreprocessError::Schema(err) => Self::Schema(err),
            PreprocessError::Validation(err) => Self::Validation(err),
        }
    }
}
