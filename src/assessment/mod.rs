//! Potability assessment pipeline.
//!
//! Control flow per request is strictly linear: a raw [`ParameterSet`] is
//! validated, imputed, and scaled into a [`PreprocessedVector`] for the
//! classifier, while the rule engine walks the same raw sample against the
//! regulatory guideline table. The classifier verdict and the rule findings
//! stay independent until [`recommend::synthesize`] combines them, and the
//! packager freezes everything into an [`AssessmentRecord`].

pub mod domain;
pub mod export;
pub mod inference;
pub mod preprocess;
pub mod recommend;
pub mod registry;
pub mod report;
pub mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ClassProbabilities, Parameter, ParameterSet, PotabilityLabel, PredictionResult,
    PreprocessedVector,
};
pub use inference::{predict, InferenceError};
pub use preprocess::{preprocess, validate, PreprocessError, SchemaError, ValidationError};
pub use recommend::{synthesize, Recommendation, RecommendationTrack, TreatmentOption, TREATMENT_GUIDE};
pub use registry::{
    ArtifactLoadError, ImputerStatistics, LinearClassifier, ModelMetadata, PotabilityArtifacts,
    PotabilityModel, ScalerTransform,
};
pub use report::{
    importance_ranking, AssessmentRecord, ExportRow, ImportanceEntry, RadarEntry,
    EXPORT_TIMESTAMP_FORMAT,
};
pub use risk::{assess_risks, assess_risks_with, RiskConfig, RiskFactor, RiskKind};
pub use router::assessment_router;
pub use service::{AssessmentError, AssessmentService};
