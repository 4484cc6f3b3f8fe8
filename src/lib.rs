//! Drinking-water potability assessment service.
//!
//! The library is organized around a single synchronous pipeline: a
//! [`assessment::ParameterSet`] of nine physicochemical measurements flows
//! through validation, imputation, and scaling into the classifier artifact,
//! while an independent rule engine checks the raw measurements against
//! regulatory guidelines. The two signals are only combined by the
//! recommendation synthesizer, and everything is packaged into an immutable
//! [`assessment::AssessmentRecord`] suitable for export and visualization.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
