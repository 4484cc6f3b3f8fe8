use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{ClassProbabilities, Parameter};
use super::inference::InferenceError;

/// Default decision threshold applied when the artifact does not record one.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Swappable capability backing the pipeline: imputation, scaling, and
/// classification as one versioned unit. Implementations are immutable after
/// load and safe to share across concurrent requests.
pub trait PotabilityModel: Send + Sync {
    /// Ordered feature names the artifacts were fitted on.
    fn feature_names(&self) -> &[String];

    /// Replace absent measurements with the fitted per-feature statistic.
    fn impute(&self, ordered: &[Option<f64>]) -> Vec<f64>;

    /// Apply the fitted per-feature affine transform in feature order.
    fn scale(&self, ordered: &[f64]) -> Vec<f64>;

    /// Class distribution for one scaled sample.
    fn predict(&self, scaled: &[f64]) -> Result<ClassProbabilities, InferenceError>;

    /// Probability cutoff separating Safe from Unsafe.
    fn decision_threshold(&self) -> f64 {
        DEFAULT_DECISION_THRESHOLD
    }

    /// Per-feature weights when the underlying classifier exposes them.
    fn feature_importances(&self) -> Option<&[f64]>;

    /// Descriptive training metadata, when recorded.
    fn metadata(&self) -> Option<&ModelMetadata> {
        None
    }
}

/// Fitted imputer: one fill value per feature, learned at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputerStatistics {
    pub fill_values: Vec<f64>,
}

/// Fitted scaler: per-feature center and spread for the affine transform
/// `(value - center) / spread`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerTransform {
    pub center: Vec<f64>,
    pub spread: Vec<f64>,
}

/// Logistic classifier over the scaled features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub weights: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub decision_threshold: Option<f64>,
    #[serde(default)]
    pub feature_importances: Option<Vec<f64>>,
}

/// Display-only description of the fitted model; never used for branching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub training_records: u32,
}

/// The artifact bundle a model registry hands to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotabilityArtifacts {
    pub feature_names: Vec<String>,
    pub imputer: ImputerStatistics,
    pub scaler: ScalerTransform,
    pub classifier: LinearClassifier,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl PotabilityArtifacts {
    /// Load and validate a bundle from a JSON document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactLoadError> {
        let artifacts: PotabilityArtifacts = serde_json::from_reader(reader)?;
        artifacts.validated()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactLoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// The model shipped with the binary, fitted on the 3276-record
    /// potability survey the tool was originally built around.
    pub fn bundled() -> Self {
        let artifacts = Self {
            feature_names: Parameter::ALL
                .iter()
                .map(|parameter| parameter.feature_name().to_string())
                .collect(),
            imputer: ImputerStatistics {
                fill_values: vec![
                    7.0808, 196.3695, 22014.0925, 7.1223, 333.7758, 426.2051, 14.2850, 66.3963,
                    3.9668,
                ],
            },
            scaler: ScalerTransform {
                center: vec![
                    7.0808, 196.3695, 22014.0925, 7.1223, 333.7758, 426.2051, 14.2850, 66.3963,
                    3.9668,
                ],
                spread: vec![
                    1.5943, 32.8798, 8768.5708, 1.5831, 41.4168, 80.8241, 3.3082, 16.1750, 0.7804,
                ],
            },
            classifier: LinearClassifier {
                weights: vec![0.9, -0.1, -0.15, -0.2, -0.25, -0.05, -0.1, -0.3, -0.8],
                intercept: 0.6,
                decision_threshold: None,
                feature_importances: Some(vec![
                    0.3158, 0.0351, 0.0526, 0.0702, 0.0877, 0.0175, 0.0351, 0.1053, 0.2807,
                ]),
            },
            metadata: Some(ModelMetadata {
                accuracy: 0.67,
                precision: 0.66,
                recall: 0.71,
                training_records: 3276,
            }),
        };

        artifacts
            .validated()
            .expect("bundled artifacts are well formed")
    }

    fn validated(self) -> Result<Self, ArtifactLoadError> {
        let expected = self.feature_names.len();
        if expected == 0 {
            return Err(ArtifactLoadError::EmptyFeatureList);
        }

        let vectors: [(&'static str, usize); 4] = [
            ("imputer.fill_values", self.imputer.fill_values.len()),
            ("scaler.center", self.scaler.center.len()),
            ("scaler.spread", self.scaler.spread.len()),
            ("classifier.weights", self.classifier.weights.len()),
        ];
        for (vector, found) in vectors {
            if found != expected {
                return Err(ArtifactLoadError::VectorShape {
                    vector,
                    expected,
                    found,
                });
            }
        }

        if let Some(importances) = &self.classifier.feature_importances {
            if importances.len() != expected {
                return Err(ArtifactLoadError::VectorShape {
                    vector: "classifier.feature_importances",
                    expected,
                    found: importances.len(),
                });
            }
        }

        for (name, spread) in self.feature_names.iter().zip(&self.scaler.spread) {
            if !spread.is_finite() || *spread <= 0.0 {
                return Err(ArtifactLoadError::NonPositiveSpread {
                    feature: name.clone(),
                    value: *spread,
                });
            }
        }

        if let Some(threshold) = self.classifier.decision_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ArtifactLoadError::InvalidThreshold { value: threshold });
            }
        }

        Ok(self)
    }
}

impl PotabilityModel for PotabilityArtifacts {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn impute(&self, ordered: &[Option<f64>]) -> Vec<f64> {
        ordered
            .iter()
            .zip(&self.imputer.fill_values)
            .map(|(value, fill)| value.unwrap_or(*fill))
            .collect()
    }

    fn scale(&self, ordered: &[f64]) -> Vec<f64> {
        ordered
            .iter()
            .zip(self.scaler.center.iter().zip(&self.scaler.spread))
            .map(|(value, (center, spread))| (value - center) / spread)
            .collect()
    }

    fn predict(&self, scaled: &[f64]) -> Result<ClassProbabilities, InferenceError> {
        if scaled.len() != self.classifier.weights.len() {
            return Err(InferenceError::WrongArity {
                expected: self.classifier.weights.len(),
                found: scaled.len(),
            });
        }

        let score: f64 = self.classifier.intercept
            + scaled
                .iter()
                .zip(&self.classifier.weights)
                .map(|(value, weight)| value * weight)
                .sum::<f64>();

        if !score.is_finite() {
            return Err(InferenceError::NonFiniteScore);
        }

        // Monotonic logistic calibration of the decision score.
        let potable = 1.0 / (1.0 + (-score).exp());
        Ok(ClassProbabilities {
            not_potable: 1.0 - potable,
            potable,
        })
    }

    fn decision_threshold(&self) -> f64 {
        self.classifier
            .decision_threshold
            .unwrap_or(DEFAULT_DECISION_THRESHOLD)
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.classifier.feature_importances.as_deref()
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }
}

/// Startup-time artifact failures; fatal for the process.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactLoadError {
    #[error("failed to read artifact bundle: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse artifact bundle: {0}")]
    Format(#[from] serde_json::Error),
    #[error("artifact bundle lists no features")]
    EmptyFeatureList,
    #[error("artifact vector '{vector}' has length {found}, expected {expected}")]
    VectorShape {
        vector: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("scaler spread for '{feature}' must be positive and finite, got {value}")]
    NonPositiveSpread { feature: String, value: f64 },
    #[error("decision threshold must lie within [0, 1], got {value}")]
    InvalidThreshold { value: f64 },
}
