use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::domain::{Parameter, ParameterSet, PotabilityLabel, PredictionResult};
use super::recommend::Recommendation;
use super::risk::RiskFactor;

pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Terminal artifact of one assessment request. Created once, read-only
/// thereafter, safe to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRecord {
    pub parameters: ParameterSet,
    pub prediction: PredictionResult,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
    /// max(probabilities) as a percentage.
    pub confidence_pct: f64,
    pub risk_count: usize,
    pub generated_at: NaiveDateTime,
}

impl AssessmentRecord {
    /// Aggregate the pipeline outputs. Never mutates its inputs; the clock
    /// is an argument so packaging stays testable.
    pub fn package(
        parameters: ParameterSet,
        prediction: PredictionResult,
        risk_factors: Vec<RiskFactor>,
        recommendations: Vec<Recommendation>,
        generated_at: NaiveDateTime,
    ) -> Self {
        let confidence_pct = prediction.probabilities.max() * 100.0;
        let risk_count = risk_factors.len();

        Self {
            parameters,
            prediction,
            risk_factors,
            recommendations,
            confidence_pct,
            risk_count,
            generated_at,
        }
    }

    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence_pct)
    }

    /// Gauge projection: the potable-class probability in 0.0-1.0.
    pub fn gauge_value(&self) -> f64 {
        self.prediction.probabilities.potable
    }

    /// Radar projection: each present measurement normalized against its
    /// guideline ideal midpoint so the nine axes share a comparison domain.
    pub fn radar_series(&self) -> Vec<RadarEntry> {
        Parameter::ALL
            .into_iter()
            .filter_map(|parameter| {
                self.parameters.get(parameter).map(|observed| RadarEntry {
                    parameter,
                    label: parameter.label(),
                    observed,
                    normalized: observed / ideal_midpoint(parameter),
                })
            })
            .collect()
    }

    /// Flat row suitable for tabular export.
    pub fn export_row(&self) -> ExportRow {
        let joined = if self.risk_factors.is_empty() {
            "None".to_string()
        } else {
            self.risk_factors
                .iter()
                .map(RiskFactor::message)
                .collect::<Vec<_>>()
                .join("; ")
        };

        ExportRow {
            ph: self.parameters.ph,
            hardness: self.parameters.hardness,
            solids: self.parameters.solids,
            chloramines: self.parameters.chloramines,
            sulfate: self.parameters.sulfate,
            conductivity: self.parameters.conductivity,
            organic_carbon: self.parameters.organic_carbon,
            trihalomethanes: self.parameters.trihalomethanes,
            turbidity: self.parameters.turbidity,
            prediction: self.prediction.label.display().to_string(),
            confidence: self.confidence_display(),
            safe_probability: format!("{:.3}", self.prediction.probabilities.potable),
            unsafe_probability: format!("{:.3}", self.prediction.probabilities.not_potable),
            risk_factors_count: self.risk_count,
            risk_factors: joined,
            timestamp: self.generated_at.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn is_safe(&self) -> bool {
        self.prediction.label == PotabilityLabel::Safe
    }
}

/// Guideline midpoint used as the radar reference domain. A reading equal to
/// its midpoint lands at 1.0 on that axis.
fn ideal_midpoint(parameter: Parameter) -> f64 {
    match parameter {
        Parameter::Ph => 7.5,
        Parameter::Hardness => 150.0,
        Parameter::Solids => 250.0,
        Parameter::Chloramines => 2.0,
        Parameter::Sulfate => 125.0,
        Parameter::Conductivity => 400.0,
        Parameter::OrganicCarbon => 7.0,
        Parameter::Trihalomethanes => 40.0,
        Parameter::Turbidity => 2.5,
    }
}

/// One radar axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarEntry {
    pub parameter: Parameter,
    pub label: &'static str,
    pub observed: f64,
    pub normalized: f64,
}

/// One feature's contribution weight, for the importance ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImportanceEntry {
    pub feature: &'static str,
    pub weight: f64,
}

/// Importance projection: descending (feature, weight) pairs when the
/// artifact exposes importances, otherwise empty. Absence is representable,
/// not an error.
pub fn importance_ranking(importances: Option<&[f64]>) -> Vec<ImportanceEntry> {
    let Some(weights) = importances else {
        return Vec::new();
    };

    let mut entries: Vec<ImportanceEntry> = Parameter::ALL
        .iter()
        .zip(weights)
        .map(|(parameter, weight)| ImportanceEntry {
            feature: parameter.feature_name(),
            weight: *weight,
        })
        .collect();

    entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    entries
}

/// Flat export schema; column names are a boundary contract and must not
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "ph")]
    pub ph: Option<f64>,
    #[serde(rename = "Hardness")]
    pub hardness: Option<f64>,
    #[serde(rename = "Solids")]
    pub solids: Option<f64>,
    #[serde(rename = "Chloramines")]
    pub chloramines: Option<f64>,
    #[serde(rename = "Sulfate")]
    pub sulfate: Option<f64>,
    #[serde(rename = "Conductivity")]
    pub conductivity: Option<f64>,
    #[serde(rename = "Organic_carbon")]
    pub organic_carbon: Option<f64>,
    #[serde(rename = "Trihalomethanes")]
    pub trihalomethanes: Option<f64>,
    #[serde(rename = "Turbidity")]
    pub turbidity: Option<f64>,
    #[serde(rename = "Prediction")]
    pub prediction: String,
    #[serde(rename = "Confidence")]
    pub confidence: String,
    #[serde(rename = "Safe_Probability")]
    pub safe_probability: String,
    #[serde(rename = "Unsafe_Probability")]
    pub unsafe_probability: String,
    #[serde(rename = "Risk_Factors_Count")]
    pub risk_factors_count: usize,
    #[serde(rename = "Risk_Factors")]
    pub risk_factors: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}
