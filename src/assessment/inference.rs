use super::domain::{PotabilityLabel, PredictionResult, PreprocessedVector};
use super::registry::PotabilityModel;

const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// The classifier artifact returned malformed output. Fatal for the request.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("classifier expects {expected} features, received {found}")]
    WrongArity { expected: usize, found: usize },
    #[error("classifier produced a non-finite decision score")]
    NonFiniteScore,
    #[error("classifier produced an invalid distribution ({not_potable}, {potable})")]
    MalformedDistribution { not_potable: f64, potable: f64 },
}

/// Run the classifier over a preprocessed sample and derive the label.
///
/// The artifact yields a two-way distribution (the bundled family calibrates
/// its linear decision score through the logistic function); the label is
/// Safe when P(potable) reaches the artifact's decision threshold, 0.5
/// unless the bundle records a custom cutoff.
pub fn predict(
    model: &dyn PotabilityModel,
    vector: &PreprocessedVector,
) -> Result<PredictionResult, InferenceError> {
    let probabilities = model.predict(vector.values())?;

    let in_unit = |value: f64| value.is_finite() && (0.0..=1.0).contains(&value);
    let sum = probabilities.not_potable + probabilities.potable;
    if !in_unit(probabilities.not_potable)
        || !in_unit(probabilities.potable)
        || (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE
    {
        return Err(InferenceError::MalformedDistribution {
            not_potable: probabilities.not_potable,
            potable: probabilities.potable,
        });
    }

    let label = if probabilities.potable >= model.decision_threshold() {
        PotabilityLabel::Safe
    } else {
        PotabilityLabel::Unsafe
    };

    Ok(PredictionResult {
        label,
        probabilities,
    })
}
