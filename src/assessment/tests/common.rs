use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::assessment::domain::{ClassProbabilities, ParameterSet, PotabilityLabel, PredictionResult};
use crate::assessment::registry::PotabilityArtifacts;
use crate::assessment::service::AssessmentService;

pub(super) fn artifacts() -> PotabilityArtifacts {
    PotabilityArtifacts::bundled()
}

pub(super) fn build_service() -> AssessmentService {
    AssessmentService::new(Arc::new(artifacts()))
}

/// Every measurement present and inside its guideline band.
pub(super) fn clean_sample() -> ParameterSet {
    ParameterSet {
        ph: Some(7.0),
        hardness: Some(200.0),
        solids: Some(300.0),
        chloramines: Some(3.0),
        sulfate: Some(200.0),
        conductivity: Some(400.0),
        organic_carbon: Some(10.0),
        trihalomethanes: Some(50.0),
        turbidity: Some(3.0),
    }
}

/// Acidic, cloudy sample with the other measurements unreported.
pub(super) fn contaminated_sample() -> ParameterSet {
    ParameterSet {
        ph: Some(5.0),
        turbidity: Some(8.0),
        ..ParameterSet::default()
    }
}

/// Within guidelines except hardness; chloramines below the advisory cutoff.
pub(super) fn hard_water_sample() -> ParameterSet {
    ParameterSet {
        hardness: Some(350.0),
        chloramines: Some(1.0),
        ..clean_sample()
    }
}

pub(super) fn safe_prediction() -> PredictionResult {
    PredictionResult {
        label: PotabilityLabel::Safe,
        probabilities: ClassProbabilities {
            not_potable: 0.2,
            potable: 0.8,
        },
    }
}

pub(super) fn unsafe_prediction() -> PredictionResult {
    PredictionResult {
        label: PotabilityLabel::Unsafe,
        probabilities: ClassProbabilities {
            not_potable: 0.9,
            potable: 0.1,
        },
    }
}

pub(super) fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 15)
        .expect("valid date")
        .and_hms_opt(10, 30, 0)
        .expect("valid time")
}
