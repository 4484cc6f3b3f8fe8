use super::common::*;
use crate::assessment::domain::{Parameter, ParameterSet};
use crate::assessment::preprocess::{preprocess, validate, PreprocessError, SchemaError, ValidationError};
use crate::assessment::registry::PotabilityModel;

#[test]
fn complete_sample_preprocesses_deterministically() {
    let model = artifacts();
    let sample = clean_sample();

    let first = preprocess(&sample, &model).expect("preprocess succeeds");
    let second = preprocess(&sample, &model).expect("preprocess succeeds");

    assert_eq!(first, second);
    assert_eq!(first.len(), Parameter::ALL.len());
    assert!(first.values().iter().all(|value| value.is_finite()));
}

#[test]
fn missing_fields_scale_to_the_fitted_center() {
    let model = artifacts();
    let sample = ParameterSet {
        ph: Some(7.0),
        ..ParameterSet::default()
    };

    let vector = preprocess(&sample, &model).expect("preprocess succeeds");

    // The bundled imputer fills with the scaler center, so every imputed
    // slot lands exactly on zero after scaling.
    for (index, value) in vector.values().iter().enumerate() {
        if index == 0 {
            continue;
        }
        assert_eq!(*value, 0.0, "imputed slot {index} should scale to zero");
    }
}

#[test]
fn rejects_non_finite_measurement() {
    let sample = ParameterSet {
        sulfate: Some(f64::NAN),
        ..clean_sample()
    };

    match validate(&sample) {
        Err(ValidationError::NonFinite { parameter, .. }) => {
            assert_eq!(parameter, Parameter::Sulfate.label());
        }
        other => panic!("expected non-finite rejection, got {other:?}"),
    }
}

#[test]
fn rejects_physically_impossible_negative() {
    let sample = ParameterSet {
        turbidity: Some(-1.0),
        ..clean_sample()
    };

    match validate(&sample) {
        Err(ValidationError::Negative { parameter, value }) => {
            assert_eq!(parameter, Parameter::Turbidity.label());
            assert_eq!(value, -1.0);
        }
        other => panic!("expected negative rejection, got {other:?}"),
    }
}

#[test]
fn rejects_ph_above_scale() {
    let sample = ParameterSet {
        ph: Some(15.2),
        ..clean_sample()
    };

    assert!(matches!(
        validate(&sample),
        Err(ValidationError::PhOutOfDomain { .. })
    ));
}

#[test]
fn missing_fields_are_not_validation_errors() {
    assert!(validate(&ParameterSet::default()).is_ok());
}

#[test]
fn mismatched_feature_order_is_a_schema_error() {
    let mut model = artifacts();
    model.feature_names.swap(0, 8);

    match preprocess(&clean_sample(), &model) {
        Err(PreprocessError::Schema(SchemaError::FeatureOrder { position, .. })) => {
            assert_eq!(position, 0);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn scaling_never_reorders_features() {
    let model = artifacts();
    let mut sample = clean_sample();
    // Push turbidity far from center; only the final slot should move.
    sample.turbidity = Some(40.0);

    let baseline = preprocess(&clean_sample(), &model).expect("preprocess succeeds");
    let shifted = preprocess(&sample, &model).expect("preprocess succeeds");

    assert_eq!(baseline.values()[..8], shifted.values()[..8]);
    assert!(shifted.values()[8] > baseline.values()[8]);
}

#[test]
fn imputation_is_deterministic_per_artifact() {
    let model = artifacts();
    let ordered = ParameterSet::default().ordered_values();

    assert_eq!(model.impute(&ordered), model.impute(&ordered));
}
