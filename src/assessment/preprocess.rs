use super::domain::{Parameter, ParameterSet, PreprocessedVector};
use super::registry::PotabilityModel;

/// Upper bound of the pH scale; values above it are physically impossible.
const PH_DOMAIN_MAX: f64 = 14.0;

/// The parameter set does not line up with the artifact's fitted feature
/// list. Fatal for the request; fields are never silently dropped.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("artifacts were fitted on {expected} features, parameter set carries {found}")]
    FeatureArity { expected: usize, found: usize },
    #[error("feature order mismatch at position {position}: artifacts expect '{expected}', parameter set carries '{found}'")]
    FeatureOrder {
        position: usize,
        expected: String,
        found: &'static str,
    },
}

/// A present measurement is non-finite or physically impossible. Rejected
/// before imputation so bad readings are never laundered into the model.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{parameter} must be a finite number, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },
    #[error("{parameter} cannot be negative, got {value}")]
    Negative { parameter: &'static str, value: f64 },
    #[error("pH must lie within 0-{PH_DOMAIN_MAX}, got {value}")]
    PhOutOfDomain { value: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Reject non-finite and physically impossible measurements. Missing fields
/// pass; they are the imputer's job, not a validation failure.
pub fn validate(parameters: &ParameterSet) -> Result<(), ValidationError> {
    for parameter in Parameter::ALL {
        let Some(value) = parameters.get(parameter) else {
            continue;
        };

        if !value.is_finite() {
            return Err(ValidationError::NonFinite {
                parameter: parameter.label(),
                value,
            });
        }

        if value < 0.0 {
            return Err(ValidationError::Negative {
                parameter: parameter.label(),
                value,
            });
        }

        if parameter == Parameter::Ph && value > PH_DOMAIN_MAX {
            return Err(ValidationError::PhOutOfDomain { value });
        }
    }

    Ok(())
}

/// Validate, impute, and scale one sample into the vector the classifier
/// expects. Pure function of (parameters, artifacts); deterministic for a
/// given artifact bundle.
pub fn preprocess(
    parameters: &ParameterSet,
    model: &dyn PotabilityModel,
) -> Result<PreprocessedVector, PreprocessError> {
    check_schema(model)?;
    validate(parameters)?;

    let ordered = parameters.ordered_values();
    let imputed = model.impute(&ordered);
    debug_assert_eq!(imputed.len(), ordered.len());
    let scaled = model.scale(&imputed);

    Ok(PreprocessedVector::new(scaled))
}

fn check_schema(model: &dyn PotabilityModel) -> Result<(), SchemaError> {
    let fitted = model.feature_names();
    if fitted.len() != Parameter::ALL.len() {
        return Err(SchemaError::FeatureArity {
            expected: fitted.len(),
            found: Parameter::ALL.len(),
        });
    }

    for (position, (fitted_name, parameter)) in fitted.iter().zip(Parameter::ALL).enumerate() {
        if fitted_name != parameter.feature_name() {
            return Err(SchemaError::FeatureOrder {
                position,
                expected: fitted_name.clone(),
                found: parameter.feature_name(),
            });
        }
    }

    Ok(())
}
