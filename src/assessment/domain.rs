use serde::{Deserialize, Serialize};

/// The nine measurements the classifier was trained on, in training order.
///
/// The order of [`Parameter::ALL`] is the canonical feature order; every
/// conversion between a [`ParameterSet`] and an ordered numeric sequence goes
/// through it and must never reorder or drop entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Ph,
    Hardness,
    Solids,
    Chloramines,
    Sulfate,
    Conductivity,
    OrganicCarbon,
    Trihalomethanes,
    Turbidity,
}

impl Parameter {
    pub const ALL: [Parameter; 9] = [
        Parameter::Ph,
        Parameter::Hardness,
        Parameter::Solids,
        Parameter::Chloramines,
        Parameter::Sulfate,
        Parameter::Conductivity,
        Parameter::OrganicCarbon,
        Parameter::Trihalomethanes,
        Parameter::Turbidity,
    ];

    /// Feature name as recorded by the fitted artifacts.
    pub const fn feature_name(self) -> &'static str {
        match self {
            Parameter::Ph => "ph",
            Parameter::Hardness => "Hardness",
            Parameter::Solids => "Solids",
            Parameter::Chloramines => "Chloramines",
            Parameter::Sulfate => "Sulfate",
            Parameter::Conductivity => "Conductivity",
            Parameter::OrganicCarbon => "Organic_carbon",
            Parameter::Trihalomethanes => "Trihalomethanes",
            Parameter::Turbidity => "Turbidity",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Parameter::Ph => "pH Level",
            Parameter::Hardness => "Hardness",
            Parameter::Solids => "Total Dissolved Solids",
            Parameter::Chloramines => "Chloramines",
            Parameter::Sulfate => "Sulfate",
            Parameter::Conductivity => "Conductivity",
            Parameter::OrganicCarbon => "Organic Carbon",
            Parameter::Trihalomethanes => "Trihalomethanes",
            Parameter::Turbidity => "Turbidity",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Parameter::Ph => "",
            Parameter::Hardness => "mg/L",
            Parameter::Solids => "ppm",
            Parameter::Chloramines => "ppm",
            Parameter::Sulfate => "mg/L",
            Parameter::Conductivity => "uS/cm",
            Parameter::OrganicCarbon => "ppm",
            Parameter::Trihalomethanes => "ug/L",
            Parameter::Turbidity => "NTU",
        }
    }
}

/// Immutable carrier for one water sample. Any field may be absent before
/// preprocessing; the rule engine treats absent fields as "cannot assess".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(default, rename = "ph")]
    pub ph: Option<f64>,
    #[serde(default, rename = "Hardness")]
    pub hardness: Option<f64>,
    #[serde(default, rename = "Solids")]
    pub solids: Option<f64>,
    #[serde(default, rename = "Chloramines")]
    pub chloramines: Option<f64>,
    #[serde(default, rename = "Sulfate")]
    pub sulfate: Option<f64>,
    #[serde(default, rename = "Conductivity")]
    pub conductivity: Option<f64>,
    #[serde(default, rename = "Organic_carbon")]
    pub organic_carbon: Option<f64>,
    #[serde(default, rename = "Trihalomethanes")]
    pub trihalomethanes: Option<f64>,
    #[serde(default, rename = "Turbidity")]
    pub turbidity: Option<f64>,
}

impl ParameterSet {
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Hardness => self.hardness,
            Parameter::Solids => self.solids,
            Parameter::Chloramines => self.chloramines,
            Parameter::Sulfate => self.sulfate,
            Parameter::Conductivity => self.conductivity,
            Parameter::OrganicCarbon => self.organic_carbon,
            Parameter::Trihalomethanes => self.trihalomethanes,
            Parameter::Turbidity => self.turbidity,
        }
    }

    /// Measurements in canonical feature order.
    pub fn ordered_values(&self) -> [Option<f64>; 9] {
        let mut values = [None; 9];
        for (slot, parameter) in values.iter_mut().zip(Parameter::ALL) {
            *slot = self.get(parameter);
        }
        values
    }

    pub fn is_complete(&self) -> bool {
        Parameter::ALL
            .iter()
            .all(|parameter| self.get(*parameter).is_some())
    }

    pub fn missing(&self) -> Vec<Parameter> {
        Parameter::ALL
            .into_iter()
            .filter(|parameter| self.get(*parameter).is_none())
            .collect()
    }
}

/// Ordered numeric sequence produced by the preprocessing stage. Owned by a
/// single inference call and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessedVector(Vec<f64>);

impl PreprocessedVector {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Binary potability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotabilityLabel {
    Safe,
    Unsafe,
}

impl PotabilityLabel {
    pub const fn display(self) -> &'static str {
        match self {
            PotabilityLabel::Safe => "Safe",
            PotabilityLabel::Unsafe => "Unsafe",
        }
    }
}

/// Two-way class distribution; components sum to 1.0 within float tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub not_potable: f64,
    pub potable: f64,
}

impl ClassProbabilities {
    pub fn max(&self) -> f64 {
        self.not_potable.max(self.potable)
    }
}

/// Classifier output for one sample; produced once and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: PotabilityLabel,
    pub probabilities: ClassProbabilities,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_training_feature_names() {
        let names: Vec<&str> = Parameter::ALL
            .iter()
            .map(|parameter| parameter.feature_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "ph",
                "Hardness",
                "Solids",
                "Chloramines",
                "Sulfate",
                "Conductivity",
                "Organic_carbon",
                "Trihalomethanes",
                "Turbidity",
            ]
        );
    }

    #[test]
    fn ordered_values_follow_canonical_order() {
        let sample = ParameterSet {
            ph: Some(7.0),
            turbidity: Some(3.0),
            ..ParameterSet::default()
        };

        let ordered = sample.ordered_values();
        assert_eq!(ordered[0], Some(7.0));
        assert_eq!(ordered[8], Some(3.0));
        assert!(ordered[1..8].iter().all(Option::is_none));
        assert!(!sample.is_complete());
        assert_eq!(sample.missing().len(), 7);
    }
}
