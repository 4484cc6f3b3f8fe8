use serde::{Deserialize, Serialize};

use super::domain::{Parameter, ParameterSet};

/// Regulatory guideline bounds checked by the rule engine, independent of
/// whatever the classifier concludes.
pub const PH_SAFE_MIN: f64 = 6.5;
pub const PH_SAFE_MAX: f64 = 8.5;
pub const HARDNESS_LIMIT_MG_L: f64 = 300.0;
/// WHO taste guideline for total dissolved solids. Guideline bodies differ
/// here; jurisdictions with wider national limits can override through
/// [`RiskConfig::solids_limit_mg_l`].
pub const SOLIDS_LIMIT_MG_L: f64 = 500.0;
/// Safety limit backing the risk flag.
pub const CHLORAMINES_SAFETY_LIMIT_MG_L: f64 = 4.0;
/// Taste/odor advisory used only by the maintenance recommendations; a
/// separate standard from the safety limit above, kept distinct on purpose.
pub const CHLORAMINES_ADVISORY_LIMIT_MG_L: f64 = 2.0;
pub const SULFATE_LIMIT_MG_L: f64 = 250.0;
pub const TRIHALOMETHANES_LIMIT_UG_L: f64 = 80.0;
pub const TURBIDITY_LIMIT_NTU: f64 = 5.0;

/// Threshold dials the deployment may widen; defaults follow WHO guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub solids_limit_mg_l: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            solids_limit_mg_l: SOLIDS_LIMIT_MG_L,
        }
    }
}

/// One tag per guideline rule so downstream gating works on structured data
/// rather than message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    PhOutOfRange,
    ExcessHardness,
    ExcessSolids,
    ExcessChloramines,
    ExcessSulfate,
    ExcessTrihalomethanes,
    ExcessTurbidity,
}

/// A guideline violation observed on the raw, pre-imputation sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub kind: RiskKind,
    pub observed: f64,
    /// The guideline bound that was crossed (for pH, whichever end of the
    /// safe range the observation fell outside of).
    pub limit: f64,
}

impl RiskFactor {
    pub fn parameter(&self) -> Parameter {
        match self.kind {
            RiskKind::PhOutOfRange => Parameter::Ph,
            RiskKind::ExcessHardness => Parameter::Hardness,
            RiskKind::ExcessSolids => Parameter::Solids,
            RiskKind::ExcessChloramines => Parameter::Chloramines,
            RiskKind::ExcessSulfate => Parameter::Sulfate,
            RiskKind::ExcessTrihalomethanes => Parameter::Trihalomethanes,
            RiskKind::ExcessTurbidity => Parameter::Turbidity,
        }
    }

    /// Human-readable description naming the parameter, the observation, and
    /// the guideline bound.
    pub fn message(&self) -> String {
        match self.kind {
            RiskKind::PhOutOfRange => format!(
                "pH outside safe range ({PH_SAFE_MIN}-{PH_SAFE_MAX}): measured {:.2}",
                self.observed
            ),
            RiskKind::ExcessHardness => format!(
                "Hardness above {:.0} mg/L guideline: measured {:.1} mg/L",
                self.limit, self.observed
            ),
            RiskKind::ExcessSolids => format!(
                "Total dissolved solids above {:.0} ppm guideline: measured {:.1} ppm",
                self.limit, self.observed
            ),
            RiskKind::ExcessChloramines => format!(
                "Chloramines above {:.1} ppm safety limit: measured {:.2} ppm",
                self.limit, self.observed
            ),
            RiskKind::ExcessSulfate => format!(
                "Sulfate above {:.0} mg/L guideline: measured {:.1} mg/L",
                self.limit, self.observed
            ),
            RiskKind::ExcessTrihalomethanes => format!(
                "Trihalomethanes above {:.0} ug/L limit: measured {:.1} ug/L",
                self.limit, self.observed
            ),
            RiskKind::ExcessTurbidity => format!(
                "Turbidity above {:.1} NTU guideline: measured {:.2} NTU",
                self.limit, self.observed
            ),
        }
    }
}

/// Evaluate the guideline table with default thresholds.
pub fn assess_risks(parameters: &ParameterSet) -> Vec<RiskFactor> {
    assess_risks_with(parameters, &RiskConfig::default())
}

/// Evaluate every guideline rule against the raw sample. Evaluation order is
/// the canonical output order. Missing measurements emit nothing: absence
/// means "cannot assess", never "violation".
pub fn assess_risks_with(parameters: &ParameterSet, config: &RiskConfig) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if let Some(ph) = parameters.ph {
        if ph < PH_SAFE_MIN || ph > PH_SAFE_MAX {
            let limit = if ph < PH_SAFE_MIN {
                PH_SAFE_MIN
            } else {
                PH_SAFE_MAX
            };
            factors.push(RiskFactor {
                kind: RiskKind::PhOutOfRange,
                observed: ph,
                limit,
            });
        }
    }

    if let Some(hardness) = parameters.hardness {
        if hardness > HARDNESS_LIMIT_MG_L {
            factors.push(RiskFactor {
                kind: RiskKind::ExcessHardness,
                observed: hardness,
                limit: HARDNESS_LIMIT_MG_L,
            });
        }
    }

    if let Some(solids) = parameters.solids {
        if solids > config.solids_limit_mg_l {
            factors.push(RiskFactor {
                kind: RiskKind::ExcessSolids,
                observed: solids,
                limit: config.solids_limit_mg_l,
            });
        }
    }

    if let Some(chloramines) = parameters.chloramines {
        if chloramines > CHLORAMINES_SAFETY_LIMIT_MG_L {
            factors.push(RiskFactor {
                kind: RiskKind::ExcessChloramines,
                observed: chloramines,
                limit: CHLORAMINES_SAFETY_LIMIT_MG_L,
            });
        }
    }

    if let Some(sulfate) = parameters.sulfate {
        if sulfate > SULFATE_LIMIT_MG_L {
            factors.push(RiskFactor {
                kind: RiskKind::ExcessSulfate,
                observed: sulfate,
                limit: SULFATE_LIMIT_MG_L,
            });
        }
    }

    if let Some(trihalomethanes) = parameters.trihalomethanes {
        if trihalomethanes > TRIHALOMETHANES_LIMIT_UG_L {
            factors.push(RiskFactor {
                kind: RiskKind::ExcessTrihalomethanes,
                observed: trihalomethanes,
                limit: TRIHALOMETHANES_LIMIT_UG_L,
            });
        }
    }

    if let Some(turbidity) = parameters.turbidity {
        if turbidity > TURBIDITY_LIMIT_NTU {
            factors.push(RiskFactor {
                kind: RiskKind::ExcessTurbidity,
                observed: turbidity,
                limit: TURBIDITY_LIMIT_NTU,
            });
        }
    }

    factors
}
