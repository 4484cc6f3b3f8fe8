use serde::{Deserialize, Serialize};

use super::domain::{ParameterSet, PotabilityLabel, PredictionResult};
use super::risk::{
    RiskFactor, RiskKind, CHLORAMINES_ADVISORY_LIMIT_MG_L, HARDNESS_LIMIT_MG_L, PH_SAFE_MIN,
};

/// Which track a recommendation belongs to; the tracks are disjoint and
/// selected by the classifier label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTrack {
    Urgent,
    Maintenance,
}

/// One actionable entry; consumers display these as a numbered list, so
/// output order is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub track: RecommendationTrack,
    pub text: String,
}

impl Recommendation {
    fn urgent(text: &str) -> Self {
        Self {
            track: RecommendationTrack::Urgent,
            text: text.to_string(),
        }
    }

    fn maintenance(text: &str) -> Self {
        Self {
            track: RecommendationTrack::Maintenance,
            text: text.to_string(),
        }
    }
}

/// Static contaminant-to-treatment lookup, display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreatmentOption {
    pub contaminant: &'static str,
    pub primary: &'static str,
    pub alternative: &'static str,
    pub cost_range: &'static str,
}

pub const TREATMENT_GUIDE: [TreatmentOption; 8] = [
    TreatmentOption {
        contaminant: "High/Low pH",
        primary: "pH Adjustment Systems",
        alternative: "Ion Exchange",
        cost_range: "$200-800",
    },
    TreatmentOption {
        contaminant: "Chloramines",
        primary: "Activated Carbon",
        alternative: "Catalytic Carbon",
        cost_range: "$50-300",
    },
    TreatmentOption {
        contaminant: "Trihalomethanes",
        primary: "Activated Carbon/RO",
        alternative: "Distillation",
        cost_range: "$100-500",
    },
    TreatmentOption {
        contaminant: "High TDS",
        primary: "Reverse Osmosis",
        alternative: "Distillation",
        cost_range: "$200-1000",
    },
    TreatmentOption {
        contaminant: "Turbidity",
        primary: "Sediment Filtration",
        alternative: "Coagulation/Flocculation",
        cost_range: "$30-200",
    },
    TreatmentOption {
        contaminant: "Bacteria/Viruses",
        primary: "UV Disinfection",
        alternative: "Chlorination",
        cost_range: "$100-400",
    },
    TreatmentOption {
        contaminant: "Heavy Metals",
        primary: "Reverse Osmosis",
        alternative: "Ion Exchange",
        cost_range: "$200-1000",
    },
    TreatmentOption {
        contaminant: "Bad Taste/Odor",
        primary: "Activated Carbon",
        alternative: "Aeration",
        cost_range: "$50-300",
    },
];

/// Combine the classifier label with the rule engine's findings into an
/// ordered action list. This is the only place the two signals meet.
///
/// Each branch opens with its fixed block, then appends targeted entries in
/// a fixed evaluation order, gated on typed risk tags (and, for pH, on the
/// raw measurement to pick the low/high wording).
pub fn synthesize(
    prediction: &PredictionResult,
    risks: &[RiskFactor],
    parameters: &ParameterSet,
) -> Vec<Recommendation> {
    match prediction.label {
        PotabilityLabel::Unsafe => urgent_track(risks, parameters),
        PotabilityLabel::Safe => maintenance_track(parameters),
    }
}

fn has_risk(risks: &[RiskFactor], kind: RiskKind) -> bool {
    risks.iter().any(|risk| risk.kind == kind)
}

fn urgent_track(risks: &[RiskFactor], parameters: &ParameterSet) -> Vec<Recommendation> {
    let mut recommendations = vec![
        Recommendation::urgent("Do not consume this water until it has been properly treated"),
        Recommendation::urgent("Get professional water testing from a certified laboratory"),
        Recommendation::urgent(
            "Use bottled water or properly treated water for drinking and cooking",
        ),
        Recommendation::urgent("Consider installing appropriate water treatment systems"),
    ];

    if has_risk(risks, RiskKind::PhOutOfRange) {
        if let Some(ph) = parameters.ph {
            if ph < PH_SAFE_MIN {
                recommendations.push(Recommendation::urgent(
                    "pH too low: consider lime treatment or pH adjustment systems",
                ));
            } else {
                recommendations.push(Recommendation::urgent(
                    "pH too high: consider acid neutralization systems",
                ));
            }
        }
    }

    if has_risk(risks, RiskKind::ExcessChloramines) {
        recommendations.push(Recommendation::urgent(
            "High chloramines: install activated carbon filtration",
        ));
    }

    if has_risk(risks, RiskKind::ExcessTrihalomethanes) {
        recommendations.push(Recommendation::urgent(
            "High trihalomethanes: use granular activated carbon or reverse osmosis",
        ));
    }

    if has_risk(risks, RiskKind::ExcessTurbidity) {
        recommendations.push(Recommendation::urgent(
            "High turbidity: install sediment filtration and UV disinfection",
        ));
    }

    if has_risk(risks, RiskKind::ExcessSolids) {
        recommendations.push(Recommendation::urgent(
            "High total dissolved solids: consider reverse osmosis or distillation systems",
        ));
    }

    recommendations
}

fn maintenance_track(parameters: &ParameterSet) -> Vec<Recommendation> {
    let mut recommendations = vec![
        Recommendation::maintenance("Regular monitoring: test water quality periodically"),
        Recommendation::maintenance(
            "System maintenance: clean and maintain any existing filtration systems",
        ),
        Recommendation::maintenance("Plumbing check: ensure pipes and storage tanks are clean"),
        Recommendation::maintenance("Keep records: document water quality test results over time"),
    ];

    if parameters
        .hardness
        .is_some_and(|hardness| hardness > HARDNESS_LIMIT_MG_L)
    {
        recommendations.push(Recommendation::maintenance(
            "Water hardness: consider water softening for appliance longevity",
        ));
    }

    // Advisory cutoff, intentionally stricter than the safety limit.
    if parameters
        .chloramines
        .is_some_and(|chloramines| chloramines > CHLORAMINES_ADVISORY_LIMIT_MG_L)
    {
        recommendations.push(Recommendation::maintenance(
            "Chloramine levels: let water sit or use carbon filtration to reduce taste and odor",
        ));
    }

    recommendations
}
