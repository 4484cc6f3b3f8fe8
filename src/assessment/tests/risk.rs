use super::common::*;
use crate::assessment::domain::ParameterSet;
use crate::assessment::risk::{
    assess_risks, assess_risks_with, RiskConfig, RiskKind, CHLORAMINES_SAFETY_LIMIT_MG_L,
    SOLIDS_LIMIT_MG_L,
};

#[test]
fn clean_sample_has_no_risk_factors() {
    assert!(assess_risks(&clean_sample()).is_empty());
}

#[test]
fn acidic_cloudy_sample_flags_ph_then_turbidity() {
    let factors = assess_risks(&contaminated_sample());

    let kinds: Vec<RiskKind> = factors.iter().map(|factor| factor.kind).collect();
    assert_eq!(kinds, vec![RiskKind::PhOutOfRange, RiskKind::ExcessTurbidity]);
    assert_eq!(factors[0].observed, 5.0);
    assert_eq!(factors[1].observed, 8.0);
}

#[test]
fn missing_measurements_cannot_violate() {
    assert!(assess_risks(&ParameterSet::default()).is_empty());
}

#[test]
fn turbidity_violation_is_monotonic() {
    let mut sample = contaminated_sample();
    sample.turbidity = Some(4.0);
    let before = assess_risks(&sample);
    assert_eq!(before.len(), 1);

    sample.turbidity = Some(5.1);
    let after = assess_risks(&sample);

    // Crossing the turbidity bound adds its factor and removes nothing.
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[0].kind, before[0].kind);
    assert_eq!(after.last().map(|factor| factor.kind), Some(RiskKind::ExcessTurbidity));
}

#[test]
fn high_ph_flags_the_upper_bound() {
    let sample = ParameterSet {
        ph: Some(9.2),
        ..clean_sample()
    };

    let factors = assess_risks(&sample);
    assert_eq!(factors.len(), 1);
    assert_eq!(factors[0].kind, RiskKind::PhOutOfRange);
    assert!(factors[0].message().contains("6.5-8.5"));
}

#[test]
fn solids_threshold_is_configurable() {
    let sample = ParameterSet {
        solids: Some(800.0),
        ..clean_sample()
    };

    let default_factors = assess_risks(&sample);
    assert!(default_factors
        .iter()
        .any(|factor| factor.kind == RiskKind::ExcessSolids));
    assert_eq!(default_factors[0].limit, SOLIDS_LIMIT_MG_L);

    let widened = RiskConfig {
        solids_limit_mg_l: 1000.0,
    };
    assert!(assess_risks_with(&sample, &widened).is_empty());
}

#[test]
fn chloramines_below_safety_limit_is_not_a_risk() {
    let sample = ParameterSet {
        chloramines: Some(3.5),
        ..clean_sample()
    };

    // 3.5 sits above the taste advisory but below the safety limit.
    assert!(3.5 < CHLORAMINES_SAFETY_LIMIT_MG_L);
    assert!(assess_risks(&sample).is_empty());
}

#[test]
fn every_violation_reports_parameter_and_bound() {
    let sample = ParameterSet {
        ph: Some(5.5),
        hardness: Some(320.0),
        solids: Some(600.0),
        chloramines: Some(4.5),
        sulfate: Some(260.0),
        conductivity: Some(400.0),
        organic_carbon: Some(10.0),
        trihalomethanes: Some(90.0),
        turbidity: Some(6.0),
    };

    let factors = assess_risks(&sample);
    let kinds: Vec<RiskKind> = factors.iter().map(|factor| factor.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RiskKind::PhOutOfRange,
            RiskKind::ExcessHardness,
            RiskKind::ExcessSolids,
            RiskKind::ExcessChloramines,
            RiskKind::ExcessSulfate,
            RiskKind::ExcessTrihalomethanes,
            RiskKind::ExcessTurbidity,
        ]
    );

    for factor in &factors {
        let message = factor.message();
        assert!(
            message.contains(&format!("{:.1}", factor.observed))
                || message.contains(&format!("{:.2}", factor.observed)),
            "message should embed the observation: {message}"
        );
    }
}
