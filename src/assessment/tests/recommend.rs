use super::common::*;
use crate::assessment::domain::ParameterSet;
use crate::assessment::recommend::{synthesize, RecommendationTrack, TREATMENT_GUIDE};
use crate::assessment::risk::assess_risks;

#[test]
fn unsafe_track_opens_with_the_four_urgent_actions() {
    let sample = contaminated_sample();
    let risks = assess_risks(&sample);

    let recommendations = synthesize(&unsafe_prediction(), &risks, &sample);

    assert!(recommendations.len() >= 4);
    assert!(recommendations
        .iter()
        .all(|entry| entry.track == RecommendationTrack::Urgent));
    assert!(recommendations[0].text.starts_with("Do not consume"));
    assert!(recommendations[1].text.contains("certified laboratory"));
    assert!(recommendations[2].text.contains("bottled water"));
    assert!(recommendations[3].text.contains("treatment systems"));
}

#[test]
fn low_ph_and_turbidity_entries_follow_the_opening_block_in_order() {
    let sample = contaminated_sample();
    let risks = assess_risks(&sample);

    let recommendations = synthesize(&unsafe_prediction(), &risks, &sample);

    assert_eq!(recommendations.len(), 6);
    assert!(recommendations[4].text.starts_with("pH too low"));
    assert!(recommendations[5].text.starts_with("High turbidity"));
}

#[test]
fn high_ph_selects_the_neutralization_wording() {
    let sample = ParameterSet {
        ph: Some(9.5),
        ..clean_sample()
    };
    let risks = assess_risks(&sample);

    let recommendations = synthesize(&unsafe_prediction(), &risks, &sample);

    assert!(recommendations
        .iter()
        .any(|entry| entry.text.starts_with("pH too high")));
    assert!(!recommendations
        .iter()
        .any(|entry| entry.text.starts_with("pH too low")));
}

#[test]
fn safe_track_opens_with_the_four_maintenance_tips() {
    let sample = clean_sample();
    let recommendations = synthesize(&safe_prediction(), &[], &sample);

    assert_eq!(recommendations.len(), 4);
    assert!(recommendations
        .iter()
        .all(|entry| entry.track == RecommendationTrack::Maintenance));
    assert!(recommendations[0].text.starts_with("Regular monitoring"));
}

#[test]
fn hard_water_earns_a_softening_tip_without_a_chloramine_tip() {
    let sample = hard_water_sample();
    let risks = assess_risks(&sample);

    let recommendations = synthesize(&safe_prediction(), &risks, &sample);

    assert_eq!(recommendations.len(), 5);
    assert!(recommendations[4].text.starts_with("Water hardness"));
    assert!(!recommendations
        .iter()
        .any(|entry| entry.text.starts_with("Chloramine levels")));
}

#[test]
fn chloramine_advisory_fires_below_the_safety_limit() {
    let sample = ParameterSet {
        chloramines: Some(2.5),
        ..clean_sample()
    };
    let risks = assess_risks(&sample);
    // 2.5 ppm is no safety violation, so the rule engine stays quiet.
    assert!(risks.is_empty());

    let recommendations = synthesize(&safe_prediction(), &risks, &sample);

    assert!(recommendations
        .iter()
        .any(|entry| entry.text.starts_with("Chloramine levels")));
}

#[test]
fn output_order_is_stable_across_calls() {
    let sample = contaminated_sample();
    let risks = assess_risks(&sample);

    let first = synthesize(&unsafe_prediction(), &risks, &sample);
    let second = synthesize(&unsafe_prediction(), &risks, &sample);

    assert_eq!(first, second);
}

#[test]
fn treatment_guide_covers_the_original_contaminants() {
    assert_eq!(TREATMENT_GUIDE.len(), 8);
    assert!(TREATMENT_GUIDE
        .iter()
        .any(|option| option.contaminant == "High TDS" && option.primary == "Reverse Osmosis"));
}
