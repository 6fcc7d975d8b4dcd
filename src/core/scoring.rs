use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::core::error::MatchError;
use crate::core::preference::CompiledPreferences;
use crate::models::{AttributeRecord, Category, MatchOutcome};

/// Score assigned when the seeker has not expressed a single preference
const NO_PREFERENCE_SCORE: u8 = 100;

/// Calculate a compatibility score (0-100) of a candidate against a seeker's preferences
///
/// Scoring formula:
/// score = round(100 * sum(confidence) / count)
///
/// where the sum and count run over every category with an actual preference.
/// Categories without one add neither credit nor penalty. All categories weigh
/// the same; dealbreaker flags play no part here.
///
/// Returns the score with the per-category outcomes it was computed from.
pub fn calculate_compatibility_score(
    preferences: &CompiledPreferences,
    candidate: &AttributeRecord,
    as_of: NaiveDate,
) -> Result<(u8, BTreeMap<Category, MatchOutcome>), MatchError> {
    preferences.validate()?;

    let mut breakdown = BTreeMap::new();
    let mut numerator = 0.0;
    let mut denominator = 0u32;

    for (category, preference) in preferences.active() {
        let outcome = preference.evaluate(category, candidate, as_of, false)?;
        numerator += outcome.confidence;
        denominator += 1;
        breakdown.insert(category, outcome);
    }

    Ok((to_percentage(numerator, denominator), breakdown))
}

#[inline]
fn to_percentage(numerator: f64, denominator: u32) -> u8 {
    if denominator == 0 {
        return NO_PREFERENCE_SCORE;
    }

    let ratio = (numerator / denominator as f64).clamp(0.0, 1.0);
    (100.0 * ratio).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferenceRecord;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_no_preferences_scores_full() {
        let prefs = CompiledPreferences::compile(&PreferenceRecord::default(), &AttributeRecord::default());
        let (score, breakdown) = calculate_compatibility_score(&prefs, &AttributeRecord::default(), as_of()).unwrap();

        assert_eq!(score, 100);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_equal_weight_per_category() {
        let prefs = CompiledPreferences::compile(
            &PreferenceRecord {
                diet: Some("Vegetarian".to_string()),
                religion: Some("Hindu".to_string()),
                smoking: Some("No".to_string()),
                drinking: Some("No".to_string()),
                ..Default::default()
            },
            &AttributeRecord::default(),
        );
        let candidate = AttributeRecord {
            diet: Some("Non-Veg".to_string()),
            religion: Some("Hindu".to_string()),
            smoking: Some("Never".to_string()),
            drinking: Some("Socially".to_string()),
            ..Default::default()
        };

        let (score, breakdown) = calculate_compatibility_score(&prefs, &candidate, as_of()).unwrap();

        assert_eq!(score, 50);
        assert_eq!(breakdown.len(), 4);
        assert!(!breakdown[&Category::Diet].matched);
        assert!(breakdown[&Category::Smoking].matched);
    }

    #[test]
    fn test_unknown_candidate_data_earns_partial_credit() {
        let prefs = CompiledPreferences::compile(
            &PreferenceRecord {
                diet: Some("Vegetarian".to_string()),
                ..Default::default()
            },
            &AttributeRecord::default(),
        );

        let (score, _) = calculate_compatibility_score(&prefs, &AttributeRecord::default(), as_of()).unwrap();
        assert_eq!(score, 50);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(to_percentage(2.0, 3), 67);
        assert_eq!(to_percentage(1.0, 3), 33);
        assert_eq!(to_percentage(0.0, 0), 100);
    }
}
