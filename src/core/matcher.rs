use chrono::{NaiveDate, Utc};
use rayon::prelude::*;

use crate::core::{
    error::MatchError,
    gate::evaluate_gate,
    preference::CompiledPreferences,
    scoring::calculate_compatibility_score,
};
use crate::models::{
    AttributeRecord, CandidateError, CompatibilityResult, GateResult, MutualMatchResult, Profile,
    ScoredMatch,
};

/// Result of resolving a seeker against a candidate pool
#[derive(Debug, Default)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
    /// Candidates rejected by either side's dealbreakers
    pub blocked: usize,
    pub errors: Vec<CandidateError>,
}

/// Per-candidate outcome inside a pool evaluation
enum PoolOutcome {
    Mutual(ScoredMatch),
    Blocked,
    Failed(CandidateError),
}

/// A profile with its preferences compiled for evaluation
struct Prepared<'a> {
    profile: &'a Profile,
    preferences: CompiledPreferences,
}

impl<'a> Prepared<'a> {
    fn new(profile: &'a Profile) -> Self {
        Self {
            profile,
            preferences: CompiledPreferences::compile(&profile.preferences, &profile.attributes),
        }
    }

    fn gate(&self, candidate: &AttributeRecord, as_of: NaiveDate) -> Result<GateResult, MatchError> {
        evaluate_gate(&self.preferences, &self.profile.dealbreakers, candidate, as_of)
    }

    fn score(&self, candidate: &AttributeRecord, as_of: NaiveDate) -> Result<u8, MatchError> {
        calculate_compatibility_score(&self.preferences, candidate, as_of).map(|(score, _)| score)
    }
}

/// Matching orchestrator - resolves profiles against each other in both directions
///
/// # Pipeline
/// 1. Normalize and compile each side's preferences
/// 2. Dealbreaker gate, A's preferences against B and B's against A
/// 3. Mutual verdict as the conjunction of both gates
/// 4. Both one-directional scores, reported separately
///
/// The matcher holds no mutable state; one instance can serve any number of
/// concurrent evaluations.
#[derive(Debug, Clone)]
pub struct Matcher {
    as_of: NaiveDate,
    parallel: bool,
}

impl Matcher {
    /// Create a matcher that derives ages as of the given date
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            parallel: true,
        }
    }

    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    /// Toggle rayon fan-out for pool evaluation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Check the seeker's dealbreakers against a candidate's attributes
    pub fn evaluate_gate(
        &self,
        seeker: &Profile,
        candidate: &AttributeRecord,
    ) -> Result<GateResult, MatchError> {
        Prepared::new(seeker).gate(candidate, self.as_of)
    }

    /// How well a candidate satisfies the seeker's preferences (0-100)
    pub fn score(&self, seeker: &Profile, candidate: &AttributeRecord) -> Result<u8, MatchError> {
        Prepared::new(seeker).score(candidate, self.as_of)
    }

    /// Full one-directional report: gate, score and per-category breakdown
    pub fn evaluate(
        &self,
        seeker: &Profile,
        candidate: &Profile,
    ) -> Result<CompatibilityResult, MatchError> {
        if seeker.id == candidate.id {
            return Err(MatchError::SelfComparison(seeker.id.clone()));
        }

        let prepared = Prepared::new(seeker);
        let gate = prepared.gate(&candidate.attributes, self.as_of)?;
        let (score, breakdown) =
            calculate_compatibility_score(&prepared.preferences, &candidate.attributes, self.as_of)?;

        Ok(CompatibilityResult {
            passed: gate.passed,
            failed_category: gate.failed_category,
            score,
            breakdown,
        })
    }

    /// Resolve whether two profiles are a mutual match
    ///
    /// `mutual` is true only when both dealbreaker gates pass. When both fail,
    /// the block reason reported is `a`'s. Scores are only computed for mutual
    /// pairs and are never combined into one number.
    pub fn resolve(&self, a: &Profile, b: &Profile) -> Result<MutualMatchResult, MatchError> {
        if a.id == b.id {
            return Err(MatchError::SelfComparison(a.id.clone()));
        }

        self.resolve_prepared(&Prepared::new(a), &Prepared::new(b))
    }

    fn resolve_prepared(
        &self,
        a: &Prepared<'_>,
        b: &Prepared<'_>,
    ) -> Result<MutualMatchResult, MatchError> {
        let gate_a_on_b = a.gate(&b.profile.attributes, self.as_of)?;
        let gate_b_on_a = b.gate(&a.profile.attributes, self.as_of)?;

        let blocked = match (gate_a_on_b.failed_category, gate_b_on_a.failed_category) {
            (Some(category), _) => Some((category, &a.profile.id)),
            (None, Some(category)) => Some((category, &b.profile.id)),
            (None, None) => None,
        };

        if let Some((category, blocked_by)) = blocked {
            tracing::debug!(
                "Pair {} / {} blocked by {}'s {} dealbreaker",
                a.profile.id,
                b.profile.id,
                blocked_by,
                category
            );

            return Ok(MutualMatchResult {
                mutual: false,
                block_reason: Some(category),
                blocked_by: Some(blocked_by.clone()),
                seeker_as_viewer_score: None,
                seeker_as_candidate_score: None,
            });
        }

        let score_a_on_b = a.score(&b.profile.attributes, self.as_of)?;
        let score_b_on_a = b.score(&a.profile.attributes, self.as_of)?;

        Ok(MutualMatchResult {
            mutual: true,
            block_reason: None,
            blocked_by: None,
            seeker_as_viewer_score: Some(score_a_on_b),
            seeker_as_candidate_score: Some(score_b_on_a),
        })
    }

    /// Find the mutual matches of a seeker within a candidate pool
    ///
    /// Every candidate is resolved independently (in parallel when enabled).
    /// The seeker's own profile is skipped. Candidates whose input is
    /// malformed are reported in `errors` rather than dropped.
    ///
    /// # Returns
    /// MatchResult with mutual matches ordered by seeker-as-viewer score,
    /// then seeker-as-candidate score, then candidate id
    pub fn find_mutual_matches(
        &self,
        seeker: &Profile,
        candidates: &[Profile],
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();
        let seeker = Prepared::new(seeker);

        let resolve_one = |candidate: &Profile| -> Option<PoolOutcome> {
            if candidate.id == seeker.profile.id {
                return None;
            }

            let outcome = match self.resolve_prepared(&seeker, &Prepared::new(candidate)) {
                Ok(result) => match (result.seeker_as_viewer_score, result.seeker_as_candidate_score) {
                    (Some(viewer), Some(candidate_score)) if result.mutual => {
                        PoolOutcome::Mutual(ScoredMatch {
                            candidate_id: candidate.id.clone(),
                            seeker_as_viewer_score: viewer,
                            seeker_as_candidate_score: candidate_score,
                        })
                    }
                    _ => PoolOutcome::Blocked,
                },
                Err(e) => {
                    tracing::warn!(
                        "Skipping candidate {} for {}: {}",
                        candidate.id,
                        seeker.profile.id,
                        e
                    );
                    PoolOutcome::Failed(CandidateError {
                        candidate_id: candidate.id.clone(),
                        message: e.to_string(),
                    })
                }
            };

            Some(outcome)
        };

        let outcomes: Vec<PoolOutcome> = if self.parallel {
            candidates.par_iter().filter_map(resolve_one).collect()
        } else {
            candidates.iter().filter_map(resolve_one).collect()
        };

        let mut result = MatchResult {
            total_candidates,
            ..MatchResult::default()
        };

        for outcome in outcomes {
            match outcome {
                PoolOutcome::Mutual(scored) => result.matches.push(scored),
                PoolOutcome::Blocked => result.blocked += 1,
                PoolOutcome::Failed(error) => result.errors.push(error),
            }
        }

        result.matches.sort_by(|a, b| {
            b.seeker_as_viewer_score
                .cmp(&a.seeker_as_viewer_score)
                .then_with(|| b.seeker_as_candidate_score.cmp(&a.seeker_as_candidate_score))
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });

        result.matches.truncate(limit);

        tracing::debug!(
            "Resolved {} candidates for {}: {} mutual, {} blocked, {} errors",
            total_candidates,
            seeker.profile.id,
            result.matches.len(),
            result.blocked,
            result.errors.len()
        );

        result
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, DealbreakerFlags, PreferenceRecord};

    fn matcher() -> Matcher {
        Matcher::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    fn create_profile(id: &str, age: u16, community: &str, min_age: u16, max_age: u16) -> Profile {
        Profile {
            id: id.to_string(),
            attributes: AttributeRecord {
                age: Some(age),
                community: Some(community.to_string()),
                diet: Some("Vegetarian".to_string()),
                ..Default::default()
            },
            preferences: PreferenceRecord {
                age_min: Some(min_age),
                age_max: Some(max_age),
                diet: Some("Vegetarian".to_string()),
                ..Default::default()
            },
            dealbreakers: DealbreakerFlags::default().with(Category::Age),
        }
    }

    #[test]
    fn test_resolve_mutual_pair() {
        let a = create_profile("a", 28, "Brahmin", 24, 30);
        let b = create_profile("b", 26, "Brahmin", 26, 32);

        let result = matcher().resolve(&a, &b).unwrap();

        assert!(result.mutual);
        assert_eq!(result.block_reason, None);
        assert_eq!(result.seeker_as_viewer_score, Some(100));
        assert_eq!(result.seeker_as_candidate_score, Some(100));
    }

    #[test]
    fn test_resolve_one_sided_block() {
        let a = create_profile("a", 35, "Brahmin", 24, 40);
        let b = create_profile("b", 26, "Brahmin", 26, 32);

        let result = matcher().resolve(&a, &b).unwrap();

        assert!(!result.mutual);
        assert_eq!(result.block_reason, Some(Category::Age));
        assert_eq!(result.blocked_by.as_deref(), Some("b"));
        assert_eq!(result.seeker_as_viewer_score, None);
    }

    #[test]
    fn test_both_blocked_reports_first_profile() {
        let a = create_profile("a", 45, "Brahmin", 20, 25);
        let b = create_profile("b", 40, "Brahmin", 20, 25);

        let result = matcher().resolve(&a, &b).unwrap();
        assert_eq!(result.blocked_by.as_deref(), Some("a"));
    }

    #[test]
    fn test_self_comparison_rejected() {
        let a = create_profile("a", 28, "Brahmin", 24, 30);
        let err = matcher().resolve(&a, &a.clone()).unwrap_err();
        assert_eq!(err, MatchError::SelfComparison("a".to_string()));
    }

    #[test]
    fn test_find_mutual_matches_sorted_and_limited() {
        let seeker = create_profile("seeker", 28, "Brahmin", 24, 32);
        let mut close = create_profile("close", 27, "Brahmin", 25, 30);
        close.attributes.diet = Some("Vegan".to_string());
        let candidates = vec![
            close,
            create_profile("exact", 26, "Brahmin", 25, 30),
            create_profile("too_old", 40, "Brahmin", 25, 45),
            seeker.clone(),
        ];

        let result = matcher().find_mutual_matches(&seeker, &candidates, 10);

        assert_eq!(result.total_candidates, 4);
        assert_eq!(result.blocked, 1);
        assert!(result.errors.is_empty());
        let ids: Vec<_> = result.matches.iter().map(|m| m.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "close"]);

        let limited = matcher().find_mutual_matches(&seeker, &candidates, 1);
        assert_eq!(limited.matches.len(), 1);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let seeker = create_profile("seeker", 28, "Brahmin", 22, 35);
        let candidates: Vec<Profile> = (0..40)
            .map(|i| create_profile(&i.to_string(), 20 + (i % 20) as u16, "Brahmin", 20, 40))
            .collect();

        let parallel = matcher().find_mutual_matches(&seeker, &candidates, 100);
        let sequential = matcher()
            .with_parallel(false)
            .find_mutual_matches(&seeker, &candidates, 100);

        assert_eq!(parallel.matches, sequential.matches);
        assert_eq!(parallel.blocked, sequential.blocked);
    }
}
