use crate::core::education::{qualification, EducationLevel, EducationRequirement};
use crate::core::error::MatchError;
use crate::models::{Category, MatchOutcome};

/// Confidence credited when a match is granted on the benefit of the doubt
pub const UNKNOWN_CONFIDENCE: f64 = 0.5;

/// Prefixes that negate the token they are attached to ("non_vegetarian")
const NEGATION_PREFIXES: &[&str] = &["non_", "non", "no_", "not_"];

/// Location phrasings that are treated as satisfied without distance math
const PROXIMITY_MARKERS: &[&str] = &["within", "same_area", "same_city", "nearby", "near_me", "anywhere"];

impl MatchOutcome {
    pub fn hit() -> Self {
        Self {
            matched: true,
            confidence: 1.0,
        }
    }

    pub fn miss() -> Self {
        Self {
            matched: false,
            confidence: 0.0,
        }
    }

    /// Missing or unparseable candidate data: only a dealbreaker fails it
    pub fn unknown(strict: bool) -> Self {
        if strict {
            Self::miss()
        } else {
            Self {
                matched: true,
                confidence: UNKNOWN_CONFIDENCE,
            }
        }
    }

    fn from_bool(matched: bool) -> Self {
        if matched {
            Self::hit()
        } else {
            Self::miss()
        }
    }
}

/// Range matcher (age, height)
///
/// Either bound may be open. A preference whose min exceeds its max is
/// malformed and reported as an error rather than a mismatch.
#[inline]
pub fn match_range(
    category: Category,
    min: Option<u16>,
    max: Option<u16>,
    value: Option<u16>,
    strict: bool,
) -> Result<MatchOutcome, MatchError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(MatchError::InvalidRange { category, min, max });
        }
    }

    let Some(value) = value else {
        return Ok(MatchOutcome::unknown(strict));
    };

    let above_min = min.map_or(true, |min| value >= min);
    let below_max = max.map_or(true, |max| value <= max);
    Ok(MatchOutcome::from_bool(above_min && below_max))
}

/// Ordinal hierarchy matcher (education)
///
/// Higher qualifications satisfy lower requirements; a domain-qualified
/// requirement also needs the candidate's qualification in that domain.
#[inline]
pub fn match_education(
    requirement: &EducationRequirement,
    candidate: Option<&str>,
    strict: bool,
) -> MatchOutcome {
    match candidate.and_then(qualification) {
        Some(q) if q.level != EducationLevel::Unknown => {
            MatchOutcome::from_bool(requirement.is_satisfied_by(q))
        }
        _ => MatchOutcome::unknown(strict),
    }
}

/// Hierarchical categorical matcher (community / sub-community)
///
/// Tokens match on equality or containment in either direction, which also
/// covers legacy rows that stored a sub-community in the community field.
/// When the candidate has no sub-community, the required one is looked for in
/// their community value instead.
#[inline]
pub fn match_community(
    community: &str,
    sub_community: Option<&str>,
    candidate_community: Option<&str>,
    candidate_sub_community: Option<&str>,
    strict: bool,
) -> MatchOutcome {
    let Some(candidate_community) = candidate_community else {
        return MatchOutcome::unknown(strict);
    };

    if !overlaps(community, candidate_community) {
        return MatchOutcome::miss();
    }

    match sub_community {
        None => MatchOutcome::hit(),
        Some(sub) => {
            let target = candidate_sub_community.unwrap_or(candidate_community);
            MatchOutcome::from_bool(overlaps(sub, target))
        }
    }
}

/// Set matcher (religion, mother tongue)
///
/// An empty set accepts everyone; otherwise any candidate value in the set matches.
#[inline]
pub fn match_set(accepted: &[String], candidate_values: &[String], strict: bool) -> MatchOutcome {
    if accepted.is_empty() {
        return MatchOutcome::hit();
    }
    if candidate_values.is_empty() {
        return MatchOutcome::unknown(strict);
    }

    MatchOutcome::from_bool(candidate_values.iter().any(|v| accepted.contains(v)))
}

/// Negated value matcher (gotra exclusion)
///
/// A candidate without a value is never the excluded value, so it passes.
#[inline]
pub fn match_negated(excluded: &str, candidate: Option<&str>) -> MatchOutcome {
    match candidate {
        Some(value) => MatchOutcome::from_bool(!value.eq_ignore_ascii_case(excluded)),
        None => MatchOutcome::hit(),
    }
}

/// Categorical containment matcher (diet, lifestyle, location and the rest)
///
/// Containment in either direction matches, except when one side is a negated
/// form of the other: "vegetarian" is contained in "non_vegetarian" but the
/// two never match.
#[inline]
pub fn match_contains(
    category: Category,
    preference: &str,
    candidate: Option<&str>,
    strict: bool,
) -> MatchOutcome {
    if category.is_location() && PROXIMITY_MARKERS.iter().any(|m| preference.contains(m)) {
        return MatchOutcome::hit();
    }

    let Some(candidate) = candidate else {
        return MatchOutcome::unknown(strict);
    };

    if preference == candidate {
        return MatchOutcome::hit();
    }
    if negates(candidate, preference) || negates(preference, candidate) {
        return MatchOutcome::miss();
    }

    MatchOutcome::from_bool(overlaps(preference, candidate))
}

/// Equality or whole-segment containment in either direction
#[inline]
fn overlaps(a: &str, b: &str) -> bool {
    a == b || contains_segments(a, b) || contains_segments(b, a)
}

/// Whether the `_`-separated segments of `needle` appear as a contiguous run
/// in `haystack`, so "no" is found in "no_smoking" but not in "known_smoker"
fn contains_segments(haystack: &str, needle: &str) -> bool {
    let haystack: Vec<&str> = haystack.split('_').collect();
    let needle: Vec<&str> = needle.split('_').collect();

    needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle.as_slice())
}

/// Whether `text` contains a negated form of `token` that `token` itself lacks
fn negates(text: &str, token: &str) -> bool {
    NEGATION_PREFIXES.iter().any(|prefix| {
        let negated = format!("{}{}", prefix, token);
        text.contains(&negated) && !token.contains(&negated)
    })
}
