use chrono::NaiveDate;

use crate::core::education::EducationRequirement;
use crate::core::error::MatchError;
use crate::core::matchers::{
    match_community, match_contains, match_education, match_negated, match_range, match_set,
};
use crate::core::normalize::{is_any, normalize, normalize_list, resolve_same_as_mine, SAME_AS_MINE};
use crate::models::{AttributeRecord, Category, CategoryKind, MatchOutcome, PreferenceRecord};

/// A normalized preference for one category, tagged by matching strategy
#[derive(Debug, Clone, PartialEq)]
pub enum Preference {
    /// No constraint
    Any,
    Range {
        min: Option<u16>,
        max: Option<u16>,
    },
    Education(EducationRequirement),
    Community {
        community: String,
        sub_community: Option<String>,
    },
    OneOf(Vec<String>),
    NotEqual(String),
    Contains(String),
}

impl Preference {
    /// Build the preference for `category` from a raw record
    ///
    /// `own` is the preference holder's own attribute record, read to resolve
    /// `same_as_mine` placeholders.
    pub fn compile(category: Category, record: &PreferenceRecord, own: &AttributeRecord) -> Self {
        match category.kind() {
            CategoryKind::Range => match record.bounds(category) {
                (None, None) => Preference::Any,
                (min, max) => Preference::Range { min, max },
            },
            CategoryKind::Ordinal => {
                let token = resolved_token(category, record.text(category), own);
                if is_any(&token) {
                    return Preference::Any;
                }
                match EducationRequirement::parse(&token) {
                    Some(requirement) => Preference::Education(requirement),
                    None => Preference::Contains(token),
                }
            }
            CategoryKind::Hierarchical => {
                let community = resolved_token(category, record.community.as_deref(), own);
                if is_any(&community) {
                    return Preference::Any;
                }
                let sub = normalize(category, record.sub_community.as_deref());
                let sub = if sub == SAME_AS_MINE {
                    normalize(category, own.sub_community.as_deref())
                } else {
                    sub
                };
                Preference::Community {
                    community,
                    sub_community: (!is_any(&sub) && sub != SAME_AS_MINE).then_some(sub),
                }
            }
            CategoryKind::Set => {
                let values = normalize_list(category, record.text(category), Some(own));
                if values.is_empty() {
                    Preference::Any
                } else {
                    Preference::OneOf(values)
                }
            }
            CategoryKind::Negated => {
                let token = normalize(category, record.text(category));
                if is_any(&token) {
                    return Preference::Any;
                }
                let excluded = match token.strip_prefix("not_") {
                    Some(rest) if !rest.is_empty() => rest.to_string(),
                    _ => token,
                };
                let excluded = resolve_same_as_mine(category, excluded, own);
                if is_any(&excluded) {
                    Preference::Any
                } else {
                    Preference::NotEqual(excluded)
                }
            }
            CategoryKind::Contains => {
                let token = resolved_token(category, record.text(category), own);
                if is_any(&token) {
                    Preference::Any
                } else {
                    Preference::Contains(token)
                }
            }
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Preference::Any)
    }

    /// Run the matcher for this preference's kind against a candidate
    ///
    /// `strict` is true when the category is a dealbreaker for the preference
    /// holder; it decides how missing candidate data is treated.
    pub fn evaluate(
        &self,
        category: Category,
        candidate: &AttributeRecord,
        as_of: NaiveDate,
        strict: bool,
    ) -> Result<MatchOutcome, MatchError> {
        let outcome = match self {
            Preference::Any => MatchOutcome::hit(),
            Preference::Range { min, max } => {
                let value = match category {
                    Category::Age => candidate.age_on(as_of),
                    _ => candidate.height_cm,
                };
                match_range(category, *min, *max, value, strict)?
            }
            Preference::Education(requirement) => {
                let token = candidate_token(category, candidate);
                match_education(requirement, token.as_deref(), strict)
            }
            Preference::Community {
                community,
                sub_community,
            } => {
                let candidate_community = candidate_token(category, candidate);
                let candidate_sub = present(normalize(category, candidate.sub_community.as_deref()));
                match_community(
                    community,
                    sub_community.as_deref(),
                    candidate_community.as_deref(),
                    candidate_sub.as_deref(),
                    strict,
                )
            }
            Preference::OneOf(accepted) => {
                let values = normalize_list(category, candidate.text(category), None);
                match_set(accepted, &values, strict)
            }
            Preference::NotEqual(excluded) => {
                let token = candidate_token(category, candidate);
                match_negated(excluded, token.as_deref())
            }
            Preference::Contains(token) => {
                let value = candidate_token(category, candidate);
                match_contains(category, token, value.as_deref(), strict)
            }
        };

        tracing::trace!(
            "{} preference {:?} -> matched={} confidence={}",
            category,
            self,
            outcome.matched,
            outcome.confidence
        );

        Ok(outcome)
    }
}

/// Normalize a raw preference value and substitute `same_as_mine`
fn resolved_token(category: Category, raw: Option<&str>, own: &AttributeRecord) -> String {
    resolve_same_as_mine(category, normalize(category, raw), own)
}

/// Candidate's canonical value for a category, `None` when absent
fn candidate_token(category: Category, candidate: &AttributeRecord) -> Option<String> {
    present(normalize(category, candidate.text(category)))
}

fn present(token: String) -> Option<String> {
    (!is_any(&token)).then_some(token)
}

/// A seeker's preferences, compiled once per direction in category order
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPreferences {
    entries: Vec<(Category, Preference)>,
}

impl CompiledPreferences {
    pub fn compile(record: &PreferenceRecord, own: &AttributeRecord) -> Self {
        let entries = Category::ALL
            .iter()
            .map(|&category| (category, Preference::compile(category, record, own)))
            .collect();

        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Preference)> {
        self.entries.iter().map(|(category, preference)| (*category, preference))
    }

    pub fn get(&self, category: Category) -> Option<&Preference> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, preference)| preference)
    }

    /// Reject malformed ranges before any candidate is looked at
    pub fn validate(&self) -> Result<(), MatchError> {
        for (category, preference) in self.iter() {
            if let Preference::Range {
                min: Some(min),
                max: Some(max),
            } = *preference
            {
                if min > max {
                    return Err(MatchError::InvalidRange { category, min, max });
                }
            }
        }
        Ok(())
    }

    /// Categories that actually constrain the candidate
    pub fn active(&self) -> impl Iterator<Item = (Category, &Preference)> {
        self.iter().filter(|(_, preference)| !preference.is_any())
    }
}
