use chrono::NaiveDate;

use crate::core::error::MatchError;
use crate::core::preference::CompiledPreferences;
use crate::models::{AttributeRecord, DealbreakerFlags, GateResult};

/// Check a seeker's dealbreakers against a candidate
///
/// Categories are walked in declared order and evaluation stops at the first
/// dealbreaker the candidate fails. Non-dealbreaker outcomes never block, and
/// a category without a preference is exempt even when flagged. A malformed
/// range is an error whatever the candidate looks like.
pub fn evaluate_gate(
    preferences: &CompiledPreferences,
    flags: &DealbreakerFlags,
    candidate: &AttributeRecord,
    as_of: NaiveDate,
) -> Result<GateResult, MatchError> {
    preferences.validate()?;

    for (category, preference) in preferences.active() {
        let strict = flags.is_dealbreaker(category);
        let outcome = preference.evaluate(category, candidate, as_of, strict)?;

        if strict && !outcome.matched {
            return Ok(GateResult::blocked(category));
        }
    }

    Ok(GateResult::pass())
}
