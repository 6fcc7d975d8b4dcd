use crate::models::Category;
use thiserror::Error;

/// Structural input errors raised by the matching engine
///
/// Ordinary mismatches are never errors; they come back as
/// `MatchOutcome { matched: false, .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid {category} range: min {min} exceeds max {max}")]
    InvalidRange { category: Category, min: u16, max: u16 },

    #[error("profile {0} cannot be matched against itself")]
    SelfComparison(String),
}
