//! Vivah Match - partner-compatibility matching engine for the Vivah matrimony platform
//!
//! The engine decides, for any two profile snapshots, whether they may be shown
//! to each other (a mutual match) and how well each satisfies the other's
//! preferences. It is a pure function of its inputs and safe to fan out across
//! a candidate pool in parallel.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{MatchError, Matcher, MatchResult};
pub use models::{
    AttributeRecord, Category, CompatibilityResult, DealbreakerFlags, MutualMatchResult,
    PreferenceRecord, Profile,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        let result = matcher
            .resolve(&Profile::new("a"), &Profile::new("b"))
            .unwrap();
        assert!(result.mutual);
    }
}
