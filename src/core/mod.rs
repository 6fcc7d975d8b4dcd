// Core algorithm exports
pub mod education;
pub mod error;
pub mod gate;
pub mod matcher;
pub mod matchers;
pub mod normalize;
pub mod preference;
pub mod scoring;

pub use error::MatchError;
pub use gate::evaluate_gate;
pub use matcher::{Matcher, MatchResult};
pub use normalize::{normalize, normalize_list, ANY, SAME_AS_MINE};
pub use preference::{CompiledPreferences, Preference};
pub use scoring::calculate_compatibility_score;
