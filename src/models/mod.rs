// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AttributeRecord, CandidateError, Category, CategoryKind, CompatibilityResult, DealbreakerFlags,
    GateResult, MatchOutcome, MutualMatchResult, PreferenceRecord, Profile, ScoredMatch,
};
pub use requests::{EvaluateRequest, FindMatchesRequest, ResolveRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse};
