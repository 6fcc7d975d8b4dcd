use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Profile;

/// Request to resolve a pair of profiles in both directions
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResolveRequest {
    #[validate(nested)]
    #[serde(alias = "profile_a", rename = "profileA")]
    pub profile_a: Profile,
    #[validate(nested)]
    #[serde(alias = "profile_b", rename = "profileB")]
    pub profile_b: Profile,
}

/// Request for a one-direction compatibility report
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EvaluateRequest {
    #[validate(nested)]
    pub seeker: Profile,
    #[validate(nested)]
    pub candidate: Profile,
}

/// Request to find the mutual matches of a seeker within a candidate pool
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(nested)]
    pub seeker: Profile,
    #[serde(default)]
    pub candidates: Vec<Profile>,
    /// Falls back to the configured default limit when absent
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}
