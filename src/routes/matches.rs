use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{MatchError, Matcher};
use crate::models::{
    ErrorResponse, EvaluateRequest, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    ResolveRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matching: MatchingSettings,
}

impl AppState {
    /// Matcher pinned to today's date, so ages stay current on long-running servers
    fn matcher(&self) -> Matcher {
        Matcher::today().with_parallel(self.matching.parallel)
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/resolve", web::post().to(resolve))
        .route("/matches/evaluate", web::post().to(evaluate))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn invalid_input(error: MatchError) -> HttpResponse {
    tracing::info!("Rejected matching input: {}", error);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid input".to_string(),
        message: error.to_string(),
        status_code: 400,
    })
}

/// Resolve endpoint
///
/// POST /api/v1/matches/resolve
///
/// Request body:
/// ```json
/// {
///   "profileA": { "id": "string", "attributes": {}, "preferences": {}, "dealbreakers": {} },
///   "profileB": { "id": "string", "attributes": {}, "preferences": {}, "dealbreakers": {} }
/// }
/// ```
async fn resolve(
    state: web::Data<AppState>,
    req: web::Json<ResolveRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.matcher().resolve(&req.profile_a, &req.profile_b) {
        Ok(result) => {
            tracing::info!(
                "Resolved {} / {}: mutual={}",
                req.profile_a.id,
                req.profile_b.id,
                result.mutual
            );
            HttpResponse::Ok().json(result)
        }
        Err(e) => invalid_input(e),
    }
}

/// One-direction evaluation endpoint
///
/// POST /api/v1/matches/evaluate
///
/// Returns the seeker's gate verdict, score and per-category breakdown for
/// the candidate.
async fn evaluate(
    state: web::Data<AppState>,
    req: web::Json<EvaluateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.matcher().evaluate(&req.seeker, &req.candidate) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => invalid_input(e),
    }
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "seeker": { "id": "string", ... },
///   "candidates": [{ "id": "string", ... }],
///   "limit": 20
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    if req.candidates.len() > state.matching.max_candidates {
        return HttpResponse::PayloadTooLarge().json(ErrorResponse {
            error: "Too many candidates".to_string(),
            message: format!(
                "At most {} candidates can be evaluated per request",
                state.matching.max_candidates
            ),
            status_code: 413,
        });
    }

    let limit = req
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;

    tracing::info!(
        "Finding matches for {} among {} candidates, limit: {}",
        req.seeker.id,
        req.candidates.len(),
        limit
    );

    let result = state
        .matcher()
        .find_mutual_matches(&req.seeker, &req.candidates, limit);

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
        blocked: result.blocked,
        errors: result.errors,
    })
}
