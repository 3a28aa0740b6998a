use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Matcher, MatchError};
use crate::models::{
    DeclarationRequest, DeclarationResponse, ErrorResponse, GraphResponse, HealthResponse,
    MatchReport, MatchingResponse, Participant, RegisterRequest, RegisterResponse, RosterResponse,
};
use crate::services::{parse_roster, MatchCache, RosterError};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<RwLock<Matcher>>,
    pub cache: MatchCache,
    pub max_likes: usize,
}

impl AppState {
    pub fn new(matcher: Matcher, cache: MatchCache, max_likes: usize) -> Self {
        Self {
            matcher: Arc::new(RwLock::new(matcher)),
            cache,
            max_likes,
        }
    }
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/participants", web::post().to(register_participant))
        .route("/declarations", web::post().to(submit_declaration))
        .route("/roster", web::post().to(ingest_roster))
        .route("/graph", web::get().to(get_graph))
        .route("/matching/compute", web::post().to(compute_matching));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn match_error_response(err: &MatchError) -> HttpResponse {
    match err {
        MatchError::UnknownParticipant(_) => {
            error_response(actix_web::http::StatusCode::NOT_FOUND, "Unknown participant", err.to_string())
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let matcher = state.matcher.read().await;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        participants: matcher.registry().len(),
        edges: matcher.graph().edge_count(),
        registration: matcher.policy(),
        cache: state.cache.stats(),
    })
}

/// Register participant endpoint
///
/// POST /api/v1/participants
///
/// Request body:
/// ```json
/// { "name": "string", "side": "a|b" }
/// ```
async fn register_participant(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let replaced = state.matcher.write().await.register(&req.name, req.side);
    tracing::info!("Registered {} on side {} (replaced: {})", req.name, req.side, replaced);

    HttpResponse::Ok().json(RegisterResponse {
        participant: Participant::new(req.name.clone(), req.side),
        replaced,
    })
}

/// Submit declaration endpoint
///
/// POST /api/v1/declarations
///
/// Request body:
/// ```json
/// { "name": "string", "likes": ["string"] }
/// ```
async fn submit_declaration(
    state: web::Data<AppState>,
    req: web::Json<DeclarationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }
    if req.likes.len() > state.max_likes {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Too many likes",
            format!("At most {} likes per declaration", state.max_likes),
        );
    }

    let mut matcher = state.matcher.write().await;
    match matcher.declare_all(&req.name, req.likes.as_slice()) {
        Ok(tally) => {
            tracing::debug!(
                "Declaration from {}: {} recorded, {} promoted, {} discarded",
                req.name,
                tally.recorded,
                tally.promoted,
                tally.discarded
            );
            HttpResponse::Ok().json(DeclarationResponse {
                name: req.name.clone(),
                tally,
                edges: matcher.graph().edge_count(),
            })
        }
        Err(e) => {
            tracing::warn!("Rejected declaration from {}: {}", req.name, e);
            match_error_response(&e)
        }
    }
}

/// Roster ingestion endpoint
///
/// POST /api/v1/roster
///
/// Plain-text body in the roster format. The roster is applied to a copy of
/// the engine, which replaces the live one only if every record succeeds.
async fn ingest_roster(state: web::Data<AppState>, body: String) -> impl Responder {
    let roster = match parse_roster(&body) {
        Ok(roster) => roster,
        Err(e) => {
            tracing::warn!("Rejected roster: {}", e);
            return error_response(
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid roster",
                e.to_string(),
            );
        }
    };

    let mut matcher = state.matcher.write().await;
    let mut staged = matcher.clone();
    match roster.apply(&mut staged) {
        Ok(summary) => {
            *matcher = staged;
            state.cache.invalidate_all();
            tracing::info!(
                "Ingested roster: {} participants, {} declaration lines, {} edges",
                summary.participants,
                summary.declarations,
                matcher.graph().edge_count()
            );
            HttpResponse::Ok().json(RosterResponse {
                participants: summary.participants,
                declarations: summary.declarations,
                tally: summary.tally,
                edges: matcher.graph().edge_count(),
            })
        }
        Err(RosterError::Match { line, source }) => {
            tracing::warn!("Roster rejected at line {}: {}", line, source);
            error_response(
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid roster",
                format!("line {}: {}", line, source),
            )
        }
        Err(e) => error_response(
            actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
            "Invalid roster",
            e.to_string(),
        ),
    }
}

/// Mutual-interest graph endpoint
///
/// GET /api/v1/graph
async fn get_graph(state: web::Data<AppState>) -> impl Responder {
    let matcher = state.matcher.read().await;
    let graph = matcher.graph();

    HttpResponse::Ok().json(GraphResponse {
        revision: graph.revision(),
        edges: graph.edge_count(),
        entries: graph.mutual_interests(),
    })
}

/// Compute matching endpoint
///
/// POST /api/v1/matching/compute
///
/// Serves the cached report when the graph has not changed since the last run.
/// Misses run Hopcroft-Karp on the blocking pool under an owned read guard.
async fn compute_matching(state: web::Data<AppState>) -> impl Responder {
    let current = state.matcher.read().await.graph().revision();

    let (report, cached) = match state.cache.get(current).await {
        Some(report) => (report, true),
        None => {
            let matcher = state.matcher.clone().read_owned().await;
            // A writer may have added edges since the lookup
            let revision = matcher.graph().revision();
            let matching = match web::block(move || matcher.compute()).await {
                Ok(matching) => matching,
                Err(e) => {
                    tracing::error!("Matching task failed for revision {}: {}", revision, e);
                    return error_response(
                        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                        "Matching failed",
                        e.to_string(),
                    );
                }
            };
            let report = Arc::new(MatchReport {
                run_id: uuid::Uuid::new_v4(),
                computed_at: chrono::Utc::now(),
                revision,
                matching,
            });
            state.cache.insert(report.clone()).await;
            (report, false)
        }
    };

    let revision = report.revision;
    tracing::info!(
        "Matching for revision {}: {} pairs (cached: {})",
        revision,
        report.matching.len(),
        cached
    );

    HttpResponse::Ok().json(MatchingResponse {
        run_id: report.run_id.to_string(),
        computed_at: report.computed_at,
        revision,
        cached,
        size: report.matching.len(),
        phases: report.matching.phases,
        augmentations: report.matching.augmentations,
        pairs: report.matching.pairs.clone(),
    })
}
