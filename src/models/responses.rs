use serde::{Deserialize, Serialize};
use crate::models::domain::{
    DeclarationTally, MatchedPair, MutualInterest, Participant, RegistrationPolicy,
};
use crate::services::CacheStats;

/// Response for the compute endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingResponse {
    #[serde(rename = "runId")]
    pub run_id: String,
    #[serde(rename = "computedAt")]
    pub computed_at: chrono::DateTime<chrono::Utc>,
    pub revision: u64,
    pub cached: bool,
    pub size: usize,
    pub phases: usize,
    pub augmentations: usize,
    pub pairs: Vec<MatchedPair>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub participants: usize,
    pub edges: usize,
    pub registration: RegistrationPolicy,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Register participant response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub participant: Participant,
    /// True when the name was already registered and its likes were reset
    pub replaced: bool,
}

/// Declaration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationResponse {
    pub name: String,
    #[serde(flatten)]
    pub tally: DeclarationTally,
    pub edges: usize,
}

/// Roster ingestion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    pub participants: usize,
    pub declarations: usize,
    #[serde(flatten)]
    pub tally: DeclarationTally,
    pub edges: usize,
}

/// Mutual-interest graph listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResponse {
    pub revision: u64,
    pub edges: usize,
    pub entries: Vec<MutualInterest>,
}
