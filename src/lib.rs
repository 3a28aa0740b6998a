//! Mutual Match - pairing service for mutual preferences
//!
//! Participants on two sides declare who they like. Reciprocal declarations
//! become mutual-interest edges, and a maximum matching over those edges is
//! computed with the Hopcroft-Karp algorithm.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchError, MutualGraph, SideRegistry, maximum_matching};
pub use crate::models::{Side, Participant, Declaration, MatchedPair, Matching, RegistrationPolicy};
