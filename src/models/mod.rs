// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Side, ParseSideError, Participant, RegistrationPolicy, Declaration, DeclarationTally, MatchedPair, Matching, MutualInterest, MatchReport};
pub use requests::{RegisterRequest, DeclarationRequest};
pub use responses::{MatchingResponse, HealthResponse, ErrorResponse, RegisterResponse, DeclarationResponse, RosterResponse, GraphResponse};
