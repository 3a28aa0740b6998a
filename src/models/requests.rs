use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Side;

/// Request to register a participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub side: Side,
}

/// Request to submit one participant's likes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeclarationRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub likes: Vec<String>,
}
