// Service exports
pub mod cache;
pub mod roster;

pub use cache::{MatchCache, CacheStats};
pub use roster::{parse_roster, load_roster_file, Roster, RosterEntry, RosterLikes, RosterError, RosterSummary, SENTINEL};
