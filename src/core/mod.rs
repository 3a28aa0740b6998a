// Core engine exports
pub mod extract;
pub mod graph;
pub mod hopcroft_karp;
pub mod matcher;
pub mod registry;

pub use extract::extract_pairs;
pub use graph::MutualGraph;
pub use hopcroft_karp::{maximum_matching, match_bipartite, Bipartite};
pub use matcher::{Matcher, MatchError};
pub use registry::SideRegistry;
