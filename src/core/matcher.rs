use crate::core::graph::MutualGraph;
use crate::core::hopcroft_karp::maximum_matching;
use crate::core::registry::SideRegistry;
use crate::models::{Declaration, DeclarationTally, Matching, MutualInterest, Participant, RegistrationPolicy, Side};
use thiserror::Error;

/// Errors raised while ingesting declarations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),
}

/// Mutual-preference matching engine
///
/// # Phases
/// 1. Register participants with their side
/// 2. Ingest one-sided declarations; reciprocal ones become mutual edges
/// 3. Compute a maximum matching over the mutual-interest graph
///
/// Writes must be serialized by the caller; `compute` only reads.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    registry: SideRegistry,
    graph: MutualGraph,
    policy: RegistrationPolicy,
}

impl Matcher {
    pub fn new(policy: RegistrationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn strict() -> Self {
        Self::new(RegistrationPolicy::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(RegistrationPolicy::Lenient)
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Register `name` on `side`, resetting any previous declarations.
    /// Returns true if the name was already registered.
    pub fn register(&mut self, name: &str, side: Side) -> bool {
        let replaced = self.registry.register(name, side);
        if replaced {
            tracing::debug!("Re-registered {} on side {}, likes reset", name, side);
        }
        replaced
    }

    pub fn side_of(&self, name: &str) -> Option<Side> {
        self.registry.side_of(name)
    }

    fn resolve(&mut self, name: &str) -> Result<Side, MatchError> {
        if let Some(side) = self.registry.side_of(name) {
            return Ok(side);
        }
        match self.policy {
            RegistrationPolicy::Strict => Err(MatchError::UnknownParticipant(name.to_string())),
            RegistrationPolicy::Lenient => {
                tracing::debug!("Implicitly registering {} on side {}", name, Side::B);
                self.registry.register(name, Side::B);
                Ok(Side::B)
            }
        }
    }

    /// Record that `name` likes `target`
    ///
    /// Same-side declarations are discarded. If `target` already declared
    /// `name`, the pair is promoted to a mutual-interest edge instead of
    /// being recorded; the earlier declaration stays in the registry.
    pub fn declare(&mut self, name: &str, target: &str) -> Result<Declaration, MatchError> {
        let own_side = self.resolve(name)?;
        let target_side = self.resolve(target)?;

        if own_side == target_side {
            return Ok(Declaration::Discarded);
        }

        if self.registry.contains_like(target, name) {
            let from = Participant::new(name, own_side);
            let to = Participant::new(target, target_side);
            if self.graph.add_edge(from, to) {
                tracing::debug!("Mutual interest confirmed: {} <-> {}", name, target);
            }
            return Ok(Declaration::Promoted);
        }

        self.registry.record_like(name, target);
        Ok(Declaration::Recorded)
    }

    /// Process one participant's likes in order
    ///
    /// Under the strict policy every name is checked first, so a record
    /// naming an unknown participant is rejected without side effects.
    pub fn declare_all<S: AsRef<str>>(
        &mut self,
        name: &str,
        likes: &[S],
    ) -> Result<DeclarationTally, MatchError> {
        if self.policy == RegistrationPolicy::Strict {
            self.check_registered(name, likes)?;
        }

        let mut tally = DeclarationTally::default();
        for like in likes {
            tally.add(self.declare(name, like.as_ref())?);
        }
        Ok(tally)
    }

    fn check_registered<S: AsRef<str>>(&self, name: &str, likes: &[S]) -> Result<(), MatchError> {
        std::iter::once(name)
            .chain(likes.iter().map(AsRef::as_ref))
            .find(|candidate| !self.registry.is_registered(candidate))
            .map_or(Ok(()), |unknown| Err(MatchError::UnknownParticipant(unknown.to_string())))
    }

    pub fn registry(&self) -> &SideRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &MutualGraph {
        &self.graph
    }

    /// Everyone with at least one mutual edge, with their partners
    pub fn mutual_interests(&self) -> Vec<MutualInterest> {
        self.graph.mutual_interests()
    }

    /// Maximum matching over the current mutual-interest graph
    pub fn compute(&self) -> Matching {
        maximum_matching(&self.graph)
    }
}
