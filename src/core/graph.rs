use crate::models::{MutualInterest, Participant};
use std::collections::{BTreeMap, BTreeSet};

/// Confirmed reciprocal interest
///
/// Stored as `confirming participant -> {partners}`, but an edge means both
/// ends like each other. Edges are never removed, so `revision` only grows.
#[derive(Debug, Clone, Default)]
pub struct MutualGraph {
    adjacency: BTreeMap<Participant, BTreeSet<Participant>>,
    edges: usize,
    revision: u64,
}

impl MutualGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the edge `from -> to`; returns false if it already existed in
    /// either direction
    pub fn add_edge(&mut self, from: Participant, to: Participant) -> bool {
        if self.contains(&from, &to) {
            return false;
        }
        self.adjacency.entry(from).or_default().insert(to);
        self.edges += 1;
        self.revision += 1;
        true
    }

    /// Symmetric membership test
    pub fn contains(&self, u: &Participant, v: &Participant) -> bool {
        let directed = |a: &Participant, b: &Participant| {
            self.adjacency.get(a).is_some_and(|set| set.contains(b))
        };
        directed(u, v) || directed(v, u)
    }

    /// Directed neighbors recorded under `participant`
    pub fn neighbors(&self, participant: &Participant) -> Option<&BTreeSet<Participant>> {
        self.adjacency.get(participant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Participant, &BTreeSet<Participant>)> {
        self.adjacency.iter()
    }

    /// Every edge once, as stored
    pub fn edges(&self) -> impl Iterator<Item = (&Participant, &Participant)> {
        self.adjacency
            .iter()
            .flat_map(|(from, partners)| partners.iter().map(move |to| (from, to)))
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Distinct participants touching at least one edge
    pub fn participant_count(&self) -> usize {
        let mut seen: BTreeSet<&Participant> = BTreeSet::new();
        for (from, to) in self.edges() {
            seen.insert(from);
            seen.insert(to);
        }
        seen.len()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.edges == 0
    }

    /// Symmetric view: everyone with their mutual partners, sorted
    pub fn mutual_interests(&self) -> Vec<MutualInterest> {
        let mut view: BTreeMap<&Participant, BTreeSet<&Participant>> = BTreeMap::new();
        for (from, to) in self.edges() {
            view.entry(from).or_default().insert(to);
            view.entry(to).or_default().insert(from);
        }
        view.into_iter()
            .map(|(participant, partners)| MutualInterest {
                participant: participant.clone(),
                mutual_interests: partners.into_iter().cloned().collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;

    fn p(name: &str, side: Side) -> Participant {
        Participant::new(name, side)
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let mut graph = MutualGraph::new();
        assert!(graph.add_edge(p("ann", Side::A), p("ben", Side::B)));
        assert!(!graph.add_edge(p("ann", Side::A), p("ben", Side::B)));
        assert!(!graph.add_edge(p("ben", Side::B), p("ann", Side::A)));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.revision(), 1);
    }

    #[test]
    fn test_contains_is_symmetric() {
        let mut graph = MutualGraph::new();
        graph.add_edge(p("ben", Side::B), p("ann", Side::A));

        assert!(graph.contains(&p("ann", Side::A), &p("ben", Side::B)));
        assert!(graph.contains(&p("ben", Side::B), &p("ann", Side::A)));
        assert!(!graph.contains(&p("ann", Side::B), &p("ben", Side::B)));
    }

    #[test]
    fn test_mutual_interests_view() {
        let mut graph = MutualGraph::new();
        graph.add_edge(p("ann", Side::A), p("ben", Side::B));
        graph.add_edge(p("cat", Side::B), p("ann", Side::A));

        let view = graph.mutual_interests();
        assert_eq!(view.len(), 3);
        assert_eq!(view[0].participant, p("ann", Side::A));
        assert_eq!(view[0].mutual_interests.len(), 2);
        assert_eq!(graph.participant_count(), 3);
    }
}
