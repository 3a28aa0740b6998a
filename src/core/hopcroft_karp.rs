use crate::core::extract::extract_pairs;
use crate::core::graph::MutualGraph;
use crate::models::{Matching, Participant, Side};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

const INF: u32 = u32::MAX;

/// Bipartite adjacency built from the mutual-interest graph
///
/// Left vertices are side A participants, right vertices side B. Both are
/// indexed in `Participant` order so runs are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Bipartite {
    left: Vec<Participant>,
    right: Vec<Participant>,
    adj: Vec<Vec<usize>>,
}

impl Bipartite {
    pub fn from_graph(graph: &MutualGraph) -> Self {
        let mut oriented: BTreeMap<&Participant, BTreeSet<&Participant>> = BTreeMap::new();
        for (from, to) in graph.edges() {
            let (a, b) = match (from.side, to.side) {
                (Side::A, Side::B) => (from, to),
                (Side::B, Side::A) => (to, from),
                _ => {
                    tracing::warn!("Skipping same-side edge {} -> {}", from, to);
                    continue;
                }
            };
            oriented.entry(a).or_default().insert(b);
        }

        let right_set: BTreeSet<&Participant> = oriented.values().flatten().copied().collect();
        let right_index: BTreeMap<&Participant, usize> = right_set
            .iter()
            .enumerate()
            .map(|(i, p)| (*p, i))
            .collect();

        let mut left = Vec::with_capacity(oriented.len());
        let mut adj = Vec::with_capacity(oriented.len());
        for (u, partners) in &oriented {
            left.push((*u).clone());
            adj.push(partners.iter().map(|v| right_index[v]).collect());
        }

        Self {
            left,
            right: right_set.into_iter().cloned().collect(),
            adj,
        }
    }

    pub fn left(&self) -> &[Participant] {
        &self.left
    }

    pub fn right(&self) -> &[Participant] {
        &self.right
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }
}

/// Hopcroft-Karp maximum bipartite matching state
struct HopcroftKarp<'a> {
    adj: &'a [Vec<usize>],
    pair_left: Vec<Option<usize>>,
    pair_right: Vec<Option<usize>>,
    layer: Vec<u32>,
    queue: VecDeque<usize>,
}

impl<'a> HopcroftKarp<'a> {
    fn new(graph: &'a Bipartite) -> Self {
        Self {
            adj: &graph.adj,
            pair_left: vec![None; graph.left.len()],
            pair_right: vec![None; graph.right.len()],
            layer: vec![INF; graph.left.len()],
            queue: VecDeque::new(),
        }
    }

    /// Layer the left vertices from every free one; true if any free right
    /// vertex is reachable
    fn bfs(&mut self) -> bool {
        self.queue.clear();
        for u in 0..self.adj.len() {
            if self.pair_left[u].is_none() {
                self.layer[u] = 0;
                self.queue.push_back(u);
            } else {
                self.layer[u] = INF;
            }
        }

        let mut found = false;
        while let Some(u) = self.queue.pop_front() {
            for &v in &self.adj[u] {
                match self.pair_right[v] {
                    None => found = true,
                    Some(mate) if self.layer[mate] == INF => {
                        self.layer[mate] = self.layer[u] + 1;
                        self.queue.push_back(mate);
                    }
                    Some(_) => {}
                }
            }
        }
        found
    }

    /// Search an augmenting path from `root` along strictly increasing
    /// layers and flip it. Dead ends are marked INF for the rest of the phase.
    fn augment(&mut self, root: usize) -> bool {
        if self.layer[root] == INF {
            return false;
        }

        // (left vertex, index of the next neighbor to try)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(frame) = stack.last_mut() {
            let u = frame.0;
            let Some(&v) = self.adj[u].get(frame.1) else {
                self.layer[u] = INF;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match self.pair_right[v] {
                None => {
                    for &(w, next) in &stack {
                        let chosen = self.adj[w][next - 1];
                        self.pair_left[w] = Some(chosen);
                        self.pair_right[chosen] = Some(w);
                    }
                    return true;
                }
                Some(mate) if self.layer[mate] == self.layer[u] + 1 => {
                    stack.push((mate, 0));
                }
                Some(_) => {}
            }
        }
        false
    }

    fn run(&mut self) -> (usize, usize) {
        let mut phases = 0;
        let mut augmentations = 0;
        loop {
            phases += 1;
            if !self.bfs() {
                break;
            }
            for u in 0..self.adj.len() {
                if self.pair_left[u].is_none() && self.augment(u) {
                    augmentations += 1;
                }
            }
        }
        (phases, augmentations)
    }
}

/// Compute a maximum matching over `graph`
///
/// O(E * sqrt(V)). Same-side edges are ignored; an empty graph yields an
/// empty matching.
pub fn maximum_matching(graph: &MutualGraph) -> Matching {
    let bipartite = Bipartite::from_graph(graph);
    match_bipartite(&bipartite)
}

pub fn match_bipartite(bipartite: &Bipartite) -> Matching {
    let mut solver = HopcroftKarp::new(bipartite);
    let (phases, augmentations) = solver.run();

    let pairs = extract_pairs(
        solver
            .pair_left
            .iter()
            .enumerate()
            .filter_map(|(u, &v)| v.map(|v| (&bipartite.left[u], &bipartite.right[v]))),
    );

    tracing::debug!(
        "Hopcroft-Karp: {} left, {} right, {} edges -> {} pairs in {} phases",
        bipartite.left.len(),
        bipartite.right.len(),
        bipartite.edge_count(),
        pairs.len(),
        phases
    );

    Matching {
        pairs,
        phases,
        augmentations,
    }
}
