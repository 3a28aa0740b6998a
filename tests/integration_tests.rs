// Integration tests for Mutual Match

use mutual_match::core::{maximum_matching, Matcher, MutualGraph};
use mutual_match::models::{Declaration, Matching, Participant, Side};
use mutual_match::services::parse_roster;
use std::collections::HashSet;

fn a(name: &str) -> Participant {
    Participant::new(name, Side::A)
}

fn b(name: &str) -> Participant {
    Participant::new(name, Side::B)
}

/// Largest matching by exhaustive search; `adj[u]` lists right indices
fn brute_force_max(adj: &[Vec<usize>], u: usize, used: &mut Vec<bool>) -> usize {
    if u == adj.len() {
        return 0;
    }
    let mut best = brute_force_max(adj, u + 1, used);
    for &v in &adj[u] {
        if !used[v] {
            used[v] = true;
            best = best.max(1 + brute_force_max(adj, u + 1, used));
            used[v] = false;
        }
    }
    best
}

fn assert_disjoint(matching: &Matching) {
    let mut seen = HashSet::new();
    for pair in &matching.pairs {
        assert!(seen.insert(pair.left.clone()), "{} matched twice", pair.left);
        assert!(seen.insert(pair.right.clone()), "{} matched twice", pair.right);
        assert_ne!(pair.left.side, pair.right.side);
    }
}

#[test]
fn test_scenario_single_mutual_pair() {
    let mut matcher = Matcher::strict();
    matcher.register("A", Side::A);
    matcher.register("B", Side::B);

    matcher.declare("A", "B").unwrap();
    matcher.declare("B", "A").unwrap();

    assert_eq!(matcher.graph().edge_count(), 1);
    let matching = matcher.compute();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching.pairs[0].names(), ("A", "B"));
}

#[test]
fn test_scenario_same_side_never_matches() {
    let mut matcher = Matcher::strict();
    matcher.register("A", Side::A);
    matcher.register("B", Side::A);

    assert_eq!(matcher.declare("A", "B").unwrap(), Declaration::Discarded);
    assert_eq!(matcher.declare("B", "A").unwrap(), Declaration::Discarded);

    assert!(matcher.graph().is_empty());
    assert!(matcher.compute().is_empty());
}

#[test]
fn test_reciprocity_independent_of_order() {
    for (first, second) in [("A", "B"), ("B", "A")] {
        let mut matcher = Matcher::strict();
        matcher.register("A", Side::A);
        matcher.register("B", Side::B);

        assert_eq!(matcher.declare(first, second).unwrap(), Declaration::Recorded);
        assert_eq!(matcher.declare(second, first).unwrap(), Declaration::Promoted);
        assert_eq!(matcher.graph().edge_count(), 1);
        assert!(matcher.graph().contains(&a("A"), &b("B")));
    }
}

#[test]
fn test_repeated_reciprocity_adds_one_edge() {
    let mut matcher = Matcher::strict();
    matcher.register("A", Side::A);
    matcher.register("B", Side::B);

    matcher.declare("A", "B").unwrap();
    matcher.declare("B", "A").unwrap();
    matcher.declare("B", "A").unwrap();
    matcher.declare("A", "B").unwrap();

    assert_eq!(matcher.graph().edge_count(), 1);
}

#[test]
fn test_scenario_complete_k33() {
    let mut matcher = Matcher::strict();
    let lefts = ["l1", "l2", "l3"];
    let rights = ["r1", "r2", "r3"];
    for name in lefts {
        matcher.register(name, Side::A);
    }
    for name in rights {
        matcher.register(name, Side::B);
    }
    for name in lefts {
        matcher.declare_all(name, &rights).unwrap();
    }
    for name in rights {
        matcher.declare_all(name, &lefts).unwrap();
    }

    assert_eq!(matcher.graph().edge_count(), 9);
    let matching = matcher.compute();
    assert_eq!(matching.len(), 3);
    assert_disjoint(&matching);
}

#[test]
fn test_scenario_isolated_left_vertex_unmatched() {
    let mut matcher = Matcher::strict();
    for name in ["l1", "l2", "lonely"] {
        matcher.register(name, Side::A);
    }
    matcher.register("r1", Side::B);
    matcher.declare_all("lonely", &["r1"]).unwrap();
    matcher.declare_all("l1", &["r1"]).unwrap();
    matcher.declare_all("l2", &["r1"]).unwrap();
    matcher.declare_all("r1", &["l1", "l2"]).unwrap();

    let matching = matcher.compute();
    assert_eq!(matching.len(), 1);
    assert!(matching.partner_of(&a("lonely")).is_none());
}

#[test]
fn test_compute_is_idempotent() {
    let roster = parse_roster(
        "a1 0\na2 0\na3 0\nb1 1\nb2 1\nEND\n\
         a1 b1 b2\na2 b1\na3 b2\nb1 a1 a2\nb2 a1 a3\n",
    )
    .unwrap();
    let mut matcher = Matcher::strict();
    roster.apply(&mut matcher).unwrap();

    let first = matcher.compute();
    let second = matcher.compute();
    assert_eq!(first.len(), second.len());
    assert_eq!(first.len(), 2);
}

#[test]
fn test_maximum_against_brute_force_all_3x3_graphs() {
    let lefts = [a("u0"), a("u1"), a("u2")];
    let rights = [b("v0"), b("v1"), b("v2")];

    for mask in 0u32..512 {
        let mut graph = MutualGraph::new();
        let mut adj = vec![Vec::new(); 3];
        for bit in 0usize..9 {
            if mask & (1 << bit) != 0 {
                let (u, v) = (bit / 3, bit % 3);
                adj[u].push(v);
                // Alternate the stored direction to exercise orientation
                if bit % 2 == 0 {
                    graph.add_edge(lefts[u].clone(), rights[v].clone());
                } else {
                    graph.add_edge(rights[v].clone(), lefts[u].clone());
                }
            }
        }

        let matching = maximum_matching(&graph);
        let expected = brute_force_max(&adj, 0, &mut vec![false; 3]);
        assert_eq!(matching.len(), expected, "mask {:#011b}", mask);
        assert_disjoint(&matching);
        for pair in &matching.pairs {
            assert!(graph.contains(&pair.left, &pair.right));
        }
    }
}

#[test]
fn test_maximum_on_structured_graph() {
    // Left i likes right i, i+1 and 7i (mod n)
    let n = 40;
    let mut graph = MutualGraph::new();
    for i in 0..n {
        for j in [i, (i + 1) % n, (i * 7) % n] {
            graph.add_edge(a(&format!("u{:02}", i)), b(&format!("v{:02}", j)));
        }
    }

    let matching = maximum_matching(&graph);
    assert_eq!(matching.len(), n);
    assert_disjoint(&matching);
}

#[test]
fn test_lenient_policy_end_to_end() {
    let mut matcher = Matcher::lenient();
    matcher.register("A", Side::A);
    matcher.declare_all("A", &["X", "Y"]).unwrap();
    matcher.declare_all("X", &["A"]).unwrap();

    assert_eq!(matcher.side_of("Y"), Some(Side::B));
    let matching = matcher.compute();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching.pairs[0].right, b("X"));
}
