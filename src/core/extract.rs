use crate::models::{MatchedPair, Participant};
use std::collections::HashSet;

/// Flatten a left -> right pairing into distinct pairs
///
/// A pair is emitted only if neither endpoint was emitted before, so the
/// output never repeats a participant even if the pairing does.
pub fn extract_pairs<'a, I>(pairing: I) -> Vec<MatchedPair>
where
    I: IntoIterator<Item = (&'a Participant, &'a Participant)>,
{
    let mut consumed: HashSet<&Participant> = HashSet::new();
    let mut pairs = Vec::new();

    for (left, right) in pairing {
        if consumed.contains(left) || consumed.contains(right) {
            continue;
        }
        consumed.insert(left);
        consumed.insert(right);
        pairs.push(MatchedPair {
            left: left.clone(),
            right: right.clone(),
        });
    }

    pairs
}
