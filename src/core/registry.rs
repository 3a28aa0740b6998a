use crate::models::Side;
use std::collections::{HashMap, HashSet};

type LikeBook = HashMap<String, HashSet<String>>;

/// One-sided declarations, kept in one book per side
///
/// A name lives in exactly one book at a time, so its side is always known
/// explicitly rather than inferred from absence.
#[derive(Debug, Clone, Default)]
pub struct SideRegistry {
    side_a: LikeBook,
    side_b: LikeBook,
}

impl SideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn book(&self, side: Side) -> &LikeBook {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    fn book_mut(&mut self, side: Side) -> &mut LikeBook {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        }
    }

    /// Register `name` on `side` with an empty declaration set
    ///
    /// Re-registering resets the set; registering on the other side moves
    /// the name. Returns true if the name was already known.
    pub fn register(&mut self, name: &str, side: Side) -> bool {
        let moved = self.book_mut(side.opposite()).remove(name).is_some();
        let replaced = self
            .book_mut(side)
            .insert(name.to_string(), HashSet::new())
            .is_some();
        moved || replaced
    }

    pub fn side_of(&self, name: &str) -> Option<Side> {
        if self.side_a.contains_key(name) {
            Some(Side::A)
        } else if self.side_b.contains_key(name) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.side_of(name).is_some()
    }

    /// Names `name` has declared liking so far
    pub fn likes(&self, name: &str) -> Option<&HashSet<String>> {
        let side = self.side_of(name)?;
        self.book(side).get(name)
    }

    /// Whether `owner` has a pending declaration for `target`
    pub fn contains_like(&self, owner: &str, target: &str) -> bool {
        self.likes(owner).is_some_and(|likes| likes.contains(target))
    }

    /// Record that `owner` likes `target`; no-op if `owner` is unregistered
    pub fn record_like(&mut self, owner: &str, target: &str) -> bool {
        let Some(side) = self.side_of(owner) else {
            return false;
        };
        self.book_mut(side)
            .get_mut(owner)
            .is_some_and(|likes| likes.insert(target.to_string()))
    }

    /// Registered names on `side`, sorted
    pub fn names(&self, side: Side) -> Vec<&str> {
        let mut names: Vec<&str> = self.book(side).keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn count(&self, side: Side) -> usize {
        self.book(side).len()
    }

    pub fn len(&self) -> usize {
        self.side_a.len() + self.side_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = SideRegistry::new();
        assert!(!registry.register("ann", Side::A));
        assert!(!registry.register("ben", Side::B));

        assert_eq!(registry.side_of("ann"), Some(Side::A));
        assert_eq!(registry.side_of("ben"), Some(Side::B));
        assert_eq!(registry.side_of("cal"), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reregister_resets_likes() {
        let mut registry = SideRegistry::new();
        registry.register("ann", Side::A);
        registry.record_like("ann", "ben");
        assert!(registry.contains_like("ann", "ben"));

        assert!(registry.register("ann", Side::A));
        assert!(!registry.contains_like("ann", "ben"));
    }

    #[test]
    fn test_reregister_other_side_moves_name() {
        let mut registry = SideRegistry::new();
        registry.register("ann", Side::A);
        assert!(registry.register("ann", Side::B));

        assert_eq!(registry.side_of("ann"), Some(Side::B));
        assert_eq!(registry.count(Side::A), 0);
        assert_eq!(registry.count(Side::B), 1);
    }

    #[test]
    fn test_record_like_requires_registration() {
        let mut registry = SideRegistry::new();
        assert!(!registry.record_like("ghost", "ann"));
        assert!(registry.is_empty());
    }
}
