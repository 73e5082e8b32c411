//! FIFO frontier of active cells with O(1) membership checks
//!
//! A coordinate is in the membership set if and only if it is queued exactly
//! once. The engine keeps one frontier for burning cells and one for embers.

use std::collections::VecDeque;

use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::grid::Coord;

/// Queue plus membership set
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<Coord>,
    members: FxHashSet<Coord>,
}

impl Frontier {
    /// Create a frontier with room for `capacity` coordinates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            members: FxHashSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Enqueue `coord` at the back. Returns `false` (and changes nothing) if
    /// it is already present.
    pub fn push(&mut self, coord: Coord) -> bool {
        if !self.members.insert(coord) {
            return false;
        }
        self.queue.push_back(coord);
        true
    }

    /// Dequeue the oldest coordinate and drop it from the membership set.
    pub fn pop(&mut self) -> Option<Coord> {
        let coord = self.queue.pop_front()?;
        self.members.remove(&coord);
        Some(coord)
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.members.contains(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued coordinates, oldest first
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.queue.iter().copied()
    }

    /// Queue length matches the membership set and every queued coordinate is
    /// a member.
    pub fn is_consistent(&self) -> bool {
        self.queue.len() == self.members.len()
            && self.queue.iter().all(|coord| self.members.contains(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::with_capacity(4);
        assert!(frontier.push((0, 0)));
        assert!(frontier.push((1, 0)));
        assert!(frontier.push((2, 0)));

        assert_eq!(frontier.pop(), Some((0, 0)));
        assert_eq!(frontier.pop(), Some((1, 0)));
        assert_eq!(frontier.pop(), Some((2, 0)));
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut frontier = Frontier::default();
        assert!(frontier.push((3, 4)));
        assert!(!frontier.push((3, 4)));
        assert_eq!(frontier.len(), 1);
        assert!(frontier.is_consistent());
    }

    #[test]
    fn test_pop_clears_membership() {
        let mut frontier = Frontier::default();
        frontier.push((1, 1));
        assert!(frontier.contains((1, 1)));

        frontier.pop();
        assert!(!frontier.contains((1, 1)));

        // Can be queued again once it has left
        assert!(frontier.push((1, 1)));
        assert!(frontier.is_consistent());
    }

    #[test]
    fn test_coords_oldest_first() {
        let mut frontier = Frontier::default();
        for x in 0..5 {
            frontier.push((x, 0));
        }
        frontier.pop();
        let remaining: Vec<_> = frontier.coords().collect();
        assert_eq!(remaining, vec![(1, 0), (2, 0), (3, 0), (4, 0)]);
    }
}
