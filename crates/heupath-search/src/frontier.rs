//! The search frontier: a min-priority queue of discovered, unexpanded cells.
//!
//! Entries are ordered by `(f, seq)`: ascending f-score, then ascending
//! insertion sequence. Coordinates never take part in the ordering, so ties
//! are broken purely by discovery order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use heupath_core::Coord;

/// A queued cell with its priority key.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrontierEntry {
    pub f: f64,
    pub seq: u64,
    pub coord: Coord,
}

impl FrontierEntry {
    #[inline]
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        other.key_cmp(self)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How a cheaper route to a cell that is already queued is handled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrontierPolicy {
    /// The queued entry keeps the priority it was pushed with.
    #[default]
    KeepFirst,
    /// The queued entry's priority is lowered to the new f-score.
    DecreaseKey,
}

/// Min-priority queue keyed on `(f, seq)` with O(1) membership tests.
///
/// Each queued coordinate has exactly one live entry. Lowering a key pushes
/// a replacement that reuses the original sequence number; the superseded
/// entry stays in the heap and is dropped when it surfaces.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    live: HashMap<Coord, (u64, f64)>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `coord` with priority `f` under the next sequence number and
    /// return that number. If `coord` was already queued, its old entry is
    /// superseded.
    pub fn push(&mut self, coord: Coord, f: f64) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(coord, (seq, f));
        self.heap.push(FrontierEntry { f, seq, coord });
        seq
    }

    /// Lower the priority of a queued `coord` to `f`, keeping its sequence
    /// number. Returns `false` if `coord` is not queued or `f` is not lower.
    pub fn decrease_key(&mut self, coord: Coord, f: f64) -> bool {
        let Some(&(seq, old)) = self.live.get(&coord) else {
            return false;
        };
        if f.total_cmp(&old) != Ordering::Less {
            return false;
        }
        self.live.insert(coord, (seq, f));
        self.heap.push(FrontierEntry { f, seq, coord });
        true
    }

    /// Remove and return the entry with the smallest `(f, seq)` key.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        while let Some(entry) = self.heap.pop() {
            match self.live.get(&entry.coord) {
                Some(&(seq, f)) if seq == entry.seq && f.to_bits() == entry.f.to_bits() => {
                    self.live.remove(&entry.coord);
                    return Some(entry);
                }
                // Superseded.
                _ => continue,
            }
        }
        None
    }

    /// Whether `coord` is currently queued.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.live.contains_key(&coord)
    }

    /// Current priority of a queued `coord`.
    #[inline]
    pub fn priority(&self, coord: Coord) -> Option<f64> {
        self.live.get(&coord).map(|&(_, f)| f)
    }

    /// Number of queued coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Queued coordinates, in no particular order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.live.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn pops_by_f_then_insertion_order() {
        let mut fr = Frontier::new();
        fr.push(c(0, 0), 2.0);
        fr.push(c(0, 1), 1.0);
        fr.push(c(0, 2), 2.0);
        fr.push(c(0, 3), 1.0);
        let order: Vec<_> = std::iter::from_fn(|| fr.pop()).map(|e| e.coord).collect();
        assert_eq!(order, vec![c(0, 1), c(0, 3), c(0, 0), c(0, 2)]);
    }

    #[test]
    fn sequence_numbers_are_monotonic() {
        let mut fr = Frontier::new();
        assert_eq!(fr.push(c(1, 1), 5.0), 0);
        assert_eq!(fr.push(c(2, 2), 5.0), 1);
        assert_eq!(fr.push(c(3, 3), 0.5), 2);
        assert_eq!(fr.pop().map(|e| (e.seq, e.coord)), Some((2, c(3, 3))));
    }

    #[test]
    fn ties_ignore_coordinates() {
        let mut fr = Frontier::new();
        fr.push(c(9, 9), 3.0);
        fr.push(c(0, 0), 3.0);
        assert_eq!(fr.pop().map(|e| e.coord), Some(c(9, 9)));
    }

    #[test]
    fn membership_tracks_push_and_pop() {
        let mut fr = Frontier::new();
        assert!(fr.is_empty());
        fr.push(c(1, 2), 1.0);
        assert!(fr.contains(c(1, 2)));
        assert_eq!(fr.len(), 1);
        assert_eq!(fr.priority(c(1, 2)), Some(1.0));
        fr.pop();
        assert!(!fr.contains(c(1, 2)));
        assert!(fr.pop().is_none());
    }

    #[test]
    fn decrease_key_reorders_and_keeps_sequence() {
        let mut fr = Frontier::new();
        fr.push(c(0, 0), 4.0);
        fr.push(c(0, 1), 3.0);
        fr.push(c(0, 2), 2.0);
        assert!(fr.decrease_key(c(0, 0), 2.0));
        assert_eq!(fr.len(), 3);
        // (0, 0) now ties with (0, 2) but was inserted first.
        let first = fr.pop().unwrap();
        assert_eq!((first.coord, first.seq, first.f), (c(0, 0), 0, 2.0));
        assert_eq!(fr.pop().map(|e| e.coord), Some(c(0, 2)));
        assert_eq!(fr.pop().map(|e| e.coord), Some(c(0, 1)));
        // The superseded (0, 0) entry is never returned.
        assert!(fr.pop().is_none());
    }

    #[test]
    fn decrease_key_rejects_higher_or_unknown() {
        let mut fr = Frontier::new();
        fr.push(c(0, 0), 2.0);
        assert!(!fr.decrease_key(c(0, 0), 2.0));
        assert!(!fr.decrease_key(c(0, 0), 3.0));
        assert!(!fr.decrease_key(c(5, 5), 0.0));
        assert_eq!(fr.priority(c(0, 0)), Some(2.0));
    }

    #[test]
    fn repush_supersedes_old_entry() {
        let mut fr = Frontier::new();
        fr.push(c(0, 0), 1.0);
        fr.push(c(0, 1), 2.0);
        fr.push(c(0, 0), 3.0);
        assert_eq!(fr.len(), 2);
        assert_eq!(fr.pop().map(|e| e.coord), Some(c(0, 1)));
        assert_eq!(fr.pop().map(|e| (e.coord, e.seq)), Some((c(0, 0), 2)));
        assert!(fr.pop().is_none());
    }
}
