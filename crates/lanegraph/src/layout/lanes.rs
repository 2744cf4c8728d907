//! Live lane occupancy for a single layout pass.
//!
//! A lane is one column of the graph. While the pass walks the commits, each
//! lane is either [`LaneSlot::Free`] or [`LaneSlot::Expecting`] the commit whose
//! line is currently drawn through it. Lanes are never removed or compacted:
//! a freed lane stays in place as a hole and the left-most hole is reused first.
//!
//! [`LaneSlots`] keeps two indexes next to the slot vector so that both lookups
//! the pass needs stay logarithmic:
//!
//! - the ordered set of free lanes, for "left-most free lane";
//! - per expected hash, the ordered set of lanes waiting for it, for
//!   "left-most lane expecting this commit".

use std::collections::{BTreeSet, HashMap};

use log::trace;

/// State of one lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneSlot {
    /// Nothing is drawn through this lane; it may be reused.
    Free,
    /// A line runs through this lane down to the commit with this hash.
    Expecting(String),
}

impl LaneSlot {
    /// Returns `true` if the lane can be reused.
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

/// Ordered, growable sequence of lanes indexed by column.
#[derive(Debug, Default)]
pub struct LaneSlots {
    slots: Vec<LaneSlot>,
    free: BTreeSet<usize>,
    waiting: HashMap<String, BTreeSet<usize>>,
}

impl LaneSlots {
    /// Creates an empty sequence with no lanes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of lanes opened so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the state of the lane at `column`.
    pub fn get(&self, column: usize) -> Option<&LaneSlot> {
        self.slots.get(column)
    }

    /// Returns the number of lanes currently carrying a line.
    pub fn occupied(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns the left-most lane expecting `hash`.
    pub fn expecting(&self, hash: &str) -> Option<usize> {
        self.waiting
            .get(hash)
            .and_then(|lanes| lanes.first().copied())
    }

    /// Returns the left-most free lane.
    pub fn first_free(&self) -> Option<usize> {
        self.free.first().copied()
    }

    /// Picks the lane a commit is drawn in.
    ///
    /// Preference order: the left-most lane already expecting `hash`, then the
    /// left-most free lane, then a new lane appended on the right. The picked
    /// lane is not modified; the caller decides what it carries next.
    pub fn select(&mut self, hash: &str) -> usize {
        if let Some(column) = self.expecting(hash) {
            return column;
        }
        if let Some(column) = self.first_free() {
            return column;
        }
        self.push_free()
    }

    /// Marks `column` as carrying a line down to `hash`.
    ///
    /// # Panics
    ///
    /// Panics if `column` was never opened.
    pub fn reserve(&mut self, column: usize, hash: &str) {
        self.detach(column);
        self.free.remove(&column);
        self.waiting
            .entry(hash.to_string())
            .or_default()
            .insert(column);
        self.slots[column] = LaneSlot::Expecting(hash.to_string());
        trace!(column, hash; "Reserved lane");
    }

    /// Reserves the left-most free lane for `hash`, opening a new lane when
    /// none is free, and returns its column.
    pub fn allocate(&mut self, hash: &str) -> usize {
        let column = match self.first_free() {
            Some(column) => column,
            None => self.push_free(),
        };
        self.reserve(column, hash);
        column
    }

    /// Frees the lane at `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column` was never opened.
    pub fn free(&mut self, column: usize) {
        self.detach(column);
        self.slots[column] = LaneSlot::Free;
        self.free.insert(column);
        trace!(column; "Freed lane");
    }

    /// Frees the left-most lane expecting `hash` and returns its column.
    pub fn release(&mut self, hash: &str) -> Option<usize> {
        let column = self.expecting(hash)?;
        self.free(column);
        Some(column)
    }

    /// Frees every lane expecting `hash`, returning how many were freed.
    pub fn release_all(&mut self, hash: &str) -> usize {
        let Some(columns) = self.waiting.remove(hash) else {
            return 0;
        };
        for &column in &columns {
            self.slots[column] = LaneSlot::Free;
            self.free.insert(column);
        }
        trace!(hash, lanes = columns.len(); "Released stale lanes");
        columns.len()
    }

    /// Appends a free lane and returns its column.
    fn push_free(&mut self) -> usize {
        let column = self.slots.len();
        self.slots.push(LaneSlot::Free);
        self.free.insert(column);
        trace!(column; "Opened lane");
        column
    }

    /// Drops `column` from the waiting index of the hash it currently expects.
    fn detach(&mut self, column: usize) {
        let LaneSlot::Expecting(hash) = &self.slots[column] else {
            return;
        };
        if let Some(columns) = self.waiting.get_mut(hash) {
            columns.remove(&column);
            if columns.is_empty() {
                self.waiting.remove(hash);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_appends_when_nothing_is_free() {
        let mut lanes = LaneSlots::new();
        assert_eq!(lanes.len(), 0);

        assert_eq!(lanes.select("a"), 0);
        lanes.reserve(0, "b");
        assert_eq!(lanes.select("c"), 1);

        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes.get(1), Some(&LaneSlot::Free));
    }

    #[test]
    fn test_select_prefers_expecting_lane() {
        let mut lanes = LaneSlots::new();
        lanes.allocate("x");
        lanes.allocate("y");
        lanes.free(0);

        // Lane 0 is free, but lane 1 already carries the line for `y`
        assert_eq!(lanes.select("y"), 1);
        assert_eq!(lanes.select("z"), 0);
    }

    #[test]
    fn test_allocate_reuses_left_most_hole() {
        let mut lanes = LaneSlots::new();
        for hash in ["a", "b", "c", "d"] {
            lanes.allocate(hash);
        }
        lanes.free(2);
        lanes.free(1);

        assert_eq!(lanes.allocate("e"), 1);
        assert_eq!(lanes.allocate("f"), 2);
        assert_eq!(lanes.allocate("g"), 4);
        assert_eq!(lanes.occupied(), 5);
    }

    #[test]
    fn test_reserve_moves_lane_between_hashes() {
        let mut lanes = LaneSlots::new();
        lanes.allocate("a");
        lanes.reserve(0, "b");

        assert_eq!(lanes.expecting("a"), None);
        assert_eq!(lanes.expecting("b"), Some(0));
        assert_eq!(lanes.get(0), Some(&LaneSlot::Expecting("b".to_string())));
    }

    #[test]
    fn test_duplicate_reservations() {
        let mut lanes = LaneSlots::new();
        lanes.allocate("base");
        lanes.allocate("other");
        lanes.allocate("base");

        assert_eq!(lanes.expecting("base"), Some(0));
        assert_eq!(lanes.release("base"), Some(0));
        assert_eq!(lanes.expecting("base"), Some(2));

        assert_eq!(lanes.release_all("base"), 1);
        assert_eq!(lanes.release_all("base"), 0);
        assert_eq!(lanes.release("base"), None);
        assert_eq!(lanes.occupied(), 1);
        assert!(lanes.get(2).is_some_and(LaneSlot::is_free));
    }
}
