//! core::graph::lanes
//!
//! Pool of integer lane indices used while laying out one history window.
//!
//! # Invariants
//!
//! - `allocate` always returns the lowest lane that is not active
//! - A lane is reserved for at most one upcoming commit at a time
//! - A released lane is immediately eligible for reuse

use std::collections::HashMap;

/// Allocates, reserves and releases lanes.
///
/// Lanes are tracked in a slot vector; `allocate` scans it for the first
/// free slot.
///
/// # Example
///
/// ```
/// use lanegraph::core::graph::LaneAllocator;
///
/// let mut lanes = LaneAllocator::new();
/// assert_eq!(lanes.allocate(), 0);
/// assert_eq!(lanes.allocate(), 1);
///
/// lanes.release(0);
/// assert_eq!(lanes.allocate(), 0);
///
/// lanes.reserve(1, "parent");
/// assert_eq!(lanes.claim("parent"), Some(1));
/// assert_eq!(lanes.claim("parent"), None);
/// ```
#[derive(Debug, Default)]
pub struct LaneAllocator<'a> {
    /// `slots[lane]` is true while the lane is active
    slots: Vec<bool>,
    /// Lanes pinned for commits that have not been processed yet
    reservations: HashMap<&'a str, usize>,
}

impl<'a> LaneAllocator<'a> {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lowest inactive lane and mark it active.
    pub fn allocate(&mut self) -> usize {
        match self.slots.iter().position(|active| !active) {
            Some(lane) => {
                self.slots[lane] = true;
                lane
            }
            None => {
                self.slots.push(true);
                self.slots.len() - 1
            }
        }
    }

    /// Pin `lane` for the not-yet-processed commit `sha`.
    ///
    /// The lane is marked active. An existing reservation for the same sha
    /// is replaced; callers check [`reservation`](Self::reservation) first
    /// when the first reservation must win.
    pub fn reserve(&mut self, lane: usize, sha: &'a str) {
        self.mark_active(lane);
        self.reservations.insert(sha, lane);
    }

    /// The lane reserved for `sha`, if any.
    pub fn reservation(&self, sha: &str) -> Option<usize> {
        self.reservations.get(sha).copied()
    }

    /// Remove and return the lane reserved for `sha`.
    ///
    /// The lane stays active; ownership passes to the caller.
    pub fn claim(&mut self, sha: &str) -> Option<usize> {
        self.reservations.remove(sha)
    }

    /// Mark `lane` inactive so it can be reused.
    ///
    /// Releasing a lane that is not active is a no-op.
    pub fn release(&mut self, lane: usize) {
        if let Some(slot) = self.slots.get_mut(lane) {
            *slot = false;
        }
    }

    /// Whether `lane` is currently active.
    pub fn is_active(&self, lane: usize) -> bool {
        self.slots.get(lane).copied().unwrap_or(false)
    }

    /// Number of active lanes.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|active| **active).count()
    }

    /// Number of outstanding reservations.
    pub fn reserved_count(&self) -> usize {
        self.reservations.len()
    }

    fn mark_active(&mut self, lane: usize) {
        if lane >= self.slots.len() {
            self.slots.resize(lane + 1, false);
        }
        self.slots[lane] = true;
    }
}
