//! Scan-ordered route of requested floors
//!
//! The route collects requested floors and turns them into the order the car
//! visits them: keep travelling in the current direction until every request
//! that direction reaches is served, then reverse.

use crate::simulation::{ElevatorError, ElevatorResult};
use crate::types::{Direction, Floor};
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

/// Requested floors and the sequence the car will visit them in
#[derive(Debug, Clone)]
pub struct Route {
    /// Floors requested but not yet sequenced
    pending: BTreeSet<Floor>,
    /// Visitation order produced by the last build
    targets: VecDeque<Floor>,
    /// Floor the next popped target is compared against to derive direction
    reference_floor: Floor,
    /// Direction of the most recently consumed target
    direction: Direction,
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

impl Route {
    /// Create an empty route starting at floor 0 heading up
    pub fn new() -> Self {
        Self {
            pending: BTreeSet::new(),
            targets: VecDeque::new(),
            reference_floor: 0,
            direction: Direction::Up,
        }
    }

    /// Record a requested floor. Adding a floor that is already pending is a no-op.
    ///
    /// No range check happens here; callers validate floors first.
    pub fn add_selection(&mut self, floor: Floor) {
        self.pending.insert(floor);
    }

    /// Compute the visitation order for a car standing at `current_floor`.
    ///
    /// Unvisited targets from the previous build are merged with the pending
    /// selections before re-partitioning, so new floors are folded into the
    /// running scan rather than appended after it. The floor the car stands on
    /// is dropped. Does nothing when there are no pending selections.
    pub fn build(&mut self, current_floor: Floor) {
        if self.pending.is_empty() {
            return;
        }

        self.pending.extend(self.targets.drain(..));

        let above = self.pending.range(current_floor.saturating_add(1)..).copied();
        let below = self.pending.range(..current_floor).rev().copied();

        match self.direction {
            Direction::Up => self.targets.extend(above.chain(below)),
            Direction::Down => self.targets.extend(below.chain(above)),
        }

        self.pending.clear();
        self.reference_floor = current_floor;

        debug!(
            current_floor,
            direction = %self.direction,
            targets = ?self.targets,
            "Route built"
        );
    }

    /// Pop the next target and update the direction flag.
    ///
    /// The direction is `Up` when the target lies above the previously popped
    /// target (or above the floor of the last build for the first pop after a
    /// build), `Down` otherwise.
    pub fn next(&mut self) -> ElevatorResult<Floor> {
        let floor = self.targets.pop_front().ok_or(ElevatorError::EmptySequence)?;

        self.direction = if floor > self.reference_floor { Direction::Up } else { Direction::Down };
        self.reference_floor = floor;

        Ok(floor)
    }

    /// Whether there is a target left to visit
    pub fn has_next(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Whether the direction flag currently points up
    pub fn is_up_direction(&self) -> bool {
        self.direction.is_up()
    }

    /// Current direction flag
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sequenced targets in visiting order
    pub fn targets(&self) -> Vec<Floor> {
        self.targets.iter().copied().collect()
    }

    /// Number of pending (not yet sequenced) selections
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(route: &mut Route) -> Vec<Floor> {
        let mut visited = Vec::new();
        while route.has_next() {
            visited.push(route.next().unwrap());
        }
        visited
    }

    #[test]
    fn test_new_route_is_empty_and_heading_up() {
        let route = Route::new();
        assert!(!route.has_next());
        assert!(route.is_up_direction());
        assert_eq!(route.pending_count(), 0);
    }

    #[test]
    fn test_add_selection_is_idempotent() {
        let mut route = Route::new();
        route.add_selection(4);
        route.add_selection(4);
        assert_eq!(route.pending_count(), 1);

        route.build(0);
        assert_eq!(route.targets(), vec![4]);
    }

    #[test]
    fn test_build_without_selections_keeps_sequence() {
        let mut route = Route::new();
        route.add_selection(3);
        route.add_selection(6);
        route.build(0);

        route.build(5);
        assert_eq!(route.targets(), vec![3, 6]);
    }

    #[test]
    fn test_build_drops_current_floor() {
        let mut route = Route::new();
        route.add_selection(2);
        route.add_selection(5);
        route.build(2);
        assert_eq!(route.targets(), vec![5]);
        assert_eq!(route.pending_count(), 0);
    }

    #[test]
    fn test_next_on_empty_route_fails() {
        let mut route = Route::new();
        assert!(matches!(route.next(), Err(ElevatorError::EmptySequence)));
        assert!(route.is_up_direction());
    }

    #[test]
    fn test_direction_follows_popped_targets() {
        let mut route = Route::new();
        route.add_selection(1);
        route.add_selection(7);
        route.add_selection(6);
        route.build(3);

        assert_eq!(route.next().unwrap(), 6);
        assert!(route.is_up_direction());
        assert_eq!(route.next().unwrap(), 7);
        assert!(route.is_up_direction());
        assert_eq!(route.next().unwrap(), 1);
        assert_eq!(route.direction(), Direction::Down);
    }

    #[test]
    fn test_first_pop_after_build_compares_against_build_floor() {
        let mut route = Route::new();
        route.add_selection(5);
        route.build(0);
        assert_eq!(drain(&mut route), vec![5]);
        assert!(route.is_up_direction());

        // Built from floor 8: reaching 6 is downward travel even though 6 is
        // above the previously popped 5.
        route.add_selection(6);
        route.build(8);
        assert_eq!(route.next().unwrap(), 6);
        assert!(!route.is_up_direction());
    }
}
