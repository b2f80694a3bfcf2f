//! Tests for scan-ordered route building
//!
//! Each test drives a [`Route`] directly: floors are selected, the route is
//! built for the floor the car stands on, and targets are popped in order.

use elevator_simulator::elevator::Route;
use elevator_simulator::types::{Direction, Floor};
use elevator_simulator::ElevatorError;

fn drain(route: &mut Route) -> Vec<Floor> {
    let mut visited = Vec::new();
    while route.has_next() {
        visited.push(route.next().unwrap());
    }
    visited
}

fn route_with(floors: &[Floor], current_floor: Floor) -> Route {
    let mut route = Route::new();
    for &floor in floors {
        route.add_selection(floor);
    }
    route.build(current_floor);
    route
}

#[test]
fn test_floors_above_ground_are_visited_ascending() {
    let mut route = route_with(&[2, 7, 4], 0);
    assert_eq!(drain(&mut route), vec![2, 4, 7]);

    let mut route = route_with(&[1, 5, 4], 0);
    assert_eq!(drain(&mut route), vec![1, 4, 5]);
    assert!(!route.has_next());
}

#[test]
fn test_going_up_serves_floors_above_before_reversing() {
    let mut route = route_with(&[1, 7, 6], 3);

    assert_eq!(route.targets(), vec![6, 7, 1]);
    assert_eq!(drain(&mut route), vec![6, 7, 1]);
    assert_eq!(route.direction(), Direction::Down);
}

#[test]
fn test_going_down_serves_floors_below_before_reversing() {
    // 0 -> 5 leaves the route heading up
    let mut route = route_with(&[5], 0);
    assert_eq!(drain(&mut route), vec![5]);
    assert!(route.is_up_direction());

    // 5 -> 4 turns it down
    route.add_selection(4);
    route.build(5);
    assert_eq!(drain(&mut route), vec![4]);
    assert!(!route.is_up_direction());

    route.add_selection(1);
    route.add_selection(7);
    route.add_selection(6);
    route.build(4);

    assert_eq!(drain(&mut route), vec![1, 6, 7]);
    assert!(route.is_up_direction());
    assert!(!route.has_next());
}

#[test]
fn test_new_floor_on_the_way_keeps_direction() {
    let mut route = route_with(&[2, 7, 4], 0);
    assert_eq!(route.next().unwrap(), 2);
    assert_eq!(route.next().unwrap(), 4);
    assert!(route.has_next());

    route.add_selection(6);
    route.build(4);

    assert_eq!(route.next().unwrap(), 6);
    assert_eq!(route.next().unwrap(), 7);
    assert!(!route.has_next());
}

#[test]
fn test_new_floor_behind_is_served_after_reversing() {
    let mut route = route_with(&[2, 7, 4], 0);
    assert_eq!(route.next().unwrap(), 2);
    assert_eq!(route.next().unwrap(), 4);

    route.add_selection(1);
    route.build(4);

    assert_eq!(route.next().unwrap(), 7);
    assert_eq!(route.next().unwrap(), 1);
    assert!(!route.has_next());
}

#[test]
fn test_current_floor_is_never_queued() {
    let mut route = route_with(&[3, 5, 1], 3);

    assert!(!route.targets().contains(&3));
    assert_eq!(drain(&mut route), vec![5, 1]);

    let mut route = route_with(&[4], 4);
    assert!(!route.has_next());
    assert_eq!(route.pending_count(), 0);
}

#[test]
fn test_duplicate_selections_collapse() {
    let mut route = Route::new();
    route.add_selection(6);
    route.add_selection(6);
    route.add_selection(2);
    route.add_selection(6);
    assert_eq!(route.pending_count(), 2);

    route.build(0);
    assert_eq!(route.targets(), vec![2, 6]);
}

#[test]
fn test_rebuild_keeps_unvisited_targets() {
    let mut route = route_with(&[3, 9], 0);
    assert_eq!(route.next().unwrap(), 3);

    // 9 is still queued and must survive the rebuild
    route.add_selection(5);
    route.build(3);

    assert_eq!(route.targets(), vec![5, 9]);
}

#[test]
fn test_build_without_pending_selections_keeps_targets() {
    let mut route = route_with(&[8, 2], 0);
    route.build(5);

    assert_eq!(route.targets(), vec![2, 8]);
}

#[test]
fn test_next_on_empty_route_fails() {
    let mut route = Route::new();
    assert!(matches!(route.next(), Err(ElevatorError::EmptySequence)));

    let mut route = route_with(&[1], 0);
    route.next().unwrap();
    assert!(matches!(route.next(), Err(ElevatorError::EmptySequence)));
}

#[test]
fn test_new_route_points_up() {
    let route = Route::new();
    assert!(route.is_up_direction());
    assert!(!route.has_next());
    assert!(route.targets().is_empty());
}
