// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use elevator_simulator::*;

mod route_tests;



#[test]
fn test_enum_display() {
    assert_eq!(Direction::Up.to_string(), "UP");
    assert_eq!(Direction::Down.to_string(), "DOWN");
    assert_eq!(DoorState::Open.to_string(), "OPENED");
    assert_eq!(DoorState::Closed.to_string(), "CLOSED");
    assert_eq!(MotionState::Stopped.to_string(), "STOPPED");
    assert_eq!(MotionState::MovingUp.to_string(), "MOVING_UP");
    assert_eq!(MotionState::MovingDown.to_string(), "MOVING_DOWN");
}

#[test]
fn test_car_classes() {
    assert!(CarClass::Standard.accepts_external_calls());
    assert!(!CarClass::ServiceOnly.accepts_external_calls());

    let config = ElevatorConfig::default();
    assert_eq!(config.weight_limit(), 600.0);

    let config = ElevatorConfig { car_class: CarClass::ServiceOnly, ..Default::default() };
    assert_eq!(config.weight_limit(), 1000.0);
}

#[test]
fn test_new_car_state() {
    let car = Car::new(CarClass::Standard, 600.0);

    assert_eq!(car.current_floor(), 0);
    assert_eq!(car.door(), DoorState::Open);
    assert_eq!(car.motion(), MotionState::Stopped);
    assert_eq!(car.weight(), 0.0);
    assert!(car.is_weight_within_capacity());
}

#[test]
fn test_error_categories() {
    let err = ElevatorError::OutOfRange { floor: 50, limit: 30 };
    assert_eq!(err.to_string(), "The selected floor '50' exceeds the supported limit '30'.");
    assert!(err.is_recoverable());

    assert!(!ElevatorError::EmptySequence.is_recoverable());
}
