//! Elevator car state
//!
//! The car is a plain state holder. It performs no validation of its own; door,
//! motion and weight rules are enforced by the dispatcher.

use crate::types::{CarClass, DoorState, Floor, MotionState, Weight};
use serde::{Deserialize, Serialize};

/// A single elevator car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    class: CarClass,
    weight_limit: Weight,
    current_floor: Floor,
    door: DoorState,
    motion: MotionState,
    weight: Weight,
}

impl Car {
    /// Create a car at floor 0, stopped with the door open and nobody on board
    pub fn new(class: CarClass, weight_limit: f64) -> Self {
        Self {
            class,
            weight_limit: Weight::from_f64(weight_limit),
            current_floor: 0,
            door: DoorState::Open,
            motion: MotionState::Stopped,
            weight: Weight::ZERO,
        }
    }

    /// Open the door
    pub fn open_door(&mut self) {
        self.door = DoorState::Open;
    }

    /// Close the door
    pub fn close_door(&mut self) {
        self.door = DoorState::Closed;
    }

    /// Move one floor up
    pub fn move_up(&mut self) {
        self.motion = MotionState::MovingUp;
        self.current_floor += 1;
    }

    /// Move one floor down
    pub fn move_down(&mut self) {
        self.motion = MotionState::MovingDown;
        self.current_floor -= 1;
    }

    /// Stop at the current floor
    pub fn stop(&mut self) {
        self.motion = MotionState::Stopped;
    }

    /// Add passenger weight. No bound is enforced here.
    pub fn increase_weight(&mut self, amount: Weight) {
        self.weight = self.weight + amount;
    }

    /// Remove passenger weight. No bound is enforced here.
    pub fn decrease_weight(&mut self, amount: Weight) {
        self.weight = self.weight - amount;
    }

    /// Car class
    pub fn class(&self) -> CarClass {
        self.class
    }

    /// Configured weight capacity
    pub fn weight_limit(&self) -> f64 {
        self.weight_limit.as_f64()
    }

    /// Configured weight capacity, exact
    pub fn capacity(&self) -> Weight {
        self.weight_limit
    }

    /// Floor the car is at
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    /// Door state
    pub fn door(&self) -> DoorState {
        self.door
    }

    /// Motion state
    pub fn motion(&self) -> MotionState {
        self.motion
    }

    /// Passenger weight on board
    pub fn weight(&self) -> f64 {
        self.weight.as_f64()
    }

    /// Passenger weight on board, exact
    pub fn load(&self) -> Weight {
        self.weight
    }

    /// Whether the door is closed
    pub fn is_door_closed(&self) -> bool {
        self.door == DoorState::Closed
    }

    /// Whether the car is stopped
    pub fn is_stopped(&self) -> bool {
        self.motion == MotionState::Stopped
    }

    /// Whether the car is moving up
    pub fn is_moving_up(&self) -> bool {
        self.motion == MotionState::MovingUp
    }

    /// Whether the car is moving down
    pub fn is_moving_down(&self) -> bool {
        self.motion == MotionState::MovingDown
    }

    /// Whether the weight on board is within capacity
    pub fn is_weight_within_capacity(&self) -> bool {
        self.weight <= self.weight_limit
    }

    /// Whether the car answers calls made from outside the car
    pub fn accepts_external_calls(&self) -> bool {
        self.class.accepts_external_calls()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_car_initial_state() {
        let car = Car::new(CarClass::Standard, 600.0);

        assert_eq!(car.current_floor(), 0);
        assert_eq!(car.door(), DoorState::Open);
        assert_eq!(car.motion(), MotionState::Stopped);
        assert_eq!(car.weight(), 0.0);
        assert_eq!(car.weight_limit(), 600.0);
        assert!(!car.is_door_closed());
        assert!(car.is_stopped());
        assert!(car.is_weight_within_capacity());
        assert!(car.accepts_external_calls());
    }

    #[test]
    fn test_single_floor_moves() {
        let mut car = Car::new(CarClass::Standard, 600.0);
        car.close_door();

        car.move_up();
        car.move_up();
        assert_eq!(car.current_floor(), 2);
        assert!(car.is_moving_up());

        car.move_down();
        assert_eq!(car.current_floor(), 1);
        assert!(car.is_moving_down());

        car.stop();
        car.open_door();
        assert!(car.is_stopped());
        assert!(!car.is_door_closed());
    }

    #[test]
    fn test_weight_is_not_bounded_by_the_car() {
        let mut car = Car::new(CarClass::Standard, 100.0);

        car.increase_weight(Weight::from_f64(150.0));
        assert_eq!(car.weight(), 150.0);
        assert!(!car.is_weight_within_capacity());

        car.decrease_weight(Weight::from_f64(200.0));
        assert_eq!(car.weight(), -50.0);
    }

    #[test]
    fn test_weight_at_limit_is_within_capacity() {
        let mut car = Car::new(CarClass::Standard, 100.0);
        car.increase_weight(Weight::from_f64(100.0));
        assert!(car.is_weight_within_capacity());
    }

    #[test]
    fn test_fractional_weights_cancel() {
        let mut car = Car::new(CarClass::Standard, 600.0);
        car.increase_weight(Weight::from_f64(0.1));

        car.increase_weight(Weight::from_f64(0.2));
        car.decrease_weight(Weight::from_f64(0.2));
        assert_eq!(car.weight(), 0.1);
        assert_eq!(car.load(), Weight::from_hundredths(10));
    }

    #[test]
    fn test_service_car_refuses_external_calls() {
        let car = Car::new(CarClass::ServiceOnly, 1000.0);
        assert!(!car.accepts_external_calls());
        assert_eq!(car.class(), CarClass::ServiceOnly);
    }
}
