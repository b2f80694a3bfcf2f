//! Elevator dispatcher
//!
//! The dispatcher is the controller around one [`Car`] and one [`Route`]. It
//! validates boarding, alighting and floor selection against the configured
//! floor count and weight capacity, folds external calls into the route and
//! drives the car floor by floor towards the next target.

use crate::elevator::{Car, Route};
use crate::external::ExternalRequestSource;
use crate::simulation::{ElevatorError, ElevatorResult, StatusSink};
use crate::types::{ElevatorConfig, Floor, Weight};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Controller for a single elevator car
pub struct Dispatcher {
    /// Highest valid floor
    floor_count: Floor,
    car: Car,
    route: Route,
    source: Box<dyn ExternalRequestSource>,
    sink: Box<dyn StatusSink>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("floor_count", &self.floor_count)
            .field("car", &self.car)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher for a new car at floor 0
    ///
    /// The configuration is read once; later changes to it have no effect.
    pub fn new<S, K>(config: &ElevatorConfig, source: S, sink: K) -> Self
    where
        S: ExternalRequestSource + 'static,
        K: StatusSink + 'static,
    {
        let car = Car::new(config.car_class, config.weight_limit());

        info!(
            floor_count = config.floor_count,
            car_class = %config.car_class,
            weight_limit = config.weight_limit(),
            "Dispatcher created"
        );
        if !car.accepts_external_calls() {
            warn!("This elevator type can not receive external calls.");
        }

        Self {
            floor_count: config.floor_count,
            car,
            route: Route::new(),
            source: Box::new(source),
            sink: Box::new(sink),
        }
    }

    /// Validate `config`, then create the dispatcher
    ///
    /// An invalid configuration fails with [`ElevatorError::Configuration`].
    pub fn try_new<S, K>(config: &ElevatorConfig, source: S, sink: K) -> ElevatorResult<Self>
    where
        S: ExternalRequestSource + 'static,
        K: StatusSink + 'static,
    {
        config.validate()?;
        Ok(Self::new(config, source, sink))
    }

    /// Poll for external calls, merge them into the route, then report whether
    /// there is a target left to visit.
    ///
    /// Only cars that accept external calls poll. A failed or empty poll means
    /// no call is pending; there is no retry within one call.
    pub fn has_target(&mut self) -> bool {
        if self.car.accepts_external_calls() {
            let floors = self.source.poll();
            if !floors.is_empty() {
                self.merge_external_calls(&floors);
            }
        }

        self.route.has_next()
    }

    fn merge_external_calls(&mut self, floors: &[Floor]) {
        let mut merged = 0;
        for &floor in floors {
            if self.is_valid_floor(floor) {
                self.route.add_selection(floor);
                merged += 1;
            } else {
                warn!(floor, limit = self.floor_count, "Dropping out of range external call");
            }
        }

        if merged > 0 {
            info!(calls = ?floors, "External calls received");
            self.route.build(self.car.current_floor());
        }
    }

    /// Board passengers weighing `weight` in total
    ///
    /// Requires the car stopped with the door open. Fails with
    /// [`ElevatorError::OverCapacity`] when the new total would exceed the
    /// capacity; the weight on board is unchanged on any failure. Weights are
    /// counted in hundredths.
    #[instrument(skip(self))]
    pub fn board(&mut self, weight: f64) -> ElevatorResult<()> {
        self.check_boarding_state()?;
        let amount = Self::parse_amount(weight)?;

        let attempted = self.car.load() + amount;
        if attempted > self.car.capacity() {
            return Err(ElevatorError::OverCapacity {
                attempted: attempted.as_f64(),
                limit: self.car.weight_limit(),
            });
        }

        self.car.increase_weight(amount);
        debug!(on_board = self.car.weight(), "Passengers boarded");
        Ok(())
    }

    /// Let passengers weighing `weight` in total leave the car
    ///
    /// Same state requirement as [`board`](Self::board). Fails with
    /// [`ElevatorError::InvalidAmount`] when more weight would leave than is on
    /// board; the weight on board is unchanged on any failure.
    #[instrument(skip(self))]
    pub fn alight(&mut self, weight: f64) -> ElevatorResult<()> {
        self.check_boarding_state()?;
        let amount = Self::parse_amount(weight)?;

        if (self.car.load() - amount).is_negative() {
            return Err(ElevatorError::InvalidAmount {
                requested: amount.as_f64(),
                on_board: self.car.weight(),
            });
        }

        self.car.decrease_weight(amount);
        debug!(on_board = self.car.weight(), "Passengers alighted");
        Ok(())
    }

    /// Select destination floors and rebuild the route
    ///
    /// Every floor must lie in `0..=floor_count`. The first offending floor
    /// fails the whole batch and none of the floors are added.
    #[instrument(skip(self))]
    pub fn select_floors(&mut self, floors: &[Floor]) -> ElevatorResult<()> {
        if let Some(&floor) = floors.iter().find(|&&floor| !self.is_valid_floor(floor)) {
            return Err(ElevatorError::OutOfRange { floor, limit: self.floor_count });
        }

        for &floor in floors {
            self.route.add_selection(floor);
        }
        self.route.build(self.car.current_floor());

        Ok(())
    }

    /// Travel to the next target of the route
    ///
    /// Closes the door, moves one floor at a time emitting a status line per
    /// step, then stops and opens the door at the target. Returns the floor
    /// reached.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> ElevatorResult<Floor> {
        if !self.car.is_weight_within_capacity() {
            return Err(ElevatorError::OverCapacity {
                attempted: self.car.weight(),
                limit: self.car.weight_limit(),
            });
        }

        // Pop before closing the door so an empty route leaves the car untouched
        let target = self.route.next()?;
        self.car.close_door();

        while self.car.current_floor() != target {
            let from = self.car.current_floor();
            if from < target {
                self.car.move_up();
            } else {
                self.car.move_down();
            }

            let line = format!(
                "Door Status: {} - Elevator Status: {} from {} to {} floor.",
                self.car.door(),
                self.car.motion(),
                from,
                self.car.current_floor()
            );
            self.sink.emit(&line);
        }

        self.car.stop();
        self.car.open_door();

        info!(floor = target, direction = %self.route.direction(), "Arrived at target floor");
        Ok(target)
    }

    /// Human-readable snapshot of the car and route
    pub fn status_line(&self) -> String {
        format!(
            "Door Status: {} - Elevator Status: {} - Floor: {} - Route Direction: {} - People Weight: {}.",
            self.car.door(),
            self.car.motion(),
            self.car.current_floor(),
            self.route.direction(),
            self.car.weight()
        )
    }

    /// Emit [`status_line`](Self::status_line) to the status sink
    pub fn report_status(&mut self) {
        let line = self.status_line();
        self.sink.emit(&line);
    }

    /// The car
    pub fn car(&self) -> &Car {
        &self.car
    }

    /// The route
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Highest valid floor
    pub fn floor_count(&self) -> Floor {
        self.floor_count
    }

    fn is_valid_floor(&self, floor: Floor) -> bool {
        (0..=self.floor_count).contains(&floor)
    }

    fn check_boarding_state(&self) -> ElevatorResult<()> {
        if !self.car.is_stopped() {
            return Err(ElevatorError::invalid_state("The elevator is not stopped."));
        }
        if self.car.is_door_closed() {
            return Err(ElevatorError::invalid_state("The elevator door is not open."));
        }
        Ok(())
    }

    fn parse_amount(weight: f64) -> ElevatorResult<Weight> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ElevatorError::InvalidWeight(weight));
        }
        Ok(Weight::from_f64(weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::CallStore;
    use crate::simulation::MemorySink;
    use crate::types::{CarClass, DoorState, MotionState};

    fn dispatcher(class: CarClass) -> (Dispatcher, CallStore, MemorySink) {
        let config = ElevatorConfig { car_class: class, ..Default::default() };
        let store = CallStore::new();
        let sink = MemorySink::new();
        (Dispatcher::new(&config, store.clone(), sink.clone()), store, sink)
    }

    #[test]
    fn test_initial_status_line() {
        let (dispatcher, _, _) = dispatcher(CarClass::Standard);
        assert_eq!(
            dispatcher.status_line(),
            "Door Status: OPENED - Elevator Status: STOPPED - Floor: 0 - Route Direction: UP - People Weight: 0."
        );
    }

    #[test]
    fn test_advance_emits_one_line_per_floor() {
        let (mut dispatcher, _, sink) = dispatcher(CarClass::Standard);
        dispatcher.select_floors(&[3]).unwrap();

        assert_eq!(dispatcher.advance().unwrap(), 3);
        assert_eq!(
            sink.lines(),
            vec![
                "Door Status: CLOSED - Elevator Status: MOVING_UP from 0 to 1 floor.",
                "Door Status: CLOSED - Elevator Status: MOVING_UP from 1 to 2 floor.",
                "Door Status: CLOSED - Elevator Status: MOVING_UP from 2 to 3 floor.",
            ]
        );
        assert_eq!(dispatcher.car().door(), DoorState::Open);
        assert_eq!(dispatcher.car().motion(), MotionState::Stopped);
    }

    #[test]
    fn test_advance_on_empty_route_leaves_car_untouched() {
        let (mut dispatcher, _, sink) = dispatcher(CarClass::Standard);

        assert!(matches!(dispatcher.advance(), Err(ElevatorError::EmptySequence)));
        assert_eq!(dispatcher.car().door(), DoorState::Open);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_board_rejects_negative_weight() {
        let (mut dispatcher, _, _) = dispatcher(CarClass::Standard);
        let err = dispatcher.board(-10.0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid passenger weight -10: it must be a number of zero or more.");
        assert!(matches!(dispatcher.board(f64::NAN), Err(ElevatorError::InvalidWeight(_))));
        assert!(matches!(dispatcher.alight(-1.0), Err(ElevatorError::InvalidWeight(_))));
        assert_eq!(dispatcher.car().weight(), 0.0);
    }

    #[test]
    fn test_out_of_range_external_calls_are_dropped() {
        let (mut dispatcher, store, _) = dispatcher(CarClass::Standard);
        store.add_call(99);
        store.add_call(-2);
        store.add_call(5);

        assert!(dispatcher.has_target());
        assert_eq!(dispatcher.route().targets(), vec![5]);
    }

    #[test]
    fn test_board_and_alight_require_open_stopped_car() {
        let (mut dispatcher, _, _) = dispatcher(CarClass::Standard);

        dispatcher.car.close_door();
        let err = dispatcher.board(100.0).unwrap_err();
        assert_eq!(err.to_string(), "The elevator door is not open.");
        let err = dispatcher.alight(100.0).unwrap_err();
        assert_eq!(err.to_string(), "The elevator door is not open.");

        dispatcher.car.move_up();
        let err = dispatcher.board(100.0).unwrap_err();
        assert_eq!(err.to_string(), "The elevator is not stopped.");
        let err = dispatcher.alight(100.0).unwrap_err();
        assert_eq!(err.to_string(), "The elevator is not stopped.");
        assert_eq!(dispatcher.car().weight(), 0.0);
    }

    #[test]
    fn test_advance_refuses_overloaded_car() {
        let (mut dispatcher, _, sink) = dispatcher(CarClass::Standard);
        dispatcher.select_floors(&[2]).unwrap();
        dispatcher.car.increase_weight(Weight::from_f64(700.0));

        assert!(matches!(dispatcher.advance(), Err(ElevatorError::OverCapacity { .. })));
        assert_eq!(dispatcher.car().current_floor(), 0);
        assert!(dispatcher.route().has_next());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let config = ElevatorConfig { floor_count: 0, ..Default::default() };
        let err = Dispatcher::try_new(&config, CallStore::new(), MemorySink::new()).unwrap_err();
        assert!(matches!(err, ElevatorError::Configuration(_)));

        let config = ElevatorConfig::default();
        assert!(Dispatcher::try_new(&config, CallStore::new(), MemorySink::new()).is_ok());
    }

    #[test]
    fn test_report_status_emits_status_line() {
        let (mut dispatcher, _, sink) = dispatcher(CarClass::ServiceOnly);
        dispatcher.report_status();
        assert_eq!(sink.lines(), vec![dispatcher.status_line()]);
    }
}
