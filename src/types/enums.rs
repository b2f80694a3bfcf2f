//! Enumeration types for the elevator simulator
//!
//! This module contains the closed enumerations describing the car: travel
//! direction, door state, motion state and car class.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of travel recorded by the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Travelling towards higher floors
    Up,
    /// Travelling towards lower floors
    Down,
}

impl Direction {
    /// Whether this is the upward direction
    pub fn is_up(self) -> bool {
        self == Direction::Up
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// State of the car door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorState {
    /// Door open; passengers may board or alight
    Open,
    /// Door closed; the car may move
    Closed,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorState::Open => write!(f, "OPENED"),
            DoorState::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Motion state of the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionState {
    /// Standing at a floor
    Stopped,
    /// Moving one floor up
    MovingUp,
    /// Moving one floor down
    MovingDown,
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionState::Stopped => write!(f, "STOPPED"),
            MotionState::MovingUp => write!(f, "MOVING_UP"),
            MotionState::MovingDown => write!(f, "MOVING_DOWN"),
        }
    }
}

/// Class of elevator car
///
/// The class selects the weight capacity and decides whether the car answers
/// floor calls made from outside the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CarClass {
    /// Passenger car; answers external calls
    #[default]
    Standard,
    /// Service car; serves only destinations chosen inside the car
    ServiceOnly,
}

impl CarClass {
    /// Whether cars of this class accept externally sourced floor requests
    pub fn accepts_external_calls(self) -> bool {
        !matches!(self, CarClass::ServiceOnly)
    }
}

impl fmt::Display for CarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarClass::Standard => write!(f, "Standard"),
            CarClass::ServiceOnly => write!(f, "Service Only"),
        }
    }
}

impl FromStr for CarClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "social" | "passenger" => Ok(CarClass::Standard),
            "service" | "service_only" | "service-only" | "serviceonly" | "service only" => {
                Ok(CarClass::ServiceOnly)
            }
            _ => Err(format!("Unknown car class: {}", s)),
        }
    }
}
