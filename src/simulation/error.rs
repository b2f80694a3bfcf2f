//! Error types and handling
//!
//! Every core error is a rejected operation: the call fails and the car and
//! route are left exactly as they were.

use crate::types::{ConfigValidationError, Floor};
use thiserror::Error;

/// Errors that can occur while operating the elevator
#[derive(Debug, Error)]
pub enum ElevatorError {
    /// A selected floor lies outside `0..=limit`
    #[error("The selected floor '{floor}' exceeds the supported limit '{limit}'.")]
    OutOfRange {
        /// The rejected floor
        floor: Floor,
        /// Highest valid floor
        limit: Floor,
    },

    /// Boarding or alighting attempted while moving or with the door closed
    #[error("{0}")]
    InvalidState(String),

    /// Weight on board would exceed (or already exceeds) the capacity
    #[error("Weight {attempted} exceeded the limit of {limit}.")]
    OverCapacity {
        /// Total weight that was attempted
        attempted: f64,
        /// Configured capacity
        limit: f64,
    },

    /// Alighting amount larger than the weight on board
    #[error("The weight to disembark {requested} is larger than the current weight {on_board}.")]
    InvalidAmount {
        /// Amount requested
        requested: f64,
        /// Weight actually on board
        on_board: f64,
    },

    /// Boarding or alighting weight that is negative or not a number
    #[error("Invalid passenger weight {0}: it must be a number of zero or more.")]
    InvalidWeight(f64),

    /// `next` called on a route with nothing queued
    #[error("The route has no next floor.")]
    EmptySequence,

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ElevatorError {
    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the caller can recover by retrying with different input
    ///
    /// `EmptySequence` signals a caller logic error and configuration errors
    /// happen before a run starts, so neither is recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ElevatorError::OutOfRange { .. } => true,
            ElevatorError::InvalidState(_) => true,
            ElevatorError::OverCapacity { .. } => true,
            ElevatorError::InvalidAmount { .. } => true,
            ElevatorError::InvalidWeight(_) => true,
            ElevatorError::EmptySequence => false,
            ElevatorError::Configuration(_) => false,
            ElevatorError::Io(_) => true,
            ElevatorError::Serialization(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            ElevatorError::OutOfRange { .. } => "Out Of Range",
            ElevatorError::InvalidState(_) => "Invalid State",
            ElevatorError::OverCapacity { .. } => "Over Capacity",
            ElevatorError::InvalidAmount { .. } => "Invalid Amount",
            ElevatorError::InvalidWeight(_) => "Invalid Weight",
            ElevatorError::EmptySequence => "Empty Sequence",
            ElevatorError::Configuration(_) => "Configuration",
            ElevatorError::Io(_) => "IO",
            ElevatorError::Serialization(_) => "Serialization",
        }
    }
}

impl From<ConfigValidationError> for ElevatorError {
    fn from(error: ConfigValidationError) -> Self {
        Self::configuration(error.to_string())
    }
}

/// Result type for elevator operations
pub type ElevatorResult<T> = Result<T, ElevatorError>;
