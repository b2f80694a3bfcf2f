//! Core types and configuration for the elevator simulator
//!
//! This module contains the fundamental types and configuration structures
//! used throughout the simulator.
//!
//! # Overview
//!
//! - **Floor**: integer floor number, valid range `0..=floor_count`
//! - **Enums**: direction, door state, motion state and car class
//! - **Weight**: exact passenger weight in hundredths
//! - **Configuration**: elevator configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_simulator::types::*;
//!
//! let config = ElevatorConfig {
//!     floor_count: 12,
//!     car_class: CarClass::ServiceOnly,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.weight_limit(), 1000.0);
//! ```

pub mod config;
pub mod enums;
pub mod weight;

pub use config::*;
pub use enums::*;
pub use weight::*;

/// Floor number
///
/// Signed so that a negative selection can be reported as out of range rather
/// than failing to parse.
pub type Floor = i32;
