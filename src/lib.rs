//! Elevator Simulator
//!
//! Simulates a single elevator car serving floor requests: it decides the
//! order in which requested floors are visited and enforces the door, motion
//! and weight rules while doing so.
//!
//! # Overview
//!
//! Floors are visited in scan order. The car keeps travelling in its current
//! direction until every request that direction reaches is served, then
//! reverses. Requests come from passengers inside the car and, for standard
//! cars, from an external call service polled whenever the dispatcher checks
//! for a next target.
//!
//! ## Quick Start
//!
//! ```rust
//! use elevator_simulator::*;
//!
//! let config = ElevatorConfig::default();
//! let calls = CallStore::new();
//! let mut dispatcher = Dispatcher::new(&config, calls.clone(), MemorySink::new());
//!
//! dispatcher.select_floors(&[2, 7, 4])?;
//! calls.add_call(5);
//!
//! let mut visited = Vec::new();
//! while dispatcher.has_target() {
//!     visited.push(dispatcher.advance()?);
//! }
//! assert_eq!(visited, vec![2, 4, 5, 7]);
//! # Ok::<(), ElevatorError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: floor type, enumerations and configuration
//! - [`elevator`]: the car and its route
//! - [`simulation`]: dispatcher, errors, status sinks, logging, console session
//! - [`external`]: external call sources, store and TCP transport
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  poll   ┌──────────────┐  build/next  ┌─────────┐
//! │   External   │◄────────┤  Dispatcher  ├─────────────►│  Route  │
//! │   Requests   │         │              │              └─────────┘
//! └──────────────┘         │              │  move/door   ┌─────────┐
//!                          │              ├─────────────►│   Car   │
//!                          └──────┬───────┘              └─────────┘
//!                                 │ emit
//!                                 ▼
//!                          ┌──────────────┐
//!                          │ Status Sink  │
//!                          └──────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod elevator;
pub mod external;
pub mod simulation;
pub mod types;

pub use types::{
    CallServerArgs, CarClass, CliArgs, ConfigError, ConfigValidationError, Direction, DoorState,
    ElevatorConfig, Floor, MotionState, Weight,
};

pub use elevator::{Car, Route};

pub use external::{CallServer, CallServerHandle, CallStore, ExternalRequestSource, TcpCallSource};

pub use simulation::{
    parse_floor_list, ConsoleSession, ConsoleSink, Dispatcher, ElevatorError, ElevatorResult,
    LoggingConfig, LoggingGuard, LoggingInitError, MemorySink, StatusSink, TracingSink,
};
