//! Simulation control
//!
//! This module contains the dispatcher, the error taxonomy, status sinks,
//! logging setup and the interactive console session.
//!
//! # Overview
//!
//! - **Dispatcher**: validates requests, merges external calls and drives the car
//! - **ElevatorError**: every way a dispatcher call can be rejected
//! - **StatusSink**: where status lines go (console, tracing, memory)
//! - **LoggingConfig**: tracing subscriber setup
//! - **ConsoleSession**: line-based interactive driver
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_simulator::external::CallStore;
//! use elevator_simulator::simulation::*;
//! use elevator_simulator::types::ElevatorConfig;
//!
//! let sink = MemorySink::new();
//! let mut dispatcher = Dispatcher::new(&ElevatorConfig::default(), CallStore::new(), sink.clone());
//!
//! dispatcher.board(180.0)?;
//! dispatcher.select_floors(&[2])?;
//! assert!(dispatcher.has_target());
//! assert_eq!(dispatcher.advance()?, 2);
//! assert_eq!(sink.len(), 2);
//! # Ok::<(), ElevatorError>(())
//! ```

pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod session;
pub mod status;

pub use dispatcher::*;
pub use error::*;
pub use logging::*;
pub use session::*;
pub use status::*;
