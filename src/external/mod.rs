//! External floor calls
//!
//! Floors requested from outside the car reach the dispatcher through the
//! [`ExternalRequestSource`] trait. This module provides an owned in-memory
//! [`CallStore`], a TCP [`CallServer`] publishing a store's calls and a
//! [`TcpCallSource`] polling such a server.
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_simulator::external::*;
//!
//! let store = CallStore::new();
//! store.add_call(4);
//!
//! let mut source = store.clone();
//! assert_eq!(source.poll(), vec![4]);
//! assert!(store.is_empty());
//! ```

pub mod client;
pub mod server;
pub mod source;

pub use client::*;
pub use server::*;
pub use source::*;
