//! Elevator mechanisms: the car and its route
//!
//! Both types are pure mechanisms with no configuration-dependent checks, so
//! they can be exercised on their own. Range and capacity rules live in the
//! [`Dispatcher`](crate::simulation::Dispatcher).
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_simulator::elevator::Route;
//!
//! let mut route = Route::new();
//! for floor in [1, 7, 6] {
//!     route.add_selection(floor);
//! }
//! route.build(3);
//! assert_eq!(route.targets(), vec![6, 7, 1]);
//! ```

pub mod car;
pub mod route;

pub use car::*;
pub use route::*;
