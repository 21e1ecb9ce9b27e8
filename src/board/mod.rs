//! Simulated board state
//!
//! This module provides the observable side of a running sketch:
//! - [`pins`]: Pin mode and level per pin identifier
//! - [`serial`]: Timestamped serial monitor log
//! - [`peripherals`]: Registry of virtual devices bound to pins
//!
//! All three are owned by the [`Simulation`](crate::interpreter::engine::Simulation)
//! session and mutated only through the command interpreter.

pub mod peripherals;
pub mod pins;
pub mod serial;
