//! Sketch execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The [`Simulation`](engine::Simulation) session (load, start, stop, tick)
//! - [`state`]: Execution state machine (phase, cursor, delay gate)
//! - [`statements`]: Command interpreter for single statements
//! - [`constants`]: Shared defaults
//!
//! # Execution Model
//!
//! Nothing here blocks or keeps time. Each call to
//! [`Simulation::tick`](engine::Simulation::tick) either waits out a pending
//! delay or executes exactly one statement. A `delay` only records a wake time
//! that later ticks compare against.
//!
//! # Errors
//!
//! There are none. Malformed source, unknown statements, and odd arguments
//! all degrade to no-ops so that novices can experiment freely.

pub mod constants;
pub mod engine;
pub mod state;
pub mod statements;
