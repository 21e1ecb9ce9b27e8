//! # Introduction
//!
//! sketchtty simulates microcontroller sketches: it parses a small
//! `setup()`/`loop()` program and runs it one statement per tick under a
//! cooperative, fixed-rate scheduler. Delays never block; they set a wake
//! time that later ticks respect. The results (pin levels, peripherals bound
//! to pins, serial output) are shown in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Parser → Program → Simulation ⟲ Scheduler ticks → Board state → TUI
//! ```
//!
//! 1. [`parser`]: splits the sketch into `setup` and `loop` statement lists
//!    and classifies each line.
//! 2. [`interpreter`]: the [`interpreter::engine::Simulation`] session with
//!    its execution state machine and command interpreter.
//! 3. [`board`]: pin state, serial log and peripheral bindings.
//! 4. [`scheduler`]: fixed-period ticker that owns simulated time.
//! 5. [`snapshot`]: bounded history of per-step snapshots for reviewing.
//! 6. [`config`]: YAML configuration (tick period, peripherals).
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported vocabulary
//!
//! `pinMode`, `digitalWrite`, `delay`, `delayMicroseconds`, `Serial.begin`,
//! `Serial.print`, `Serial.println`, with literal arguments only. Anything
//! else is accepted and ignored.

pub mod board;
pub mod config;
pub mod interpreter;
pub mod parser;
pub mod scheduler;
pub mod snapshot;
pub mod ui;
