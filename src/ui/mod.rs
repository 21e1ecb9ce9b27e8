//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, and the
//!   wall-clock side of the [`Scheduler`]
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   serial monitor, pins, peripherals, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Simulation`]
//! and call [`App::run`] to start the event loop.
//!
//! [`Scheduler`]: crate::scheduler::Scheduler
//! [`Simulation`]: crate::interpreter::engine::Simulation
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
