//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`source`]: Sketch display with syntax highlighting and current line indicator
//! - [`serial`]: Serial monitor output with simulated timestamps
//! - [`pins`]: Pin modes and levels
//! - [`peripherals`]: Bound devices and whether they are lit
//! - [`status`]: Status bar with keybindings and execution state
//! - `utils`: Shared helpers for borders, scrolling and time formatting
//!
//! Each pane module exports a primary `render_*` function and its scroll
//! state type. Panes are stateless beyond that scroll state.

mod utils;

pub mod peripherals;
pub mod pins;
pub mod serial;
pub mod source;
pub mod status;

// Re-export render functions for convenience
pub use peripherals::{render_peripherals_pane, PeripheralsScrollState};
pub use pins::{render_pins_pane, PinsRenderData, PinsScrollState};
pub use serial::{render_serial_pane, SerialRenderData, SerialScrollState};
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, RunIndicator, StatusRenderData};
