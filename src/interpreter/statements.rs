//! Command interpreter
//!
//! Executes a single [`Statement`] against the board. No statement can fail:
//! unknown statements do nothing, and any pin identifier is accepted.
//!
//! `delay` never sleeps. It returns the requested offset to the caller, which
//! turns it into a wake time on the execution state; gating is the
//! scheduler's business.

use crate::board::{peripherals::PeripheralRegistry, pins::PinState, serial::SerialLog};
use crate::parser::ast::Statement;
use crate::scheduler::Millis;

/// Everything a statement can touch
#[derive(Debug, Clone, Default)]
pub struct SimulationContext {
    pub pins: PinState,
    pub serial: SerialLog,
    pub peripherals: PeripheralRegistry,
}

impl SimulationContext {
    pub fn new(peripherals: PeripheralRegistry) -> Self {
        Self {
            pins: PinState::new(),
            serial: SerialLog::new(),
            peripherals,
        }
    }

    /// Execute one statement at time `now`.
    ///
    /// Returns the delay offset in milliseconds for `Delay`, `None` otherwise.
    pub fn execute(&mut self, stmt: &Statement, now: Millis) -> Option<Millis> {
        match stmt {
            Statement::SetPinMode { pin, mode } => {
                self.pins.set_mode(pin, *mode);
                None
            }
            Statement::WriteDigitalPin { pin, value } => {
                self.pins.write(pin, *value);
                // Sync even when unchanged so late-bound peripherals catch up
                let updated = self.peripherals.sync(pin, *value);
                tracing::trace!(%pin, level = %value, updated, "digital write");
                None
            }
            Statement::Delay { duration_ms } => Some(*duration_ms),
            Statement::SerialBegin { baud } => {
                self.serial.begin(*baud);
                None
            }
            Statement::SerialPrint { text, newline } => {
                self.serial.append(now, text.clone(), *newline);
                None
            }
            Statement::Unrecognized => None,
        }
    }

    /// Clear pins and serial output; peripherals go dark but stay bound
    pub fn reset(&mut self) {
        self.pins.clear();
        self.serial.clear();
        self.peripherals.reset_display();
    }
}
