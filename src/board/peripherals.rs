//! Peripheral bindings
//!
//! A [`PeripheralRegistry`] associates virtual devices (LEDs, buzzers) with
//! pins. A peripheral's displayed state only ever mirrors its pin's level: the
//! interpreter calls [`PeripheralRegistry::sync`] whenever it writes a pin, and
//! the registry copies that level onto every binding for the pin. Peripherals
//! never read or write [`PinState`](super::pins::PinState) themselves.
//!
//! Several peripherals may share a pin; they all update together. A pin with
//! no bindings is simply not observed.

use crate::parser::ast::{Level, PinId};
use serde::{Deserialize, Serialize};

/// Kind of virtual device, used for rendering only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeripheralKind {
    RedLed,
    GreenLed,
    YellowLed,
    BlueLed,
    Buzzer,
}

impl PeripheralKind {
    pub fn label(self) -> &'static str {
        match self {
            PeripheralKind::RedLed => "red LED",
            PeripheralKind::GreenLed => "green LED",
            PeripheralKind::YellowLed => "yellow LED",
            PeripheralKind::BlueLed => "blue LED",
            PeripheralKind::Buzzer => "buzzer",
        }
    }
}

/// Static identity of a bound device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peripheral {
    pub id: String,
    pub kind: PeripheralKind,
    pub pin: PinId,
    /// Board position, in layout cells
    pub position: (u16, u16),
}

/// A peripheral together with the level it currently displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub peripheral: Peripheral,
    pub displayed: Level,
}

impl Binding {
    pub fn is_active(&self) -> bool {
        self.displayed.is_high()
    }
}

/// Registry of pin → peripheral bindings, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeripheralRegistry {
    bindings: Vec<Binding>,
}

impl PeripheralRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing any existing peripheral with the same id.
    /// The new binding displays `Low` until the next sync of its pin.
    pub fn add(&mut self, peripheral: Peripheral) {
        self.remove(&peripheral.id);
        self.bindings.push(Binding {
            peripheral,
            displayed: Level::Low,
        });
    }

    /// Remove a binding by id, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<Peripheral> {
        let index = self
            .bindings
            .iter()
            .position(|b| b.peripheral.id == id)?;
        Some(self.bindings.remove(index).peripheral)
    }

    /// Copy `level` onto every binding for `pin`; returns how many updated
    pub fn sync(&mut self, pin: &PinId, level: Level) -> usize {
        let mut count = 0;
        for binding in self.bindings.iter_mut().filter(|b| &b.peripheral.pin == pin) {
            binding.displayed = level;
            count += 1;
        }
        count
    }

    /// Show every peripheral as `Low`, as after a board reset
    pub fn reset_display(&mut self) {
        for binding in &mut self.bindings {
            binding.displayed = Level::Low;
        }
    }

    pub fn get(&self, id: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.peripheral.id == id)
    }

    /// Bindings attached to one pin
    pub fn on_pin<'a>(&'a self, pin: &'a PinId) -> impl Iterator<Item = &'a Binding> + 'a {
        self.bindings.iter().filter(move |b| &b.peripheral.pin == pin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
