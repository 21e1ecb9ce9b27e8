//! Digital pin state
//!
//! [`PinState`] maps each pin the sketch has touched to its mode and level.
//! Pins are created on first use; any identifier is accepted, including pin
//! numbers the real board does not have.

use crate::parser::ast::{Level, PinId, PinMode};
use rustc_hash::FxHashMap;

/// Mode and level of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pin {
    pub mode: PinMode,
    pub level: Level,
}

/// All pins the running sketch has configured or written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinState {
    pins: FxHashMap<PinId, Pin>,
}

impl PinState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pin's mode; the level is left as it was
    pub fn set_mode(&mut self, pin: &PinId, mode: PinMode) {
        self.pins.entry(pin.clone()).or_default().mode = mode;
    }

    /// Set a pin's level, returning `true` if it changed
    pub fn write(&mut self, pin: &PinId, level: Level) -> bool {
        let entry = self.pins.entry(pin.clone()).or_default();
        let changed = entry.level != level;
        entry.level = level;
        changed
    }

    pub fn get(&self, pin: &PinId) -> Option<&Pin> {
        self.pins.get(pin)
    }

    /// Current level; untouched pins read `Low`
    pub fn level(&self, pin: &PinId) -> Level {
        self.pins.get(pin).map(|p| p.level).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn clear(&mut self) {
        self.pins.clear();
    }

    /// Pins ordered numbered-first, then by name
    pub fn sorted(&self) -> Vec<(&PinId, &Pin)> {
        let mut pins: Vec<_> = self.pins.iter().collect();
        pins.sort_by(|a, b| a.0.cmp(b.0));
        pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_does_not_touch_level() {
        let mut pins = PinState::new();
        let pin = PinId::Number(13);
        pins.write(&pin, Level::High);
        pins.set_mode(&pin, PinMode::Output);
        assert_eq!(pins.level(&pin), Level::High);
        assert_eq!(pins.get(&pin).map(|p| p.mode), Some(PinMode::Output));
    }

    #[test]
    fn write_reports_change() {
        let mut pins = PinState::new();
        let pin = PinId::from("A0");
        assert!(pins.write(&pin, Level::High));
        assert!(!pins.write(&pin, Level::High));
        assert!(pins.write(&pin, Level::Low));
    }

    #[test]
    fn sorted_puts_numbers_first() {
        let mut pins = PinState::new();
        pins.write(&PinId::from("A0"), Level::Low);
        pins.write(&PinId::Number(13), Level::Low);
        pins.write(&PinId::Number(2), Level::Low);
        let order: Vec<String> = pins.sorted().iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(order, vec!["2", "13", "A0"]);
    }
}
