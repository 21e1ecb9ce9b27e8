// Snapshot history for reviewing past steps

use crate::board::{peripherals::PeripheralRegistry, pins::PinState, serial::SerialMark};
use crate::interpreter::state::ExecutionState;
use crate::parser::ast::SourceLocation;
use crate::scheduler::Millis;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot of {size} bytes exceeds the history limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

/// Everything the UI renders, captured after one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: ExecutionState,
    pub pins: PinState,
    /// Serial output up to this step; resolve with [`SerialLog::at`](crate::board::serial::SerialLog::at)
    pub serial: SerialMark,
    pub peripherals: PeripheralRegistry,
    pub location: Option<SourceLocation>,
    pub steps_executed: u64,
    pub time: Millis,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough figures per pin and per binding
        let pins = self.pins.len() * 48;
        let peripherals = self.peripherals.len() * 96;

        std::mem::size_of::<Self>() + pins + peripherals
    }
}

/// Bounded history of snapshots; the oldest are dropped first
#[derive(Debug)]
pub struct SnapshotHistory {
    snapshots: VecDeque<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotHistory {
    pub fn new(max_memory: usize) -> Self {
        SnapshotHistory {
            snapshots: VecDeque::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot, evicting old ones to stay within the memory limit.
    ///
    /// A snapshot that alone exceeds the limit is rejected and the history
    /// is left untouched.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        let size = snapshot.estimated_size();
        if size > self.max_memory {
            return Err(SnapshotError::TooLarge {
                size,
                limit: self.max_memory,
            });
        }

        while self.current_memory + size > self.max_memory {
            match self.snapshots.pop_front() {
                Some(old) => self.current_memory -= old.estimated_size(),
                None => break,
            }
        }

        self.current_memory += size;
        self.snapshots.push_back(snapshot);
        Ok(())
    }

    /// Snapshot `back` steps before the newest (0 = newest)
    pub fn from_newest(&self, back: usize) -> Option<&Snapshot> {
        let index = self.snapshots.len().checked_sub(back + 1)?;
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::engine::Simulation;

    fn snapshot_at(time: Millis) -> Snapshot {
        let mut snapshot = Simulation::new().snapshot();
        snapshot.time = time;
        snapshot
    }

    #[test]
    fn evicts_oldest_within_limit() {
        let size = snapshot_at(0).estimated_size();
        let mut history = SnapshotHistory::new(size * 3);

        for t in 0..10 {
            history.push(snapshot_at(t)).unwrap();
            assert!(history.memory_usage() <= history.memory_limit());
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.from_newest(0).map(|s| s.time), Some(9));
        assert_eq!(history.from_newest(2).map(|s| s.time), Some(7));
    }

    #[test]
    fn rejects_oversized_snapshot() {
        let size = snapshot_at(0).estimated_size();
        let mut history = SnapshotHistory::new(size - 1);

        assert_eq!(
            history.push(snapshot_at(0)),
            Err(SnapshotError::TooLarge {
                size,
                limit: size - 1
            })
        );
        assert!(history.is_empty());
        assert_eq!(history.memory_usage(), 0);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = SnapshotHistory::new(0);
        assert!(history.push(snapshot_at(0)).is_err());
        assert!(history.is_empty());
    }
}
