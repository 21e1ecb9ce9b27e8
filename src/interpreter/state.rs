//! Execution state machine
//!
//! [`ExecutionState`] tracks which block is running, the index of the next
//! statement, and an optional wake time set by `delay`. It is a plain value
//! owned by the session; every change goes through the transition methods
//! below.
//!
//! ```text
//! Idle --start--> RunningSetup --(setup done)--> RunningLoop --(wrap)--> RunningLoop
//!   \--start (no setup)--------------------------^
//!   \--start (empty program)--> Halted
//! any --stop--> Idle
//! ```

use crate::parser::ast::{Block, Program, StatementNode};
use crate::scheduler::Millis;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    RunningSetup,
    RunningLoop,
    Halted,
}

impl Phase {
    /// Block whose statements this phase executes
    pub fn block(self) -> Option<Block> {
        match self {
            Phase::RunningSetup => Some(Block::Setup),
            Phase::RunningLoop => Some(Block::Loop),
            Phase::Idle | Phase::Halted => None,
        }
    }

    pub fn is_running(self) -> bool {
        self.block().is_some()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::RunningSetup => "setup",
            Phase::RunningLoop => "loop",
            Phase::Halted => "halted",
        };
        f.write_str(s)
    }
}

/// Block, cursor and delay gate of a run.
///
/// `cursor` is always a valid index into the current block, or equal to its
/// length when the block has nothing left to run (only an empty loop body).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionState {
    pub phase: Phase,
    pub cursor: usize,
    pub wake_at: Option<Millis>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Idle → RunningSetup | RunningLoop | Halted`; ignored unless idle
    pub fn start(&mut self, program: &Program) {
        if self.phase != Phase::Idle {
            return;
        }

        self.cursor = 0;
        self.wake_at = None;
        self.phase = if !program.setup.is_empty() {
            Phase::RunningSetup
        } else if !program.loop_body.is_empty() {
            Phase::RunningLoop
        } else {
            Phase::Halted
        };
    }

    /// Back to `Idle` with no cursor or gate
    pub fn stop(&mut self) {
        *self = Self::new();
    }

    /// Whether a pending delay still blocks execution at `now`
    pub fn is_gated(&self, now: Millis) -> bool {
        self.wake_at.is_some_and(|wake| now < wake)
    }

    /// Open the gate if its time has come; returns `true` if still closed
    pub fn check_gate(&mut self, now: Millis) -> bool {
        if self.is_gated(now) {
            return true;
        }
        self.wake_at = None;
        false
    }

    /// Block execution until `wake_at`
    pub fn sleep_until(&mut self, wake_at: Millis) {
        self.wake_at = Some(wake_at);
    }

    /// Statement the next tick will execute, if any
    pub fn current<'p>(&self, program: &'p Program) -> Option<&'p StatementNode> {
        let block = self.phase.block()?;
        program.block(block).get(self.cursor)
    }

    /// Move past the statement just executed.
    ///
    /// The end of `setup` hands over to `loop` at index 0; the end of `loop`
    /// wraps to 0.
    pub fn advance(&mut self, program: &Program) {
        match self.phase {
            Phase::RunningSetup => {
                self.cursor += 1;
                if self.cursor >= program.setup.len() {
                    self.phase = Phase::RunningLoop;
                    self.cursor = 0;
                }
            }
            Phase::RunningLoop => {
                if program.loop_body.is_empty() {
                    return;
                }
                self.cursor += 1;
                if self.cursor >= program.loop_body.len() {
                    self.cursor = 0;
                }
            }
            Phase::Idle | Phase::Halted => {}
        }
    }
}
