// Simulation session for the sketch interpreter

use crate::board::{
    peripherals::{Peripheral, PeripheralRegistry},
    pins::PinState,
    serial::SerialLog,
};
use crate::interpreter::constants::DEFAULT_HISTORY_LIMIT;
use crate::interpreter::state::{ExecutionState, Phase};
use crate::interpreter::statements::SimulationContext;
use crate::parser::{self, ast::*};
use crate::scheduler::Millis;
use crate::snapshot::{Snapshot, SnapshotHistory};
use tracing::{debug, trace};

/// The simulation session that owns a program and everything it affects
pub struct Simulation {
    /// Program being executed
    program: Program,

    /// Program loaded while running; swapped in on the next stop
    pending: Option<Program>,

    /// Block, cursor and delay gate
    state: ExecutionState,

    /// Pins, serial log and peripheral bindings
    ctx: SimulationContext,

    /// Location of the last executed statement
    current_location: Option<SourceLocation>,

    /// Statements executed since start
    steps_executed: u64,

    /// Time of the last tick
    last_tick: Millis,

    /// Snapshots of recent steps for reviewing
    history: SnapshotHistory,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Create an idle session with no program and no peripherals
    pub fn new() -> Self {
        Self::with_peripherals(PeripheralRegistry::new(), DEFAULT_HISTORY_LIMIT)
    }

    /// Create an idle session with peripherals already bound
    pub fn with_peripherals(peripherals: PeripheralRegistry, history_limit: usize) -> Self {
        Simulation {
            program: Program::new(),
            pending: None,
            state: ExecutionState::new(),
            ctx: SimulationContext::new(peripherals),
            current_location: None,
            steps_executed: 0,
            last_tick: 0,
            history: SnapshotHistory::new(history_limit),
        }
    }

    /// Parse `source` and make it the program for the next run.
    ///
    /// While a run is in progress the new program is held back and takes
    /// effect on the next [`stop`](Self::stop).
    pub fn load(&mut self, source: &str) -> &Program {
        let program = parser::parse(source);
        debug!(
            setup = program.setup.len(),
            loop_len = program.loop_body.len(),
            unrecognized = program.unrecognized_count(),
            "sketch parsed"
        );

        if self.is_started() {
            debug!("run in progress, deferring program until stop");
            return self.pending.insert(program);
        }

        self.program = program;
        &self.program
    }

    /// Begin a run: `Idle → RunningSetup | RunningLoop | Halted`
    pub fn start(&mut self) {
        if self.is_started() {
            return;
        }

        self.state.start(&self.program);
        self.steps_executed = 0;
        self.last_tick = 0;
        self.current_location = None;
        debug!(phase = %self.state.phase, "simulation started");
    }

    /// End the run and clear pins, serial output, cursor and wake time
    pub fn stop(&mut self) {
        self.state.stop();
        self.ctx.reset();
        self.history.clear();
        self.current_location = None;
        self.steps_executed = 0;
        self.last_tick = 0;

        if let Some(program) = self.pending.take() {
            self.program = program;
            debug!("deferred program applied");
        }
        debug!("simulation stopped");
    }

    /// Same as [`stop`](Self::stop); named for the UI's reset action
    pub fn reset(&mut self) {
        self.stop();
    }

    /// Run one scheduler tick at time `now`.
    ///
    /// Does nothing while idle or halted, or while a delay gate is closed.
    /// Otherwise executes exactly one statement and advances the cursor.
    pub fn tick(&mut self, now: Millis) {
        if !self.state.phase.is_running() {
            return;
        }
        self.last_tick = now;

        if self.state.check_gate(now) {
            trace!(now, wake_at = ?self.state.wake_at, "gated");
            return;
        }

        let phase_before = self.state.phase;
        let Some(node) = self.state.current(&self.program) else {
            // Empty loop body: spin without effect
            return;
        };

        trace!(now, line = node.location.line, stmt = ?node.stmt, "execute");
        if let Some(offset) = self.ctx.execute(&node.stmt, now) {
            self.state.sleep_until(now.saturating_add(offset));
        }
        self.current_location = Some(node.location);
        self.steps_executed += 1;
        self.state.advance(&self.program);

        if self.state.phase != phase_before {
            debug!(from = %phase_before, to = %self.state.phase, "phase change");
        }

        if self.history.memory_limit() > 0 {
            let snapshot = self.snapshot();
            if let Err(e) = self.history.push(snapshot) {
                trace!(error = %e, "step not recorded");
            }
        }
    }

    /// Bind a peripheral; it immediately shows its pin's current level
    pub fn attach(&mut self, peripheral: Peripheral) {
        let pin = peripheral.pin.clone();
        self.ctx.peripherals.add(peripheral);
        let level = self.ctx.pins.level(&pin);
        self.ctx.peripherals.sync(&pin, level);
    }

    /// Unbind a peripheral by id
    pub fn detach(&mut self, id: &str) -> Option<Peripheral> {
        self.ctx.peripherals.remove(id)
    }

    /// Capture all observables
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            pins: self.ctx.pins.clone(),
            serial: self.ctx.serial.mark(),
            peripherals: self.ctx.peripherals.clone(),
            location: self.current_location,
            steps_executed: self.steps_executed,
            time: self.last_tick,
        }
    }

    /// Whether `start` has been called since the last stop
    pub fn is_started(&self) -> bool {
        self.state.phase != Phase::Idle
    }

    // Accessor methods for UI

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn has_pending_program(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn pins(&self) -> &PinState {
        &self.ctx.pins
    }

    pub fn serial(&self) -> &SerialLog {
        &self.ctx.serial
    }

    pub fn peripherals(&self) -> &PeripheralRegistry {
        &self.ctx.peripherals
    }

    pub fn current_location(&self) -> Option<SourceLocation> {
        self.current_location
    }

    /// Statement the next ungated tick will run
    pub fn next_statement(&self) -> Option<&StatementNode> {
        self.state.current(&self.program)
    }

    pub fn steps_executed(&self) -> u64 {
        self.steps_executed
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }
}
