//! Fixed-period ticker
//!
//! The [`Scheduler`] is the only part of the simulator that knows about real
//! time. It decides *when* a tick is due from the wall clock, and it owns the
//! simulated clock that ticks are stamped with: simulated time advances by
//! exactly one period per tick, so tick *k* of a run always happens at
//! `k * period` milliseconds. Runs are therefore reproducible whatever the
//! host's timer jitter, and pausing or single-stepping freezes time.
//!
//! At most one tick fires per [`poll`](Scheduler::poll); a host that falls
//! behind simply runs slower instead of bursting through missed ticks.

use crate::interpreter::constants::DEFAULT_TICK_MS;
use crate::interpreter::engine::Simulation;
use std::time::{Duration, Instant};
use tracing::debug;

/// Simulated milliseconds since the run started
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Stopped,
    Running { next_due: Instant },
    Paused,
}

/// Periodic driver for a [`Simulation`]
#[derive(Debug, Clone)]
pub struct Scheduler {
    period: Duration,
    sim_time: Millis,
    run_state: RunState,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

impl Scheduler {
    /// Create a stopped scheduler; a zero period is raised to 1 ms
    pub fn new(period_ms: u64) -> Self {
        Scheduler {
            period: Duration::from_millis(period_ms.max(1)),
            sim_time: 0,
            run_state: RunState::Stopped,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period.as_millis() as u64
    }

    /// Simulated time of the most recent tick
    pub fn sim_time(&self) -> Millis {
        self.sim_time
    }

    pub fn is_running(&self) -> bool {
        matches!(self.run_state, RunState::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.run_state == RunState::Stopped
    }

    /// Start the simulation and schedule the first tick one period from `now`
    pub fn start(&mut self, sim: &mut Simulation, now: Instant) {
        if !self.is_stopped() {
            return;
        }
        sim.start();
        self.sim_time = 0;
        self.run_state = RunState::Running {
            next_due: now + self.period,
        };
        debug!(period_ms = self.period_ms(), "scheduler started");
    }

    /// Stop ticking and reset the simulation
    pub fn stop(&mut self, sim: &mut Simulation) {
        self.run_state = RunState::Stopped;
        self.sim_time = 0;
        sim.stop();
        debug!("scheduler stopped");
    }

    /// Suspend ticking without touching simulation state
    pub fn pause(&mut self) {
        if self.is_running() {
            self.run_state = RunState::Paused;
        }
    }

    /// Continue after [`pause`](Self::pause)
    pub fn resume(&mut self, now: Instant) {
        if self.is_paused() {
            self.run_state = RunState::Running {
                next_due: now + self.period,
            };
        }
    }

    /// Fire a tick if one is due at `now`; returns whether it did
    pub fn poll(&mut self, sim: &mut Simulation, now: Instant) -> bool {
        let RunState::Running { next_due } = self.run_state else {
            return false;
        };
        if now < next_due {
            return false;
        }

        let mut next = next_due + self.period;
        if next <= now {
            // Fell behind: re-anchor instead of catching up
            next = now + self.period;
        }
        self.run_state = RunState::Running { next_due: next };
        self.advance(sim);
        true
    }

    /// Fire one tick immediately; only while paused
    pub fn step(&mut self, sim: &mut Simulation) -> bool {
        if !self.is_paused() {
            return false;
        }
        self.advance(sim);
        true
    }

    /// Start if needed, then fire `ticks` ticks back to back.
    ///
    /// This is the deterministic driver used by headless runs and tests.
    pub fn run_ticks(&mut self, sim: &mut Simulation, ticks: u64) {
        if self.is_stopped() {
            sim.start();
            self.sim_time = 0;
            self.run_state = RunState::Paused;
        }
        for _ in 0..ticks {
            self.advance(sim);
        }
    }

    fn advance(&mut self, sim: &mut Simulation) {
        self.sim_time += self.period_ms();
        sim.tick(self.sim_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_waits_for_period() {
        let mut sim = Simulation::new();
        let mut scheduler = Scheduler::new(50);
        let t0 = Instant::now();

        scheduler.start(&mut sim, t0);
        assert!(!scheduler.poll(&mut sim, t0 + Duration::from_millis(10)));
        assert!(scheduler.poll(&mut sim, t0 + Duration::from_millis(50)));
        assert_eq!(scheduler.sim_time(), 50);
        assert!(!scheduler.poll(&mut sim, t0 + Duration::from_millis(60)));
    }

    #[test]
    fn lagging_host_gets_one_tick_per_poll() {
        let mut sim = Simulation::new();
        let mut scheduler = Scheduler::new(50);
        let t0 = Instant::now();

        scheduler.start(&mut sim, t0);
        assert!(scheduler.poll(&mut sim, t0 + Duration::from_millis(500)));
        assert!(!scheduler.poll(&mut sim, t0 + Duration::from_millis(520)));
        assert_eq!(scheduler.sim_time(), 50);
    }

    #[test]
    fn step_only_while_paused() {
        let mut sim = Simulation::new();
        let mut scheduler = Scheduler::new(50);
        let t0 = Instant::now();

        assert!(!scheduler.step(&mut sim));
        scheduler.start(&mut sim, t0);
        assert!(!scheduler.step(&mut sim));
        scheduler.pause();
        assert!(scheduler.step(&mut sim));
        assert!(!scheduler.poll(&mut sim, t0 + Duration::from_secs(5)));
        scheduler.resume(t0);
        assert!(scheduler.is_running());
    }

    #[test]
    fn zero_period_is_clamped() {
        assert_eq!(Scheduler::new(0).period_ms(), 1);
    }
}
