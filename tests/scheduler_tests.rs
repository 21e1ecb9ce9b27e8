// Scheduler timing tests

use std::time::{Duration, Instant};

use sketchtty::interpreter::engine::Simulation;
use sketchtty::interpreter::state::Phase;
use sketchtty::parser::ast::{Level, PinId};
use sketchtty::scheduler::Scheduler;

const BLINK: &str = r#"
void setup() {
  pinMode(LED_BUILTIN, OUTPUT);
}
void loop() {
  digitalWrite(LED_BUILTIN, HIGH);
  delay(1000);
  digitalWrite(LED_BUILTIN, LOW);
  delay(1000);
}
"#;

fn blink() -> Simulation {
    let mut sim = Simulation::new();
    sim.load(BLINK);
    sim
}

#[test]
fn test_run_ticks_stamps_multiples_of_period() {
    let mut sim = blink();
    let mut scheduler = Scheduler::new(50);

    scheduler.run_ticks(&mut sim, 1);
    assert_eq!(scheduler.sim_time(), 50);
    assert_eq!(sim.snapshot().time, 50);

    scheduler.run_ticks(&mut sim, 9);
    assert_eq!(scheduler.sim_time(), 500);
    assert!(scheduler.is_paused());
}

#[test]
fn test_run_ticks_matches_blink_schedule() {
    let mut sim = blink();
    let mut scheduler = Scheduler::default();
    let led = PinId::Number(13);

    scheduler.run_ticks(&mut sim, 22);
    assert_eq!(sim.pins().level(&led), Level::High);
    scheduler.run_ticks(&mut sim, 1);
    assert_eq!(sim.pins().level(&led), Level::Low);
    assert_eq!(scheduler.sim_time(), 1150);
}

#[test]
fn test_period_changes_tick_count_not_delay() {
    // With a 10 ms period the 1000 ms delay spans five times as many ticks
    let mut sim = blink();
    let mut scheduler = Scheduler::new(10);
    let led = PinId::Number(13);

    // HIGH at t=20, delay at t=30 wakes at t=1030
    scheduler.run_ticks(&mut sim, 102);
    assert_eq!(sim.pins().level(&led), Level::High);
    scheduler.run_ticks(&mut sim, 1);
    assert_eq!(sim.pins().level(&led), Level::Low);
}

#[test]
fn test_zero_period_is_raised() {
    let scheduler = Scheduler::new(0);
    assert_eq!(scheduler.period_ms(), 1);
}

#[test]
fn test_wall_clock_driving() {
    let mut sim = blink();
    let mut scheduler = Scheduler::new(50);
    let t0 = Instant::now();

    scheduler.start(&mut sim, t0);
    assert!(scheduler.is_running());
    assert_eq!(sim.phase(), Phase::RunningSetup);

    let mut fired = 0;
    for ms in (0..=200).step_by(5) {
        if scheduler.poll(&mut sim, t0 + Duration::from_millis(ms)) {
            fired += 1;
        }
    }
    assert_eq!(fired, 4);
    assert_eq!(scheduler.sim_time(), 200);
    assert_eq!(sim.pins().level(&PinId::Number(13)), Level::High);
}

#[test]
fn test_pause_freezes_time() {
    let mut sim = blink();
    let mut scheduler = Scheduler::new(50);
    let t0 = Instant::now();

    scheduler.start(&mut sim, t0);
    assert!(scheduler.poll(&mut sim, t0 + Duration::from_millis(50)));
    scheduler.pause();
    assert!(!scheduler.poll(&mut sim, t0 + Duration::from_secs(10)));
    assert_eq!(scheduler.sim_time(), 50);

    assert!(scheduler.step(&mut sim));
    assert_eq!(scheduler.sim_time(), 100);

    let t1 = t0 + Duration::from_secs(10);
    scheduler.resume(t1);
    assert!(!scheduler.poll(&mut sim, t1));
    assert!(scheduler.poll(&mut sim, t1 + Duration::from_millis(50)));
    assert_eq!(scheduler.sim_time(), 150);
}

#[test]
fn test_stop_resets_time_and_session() {
    let mut sim = blink();
    let mut scheduler = Scheduler::new(50);

    scheduler.run_ticks(&mut sim, 5);
    scheduler.stop(&mut sim);

    assert!(scheduler.is_stopped());
    assert_eq!(scheduler.sim_time(), 0);
    assert_eq!(sim.phase(), Phase::Idle);
    assert!(sim.pins().is_empty());
}
