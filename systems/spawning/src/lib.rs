#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting attacker spawn commands.

use std::time::Duration;

use lane_defence_core::{Command, Event, SessionPhase};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits spawn commands while a session runs.
///
/// The system accumulates tick time against its configured interval. Any
/// phase other than [`SessionPhase::Running`] resets the accumulator, so a
/// paused or finished session leaves the timer inert, and a session restart
/// never inherits progress toward the previous session's next spawn.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    accumulator: Duration,
    rng_state: u64,
    phase: SessionPhase,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            accumulator: Duration::ZERO,
            rng_state: config.rng_seed,
            phase: SessionPhase::Idle,
        }
    }

    /// Consumes world events to emit spawn commands for elapsed intervals.
    ///
    /// `rows` is the number of lanes in the configured grid; each spawn
    /// selects one of them uniformly.
    pub fn handle(&mut self, events: &[Event], rows: u32, out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::SessionStarted => {
                    self.accumulator = Duration::ZERO;
                    accumulated = Duration::ZERO;
                }
                Event::PhaseChanged { phase } => {
                    self.phase = *phase;
                }
                Event::TimeAdvanced { dt } => {
                    accumulated = accumulated.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if self.phase != SessionPhase::Running {
            self.accumulator = Duration::ZERO;
            return;
        }

        if self.spawn_interval.is_zero() || rows == 0 {
            return;
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let spawn_attempts = self.resolve_spawn_attempts();

        for _ in 0..spawn_attempts {
            let row = self.select_row(rows);
            out.push(Command::SpawnAttacker { row });
        }
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        let mut attempts = 0;
        while self.accumulator >= self.spawn_interval {
            self.accumulator -= self.spawn_interval;
            attempts += 1;
        }
        attempts
    }

    fn select_row(&mut self, rows: u32) -> u32 {
        let value = self.advance_rng();
        // The multiplier mixes poorly in the low bits, so draw from the top.
        ((value >> 33) % u64::from(rows)) as u32
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}
