//! Headless drivers for the battle engine
//!
//! The engine only advances when told to. These helpers play the role of the
//! display-refresh callback or interval timer: one tick at a time, never
//! overlapping.

use std::f32::consts::TAU;
use std::time::Instant;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::{BattleError, Result};
use crate::sim::{Arena, BattleEngine, BattleObserver, BattleOutcome, Blade, TickOutcome};

/// Monotonic milliseconds since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Reset blades for a new battle, spaced evenly on a ring at half the arena radius
///
/// Drift velocities come from a seeded RNG so a seed always gives the same
/// opening. Orbit directions alternate.
pub fn prepare_battle(blades: &mut [Blade], arena: &Arena, seed: u64) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let ring = arena.radius * 0.5;
    let step = TAU / blades.len().max(1) as f32;

    for (i, blade) in blades.iter_mut().enumerate() {
        let theta = step * i as f32;
        let pos = arena.center + Vec2::from_angle(theta) * ring;
        blade.reset_for_battle(pos, &mut rng);
        blade.clockwise = i % 2 == 0;
    }
}

/// Result of a headless run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Simulated ticks (countdown frames excluded)
    pub ticks: u64,
    /// `None` if the tick cap was reached first
    pub outcome: Option<BattleOutcome>,
    /// Timestamp of the last frame driven
    pub end_ms: f64,
}

/// Start `engine` at `start_ms` and feed it a frame every `interval_ms`
///
/// Stops when the battle finishes or after `max_ticks` simulated ticks.
pub fn run_fixed_interval<O: BattleObserver>(
    engine: &mut BattleEngine<O>,
    start_ms: f64,
    interval_ms: f64,
    max_ticks: u64,
) -> Result<RunSummary> {
    if !(interval_ms.is_finite() && interval_ms > 0.0) {
        return Err(BattleError::InvalidInterval(interval_ms));
    }

    engine.start(start_ms)?;
    let mut now = start_ms;

    while engine.is_running() && engine.ticks() < max_ticks {
        match engine.tick(now) {
            TickOutcome::Finished(_) | TickOutcome::Idle => break,
            TickOutcome::Countdown | TickOutcome::Continue => {}
        }
        now += interval_ms;
    }

    if engine.is_running() {
        log::warn!("Battle still running after {} ticks", engine.ticks());
    }

    Ok(RunSummary {
        ticks: engine.ticks(),
        outcome: engine.outcome(),
        end_ms: now,
    })
}
