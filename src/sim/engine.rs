//! Battle engine: owns one battle and advances it one tick at a time
//!
//! Each tick runs, in order: orbit/motion for every active blade, pairwise
//! collision resolution, then the termination check. The caller drives ticks
//! and supplies the wall-clock time; the engine never reads a clock.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::blade::{Blade, BladeId};
use super::collision::resolve_pair;
use super::events::{BattleObserver, BattleOutcome, NullObserver};
use super::vector::{angle_between, normalized_vector};
use crate::consts::{STAMINA_PER_SPEED, WALL_CLEARANCE};
use crate::error::{BattleError, Result};
use crate::tuning::Tuning;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Constructed, waiting for `start()`
    Idle,
    /// Countdown or ticking
    Running,
    /// Terminal; the engine cannot be restarted
    Finished,
}

/// What a call to `tick` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Engine is not running; nothing happened
    Idle,
    /// Still in the pre-battle countdown; nothing simulated
    Countdown,
    /// Simulated one step; schedule another
    Continue,
    /// Simulated one step and the battle ended
    Finished(BattleOutcome),
}

/// Per-blade state for a rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeView {
    pub id: BladeId,
    pub name: String,
    pub pos: Vec2,
    pub stamina_fraction: f32,
    pub spin_duration: f32,
    pub active: bool,
}

/// Readable battle state between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub ticks: u64,
    pub phase: BattlePhase,
    pub outcome: Option<BattleOutcome>,
    pub blades: Vec<BladeView>,
}

/// Drives one battle from start to a winner or a draw
#[derive(Debug)]
pub struct BattleEngine<O: BattleObserver = NullObserver> {
    arena: Arena,
    blades: Vec<Blade>,
    tuning: Tuning,
    phase: BattlePhase,
    outcome: Option<BattleOutcome>,
    observer: O,
    /// First tick that is actually simulated (end of the countdown)
    first_tick_ms: f64,
    /// Wall-clock time of the previous simulated tick (advisory only)
    last_tick_ms: Option<f64>,
    /// Simulated tick counter
    ticks: u64,
}

impl BattleEngine<NullObserver> {
    /// Engine without notifications
    pub fn new(arena: Arena, blades: Vec<Blade>, tuning: Tuning) -> Result<Self> {
        Self::with_observer(arena, blades, tuning, NullObserver)
    }
}

impl<O: BattleObserver> BattleEngine<O> {
    pub fn with_observer(
        arena: Arena,
        blades: Vec<Blade>,
        tuning: Tuning,
        observer: O,
    ) -> Result<Self> {
        if blades.is_empty() {
            return Err(BattleError::NoBlades);
        }
        tuning.validate()?;
        // Containment needs room for at least one blade between center and wall
        if arena.radius <= tuning.blade_radius + WALL_CLEARANCE {
            return Err(BattleError::InvalidArena {
                radius: arena.radius,
            });
        }

        Ok(Self {
            arena,
            blades,
            tuning,
            phase: BattlePhase::Idle,
            outcome: None,
            observer,
            first_tick_ms: 0.0,
            last_tick_ms: None,
            ticks: 0,
        })
    }

    /// Begin the battle: the first tick is simulated after the countdown
    ///
    /// A battle with one or zero spinning blades ends right here.
    pub fn start(&mut self, now_ms: f64) -> Result<()> {
        match self.phase {
            BattlePhase::Running => {
                log::warn!("start() ignored: battle already running");
                return Err(BattleError::AlreadyRunning);
            }
            BattlePhase::Finished => {
                log::warn!("start() ignored: battle already finished");
                return Err(BattleError::AlreadyFinished);
            }
            BattlePhase::Idle => {}
        }

        self.phase = BattlePhase::Running;
        self.first_tick_ms = now_ms + self.tuning.countdown_ms;
        self.last_tick_ms = None;
        log::info!(
            "Battle starting: {} blades, arena radius {}, countdown {}ms",
            self.blades.len(),
            self.arena.radius,
            self.tuning.countdown_ms
        );

        if self.active_count() <= 1 {
            self.finish();
        }
        Ok(())
    }

    /// Abort a running battle without declaring a result
    pub fn stop(&mut self) {
        if self.phase == BattlePhase::Running {
            log::info!("Battle stopped after {} ticks", self.ticks);
            self.phase = BattlePhase::Finished;
        }
    }

    /// Advance the battle by one step at wall-clock time `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.phase != BattlePhase::Running {
            return TickOutcome::Idle;
        }
        if now_ms < self.first_tick_ms {
            return TickOutcome::Countdown;
        }

        if let Some(last) = self.last_tick_ms {
            log::trace!("tick {} (+{:.1}ms)", self.ticks + 1, now_ms - last);
        }
        self.last_tick_ms = Some(now_ms);
        self.ticks += 1;

        for blade in self.blades.iter_mut().filter(|b| b.is_active()) {
            orbit_step(blade, &self.arena, &self.tuning);
        }

        self.resolve_collisions(now_ms);

        if self.active_count() <= 1 {
            return TickOutcome::Finished(self.finish());
        }
        TickOutcome::Continue
    }

    /// Test every unordered pair of blades once
    fn resolve_collisions(&mut self, now_ms: f64) {
        let n = self.blades.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.blades.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if let Some(hit) = resolve_pair(a, b, &self.arena, &self.tuning, now_ms) {
                    self.observer.on_hit(&hit);
                }
            }
        }
    }

    /// Enter the terminal phase and notify the observer (exactly once)
    fn finish(&mut self) -> BattleOutcome {
        let winner = if self.active_count() == 1 {
            self.blades.iter().find(|b| b.is_active())
        } else {
            None
        };
        let outcome = match winner {
            Some(blade) => {
                log::info!(
                    "{} wins after {} ticks ({:.0} stamina left)",
                    blade.display_name(),
                    self.ticks,
                    blade.stamina()
                );
                BattleOutcome::Winner(blade.id)
            }
            None => {
                log::info!("Draw after {} ticks", self.ticks);
                BattleOutcome::Draw
            }
        };

        self.phase = BattlePhase::Finished;
        self.outcome = Some(outcome);
        self.observer.on_end(winner);
        outcome
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == BattlePhase::Running
    }

    /// Result, once the battle has ended on its own
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Wall-clock time of the last simulated tick
    pub fn last_tick_ms(&self) -> Option<f64> {
        self.last_tick_ms
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn blades(&self) -> &[Blade] {
        &self.blades
    }

    pub fn blade(&self, id: BladeId) -> Option<&Blade> {
        self.blades.iter().find(|b| b.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.blades.iter().filter(|b| b.is_active()).count()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Hand the blades back to their owner
    pub fn into_blades(self) -> Vec<Blade> {
        self.blades
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            ticks: self.ticks,
            phase: self.phase,
            outcome: self.outcome,
            blades: self
                .blades
                .iter()
                .map(|b| BladeView {
                    id: b.id,
                    name: b.display_name(),
                    pos: b.pos,
                    stamina_fraction: b.stamina_fraction(),
                    spin_duration: b.spin_duration(),
                    active: b.is_active(),
                })
                .collect(),
        }
    }
}

/// Orbit, pull, integrate, contain and drain one active blade
fn orbit_step(blade: &mut Blade, arena: &Arena, tuning: &Tuning) {
    let angle = angle_between(arena.center, blade.pos);
    let radial_dir = normalized_vector(arena.center, blade.pos);

    // Tangent is the radial direction rotated ±90°
    let tangent = Vec2::from_angle(angle).perp();
    let tangent = if blade.clockwise { tangent } else { -tangent };

    let base_speed = (blade.stamina() / STAMINA_PER_SPEED).min(tuning.max_orbit_speed);
    if blade.reduced_orbit {
        blade.vel *= 0.5;
        blade.reduced_orbit = false;
    } else {
        blade.vel = tangent * base_speed * blade.profile().orbit_multiplier;
    }

    // Weaker blades spiral inward faster
    let pull = tuning.base_pull + (1.0 - blade.stamina_fraction()) * tuning.depletion_pull;
    blade.vel -= radial_dir * pull;

    blade.pos += blade.vel;
    let flung = arena.distance_from_center(blade.pos);

    blade.bounce_from_boundary(arena.center, arena.radius, tuning.blade_radius);
    blade.drain(tuning.drain_per_tick);

    if flung > arena.radius * tuning.out_zone_factor {
        log::debug!("{} knocked out of the arena", blade.display_name());
        blade.knock_out();
    }
}
