//! Blade Arena - a spinning-blade arena battle simulation
//!
//! Core modules:
//! - `sim`: Deterministic battle simulation (orbits, collisions, stamina, termination)
//! - `tuning`: Data-driven battle balance
//! - `runner`: Headless drivers that feed ticks into an engine
//! - `error`: Contract violations surfaced by the engine

pub mod error;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use error::{BattleError, Result};
pub use tuning::Tuning;

/// Battle tuning constants
///
/// These values were tuned by feel, not derived. Keep them here so the
/// engine and the `Tuning` defaults agree.
pub mod consts {
    /// Visual radius of a blade (collision and containment use it)
    pub const BLADE_RADIUS: f32 = 40.0;
    /// Collision distance is `BLADE_RADIUS * COLLISION_MARGIN` (covers discrete-step tunneling)
    pub const COLLISION_MARGIN: f32 = 2.2;
    /// Gap kept between the blade edge and the arena wall after containment
    pub const WALL_CLEARANCE: f32 = 1.0;

    /// Inner danger circle radius as a fraction of the arena radius
    pub const DANGER_ZONE_FACTOR: f32 = 0.2;
    /// Blades flung further than `radius * OUT_ZONE_FACTOR` in one step are knocked out
    pub const OUT_ZONE_FACTOR: f32 = 1.1;

    /// Stamina lost by every active blade each tick
    pub const DRAIN_PER_TICK: f32 = 0.5;
    /// Stamina lost per hit before the opponent's drain multiplier
    pub const BASE_HIT_DRAIN: f32 = 20.0;

    /// Orbit speed cap (pixels per tick)
    pub const MAX_ORBIT_SPEED: f32 = 5.0;
    /// Stamina points per unit of orbit speed
    pub const STAMINA_PER_SPEED: f32 = 100.0;
    /// Constant inward pull applied every tick
    pub const BASE_PULL: f32 = 0.2;
    /// Extra inward pull at zero stamina (scaled by depletion fraction)
    pub const DEPLETION_PULL: f32 = 0.5;

    /// Scale applied to the averaged power of a colliding pair
    pub const POWER_IMPULSE_SCALE: f32 = 0.02;
    /// Knockback impulse per unit of knockback coefficient
    pub const KNOCKBACK_STRENGTH: f32 = 4.0;
    /// Distance each blade is moved apart after a hit
    pub const SEPARATION_OFFSET: f32 = 10.0;
    /// Minimum center distance after separation
    pub const MIN_SEPARATION: f32 = 2.0 * BLADE_RADIUS;

    /// Ejection force for hits inside the danger circle
    pub const EJECT_FORCE: f32 = 1200.0;
    /// Damping applied to the ejection force
    pub const EJECT_DAMPING: f32 = 0.4;
    /// Share of the ejection the stronger blade receives
    pub const EJECT_COMPENSATION: f32 = 0.1;
    /// Share of the ejection each blade receives on an exact knockback tie
    pub const EJECT_TIE_SHARE: f32 = 0.5;

    /// Same pair may not be resolved again within this window (ms, wall-clock)
    pub const HIT_COOLDOWN_MS: f64 = 200.0;
    /// Pre-battle countdown before the first tick is simulated (ms)
    pub const COUNTDOWN_MS: f64 = 6500.0;

    /// Spin animation period at full stamina (seconds)
    pub const SPIN_DURATION_MIN: f32 = 0.25;
    /// Spin animation period at zero stamina (seconds)
    pub const SPIN_DURATION_MAX: f32 = 0.75;
}
