//! Data-driven battle balance
//!
//! Every magic number the engine reads lives here so a battle can be
//! re-tuned from a JSON document without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{BattleError, Result};

/// Battle tuning knobs (defaults are the hand-tuned values in `consts`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Stamina ===
    /// Stamina lost per tick by every active blade
    pub drain_per_tick: f32,
    /// Stamina lost per hit before the opponent's multiplier
    pub base_hit_drain: f32,

    // === Timing ===
    /// Same pair may not collide again within this window (ms)
    pub hit_cooldown_ms: f64,
    /// Delay between `start()` and the first simulated tick (ms)
    pub countdown_ms: f64,

    // === Geometry ===
    /// Blade radius used for containment and collision
    pub blade_radius: f32,
    /// Blades flung past `radius * out_zone_factor` in one step are knocked out
    pub out_zone_factor: f32,

    // === Orbit ===
    pub max_orbit_speed: f32,
    pub base_pull: f32,
    pub depletion_pull: f32,

    // === Collision ===
    pub power_impulse_scale: f32,
    pub knockback_strength: f32,
    pub separation_offset: f32,
    pub min_separation: f32,
    pub eject_force: f32,
    pub eject_damping: f32,
    pub eject_compensation: f32,
    pub eject_tie_share: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drain_per_tick: DRAIN_PER_TICK,
            base_hit_drain: BASE_HIT_DRAIN,

            hit_cooldown_ms: HIT_COOLDOWN_MS,
            countdown_ms: COUNTDOWN_MS,

            blade_radius: BLADE_RADIUS,
            out_zone_factor: OUT_ZONE_FACTOR,

            max_orbit_speed: MAX_ORBIT_SPEED,
            base_pull: BASE_PULL,
            depletion_pull: DEPLETION_PULL,

            power_impulse_scale: POWER_IMPULSE_SCALE,
            knockback_strength: KNOCKBACK_STRENGTH,
            separation_offset: SEPARATION_OFFSET,
            min_separation: MIN_SEPARATION,
            eject_force: EJECT_FORCE,
            eject_damping: EJECT_DAMPING,
            eject_compensation: EJECT_COMPENSATION,
            eject_tie_share: EJECT_TIE_SHARE,
        }
    }
}

impl Tuning {
    /// Default tuning without the pre-battle countdown (headless runs, tests)
    pub fn instant() -> Self {
        Self {
            countdown_ms: 0.0,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| BattleError::InvalidTuning(e.to_string()))?;
        tuning.validate()?;
        log::debug!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BattleError::InvalidTuning(e.to_string()))
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        let floats = [
            self.drain_per_tick,
            self.base_hit_drain,
            self.blade_radius,
            self.out_zone_factor,
            self.max_orbit_speed,
            self.base_pull,
            self.depletion_pull,
            self.power_impulse_scale,
            self.knockback_strength,
            self.separation_offset,
            self.min_separation,
            self.eject_force,
            self.eject_damping,
            self.eject_compensation,
            self.eject_tie_share,
        ];
        if floats.iter().any(|v| !v.is_finite()) {
            return Err(BattleError::InvalidTuning("non-finite value".into()));
        }
        if self.blade_radius <= 0.0 {
            return Err(BattleError::InvalidTuning(format!(
                "blade_radius must be positive, got {}",
                self.blade_radius
            )));
        }
        if !(self.hit_cooldown_ms.is_finite() && self.hit_cooldown_ms >= 0.0) {
            return Err(BattleError::InvalidTuning(format!(
                "hit_cooldown_ms must be >= 0, got {}",
                self.hit_cooldown_ms
            )));
        }
        if !(self.countdown_ms.is_finite() && self.countdown_ms >= 0.0) {
            return Err(BattleError::InvalidTuning(format!(
                "countdown_ms must be >= 0, got {}",
                self.countdown_ms
            )));
        }
        if self.drain_per_tick < 0.0 || self.base_hit_drain < 0.0 {
            return Err(BattleError::InvalidTuning("drain rates must be >= 0".into()));
        }
        Ok(())
    }
}
