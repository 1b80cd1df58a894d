//! Blade entity: kinematic and stamina state for one spinning top
//!
//! The engine mutates blades through these methods only; presentation reads
//! the public fields and getters between ticks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryProfile};
use crate::consts::{COLLISION_MARGIN, SPIN_DURATION_MAX, SPIN_DURATION_MIN, WALL_CLEARANCE};

/// Stable blade identifier
pub type BladeId = u32;

/// A spinning blade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blade {
    pub id: BladeId,
    /// Display name (may be empty; see `display_name`)
    pub name: String,
    pub category: Category,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Orbit direction around the arena center
    pub clockwise: bool,
    /// Strength rating used by the collision impulse
    pub power: f32,
    /// One-shot damping for the next orbit update after a danger-zone ejection
    pub reduced_orbit: bool,
    /// Wall-clock timestamp (ms) of the last resolved hit
    pub last_hit_ms: Option<f64>,
    stamina: f32,
    max_stamina: f32,
    /// Spin animation period in seconds (presentation)
    spin_duration: f32,
}

impl Blade {
    pub fn new(
        id: BladeId,
        name: impl Into<String>,
        category: Category,
        stamina: f32,
        power: f32,
    ) -> Self {
        let stamina = if stamina.is_finite() { stamina.max(0.0) } else { 0.0 };
        let power = if power.is_finite() { power } else { 0.0 };
        let mut blade = Self {
            id,
            name: name.into(),
            category,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            clockwise: true,
            power,
            reduced_orbit: false,
            last_hit_ms: None,
            stamina,
            max_stamina: stamina,
            spin_duration: SPIN_DURATION_MIN,
        };
        blade.update_spin_duration();
        blade
    }

    /// Build a blade whose stamina and power follow its category's archetype
    pub fn with_category_stats(
        id: BladeId,
        name: impl Into<String>,
        category: Category,
        base_stamina: f32,
        base_power: f32,
    ) -> Self {
        let (stamina, power) = category.derive_stats(base_stamina, base_power);
        Self::new(id, name, category, stamina.max(1.0), power)
    }

    /// Name to show, falling back to the id when unset
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Blade #{}", self.id)
        } else {
            self.name.clone()
        }
    }

    #[inline]
    pub fn profile(&self) -> &'static CategoryProfile {
        self.category.profile()
    }

    #[inline]
    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    #[inline]
    pub fn max_stamina(&self) -> f32 {
        self.max_stamina
    }

    /// Remaining stamina in [0, 1]
    pub fn stamina_fraction(&self) -> f32 {
        if self.max_stamina > 0.0 {
            (self.stamina / self.max_stamina).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// A blade spins (and takes part in the battle) while it has stamina
    #[inline]
    pub fn is_active(&self) -> bool {
        self.stamina > 0.0
    }

    /// Spin animation period in seconds: slows from 0.25s to 0.75s as stamina drains
    #[inline]
    pub fn spin_duration(&self) -> f32 {
        self.spin_duration
    }

    /// Remove stamina, clamping at zero. Returns how much was actually removed.
    pub fn drain(&mut self, amount: f32) -> f32 {
        let before = self.stamina;
        self.stamina = (self.stamina - amount.max(0.0)).max(0.0);
        self.update_spin_duration();
        before - self.stamina
    }

    /// Drop stamina to zero immediately (outer-zone knockout)
    pub fn knock_out(&mut self) {
        self.stamina = 0.0;
        self.update_spin_duration();
    }

    fn update_spin_duration(&mut self) {
        let depletion = 1.0 - self.stamina_fraction();
        self.spin_duration = (SPIN_DURATION_MIN + depletion * 0.5).min(SPIN_DURATION_MAX);
    }

    /// Keep the blade inside the arena wall
    ///
    /// If the blade edge crosses the wall, it is put back just inside along the
    /// same radial line and sent back toward the center at its previous speed.
    /// Returns true if a correction was applied.
    pub fn bounce_from_boundary(&mut self, center: Vec2, radius: f32, blade_radius: f32) -> bool {
        let offset = self.pos - center;
        let dist = offset.length();
        if dist + blade_radius <= radius {
            return false;
        }

        let outward = offset.normalize_or_zero();
        let speed = self.vel.length();
        self.vel = -outward * speed;
        let clamp_dist = (radius - blade_radius - WALL_CLEARANCE).max(0.0);
        self.pos = center + outward * clamp_dist;
        true
    }

    /// Overlap test with a generous margin for discrete steps
    pub fn is_colliding(&self, other: &Blade, blade_radius: f32) -> bool {
        self.pos.distance(other.pos) < blade_radius * COLLISION_MARGIN
    }

    /// True if a hit was resolved for this blade less than `cooldown_ms` ago
    pub fn on_cooldown(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        self.last_hit_ms.is_some_and(|last| now_ms - last < cooldown_ms)
    }

    /// Restore the blade for a fresh battle at `pos` with a small random drift
    pub fn reset_for_battle<R: Rng>(&mut self, pos: Vec2, rng: &mut R) {
        self.stamina = self.max_stamina;
        self.pos = pos;
        self.vel = Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));
        self.reduced_orbit = false;
        self.last_hit_ms = None;
        self.update_spin_duration();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BLADE_RADIUS;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn blade_at(id: BladeId, x: f32, y: f32) -> Blade {
        let mut blade = Blade::new(id, "", Category::Balance, 1000.0, 150.0);
        blade.pos = Vec2::new(x, y);
        blade
    }

    #[test]
    fn test_drain_clamps_at_zero() {
        let mut blade = Blade::new(1, "Dragoon", Category::Attack, 100.0, 200.0);
        assert_eq!(blade.drain(30.0), 30.0);
        assert_eq!(blade.stamina(), 70.0);
        assert_eq!(blade.drain(500.0), 70.0);
        assert_eq!(blade.stamina(), 0.0);
        assert!(!blade.is_active());
        assert_eq!(blade.max_stamina(), 100.0);
    }

    #[test]
    fn test_negative_drain_is_ignored() {
        let mut blade = Blade::new(1, "", Category::Balance, 100.0, 100.0);
        blade.drain(-50.0);
        assert_eq!(blade.stamina(), 100.0);
    }

    #[test]
    fn test_spin_duration_tracks_depletion() {
        let mut blade = Blade::new(1, "", Category::Balance, 1000.0, 100.0);
        assert!((blade.spin_duration() - 0.25).abs() < 1e-6);
        blade.drain(500.0);
        assert!((blade.spin_duration() - 0.5).abs() < 1e-6);
        blade.knock_out();
        assert!((blade.spin_duration() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_power_is_zeroed() {
        for power in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let blade = Blade::new(1, "", Category::Attack, 100.0, power);
            assert_eq!(blade.power, 0.0);
        }
        assert_eq!(Blade::new(1, "", Category::Attack, 100.0, 150.0).power, 150.0);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(blade_at(7, 0.0, 0.0).display_name(), "Blade #7");
        let named = Blade::new(2, "Dranzer", Category::Stamina, 10.0, 10.0);
        assert_eq!(named.display_name(), "Dranzer");
    }

    #[test]
    fn test_with_category_stats() {
        let attack = Blade::with_category_stats(1, "A", Category::Attack, 700.0, 150.0);
        assert_eq!(attack.stamina(), 500.0);
        assert_eq!(attack.max_stamina(), 500.0);
        assert_eq!(attack.power, 200.0);

        // Never spawns inactive
        let weak = Blade::with_category_stats(2, "W", Category::Attack, 100.0, 10.0);
        assert!(weak.is_active());
    }

    #[test]
    fn test_bounce_from_boundary() {
        let mut blade = blade_at(1, 290.0, 0.0);
        blade.vel = Vec2::new(3.0, 4.0);

        assert!(blade.bounce_from_boundary(Vec2::ZERO, 300.0, BLADE_RADIUS));
        assert!((blade.pos - Vec2::new(259.0, 0.0)).length() < 1e-4);
        // Sent back toward the center at the same speed
        assert!((blade.vel - Vec2::new(-5.0, 0.0)).length() < 1e-4);

        // Idempotent within a tick
        let (pos, vel) = (blade.pos, blade.vel);
        assert!(!blade.bounce_from_boundary(Vec2::ZERO, 300.0, BLADE_RADIUS));
        assert_eq!(blade.pos, pos);
        assert_eq!(blade.vel, vel);
    }

    #[test]
    fn test_bounce_leaves_inner_blades_alone() {
        let mut blade = blade_at(1, 100.0, 100.0);
        blade.vel = Vec2::new(1.0, 1.0);
        assert!(!blade.bounce_from_boundary(Vec2::ZERO, 300.0, BLADE_RADIUS));
        assert_eq!(blade.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_is_colliding_margin() {
        let a = blade_at(1, 0.0, 0.0);
        assert!(a.is_colliding(&blade_at(2, 87.0, 0.0), BLADE_RADIUS));
        assert!(!a.is_colliding(&blade_at(3, 88.5, 0.0), BLADE_RADIUS));
    }

    #[test]
    fn test_cooldown() {
        let mut blade = blade_at(1, 0.0, 0.0);
        assert!(!blade.on_cooldown(0.0, 200.0));
        blade.last_hit_ms = Some(1000.0);
        assert!(blade.on_cooldown(1150.0, 200.0));
        assert!(!blade.on_cooldown(1200.0, 200.0));
    }

    #[test]
    fn test_reset_for_battle() {
        let mut blade = blade_at(1, 0.0, 0.0);
        blade.drain(400.0);
        blade.reduced_orbit = true;
        blade.last_hit_ms = Some(50.0);

        let mut rng = Pcg32::seed_from_u64(42);
        blade.reset_for_battle(Vec2::new(10.0, 20.0), &mut rng);

        assert_eq!(blade.stamina(), blade.max_stamina());
        assert_eq!(blade.pos, Vec2::new(10.0, 20.0));
        assert!(blade.vel.x.abs() <= 2.0 && blade.vel.y.abs() <= 2.0);
        assert!(!blade.reduced_orbit);
        assert!(blade.last_hit_ms.is_none());
    }

    proptest! {
        #[test]
        fn prop_drain_never_increases(start in 0.0f32..5000.0, amount in 0.0f32..10000.0) {
            let mut blade = Blade::new(1, "", Category::Balance, start, 100.0);
            let before = blade.stamina();
            blade.drain(amount);
            prop_assert!(blade.stamina() <= before);
            prop_assert!(blade.stamina() >= 0.0);
        }

        #[test]
        fn prop_is_colliding_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
        ) {
            let a = blade_at(1, ax, ay);
            let b = blade_at(2, bx, by);
            prop_assert_eq!(a.is_colliding(&b, BLADE_RADIUS), b.is_colliding(&a, BLADE_RADIUS));
        }

        #[test]
        fn prop_bounce_contains(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            let mut blade = blade_at(1, x, y);
            blade.bounce_from_boundary(Vec2::ZERO, 300.0, BLADE_RADIUS);
            prop_assert!(blade.pos.length() <= 300.0 - BLADE_RADIUS + 1e-3);
        }
    }
}
