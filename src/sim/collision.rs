//! Blade-vs-blade collision resolution
//!
//! The interesting part of the battle: a hit exchanges a shared power impulse,
//! applies per-category knockback and reflection, drains stamina, pulls the
//! pair apart and, near the arena center, ejects the weaker blade.

use glam::Vec2;

use super::arena::Arena;
use super::blade::Blade;
use super::events::HitReport;
use super::vector::{distance, normalized_vector, reflect_vector};
use crate::tuning::Tuning;

/// Shared impulse applied to `a`; `b` receives the exact negation
///
/// `normal` points from `a` to `b`, so the impulse pushes `a` away from `b`.
/// Magnitude is the pair's average power scaled by `scale`. Category mass is
/// applied by the caller.
#[inline]
pub fn pair_impulse(a: &Blade, b: &Blade, normal: Vec2, scale: f32) -> Vec2 {
    -normal * ((a.power + b.power) / 2.0) * scale
}

/// Both blades can take part in a hit at `now_ms`
pub fn eligible(a: &Blade, b: &Blade, now_ms: f64, cooldown_ms: f64) -> bool {
    a.is_active()
        && b.is_active()
        && !a.on_cooldown(now_ms, cooldown_ms)
        && !b.on_cooldown(now_ms, cooldown_ms)
}

/// Resolve a hit between `a` and `b` if they touch and neither is cooling down
///
/// Returns the hit report, or `None` when nothing happened.
pub fn resolve_pair(
    a: &mut Blade,
    b: &mut Blade,
    arena: &Arena,
    tuning: &Tuning,
    now_ms: f64,
) -> Option<HitReport> {
    if !eligible(a, b, now_ms, tuning.hit_cooldown_ms) || !a.is_colliding(b, tuning.blade_radius) {
        return None;
    }

    a.last_hit_ms = Some(now_ms);
    b.last_hit_ms = Some(now_ms);

    // Stacked blades have no direction; pick one so they still separate
    let mut normal = normalized_vector(a.pos, b.pos);
    if normal == Vec2::ZERO {
        normal = Vec2::X;
    }
    let effect_a = a.profile();
    let effect_b = b.profile();

    // Shared impulse, resisted by mass
    let impulse = pair_impulse(a, b, normal, tuning.power_impulse_scale);
    a.vel += impulse / effect_a.mass;
    b.vel -= impulse / effect_b.mass;

    // Per-blade knockback along the connecting line
    a.vel -= normal * tuning.knockback_strength * effect_a.knockback;
    b.vel += normal * tuning.knockback_strength * effect_b.knockback;

    // Reflect whatever is still heading into the opponent
    if effect_b.reflect_coefficient > 0.0 && a.vel.dot(normal) > 0.0 {
        a.vel = reflect_vector(a.vel, normal) * effect_b.reflect_coefficient;
    }
    if effect_a.reflect_coefficient > 0.0 && b.vel.dot(-normal) > 0.0 {
        b.vel = reflect_vector(b.vel, -normal) * effect_a.reflect_coefficient;
    }

    let drained_a = a.drain(tuning.base_hit_drain * effect_b.stamina_drain_multiplier);
    let drained_b = b.drain(tuning.base_hit_drain * effect_a.stamina_drain_multiplier);

    separate(a, b, normal, tuning);

    let midpoint = (a.pos + b.pos) * 0.5;
    let danger_zone = arena.in_danger_zone(midpoint);
    if danger_zone {
        eject(a, b, normal, tuning);
    } else if effect_a.knockback < effect_b.knockback {
        a.clockwise = !a.clockwise;
    } else if effect_b.knockback < effect_a.knockback {
        b.clockwise = !b.clockwise;
    }

    // Separation may have pushed a blade through the wall
    a.bounce_from_boundary(arena.center, arena.radius, tuning.blade_radius);
    b.bounce_from_boundary(arena.center, arena.radius, tuning.blade_radius);

    log::debug!(
        "{} ({}) hit {} ({}): drained {:.1} / {:.1}{}",
        a.display_name(),
        a.category.as_str(),
        b.display_name(),
        b.category.as_str(),
        drained_a,
        drained_b,
        if danger_zone { " (danger zone)" } else { "" }
    );

    Some(HitReport {
        a: a.id,
        b: b.id,
        drained_a,
        drained_b,
        danger_zone,
    })
}

/// Push the pair apart along `normal` until they no longer overlap
fn separate(a: &mut Blade, b: &mut Blade, normal: Vec2, tuning: &Tuning) {
    a.pos -= normal * tuning.separation_offset;
    b.pos += normal * tuning.separation_offset;

    let dist = distance(a.pos, b.pos);
    if dist < tuning.min_separation {
        let push = (tuning.min_separation - dist) / 2.0;
        a.pos -= normal * push;
        b.pos += normal * push;
    }
}

/// Danger-zone ejection: the blade with lower knockback is thrown out hard
/// and damped next tick; the other gets a small push. Exact ties throw both.
fn eject(a: &mut Blade, b: &mut Blade, normal: Vec2, tuning: &Tuning) {
    let force = tuning.eject_force * tuning.eject_damping;
    let knock_a = a.profile().knockback;
    let knock_b = b.profile().knockback;

    if knock_a < knock_b {
        a.vel = -normal * force;
        a.reduced_orbit = true;
        b.vel += normal * force * tuning.eject_compensation;
    } else if knock_b < knock_a {
        b.vel = normal * force;
        b.reduced_orbit = true;
        a.vel -= normal * force * tuning.eject_compensation;
    } else {
        let share = force * tuning.eject_tie_share;
        a.vel = -normal * share;
        b.vel = normal * share;
        a.reduced_orbit = true;
        b.reduced_orbit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Category;

    fn arena() -> Arena {
        Arena::new(Vec2::ZERO, 300.0).unwrap()
    }

    fn blade(id: u32, category: Category, x: f32, y: f32) -> Blade {
        let mut blade = Blade::new(id, "", category, 1000.0, 150.0);
        blade.pos = Vec2::new(x, y);
        blade
    }

    #[test]
    fn test_pair_impulse_is_equal_and_opposite() {
        let a = blade(1, Category::Attack, 100.0, 0.0);
        let b = blade(2, Category::Defense, 150.0, 30.0);
        let n = normalized_vector(a.pos, b.pos);

        let on_a = pair_impulse(&a, &b, n, 0.02);
        let on_b = pair_impulse(&b, &a, -n, 0.02);
        assert!((on_a + on_b).length() < 1e-6);
        // Pushes a away from b
        assert!(on_a.dot(n) < 0.0);
    }

    #[test]
    fn test_equal_blades_exchange_opposite_velocities() {
        let mut a = blade(1, Category::Balance, 100.0, 100.0);
        let mut b = blade(2, Category::Balance, 150.0, 100.0);

        let hit = resolve_pair(&mut a, &mut b, &arena(), &Tuning::default(), 0.0).unwrap();
        assert!(!hit.danger_zone);
        assert!((a.vel + b.vel).length() < 1e-4);
        assert!(a.vel.x < 0.0 && b.vel.x > 0.0);
        assert_eq!(hit.drained_a, hit.drained_b);
    }

    #[test]
    fn test_no_hit_when_apart() {
        let mut a = blade(1, Category::Balance, -150.0, 0.0);
        let mut b = blade(2, Category::Balance, 150.0, 0.0);
        assert!(resolve_pair(&mut a, &mut b, &arena(), &Tuning::default(), 0.0).is_none());
        assert!(a.last_hit_ms.is_none());
        assert_eq!(a.stamina(), 1000.0);
    }

    #[test]
    fn test_defense_drains_less_than_attack() {
        let mut attacker = blade(1, Category::Attack, 150.0, 0.0);
        let mut defender = blade(2, Category::Defense, 210.0, 0.0);

        let hit =
            resolve_pair(&mut attacker, &mut defender, &arena(), &Tuning::default(), 0.0).unwrap();
        assert!(hit.drained_b < hit.drained_a);
        assert!(1000.0 - defender.stamina() < 1000.0 - attacker.stamina());
    }

    #[test]
    fn test_cooldown_blocks_repeat_hits() {
        let tuning = Tuning::default();
        let mut a = blade(1, Category::Balance, 100.0, 0.0);
        let mut b = blade(2, Category::Balance, 150.0, 0.0);
        assert!(resolve_pair(&mut a, &mut b, &arena(), &tuning, 1000.0).is_some());

        // Force them back together inside the window
        a.pos = Vec2::new(100.0, 0.0);
        b.pos = Vec2::new(150.0, 0.0);
        let stamina = (a.stamina(), b.stamina());
        assert!(resolve_pair(&mut a, &mut b, &arena(), &tuning, 1199.0).is_none());
        assert_eq!((a.stamina(), b.stamina()), stamina);

        assert!(resolve_pair(&mut a, &mut b, &arena(), &tuning, 1200.0).is_some());
    }

    #[test]
    fn test_inactive_blade_never_collides() {
        let mut a = blade(1, Category::Balance, 100.0, 0.0);
        let mut b = blade(2, Category::Balance, 110.0, 0.0);
        b.drain(2000.0);
        assert!(resolve_pair(&mut a, &mut b, &arena(), &Tuning::default(), 0.0).is_none());
    }

    #[test]
    fn test_separation_reaches_minimum() {
        let tuning = Tuning::default();
        let mut a = blade(1, Category::Balance, 100.0, 100.0);
        let mut b = blade(2, Category::Balance, 100.0, 100.0);

        resolve_pair(&mut a, &mut b, &arena(), &tuning, 0.0).unwrap();
        assert!(distance(a.pos, b.pos) >= tuning.min_separation - 1e-3);
        assert!(a.vel.is_finite() && b.vel.is_finite());
    }

    #[test]
    fn test_danger_zone_ejects_lower_knockback() {
        let tuning = Tuning::default();
        let mut attacker = blade(1, Category::Attack, -20.0, 0.0);
        let mut defender = blade(2, Category::Defense, 20.0, 0.0);

        let hit = resolve_pair(&mut attacker, &mut defender, &arena(), &tuning, 0.0).unwrap();
        assert!(hit.danger_zone);
        assert!(defender.reduced_orbit);
        assert!(!attacker.reduced_orbit);

        let full = tuning.eject_force * tuning.eject_damping;
        assert!((defender.vel - Vec2::new(full, 0.0)).length() < 1e-3);
        assert!(attacker.vel.x < 0.0 && attacker.vel.length() < defender.vel.length());
    }

    #[test]
    fn test_danger_zone_tie_ejects_both() {
        let tuning = Tuning::default();
        let mut a = blade(1, Category::Balance, -20.0, 0.0);
        let mut b = blade(2, Category::Balance, 20.0, 0.0);

        resolve_pair(&mut a, &mut b, &arena(), &tuning, 0.0).unwrap();
        assert!(a.reduced_orbit && b.reduced_orbit);
        let share = tuning.eject_force * tuning.eject_damping * tuning.eject_tie_share;
        assert!((a.vel - Vec2::new(-share, 0.0)).length() < 1e-3);
        assert!((b.vel - Vec2::new(share, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_outside_zone_weaker_reverses_orbit() {
        let mut attacker = blade(1, Category::Attack, 150.0, 0.0);
        let mut defender = blade(2, Category::Defense, 210.0, 0.0);
        assert!(attacker.clockwise && defender.clockwise);

        resolve_pair(&mut attacker, &mut defender, &arena(), &Tuning::default(), 0.0).unwrap();
        assert!(attacker.clockwise);
        assert!(!defender.clockwise);
    }

    #[test]
    fn test_defense_reflects_incoming_attacker() {
        let mut attacker = blade(1, Category::Attack, 150.0, 0.0);
        let mut defender = blade(2, Category::Defense, 210.0, 0.0);
        // Charging straight at the defender, faster than the knockback can cancel
        attacker.vel = Vec2::new(50.0, 0.0);

        resolve_pair(&mut attacker, &mut defender, &arena(), &Tuning::default(), 0.0).unwrap();
        // Bounced back, scaled by the defender's reflect coefficient
        assert!(attacker.vel.x < 0.0);
        assert!(attacker.vel.length() < 50.0);
    }

    #[test]
    fn test_hit_keeps_blades_inside_arena() {
        let tuning = Tuning::default();
        let arena = arena();
        let mut a = blade(1, Category::Balance, 250.0, 0.0);
        let mut b = blade(2, Category::Balance, 258.0, 0.0);

        resolve_pair(&mut a, &mut b, &arena, &tuning, 0.0).unwrap();
        let limit = arena.max_blade_distance(tuning.blade_radius) + 1e-3;
        assert!(a.pos.length() <= limit);
        assert!(b.pos.length() <= limit);
    }
}
