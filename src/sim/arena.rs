//! Circular arena geometry
//!
//! One arena per battle: an outer wall and a small danger circle at the
//! center where collisions eject the weaker blade.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DANGER_ZONE_FACTOR;
use crate::error::{BattleError, Result};

/// Immutable arena shape for one battle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Arena center in caller coordinates
    pub center: Vec2,
    /// Outer wall radius
    pub radius: f32,
    /// Danger circle radius (always `radius * DANGER_ZONE_FACTOR`)
    pub inner_radius: f32,
}

impl Arena {
    /// Build an arena, rejecting non-positive or non-finite geometry
    pub fn new(center: Vec2, radius: f32) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 || !center.is_finite() {
            return Err(BattleError::InvalidArena { radius });
        }
        Ok(Self {
            center,
            radius,
            inner_radius: radius * DANGER_ZONE_FACTOR,
        })
    }

    /// Arena inscribed in a bounding box (the usual way a caller derives it)
    pub fn from_bounds(left: f32, top: f32, width: f32, height: f32) -> Result<Self> {
        let center = Vec2::new(left + width / 2.0, top + height / 2.0);
        Self::new(center, width / 2.0)
    }

    /// Distance of a point from the arena center
    #[inline]
    pub fn distance_from_center(&self, point: Vec2) -> f32 {
        (point - self.center).length()
    }

    /// True if the point lies strictly inside the danger circle
    #[inline]
    pub fn in_danger_zone(&self, point: Vec2) -> bool {
        self.distance_from_center(point) < self.inner_radius
    }

    /// Furthest a blade center may sit from the arena center
    #[inline]
    pub fn max_blade_distance(&self, blade_radius: f32) -> f32 {
        self.radius - blade_radius
    }
}
