//! Vector helpers for blade physics
//!
//! Pure functions over `Vec2`. None of them can produce NaN from finite
//! input: a zero-length direction degrades to `Vec2::ZERO`.

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    (p2 - p1).length()
}

/// Unit vector pointing from `p1` to `p2` (zero when the points coincide)
#[inline]
pub fn normalized_vector(p1: Vec2, p2: Vec2) -> Vec2 {
    (p2 - p1).normalize_or_zero()
}

/// Angle of the direction from `p1` to `p2`, in radians (-π, π]
#[inline]
pub fn angle_between(p1: Vec2, p2: Vec2) -> f32 {
    let delta = p2 - p1;
    delta.y.atan2(delta.x)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
/// `normal` must be unit length; it is not checked.
#[inline]
pub fn reflect_vector(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
