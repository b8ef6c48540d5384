// Math utilities and helper functions

use glam::Vec2;

/// Scale a vector so its largest component has magnitude 1.
///
/// Cheaper than a Euclidean normalise and keeps chasing enemies on a
/// "square" speed profile. Returns zero for the zero vector.
pub fn normalize_max_component(v: Vec2) -> Vec2 {
    let max_comp = v.x.abs().max(v.y.abs());
    if max_comp <= 0.0 {
        return Vec2::ZERO;
    }
    v / max_comp
}

/// Euclidean unit vector, or `fallback` when `v` has no length
pub fn unit_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let len_sq = v.length_squared();
    if len_sq == 0.0 {
        fallback
    } else {
        v / len_sq.sqrt()
    }
}
