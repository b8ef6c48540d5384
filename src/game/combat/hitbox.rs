// Axis-aligned hit boxes anchored to an actor's position

use glam::Vec2;

/// An AABB described by its offset from the owner's anchor and its half extents
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hitbox {
    /// Offset of the box centre from the anchor point
    pub offset: Vec2,
    /// Half of the box width
    pub half_width: f32,
    /// Half of the box height
    pub half_height: f32,
}

impl Hitbox {
    /// Create a hit box; negative half extents are treated as zero
    pub fn new(offset_x: f32, offset_y: f32, half_width: f32, half_height: f32) -> Self {
        Self {
            offset: Vec2::new(offset_x, offset_y),
            half_width: half_width.max(0.0),
            half_height: half_height.max(0.0),
        }
    }

    /// A box centred on the anchor. Usable in constants, so extents must
    /// already be non-negative.
    pub const fn centered(half_width: f32, half_height: f32) -> Self {
        debug_assert!(half_width >= 0.0 && half_height >= 0.0);
        Self {
            offset: Vec2::ZERO,
            half_width,
            half_height,
        }
    }

    /// Return the same box moved to a new offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space centre of the box for a given anchor
    pub fn center(&self, anchor: Vec2) -> Vec2 {
        anchor + self.offset
    }
}

/// AABB overlap test. Touching edges count as overlapping.
pub fn hitboxes_intersect(a: &Hitbox, pos_a: Vec2, b: &Hitbox, pos_b: Vec2) -> bool {
    let d = a.center(pos_a) - b.center(pos_b);

    d.x.abs() <= a.half_width + b.half_width && d.y.abs() <= a.half_height + b.half_height
}

/// Penetration depth on both axes, or `None` unless the boxes overlap strictly
pub fn penetration(a: &Hitbox, pos_a: Vec2, b: &Hitbox, pos_b: Vec2) -> Option<Vec2> {
    let d = a.center(pos_a) - b.center(pos_b);
    let overlap_x = a.half_width + b.half_width - d.x.abs();
    let overlap_y = a.half_height + b.half_height - d.y.abs();

    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    Some(Vec2::new(overlap_x, overlap_y))
}
