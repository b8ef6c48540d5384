// Animation states and facing directions

use glam::Vec2;

/// The animation state an actor is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// Standing still, blinking
    #[default]
    Idle,
    /// Moving in the current direction
    Walk,
    /// Swinging an attack (one-shot)
    Attack,
    /// Reeling from a hit (one-shot)
    Hurt,
    /// Dying or dead (terminal)
    Death,
    /// Holding the blocking stance
    Block,
    /// Flourish after a blocked hit (timed)
    BlockSuccess,
}

impl AnimationState {
    /// States that ignore movement and attack input until they finish
    pub fn is_locking(&self) -> bool {
        matches!(self, Self::Attack | Self::Hurt | Self::Death)
    }

    /// States that movement-driven animation may not replace
    pub fn is_guarding(&self) -> bool {
        matches!(self, Self::Block | Self::BlockSuccess)
    }
}

/// Facing direction on the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Down, Self::Right, Self::Up, Self::Left];

    /// Sheet row used for this direction. Left shares the Right row.
    pub fn sheet_row(&self) -> usize {
        match self {
            Self::Down => 0,
            Self::Right | Self::Left => 1,
            Self::Up => 2,
        }
    }

    /// Whether the Right row has to be mirrored to draw this direction
    pub fn is_mirrored(&self) -> bool {
        matches!(self, Self::Left)
    }

    /// Unit step in world space (y grows downward)
    pub fn unit(&self) -> Vec2 {
        match self {
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// Direction of the dominant axis of `v`. Ties go to the horizontal axis.
    pub fn from_dominant_axis(v: Vec2) -> Self {
        if v.x.abs() >= v.y.abs() {
            if v.x < 0.0 {
                Self::Left
            } else {
                Self::Right
            }
        } else if v.y < 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}
