// Character animation system
//
// Every actor owns an `AnimationController` driven by a `ClipTable`. The
// table maps each state to a frame range inside one sprite-sheet row; the
// controller decides which state is allowed to play and advances frames one
// tick at a time.

use super::state::{AnimationState, Direction};

/// One animation clip inside a direction row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipDef {
    /// First frame, relative to the start of the direction row
    pub start: usize,
    /// Number of frames in the clip
    pub frames: usize,
    /// Ticks each frame is shown
    pub period: u32,
    /// Whether the clip wraps around when it reaches the end
    pub looping: bool,
}

impl ClipDef {
    pub const fn looping(start: usize, frames: usize, period: u32) -> Self {
        Self {
            start,
            frames,
            period,
            looping: true,
        }
    }

    pub const fn once(start: usize, frames: usize, period: u32) -> Self {
        Self {
            start,
            frames,
            period,
            looping: false,
        }
    }

    /// Ticks needed to play the clip once
    pub fn duration(&self) -> u32 {
        self.frames as u32 * self.period
    }
}

/// Frame layout of one actor's sprite sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ClipTable {
    /// Width of one direction row, in frames
    pub frames_per_direction: usize,
    pub idle: ClipDef,
    pub walk: ClipDef,
    /// Attack combo variants, played round-robin
    pub attacks: Vec<ClipDef>,
    pub hurt: ClipDef,
    pub death: ClipDef,
    /// Keep showing the last death frame instead of hiding the actor
    pub freeze_on_death: bool,
    pub block: ClipDef,
    pub block_success: ClipDef,
}

impl ClipTable {
    /// Player sheet: 32 frames per row with a three-hit combo
    pub fn player() -> Self {
        Self {
            frames_per_direction: 32,
            idle: ClipDef::looping(0, 2, 24),
            walk: ClipDef::looping(2, 6, 8),
            attacks: vec![
                ClipDef::once(8, 4, 4),
                ClipDef::once(12, 4, 4),
                ClipDef::once(16, 4, 4),
            ],
            hurt: ClipDef::once(20, 4, 6),
            death: ClipDef::once(24, 4, 8),
            freeze_on_death: true,
            block: ClipDef::looping(28, 3, 10),
            block_success: ClipDef::once(31, 1, 10),
        }
    }

    /// Enemy sheet: 28 frames per row, a single long attack, no block frames
    pub fn enemy() -> Self {
        Self {
            frames_per_direction: 28,
            idle: ClipDef::looping(0, 2, 24),
            walk: ClipDef::looping(4, 6, 6),
            attacks: vec![ClipDef::once(10, 10, 4)],
            hurt: ClipDef::once(20, 4, 6),
            death: ClipDef::once(24, 4, 8),
            freeze_on_death: false,
            block: ClipDef::looping(0, 2, 24),
            block_success: ClipDef::once(0, 1, 10),
        }
    }

    fn attack(&self, index: usize) -> ClipDef {
        self.attacks
            .get(index)
            .or_else(|| self.attacks.first())
            .copied()
            .unwrap_or(self.idle)
    }
}

impl Default for ClipTable {
    fn default() -> Self {
        Self::player()
    }
}

/// What a renderer needs to draw the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Absolute frame index in the sprite sheet
    pub index: usize,
    pub flip_horizontal: bool,
}

/// Per-actor animation state machine
#[derive(Debug, Clone)]
pub struct AnimationController {
    clips: ClipTable,
    state: AnimationState,
    direction: Direction,
    /// Current frame within the active clip
    sub_frame: usize,
    /// Ticks spent on the current frame
    frame_timer: u32,
    /// Combo variant being played while attacking
    current_attack: usize,
    /// Combo variant the next attack trigger plays
    attack_index: usize,
    /// One-shot clip has reached its end (only kept for Death)
    finished: bool,
    visible: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(ClipTable::default())
    }
}

impl AnimationController {
    pub fn new(clips: ClipTable) -> Self {
        Self {
            clips,
            state: AnimationState::Idle,
            direction: Direction::Down,
            sub_frame: 0,
            frame_timer: 0,
            current_attack: 0,
            attack_index: 0,
            finished: false,
            visible: true,
        }
    }

    fn enter(&mut self, state: AnimationState) {
        self.state = state;
        self.sub_frame = 0;
        self.frame_timer = 0;
        self.finished = false;
    }

    fn current_clip(&self) -> ClipDef {
        match self.state {
            AnimationState::Idle => self.clips.idle,
            AnimationState::Walk => self.clips.walk,
            AnimationState::Attack => self.clips.attack(self.current_attack),
            AnimationState::Hurt => self.clips.hurt,
            AnimationState::Death => self.clips.death,
            AnimationState::Block => self.clips.block,
            AnimationState::BlockSuccess => self.clips.block_success,
        }
    }

    /// Switch to the idle loop. Already idling keeps the blink phase.
    pub fn play_idle(&mut self) {
        if self.is_dead() || self.state == AnimationState::Idle {
            return;
        }
        self.enter(AnimationState::Idle);
    }

    /// Walk toward `direction`. Ignored while locked or guarding.
    pub fn play_walk(&mut self, direction: Direction) {
        if self.is_locked() || self.is_guarding() {
            return;
        }
        if self.state == AnimationState::Walk && self.direction == direction {
            return;
        }
        self.direction = direction;
        self.enter(AnimationState::Walk);
    }

    /// Start the next attack variant of the combo
    pub fn play_attack(&mut self) {
        if self.is_dead() {
            return;
        }
        self.current_attack = self.attack_index;
        self.attack_index = (self.attack_index + 1) % self.clips.attacks.len().max(1);
        self.enter(AnimationState::Attack);
    }

    pub fn play_hurt(&mut self) {
        if self.is_dead() {
            return;
        }
        self.enter(AnimationState::Hurt);
    }

    pub fn play_death(&mut self) {
        if self.is_dead() {
            return;
        }
        log::trace!("animation: entering death");
        self.enter(AnimationState::Death);
    }

    pub fn play_block(&mut self) {
        if self.is_dead() || self.state == AnimationState::Block {
            return;
        }
        self.enter(AnimationState::Block);
    }

    /// Restart the block flourish
    pub fn play_block_success(&mut self) {
        if self.is_dead() {
            return;
        }
        self.enter(AnimationState::BlockSuccess);
    }

    /// Change the facing. A walk in progress restarts for the new row; the
    /// idle blink is left alone.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        if self.state == AnimationState::Walk {
            self.sub_frame = 0;
            self.frame_timer = 0;
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        if self.finished {
            return;
        }

        let clip = self.current_clip();
        self.frame_timer += 1;
        if self.frame_timer < clip.period.max(1) {
            return;
        }
        self.frame_timer = 0;

        if self.sub_frame + 1 < clip.frames {
            self.sub_frame += 1;
        } else if clip.looping {
            self.sub_frame = 0;
        } else {
            self.on_clip_complete();
        }
    }

    fn on_clip_complete(&mut self) {
        match self.state {
            AnimationState::Attack | AnimationState::Hurt | AnimationState::BlockSuccess => {
                self.enter(AnimationState::Idle);
            }
            AnimationState::Death => {
                self.finished = true;
                if !self.clips.freeze_on_death {
                    self.visible = false;
                }
            }
            // Looping clips never complete
            AnimationState::Idle | AnimationState::Walk | AnimationState::Block => {}
        }
    }

    /// Frame to draw this tick
    pub fn frame(&self) -> AnimationFrame {
        let clip = self.current_clip();
        let sub_frame = self.sub_frame.min(clip.frames.saturating_sub(1));

        AnimationFrame {
            index: self.direction.sheet_row() * self.clips.frames_per_direction
                + clip.start
                + sub_frame,
            flip_horizontal: self.direction.is_mirrored(),
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Attack, Hurt or Death is playing
    pub fn is_locked(&self) -> bool {
        self.state.is_locking()
    }

    /// Block or BlockSuccess is playing
    pub fn is_guarding(&self) -> bool {
        self.state.is_guarding()
    }

    pub fn is_attacking(&self) -> bool {
        self.state == AnimationState::Attack
    }

    pub fn is_dead(&self) -> bool {
        self.state == AnimationState::Death
    }

    /// False once a non-freezing death clip has finished
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Combo variant the next `play_attack` will use
    pub fn attack_index(&self) -> usize {
        self.attack_index
    }

    /// Frame within the active clip
    pub fn sub_frame(&self) -> usize {
        self.sub_frame
    }
}
