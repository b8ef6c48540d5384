// Fixed-tick frame pacing
//
// The simulation only ever advances in whole 1/60 s ticks. Each rendered
// frame reports how much wall-clock time passed and gets back the number of
// ticks to run.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Simulation rate
pub const TICKS_PER_SECOND: u32 = 60;
const TICK_DURATION: Duration = Duration::from_micros(16_667);

/// Catch-up cap; a longer stall is skipped instead of replayed
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Frames averaged by `fps()`
const FPS_SAMPLES: usize = 60;

#[derive(Debug)]
pub struct GameLoop {
    last_frame: Instant,
    /// Wall-clock time owed to the simulation
    owed: Duration,
    paused: bool,

    samples: VecDeque<Duration>,
    sample_total: Duration,

    frames: u64,
    ticks: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            owed: Duration::ZERO,
            paused: false,
            samples: VecDeque::with_capacity(FPS_SAMPLES),
            sample_total: Duration::ZERO,
            frames: 0,
            ticks: 0,
        }
    }

    /// Measure the time since the previous frame and return the ticks it buys
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Account for `elapsed` wall-clock time and return the ticks to run
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.frames += 1;
        self.record_sample(elapsed);

        if self.paused {
            return 0;
        }

        self.owed += elapsed;
        let mut ticks = 0;
        while ticks < MAX_TICKS_PER_FRAME && self.owed >= TICK_DURATION {
            self.owed -= TICK_DURATION;
            ticks += 1;
        }
        if self.owed >= TICK_DURATION {
            log::trace!("Skipping {:?} of simulation backlog", self.owed);
            self.owed = Duration::ZERO;
        }

        self.ticks += u64::from(ticks);
        ticks
    }

    fn record_sample(&mut self, elapsed: Duration) {
        if self.samples.len() == FPS_SAMPLES {
            if let Some(oldest) = self.samples.pop_front() {
                self.sample_total -= oldest;
            }
        }
        self.samples.push_back(elapsed);
        self.sample_total += elapsed;
    }

    /// Average frame rate over the last few frames
    pub fn fps(&self) -> f32 {
        let total = self.sample_total.as_secs_f32();
        if total > 0.0 {
            self.samples.len() as f32 / total
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Ticks handed out since creation
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume without a burst of ticks for the time spent paused
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.owed = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
