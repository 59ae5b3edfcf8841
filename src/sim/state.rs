//! World state and core simulation types
//!
//! One `World` per session, owned by the tick driver. Nothing here is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started, waiting for the first start/jump
    Idle,
    /// Active gameplay
    Running,
    /// Crashed; frozen until restart
    Over,
}

/// What the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Ceiling,
    Floor,
    Pipe { id: u32 },
}

/// Side-channel notifications emitted by the engine for presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Idle -> Running
    Started,
    /// Over -> fresh Running world
    Restarted,
    /// Jump impulse applied this tick
    Jumped,
    PipeSpawned { id: u32 },
    Scored { score: u32 },
    /// Difficulty step; `at` is the timestamp the pulse is keyed off
    SpeedUp { multiplier: f32, at: f64 },
    Crashed { cause: CollisionKind },
}

/// A gapped obstacle pair scrolling left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Top of the passable gap
    pub gap_y: f32,
    /// Trailing edge has crossed the bird column (scored)
    pub passed: bool,
}

impl Pipe {
    /// Trailing (right) edge
    #[inline]
    pub fn trailing_edge(&self, pipe_width: f32) -> f32 {
        self.x + pipe_width
    }

    /// Solid region above the gap
    pub fn top_rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.x, 0.0, tuning.pipe_width, self.gap_y)
    }

    /// Solid region below the gap, down to the floor
    pub fn bottom_rect(&self, tuning: &Tuning) -> Rect {
        let top = self.gap_y + tuning.gap_height;
        Rect::new(
            self.x,
            top,
            tuning.pipe_width,
            (tuning.world_height - top).max(0.0),
        )
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    /// Seed this world's generator was created from (for replay)
    pub seed: u64,
    /// Gap placement source
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Top edge of the bird's box
    pub bird_y: f32,
    /// Positive is downward
    pub bird_velocity_y: f32,
    /// Spawn order == left-to-right order
    pub pipes: Vec<Pipe>,
    /// Ticks simulated while running; drives spawn cadence
    pub frame_count: u64,
    pub score: u32,
    pub speed_multiplier: f32,
    pub session_started_at: f64,
    pub last_speed_increase_at: f64,
    /// Next pipe ID
    next_id: u32,
}

impl World {
    /// Create an idle world after validating the tuning
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::fresh(tuning, seed))
    }

    /// Tuning is assumed validated
    pub(crate) fn fresh(tuning: Tuning, seed: u64) -> Self {
        Self {
            bird_y: tuning.bird_start_y,
            bird_velocity_y: 0.0,
            speed_multiplier: tuning.base_speed_multiplier,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            pipes: Vec::new(),
            frame_count: 0,
            score: 0,
            session_started_at: 0.0,
            last_speed_increase_at: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new pipe ID
    pub fn next_pipe_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The bird's bounding box
    pub fn bird_rect(&self) -> Rect {
        Rect::new(
            self.tuning.bird_x,
            self.bird_y,
            self.tuning.bird_size,
            self.tuning.bird_size,
        )
    }

    /// Pipe horizontal travel for one tick at the current multiplier
    pub fn pipe_step(&self) -> f32 {
        self.tuning.pipe_speed * self.speed_multiplier
    }

    /// First pipe whose trailing edge is still right of the bird column
    pub fn next_pipe(&self) -> Option<&Pipe> {
        let bird_x = self.tuning.bird_x;
        let width = self.tuning.pipe_width;
        self.pipes.iter().find(|p| p.trailing_edge(width) > bird_x)
    }
}
