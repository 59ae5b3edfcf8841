//! Flappy Rush - A side-scrolling flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, scoring, collisions)
//! - `session`: Fixed-timestep tick driver between the display loop and `sim`
//! - `renderer`: WebGPU rendering pipeline
//! - `ui`: HUD text and the speed-up banner timer
//! - `tuning`: Data-driven game balance and its validation

pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate the default tuning was balanced for (one `advance` per tick)
    pub const SIM_HZ: f64 = 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / SIM_HZ;
    /// Maximum substeps per display frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest display-frame gap fed to the accumulator (tab switches, debugger stops)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Playfield dimensions
    pub const WORLD_WIDTH: f32 = 600.0;
    pub const WORLD_HEIGHT: f32 = 500.0;

    /// Bird defaults - fixed column, only moves vertically
    pub const BIRD_X: f32 = 80.0;
    pub const BIRD_SIZE: f32 = 30.0;
    pub const BIRD_START_Y: f32 = 250.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_GAP: f32 = 180.0;
    /// Minimum distance between the gap and the top/bottom edge
    pub const PIPE_GAP_MARGIN: f32 = 50.0;
    pub const PIPE_SPEED: f32 = 3.0;
    pub const SPAWN_INTERVAL_FRAMES: u64 = 90;

    /// Physics (pixels per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_STRENGTH: f32 = -9.0;

    /// Difficulty ramp
    pub const SPEED_INCREASE_INTERVAL_MS: f64 = 10_000.0;
    pub const SPEED_INCREMENT: f32 = 0.2;
    pub const BASE_SPEED_MULTIPLIER: f32 = 1.0;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.5;

    /// How long the "SPEED UP!" banner stays up after a pulse
    pub const SPEED_UP_BANNER_MS: f64 = 1000.0;
}
