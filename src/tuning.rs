//! Game balance constants
//!
//! Every knob the simulation reads lives here. Defaults reproduce the classic
//! feel; overrides can be supplied as JSON (LocalStorage in the browser).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning is rejected before a session starts
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("bird does not fit the world: column {bird_x} + size {bird_size} exceeds width {width}")]
    BirdOutsideWorld { bird_x: f32, bird_size: f32, width: f32 },

    #[error("bird start y {start_y} puts the bird outside [0, {height}]")]
    BirdStartOutsideWorld { start_y: f32, height: f32 },

    #[error("pipe gap {gap} must be taller than the bird ({bird_size})")]
    GapTooNarrow { gap: f32, bird_size: f32 },

    #[error("pipe gap {gap} plus margins 2 x {margin} exceeds world height {height}")]
    GapTooTall { gap: f32, margin: f32, height: f32 },

    #[error("max speed multiplier {max} is below the starting multiplier {base}")]
    SpeedCapBelowBase { max: f32, base: f32 },

    #[error("max speed multiplier {max} must be at least 1.0")]
    SpeedCapBelowOne { max: f32 },

    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Bird ===
    /// Fixed left edge of the bird's box
    pub bird_x: f32,
    pub bird_size: f32,
    pub bird_start_y: f32,
    /// Added to vertical velocity every tick (scaled by the speed multiplier)
    pub gravity: f32,
    /// Velocity set (not added) on a jump; negative is up
    pub jump_strength: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub gap_height: f32,
    pub gap_margin: f32,
    /// Horizontal pixels per tick at multiplier 1.0
    pub pipe_speed: f32,
    pub spawn_interval_frames: u64,

    // === Difficulty ramp ===
    pub speed_increase_interval_ms: f64,
    pub speed_increment: f32,
    pub base_speed_multiplier: f32,
    pub max_speed_multiplier: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            bird_x: BIRD_X,
            bird_size: BIRD_SIZE,
            bird_start_y: BIRD_START_Y,
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,

            pipe_width: PIPE_WIDTH,
            gap_height: PIPE_GAP,
            gap_margin: PIPE_GAP_MARGIN,
            pipe_speed: PIPE_SPEED,
            spawn_interval_frames: SPAWN_INTERVAL_FRAMES,

            speed_increase_interval_ms: SPEED_INCREASE_INTERVAL_MS,
            speed_increment: SPEED_INCREMENT,
            base_speed_multiplier: BASE_SPEED_MULTIPLIER,
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, TuningError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TuningError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), TuningError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { field, value })
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Lowest allowed top edge of a pipe gap
    pub fn min_gap_y(&self) -> f32 {
        self.gap_margin
    }

    /// Highest allowed top edge of a pipe gap
    pub fn max_gap_y(&self) -> f32 {
        self.world_height - self.gap_height - self.gap_margin
    }

    /// Reject configurations the simulation cannot honour
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("world_width", self.world_width as f64)?;
        positive("world_height", self.world_height as f64)?;
        non_negative("bird_x", self.bird_x as f64)?;
        positive("bird_size", self.bird_size as f64)?;
        finite("bird_start_y", self.bird_start_y as f64)?;
        non_negative("gravity", self.gravity as f64)?;
        finite("jump_strength", self.jump_strength as f64)?;
        positive("pipe_width", self.pipe_width as f64)?;
        positive("gap_height", self.gap_height as f64)?;
        non_negative("gap_margin", self.gap_margin as f64)?;
        positive("pipe_speed", self.pipe_speed as f64)?;
        positive("spawn_interval_frames", self.spawn_interval_frames as f64)?;
        positive("speed_increase_interval_ms", self.speed_increase_interval_ms)?;
        non_negative("speed_increment", self.speed_increment as f64)?;
        positive("base_speed_multiplier", self.base_speed_multiplier as f64)?;
        finite("max_speed_multiplier", self.max_speed_multiplier as f64)?;

        if self.bird_x + self.bird_size > self.world_width {
            return Err(TuningError::BirdOutsideWorld {
                bird_x: self.bird_x,
                bird_size: self.bird_size,
                width: self.world_width,
            });
        }
        if self.bird_start_y < 0.0 || self.bird_start_y + self.bird_size > self.world_height {
            return Err(TuningError::BirdStartOutsideWorld {
                start_y: self.bird_start_y,
                height: self.world_height,
            });
        }
        if self.gap_height <= self.bird_size {
            return Err(TuningError::GapTooNarrow {
                gap: self.gap_height,
                bird_size: self.bird_size,
            });
        }
        if self.min_gap_y() > self.max_gap_y() {
            return Err(TuningError::GapTooTall {
                gap: self.gap_height,
                margin: self.gap_margin,
                height: self.world_height,
            });
        }
        if self.max_speed_multiplier < self.base_speed_multiplier {
            return Err(TuningError::SpeedCapBelowBase {
                max: self.max_speed_multiplier,
                base: self.base_speed_multiplier,
            });
        }
        if self.max_speed_multiplier < 1.0 {
            return Err(TuningError::SpeedCapBelowOne {
                max: self.max_speed_multiplier,
            });
        }
        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_rush_tuning";

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
