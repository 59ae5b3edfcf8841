//! HUD text and overlay state derived from frame snapshots
//!
//! Kept free of DOM calls so it can be tested natively; `main.rs` applies the
//! result to the page.

use crate::consts::SPEED_UP_BANNER_MS;
use crate::sim::{FrameView, GamePhase};

/// Presentation-side timer for the "SPEED UP!" banner
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedUpBanner {
    shown_at: Option<f64>,
}

impl SpeedUpBanner {
    /// Record a speed-up pulse
    pub fn notify(&mut self, at: f64) {
        self.shown_at = Some(at);
    }

    /// Feed a frame; picks up any pulse it carries
    pub fn observe(&mut self, view: &FrameView) {
        if let Some(at) = view.speed_up_at {
            self.notify(at);
        }
    }

    pub fn is_visible(&self, now: f64) -> bool {
        match self.shown_at {
            Some(at) => {
                let age = now - at;
                (0.0..SPEED_UP_BANNER_MS).contains(&age)
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.shown_at = None;
    }
}

/// Full-canvas overlay shown over the playfield
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// "Press SPACE or Click to Start"
    Start,
    None,
    GameOver { score: u32, max_speed: String },
}

/// Text content for the HUD elements
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: String,
    pub speed: String,
    pub speed_up: bool,
    pub overlay: Overlay,
}

/// Speed label, e.g. `1.2x`
pub fn format_speed(multiplier: f32) -> String {
    format!("{:.1}x", multiplier)
}

impl Hud {
    pub fn from_view(view: &FrameView, banner: &SpeedUpBanner, now: f64) -> Self {
        let overlay = match view.phase {
            GamePhase::Idle => Overlay::Start,
            GamePhase::Running => Overlay::None,
            GamePhase::Over => Overlay::GameOver {
                score: view.score,
                max_speed: format_speed(view.speed_multiplier),
            },
        };

        Self {
            score: view.score.to_string(),
            speed: format_speed(view.speed_multiplier),
            speed_up: view.phase == GamePhase::Running && banner.is_visible(now),
            overlay,
        }
    }
}
