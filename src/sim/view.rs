//! Read-only frame snapshot handed to presentation

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{GameEvent, GamePhase, World};

/// Solid rectangles of one pipe pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub id: u32,
    pub top: Rect,
    pub bottom: Rect,
}

/// Everything the presentation layer draws for one display frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub world_width: f32,
    pub world_height: f32,
    pub bird: Rect,
    pub pipes: Vec<PipeView>,
    pub score: u32,
    pub speed_multiplier: f32,
    pub phase: GamePhase,
    /// Timestamp of a speed-up that happened during this frame
    pub speed_up_at: Option<f64>,
}

impl FrameView {
    /// Snapshot the world, folding this frame's events into the pulse
    pub fn capture(world: &World, events: &[GameEvent]) -> Self {
        let t = &world.tuning;
        let speed_up_at = events.iter().rev().find_map(|e| match e {
            GameEvent::SpeedUp { at, .. } => Some(*at),
            _ => None,
        });

        Self {
            world_width: t.world_width,
            world_height: t.world_height,
            bird: world.bird_rect(),
            pipes: world
                .pipes
                .iter()
                .map(|p| PipeView {
                    id: p.id,
                    top: p.top_rect(t),
                    bottom: p.bottom_rect(t),
                })
                .collect(),
            score: world.score,
            speed_multiplier: world.speed_multiplier,
            phase: world.phase,
            speed_up_at,
        }
    }
}
