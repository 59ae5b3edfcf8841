//! Collision predicate for the bird against the screen bounds and pipes
//!
//! A pipe only matters while its horizontal span overlaps the bird's box; in
//! that window the bird must sit entirely inside the gap.

use super::geometry::Rect;
use super::state::{CollisionKind, Pipe, World};
use crate::tuning::Tuning;

/// Check the bird's box against the vertical bounds
pub fn bird_out_of_bounds(bird: &Rect, world_height: f32) -> Option<CollisionKind> {
    if bird.top() < 0.0 {
        Some(CollisionKind::Ceiling)
    } else if bird.bottom() > world_height {
        Some(CollisionKind::Floor)
    } else {
        None
    }
}

/// Check the bird's box against a single pipe pair
pub fn bird_pipe_collision(bird: &Rect, pipe: &Pipe, tuning: &Tuning) -> bool {
    let span = Rect::new(pipe.x, 0.0, tuning.pipe_width, tuning.world_height);
    if !bird.overlaps_x(&span) {
        return false;
    }
    !bird.within_y(pipe.gap_y, pipe.gap_y + tuning.gap_height)
}

/// Full terminal-collision check for the current world
pub fn check_collision(world: &World) -> Option<CollisionKind> {
    let bird = world.bird_rect();

    if let Some(kind) = bird_out_of_bounds(&bird, world.tuning.world_height) {
        return Some(kind);
    }

    world
        .pipes
        .iter()
        .find(|pipe| bird_pipe_collision(&bird, pipe, &world.tuning))
        .map(|pipe| CollisionKind::Pipe { id: pipe.id })
}

/// Boolean form of [`check_collision`]
pub fn collides(world: &World) -> bool {
    check_collision(world).is_some()
}
