//! Demo-mode pilot
//!
//! Flaps whenever the bird would sink below a safety line inside the next gap.
//! Deterministic: reads only the world, never the generator.

use super::state::{GamePhase, World};

/// Clearance kept between the bird's bottom edge and the gap's bottom edge
const SAFETY_MARGIN: f32 = 15.0;

/// Highest top-edge the bird may reach next tick before the pilot flaps
pub fn target_top(world: &World) -> f32 {
    let t = &world.tuning;
    match world.next_pipe() {
        Some(pipe) => pipe.gap_y + t.gap_height - t.bird_size - SAFETY_MARGIN,
        None => (t.world_height - t.bird_size) * 0.5,
    }
}

/// Should the bird jump on this tick?
pub fn wants_jump(world: &World) -> bool {
    if world.phase != GamePhase::Running {
        return false;
    }

    let t = &world.tuning;
    let next_velocity = world.bird_velocity_y + t.gravity * world.speed_multiplier;
    let next_y = world.bird_y + next_velocity;

    // A flap right under the ceiling would just bounce us off it
    if world.bird_y + t.jump_strength < 0.0 {
        return false;
    }

    next_y > target_top(world)
}
