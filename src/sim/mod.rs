//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `advance` call per simulation tick
//! - Seeded RNG only, owned by the world
//! - Wall-clock time enters only through the `now` argument
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{bird_out_of_bounds, bird_pipe_collision, check_collision, collides};
pub use geometry::Rect;
pub use state::{CollisionKind, GameEvent, GamePhase, Pipe, World};
pub use tick::{TickInput, advance, start, tick};
pub use view::{FrameView, PipeView};
