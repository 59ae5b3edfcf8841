//! Frame snapshot to vertex list

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{FrameView, Rect};

/// Extra width of the pipe lip on each side
const LIP_OVERHANG: f32 = 4.0;
const LIP_HEIGHT: f32 = 16.0;
const BIRD_SEGMENTS: u32 = 24;

/// Build the whole playfield in world coordinates, back to front
pub fn build_scene(view: &FrameView) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6 + view.pipes.len() * 24 + 160);

    vertices.extend(shapes::rect(
        &Rect::new(0.0, 0.0, view.world_width, view.world_height),
        colors::SKY,
    ));

    for pipe in &view.pipes {
        vertices.extend(shapes::rect(&pipe.top, colors::PIPE));
        vertices.extend(shapes::rect(&pipe.bottom, colors::PIPE));

        // Lips at the mouth of each half
        let lip_w = pipe.top.size.x + LIP_OVERHANG * 2.0;
        let lip_x = pipe.top.left() - LIP_OVERHANG;
        if pipe.top.size.y > LIP_HEIGHT {
            let lip = Rect::new(lip_x, pipe.top.bottom() - LIP_HEIGHT, lip_w, LIP_HEIGHT);
            vertices.extend(shapes::rect(&lip, colors::PIPE_LIP));
        }
        if pipe.bottom.size.y > LIP_HEIGHT {
            let lip = Rect::new(lip_x, pipe.bottom.top(), lip_w, LIP_HEIGHT);
            vertices.extend(shapes::rect(&lip, colors::PIPE_LIP));
        }
    }

    vertices.extend(bird(&view.bird));
    vertices
}

/// Round body, eye and beak
fn bird(body: &Rect) -> Vec<Vertex> {
    let center = body.center();
    let radius = body.size.x * 0.5;

    let mut vertices = shapes::circle(center, radius, colors::BIRD, BIRD_SEGMENTS);
    vertices.extend(shapes::circle(
        center + Vec2::new(8.0, -5.0),
        3.0,
        colors::BIRD_EYE,
        8,
    ));

    let tip = body.right() + 10.0;
    vertices.extend(shapes::triangle(
        Vec2::new(body.right(), center.y),
        Vec2::new(tip, center.y - 5.0),
        Vec2::new(tip, center.y + 5.0),
        colors::BIRD_BEAK,
    ));
    vertices
}
