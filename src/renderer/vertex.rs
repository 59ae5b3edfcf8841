//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Playfield vertex: world-space position until projected, then NDC
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `vs_main`'s inputs
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.92, 1.0]; // #87CEEB
    pub const PIPE: [f32; 4] = [0.13, 0.55, 0.13, 1.0]; // #228B22
    pub const PIPE_LIP: [f32; 4] = [0.10, 0.42, 0.10, 1.0];
    pub const BIRD: [f32; 4] = [1.0, 0.84, 0.0, 1.0]; // #FFD700
    pub const BIRD_EYE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [1.0, 0.39, 0.28, 1.0]; // #FF6347
    /// Letterbox bars outside the playfield
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
