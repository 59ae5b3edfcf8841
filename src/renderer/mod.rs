//! WebGPU rendering module
//!
//! Flat-colored triangle lists: the scene is rebuilt from a `FrameView` every
//! frame and uploaded as one vertex buffer.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
