//! OpenGL rendering layer.
//!
//! This module is only available when the `render` feature is enabled.
//! Every type here holds an `Rc<glow::Context>` and must stay on the thread
//! that owns the GL context.
//!
//! # Module overview
//!
//! - [`context`] -- Shared context wrapper with capability detection.
//! - [`handle`] -- Owning vertex array and vertex buffer wrappers.
//! - [`shader`] -- Shader loading, compilation, linking and uniforms.
//! - [`sources`] -- Built-in GLSL for batches and sprites.
//! - [`texture`] -- `Texture2D` and the tile-id `TextureStore`.
//! - [`draw`] -- Vertex layout setup, batch submission, camera upload.
//! - [`pipeline`] -- VAO/VBO pair driving one batch per frame.
//! - [`sprite`] -- Unit-quad sprite renderer.
//! - [`tiles`] -- Tile map drawing through the sprite renderer.

pub mod context;
pub mod draw;
pub mod handle;
pub mod pipeline;
pub mod shader;
pub mod sources;
pub mod sprite;
pub mod texture;
pub mod tiles;

/// Uniform location the camera projection is uploaded to. Every vertex
/// stage used with the camera must declare
/// `layout(location = 0) uniform mat4 projection;`.
pub const PROJECTION_UNIFORM_SLOT: u32 = 0;

// Re-export key types at the render module level for convenience.
pub use context::GpuContext;
pub use draw::setup_vertex_attributes;
pub use handle::{VertexArray, VertexBuffer};
pub use pipeline::BatchPipeline;
pub use shader::{format_shader_error, Shader, ShaderError, Uniform};
pub use sources::{
    BATCH_FRAGMENT_SHADER, BATCH_VERTEX_SHADER, SPRITE_FRAGMENT_SHADER, SPRITE_VERTEX_SHADER,
};
pub use sprite::{sprite_model, SpriteRenderer};
pub use texture::{Texture2D, TextureParams, TextureStore};
pub use tiles::draw_tile_map;
