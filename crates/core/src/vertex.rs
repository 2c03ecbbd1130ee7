//! Per-vertex data model for the batched triangle stream.
//!
//! Every vertex carries a position, a flat color, a texture coordinate and a
//! `use_texture` flag. The fragment stage uses the flag to choose between the
//! flat color and the sampled texel; it is always exactly `0.0` or `1.0`.
//!
//! ```text
//! Vertex (40 bytes)
//! ┌──────────────┬──────────────────┬─────────────┬─────────────┐
//! │ position     │ color            │ tex_coord   │ use_texture │
//! │ [f32; 3]     │ [f32; 4]         │ [f32; 2]    │ f32         │
//! │ offset 0     │ offset 12        │ offset 28   │ offset 36   │
//! │ location 0   │ location 1       │ location 2  │ location 3  │
//! └──────────────┴──────────────────┴─────────────┴─────────────┘
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

/// Either a flat color or a texture coordinate, chosen per push call.
///
/// A `Color` produces untextured vertices with a zero texture coordinate.
/// A `Tex` produces textured vertices whose color is opaque white.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorTex {
    Color(Vec4),
    Tex(Vec2),
}

impl ColorTex {
    /// A flat RGBA color.
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        ColorTex::Color(Vec4::new(r, g, b, a))
    }

    /// A texture coordinate.
    pub fn uv(s: f32, t: f32) -> Self {
        ColorTex::Tex(Vec2::new(s, t))
    }

    /// The color carried into the vertex (white for texture coordinates).
    pub fn color(&self) -> Vec4 {
        match self {
            ColorTex::Color(c) => *c,
            ColorTex::Tex(_) => Vec4::ONE,
        }
    }

    /// The texture coordinate carried into the vertex (zero for colors).
    pub fn tex(&self) -> Vec2 {
        match self {
            ColorTex::Color(_) => Vec2::ZERO,
            ColorTex::Tex(t) => *t,
        }
    }

    /// `1.0` when sampling a texture, `0.0` for a flat color.
    pub fn use_texture(&self) -> f32 {
        match self {
            ColorTex::Color(_) => 0.0,
            ColorTex::Tex(_) => 1.0,
        }
    }
}

impl From<Vec4> for ColorTex {
    fn from(color: Vec4) -> Self {
        ColorTex::Color(color)
    }
}

impl From<Vec2> for ColorTex {
    fn from(tex: Vec2) -> Self {
        ColorTex::Tex(tex)
    }
}

/// One entry of the shared vertex layout: shader location, component count
/// and byte offset inside [`Vertex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
    pub offset: i32,
}

/// A single vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub use_texture: f32,
}

impl Vertex {
    /// Size of one vertex in bytes, used as the attribute stride.
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    /// Attribute table matching the field layout of [`Vertex`].
    pub const ATTRIBUTES: [VertexAttribute; 4] = [
        VertexAttribute {
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 4,
            offset: 12,
        },
        VertexAttribute {
            location: 2,
            components: 2,
            offset: 28,
        },
        VertexAttribute {
            location: 3,
            components: 1,
            offset: 36,
        },
    ];

    /// Builds a vertex from a position and the role selected by `ct`.
    pub fn new(position: Vec3, ct: ColorTex) -> Self {
        Self {
            position: position.to_array(),
            color: ct.color().to_array(),
            tex_coord: ct.tex().to_array(),
            use_texture: ct.use_texture(),
        }
    }

    /// An opaque white, untextured vertex.
    pub fn plain(position: Vec3) -> Self {
        Self::from_parts(position, Vec4::ONE, Vec2::ZERO, false)
    }

    pub fn from_parts(position: Vec3, color: Vec4, tex_coord: Vec2, use_texture: bool) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            tex_coord: tex_coord.to_array(),
            use_texture: if use_texture { 1.0 } else { 0.0 },
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }

    pub fn tex_coord(&self) -> Vec2 {
        Vec2::from_array(self.tex_coord)
    }

    /// Whether the fragment stage samples the bound texture for this vertex.
    pub fn is_textured(&self) -> bool {
        self.use_texture != 0.0
    }
}
