//! One textured rectangle per draw call.

use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};
use glow::HasContext;

use super::handle::{VertexArray, VertexBuffer};
use super::shader::Shader;
use super::texture::Texture2D;
use crate::error::RenderError;

/// Two triangles covering `[0, 1]²`, each vertex `(x, y, s, t)`.
pub const UNIT_QUAD: [f32; 24] = [
    0.0, 1.0, 0.0, 1.0, //
    1.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 1.0, //
    1.0, 1.0, 1.0, 1.0, //
    1.0, 0.0, 1.0, 0.0, //
];

/// Model matrix placing the unit quad at `pos` with extent `size`.
pub fn sprite_model(pos: Vec2, size: Vec2) -> Mat4 {
    Mat4::from_translation(pos.extend(0.0)) * Mat4::from_scale(size.extend(1.0))
}

/// Draws textured rectangles with a borrowed sprite shader.
///
/// The shader must declare `uniform mat4 model` and `uniform vec3
/// spriteColor`, and read the quad from attribute 0.
pub struct SpriteRenderer<'a> {
    gl: Rc<glow::Context>,
    shader: &'a Shader,
    vao: VertexArray,
    // Kept alive for the VAO's attribute binding.
    _vbo: VertexBuffer,
}

impl<'a> SpriteRenderer<'a> {
    /// Uploads the unit quad once and records its layout.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Allocation` if the vertex array or buffer
    /// cannot be created.
    #[allow(unsafe_code)]
    pub fn new(gl: &Rc<glow::Context>, shader: &'a Shader) -> Result<Self, RenderError> {
        let vao = VertexArray::new(gl)?;
        let vbo = VertexBuffer::new(gl)?;

        // SAFETY: the VAO and VBO are bound; the attribute describes the
        // four-float layout of UNIT_QUAD.
        unsafe {
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&UNIT_QUAD),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 4, glow::FLOAT, false, 4 * 4, 0);
        }

        vbo.unbind();
        vao.unbind();

        Ok(Self {
            gl: Rc::clone(gl),
            shader,
            vao,
            _vbo: vbo,
        })
    }

    /// Draws `texture` stretched over the rectangle at `pos` of `size`,
    /// tinted by `color`.
    #[allow(unsafe_code)]
    pub fn draw_sprite(&self, texture: &Texture2D, pos: Vec2, size: Vec2, color: Vec3) {
        self.shader.set("model", sprite_model(pos, size));
        self.shader.set("spriteColor", color);

        texture.bind_unit(0);

        self.vao.bind();
        // SAFETY: the VAO holds six vertices uploaded in new().
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, 0, 6) };
        self.vao.unbind();
    }
}
