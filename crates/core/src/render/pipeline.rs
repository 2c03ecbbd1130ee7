//! The per-frame batch draw sequence.
//!
//! A [`BatchPipeline`] owns the vertex array and buffer that a [`Batch`]
//! streams into, with the [`Vertex`](crate::vertex::Vertex) attribute layout
//! recorded once. Each frame the caller clears and refills a batch, then
//! calls [`BatchPipeline::flush`].

use std::rc::Rc;

use super::draw::setup_vertex_attributes;
use super::handle::{VertexArray, VertexBuffer};
use super::shader::Shader;
use crate::batch::Batch;
use crate::camera::Camera;
use crate::error::RenderError;

pub struct BatchPipeline<'a> {
    gl: Rc<glow::Context>,
    shader: &'a Shader,
    vao: VertexArray,
    vbo: VertexBuffer,
}

impl<'a> BatchPipeline<'a> {
    /// Creates the vertex array and buffer and records the attribute layout.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Allocation` if either object cannot be created.
    pub fn new(gl: &Rc<glow::Context>, shader: &'a Shader) -> Result<Self, RenderError> {
        let vao = VertexArray::new(gl)?;
        let vbo = VertexBuffer::new(gl)?;
        setup_vertex_attributes(gl);
        vao.unbind();
        log::debug!("batch pipeline ready");
        Ok(Self {
            gl: Rc::clone(gl),
            shader,
            vao,
            vbo,
        })
    }

    /// Updates the camera, then uploads and draws the whole batch.
    ///
    /// The texture sampled by textured vertices must already be bound.
    pub fn flush(&self, batch: &Batch, camera: &mut Camera) {
        self.shader.use_program();
        self.vao.bind();
        self.vbo.bind();
        camera.update_and_load_camera(&self.gl);
        batch.draw_arrays(&self.gl);
        self.vao.unbind();
    }

    pub fn shader(&self) -> &Shader {
        self.shader
    }
}
