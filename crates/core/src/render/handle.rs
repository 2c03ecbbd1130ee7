//! Owning wrappers for vertex arrays and vertex buffers.
//!
//! Each wrapper allocates its GL object on construction, binds it, and
//! deletes it on drop. They are deliberately not `Clone`: the object's
//! identity is the wrapper.

use std::rc::Rc;

use glow::HasContext;

use crate::error::RenderError;

/// An owned vertex array object.
pub struct VertexArray {
    gl: Rc<glow::Context>,
    id: glow::VertexArray,
}

impl VertexArray {
    /// Allocates a vertex array and binds it.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Allocation` if the driver refuses.
    #[allow(unsafe_code)]
    pub fn new(gl: &Rc<glow::Context>) -> Result<Self, RenderError> {
        // SAFETY: creating and binding a fresh object on a live context.
        let id = unsafe { gl.create_vertex_array() }.map_err(RenderError::Allocation)?;
        let vao = Self {
            gl: Rc::clone(gl),
            id,
        };
        vao.bind();
        Ok(vao)
    }

    #[allow(unsafe_code)]
    pub fn bind(&self) {
        // SAFETY: self.id is live until drop.
        unsafe { self.gl.bind_vertex_array(Some(self.id)) }
    }

    #[allow(unsafe_code)]
    pub fn unbind(&self) {
        // SAFETY: binding the zero object is always valid.
        unsafe { self.gl.bind_vertex_array(None) }
    }

    pub fn id(&self) -> glow::VertexArray {
        self.id
    }
}

impl Drop for VertexArray {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: self.id was created by this wrapper and is deleted once.
        unsafe { self.gl.delete_vertex_array(self.id) }
    }
}

/// An owned `ARRAY_BUFFER` object.
pub struct VertexBuffer {
    gl: Rc<glow::Context>,
    id: glow::Buffer,
}

impl VertexBuffer {
    /// Allocates a buffer and binds it to `ARRAY_BUFFER`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Allocation` if the driver refuses.
    #[allow(unsafe_code)]
    pub fn new(gl: &Rc<glow::Context>) -> Result<Self, RenderError> {
        // SAFETY: creating and binding a fresh object on a live context.
        let id = unsafe { gl.create_buffer() }.map_err(RenderError::Allocation)?;
        let vbo = Self {
            gl: Rc::clone(gl),
            id,
        };
        vbo.bind();
        Ok(vbo)
    }

    #[allow(unsafe_code)]
    pub fn bind(&self) {
        // SAFETY: self.id is live until drop.
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.id)) }
    }

    #[allow(unsafe_code)]
    pub fn unbind(&self) {
        // SAFETY: binding the zero object is always valid.
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, None) }
    }

    pub fn id(&self) -> glow::Buffer {
        self.id
    }
}

impl Drop for VertexBuffer {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: self.id was created by this wrapper and is deleted once.
        unsafe { self.gl.delete_buffer(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_expose_bind_and_unbind() {
        fn _assert_api(vao: &VertexArray, vbo: &VertexBuffer) {
            vao.bind();
            vbo.bind();
            let _: glow::VertexArray = vao.id();
            let _: glow::Buffer = vbo.id();
            vbo.unbind();
            vao.unbind();
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_binds_the_allocated_object() {
        // Would test: after VertexArray::new(gl), GL_VERTEX_ARRAY_BINDING
        // equals vao.id().
    }

    #[test]
    #[ignore = "requires GL context"]
    fn drop_deletes_the_object() {
        // Would test: gl.is_buffer(id) is false once the VertexBuffer drops.
    }
}
