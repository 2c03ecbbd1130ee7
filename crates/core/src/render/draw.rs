//! GL submission for the pure batch and camera types.
//!
//! [`Batch`] and [`Camera`] hold no GL state. These methods use whatever
//! vertex array, buffer and program the caller bound beforehand.

use glow::HasContext;

use crate::batch::Batch;
use crate::camera::Camera;
use crate::vertex::Vertex;

use super::PROJECTION_UNIFORM_SLOT;

/// Points attributes 0..=3 of the bound vertex array at the bound buffer,
/// using the [`Vertex`] layout.
#[allow(unsafe_code)]
pub fn setup_vertex_attributes(gl: &glow::Context) {
    for attr in Vertex::ATTRIBUTES {
        // SAFETY: offsets and stride come from the repr(C) Vertex layout.
        unsafe {
            gl.vertex_attrib_pointer_f32(
                attr.location,
                attr.components,
                glow::FLOAT,
                false,
                Vertex::STRIDE,
                attr.offset,
            );
            gl.enable_vertex_attrib_array(attr.location);
        }
    }
}

/// Vertex count as the `i32` a draw call takes, or `None` if it does not fit.
fn draw_count(len: usize) -> Option<i32> {
    i32::try_from(len).ok()
}

impl Batch {
    /// Uploads every vertex to the bound `ARRAY_BUFFER` and draws them as
    /// one triangle list.
    #[allow(unsafe_code)]
    pub fn draw_arrays(&self, gl: &glow::Context) {
        if self.is_empty() {
            log::trace!("empty batch, nothing to draw");
            return;
        }
        let Some(count) = draw_count(self.len()) else {
            log::warn!("batch of {} vertices exceeds a single draw, skipping", self.len());
            return;
        };
        let bytes: &[u8] = bytemuck::cast_slice(self.vertices());
        // SAFETY: the slice covers exactly len() vertices, and the draw
        // count matches what was uploaded.
        unsafe {
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, glow::STATIC_DRAW);
            gl.draw_arrays(glow::TRIANGLES, 0, count);
        }
    }
}

impl Camera {
    /// Updates the camera and uploads the projection to the fixed uniform
    /// slot of the current program.
    #[allow(unsafe_code)]
    pub fn update_and_load_camera(&mut self, gl: &glow::Context) {
        self.update_camera();
        let location = glow::NativeUniformLocation(PROJECTION_UNIFORM_SLOT);
        // SAFETY: uploads 16 floats to a location the active program declares.
        unsafe {
            gl.uniform_matrix_4_f32_slice(
                Some(&location),
                false,
                &self.projection().to_cols_array(),
            )
        }
    }
}
