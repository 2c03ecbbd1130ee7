//! GPU context wrapper with capability detection.
//!
//! `GpuContext` shares a `glow::Context` with every resource created from
//! it. The camera uploads its projection to a fixed uniform location, which
//! needs explicit uniform locations (GL 4.3, or
//! `GL_ARB_explicit_uniform_location`).

use std::rc::Rc;

use glam::Vec4;
use glow::HasContext;

use crate::error::RenderError;

const EXPLICIT_UNIFORM_LOCATION_EXT: &str = "GL_ARB_explicit_uniform_location";

/// Whether a desktop GL version supports `layout(location = N)` on uniforms
/// without an extension.
pub fn has_core_explicit_uniform_location(major: u32, minor: u32, is_embedded: bool) -> bool {
    if is_embedded {
        // GLSL ES 3.10 added explicit uniform locations.
        (major, minor) >= (3, 1)
    } else {
        (major, minor) >= (4, 3)
    }
}

/// Wraps the shared `glow::Context` used by every wrapper in this module.
///
/// Created once per window, on the thread that owns the GL context.
pub struct GpuContext {
    gl: Rc<glow::Context>,
}

impl GpuContext {
    /// Wraps `gl` and checks that explicit uniform locations are available.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::MissingCapability` if neither the context
    /// version nor its extensions provide explicit uniform locations.
    pub fn new(gl: glow::Context) -> Result<Self, RenderError> {
        let version = gl.version();
        let supported = has_core_explicit_uniform_location(
            version.major,
            version.minor,
            version.is_embedded,
        ) || gl
            .supported_extensions()
            .contains(EXPLICIT_UNIFORM_LOCATION_EXT);

        if !supported {
            return Err(RenderError::MissingCapability(format!(
                "explicit uniform locations (GL {}.{} without {EXPLICIT_UNIFORM_LOCATION_EXT})",
                version.major, version.minor
            )));
        }

        log::info!(
            "GL context {}.{}{} ({})",
            version.major,
            version.minor,
            if version.is_embedded { " ES" } else { "" },
            version.vendor_info
        );

        Ok(Self { gl: Rc::new(gl) })
    }

    /// The shared context handed to resource constructors.
    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    #[allow(unsafe_code)]
    pub fn set_viewport(&self, width: u32, height: u32) {
        // SAFETY: plain state setter on a live context.
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) }
    }

    /// Enables `SRC_ALPHA, ONE_MINUS_SRC_ALPHA` blending.
    #[allow(unsafe_code)]
    pub fn enable_alpha_blending(&self) {
        // SAFETY: plain state setters with valid enum arguments.
        unsafe {
            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
    }

    /// Clears the color buffer; called at the start of each frame.
    #[allow(unsafe_code)]
    pub fn clear(&self, color: Vec4) {
        // SAFETY: clears the bound framebuffer's color attachment.
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}
