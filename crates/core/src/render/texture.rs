//! 2D textures and a tile-id keyed texture store.
//!
//! [`TextureParams`] holds the formats and sampling parameters applied at the
//! next [`Texture2D::load`]. Loading validates the pixel buffer against the
//! image format, uploads, and leaves `TEXTURE_2D` unbound.

use std::collections::HashMap;
use std::rc::Rc;

use glow::HasContext;

use crate::error::RenderError;

/// Formats and sampling parameters for a texture upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    /// GL internal format (e.g. `glow::RGB`).
    pub internal_format: u32,
    /// GL format of the uploaded pixels (e.g. `glow::RGBA`).
    pub image_format: u32,
    pub wrap_s: u32,
    pub wrap_t: u32,
    pub filter_min: u32,
    pub filter_mag: u32,
}

impl Default for TextureParams {
    /// `RGB` formats, `REPEAT` wrapping and `LINEAR` filtering.
    fn default() -> Self {
        Self {
            internal_format: glow::RGB,
            image_format: glow::RGB,
            wrap_s: glow::REPEAT,
            wrap_t: glow::REPEAT,
            filter_min: glow::LINEAR,
            filter_mag: glow::LINEAR,
        }
    }
}

impl TextureParams {
    /// `RGBA` formats with the default sampling, for images with alpha.
    pub fn rgba() -> Self {
        Self {
            internal_format: glow::RGBA,
            image_format: glow::RGBA,
            ..Self::default()
        }
    }

    /// Bytes per pixel of the uploaded data.
    pub fn channels(&self) -> usize {
        channels_for_format(self.image_format)
    }

    #[cfg(feature = "png")]
    fn pixel_layout(&self) -> crate::decode::PixelLayout {
        match self.channels() {
            4 => crate::decode::PixelLayout::Rgba,
            _ => crate::decode::PixelLayout::Rgb,
        }
    }
}

/// Returns the number of 8-bit channels for a GL pixel format.
pub fn channels_for_format(format: u32) -> usize {
    match format {
        glow::RGBA | glow::BGRA => 4,
        glow::RGB | glow::BGR => 3,
        glow::RG => 2,
        _ => 1,
    }
}

/// Checks that `len` bytes cover a `width x height` image of `channels`.
pub fn check_pixel_buffer(
    width: u32,
    height: u32,
    channels: usize,
    len: usize,
) -> Result<(), RenderError> {
    let expected = width as usize * height as usize * channels;
    if expected == len {
        Ok(())
    } else {
        Err(RenderError::PixelBufferSize {
            width,
            height,
            channels,
            expected,
            actual: len,
        })
    }
}

/// An owned 2D texture.
pub struct Texture2D {
    gl: Rc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
    /// Applied on the next load.
    pub params: TextureParams,
}

impl Texture2D {
    /// Allocates an empty texture with default parameters.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Allocation` if the driver refuses.
    #[allow(unsafe_code)]
    pub fn new(gl: &Rc<glow::Context>) -> Result<Self, RenderError> {
        // SAFETY: creating a fresh texture object on a live context.
        let id = unsafe { gl.create_texture() }.map_err(RenderError::Allocation)?;
        Ok(Self {
            gl: Rc::clone(gl),
            id,
            width: 0,
            height: 0,
            params: TextureParams::default(),
        })
    }

    /// Allocates a texture with the given parameters.
    pub fn with_params(gl: &Rc<glow::Context>, params: TextureParams) -> Result<Self, RenderError> {
        let mut texture = Self::new(gl)?;
        texture.params = params;
        Ok(texture)
    }

    /// Decodes a PNG in the layout of `params.image_format` and uploads it.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Decode` if the file cannot be decoded.
    #[cfg(feature = "png")]
    pub fn load_png(&mut self, path: &std::path::Path) -> Result<(), RenderError> {
        let image = crate::decode::decode(path, self.params.pixel_layout())?;
        self.load(image.width, image.height, &image.pixels)
    }

    /// Uploads `pixels` and records the new size.
    ///
    /// The texture binding and `UNPACK_ALIGNMENT` are restored to their
    /// previous values before returning.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::PixelBufferSize` if `pixels` does not hold
    /// exactly `width * height` pixels of the configured image format.
    #[allow(unsafe_code)]
    pub fn load(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<(), RenderError> {
        check_pixel_buffer(width, height, self.params.channels(), pixels.len())?;

        let p = self.params;
        // SAFETY: the buffer length was checked against the upload size,
        // and the texture is unbound again before returning.
        unsafe {
            let previous_alignment = self.gl.get_parameter_i32(glow::UNPACK_ALIGNMENT);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                p.internal_format as i32,
                width as i32,
                height as i32,
                0,
                p.image_format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );

            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, p.wrap_s as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, p.wrap_t as i32);
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                p.filter_min as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                p.filter_mag as i32,
            );

            self.gl.bind_texture(glow::TEXTURE_2D, None);
            self.gl
                .pixel_store_i32(glow::UNPACK_ALIGNMENT, previous_alignment);
        }

        self.width = width;
        self.height = height;
        log::debug!("uploaded {width}x{height} texture");
        Ok(())
    }

    /// Binds the texture on the currently active unit.
    #[allow(unsafe_code)]
    pub fn bind(&self) {
        // SAFETY: self.id is live until drop.
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id)) }
    }

    /// Activates `TEXTURE0 + unit` and binds the texture there.
    #[allow(unsafe_code)]
    pub fn bind_unit(&self, unit: u32) {
        // SAFETY: selects a texture unit; an out-of-range unit is a GL
        // error, not undefined behavior.
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) };
        self.bind();
    }

    pub fn id(&self) -> glow::Texture {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture2D {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: the texture was created by this wrapper and is deleted once.
        unsafe { self.gl.delete_texture(self.id) }
    }
}

/// Textures keyed by tile id. Owns every texture it holds.
#[derive(Default)]
pub struct TextureStore {
    textures: HashMap<u32, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `texture` under `id`, returning the texture it replaces.
    pub fn insert(&mut self, id: u32, texture: Texture2D) -> Option<Texture2D> {
        self.textures.insert(id, texture)
    }

    pub fn get(&self, id: u32) -> Option<&Texture2D> {
        self.textures.get(&id)
    }

    pub fn remove(&mut self, id: u32) -> Option<Texture2D> {
        self.textures.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
