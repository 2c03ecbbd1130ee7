//! Error types for the hexgl core.

use thiserror::Error;

#[cfg(feature = "render")]
use crate::render::shader::ShaderError;

/// Errors produced while creating or feeding GPU resources.
///
/// Shader failures only reach this type through the fallible shader
/// constructors; the default constructors treat them as fatal.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The driver refused to allocate a vertex array, buffer, texture or program.
    #[error("gpu allocation failed: {0}")]
    Allocation(String),

    /// A pixel buffer did not match `width * height * channels`.
    #[error(
        "pixel buffer size mismatch for {width}x{height} with {channels} channels: expected {expected} bytes, got {actual}"
    )]
    PixelBufferSize {
        width: u32,
        height: u32,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// An image file could not be opened or decoded.
    #[error("failed to decode image '{path}': {message}")]
    Decode { path: String, message: String },

    /// The GL context lacks a feature the renderer depends on.
    #[error("missing GL capability: {0}")]
    MissingCapability(String),

    /// A tile grid's cell count is not a whole number of rows.
    #[error("invalid tile map: {0}")]
    InvalidTileMap(String),

    /// A render configuration could not be parsed.
    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    /// A shader failed to load, compile or link.
    #[cfg(feature = "render")]
    #[error(transparent)]
    Shader(#[from] ShaderError),
}
