#![deny(unsafe_code)]
//! Minimal 2D rendering layer over OpenGL.
//!
//! The always-available half is pure data and math: the [`Vertex`] layout,
//! [`ColorTex`], the per-frame [`Batch`] with quad and hexagon tessellation,
//! the pan/zoom [`Camera`], [`TileMap`] grids and [`RenderConfig`]. The
//! `render` feature adds the `glow`-backed GPU wrappers that upload and draw
//! them; the `png` feature (default) adds image decoding.

pub mod batch;
pub mod camera;
pub mod config;
pub mod error;
pub mod stopwatch;
pub mod tilemap;
pub mod vertex;

#[cfg(feature = "png")]
pub mod decode;

#[cfg(feature = "render")]
pub mod render;

pub use batch::{rad_for_hex, Batch};
pub use camera::{Camera, CameraKey, InputEvent};
pub use config::{CameraConfig, RenderConfig};
pub use error::RenderError;
pub use stopwatch::Stopwatch;
pub use tilemap::{Tile, TileCell, TileMap};
pub use vertex::{ColorTex, Vertex, VertexAttribute};
