//! Per-frame vertex accumulation.
//!
//! A [`Batch`] collects triangles from higher-level push calls into one
//! ordered vertex list. Consecutive triples form triangles; there is no index
//! buffer. The list is uploaded and drawn in a single call (see
//! `Batch::draw_arrays` under the `render` feature) and cleared before the
//! next frame.
//!
//! Hexagons are tessellated as a six-triangle fan around their center. Each
//! rim vertex bumps a running RGB offset, which gives the hex a visible
//! radial gradient.

use glam::{Vec2, Vec3, Vec4};

use crate::config::RenderConfig;
use crate::vertex::{ColorTex, Vertex};

/// Angle in radians of the `i`-th hex boundary: `60 * i + 30` degrees.
///
/// `rad_for_hex(0)` is 30°, so the first boundary sits above the +x axis
/// and the hexagon is drawn flat-top.
pub fn rad_for_hex(i: i32) -> f32 {
    ((60 * i + 30) as f32).to_radians()
}

/// An append-only vertex list for one frame.
#[derive(Debug, Clone)]
pub struct Batch {
    vertices: Vec<Vertex>,
    hex_gradient_step: f32,
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}

impl Batch {
    pub fn new() -> Self {
        Self::with_config(&RenderConfig::default())
    }

    pub fn with_config(config: &RenderConfig) -> Self {
        Self {
            vertices: Vec::new(),
            hex_gradient_step: config.hex_gradient_step,
        }
    }

    /// Drops all accumulated vertices, keeping the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn push_back(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of whole triangles in the batch.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Appends one triangle in the given winding order.
    pub fn push_triangle(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, z: f32, ct: ColorTex) {
        for p in [p1, p2, p3] {
            self.push_back(Vertex::new(p.extend(z), ct));
        }
    }

    /// Appends a quad as the fan `(p1, p2, p3)`, `(p1, p3, p4)`.
    ///
    /// The corners must be given in a consistent winding or the two
    /// triangles overlap instead of tiling the quad.
    pub fn push_quad(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2, z: f32, ct: ColorTex) {
        self.push_triangle(p1, p2, p3, z, ct);
        self.push_triangle(p1, p3, p4, z, ct);
    }

    /// Appends an axis-aligned rectangle centered at `center`.
    pub fn push_quad_centered(
        &mut self,
        center: Vec2,
        width: f32,
        height: f32,
        z: f32,
        ct: ColorTex,
    ) {
        let half = Vec2::new(width / 2.0, height / 2.0);
        self.push_quad(
            Vec2::new(center.x - half.x, center.y - half.y),
            Vec2::new(center.x + half.x, center.y - half.y),
            Vec2::new(center.x + half.x, center.y + half.y),
            Vec2::new(center.x - half.x, center.y + half.y),
            z,
            ct,
        );
    }

    /// Appends an axis-aligned rectangle anchored at its bottom-left corner.
    pub fn push_quad_bot_left(
        &mut self,
        bot_left: Vec2,
        width: f32,
        height: f32,
        z: f32,
        ct: ColorTex,
    ) {
        self.push_quad(
            bot_left,
            Vec2::new(bot_left.x + width, bot_left.y),
            Vec2::new(bot_left.x + width, bot_left.y + height),
            Vec2::new(bot_left.x, bot_left.y + height),
            z,
            ct,
        );
    }

    /// Appends a centered rectangle whose corners map to the full `[0, 1]²`
    /// texture, bottom-left at `(0, 0)`.
    pub fn push_textured_quad(&mut self, center: Vec2, width: f32, height: f32, z: f32) {
        let half = Vec2::new(width / 2.0, height / 2.0);
        let corners = [
            (center - half, Vec2::new(0.0, 0.0)),
            (center + Vec2::new(half.x, -half.y), Vec2::new(1.0, 0.0)),
            (center + half, Vec2::new(1.0, 1.0)),
            (center + Vec2::new(-half.x, half.y), Vec2::new(0.0, 1.0)),
        ];
        for idx in [0, 1, 2, 0, 2, 3] {
            let (p, uv) = corners[idx];
            self.push_back(Vertex::new(p.extend(z), ColorTex::Tex(uv)));
        }
    }

    /// Opaque hexagon at `z = 0`.
    pub fn push_hex(&mut self, position: Vec2, color: Vec3, r: f32) {
        self.push_hex_at(position.extend(0.0), color.extend(1.0), r);
    }

    /// Hexagon with alpha at `z = 0`.
    pub fn push_hex_rgba(&mut self, position: Vec2, color: Vec4, r: f32) {
        self.push_hex_at(position.extend(0.0), color, r);
    }

    /// Appends 18 vertices: a six-triangle fan of circumradius `r` around
    /// `position`.
    ///
    /// Triangle `i` spans the rim points at `rad_for_hex(i - 1)` and
    /// `rad_for_hex(i)`. The RGB channels grow by the gradient step before
    /// each rim vertex; center vertices carry the value reached so far.
    pub fn push_hex_at(&mut self, position: Vec3, color: Vec4, r: f32) {
        let alpha = color.w;
        let mut rgb = color.truncate();
        let rim = |angle: f32| {
            Vec3::new(
                position.x + r * angle.cos(),
                position.y + r * angle.sin(),
                position.z,
            )
        };

        for i in 0..6 {
            self.push_back(Vertex::new(position, ColorTex::Color(rgb.extend(alpha))));

            rgb += Vec3::splat(self.hex_gradient_step);
            self.push_back(Vertex::new(
                rim(rad_for_hex(i - 1)),
                ColorTex::Color(rgb.extend(alpha)),
            ));

            rgb += Vec3::splat(self.hex_gradient_step);
            self.push_back(Vertex::new(
                rim(rad_for_hex(i)),
                ColorTex::Color(rgb.extend(alpha)),
            ));
        }
    }
}
