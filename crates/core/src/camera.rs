//! Pan/zoom camera driven by discrete input events.
//!
//! Input arrives as edges: a key press sets the pan velocity on one axis, the
//! matching release zeroes it, a scroll notch moves the zoom level. Once per
//! frame [`Camera::update_camera`] integrates the velocity into the
//! accumulated translation and rebuilds
//! `projection = zoom * translation`. Panning therefore happens in world
//! units, independent of the current zoom.
//!
//! Translation and zoom are kept as integer step counts and scaled by the
//! configured step on read, so opposite inputs cancel exactly.
//!
//! Neither zoom nor translation is clamped. A zoom level at or below zero
//! collapses or mirrors the projection.

use glam::{IVec2, Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

/// The four pan directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKey {
    Up,
    Down,
    Left,
    Right,
}

impl CameraKey {
    /// Maps the `w`/`a`/`s`/`d` keys to directions.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(CameraKey::Up),
            's' => Some(CameraKey::Down),
            'a' => Some(CameraKey::Left),
            'd' => Some(CameraKey::Right),
            _ => None,
        }
    }

    /// Unit pan direction applied to the world while the key is held.
    ///
    /// The world moves opposite to the view: holding Right shifts
    /// geometry towards -x.
    fn pan(self) -> IVec2 {
        match self {
            CameraKey::Up => IVec2::new(0, -1),
            CameraKey::Down => IVec2::new(0, 1),
            CameraKey::Left => IVec2::new(1, 0),
            CameraKey::Right => IVec2::new(-1, 0),
        }
    }
}

/// One discrete input edge fed to the camera by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(CameraKey),
    KeyUp(CameraKey),
    /// Signed scroll notches; positive zooms in.
    Scroll(i32),
}

#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    projection: Mat4,
    zoom: Mat4,
    translation: Mat4,
    /// Per-axis pan direction, each component in `{-1, 0, 1}`.
    scroll_dir: IVec2,
    /// Accumulated pan in units of `config.scroll_offset`.
    pan_steps: IVec2,
    /// Accumulated zoom in units of `config.zoom_step`.
    zoom_steps: i32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Creates a camera with identity matrices and no accumulated input.
    pub fn with_config(config: CameraConfig) -> Self {
        Self {
            config,
            projection: Mat4::IDENTITY,
            zoom: Mat4::IDENTITY,
            translation: Mat4::IDENTITY,
            scroll_dir: IVec2::ZERO,
            pan_steps: IVec2::ZERO,
            zoom_steps: 0,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Starts panning along the key's axis, replacing any opposite direction.
    pub fn keydown(&mut self, key: CameraKey) {
        let pan = key.pan();
        match key {
            CameraKey::Up | CameraKey::Down => self.scroll_dir.y = pan.y,
            CameraKey::Left | CameraKey::Right => self.scroll_dir.x = pan.x,
        }
    }

    /// Stops panning along the key's axis.
    pub fn keyup(&mut self, key: CameraKey) {
        match key {
            CameraKey::Up | CameraKey::Down => self.scroll_dir.y = 0,
            CameraKey::Left | CameraKey::Right => self.scroll_dir.x = 0,
        }
    }

    /// Steps the zoom level; the step count saturates at the `i32` range.
    pub fn scroll(&mut self, direction: i32) {
        self.zoom_steps = self.zoom_steps.saturating_add(direction);
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.keydown(key),
            InputEvent::KeyUp(key) => self.keyup(key),
            InputEvent::Scroll(direction) => self.scroll(direction),
        }
    }

    /// Integrates one frame of pan input and rebuilds the matrices.
    pub fn update_camera(&mut self) {
        self.pan_steps = IVec2::new(
            self.pan_steps.x.saturating_add(self.scroll_dir.x),
            self.pan_steps.y.saturating_add(self.scroll_dir.y),
        );

        let translate = self.translate();
        self.translation = Mat4::from_translation(translate.extend(0.0));
        self.zoom = Mat4::from_scale(Vec3::splat(self.zoom_level()));
        self.projection = self.zoom * self.translation;
    }

    /// Projection as of the last update.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn zoom_matrix(&self) -> Mat4 {
        self.zoom
    }

    pub fn translation_matrix(&self) -> Mat4 {
        self.translation
    }

    /// Per-update pan velocity set by the held keys.
    pub fn current_scroll(&self) -> Vec2 {
        self.scroll_dir.as_vec2() * self.config.scroll_offset
    }

    /// Accumulated world translation.
    pub fn translate(&self) -> Vec2 {
        self.pan_steps.as_vec2() * self.config.scroll_offset
    }

    pub fn zoom_level(&self) -> f32 {
        self.config.initial_zoom + self.zoom_steps as f32 * self.config.zoom_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn new_camera_has_identity_projection() {
        let cam = Camera::new();
        assert_eq!(cam.projection(), Mat4::IDENTITY);
        assert_eq!(cam.translate(), Vec2::ZERO);
        assert_eq!(cam.current_scroll(), Vec2::ZERO);
        assert_eq!(cam.zoom_level(), 0.7);
    }

    #[test]
    fn from_char_maps_wasd() {
        assert_eq!(CameraKey::from_char('w'), Some(CameraKey::Up));
        assert_eq!(CameraKey::from_char('S'), Some(CameraKey::Down));
        assert_eq!(CameraKey::from_char('a'), Some(CameraKey::Left));
        assert_eq!(CameraKey::from_char('d'), Some(CameraKey::Right));
        assert_eq!(CameraKey::from_char('q'), None);
    }

    #[test]
    fn keydown_sets_signed_offset_per_direction() {
        let mut cam = Camera::new();
        cam.keydown(CameraKey::Up);
        assert_eq!(cam.current_scroll(), Vec2::new(0.0, -0.05));
        cam.keydown(CameraKey::Down);
        assert_eq!(cam.current_scroll(), Vec2::new(0.0, 0.05));
        cam.keydown(CameraKey::Left);
        assert_eq!(cam.current_scroll(), Vec2::new(0.05, 0.05));
        cam.keydown(CameraKey::Right);
        assert_eq!(cam.current_scroll(), Vec2::new(-0.05, 0.05));
    }

    #[test]
    fn keyup_zeroes_only_its_axis() {
        let mut cam = Camera::new();
        cam.keydown(CameraKey::Up);
        cam.keydown(CameraKey::Right);
        cam.keyup(CameraKey::Down);
        assert_eq!(cam.current_scroll(), Vec2::new(-0.05, 0.0));
        cam.keyup(CameraKey::Left);
        assert_eq!(cam.current_scroll(), Vec2::ZERO);
    }

    #[test]
    fn held_pan_right_accumulates_per_update() {
        let mut cam = Camera::new();
        cam.keydown(CameraKey::Right);
        for _ in 0..10 {
            cam.update_camera();
        }
        assert!((cam.translate().x - (-10.0 * 0.05)).abs() < EPS);
        assert_eq!(cam.translate().y, 0.0);

        cam.keyup(CameraKey::Right);
        let settled = cam.translate();
        for _ in 0..5 {
            cam.update_camera();
        }
        assert_eq!(cam.translate(), settled);
    }

    #[test]
    fn input_is_only_integrated_on_update() {
        let mut cam = Camera::new();
        cam.keydown(CameraKey::Left);
        assert_eq!(cam.translate(), Vec2::ZERO);
        cam.update_camera();
        assert!((cam.translate().x - 0.05).abs() < EPS);
    }

    #[test]
    fn scroll_steps_zoom_level() {
        let mut cam = Camera::new();
        cam.scroll(1);
        assert!((cam.zoom_level() - 0.77).abs() < EPS);
        cam.scroll(-3);
        assert!((cam.zoom_level() - 0.56).abs() < EPS);
    }

    #[test]
    fn projection_is_zoom_times_translation() {
        let mut cam = Camera::new();
        cam.keydown(CameraKey::Down);
        cam.scroll(2);
        cam.update_camera();
        assert_eq!(cam.projection(), cam.zoom_matrix() * cam.translation_matrix());

        // A world point at the origin lands at zoom * translate.
        let clip = cam.projection().transform_point3(Vec3::ZERO);
        let expected = cam.translate() * cam.zoom_level();
        assert!(clip.truncate().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn pan_is_in_world_units_regardless_of_zoom() {
        let mut zoomed = Camera::new();
        zoomed.scroll(5);
        let mut plain = Camera::new();
        for cam in [&mut zoomed, &mut plain] {
            cam.keydown(CameraKey::Left);
            cam.update_camera();
        }
        assert_eq!(zoomed.translate(), plain.translate());
    }

    #[test]
    fn zoom_is_not_clamped() {
        let mut cam = Camera::new();
        cam.scroll(-20);
        cam.update_camera();
        assert!(cam.zoom_level() < 0.0);
        assert!(cam.projection().x_axis.x < 0.0);
    }

    #[test]
    fn zoom_steps_saturate_instead_of_wrapping() {
        let mut cam = Camera::new();
        cam.scroll(i32::MAX);
        let max_zoom = cam.zoom_level();
        cam.scroll(1);
        assert_eq!(cam.zoom_level(), max_zoom);
        assert!(cam.zoom_level() > 0.0);

        cam.scroll(i32::MIN);
        cam.scroll(i32::MIN);
        assert!(cam.zoom_level() < 0.0);
    }

    #[test]
    fn pan_steps_saturate_at_the_edge() {
        let mut cam = Camera::new();
        cam.pan_steps = IVec2::new(i32::MIN + 1, i32::MAX - 1);
        cam.keydown(CameraKey::Right);
        cam.keydown(CameraKey::Down);
        for _ in 0..3 {
            cam.update_camera();
        }
        assert_eq!(cam.pan_steps, IVec2::new(i32::MIN, i32::MAX));
        assert!(cam.translate().x < 0.0);
        assert!(cam.translate().y > 0.0);
    }

    #[test]
    fn handle_dispatches_events() {
        let mut cam = Camera::new();
        cam.handle(InputEvent::KeyDown(CameraKey::Up));
        cam.handle(InputEvent::Scroll(1));
        cam.update_camera();
        cam.handle(InputEvent::KeyUp(CameraKey::Up));
        cam.update_camera();
        assert!((cam.translate().y - (-0.05)).abs() < EPS);
        assert!((cam.zoom_level() - 0.77).abs() < EPS);
    }

    #[test]
    fn with_config_uses_custom_steps() {
        let mut cam = Camera::with_config(CameraConfig {
            scroll_offset: 1.0,
            zoom_step: 0.5,
            initial_zoom: 1.0,
        });
        cam.keydown(CameraKey::Down);
        cam.scroll(1);
        cam.update_camera();
        assert_eq!(cam.translate(), Vec2::new(0.0, 1.0));
        assert_eq!(cam.zoom_level(), 1.5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn n_updates_pan_by_n_offsets(n in 0usize..500) {
                let mut cam = Camera::new();
                cam.keydown(CameraKey::Right);
                for _ in 0..n {
                    cam.update_camera();
                }
                prop_assert_eq!(cam.translate().x, -(n as f32) * 0.05);
            }

            #[test]
            fn balanced_scroll_restores_zoom(n in 0usize..200) {
                let mut cam = Camera::new();
                let before = cam.zoom_level();
                for _ in 0..n {
                    cam.scroll(1);
                }
                for _ in 0..n {
                    cam.scroll(-1);
                }
                prop_assert_eq!(cam.zoom_level(), before);
            }
        }
    }
}
