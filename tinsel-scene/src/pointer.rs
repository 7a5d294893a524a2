//! This module handles the pointer, which drives the parallax tilt of the whole scene and
//! distinguishes clicks from drags.

use crate::config::ParallaxConfig;
use glam::{Vec2, Vec3};
use tinsel_renderer_trait::Viewport;

/// The eased pointer position, normalised so that the viewport spans `[-1, 1]` on each axis, with
/// `(-1, -1)` at the top left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Where the pointer appears to be this frame.
    pub current: Vec2,

    /// Where the pointer actually is.
    pub target: Vec2,
}

impl PointerState {
    /// Set the target from a position in pixels, with the origin at the top left of the viewport.
    pub fn set_target_from_screen(&mut self, x: f32, y: f32, viewport: Viewport) {
        let width = viewport.width.max(1) as f32;
        let height = viewport.height.max(1) as f32;

        self.target = Vec2::new((x / width) * 2. - 1., (y / height) * 2. - 1.);
    }

    /// Move the current position towards the target by `factor` on each axis.
    pub fn ease(&mut self, factor: f32) {
        self.current += (self.target - self.current) * factor;
    }

    /// The parallax rotation of the scene group for the current pointer position.
    pub fn group_rotation(&self, parallax: &ParallaxConfig) -> Vec3 {
        Vec3::new(
            self.current.y * parallax.pitch_gain,
            self.current.x * parallax.yaw_gain,
            0.,
        )
    }
}

/// Tracks a press so that a release can be classified as a click or the end of a drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickTracker {
    /// Where the pointer was when it was pressed, in pixels.
    pressed_at: Option<Vec2>,

    /// The last known pointer position, in pixels.
    last_position: Vec2,
}

impl ClickTracker {
    /// Record that the pointer has moved.
    pub fn moved(&mut self, x: f32, y: f32) {
        self.last_position = Vec2::new(x, y);
    }

    /// Record that the pointer has been pressed at its last known position.
    pub fn pressed(&mut self) {
        self.pressed_at = Some(self.last_position);
    }

    /// Record that the pointer has been released, and return whether that makes a click.
    pub fn released(&mut self, threshold: f32) -> bool {
        match self.pressed_at.take() {
            Some(start) => start.distance(self.last_position) <= threshold,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    const VIEWPORT: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    #[test]
    fn screen_coords_are_normalised() {
        let mut pointer = PointerState::default();

        pointer.set_target_from_screen(0., 0., VIEWPORT);
        assert_eq!(pointer.target, Vec2::new(-1., -1.));

        pointer.set_target_from_screen(800., 600., VIEWPORT);
        assert_eq!(pointer.target, Vec2::new(1., 1.));

        pointer.set_target_from_screen(800., 0., VIEWPORT);
        assert_eq!(pointer.target, Vec2::new(1., -1.));

        pointer.set_target_from_screen(400., 300., VIEWPORT);
        assert_eq!(pointer.target, Vec2::ZERO);
    }

    #[test]
    fn easing_and_group_rotation() {
        let mut pointer = PointerState {
            current: Vec2::ZERO,
            target: Vec2::new(1., -1.),
        };

        pointer.ease(0.05);
        assert!(pointer.current.abs_diff_eq(Vec2::new(0.05, -0.05), 1e-6));

        let rotation = pointer.group_rotation(&ParallaxConfig::default());
        assert!(approx_eq!(f32, rotation.y, 0.05 * 0.5, ulps = 2));
        assert!(approx_eq!(f32, rotation.x, -0.05 * 0.2, ulps = 2));
        assert_eq!(rotation.z, 0.);

        for _ in 0..500 {
            pointer.ease(0.05);
        }
        assert!(pointer.current.abs_diff_eq(pointer.target, 1e-4));
    }

    #[test]
    fn click_needs_small_movement() {
        let mut tracker = ClickTracker::default();

        tracker.moved(100., 100.);
        tracker.pressed();
        tracker.moved(103., 102.);
        assert!(tracker.released(5.));

        tracker.pressed();
        tracker.moved(150., 100.);
        assert!(!tracker.released(5.));

        // A release without a press is never a click
        assert!(!tracker.released(5.));
    }
}
