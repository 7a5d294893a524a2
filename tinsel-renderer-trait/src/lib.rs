//! This crate provides the [`Renderer`] trait and the [`SceneFrame`] that gets handed to it.
//!
//! It's structured like this so that renderers don't need to depend on the scene itself.

use glam::Vec3;
use tinsel_formations::SceneMode;
use tinsel_particles::Particle;

/// The size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// The width in pixels.
    pub width: u32,

    /// The height in pixels.
    pub height: u32,
}

impl Viewport {
    /// The width divided by the height, or 1 if the viewport has no height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// The state of the on-screen overlay. This is purely presentational.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayState {
    /// Has the user hidden the overlay?
    pub hidden: bool,

    /// Is the scene still loading?
    pub loading: bool,
}

/// A borrowed view of the scene for a single frame.
#[derive(Clone, Copy, Debug)]
pub struct SceneFrame<'a> {
    /// The frame counter for this frame.
    pub frame: u64,

    /// The current scene mode.
    pub mode: SceneMode,

    /// The parallax rotation of the whole scene group, as XYZ Euler angles in radians.
    pub group_rotation: Vec3,

    /// Every particle in store order.
    pub particles: &'a [Particle],

    /// The current viewport.
    pub viewport: Viewport,

    /// The current overlay state.
    pub overlay: OverlayState,
}

/// The trait implemented by all renderers.
pub trait Renderer {
    /// Draw a single frame of the scene.
    fn render_frame(&mut self, frame: &SceneFrame<'_>);

    /// The viewport has changed size.
    fn resize(&mut self, _viewport: Viewport) {}

    /// The scene is shutting down and no more frames will be rendered.
    fn teardown(&mut self) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        (**self).render_frame(frame);
    }

    fn resize(&mut self, viewport: Viewport) {
        (**self).resize(viewport);
    }

    fn teardown(&mut self) {
        (**self).teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio() {
        assert_eq!(
            Viewport {
                width: 1920,
                height: 1080
            }
            .aspect_ratio(),
            1920. / 1080.
        );
        assert_eq!(
            Viewport {
                width: 100,
                height: 0
            }
            .aspect_ratio(),
            1.
        );
    }
}
