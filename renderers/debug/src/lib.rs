//! This crate provides a very simple [`DebugRenderer`] to test things with.

use tinsel_particles::ParticleKind;
use tinsel_renderer_trait::{Renderer, SceneFrame, Viewport};
use tracing::{info, instrument, trace};

/// A simple debug renderer that just logs its input with tracing.
///
/// Every frame gets a summary at the info level, and the full frame is available at the trace
/// level.
#[derive(Clone, Debug, Default)]
pub struct DebugRenderer {
    /// How many frames have been rendered.
    frames_rendered: u64,

    /// The viewport from the last resize, if there has been one.
    viewport: Option<Viewport>,
}

impl DebugRenderer {
    /// Create a new debug renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many frames have been rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The viewport from the most recent resize.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl Renderer for DebugRenderer {
    #[instrument(skip_all, fields(frame = frame.frame))]
    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        let photos = frame
            .particles
            .iter()
            .filter(|particle| particle.kind() == ParticleKind::Photo)
            .count();

        info!(
            mode = ?frame.mode,
            count = frame.particles.len(),
            photos,
            group_rotation = ?frame.group_rotation,
            overlay = ?frame.overlay,
        );
        trace!(?frame);

        self.frames_rendered += 1;
    }

    #[instrument(skip(self))]
    fn resize(&mut self, viewport: Viewport) {
        info!(?viewport, aspect_ratio = viewport.aspect_ratio(), "Resized");
        self.viewport = Some(viewport);
    }

    fn teardown(&mut self) {
        info!(frames_rendered = self.frames_rendered, "Tearing down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use tinsel_formations::SceneMode;
    use tinsel_renderer_trait::OverlayState;

    #[test]
    fn counts_frames() {
        let mut renderer = DebugRenderer::new();

        for frame in 0..3 {
            renderer.render_frame(&SceneFrame {
                frame,
                mode: SceneMode::Tree,
                group_rotation: Vec3::ZERO,
                particles: &[],
                viewport: Viewport::default(),
                overlay: OverlayState::default(),
            });
        }

        assert_eq!(renderer.frames_rendered(), 3);
    }

    #[test]
    fn remembers_last_resize() {
        let mut renderer = DebugRenderer::new();
        assert_eq!(renderer.viewport(), None);

        let viewport = Viewport {
            width: 800,
            height: 400,
        };
        renderer.resize(viewport);

        assert_eq!(renderer.viewport(), Some(viewport));
        assert_eq!(renderer.viewport().map(|v| v.aspect_ratio()), Some(2.));
    }
}
