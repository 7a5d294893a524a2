//! This module contains the [`Scatter`] formation.

use super::{phase, Formation, FormationContext, RotationUpdate, TargetUpdate};
use glam::Vec3;
use tinsel_particles::Particle;

/// Every particle sits on a sphere whose radius breathes in and out, and tumbles by its own drift.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scatter;

impl Scatter {
    /// The breathing radius for the particle at `index` on this frame, always within `[10, 20]`.
    pub fn radius(index: usize, frame: u64) -> f32 {
        (15. + 5. * phase(frame, 0.01, index as f64 * 0.5).sin()) as f32
    }
}

impl Formation for Scatter {
    fn target(&self, particle: &Particle, index: usize, ctx: &FormationContext) -> TargetUpdate {
        let r = Self::radius(index, ctx.frame);
        let theta = index as f32 * 0.137;
        let phi = index as f32 * 0.5;

        let drift = particle.drift_velocity();

        TargetUpdate {
            position: Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ),
            scale: Some(Vec3::ONE),
            rotation: Some(RotationUpdate::Advance(Vec3::new(drift.x, drift.y, 0.))),
        }
    }
}
