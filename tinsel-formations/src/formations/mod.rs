//! This module handles the [`Formation`] trait and its implementations, one per [`SceneMode`].

pub mod focus;
pub mod scatter;
pub mod tree;

use crate::SceneMode;
use glam::Vec3;
use tinsel_particles::{Particle, ParticleStore};

/// A read-only snapshot of everything a formation needs to know about the scene, taken once per
/// frame before any particle is updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormationContext {
    /// The mode for this frame.
    pub mode: SceneMode,

    /// The frame counter, starting at 0.
    pub frame: u64,

    /// The number of main particles in the store.
    pub main_count: usize,

    /// The number of dust particles in the store.
    pub dust_count: usize,

    /// The store index of the particle that [`focus::Focus`] enlarges, if any.
    pub focus_target: Option<usize>,
}

impl FormationContext {
    /// Take a snapshot of the given store for this frame.
    pub fn snapshot(store: &ParticleStore, mode: SceneMode, frame: u64) -> Self {
        Self {
            mode,
            frame,
            main_count: store.main_count(),
            dust_count: store.dust_count(),
            focus_target: store.first_photo_index(),
        }
    }
}

/// A change to a particle's live rotation. Rotations are never eased.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationUpdate {
    /// Add this to the current XYZ Euler rotation.
    Advance(Vec3),

    /// Overwrite the rotation about the Y axis.
    SetY(f32),
}

/// The result of running a formation for one particle on one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetUpdate {
    /// The new target position.
    pub position: Vec3,

    /// The new target scale, or `None` to leave the previous target scale in place.
    pub scale: Option<Vec3>,

    /// A direct change to the live rotation, if any.
    pub rotation: Option<RotationUpdate>,
}

impl TargetUpdate {
    /// Move towards `position` at unit scale, leaving the rotation alone.
    pub(crate) fn at(position: Vec3) -> Self {
        Self {
            position,
            scale: Some(Vec3::ONE),
            rotation: None,
        }
    }

    /// Write this update into the particle's targets and rotation.
    pub fn apply_to(self, particle: &mut Particle) {
        particle.target_position = self.position;

        if let Some(scale) = self.scale {
            particle.target_scale = scale;
        }

        match self.rotation {
            Some(RotationUpdate::Advance(delta)) => particle.rotation += delta,
            Some(RotationUpdate::SetY(y)) => particle.rotation.y = y,
            None => (),
        }
    }
}

/// A target layout rule, applied to every particle on every frame.
pub trait Formation: Sync {
    /// Compute where the particle at `index` should be heading on this frame.
    fn target(&self, particle: &Particle, index: usize, ctx: &FormationContext) -> TargetUpdate;
}

/// Compute the target for a particle with the formation for `ctx.mode`.
pub fn compute_target(particle: &Particle, index: usize, ctx: &FormationContext) -> TargetUpdate {
    ctx.mode.formation().target(particle, index, ctx)
}

/// The angle `offset + frame * rate` in double precision.
///
/// An `f32` frame counter stops counting every frame after 2^24, which would freeze anything that
/// animates with the frame.
pub(crate) fn phase(frame: u64, rate: f64, offset: f64) -> f64 {
    frame as f64 * rate + offset
}

/// Divide `index` by `count` to get a proportion, treating an empty population as having one
/// member so that we never divide by zero.
pub(crate) fn proportion(index: usize, count: usize) -> f32 {
    index as f32 / count.max(1) as f32
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use image::RgbaImage;
    use rand::{rngs::StdRng, SeedableRng};
    use tinsel_particles::PhotoImage;

    /// Build a store with the given population and a fixed seed.
    pub fn store(main: usize, dust: usize, photos: usize) -> ParticleStore {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut store = ParticleStore::new();
        store.create_main(main, &mut rng);
        store.create_dust(dust, &mut rng);
        for _ in 0..photos {
            store.create_photo(PhotoImage::new(RgbaImage::new(1, 1)), &mut rng);
        }
        store
    }

    /// Run the formation for `mode` over the whole store without touching it.
    pub fn targets(store: &ParticleStore, mode: SceneMode, frame: u64) -> Vec<TargetUpdate> {
        let ctx = FormationContext::snapshot(store, mode, frame);
        store
            .iter()
            .enumerate()
            .map(|(index, particle)| compute_target(particle, index, &ctx))
            .collect()
    }
}
