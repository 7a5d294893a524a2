//! This crate provides the [`Particle`] data model and the [`ParticleStore`] which owns every
//! particle in a scene, as well as the pure geometry that renderers use to build the more
//! unusual particle shapes.

mod geometry;
mod particle;
mod store;

pub use self::{
    geometry::{candy_cane_tube, catmull_rom_point, CandyCaneTube, PhotoFrameGeometry},
    particle::{BoxMaterial, Particle, ParticleKind, PhotoImage, Primitive, SphereMaterial},
    store::ParticleStore,
};

use glam::Vec3;
use rand::Rng;

/// An RGB colour.
pub type RGBArray = [u8; 3];

/// Generate a random `Vec3` uniformly inside an axis-aligned cube of the given side length,
/// centred on the origin.
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, side: f32) -> Vec3 {
    (rng.gen::<Vec3>() - Vec3::splat(0.5)) * side
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_in_cube_stays_inside_the_cube() {
        let mut rng = StdRng::seed_from_u64(12345);

        for _ in 0..1000 {
            let v = random_in_cube(&mut rng, 60.);
            assert!(v.abs().max_element() <= 30., "{v:?} is outside the cube");
        }
    }
}
