//! This module provides the [`ParticleStore`], the ordered collection of every particle in a
//! scene.

use crate::{
    particle::{BoxMaterial, Particle, ParticleKind, PhotoImage, Primitive, SphereMaterial},
    random_in_cube,
};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;
use tracing::{debug, instrument};

/// The side length of the cube that main particles start in.
const MAIN_SPAWN_SIDE: f32 = 100.;

/// The side length of the cube that dust particles start in.
const DUST_SPAWN_SIDE: f32 = 60.;

/// The side length of the cube that photo particles start in.
const PHOTO_SPAWN_SIDE: f32 = 20.;

/// The maximum magnitude of each component of a main particle's drift velocity.
const MAIN_DRIFT: f32 = 0.025;

/// The maximum magnitude of each component of a dust particle's drift velocity.
const DUST_DRIFT: f32 = 0.01;

/// An ordered, append-only collection of particles.
///
/// The index of a particle in the store is part of the layout formulas, so particles are never
/// removed or reordered. The scene populates the main particles first, then the dust, and photos
/// get appended to the end whenever they finish decoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleStore {
    /// The particles themselves, in insertion order.
    particles: Vec<Particle>,

    /// The number of [`ParticleKind::is_main`] particles.
    main_count: usize,

    /// The number of [`ParticleKind::Dust`] particles.
    dust_count: usize,

    /// The number of [`ParticleKind::Photo`] particles.
    photo_count: usize,
}

/// Sample a random drift velocity with each component in `-max..max`.
fn random_drift<R: Rng + ?Sized>(rng: &mut R, max: f32) -> Vec3 {
    random_in_cube(rng, 2. * max)
}

/// Sample a random starting rotation about the X and Y axes.
fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.)
}

impl ParticleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` main particles: a random mix of boxes, spheres, and candy canes.
    #[instrument(skip(self, rng))]
    pub fn create_main<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.particles.reserve(count);

        for _ in 0..count {
            let roll: f32 = rng.gen();
            let primitive = if roll < 0.4 {
                Primitive::Box(if rng.gen_bool(0.5) {
                    BoxMaterial::Gold
                } else {
                    BoxMaterial::Green
                })
            } else if roll < 0.8 {
                Primitive::Sphere(if rng.gen_bool(0.5) {
                    SphereMaterial::Gold
                } else {
                    SphereMaterial::Red
                })
            } else {
                Primitive::CandyCane
            };

            let position = random_in_cube(rng, MAIN_SPAWN_SIDE);
            let rotation = random_rotation(rng);
            let drift_velocity = random_drift(rng, MAIN_DRIFT);

            self.particles.push(Particle::new(
                primitive,
                self.main_count,
                position,
                rotation,
                drift_velocity,
            ));
            self.main_count += 1;
        }

        debug!(main_count = self.main_count, "Created main particles");
    }

    /// Append `count` dust particles.
    #[instrument(skip(self, rng))]
    pub fn create_dust<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.particles.reserve(count);

        for _ in 0..count {
            let position = random_in_cube(rng, DUST_SPAWN_SIDE);
            let rotation = random_rotation(rng);
            let drift_velocity = random_drift(rng, DUST_DRIFT);

            self.particles.push(Particle::new(
                Primitive::Dust,
                self.dust_count,
                position,
                rotation,
                drift_velocity,
            ));
            self.dust_count += 1;
        }

        debug!(dust_count = self.dust_count, "Created dust particles");
    }

    /// Append a framed photo particle to the end of the store and return its index.
    #[instrument(skip(self, rng))]
    pub fn create_photo<R: Rng + ?Sized>(&mut self, image: PhotoImage, rng: &mut R) -> usize {
        let position = random_in_cube(rng, PHOTO_SPAWN_SIDE);

        self.particles.push(Particle::new(
            Primitive::Photo(image),
            self.photo_count,
            position,
            Vec3::ZERO,
            Vec3::ZERO,
        ));
        self.photo_count += 1;

        let index = self.particles.len() - 1;
        debug!(index, photo_count = self.photo_count, "Created photo particle");
        index
    }

    /// The total number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Is the store empty?
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The number of main particles (boxes, spheres, and candy canes).
    pub fn main_count(&self) -> usize {
        self.main_count
    }

    /// The number of dust particles.
    pub fn dust_count(&self) -> usize {
        self.dust_count
    }

    /// The number of photo particles.
    pub fn photo_count(&self) -> usize {
        self.photo_count
    }

    /// The index of the first photo particle in store order, if there is one.
    pub fn first_photo_index(&self) -> Option<usize> {
        self.particles
            .iter()
            .position(|particle| particle.kind() == ParticleKind::Photo)
    }

    /// Get the particle at the given index.
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    /// All the particles, in store order.
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Iterate over the particles in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Iterate mutably over the particles in store order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use rand::{rngs::StdRng, SeedableRng};

    fn photo() -> PhotoImage {
        PhotoImage::new(RgbaImage::new(2, 2))
    }

    #[test]
    fn create_main_respects_bounds_and_mix() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut store = ParticleStore::new();
        store.create_main(1500, &mut rng);

        assert_eq!(store.len(), 1500);
        assert_eq!(store.main_count(), 1500);
        assert_eq!(store.dust_count(), 0);

        for (idx, particle) in store.iter().enumerate() {
            assert!(particle.kind().is_main());
            assert_eq!(particle.kind_index(), idx);
            assert!(particle.position.abs().max_element() <= 50.);
            assert!(particle.drift_velocity().abs().max_element() <= MAIN_DRIFT);
            assert!((0. ..=PI).contains(&particle.rotation.x));
            assert!((0. ..=PI).contains(&particle.rotation.y));
            assert_eq!(particle.rotation.z, 0.);
            assert_eq!(particle.scale, Vec3::ONE);
        }

        // With 1500 rolls we should see every main kind
        for kind in [ParticleKind::Box, ParticleKind::Sphere, ParticleKind::Cane] {
            assert!(store.iter().any(|particle| particle.kind() == kind));
        }
    }

    #[test]
    fn create_dust_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut store = ParticleStore::new();
        store.create_main(10, &mut rng);
        store.create_dust(500, &mut rng);

        assert_eq!(store.len(), 510);
        assert_eq!(store.dust_count(), 500);

        for (dust_idx, particle) in store.iter().skip(10).enumerate() {
            assert_eq!(particle.kind(), ParticleKind::Dust);
            assert_eq!(particle.kind_index(), dust_idx);
            assert!(particle.position.abs().max_element() <= 30.);
            assert!(particle.drift_velocity().abs().max_element() <= DUST_DRIFT);
        }
    }

    #[test]
    fn photos_are_appended_in_order() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut store = ParticleStore::new();
        assert_eq!(store.first_photo_index(), None);

        store.create_main(3, &mut rng);
        store.create_dust(2, &mut rng);

        assert_eq!(store.create_photo(photo(), &mut rng), 5);
        assert_eq!(store.create_photo(photo(), &mut rng), 6);

        assert_eq!(store.photo_count(), 2);
        assert_eq!(store.first_photo_index(), Some(5));

        let second = store.get(6).unwrap();
        assert_eq!(second.kind(), ParticleKind::Photo);
        assert_eq!(second.kind_index(), 1);
        assert_eq!(second.drift_velocity(), Vec3::ZERO);
        assert!(second.position.abs().max_element() <= 10.);
    }
}
