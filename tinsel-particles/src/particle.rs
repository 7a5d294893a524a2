//! This module handles the [`Particle`] itself and the descriptors of what it looks like.

use glam::Vec3;
use image::RgbaImage;
use std::{fmt, sync::Arc};

/// The kind of a particle. This never changes after the particle is created.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticleKind {
    /// A small ornament cube.
    Box,

    /// A bauble.
    Sphere,

    /// A striped candy cane tube.
    Cane,

    /// A tiny glowing dust mote.
    Dust,

    /// A framed photo supplied by the user.
    Photo,
}

impl ParticleKind {
    /// Is this one of the main decorative kinds that make up the body of the tree?
    pub fn is_main(self) -> bool {
        matches!(self, Self::Box | Self::Sphere | Self::Cane)
    }
}

/// The material of a [`Primitive::Box`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoxMaterial {
    Gold,
    Green,
}

/// The material of a [`Primitive::Sphere`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SphereMaterial {
    Gold,
    Red,
}

/// A decoded photo, shared cheaply between the store and any renderer that wants to upload it.
#[derive(Clone, PartialEq)]
pub struct PhotoImage(Arc<RgbaImage>);

impl PhotoImage {
    /// Wrap a decoded RGBA image.
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    /// The width of the photo in pixels.
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// The height of the photo in pixels.
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// A reference to the decoded pixel data.
    pub fn image(&self) -> &RgbaImage {
        &self.0
    }
}

impl fmt::Debug for PhotoImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pixels", &..)
            .finish()
    }
}

/// The drawable primitive owned by a particle. Renderers decide how to turn this into meshes.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// A 0.8 unit cube.
    Box(BoxMaterial),

    /// A sphere of radius 0.5.
    Sphere(SphereMaterial),

    /// A candy cane. See [`candy_cane_tube`](crate::candy_cane_tube).
    CandyCane,

    /// A tiny cream sphere of radius 0.05.
    Dust,

    /// A photo panel with a gold backing frame. See
    /// [`PhotoFrameGeometry`](crate::PhotoFrameGeometry).
    Photo(PhotoImage),
}

impl Primitive {
    /// The kind of particle that owns a primitive like this.
    pub fn kind(&self) -> ParticleKind {
        match self {
            Self::Box(_) => ParticleKind::Box,
            Self::Sphere(_) => ParticleKind::Sphere,
            Self::CandyCane => ParticleKind::Cane,
            Self::Dust => ParticleKind::Dust,
            Self::Photo(_) => ParticleKind::Photo,
        }
    }
}

/// One decorative object in the scene.
///
/// The position, rotation, and scale are the live values that get drawn. The target values are
/// overwritten every frame by the formation and the live values are eased towards them.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// What this particle looks like.
    primitive: Primitive,

    /// The ordinal of this particle among particles of the same kind.
    kind_index: usize,

    /// The constant self-rotation rate, in radians per frame.
    drift_velocity: Vec3,

    /// The current position.
    pub position: Vec3,

    /// The current rotation, as XYZ Euler angles in radians.
    pub rotation: Vec3,

    /// The current scale.
    pub scale: Vec3,

    /// The position that this particle is easing towards.
    pub target_position: Vec3,

    /// The scale that this particle is easing towards.
    pub target_scale: Vec3,
}

impl Particle {
    /// Create a new particle at rest, with unit scale and its target set to where it already is.
    pub fn new(
        primitive: Primitive,
        kind_index: usize,
        position: Vec3,
        rotation: Vec3,
        drift_velocity: Vec3,
    ) -> Self {
        Self {
            primitive,
            kind_index,
            drift_velocity,
            position,
            rotation,
            scale: Vec3::ONE,
            target_position: position,
            target_scale: Vec3::ONE,
        }
    }

    /// The kind of this particle.
    pub fn kind(&self) -> ParticleKind {
        self.primitive.kind()
    }

    /// The drawable primitive of this particle.
    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// The ordinal of this particle among particles of the same kind, in creation order.
    pub fn kind_index(&self) -> usize {
        self.kind_index
    }

    /// The constant self-rotation rate of this particle.
    pub fn drift_velocity(&self) -> Vec3 {
        self.drift_velocity
    }

    /// Move the current position and scale a fraction of the way towards their targets.
    ///
    /// `factor` should be in `(0, 1]`.
    pub fn ease_towards_target(&mut self, factor: f32) {
        self.position = self.position.lerp(self.target_position, factor);
        self.scale = self.scale.lerp(self.target_scale, factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dust_at(position: Vec3) -> Particle {
        Particle::new(Primitive::Dust, 0, position, Vec3::ZERO, Vec3::ZERO)
    }

    #[test]
    fn kind_follows_primitive() {
        assert_eq!(Primitive::Box(BoxMaterial::Green).kind(), ParticleKind::Box);
        assert_eq!(Primitive::Sphere(SphereMaterial::Red).kind(), ParticleKind::Sphere);
        assert_eq!(Primitive::CandyCane.kind(), ParticleKind::Cane);
        assert_eq!(Primitive::Dust.kind(), ParticleKind::Dust);
        assert!(ParticleKind::Cane.is_main());
        assert!(!ParticleKind::Dust.is_main());
        assert!(!ParticleKind::Photo.is_main());
    }

    #[test]
    fn easing_converges_without_overshoot() {
        let mut particle = dust_at(Vec3::new(10., -4., 2.));
        particle.target_position = Vec3::new(-3., 8., 0.5);
        particle.target_scale = Vec3::splat(4.5);

        let mut last_distance = particle.position.distance(particle.target_position);
        for _ in 0..200 {
            particle.ease_towards_target(0.04);

            let distance = particle.position.distance(particle.target_position);
            assert!(distance < last_distance, "distance should strictly decrease");
            last_distance = distance;

            // Every component stays on the starting side of the target
            assert!(particle.position.x >= -3.);
            assert!(particle.position.y <= 8.);
            assert!(particle.scale.x <= 4.5);
        }

        assert!(last_distance < 1e-2);
        assert!(particle.scale.abs_diff_eq(Vec3::splat(4.5), 1e-2));
    }

    #[test]
    fn photo_debug_does_not_dump_pixels() {
        let photo = PhotoImage::new(RgbaImage::new(4, 2));
        assert_eq!(
            format!("{photo:?}"),
            "PhotoImage { width: 4, height: 2, pixels: .. }"
        );
    }
}
