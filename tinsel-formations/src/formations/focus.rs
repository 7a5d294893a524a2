//! This module contains the [`Focus`] formation.

use super::{phase, Formation, FormationContext, RotationUpdate, TargetUpdate};
use glam::Vec3;
use tinsel_particles::Particle;

/// Where the focused photo sits, just in front of the camera.
const FOCUS_POSITION: Vec3 = Vec3::new(0., 0., 32.);

/// The scale of the focused photo.
const FOCUS_SCALE: f32 = 4.5;

/// How far from the origin everything else gets pushed.
const BACKGROUND_DISTANCE: f32 = 45.;

/// The scale of everything that isn't focused.
const BACKGROUND_SCALE: f32 = 0.4;

/// The first photo in the store is pulled up to the camera and enlarged, gently swaying, while
/// everything else shrinks and recedes onto a distant shell.
///
/// If there are no photos, everything recedes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Focus;

impl Formation for Focus {
    fn target(&self, particle: &Particle, index: usize, ctx: &FormationContext) -> TargetUpdate {
        if ctx.focus_target == Some(index) {
            TargetUpdate {
                position: FOCUS_POSITION,
                scale: Some(Vec3::splat(FOCUS_SCALE)),
                rotation: Some(RotationUpdate::SetY(
                    (0.2 * phase(ctx.frame, 0.01, 0.).sin()) as f32,
                )),
            }
        } else {
            TargetUpdate {
                position: particle.position.normalize_or_zero() * BACKGROUND_DISTANCE,
                scale: Some(Vec3::splat(BACKGROUND_SCALE)),
                rotation: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        formations::test_utils::{store, targets},
        FormationContext, SceneMode,
    };
    use float_cmp::approx_eq;
    use image::RgbaImage;
    use rand::{rngs::StdRng, SeedableRng};
    use tinsel_particles::{ParticleStore, PhotoImage};

    #[test]
    fn exactly_one_focused_particle() {
        let store = store(30, 30, 3);
        let targets = targets(&store, SceneMode::Focus, 0);

        let focused: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|(_, target)| target.scale == Some(Vec3::splat(4.5)))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(focused, vec![60]);

        for target in targets.iter().skip(61) {
            assert_eq!(target.scale, Some(Vec3::splat(0.4)));
        }
    }

    #[test]
    fn everything_recedes_without_photos() {
        let store = store(30, 30, 0);
        let targets = targets(&store, SceneMode::Focus, 5);

        for (target, particle) in targets.iter().zip(store.iter()) {
            assert_eq!(target.scale, Some(Vec3::splat(0.4)));
            assert_eq!(target.rotation, None);
            assert!(approx_eq!(f32, target.position.length(), 45., epsilon = 1e-3));
            assert!(target
                .position
                .normalize()
                .abs_diff_eq(particle.position.normalize(), 1e-5));
        }
    }

    #[test]
    fn zero_position_stays_at_origin() {
        let mut store = store(1, 0, 0);
        store.iter_mut().next().unwrap().position = Vec3::ZERO;

        let targets = targets(&store, SceneMode::Focus, 0);
        assert_eq!(targets[0].position, Vec3::ZERO);
    }

    #[test]
    fn lone_photo_comes_to_the_front() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut store = ParticleStore::new();
        store.create_photo(PhotoImage::new(RgbaImage::new(4, 4)), &mut rng);

        let ctx = FormationContext::snapshot(&store, SceneMode::Focus, 0);
        let update = crate::compute_target(&store.as_slice()[0], 0, &ctx);

        assert_eq!(update.position, Vec3::new(0., 0., 32.));
        assert_eq!(update.scale, Some(Vec3::splat(4.5)));
        assert_eq!(update.rotation, Some(RotationUpdate::SetY(0.)));
    }

    #[test]
    fn second_photo_keeps_first_in_focus() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut store = ParticleStore::new();
        store.create_photo(PhotoImage::new(RgbaImage::new(4, 4)), &mut rng);
        store.create_photo(PhotoImage::new(RgbaImage::new(4, 4)), &mut rng);

        let targets = targets(&store, SceneMode::Focus, 0);
        assert_eq!(targets[0].position, Vec3::new(0., 0., 32.));
        assert_eq!(targets[1].scale, Some(Vec3::splat(0.4)));

        let second = &store.as_slice()[1];
        assert!(approx_eq!(f32, targets[1].position.length(), 45., epsilon = 1e-3));
        assert!(targets[1]
            .position
            .normalize()
            .abs_diff_eq(second.position.normalize(), 1e-5));
    }

    #[test]
    fn focused_photo_sways() {
        let store = store(0, 0, 1);
        let ctx = FormationContext::snapshot(&store, SceneMode::Focus, 157);
        let update = Focus.target(&store.as_slice()[0], 0, &ctx);

        match update.rotation {
            Some(RotationUpdate::SetY(y)) => {
                assert!(approx_eq!(f32, y, 0.2 * 1.57_f32.sin(), epsilon = 1e-5))
            }
            other => panic!("Expected SetY, got {other:?}"),
        }
    }

    #[test]
    fn sway_keeps_moving_on_late_frames() {
        let store = store(0, 0, 1);
        let sway = |frame| {
            let ctx = FormationContext::snapshot(&store, SceneMode::Focus, frame);
            Focus.target(&store.as_slice()[0], 0, &ctx).rotation
        };

        let frame = (1 << 26) + 1;
        assert_ne!(sway(frame), sway(frame + 1));
        assert_eq!(
            sway(frame),
            Some(RotationUpdate::SetY(
                (0.2 * (frame as f64 * 0.01).sin()) as f32
            ))
        );
    }
}
