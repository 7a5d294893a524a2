//! This module contains the [`Tree`] formation.

use super::{phase, proportion, Formation, FormationContext, TargetUpdate};
use glam::Vec3;
use std::f32::consts::PI;
use tinsel_particles::{Particle, ParticleKind};

/// The radius of the spiral at the base of the tree.
const BASE_RADIUS: f32 = 15.;

/// The total height of the tree.
const HEIGHT: f32 = 30.;

/// How many radians the spiral turns through from the base to the tip.
const TOTAL_ANGLE: f32 = 50. * PI;

/// The radius of the dust helix around the tree.
const DUST_RADIUS: f32 = 18.;

/// The height of the dust helix.
const DUST_HEIGHT: f32 = 40.;

/// How far outside the spiral the photos hang.
const PHOTO_OFFSET: f32 = 2.;

/// The reciprocal of the golden ratio, used to spread photos evenly up the tree.
const INVERSE_GOLDEN_RATIO: f32 = 0.618_034;

/// The default formation: main particles wind up a cone-shaped spiral, dust swirls around it in a
/// slowly rotating helix, and photos hang just outside the branches.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tree;

/// The point on the tree spiral at proportion `t` of the way up, pushed `offset` units outwards.
fn spiral_point(t: f32, offset: f32) -> Vec3 {
    let radius = BASE_RADIUS * (1. - t) + offset;
    let angle = t * TOTAL_ANGLE;
    Vec3::new(
        radius * angle.cos(),
        HEIGHT * t - HEIGHT / 2.,
        radius * angle.sin(),
    )
}

impl Formation for Tree {
    fn target(&self, particle: &Particle, index: usize, ctx: &FormationContext) -> TargetUpdate {
        match particle.kind() {
            ParticleKind::Dust => {
                let (sin, cos) = phase(ctx.frame, 0.005, index as f64 * 0.05).sin_cos();
                TargetUpdate {
                    position: Vec3::new(
                        DUST_RADIUS * cos as f32,
                        proportion(index, ctx.dust_count) * DUST_HEIGHT - DUST_HEIGHT / 2.,
                        DUST_RADIUS * sin as f32,
                    ),
                    scale: None,
                    rotation: None,
                }
            }
            ParticleKind::Photo => {
                let t = (0.5 + particle.kind_index() as f32 * INVERSE_GOLDEN_RATIO).fract();
                TargetUpdate::at(spiral_point(t, PHOTO_OFFSET))
            }
            ParticleKind::Box | ParticleKind::Sphere | ParticleKind::Cane => {
                TargetUpdate::at(spiral_point(proportion(index, ctx.main_count), 0.))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        formations::test_utils::{store, targets},
        SceneMode,
    };
    use float_cmp::approx_eq;

    #[test]
    fn main_spiral_narrows_and_climbs() {
        let store = store(1500, 0, 0);
        let targets = targets(&store, SceneMode::Tree, 0);

        let radius = |v: Vec3| (v.x * v.x + v.z * v.z).sqrt();

        for (index, pair) in targets.windows(2).enumerate() {
            let (this, next) = (pair[0].position, pair[1].position);

            assert!(
                radius(next) <= radius(this) + 1e-4,
                "radius should not increase at index {index}"
            );
            assert!(next.y >= this.y, "height should not decrease at index {index}");
        }

        for (index, target) in targets.iter().enumerate() {
            let t = index as f32 / 1500.;
            assert!(approx_eq!(f32, radius(target.position), 15. * (1. - t), epsilon = 1e-3));
            assert!(approx_eq!(f32, target.position.y, 30. * t - 15., epsilon = 1e-4));
            assert_eq!(target.scale, Some(Vec3::ONE));
            assert_eq!(target.rotation, None);
        }

        assert!(targets[0].position.abs_diff_eq(Vec3::new(15., -15., 0.), 1e-5));
    }

    #[test]
    fn dust_swirls_with_the_frame() {
        let store = store(10, 20, 0);

        let at_zero = targets(&store, SceneMode::Tree, 0);
        let at_hundred = targets(&store, SceneMode::Tree, 100);

        for index in 10..30 {
            let angle = index as f32 * 0.05;
            let expected_y = index as f32 / 20. * 40. - 20.;
            let expected = Vec3::new(18. * angle.cos(), expected_y, 18. * angle.sin());

            assert!(at_zero[index].position.abs_diff_eq(expected, 1e-4));
            assert_eq!(at_zero[index].scale, None);

            let moved = at_hundred[index].position;
            assert!(approx_eq!(f32, moved.y, expected_y, epsilon = 1e-4));
            assert!(approx_eq!(
                f32,
                (moved.x * moved.x + moved.z * moved.z).sqrt(),
                18.,
                epsilon = 1e-3
            ));
            assert!(!moved.abs_diff_eq(expected, 1e-2), "dust should have rotated");
        }
    }

    #[test]
    fn dust_keeps_swirling_on_late_frames() {
        let store = store(0, 5, 0);
        let frame = (1 << 26) + 1;

        let before = targets(&store, SceneMode::Tree, frame);
        let after = targets(&store, SceneMode::Tree, frame + 1);

        for (before, after) in before.iter().zip(&after) {
            let step = before.position.distance(after.position);
            // One frame moves 0.005 radians around a circle of radius 18
            assert!(approx_eq!(f32, step, 18. * 0.005, epsilon = 1e-4), "step {step}");
        }
    }

    #[test]
    fn photos_hang_outside_the_spiral() {
        let store = store(100, 0, 5);
        let targets = targets(&store, SceneMode::Tree, 0);

        for target in &targets[100..] {
            let position = target.position;
            let t = (position.y + 15.) / 30.;
            let radius = (position.x * position.x + position.z * position.z).sqrt();

            assert!((0. ..1.).contains(&t));
            assert!(approx_eq!(f32, radius, 15. * (1. - t) + 2., epsilon = 1e-3));
            assert!(radius > 0.);
            assert_eq!(target.scale, Some(Vec3::ONE));
        }
    }
}
