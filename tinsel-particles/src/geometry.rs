//! This module provides the pure geometry for the candy cane and photo frame particles.
//!
//! Boxes and spheres are simple enough that any renderer can build them itself, but the candy
//! cane is a tube swept along a spline and its stripes have to be baked into the index buffers.

use glam::Vec3;
use std::f32::consts::TAU;

/// The control points of the candy cane spline, from the bottom of the stick to the tip of the
/// hook. All the points lie in the XY plane.
const CANE_CONTROL_POINTS: [Vec3; 4] = [
    Vec3::new(0., 0., 0.),
    Vec3::new(0., 3., 0.),
    Vec3::new(0.5, 3.5, 0.),
    Vec3::new(1.2, 3.3, 0.),
];

/// The radius of the candy cane tube.
const CANE_RADIUS: f32 = 0.15;

/// The number of segments along the length of the candy cane.
const CANE_TUBULAR_SEGMENTS: usize = 20;

/// The number of segments around the circumference of the candy cane.
const CANE_RADIAL_SEGMENTS: usize = 8;

/// How many quads wide each diagonal stripe is.
const STRIPE_WIDTH: usize = 4;

/// The dimensions of a photo particle: a square image panel with a slightly larger box behind it
/// acting as the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoFrameGeometry {
    /// The side length of the square image panel.
    pub panel_size: f32,

    /// The full size of the backing frame box.
    pub frame_size: Vec3,

    /// The offset of the backing frame along the local Z axis, so that it sits behind the panel.
    pub frame_offset_z: f32,
}

impl PhotoFrameGeometry {
    /// The geometry used for every photo particle.
    pub const STANDARD: Self = Self {
        panel_size: 3.,
        frame_size: Vec3::new(3.3, 3.3, 0.2),
        frame_offset_z: -0.15,
    };
}

/// Vertex and index data for the candy cane tube.
///
/// The indices are split into two triangle lists so that a renderer can draw the red and white
/// stripes with two plain materials instead of a texture.
#[derive(Clone, Debug, PartialEq)]
pub struct CandyCaneTube {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub red_indices: Vec<u32>,
    pub white_indices: Vec<u32>,
}

/// Evaluate the centripetal Catmull-Rom spline through `points` at `u` in `[0, 1]`, where 0 is the
/// first point and 1 is the last point.
///
/// The ends of the spline are extended by reflecting the second and penultimate points, so that
/// the curve actually passes through every given point.
pub fn catmull_rom_point(points: &[Vec3], u: f32) -> Vec3 {
    match points {
        [] => Vec3::ZERO,
        [point] => *point,
        [first, second, ..] => {
            let last = points[points.len() - 1];
            let penultimate = points[points.len() - 2];

            let control_points = {
                let mut v = Vec::with_capacity(points.len() + 2);
                v.push(*first + (*first - *second));
                v.extend(points.iter());
                v.push(last + (last - penultimate));
                v
            };

            let segments = points.len() - 1;
            let scaled = u.clamp(0., 1.) * segments as f32;
            let segment = (scaled.floor() as usize).min(segments - 1);
            let t = scaled - segment as f32;

            let [p0, p1, p2, p3] = [
                control_points[segment],
                control_points[segment + 1],
                control_points[segment + 2],
                control_points[segment + 3],
            ];
            interpolate_catmull_rom_segment(p0, p1, p2, p3, t)
        }
    }
}

/// Interpolate a segment of a centripetal Catmull-Rom spline with the 4 given points and the `t`
/// value, which runs from `p1` at 0 to `p2` at 1.
fn interpolate_catmull_rom_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    debug_assert!((0.0..=1.0).contains(&t), "t must be in [0, 1]");

    let t0 = 0.0;
    let t1 = ((p1 - p0).length()).sqrt() + t0;
    let t2 = ((p2 - p1).length()).sqrt() + t1;
    let t3 = ((p3 - p2).length()).sqrt() + t2;

    let t = (t2 - t1).mul_add(t, t1);

    let a1 = p0 * ((t1 - t) / (t1 - t0)) + p1 * ((t - t0) / (t1 - t0));
    let a2 = p1 * ((t2 - t) / (t2 - t1)) + p2 * ((t - t1) / (t2 - t1));
    let a3 = p2 * ((t3 - t) / (t3 - t2)) + p3 * ((t - t2) / (t3 - t2));

    let b1 = a1 * ((t2 - t) / (t2 - t0)) + a2 * ((t - t0) / (t2 - t0));
    let b2 = a2 * ((t3 - t) / (t3 - t1)) + a3 * ((t - t1) / (t3 - t1));

    b1 * ((t2 - t) / (t2 - t1)) + b2 * ((t - t1) / (t2 - t1))
}

/// Build the tube mesh for a candy cane by sweeping a circle along the cane spline.
pub fn candy_cane_tube() -> CandyCaneTube {
    let rings = CANE_TUBULAR_SEGMENTS + 1;
    let ring_size = CANE_RADIAL_SEGMENTS + 1;

    let centres: Vec<Vec3> = (0..rings)
        .map(|i| catmull_rom_point(&CANE_CONTROL_POINTS, i as f32 / CANE_TUBULAR_SEGMENTS as f32))
        .collect();

    let mut positions = Vec::with_capacity(rings * ring_size);
    let mut normals = Vec::with_capacity(rings * ring_size);
    let mut uvs = Vec::with_capacity(rings * ring_size);

    for (i, &centre) in centres.iter().enumerate() {
        let tangent = {
            let before = centres[i.saturating_sub(1)];
            let after = centres[(i + 1).min(rings - 1)];
            (after - before).normalize_or_zero()
        };

        // The spline is planar in XY, so the binormal is always the Z axis and the normal is
        // whatever is perpendicular to both
        let binormal = Vec3::Z;
        let normal = binormal.cross(tangent).normalize_or_zero();

        for j in 0..ring_size {
            let v = j as f32 / CANE_RADIAL_SEGMENTS as f32 * TAU;
            let direction = normal * v.cos() + binormal * v.sin();

            positions.push((centre + direction * CANE_RADIUS).to_array());
            normals.push(direction.to_array());
            uvs.push([i as f32 / CANE_TUBULAR_SEGMENTS as f32, j as f32 / CANE_RADIAL_SEGMENTS as f32]);
        }
    }

    let mut red_indices = vec![];
    let mut white_indices = vec![];

    for i in 0..CANE_TUBULAR_SEGMENTS {
        for j in 0..CANE_RADIAL_SEGMENTS {
            let a = (i * ring_size + j) as u32;
            let b = ((i + 1) * ring_size + j) as u32;
            let c = ((i + 1) * ring_size + j + 1) as u32;
            let d = (i * ring_size + j + 1) as u32;

            // Walking two rings along for every step around gives diagonal stripes
            let indices = if ((2 * i + j) / STRIPE_WIDTH) % 2 == 0 {
                &mut red_indices
            } else {
                &mut white_indices
            };
            indices.extend([a, b, d, b, c, d]);
        }
    }

    CandyCaneTube {
        positions,
        normals,
        uvs,
        red_indices,
        white_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catmull_rom_passes_through_control_points() {
        for (idx, &point) in CANE_CONTROL_POINTS.iter().enumerate() {
            let u = idx as f32 / (CANE_CONTROL_POINTS.len() - 1) as f32;
            let interpolated = catmull_rom_point(&CANE_CONTROL_POINTS, u);
            assert!(
                interpolated.abs_diff_eq(point, 1e-4),
                "{interpolated:?} should be {point:?} at u = {u}"
            );
        }
    }

    #[test]
    fn catmull_rom_degenerate_inputs() {
        assert_eq!(catmull_rom_point(&[], 0.5), Vec3::ZERO);
        assert_eq!(catmull_rom_point(&[Vec3::ONE], 0.5), Vec3::ONE);
    }

    #[test]
    fn candy_cane_tube_shape() {
        let tube = candy_cane_tube();
        let rings = CANE_TUBULAR_SEGMENTS + 1;
        let ring_size = CANE_RADIAL_SEGMENTS + 1;

        assert_eq!(tube.positions.len(), rings * ring_size);
        assert_eq!(tube.normals.len(), tube.positions.len());
        assert_eq!(tube.uvs.len(), tube.positions.len());
        assert_eq!(
            tube.red_indices.len() + tube.white_indices.len(),
            CANE_TUBULAR_SEGMENTS * CANE_RADIAL_SEGMENTS * 6
        );
        assert!(!tube.red_indices.is_empty());
        assert!(!tube.white_indices.is_empty());

        let max_index = (tube.positions.len() - 1) as u32;
        assert!(tube
            .red_indices
            .iter()
            .chain(tube.white_indices.iter())
            .all(|&idx| idx <= max_index));

        // The first ring surrounds the base of the stick
        for position in &tube.positions[..ring_size] {
            let distance = Vec3::from_array(*position).length();
            assert!((distance - CANE_RADIUS).abs() < 1e-4);
        }
    }
}
