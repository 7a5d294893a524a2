//! This module handles things to setup bevy for the viewer.

use bevy::{
    core_pipeline::bloom::BloomSettings,
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
};
use std::f32::consts::PI;
use tinsel_particles::{candy_cane_tube, CandyCaneTube, PhotoFrameGeometry, PhotoImage, RGBArray};
use tinsel_scene::SceneConfig;
use tracing::debug;

/// Bloom scale per unit of configured bloom radius.
const BLOOM_SCALE_PER_RADIUS: f32 = 2.5;

/// The brightness of the warm light in the middle of the tree.
const POINT_LIGHT_INTENSITY: f32 = 16_000.;

/// The brightness of the gold key spotlight.
const GOLD_SPOT_INTENSITY: f32 = 1_200_000.;

/// The brightness of the blue rim spotlight.
const BLUE_SPOT_INTENSITY: f32 = 600_000.;

/// The scene config, shared with every system that needs it.
#[derive(Resource, Clone, Debug)]
pub(crate) struct ViewerConfig(pub(crate) SceneConfig);

/// The entity that every particle is a child of, so that the pointer parallax can rotate them all
/// at once.
#[derive(Resource, Clone, Copy, Debug)]
pub(crate) struct MainGroup(pub(crate) Entity);

/// The meshes and materials shared between particles.
#[derive(Resource, Clone, Debug)]
pub(crate) struct ParticleAssets {
    pub(crate) box_mesh: Handle<Mesh>,
    pub(crate) sphere_mesh: Handle<Mesh>,
    pub(crate) dust_mesh: Handle<Mesh>,
    pub(crate) cane_red_mesh: Handle<Mesh>,
    pub(crate) cane_white_mesh: Handle<Mesh>,
    pub(crate) photo_panel_mesh: Handle<Mesh>,
    pub(crate) photo_frame_mesh: Handle<Mesh>,

    pub(crate) gold: Handle<StandardMaterial>,
    pub(crate) green: Handle<StandardMaterial>,
    pub(crate) red: Handle<StandardMaterial>,
    pub(crate) white: Handle<StandardMaterial>,
    pub(crate) cream: Handle<StandardMaterial>,
    pub(crate) frame_gold: Handle<StandardMaterial>,

    /// The offset of the photo frame behind the photo.
    pub(crate) frame_offset_z: f32,
}

/// Turn a palette colour into a Bevy colour.
fn colour([r, g, b]: RGBArray) -> Color {
    Color::rgb_u8(r, g, b)
}

/// Build one stripe of the candy cane tube as a Bevy mesh.
fn cane_stripe_mesh(tube: &CandyCaneTube, indices: &[u32]) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, tube.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, tube.normals.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, tube.uvs.clone());
    mesh.set_indices(Some(Indices::U32(indices.to_vec())));
    mesh
}

/// Turn a photo into a texture.
pub(crate) fn photo_texture(photo: &PhotoImage) -> Image {
    Image::new(
        Extent3d {
            width: photo.width(),
            height: photo.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        photo.image().as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
    )
}

/// Setup the Bevy world with a camera, lights, the main group, and the shared particle assets.
pub(super) fn setup(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = &config.0;
    let palette = &config.palette;

    commands.insert_resource(ClearColor(colour(palette.background)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.6,
    });

    let [x, y, z] = config.camera.position;
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            projection: Projection::Perspective(PerspectiveProjection {
                fov: config.camera.fov_degrees.to_radians(),
                near: config.camera.near,
                far: config.camera.far,
                ..default()
            }),
            transform: Transform::from_xyz(x, y, z).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        BloomSettings {
            intensity: config.bloom.strength,
            threshold: config.bloom.threshold,
            scale: config.bloom.radius * BLOOM_SCALE_PER_RADIUS,
            ..default()
        },
    ));

    // Lights
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            color: colour(palette.orange),
            intensity: POINT_LIGHT_INTENSITY,
            range: 50.,
            ..default()
        },
        transform: Transform::from_xyz(0., 5., 0.),
        ..default()
    });
    commands.spawn(SpotLightBundle {
        spot_light: SpotLight {
            color: colour(palette.gold),
            intensity: GOLD_SPOT_INTENSITY,
            range: 200.,
            outer_angle: PI / 6.,
            ..default()
        },
        transform: Transform::from_xyz(30., 40., 40.).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
    commands.spawn(SpotLightBundle {
        spot_light: SpotLight {
            color: colour(palette.blue),
            intensity: BLUE_SPOT_INTENSITY,
            range: 200.,
            outer_angle: PI / 6.,
            ..default()
        },
        transform: Transform::from_xyz(-30., 20., -30.).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    let group = commands.spawn(SpatialBundle::default()).id();
    commands.insert_resource(MainGroup(group));

    debug!("Building particle assets");
    let tube = candy_cane_tube();
    let frame = PhotoFrameGeometry::STANDARD;

    commands.insert_resource(ParticleAssets {
        box_mesh: meshes.add(Mesh::from(shape::Box::new(0.8, 0.8, 0.8))),
        sphere_mesh: meshes.add(Mesh::from(shape::UVSphere {
            radius: 0.5,
            sectors: 32,
            stacks: 32,
        })),
        dust_mesh: meshes.add(Mesh::from(shape::UVSphere {
            radius: 0.05,
            sectors: 4,
            stacks: 4,
        })),
        cane_red_mesh: meshes.add(cane_stripe_mesh(&tube, &tube.red_indices)),
        cane_white_mesh: meshes.add(cane_stripe_mesh(&tube, &tube.white_indices)),
        photo_panel_mesh: meshes.add(Mesh::from(shape::Quad::new(Vec2::splat(
            frame.panel_size,
        )))),
        photo_frame_mesh: meshes.add(Mesh::from(shape::Box::new(
            frame.frame_size.x,
            frame.frame_size.y,
            frame.frame_size.z,
        ))),

        gold: materials.add(StandardMaterial {
            base_color: colour(palette.gold),
            metallic: 0.9,
            perceptual_roughness: 0.1,
            ..default()
        }),
        green: materials.add(StandardMaterial {
            base_color: colour(palette.dark_green),
            metallic: 0.3,
            perceptual_roughness: 0.8,
            ..default()
        }),
        red: materials.add(StandardMaterial {
            base_color: colour(palette.red),
            metallic: 0.2,
            perceptual_roughness: 0.1,
            ..default()
        }),
        white: materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.4,
            ..default()
        }),
        cream: materials.add(StandardMaterial {
            base_color: colour(palette.cream),
            unlit: true,
            ..default()
        }),
        frame_gold: materials.add(StandardMaterial {
            base_color: colour(palette.gold),
            metallic: 0.8,
            perceptual_roughness: 0.2,
            ..default()
        }),

        frame_offset_z: frame.frame_offset_z,
    });
}
