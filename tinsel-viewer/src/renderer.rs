//! This module provides the [`Renderer`] implementation that mirrors the scene into the Bevy world.

use crate::bevy_setup::{photo_texture, MainGroup, ParticleAssets};
use bevy::{ecs::system::SystemParam, prelude::*};
use tinsel_particles::{BoxMaterial, Particle, PhotoImage, Primitive, SphereMaterial};
use tinsel_renderer_trait::{Renderer, SceneFrame, Viewport};
use tracing::{debug, instrument, trace};

/// The title of the window when the overlay is hidden.
const BASE_TITLE: &str = "Tinsel";

/// Convert our glam vector into Bevy's glam vector.
fn bevy_vec3(v: glam::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

/// The Bevy transform for a particle in the coordinate space of the main group.
fn particle_transform(particle: &Particle) -> Transform {
    let rotation = particle.rotation;
    Transform {
        translation: bevy_vec3(particle.position),
        rotation: Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z),
        scale: bevy_vec3(particle.scale),
    }
}

/// The window title that shows the overlay state.
fn hud_title(frame: &SceneFrame<'_>) -> String {
    match (frame.overlay.hidden, frame.overlay.loading) {
        (true, _) => BASE_TITLE.to_string(),
        (false, true) => format!("{BASE_TITLE} - loading..."),
        (false, false) => format!(
            "{BASE_TITLE} - {} - {} photos (click to change mode, H to hide)",
            frame.mode,
            frame
                .particles
                .iter()
                .filter(|particle| matches!(particle.primitive(), Primitive::Photo(_)))
                .count()
        ),
    }
}

/// Everything the renderer needs from the Bevy world to draw a frame.
#[derive(SystemParam)]
pub(crate) struct BevyRenderer<'w, 's> {
    commands: Commands<'w, 's>,
    assets: Res<'w, ParticleAssets>,
    group: Res<'w, MainGroup>,
    images: ResMut<'w, Assets<Image>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    transforms: Query<'w, 's, &'static mut Transform>,
    projections: Query<'w, 's, &'static mut Projection, With<Camera3d>>,
    windows: ResMut<'w, Windows>,

    /// The entity for each particle, in store order.
    spawned: Local<'s, Vec<Entity>>,

    /// The last title given to the window, so we only set it when it changes.
    title: Local<'s, String>,
}

impl BevyRenderer<'_, '_> {
    /// Spawn a mesh as a child of the given entity.
    fn spawn_mesh_child(
        &mut self,
        parent: Entity,
        mesh: Handle<Mesh>,
        material: Handle<StandardMaterial>,
        transform: Transform,
    ) {
        let child = self
            .commands
            .spawn(PbrBundle {
                mesh,
                material,
                transform,
                ..default()
            })
            .id();
        self.commands.entity(parent).add_child(child);
    }

    /// Spawn the entities for a photo: an unlit image panel with a gold frame behind it.
    fn spawn_photo(&mut self, entity: Entity, photo: &PhotoImage) {
        let texture = self.images.add(photo_texture(photo));
        let material = self.materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        });

        let panel_mesh = self.assets.photo_panel_mesh.clone();
        let frame_mesh = self.assets.photo_frame_mesh.clone();
        let frame_gold = self.assets.frame_gold.clone();
        let frame_offset = Transform::from_xyz(0., 0., self.assets.frame_offset_z);

        self.spawn_mesh_child(entity, panel_mesh, material, Transform::IDENTITY);
        self.spawn_mesh_child(entity, frame_mesh, frame_gold, frame_offset);
    }

    /// Spawn the entity for a particle as a child of the main group.
    fn spawn_particle(&mut self, particle: &Particle) -> Entity {
        let transform = particle_transform(particle);
        let assets = &self.assets;

        let single_mesh = match particle.primitive() {
            Primitive::Box(BoxMaterial::Gold) => {
                Some((assets.box_mesh.clone(), assets.gold.clone()))
            }
            Primitive::Box(BoxMaterial::Green) => {
                Some((assets.box_mesh.clone(), assets.green.clone()))
            }
            Primitive::Sphere(SphereMaterial::Gold) => {
                Some((assets.sphere_mesh.clone(), assets.gold.clone()))
            }
            Primitive::Sphere(SphereMaterial::Red) => {
                Some((assets.sphere_mesh.clone(), assets.red.clone()))
            }
            Primitive::Dust => Some((assets.dust_mesh.clone(), assets.cream.clone())),
            Primitive::CandyCane | Primitive::Photo(_) => None,
        };

        let entity = match single_mesh {
            Some((mesh, material)) => self
                .commands
                .spawn(PbrBundle {
                    mesh,
                    material,
                    transform,
                    ..default()
                })
                .id(),
            None => {
                let entity = self
                    .commands
                    .spawn(SpatialBundle::from_transform(transform))
                    .id();

                match particle.primitive() {
                    Primitive::Photo(photo) => self.spawn_photo(entity, photo),
                    _ => {
                        let red_mesh = self.assets.cane_red_mesh.clone();
                        let red = self.assets.red.clone();
                        let white_mesh = self.assets.cane_white_mesh.clone();
                        let white = self.assets.white.clone();

                        self.spawn_mesh_child(entity, red_mesh, red, Transform::IDENTITY);
                        self.spawn_mesh_child(entity, white_mesh, white, Transform::IDENTITY);
                    }
                }

                entity
            }
        };

        self.commands.entity(self.group.0).add_child(entity);
        entity
    }

    /// Update the window title if the overlay has changed.
    fn update_title(&mut self, frame: &SceneFrame<'_>) {
        let title = hud_title(frame);
        if *self.title == title {
            return;
        }

        if let Some(window) = self.windows.get_primary_mut() {
            window.set_title(title.clone());
        }
        *self.title = title;
    }
}

impl Renderer for BevyRenderer<'_, '_> {
    #[instrument(skip_all, fields(frame = frame.frame))]
    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        // Particles are only ever appended, so anything past the end of `spawned` is new
        let new_particles = &frame.particles[self.spawned.len().min(frame.particles.len())..];
        if !new_particles.is_empty() {
            debug!(count = new_particles.len(), "Spawning new particles");
        }
        for particle in new_particles {
            let entity = self.spawn_particle(particle);
            self.spawned.push(entity);
        }

        for (particle, &entity) in frame.particles.iter().zip(self.spawned.iter()) {
            // Entities spawned this frame don't exist in the world yet, but they were spawned
            // with the right transform anyway
            if let Ok(mut transform) = self.transforms.get_mut(entity) {
                *transform = particle_transform(particle);
            }
        }

        if let Ok(mut transform) = self.transforms.get_mut(self.group.0) {
            let rotation = frame.group_rotation;
            transform.rotation = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
        }

        self.update_title(frame);
        trace!(mode = %frame.mode, "Rendered frame");
    }

    fn resize(&mut self, viewport: Viewport) {
        let aspect_ratio = viewport.aspect_ratio();
        debug!(?viewport, aspect_ratio, "Viewport resized");

        for mut projection in &mut self.projections {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.aspect_ratio = aspect_ratio;
            }
        }
    }
}
