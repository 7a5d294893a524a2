use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use std::hint::black_box;
use strum::IntoEnumIterator;
use tinsel_formations::SceneMode;
use tinsel_particles::Particle;
use tinsel_renderer_trait::{Renderer, SceneFrame};
use tinsel_scene::{Scene, SceneConfig};

/// How many frames to run in each benchmark iteration.
const FRAMES_PER_ITER: u32 = 10;

struct SimpleRenderer;

impl Renderer for SimpleRenderer {
    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        // Do nothing, but don't optimise this away
        black_box(frame);
    }
}

/// Copies every transform out of the frame, like a renderer that uploads instance data would.
struct CopyTransformsRenderer {
    transforms: Vec<(Vec3, Vec3, Vec3)>,
}

impl Renderer for CopyTransformsRenderer {
    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        self.transforms.clear();
        self.transforms.extend(
            frame
                .particles
                .iter()
                .map(|p: &Particle| (p.position, p.rotation, p.scale)),
        );
    }
}

/// Create a scene that has already been switched into the given mode.
fn scene_in_mode(mode: SceneMode) -> Scene {
    let (mut scene, handle) = Scene::new(SceneConfig::default());
    handle.set_mode(mode);
    scene.tick(&mut SimpleRenderer);
    scene
}

fn scene_ticks(c: &mut Criterion) {
    for mode in SceneMode::iter() {
        c.bench_function(&format!("(SimpleRenderer) {mode}"), |b| {
            let mut scene = scene_in_mode(mode);
            let mut renderer = SimpleRenderer;

            b.iter(|| {
                for _ in 0..FRAMES_PER_ITER {
                    scene.tick(&mut renderer);
                }
            });
        });
        c.bench_function(&format!("(CopyTransformsRenderer) {mode}"), |b| {
            let mut scene = scene_in_mode(mode);
            let mut renderer = CopyTransformsRenderer {
                transforms: Vec::with_capacity(scene.store().len()),
            };

            b.iter(|| {
                for _ in 0..FRAMES_PER_ITER {
                    scene.tick(&mut renderer);
                }
            });
        });
    }
}

criterion_group! { scene, scene_ticks }
criterion_main! { scene }
