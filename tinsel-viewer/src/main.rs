//! This crate provides a binary that shows a Tinsel scene in a Bevy window.
//!
//! Click to cycle through the modes, press `H` to hide the overlay, press `1`, `2`, or `3` to jump
//! to a mode, and drop image files onto the window to hang them on the tree.
//!
//! The first command line argument is the path to the RON config file, which defaults to
//! `tinsel.ron` and gets created with the default values if it doesn't exist.

mod bevy_setup;
mod input;
mod renderer;

use self::{
    bevy_setup::{setup, ViewerConfig},
    input::SceneInput,
    renderer::BevyRenderer,
};
use bevy::{log::LogPlugin, prelude::*, window::close_on_esc, DefaultPlugins};
use std::{env, process};
use tinsel_scene::{Scene, SceneConfig};
use tracing::{debug, info, instrument, warn, Level};

/// The scene itself. Only the main thread ever touches it.
struct SceneState(Scene);

/// Systems that send commands to the scene, which must run before the scene ticks.
#[derive(Clone, Debug, Hash, PartialEq, Eq, SystemLabel)]
struct ForwardInput;

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config_path = env::args().nth(1).unwrap_or_else(|| "tinsel.ron".to_string());
    debug!(?config_path);

    let config = SceneConfig::from_file(&config_path);
    run_viewer(config)
}

/// Advance the scene by one frame and draw it into the Bevy world.
fn tick_scene(mut scene: NonSendMut<SceneState>, mut renderer: BevyRenderer) {
    scene.0.tick(&mut renderer);
}

/// Run the viewer with Bevy.
#[instrument(skip_all)]
fn run_viewer(config: SceneConfig) {
    let (scene, handle) = Scene::new(config.clone());

    info!("Starting bevy app");
    App::new()
        .insert_resource(Msaa { samples: 4 })
        .insert_resource(ViewerConfig(config))
        .insert_resource(SceneInput(handle))
        .insert_non_send_resource(SceneState(scene))
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    window: WindowDescriptor {
                        title: "Tinsel".to_string(),
                        ..default()
                    },
                    ..default()
                }),
        )
        .add_startup_system(setup)
        .add_startup_system(input::send_initial_size)
        .add_system_set(
            SystemSet::new()
                .label(ForwardInput)
                .with_system(input::forward_cursor)
                .with_system(input::forward_mouse_buttons)
                .with_system(input::forward_keys)
                .with_system(input::forward_resizes)
                .with_system(input::forward_dropped_files),
        )
        .add_system(tick_scene.after(ForwardInput))
        .add_system(close_on_esc)
        .run();

    // Winit terminates the program after the event loop ends, so we should never get here
    warn!("Winit should have terminated the program when the event loop ended");
    process::exit(255);
}
