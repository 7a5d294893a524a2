//! This module forwards window input to the scene as commands.

use bevy::{
    prelude::*,
    window::{FileDragAndDrop, WindowResized},
};
use tinsel_formations::SceneMode;
use tinsel_scene::{PhotoPayload, SceneHandle};
use tracing::{debug, info};

/// The handle used to send commands to the scene.
#[derive(Resource, Clone, Debug)]
pub(crate) struct SceneInput(pub(crate) SceneHandle);

/// Tell the scene how big the window is to begin with.
pub(super) fn send_initial_size(windows: Res<Windows>, input: Res<SceneInput>) {
    if let Some(window) = windows.get_primary() {
        input.0.resize(window.width() as u32, window.height() as u32);
    }
}

/// Forward cursor movement in pixels from the top left of the window.
pub(super) fn forward_cursor(
    mut events: EventReader<CursorMoved>,
    windows: Res<Windows>,
    input: Res<SceneInput>,
) {
    for event in events.iter() {
        // Bevy puts the origin at the bottom left
        let height = windows.get(event.id).map_or(0., |window| window.height());
        input.0.pointer_moved(event.position.x, height - event.position.y);
    }
}

/// Forward presses and releases of the left mouse button.
pub(super) fn forward_mouse_buttons(buttons: Res<Input<MouseButton>>, input: Res<SceneInput>) {
    if buttons.just_pressed(MouseButton::Left) {
        input.0.pointer_pressed();
    }
    if buttons.just_released(MouseButton::Left) {
        input.0.pointer_released();
    }
}

/// `H` toggles the overlay and the number keys jump straight to a mode.
pub(super) fn forward_keys(keys: Res<Input<KeyCode>>, input: Res<SceneInput>) {
    if keys.just_pressed(KeyCode::H) {
        input.0.toggle_overlay();
    }

    for (key, mode) in [
        (KeyCode::Key1, SceneMode::Tree),
        (KeyCode::Key2, SceneMode::Scatter),
        (KeyCode::Key3, SceneMode::Focus),
    ] {
        if keys.just_pressed(key) {
            input.0.set_mode(mode);
        }
    }
}

/// Forward window resizes.
pub(super) fn forward_resizes(mut events: EventReader<WindowResized>, input: Res<SceneInput>) {
    if let Some(event) = events.iter().last() {
        debug!(width = event.width, height = event.height, "Window resized");
        input.0.resize(event.width as u32, event.height as u32);
    }
}

/// Files dropped onto the window get added to the scene as photos.
pub(super) fn forward_dropped_files(
    mut events: EventReader<FileDragAndDrop>,
    input: Res<SceneInput>,
) {
    for event in events.iter() {
        if let FileDragAndDrop::DroppedFile { path_buf, .. } = event {
            info!(?path_buf, "Adding dropped file to the scene");
            input
                .0
                .add_photo_to_scene(PhotoPayload::File(path_buf.clone()));
        }
    }
}
