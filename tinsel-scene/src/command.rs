//! This module handles the [`SceneCommand`]s that the outside world sends to a running scene, and
//! the cloneable [`SceneHandle`] to send them with.

use tinsel_formations::SceneMode;
use tinsel_particles::PhotoImage;
use tinsel_renderer_trait::Viewport;
use tokio::sync::mpsc;
use tracing::trace;

/// A command for the scene, processed at the start of the next tick in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneCommand {
    /// The pointer has moved to this position in pixels, from the top left of the viewport.
    PointerMoved {
        /// Pixels from the left edge.
        x: f32,

        /// Pixels from the top edge.
        y: f32,
    },

    /// The pointer has been pressed.
    PointerPressed,

    /// The pointer has been released. This advances the mode if it completes a click.
    PointerReleased,

    /// Advance the mode unconditionally.
    Click,

    /// Jump straight to a mode.
    SetMode(SceneMode),

    /// Append a decoded photo to the scene.
    AppendPhoto(PhotoImage),

    /// The viewport has changed size.
    Resize(Viewport),

    /// Show or hide the overlay.
    ToggleOverlay,
}

/// A cheap, cloneable handle that sends [`SceneCommand`]s to a [`Scene`](crate::Scene).
///
/// Sending to a scene that has been dropped does nothing.
#[derive(Clone, Debug)]
pub struct SceneHandle {
    /// The sending half of the scene's inbox.
    tx: mpsc::UnboundedSender<SceneCommand>,
}

impl SceneHandle {
    /// Wrap the sending half of a scene's inbox.
    pub(crate) fn new(tx: mpsc::UnboundedSender<SceneCommand>) -> Self {
        Self { tx }
    }

    /// Send a command, returning whether the scene is still there to receive it.
    pub fn send(&self, command: SceneCommand) -> bool {
        match self.tx.send(command) {
            Ok(()) => true,
            Err(mpsc::error::SendError(command)) => {
                trace!(?command, "Scene has gone away");
                false
            }
        }
    }

    /// Is the scene gone?
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// See [`SceneCommand::PointerMoved`].
    pub fn pointer_moved(&self, x: f32, y: f32) {
        self.send(SceneCommand::PointerMoved { x, y });
    }

    /// See [`SceneCommand::PointerPressed`].
    pub fn pointer_pressed(&self) {
        self.send(SceneCommand::PointerPressed);
    }

    /// See [`SceneCommand::PointerReleased`].
    pub fn pointer_released(&self) {
        self.send(SceneCommand::PointerReleased);
    }

    /// See [`SceneCommand::Click`].
    pub fn click(&self) {
        self.send(SceneCommand::Click);
    }

    /// See [`SceneCommand::SetMode`].
    pub fn set_mode(&self, mode: SceneMode) {
        self.send(SceneCommand::SetMode(mode));
    }

    /// See [`SceneCommand::Resize`].
    pub fn resize(&self, width: u32, height: u32) {
        self.send(SceneCommand::Resize(Viewport { width, height }));
    }

    /// See [`SceneCommand::ToggleOverlay`].
    pub fn toggle_overlay(&self) {
        self.send(SceneCommand::ToggleOverlay);
    }
}
