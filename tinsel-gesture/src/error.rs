//! This module contains the [`GestureError`] type.

use thiserror::Error;

/// An error that can be returned by the gesture service or anything it talks to.
#[derive(Debug, Error)]
pub enum GestureError {
    /// There is no camera on this device.
    #[error("No camera found")]
    NoCamera,

    /// The camera exists but we weren't allowed to use it.
    #[error("Permission to use the camera was denied")]
    PermissionDenied,

    /// The camera misbehaved.
    #[error("Camera error: {0}")]
    Camera(String),

    /// The landmarker failed to load or to run.
    #[error("Hand landmarker error: {0}")]
    Landmarker(String),
}
