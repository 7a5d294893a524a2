//! This module provides [`CameraFeed`], a [`VideoFeed`] backed by a real webcam through `nokhwa`.

use crate::{GestureError, VideoFeed, VideoFrame};
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType},
    Camera, NokhwaError,
};
use std::{
    fmt,
    time::{Duration, Instant},
};
use tracing::{info, instrument};

/// Turn a `nokhwa` error into a [`GestureError`].
fn camera_error(error: NokhwaError) -> GestureError {
    let message = error.to_string();
    if message.to_lowercase().contains("permission") {
        GestureError::PermissionDenied
    } else {
        GestureError::Camera(message)
    }
}

/// A webcam feed.
pub struct CameraFeed {
    /// The open camera.
    camera: Camera,

    /// When the stream was opened.
    started: Instant,

    /// The time between frames at the camera's frame rate.
    frame_period: Duration,
}

impl fmt::Debug for CameraFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraFeed")
            .field("camera", self.camera.index())
            .field("started", &self.started)
            .field("frame_period", &self.frame_period)
            .finish()
    }
}

impl CameraFeed {
    /// Open the first camera on this device and start streaming from it.
    #[instrument]
    pub fn open() -> Result<Self, GestureError> {
        nokhwa::nokhwa_initialize(|_| {});

        let first = nokhwa::query(ApiBackend::Auto)
            .map_err(camera_error)?
            .into_iter()
            .next()
            .ok_or(GestureError::NoCamera)?;

        let index: CameraIndex = first.index().clone();
        let mut camera = Camera::new(
            index,
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate),
        )
        .map_err(camera_error)?;
        camera.open_stream().map_err(camera_error)?;

        let fps = camera.frame_rate().max(1);
        info!(idx = ?camera.index(), fps, "Opened camera");

        Ok(Self {
            camera,
            started: Instant::now(),
            frame_period: Duration::from_micros(1_000_000 / fps as u64),
        })
    }
}

impl VideoFeed for CameraFeed {
    fn current_time(&self) -> Duration {
        let period = self.frame_period.as_nanos().max(1);
        let frames = self.started.elapsed().as_nanos() / period;
        Duration::from_nanos((frames * period) as u64)
    }

    fn current_frame(&mut self) -> Result<VideoFrame, GestureError> {
        let buffer = self.camera.frame().map_err(camera_error)?;
        let image = buffer.decode_image::<RgbFormat>().map_err(camera_error)?;

        Ok(VideoFrame {
            timestamp: self.current_time(),
            image,
        })
    }
}
