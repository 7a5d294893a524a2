//! This module contains the plain data types that flow through the gesture service.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// The default location of the hand landmarker model.
pub const DEFAULT_MODEL_ASSET_PATH: &str = "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/1/hand_landmarker.task";

/// The default location of the vision tasks runtime files.
pub const DEFAULT_VISION_TASKS_PATH: &str =
    "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@0.10.3/wasm";

/// A single landmark on a hand, in normalised image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// From 0 at the left edge to 1 at the right edge.
    pub x: f32,

    /// From 0 at the top edge to 1 at the bottom edge.
    pub y: f32,

    /// Depth relative to the wrist. Smaller is closer to the camera.
    pub z: f32,
}

/// All the landmarks for one detected hand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    /// The landmarks, in the order the model defines them.
    pub landmarks: Vec<Landmark>,

    /// Which hand the model thinks this is, if it said.
    pub handedness: Option<String>,
}

/// The raw output of one run of the hand landmarker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkResult {
    /// Every hand that was detected. Usually empty or one hand.
    pub hands: Vec<HandLandmarks>,

    /// The timestamp passed to the landmarker for this result.
    pub timestamp: Duration,
}

/// A single frame from a [`VideoFeed`](crate::VideoFeed).
#[derive(Clone, PartialEq)]
pub struct VideoFrame {
    /// The presentation time of this frame within the feed.
    pub timestamp: Duration,

    /// The pixels.
    pub image: RgbImage,
}

impl fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoFrame")
            .field("timestamp", &self.timestamp)
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("image", &..)
            .finish()
    }
}

/// Where inference should run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delegate {
    /// Run on the CPU.
    Cpu,

    /// Run on the GPU where one is available.
    #[default]
    Gpu,
}

/// What kind of input the landmarker should expect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunningMode {
    /// Independent still images.
    Image,

    /// Consecutive frames of a video, with increasing timestamps.
    #[default]
    Video,
}

/// Options for creating a hand landmarker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandLandmarkerOptions {
    /// Where to load the model from.
    pub model_asset_path: String,

    /// Where to load the vision tasks runtime from.
    pub vision_tasks_path: String,

    /// See [`Delegate`].
    pub delegate: Delegate,

    /// See [`RunningMode`].
    pub running_mode: RunningMode,

    /// The most hands to detect at once.
    pub num_hands: usize,
}

impl Default for HandLandmarkerOptions {
    fn default() -> Self {
        Self {
            model_asset_path: DEFAULT_MODEL_ASSET_PATH.to_string(),
            vision_tasks_path: DEFAULT_VISION_TASKS_PATH.to_string(),
            delegate: Delegate::Gpu,
            running_mode: RunningMode::Video,
            num_hands: 1,
        }
    }
}
