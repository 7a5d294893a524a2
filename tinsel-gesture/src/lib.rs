//! This crate provides the [`GestureService`], which samples a video feed once per display frame
//! and passes new frames to a hand landmark detector.
//!
//! The detector itself lives outside this crate behind the [`HandLandmarker`] trait. Nothing in
//! the scene depends on this crate, so gestures are purely opt-in.

#[cfg(feature = "camera")]
pub mod camera;
mod error;
pub mod service;
pub mod types;

pub use self::{
    error::GestureError,
    service::{GestureService, GestureSource, HandLandmarker, VideoFeed},
    types::{
        Delegate, HandLandmarkerOptions, HandLandmarks, Landmark, LandmarkResult, RunningMode,
        VideoFrame,
    },
};
