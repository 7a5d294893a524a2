//! This module provides the [`GestureService`], which samples a [`VideoFeed`] and runs a
//! [`HandLandmarker`] on every new frame.

use crate::{GestureError, LandmarkResult, VideoFrame};
use futures::stream::{self, LocalBoxStream, StreamExt};
use std::{
    future::Future,
    time::{Duration, Instant},
};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, trace, warn};

/// How often the service checks the feed for a new frame.
pub const DISPLAY_FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// A source of video frames, like a webcam.
pub trait VideoFeed {
    /// The presentation time of the frame the feed is currently showing.
    ///
    /// This only advances when a new frame is available.
    fn current_time(&self) -> Duration;

    /// Grab the frame the feed is currently showing.
    fn current_frame(&mut self) -> Result<VideoFrame, GestureError>;
}

/// Something that can find hand landmarks in a video frame.
pub trait HandLandmarker {
    /// Detect hands in the given frame. The timestamp must increase between calls.
    fn detect_for_video(
        &mut self,
        frame: &VideoFrame,
        timestamp: Duration,
    ) -> Result<LandmarkResult, GestureError>;
}

/// Anything that can produce a stream of landmark results.
pub trait GestureSource {
    /// Start a fresh, lazy, never-ending stream of results.
    ///
    /// Nothing is sampled until the stream is polled, and each call starts from scratch.
    fn samples(&mut self) -> LocalBoxStream<'_, LandmarkResult>;
}

/// Runs a [`HandLandmarker`] on each new frame of a [`VideoFeed`].
#[derive(Debug)]
pub struct GestureService<F, L> {
    /// Where the frames come from.
    feed: F,

    /// What finds the hands.
    landmarker: L,

    /// The feed time of the last frame we sampled.
    last_video_time: Option<Duration>,

    /// When the service was created, so that landmarker timestamps always increase.
    started: Instant,
}

impl<F: VideoFeed, L: HandLandmarker> GestureService<F, L> {
    /// Create a new service from an already initialised feed and landmarker.
    pub fn new(feed: F, landmarker: L) -> Self {
        Self {
            feed,
            landmarker,
            last_video_time: None,
            started: Instant::now(),
        }
    }

    /// Create a new service from a feed that may have failed to initialise.
    ///
    /// A failure is logged and returned so that the caller can carry on without gestures.
    pub fn try_new(feed: Result<F, GestureError>, landmarker: L) -> Result<Self, GestureError> {
        match feed {
            Ok(feed) => {
                info!("Gesture service ready");
                Ok(Self::new(feed, landmarker))
            }
            Err(error) => {
                warn!(%error, "Failed to initialise video feed, not starting gesture detection");
                Err(error)
            }
        }
    }

    /// Sample the feed, returning the landmarks if the feed has a new frame.
    fn sample(&mut self) -> Result<Option<LandmarkResult>, GestureError> {
        let video_time = self.feed.current_time();
        if self.last_video_time == Some(video_time) {
            trace!(?video_time, "Video time has not advanced, skipping");
            return Ok(None);
        }
        self.last_video_time = Some(video_time);

        let frame = self.feed.current_frame()?;
        let result = self
            .landmarker
            .detect_for_video(&frame, self.started.elapsed())?;

        debug!(?video_time, hands = result.hands.len(), "Detected landmarks");
        Ok(Some(result))
    }

    /// Run detection once if the feed has a new frame, passing the result to the callback.
    ///
    /// Returns whether detection ran.
    pub fn detect_once(
        &mut self,
        callback: &mut impl FnMut(LandmarkResult),
    ) -> Result<bool, GestureError> {
        match self.sample()? {
            Some(result) => {
                callback(result);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Call [`detect_once`](Self::detect_once) every display frame until `kill` resolves.
    ///
    /// Errors are logged and detection carries on with the next frame.
    #[instrument(skip_all)]
    pub async fn run<K>(&mut self, mut callback: impl FnMut(LandmarkResult), kill: K)
    where
        K: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(DISPLAY_FRAME_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(kill);

        loop {
            tokio::select! {
                biased;

                _ = &mut kill => {
                    info!("Stopping gesture detection");
                    return;
                }

                _ = interval.tick() => {
                    if let Err(error) = self.detect_once(&mut callback) {
                        warn!(%error, "Gesture detection failed");
                    }
                }
            }
        }
    }
}

impl<F: VideoFeed, L: HandLandmarker> GestureSource for GestureService<F, L> {
    fn samples(&mut self) -> LocalBoxStream<'_, LandmarkResult> {
        self.last_video_time = None;

        stream::unfold((self, None), |(service, interval)| async move {
            let mut interval = interval.unwrap_or_else(|| {
                let mut interval = tokio::time::interval(DISPLAY_FRAME_PERIOD);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                interval
            });

            loop {
                interval.tick().await;

                match service.sample() {
                    Ok(Some(result)) => return Some((result, (service, Some(interval)))),
                    Ok(None) => continue,
                    Err(error) => warn!(%error, "Gesture detection failed"),
                }
            }
        })
        .boxed_local()
    }
}
