//! This module provides [`run_animation_loop`] to tick a scene at its configured frame rate until
//! told to stop.

use crate::Scene;
use std::{future::Future, time::Duration};
use tinsel_renderer_trait::Renderer;
use tokio::time::MissedTickBehavior;
use tracing::{info, instrument};

/// Tick the scene at `frames_per_second` until `kill` resolves or `max_frames` ticks have run,
/// then tear down the renderer. Returns the number of ticks that ran.
///
/// Late ticks are skipped rather than bunched up, so a slow renderer just lowers the frame rate.
#[instrument(skip_all, fields(max_frames = ?max_frames))]
pub async fn run_animation_loop<R, K>(
    scene: &mut Scene,
    renderer: &mut R,
    kill: K,
    max_frames: Option<u64>,
) -> u64
where
    R: Renderer + ?Sized,
    K: Future<Output = ()>,
{
    let fps = scene.config().frames_per_second.max(1);
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1. / fps as f64));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(kill);

    info!(fps, "Beginning animation loop");

    let mut ticks = 0;
    loop {
        if max_frames.is_some_and(|max| ticks >= max) {
            info!(ticks, "Reached frame limit");
            break;
        }

        tokio::select! {
            biased;

            _ = &mut kill => {
                info!(ticks, "Animation loop killed");
                break;
            }

            _ = interval.tick() => {
                scene.tick(renderer);
                ticks += 1;
            }
        }
    }

    renderer.teardown();
    ticks
}
