//! This crate provides the [`Scene`], which owns every particle and advances the animation, along
//! with the [`SceneHandle`] used to talk to it and [`run_animation_loop`] to drive it on tokio.

pub mod command;
pub mod config;
pub mod photo;
pub mod pointer;
pub mod run_loop;
pub mod scene;

pub use self::{
    command::{SceneCommand, SceneHandle},
    config::{ConfigError, SceneConfig},
    photo::{decode_payload, placeholder_photo, PhotoError, PhotoPayload},
    run_loop::run_animation_loop,
    scene::Scene,
};

/// Get a new RNG, seeded from entropy normally, but seeded with a fixed value under test or when
/// benchmarking, so that particle placement is reproducible.
macro_rules! rng {
    () => {{
        use ::rand::{rngs::StdRng, SeedableRng};

        cfg_if::cfg_if! {
            if #[cfg(any(test, feature = "bench"))] {
                StdRng::seed_from_u64(12345)
            } else {
                StdRng::from_entropy()
            }
        }
    }};
}

pub(crate) use rng;
