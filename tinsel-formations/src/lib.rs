//! This crate provides the [`SceneMode`]s, the [`Formation`]s that lay particles out for each
//! mode, and the [`ModeController`] that decides which mode is active.
//!
//! Everything here is pure. A formation only ever looks at one particle, its index, and a
//! [`FormationContext`] snapshot taken once per frame, so it can be tested without a scene.

pub mod formations;
pub mod mode;
pub mod transition;

pub use self::{
    formations::{compute_target, Formation, FormationContext, RotationUpdate, TargetUpdate},
    mode::SceneMode,
    transition::{ModeController, TransitionTable, TransitionTableError},
};
