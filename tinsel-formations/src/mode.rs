//! This module handles the [`SceneMode`] enum.

use crate::formations::{focus::Focus, scatter::Scatter, tree::Tree, Formation};
use serde::{Deserialize, Serialize};

/// The formation that the whole scene is currently arranged in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SceneMode {
    /// See [`Tree`].
    #[default]
    Tree,

    /// See [`Scatter`].
    Scatter,

    /// See [`Focus`].
    Focus,
}

impl SceneMode {
    /// Return the formation that lays particles out for this mode.
    pub fn formation(self) -> &'static dyn Formation {
        match self {
            Self::Tree => &Tree,
            Self::Scatter => &Scatter,
            Self::Focus => &Focus,
        }
    }
}
