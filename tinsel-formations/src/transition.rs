//! This module handles the [`TransitionTable`] and the [`ModeController`] that follows it.

use crate::SceneMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{info, instrument};

/// An error that can be returned when building a [`TransitionTable`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TransitionTableError {
    /// A mode has nowhere to go.
    #[error("Mode {0} has no successor")]
    MissingSuccessor(SceneMode),

    /// A mode was given two different successors.
    #[error("Mode {mode} has two successors: {first} and {second}")]
    DuplicateSuccessor {
        /// The mode with two successors.
        mode: SceneMode,

        /// The successor that was given first.
        first: SceneMode,

        /// The successor that was given second.
        second: SceneMode,
    },
}

/// A validated map from each [`SceneMode`] to the mode that a click advances it to.
///
/// Every mode has exactly one successor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<(SceneMode, SceneMode)>",
    into = "Vec<(SceneMode, SceneMode)>"
)]
pub struct TransitionTable(BTreeMap<SceneMode, SceneMode>);

impl TransitionTable {
    /// Build a table from a list of `(from, to)` pairs.
    ///
    /// Repeating the exact same pair is harmless, but giving a mode two different successors or
    /// leaving any mode out is an error.
    pub fn new(
        pairs: impl IntoIterator<Item = (SceneMode, SceneMode)>,
    ) -> Result<Self, TransitionTableError> {
        let mut map = BTreeMap::new();

        for (from, to) in pairs {
            if let Some(&first) = map.get(&from) {
                if first != to {
                    return Err(TransitionTableError::DuplicateSuccessor {
                        mode: from,
                        first,
                        second: to,
                    });
                }
            }
            map.insert(from, to);
        }

        if let Some(missing) = SceneMode::iter().find(|mode| !map.contains_key(mode)) {
            return Err(TransitionTableError::MissingSuccessor(missing));
        }

        Ok(Self(map))
    }

    /// The mode that comes after `mode`.
    pub fn successor(&self, mode: SceneMode) -> SceneMode {
        // Totality is checked in `new`, but fall back to staying put rather than panicking
        self.0.get(&mode).copied().unwrap_or(mode)
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self(BTreeMap::from([
            (SceneMode::Tree, SceneMode::Scatter),
            (SceneMode::Scatter, SceneMode::Focus),
            (SceneMode::Focus, SceneMode::Tree),
        ]))
    }
}

impl TryFrom<Vec<(SceneMode, SceneMode)>> for TransitionTable {
    type Error = TransitionTableError;

    fn try_from(pairs: Vec<(SceneMode, SceneMode)>) -> Result<Self, Self::Error> {
        Self::new(pairs)
    }
}

impl From<TransitionTable> for Vec<(SceneMode, SceneMode)> {
    fn from(table: TransitionTable) -> Self {
        table.0.into_iter().collect()
    }
}

/// Owns the current [`SceneMode`] and moves it along a [`TransitionTable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeController {
    /// The mode that the scene is in right now.
    current: SceneMode,

    /// Where each click takes us.
    table: TransitionTable,
}

impl ModeController {
    /// Create a controller starting at `initial`.
    pub fn new(initial: SceneMode, table: TransitionTable) -> Self {
        Self {
            current: initial,
            table,
        }
    }

    /// The current mode.
    pub fn current(&self) -> SceneMode {
        self.current
    }

    /// Move to the successor of the current mode and return it.
    #[instrument(skip(self), fields(from = ?self.current))]
    pub fn advance(&mut self) -> SceneMode {
        let next = self.table.successor(self.current);
        info!(?next, "Advancing scene mode");
        self.current = next;
        next
    }

    /// Jump straight to the given mode.
    #[instrument(skip(self), fields(from = ?self.current))]
    pub fn set_mode(&mut self, mode: SceneMode) {
        if mode != self.current {
            info!(?mode, "Setting scene mode");
        }
        self.current = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SceneMode::*;

    #[test]
    fn default_cycle() {
        let mut controller = ModeController::default();
        assert_eq!(controller.current(), Tree);

        assert_eq!(controller.advance(), Scatter);
        assert_eq!(controller.advance(), Focus);
        assert_eq!(controller.advance(), Tree);
        assert_eq!(controller.current(), Tree);
    }

    #[test]
    fn set_mode_from_anywhere() {
        for start in SceneMode::iter() {
            let mut controller = ModeController::new(start, TransitionTable::default());
            controller.set_mode(Focus);
            assert_eq!(controller.current(), Focus);
        }
    }

    #[test]
    fn table_validation() {
        assert_eq!(
            TransitionTable::new([(Tree, Scatter), (Scatter, Focus), (Focus, Tree)]),
            Ok(TransitionTable::default())
        );

        assert_eq!(
            TransitionTable::new([(Tree, Scatter), (Scatter, Tree)]),
            Err(TransitionTableError::MissingSuccessor(Focus))
        );

        assert_eq!(
            TransitionTable::new([(Tree, Scatter), (Tree, Focus), (Scatter, Tree), (Focus, Tree)]),
            Err(TransitionTableError::DuplicateSuccessor {
                mode: Tree,
                first: Scatter,
                second: Focus,
            })
        );

        // A repeated identical pair is still a function
        assert!(TransitionTable::new([
            (Tree, Focus),
            (Tree, Focus),
            (Focus, Scatter),
            (Scatter, Tree)
        ])
        .is_ok());
    }

    #[test]
    fn custom_table_is_followed() {
        let table = TransitionTable::new([(Tree, Focus), (Focus, Scatter), (Scatter, Tree)])
            .expect("Table should be valid");
        let mut controller = ModeController::new(Tree, table);

        assert_eq!(controller.advance(), Focus);
        assert_eq!(controller.advance(), Scatter);
        assert_eq!(controller.advance(), Tree);
    }

    #[test]
    fn table_ron_is_validated() {
        let table: TransitionTable =
            ron::from_str("[(Tree, Scatter), (Scatter, Focus), (Focus, Tree)]")
                .expect("Should deserialize a valid table");
        assert_eq!(table, TransitionTable::default());

        assert!(ron::from_str::<TransitionTable>("[(Tree, Scatter)]").is_err());

        let text = ron::to_string(&TransitionTable::default()).expect("Should serialize");
        assert_eq!(
            ron::from_str::<TransitionTable>(&text).expect("Should round trip"),
            TransitionTable::default()
        );
    }
}
