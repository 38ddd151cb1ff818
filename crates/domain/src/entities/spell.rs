//! Spell catalog entries.
//!
//! The engine only needs to know a spell exists and which lists it is on;
//! casting details stay with the UI.

use serde::{Deserialize, Serialize};

/// A spell. Level 0 is a cantrip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub level: u8,
    /// Class keys whose spell list includes this spell.
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Spell {
    pub fn new(key: impl Into<String>, name: impl Into<String>, level: u8) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            level,
            classes: Vec::new(),
        }
    }

    pub fn for_classes<S: Into<String>>(mut self, classes: impl IntoIterator<Item = S>) -> Self {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }
}
