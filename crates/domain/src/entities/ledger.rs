//! The choice ledger: every selection the player made, by choice type and
//! source path.
//!
//! The ledger stores what it is given. Whether a selection is still valid
//! for the current race or class is decided by whoever walks the reachable
//! slots; entries for slots that disappeared simply stop being read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ChoiceType;
use crate::value_objects::SourcePath;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceLedger(BTreeMap<ChoiceType, BTreeMap<SourcePath, Vec<String>>>);

impl ChoiceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selections at `path` for `kind`.
    pub fn record(mut self, path: SourcePath, kind: ChoiceType, values: Vec<String>) -> Self {
        self.0.entry(kind).or_default().insert(path, values);
        self
    }

    /// Drop the selections at `path` for `kind`.
    pub fn clear(mut self, path: &SourcePath, kind: ChoiceType) -> Self {
        if let Some(slots) = self.0.get_mut(&kind) {
            slots.remove(path);
            if slots.is_empty() {
                self.0.remove(&kind);
            }
        }
        self
    }

    /// Raw selections, empty if nothing was recorded.
    pub fn read(&self, path: &SourcePath, kind: ChoiceType) -> &[String] {
        self.0
            .get(&kind)
            .and_then(|slots| slots.get(path))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Selections that count: blank placeholders are skipped.
    pub fn selected(&self, path: &SourcePath, kind: ChoiceType) -> Vec<&str> {
        self.read(path, kind)
            .iter()
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
            .collect()
    }

    /// Every recorded slot of one kind.
    pub fn entries(&self, kind: ChoiceType) -> impl Iterator<Item = (&SourcePath, &[String])> {
        self.0
            .get(&kind)
            .into_iter()
            .flat_map(|slots| slots.iter().map(|(path, values)| (path, values.as_slice())))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
