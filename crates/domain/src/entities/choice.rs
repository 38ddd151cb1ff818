//! Player choice declarations attached to catalog entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a choice slot selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoiceType {
    Ability,
    Skill,
    Tool,
    Language,
    Spell,
    Feat,
    Feature,
    FightingStyle,
    WeaponMastery,
    Subclass,
    /// Skills (or tools) that get double proficiency.
    Expertise,
}

impl ChoiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceType::Ability => "ability",
            ChoiceType::Skill => "skill",
            ChoiceType::Tool => "tool",
            ChoiceType::Language => "language",
            ChoiceType::Spell => "spell",
            ChoiceType::Feat => "feat",
            ChoiceType::Feature => "feature",
            ChoiceType::FightingStyle => "fighting-style",
            ChoiceType::WeaponMastery => "weapon-mastery",
            ChoiceType::Subclass => "subclass",
            ChoiceType::Expertise => "expertise",
        }
    }
}

impl fmt::Display for ChoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_amount() -> i32 {
    1
}

/// A slot that asks the player to pick `count` entries out of `options`.
///
/// An empty `options` list means "anything of this kind the catalog knows".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    #[serde(rename = "type")]
    pub kind: ChoiceType,
    pub count: u32,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Per-pick increment for ability choices.
    #[serde(default = "default_amount")]
    pub amount: i32,
}

impl ChoiceOption {
    pub fn new<S: Into<String>>(kind: ChoiceType, count: u32, options: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            count,
            options: options.into_iter().map(Into::into).collect(),
            label: None,
            amount: default_amount(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    /// Label shown to the player; falls back to the choice kind.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("Choose {} {}", self.count, self.kind),
        }
    }
}
