//! Feats a character can take at an ASI level or through a feat slot.

use serde::{Deserialize, Serialize};

use super::{flatten_choices, ChoiceOption, Feature, Grants};

/// A feat.
///
/// # Design Decision
///
/// Public fields: this is a plain catalog record with no invariants to
/// protect; any combination of fields is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feat {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category of feat (e.g., "general", "origin", "epic-boon")
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub grants: Grants,
    #[serde(default)]
    pub choices: Vec<ChoiceOption>,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Whether this feat can be taken multiple times
    #[serde(default)]
    pub repeatable: bool,
}

impl Feat {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: String::new(),
            category: None,
            grants: Grants::default(),
            choices: Vec::new(),
            features: Vec::new(),
            repeatable: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_grants(mut self, grants: Grants) -> Self {
        self.grants = grants;
        self
    }

    pub fn with_choice(mut self, choice: ChoiceOption) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub fn choice_options(&self) -> Vec<&ChoiceOption> {
        flatten_choices(&self.choices, self.features.iter())
    }

    pub fn has_choices(&self) -> bool {
        !self.choice_options().is_empty()
    }
}
