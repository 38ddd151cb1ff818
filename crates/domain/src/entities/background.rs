//! Character backgrounds.

use serde::{Deserialize, Serialize};

use super::{flatten_choices, ChoiceOption, Feature, Grants};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub grants: Grants,
    #[serde(default)]
    pub choices: Vec<ChoiceOption>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Background {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            grants: Grants::default(),
            choices: Vec::new(),
            features: Vec::new(),
        }
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

    pub fn choice_options(&self) -> Vec<&ChoiceOption> {
        flatten_choices(&self.choices, self.features.iter())
    }
}
