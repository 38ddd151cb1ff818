//! Races, subraces and race variants.

use serde::{Deserialize, Serialize};

use super::{ChoiceOption, Feature, Grants};

fn default_speed() -> u32 {
    30
}

/// A variant such as a dragonborn's draconic ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceVariant {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub grants: Grants,
    #[serde(default)]
    pub choices: Vec<ChoiceOption>,
    #[serde(default)]
    pub traits: Vec<Feature>,
}

impl RaceVariant {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            grants: Grants::default(),
            choices: Vec::new(),
            traits: Vec::new(),
        }
    }

    pub fn choice_options(&self, level: u8) -> Vec<(usize, &ChoiceOption)> {
        open_slots(&self.choices, &self.traits, level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub key: String,
    pub name: String,
    #[serde(default = "default_speed")]
    pub speed: u32,
    #[serde(default)]
    pub grants: Grants,
    #[serde(default)]
    pub choices: Vec<ChoiceOption>,
    #[serde(default)]
    pub traits: Vec<Feature>,
    /// Subrace keys; a race listing any requires one to be picked.
    #[serde(default)]
    pub subraces: Vec<String>,
    #[serde(default)]
    pub variants: Vec<RaceVariant>,
    /// Prompt for the variant selection, e.g. "Draconic Ancestry".
    #[serde(default)]
    pub variant_label: Option<String>,
}

impl Race {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            speed: default_speed(),
            grants: Grants::default(),
            choices: Vec::new(),
            traits: Vec::new(),
            subraces: Vec::new(),
            variants: Vec::new(),
            variant_label: None,
        }
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
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

    pub fn with_trait(mut self, feature: Feature) -> Self {
        self.traits.push(feature);
        self
    }

    pub fn with_subrace(mut self, key: impl Into<String>) -> Self {
        self.subraces.push(key.into());
        self
    }

    pub fn with_variant(mut self, variant: RaceVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn with_variant_label(mut self, label: impl Into<String>) -> Self {
        self.variant_label = Some(label.into());
        self
    }

    pub fn has_subraces(&self) -> bool {
        !self.subraces.is_empty()
    }

    pub fn choice_options(&self, level: u8) -> Vec<(usize, &ChoiceOption)> {
        open_slots(&self.choices, &self.traits, level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subrace {
    pub key: String,
    pub name: String,
    /// Key of the parent race.
    pub race: String,
    #[serde(default)]
    pub grants: Grants,
    #[serde(default)]
    pub choices: Vec<ChoiceOption>,
    #[serde(default)]
    pub traits: Vec<Feature>,
    #[serde(default)]
    pub variants: Vec<RaceVariant>,
}

impl Subrace {
    pub fn new(key: impl Into<String>, name: impl Into<String>, race: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            race: race.into(),
            grants: Grants::default(),
            choices: Vec::new(),
            traits: Vec::new(),
            variants: Vec::new(),
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

    pub fn with_trait(mut self, feature: Feature) -> Self {
        self.traits.push(feature);
        self
    }

    pub fn choice_options(&self, level: u8) -> Vec<(usize, &ChoiceOption)> {
        open_slots(&self.choices, &self.traits, level)
    }
}

/// Traits unlocked at `level`.
pub fn unlocked(traits: &[Feature], level: u8) -> impl Iterator<Item = &Feature> {
    traits.iter().filter(move |feature| feature.level <= level)
}

/// Choice slots open at `level` with their slot index. Indexes count every
/// trait's slots, locked or not, so a slot keeps its index across level-ups.
fn open_slots<'a>(
    choices: &'a [ChoiceOption],
    traits: &'a [Feature],
    level: u8,
) -> Vec<(usize, &'a ChoiceOption)> {
    let own = choices.iter().map(|choice| (choice, true));
    let from_traits = traits.iter().flat_map(|feature| {
        let open = feature.level <= level;
        feature
            .choice_options()
            .into_iter()
            .map(move |choice| (choice, open))
    });
    own.chain(from_traits)
        .enumerate()
        .filter(|(_, (_, open))| *open)
        .map(|(index, (choice, _))| (index, choice))
        .collect()
}
