//! Classes and subclasses.

use serde::{Deserialize, Serialize};

use super::{flatten_choices, ChoiceOption, ChoiceType, Feature, Grants};
use crate::game_systems::{CasterType, DEFAULT_ASI_LEVELS};
use crate::value_objects::Ability;

fn default_asi_levels() -> Vec<u8> {
    DEFAULT_ASI_LEVELS.to_vec()
}

/// Spellcasting block of a class or subclass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spellcasting {
    pub ability: Ability,
    pub progression: CasterType,
    /// Prepared-spell limit, e.g. `floor(level/2)+abilityMod`. Parsed at
    /// calculation time so a broken entry degrades instead of failing the
    /// whole catalog.
    #[serde(default)]
    pub prepared_formula: Option<String>,
}

impl Spellcasting {
    pub fn new(ability: Ability, progression: CasterType) -> Self {
        Self {
            ability,
            progression,
            prepared_formula: None,
        }
    }

    pub fn with_prepared_formula(mut self, formula: impl Into<String>) -> Self {
        self.prepared_formula = Some(formula.into());
        self
    }
}

/// One row of a level-indexed resource table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStep {
    pub level: u8,
    pub uses: u32,
}

/// Limited-use pools a class tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassResources {
    /// Lay on hands points per class level.
    pub lay_on_hands_per_level: Option<u32>,
    /// Channel divinity uses, by the level they start at.
    pub channel_divinity: Vec<ResourceStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub key: String,
    pub name: String,
    pub hit_die: u8,
    #[serde(default)]
    pub saving_throws: Vec<Ability>,
    #[serde(default)]
    pub grants: Grants,
    /// Choices made when taking the first level (starting skills etc.).
    #[serde(default)]
    pub choices: Vec<ChoiceOption>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub subclass_level: Option<u8>,
    /// Prompt for the subclass pick, e.g. "Martial Archetype".
    #[serde(default)]
    pub subclass_label: Option<String>,
    #[serde(default)]
    pub subclasses: Vec<String>,
    #[serde(default = "default_asi_levels")]
    pub asi_levels: Vec<u8>,
    #[serde(default)]
    pub spellcasting: Option<Spellcasting>,
    #[serde(default)]
    pub resources: ClassResources,
}

impl Class {
    pub fn new(key: impl Into<String>, name: impl Into<String>, hit_die: u8) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            hit_die,
            saving_throws: Vec::new(),
            grants: Grants::default(),
            choices: Vec::new(),
            features: Vec::new(),
            subclass_level: None,
            subclass_label: None,
            subclasses: Vec::new(),
            asi_levels: default_asi_levels(),
            spellcasting: None,
            resources: ClassResources::default(),
        }
    }

    pub fn with_saving_throws(mut self, saves: impl IntoIterator<Item = Ability>) -> Self {
        self.saving_throws = saves.into_iter().collect();
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

    pub fn with_subclasses<S: Into<String>>(mut self, level: u8, subclasses: impl IntoIterator<Item = S>) -> Self {
        self.subclass_level = Some(level);
        self.subclasses = subclasses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subclass_label(mut self, label: impl Into<String>) -> Self {
        self.subclass_label = Some(label.into());
        self
    }

    pub fn with_spellcasting(mut self, spellcasting: Spellcasting) -> Self {
        self.spellcasting = Some(spellcasting);
        self
    }

    pub fn with_resources(mut self, resources: ClassResources) -> Self {
        self.resources = resources;
        self
    }

    /// Features gained at exactly `level`.
    pub fn features_at(&self, level: u8) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.level == level)
    }

    /// Features gained at or below `level`.
    pub fn features_up_to(&self, level: u8) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.level <= level)
    }

    /// The synthetic slot asking for a subclass, if this class offers one.
    pub fn subclass_choice(&self) -> Option<ChoiceOption> {
        self.subclass_level?;
        let choice = ChoiceOption::new(ChoiceType::Subclass, 1, self.subclasses.iter().cloned());
        Some(match &self.subclass_label {
            Some(label) => choice.with_label(label.clone()),
            None => choice.with_label("Subclass"),
        })
    }

    /// Choices owned by one class level, not counting the subclass slot.
    pub fn choice_options_at(&self, level: u8) -> Vec<&ChoiceOption> {
        let own: &[ChoiceOption] = if level == 1 { &self.choices } else { &[] };
        flatten_choices(own, self.features_at(level))
    }

    /// ASI levels unlocked at `level`, ascending.
    pub fn asi_levels_up_to(&self, level: u8) -> Vec<u8> {
        let mut levels: Vec<u8> = self.asi_levels.iter().copied().filter(|l| *l <= level).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subclass {
    pub key: String,
    pub name: String,
    /// Key of the parent class.
    pub class: String,
    #[serde(default)]
    pub grants: Grants,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Subclasses like the eldritch knight cast on their own.
    #[serde(default)]
    pub spellcasting: Option<Spellcasting>,
}

impl Subclass {
    pub fn new(key: impl Into<String>, name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            class: class.into(),
            grants: Grants::default(),
            features: Vec::new(),
            spellcasting: None,
        }
    }

    pub fn with_grants(mut self, grants: Grants) -> Self {
        self.grants = grants;
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn with_spellcasting(mut self, spellcasting: Spellcasting) -> Self {
        self.spellcasting = Some(spellcasting);
        self
    }

    pub fn features_at(&self, level: u8) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.level == level)
    }

    pub fn features_up_to(&self, level: u8) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.level <= level)
    }

    /// Distinct levels at which this subclass grants features, ascending.
    pub fn feature_levels(&self) -> Vec<u8> {
        let mut levels: Vec<u8> = self.features.iter().map(|f| f.level).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    pub fn choice_options_at(&self, level: u8) -> Vec<&ChoiceOption> {
        flatten_choices(&[], self.features_at(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Class {
        Class::new("fighter", "Fighter", 10)
            .with_choice(ChoiceOption::new(ChoiceType::Skill, 2, ["athletics", "perception"]))
            .with_feature(Feature::new("second-wind", "Second Wind"))
            .with_feature(
                Feature::new("style", "Fighting Style")
                    .with_choices(vec![ChoiceOption::new(ChoiceType::Feature, 1, ["defense"])]),
            )
            .with_feature(Feature::new("action-surge", "Action Surge").at_level(2))
            .with_subclasses(3, ["champion"])
            .with_subclass_label("Martial Archetype")
    }

    #[test]
    fn first_level_carries_starting_choices() {
        let class = fighter();
        assert_eq!(class.choice_options_at(1).len(), 2);
        assert!(class.choice_options_at(2).is_empty());
    }

    #[test]
    fn subclass_choice_uses_label_and_keys() {
        let choice = fighter().subclass_choice().expect("fighter has subclasses");
        assert_eq!(choice.kind, ChoiceType::Subclass);
        assert_eq!(choice.options, vec!["champion"]);
        assert_eq!(choice.display_label(), "Martial Archetype");
        assert!(Class::new("commoner", "Commoner", 4).subclass_choice().is_none());
    }

    #[test]
    fn asi_levels_default_and_filter() {
        let class = fighter();
        assert_eq!(class.asi_levels_up_to(3), Vec::<u8>::new());
        assert_eq!(class.asi_levels_up_to(12), vec![4, 8, 12]);
    }

    #[test]
    fn subclass_feature_levels_are_distinct() {
        let subclass = Subclass::new("champion", "Champion", "fighter")
            .with_feature(Feature::new("improved-critical", "Improved Critical").at_level(3))
            .with_feature(Feature::new("remarkable-athlete", "Remarkable Athlete").at_level(7))
            .with_feature(Feature::new("extra-style", "Additional Fighting Style").at_level(7));
        assert_eq!(subclass.feature_levels(), vec![3, 7]);
    }
}
