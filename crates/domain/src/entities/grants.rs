//! Fixed effects a catalog entry applies without asking the player.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Ability, Proficiency};

/// Fixed proficiencies and bonuses.
///
/// Races, subraces, variants, classes, subclasses, backgrounds, feats and
/// features all carry one of these. Every field defaults to empty so catalog
/// JSON only spells out what it grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Grants {
    pub proficiencies: Vec<Proficiency>,
    pub languages: Vec<String>,
    /// Skill (or tool) keys granted at double proficiency.
    pub expertise: Vec<String>,
    pub spells: Vec<String>,
    /// Additive bonuses to ability scores.
    pub ability_bonuses: BTreeMap<Ability, i32>,
    /// Absolute caps; the highest override wins.
    pub ability_max_overrides: BTreeMap<Ability, i32>,
    /// Raises on top of the default cap; they add up.
    pub ability_max_increases: BTreeMap<Ability, i32>,
    pub speed_bonus: i32,
    pub initiative_bonus: i32,
    pub hp_per_level: i32,
}

impl Grants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_proficiency(mut self, proficiency: Proficiency) -> Self {
        self.proficiencies.push(proficiency);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    pub fn with_expertise(mut self, key: impl Into<String>) -> Self {
        self.expertise.push(key.into());
        self
    }

    pub fn with_spell(mut self, spell: impl Into<String>) -> Self {
        self.spells.push(spell.into());
        self
    }

    pub fn with_ability_bonus(mut self, ability: Ability, bonus: i32) -> Self {
        *self.ability_bonuses.entry(ability).or_insert(0) += bonus;
        self
    }

    pub fn with_ability_max_override(mut self, ability: Ability, max: i32) -> Self {
        self.ability_max_overrides.insert(ability, max);
        self
    }

    pub fn with_ability_max_increase(mut self, ability: Ability, increase: i32) -> Self {
        *self.ability_max_increases.entry(ability).or_insert(0) += increase;
        self
    }

    pub fn with_speed_bonus(mut self, bonus: i32) -> Self {
        self.speed_bonus = bonus;
        self
    }

    pub fn with_initiative_bonus(mut self, bonus: i32) -> Self {
        self.initiative_bonus = bonus;
        self
    }

    pub fn with_hp_per_level(mut self, hp: i32) -> Self {
        self.hp_per_level = hp;
        self
    }
}
