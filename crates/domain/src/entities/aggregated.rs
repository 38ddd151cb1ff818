//! Output of proficiency/bonus aggregation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::game_systems::{ProficiencyLevel, DEFAULT_ABILITY_CAP};
use crate::value_objects::{Ability, AbilityScores};

/// Everything a draft grants once fixed and chosen sources are merged.
///
/// # Design Decision
///
/// Public fields: this is a derived snapshot, rebuilt from the draft on
/// every change, so there is nothing to keep consistent across edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedCharacterData {
    pub skills: BTreeSet<String>,
    pub expertise: BTreeSet<String>,
    pub tools: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub weapons: BTreeSet<String>,
    pub armors: BTreeSet<String>,
    pub saving_throws: BTreeSet<Ability>,
    pub spells: BTreeSet<String>,
    pub feats: BTreeSet<String>,
    pub features: BTreeSet<String>,
    pub fighting_styles: BTreeSet<String>,
    pub weapon_masteries: BTreeSet<String>,
    /// Additive bonuses on top of the base scores.
    pub ability_bonuses: BTreeMap<Ability, i32>,
    /// Final cap per ability.
    pub ability_max: BTreeMap<Ability, i32>,
    pub speed: u32,
    pub initiative_bonus: i32,
    pub hp_per_level: i32,
}

impl AggregatedCharacterData {
    pub fn ability_bonus(&self, ability: Ability) -> i32 {
        self.ability_bonuses.get(&ability).copied().unwrap_or(0)
    }

    pub fn ability_cap(&self, ability: Ability) -> i32 {
        self.ability_max
            .get(&ability)
            .copied()
            .unwrap_or(DEFAULT_ABILITY_CAP)
    }

    /// `min(base + bonus, max(cap, base))`: bonuses stop at the cap, but a
    /// base score already above it is kept.
    pub fn final_score(&self, ability: Ability, base: i32) -> i32 {
        let cap = self.ability_cap(ability).max(base);
        base.saturating_add(self.ability_bonus(ability)).min(cap)
    }

    /// Final scores for all six abilities.
    pub fn final_scores(&self, base: &AbilityScores) -> AbilityScores {
        Ability::ALL.iter().fold(AbilityScores::new(), |scores, ability| {
            scores.with(*ability, self.final_score(*ability, base.score(*ability)))
        })
    }

    pub fn skill_proficiency(&self, skill: &str) -> ProficiencyLevel {
        if self.expertise.contains(skill) {
            ProficiencyLevel::Expert
        } else if self.skills.contains(skill) {
            ProficiencyLevel::Proficient
        } else {
            ProficiencyLevel::None
        }
    }

    pub fn is_proficient_in_save(&self, ability: Ability) -> bool {
        self.saving_throws.contains(&ability)
    }

    pub fn has_fighting_style(&self, style: &str) -> bool {
        self.fighting_styles.contains(style)
    }
}
