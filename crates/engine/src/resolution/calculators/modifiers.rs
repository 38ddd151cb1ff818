//! Ability, skill and saving throw modifiers.

use std::collections::BTreeMap;

use charbldr_domain::{
    ability_modifier, proficiency_bonus, Ability, AbilityScores, AggregatedCharacterData, Catalog,
    ProficiencyLevel,
};

const PERCEPTION: &str = "perception";

pub fn ability_modifiers(scores: &AbilityScores) -> BTreeMap<Ability, i32> {
    Ability::ALL
        .iter()
        .map(|ability| (*ability, ability_modifier(scores.score(*ability))))
        .collect()
}

/// Modifier for one skill keyed off `ability`, using final scores.
pub fn skill_modifier(
    skill: &str,
    ability: Ability,
    scores: &AbilityScores,
    data: &AggregatedCharacterData,
    level: u8,
) -> i32 {
    let proficiency = data.skill_proficiency(skill);
    ability_modifier(scores.score(ability)).saturating_add(proficiency.bonus(proficiency_bonus(level)))
}

/// Every catalog skill's modifier.
pub fn skill_modifiers(
    catalog: &Catalog,
    scores: &AbilityScores,
    data: &AggregatedCharacterData,
    level: u8,
) -> BTreeMap<String, i32> {
    catalog
        .skills()
        .map(|skill| {
            (
                skill.key.clone(),
                skill_modifier(&skill.key, skill.ability, scores, data, level),
            )
        })
        .collect()
}

pub fn saving_throw_modifiers(
    scores: &AbilityScores,
    data: &AggregatedCharacterData,
    level: u8,
) -> BTreeMap<Ability, i32> {
    Ability::ALL
        .iter()
        .map(|ability| {
            let proficiency = if data.is_proficient_in_save(*ability) {
                ProficiencyLevel::Proficient
            } else {
                ProficiencyLevel::None
            };
            let modifier =
                ability_modifier(scores.score(*ability))
                    .saturating_add(proficiency.bonus(proficiency_bonus(level)));
            (*ability, modifier)
        })
        .collect()
}

pub fn initiative(scores: &AbilityScores, data: &AggregatedCharacterData) -> i32 {
    ability_modifier(scores.score(Ability::Dex)).saturating_add(data.initiative_bonus)
}

/// 10 + the perception modifier.
pub fn passive_perception(
    catalog: &Catalog,
    scores: &AbilityScores,
    data: &AggregatedCharacterData,
    level: u8,
) -> i32 {
    let ability = catalog
        .skill(PERCEPTION)
        .map(|skill| skill.ability)
        .unwrap_or(Ability::Wis);
    skill_modifier(PERCEPTION, ability, scores, data, level).saturating_add(10)
}
