//! D&D 5th Edition rule tables.
//!
//! Pure lookups and arithmetic shared by the engine's calculators: ability
//! modifiers, proficiency bonus, hit dice, spell slot progressions and the
//! standard skill and language lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::Ability;

/// Highest score ability bonuses can reach without an override.
pub const DEFAULT_ABILITY_CAP: i32 = 20;

/// Levels granting an ability score improvement unless a class says otherwise.
pub const DEFAULT_ASI_LEVELS: [u8; 5] = [4, 8, 12, 16, 19];

/// Points an ability score improvement spends.
pub const ASI_POINTS: i32 = 2;

/// `(key, name, ability)` for the eighteen standard skills.
pub const STANDARD_SKILLS: [(&str, &str, Ability); 18] = [
    ("acrobatics", "Acrobatics", Ability::Dex),
    ("animal-handling", "Animal Handling", Ability::Wis),
    ("arcana", "Arcana", Ability::Int),
    ("athletics", "Athletics", Ability::Str),
    ("deception", "Deception", Ability::Cha),
    ("history", "History", Ability::Int),
    ("insight", "Insight", Ability::Wis),
    ("intimidation", "Intimidation", Ability::Cha),
    ("investigation", "Investigation", Ability::Int),
    ("medicine", "Medicine", Ability::Wis),
    ("nature", "Nature", Ability::Int),
    ("perception", "Perception", Ability::Wis),
    ("performance", "Performance", Ability::Cha),
    ("persuasion", "Persuasion", Ability::Cha),
    ("religion", "Religion", Ability::Int),
    ("sleight-of-hand", "Sleight of Hand", Ability::Dex),
    ("stealth", "Stealth", Ability::Dex),
    ("survival", "Survival", Ability::Wis),
];

pub const STANDARD_LANGUAGES: [&str; 16] = [
    "common",
    "dwarvish",
    "elvish",
    "giant",
    "gnomish",
    "goblin",
    "halfling",
    "orc",
    "abyssal",
    "celestial",
    "draconic",
    "deep-speech",
    "infernal",
    "primordial",
    "sylvan",
    "undercommon",
];

/// Spell slot progression of a caster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasterType {
    /// Full caster (Wizard, Cleric, Druid, Sorcerer, Bard)
    Full,
    /// Half caster (Paladin, Ranger)
    Half,
    /// Third caster (Eldritch Knight, Arcane Trickster)
    Third,
    /// Pact magic (Warlock)
    Pact,
}

/// Proficiency level for skills and saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    /// Not proficient
    None,
    /// Half proficiency (Jack of All Trades, etc.)
    Half,
    /// Standard proficiency
    Proficient,
    /// Expertise (double proficiency)
    Expert,
}

impl ProficiencyLevel {
    /// Bonus added on top of the ability modifier.
    pub fn bonus(&self, proficiency_bonus: i32) -> i32 {
        match self {
            ProficiencyLevel::None => 0,
            ProficiencyLevel::Half => proficiency_bonus / 2,
            ProficiencyLevel::Proficient => proficiency_bonus,
            ProficiencyLevel::Expert => proficiency_bonus * 2,
        }
    }
}

pub fn ability_modifier(score: i32) -> i32 {
    // Floor division; `/` would round toward zero
    score.saturating_sub(10).div_euclid(2)
}

pub fn proficiency_bonus(level: u8) -> i32 {
    ((level.max(1) as i32 - 1) / 4) + 2
}

/// Fixed hit points per level past the first: half the die rounded up, plus one.
pub fn average_hit_die_roll(hit_die: u8) -> i32 {
    (i32::from(hit_die) + 1) / 2 + 1
}

pub fn spell_save_dc(level: u8, ability_mod: i32) -> i32 {
    spell_attack_bonus(level, ability_mod).saturating_add(8)
}

pub fn spell_attack_bonus(level: u8, ability_mod: i32) -> i32 {
    proficiency_bonus(level).saturating_add(ability_mod)
}

/// Ability a standard skill keys off.
pub fn skill_ability(skill: &str) -> Option<Ability> {
    STANDARD_SKILLS
        .iter()
        .find(|(key, _, _)| *key == skill)
        .map(|(_, _, ability)| *ability)
}

/// Spell slots by slot level for a class level.
pub fn spell_slots(progression: CasterType, level: u8) -> BTreeMap<u8, u8> {
    match progression {
        CasterType::Full => slot_row(FULL_CASTER_SLOTS, level),
        CasterType::Half => slot_row(HALF_CASTER_SLOTS, level),
        CasterType::Third => slot_row(THIRD_CASTER_SLOTS, level),
        CasterType::Pact => warlock_slots(level),
    }
}

// Spell slot progression tables

type SlotTable = &'static [(u8, &'static [u8])];

const FULL_CASTER_SLOTS: SlotTable = &[
    (1, &[2]),
    (2, &[3]),
    (3, &[4, 2]),
    (4, &[4, 3]),
    (5, &[4, 3, 2]),
    (6, &[4, 3, 3]),
    (7, &[4, 3, 3, 1]),
    (8, &[4, 3, 3, 2]),
    (9, &[4, 3, 3, 3, 1]),
    (10, &[4, 3, 3, 3, 2]),
    (11, &[4, 3, 3, 3, 2, 1]),
    (12, &[4, 3, 3, 3, 2, 1]),
    (13, &[4, 3, 3, 3, 2, 1, 1]),
    (14, &[4, 3, 3, 3, 2, 1, 1]),
    (15, &[4, 3, 3, 3, 2, 1, 1, 1]),
    (16, &[4, 3, 3, 3, 2, 1, 1, 1]),
    (17, &[4, 3, 3, 3, 2, 1, 1, 1, 1]),
    (18, &[4, 3, 3, 3, 3, 1, 1, 1, 1]),
    (19, &[4, 3, 3, 3, 3, 2, 1, 1, 1]),
    (20, &[4, 3, 3, 3, 3, 2, 2, 1, 1]),
];

// Half casters get slots at half rate (starting at level 2)
const HALF_CASTER_SLOTS: SlotTable = &[
    (2, &[2]),
    (3, &[3]),
    (4, &[3]),
    (5, &[4, 2]),
    (6, &[4, 2]),
    (7, &[4, 3]),
    (8, &[4, 3]),
    (9, &[4, 3, 2]),
    (10, &[4, 3, 2]),
    (11, &[4, 3, 3]),
    (12, &[4, 3, 3]),
    (13, &[4, 3, 3, 1]),
    (14, &[4, 3, 3, 1]),
    (15, &[4, 3, 3, 2]),
    (16, &[4, 3, 3, 2]),
    (17, &[4, 3, 3, 3, 1]),
    (18, &[4, 3, 3, 3, 1]),
    (19, &[4, 3, 3, 3, 2]),
    (20, &[4, 3, 3, 3, 2]),
];

const THIRD_CASTER_SLOTS: SlotTable = &[
    (3, &[2]),
    (4, &[3]),
    (5, &[3]),
    (6, &[3]),
    (7, &[4, 2]),
    (8, &[4, 2]),
    (9, &[4, 2]),
    (10, &[4, 3]),
    (11, &[4, 3]),
    (12, &[4, 3]),
    (13, &[4, 3, 2]),
    (14, &[4, 3, 2]),
    (15, &[4, 3, 2]),
    (16, &[4, 3, 3]),
    (17, &[4, 3, 3]),
    (18, &[4, 3, 3]),
    (19, &[4, 3, 3, 1]),
    (20, &[4, 3, 3, 1]),
];

fn slot_row(table: SlotTable, level: u8) -> BTreeMap<u8, u8> {
    table
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, slots)| {
            slots
                .iter()
                .enumerate()
                .map(|(i, &count)| ((i + 1) as u8, count))
                .collect()
        })
        .unwrap_or_default()
}

fn warlock_slots(level: u8) -> BTreeMap<u8, u8> {
    // Pact magic - fewer slots, all at the highest slot level
    let (count, slot_level) = match level {
        1 => (1, 1),
        2 => (2, 1),
        3..=4 => (2, 2),
        5..=6 => (2, 3),
        7..=8 => (2, 4),
        9..=10 => (2, 5),
        11..=16 => (3, 5),
        17..=20 => (4, 5),
        _ => (0, 0),
    };

    if count > 0 {
        BTreeMap::from([(slot_level, count)])
    } else {
        BTreeMap::new()
    }
}
