//! The six ability scores and a draft's (possibly partial) base scores.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the six D&D abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    /// Catalog key ("str", "dex", ...).
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Str => "str",
            Ability::Dex => "dex",
            Ability::Con => "con",
            Ability::Int => "int",
            Ability::Wis => "wis",
            Ability::Cha => "cha",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Str => "STR",
            Ability::Dex => "DEX",
            Ability::Con => "CON",
            Ability::Int => "INT",
            Ability::Wis => "WIS",
            Ability::Cha => "CHA",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Ability::Str => "Strength",
            Ability::Dex => "Dexterity",
            Ability::Con => "Constitution",
            Ability::Int => "Intelligence",
            Ability::Wis => "Wisdom",
            Ability::Cha => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    /// Accepts keys, abbreviations and full names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "str" | "strength" => Ok(Ability::Str),
            "dex" | "dexterity" => Ok(Ability::Dex),
            "con" | "constitution" => Ok(Ability::Con),
            "int" | "intelligence" => Ok(Ability::Int),
            "wis" | "wisdom" => Ok(Ability::Wis),
            "cha" | "charisma" => Ok(Ability::Cha),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}

/// Score used for any ability the player has not assigned yet.
pub const UNASSIGNED_SCORE: i32 = 10;

/// Base ability scores as entered by the player.
///
/// The map is partial while the player is still filling the page in; a
/// missing ability calculates as [`UNASSIGNED_SCORE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityScores(BTreeMap<Ability, i32>);

impl AbilityScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores for every ability, in [`Ability::ALL`] order.
    pub fn from_array(scores: [i32; 6]) -> Self {
        Self(Ability::ALL.into_iter().zip(scores).collect())
    }

    pub fn with(mut self, ability: Ability, score: i32) -> Self {
        self.0.insert(ability, score);
        self
    }

    pub fn without(mut self, ability: Ability) -> Self {
        self.0.remove(&ability);
        self
    }

    pub fn get(&self, ability: Ability) -> Option<i32> {
        self.0.get(&ability).copied()
    }

    /// The assigned score, or [`UNASSIGNED_SCORE`].
    pub fn score(&self, ability: Ability) -> i32 {
        self.get(ability).unwrap_or(UNASSIGNED_SCORE)
    }

    pub fn is_complete(&self) -> bool {
        Ability::ALL.iter().all(|a| self.0.contains_key(a))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        self.0.iter().map(|(a, s)| (*a, *s))
    }
}
