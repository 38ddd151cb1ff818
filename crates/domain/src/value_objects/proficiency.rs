//! Proficiency grants: a kind plus either a specific key or a category.

use serde::{Deserialize, Serialize};

/// What a proficiency applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProficiencyKind {
    Armor,
    Weapon,
    Tool,
    Skill,
    SavingThrow,
}

/// A specific catalog key, or a category that expands through the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProficiencyTarget {
    Key(String),
    Category(String),
}

/// A single proficiency grant, e.g. `{"kind": "weapon", "target": {"category": "martial"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proficiency {
    pub kind: ProficiencyKind,
    pub target: ProficiencyTarget,
}

impl Proficiency {
    pub fn key(kind: ProficiencyKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            target: ProficiencyTarget::Key(key.into()),
        }
    }

    pub fn category(kind: ProficiencyKind, category: impl Into<String>) -> Self {
        Self {
            kind,
            target: ProficiencyTarget::Category(category.into()),
        }
    }

    pub fn skill(key: impl Into<String>) -> Self {
        Self::key(ProficiencyKind::Skill, key)
    }

    pub fn saving_throw(key: impl Into<String>) -> Self {
        Self::key(ProficiencyKind::SavingThrow, key)
    }

    pub fn weapon(key: impl Into<String>) -> Self {
        Self::key(ProficiencyKind::Weapon, key)
    }

    pub fn weapon_category(category: impl Into<String>) -> Self {
        Self::category(ProficiencyKind::Weapon, category)
    }

    pub fn armor_category(category: impl Into<String>) -> Self {
        Self::category(ProficiencyKind::Armor, category)
    }

    pub fn tool(key: impl Into<String>) -> Self {
        Self::key(ProficiencyKind::Tool, key)
    }
}
