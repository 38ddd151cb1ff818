//! Weapons, armor and tools, as far as proficiency and AC need them.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorCategory {
    Light,
    Medium,
    Heavy,
    Shield,
}

impl ArmorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArmorCategory::Light => "light",
            ArmorCategory::Medium => "medium",
            ArmorCategory::Heavy => "heavy",
            ArmorCategory::Shield => "shield",
        }
    }
}

impl fmt::Display for ArmorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body armor or a shield.
///
/// For shields `base_ac` is the bonus they add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Armor {
    pub key: String,
    pub name: String,
    pub category: ArmorCategory,
    pub base_ac: i32,
    /// Cap on the Dex modifier; `None` means uncapped.
    #[serde(default)]
    pub max_dex_bonus: Option<i32>,
}

impl Armor {
    pub fn new(key: impl Into<String>, name: impl Into<String>, category: ArmorCategory, base_ac: i32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            category,
            base_ac,
            max_dex_bonus: None,
        }
    }

    pub fn with_max_dex_bonus(mut self, max: i32) -> Self {
        self.max_dex_bonus = Some(max);
        self
    }

    pub fn is_shield(&self) -> bool {
        self.category == ArmorCategory::Shield
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub key: String,
    pub name: String,
    /// "simple" or "martial".
    pub category: String,
    /// Mastery property, if the weapon has one.
    #[serde(default)]
    pub mastery: Option<String>,
}

impl Weapon {
    pub fn new(key: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            category: category.into(),
            mastery: None,
        }
    }

    pub fn with_mastery(mut self, mastery: impl Into<String>) -> Self {
        self.mastery = Some(mastery.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub key: String,
    pub name: String,
    /// e.g. "artisan", "gaming-set", "musical-instrument".
    #[serde(default)]
    pub category: Option<String>,
}

impl Tool {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            category: None,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
