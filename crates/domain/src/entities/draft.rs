//! The character draft: aggregate root of the builder.
//!
//! Drafts are values. Every edit goes through a `with_*` / `without_*`
//! method that consumes the draft and returns the next one, so a caller
//! holding an older snapshot never sees it change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ChoiceLedger, ChoiceType};
use crate::ids::{AcBonusId, DraftId};
use crate::value_objects::{Ability, AbilityScores, SourcePath};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;

/// How hit points past first level are determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HpMode {
    /// Average of the hit die, rounded up.
    #[default]
    Fixed,
    /// Recorded hit-die rolls.
    Roll,
}

/// The identity page of the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Basics {
    pub name: String,
    pub race: Option<String>,
    pub subrace: Option<String>,
    pub race_variant: Option<String>,
    pub class: Option<String>,
    pub subclass: Option<String>,
    pub background: Option<String>,
    pub level: u8,
    pub alignment: Option<String>,
    pub hp_mode: HpMode,
    pub ability_scores: AbilityScores,
}

impl Default for Basics {
    fn default() -> Self {
        Self {
            name: String::new(),
            race: None,
            subrace: None,
            race_variant: None,
            class: None,
            subclass: None,
            background: None,
            level: MIN_LEVEL,
            alignment: None,
            hp_mode: HpMode::Fixed,
            ability_scores: AbilityScores::new(),
        }
    }
}

/// What was taken at an ability score improvement level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AsiRecord {
    /// Increments per ability; a valid record spends exactly two points.
    Abilities(BTreeMap<Ability, i32>),
    Feat(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Equipped {
    pub armor: Option<String>,
    pub shield: Option<String>,
}

/// A situational AC bonus the player added by hand (a ring, a spell...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcBonus {
    pub id: AcBonusId,
    pub bonus: i32,
    pub source: String,
}

impl AcBonus {
    pub fn new(bonus: i32, source: impl Into<String>) -> Self {
        Self {
            id: AcBonusId::new(),
            bonus,
            source: source.into(),
        }
    }
}

/// Spent uses of limited class resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceUsage {
    pub lay_on_hands_spent: u32,
    pub channel_divinity_spent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    id: DraftId,
    #[serde(default)]
    basics: Basics,
    #[serde(default)]
    chosen: ChoiceLedger,
    #[serde(default)]
    asi: BTreeMap<u8, AsiRecord>,
    #[serde(default)]
    hp_rolls: BTreeMap<u8, u32>,
    #[serde(default)]
    equipped: Equipped,
    #[serde(default)]
    ac_bonuses: Vec<AcBonus>,
    #[serde(default)]
    resources: ResourceUsage,
}

impl Default for CharacterDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterDraft {
    /// A blank level 1 draft.
    pub fn new() -> Self {
        Self::with_id(DraftId::new())
    }

    pub fn with_id(id: DraftId) -> Self {
        Self {
            id,
            basics: Basics::default(),
            chosen: ChoiceLedger::new(),
            asi: BTreeMap::new(),
            hp_rolls: BTreeMap::new(),
            equipped: Equipped::default(),
            ac_bonuses: Vec::new(),
            resources: ResourceUsage::default(),
        }
    }

    // Read accessors

    pub fn id(&self) -> DraftId {
        self.id
    }

    pub fn basics(&self) -> &Basics {
        &self.basics
    }

    /// Character level, always within 1..=20.
    pub fn level(&self) -> u8 {
        self.basics.level.clamp(MIN_LEVEL, MAX_LEVEL)
    }

    pub fn chosen(&self) -> &ChoiceLedger {
        &self.chosen
    }

    pub fn asi(&self) -> &BTreeMap<u8, AsiRecord> {
        &self.asi
    }

    pub fn hp_roll(&self, level: u8) -> Option<u32> {
        self.hp_rolls.get(&level).copied()
    }

    pub fn equipped(&self) -> &Equipped {
        &self.equipped
    }

    pub fn ac_bonuses(&self) -> &[AcBonus] {
        &self.ac_bonuses
    }

    pub fn resources(&self) -> ResourceUsage {
        self.resources
    }

    // Basics

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.basics.name = name.into();
        self
    }

    /// Changing race drops the subrace and variant picked for the old one.
    pub fn with_race(mut self, race: Option<String>) -> Self {
        if self.basics.race != race {
            self.basics.subrace = None;
            self.basics.race_variant = None;
        }
        self.basics.race = race;
        self
    }

    pub fn with_subrace(mut self, subrace: Option<String>) -> Self {
        if self.basics.subrace != subrace {
            self.basics.race_variant = None;
        }
        self.basics.subrace = subrace;
        self
    }

    pub fn with_race_variant(mut self, variant: Option<String>) -> Self {
        self.basics.race_variant = variant;
        self
    }

    /// Changing class drops the subclass picked for the old one.
    pub fn with_class(mut self, class: Option<String>) -> Self {
        if self.basics.class != class {
            self.basics.subclass = None;
        }
        self.basics.class = class;
        self
    }

    pub fn with_subclass(mut self, subclass: Option<String>) -> Self {
        self.basics.subclass = subclass;
        self
    }

    pub fn with_background(mut self, background: Option<String>) -> Self {
        self.basics.background = background;
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.basics.level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        self
    }

    pub fn with_alignment(mut self, alignment: Option<String>) -> Self {
        self.basics.alignment = alignment;
        self
    }

    pub fn with_hp_mode(mut self, mode: HpMode) -> Self {
        self.basics.hp_mode = mode;
        self
    }

    pub fn with_ability_score(mut self, ability: Ability, score: i32) -> Self {
        self.basics.ability_scores = self.basics.ability_scores.with(ability, score);
        self
    }

    pub fn with_ability_scores(mut self, scores: AbilityScores) -> Self {
        self.basics.ability_scores = scores;
        self
    }

    // Choices

    pub fn with_choice<S: Into<String>>(
        mut self,
        path: SourcePath,
        kind: ChoiceType,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.chosen = self.chosen.record(path, kind, values);
        self
    }

    pub fn without_choice(mut self, path: &SourcePath, kind: ChoiceType) -> Self {
        self.chosen = self.chosen.clear(path, kind);
        self
    }

    pub fn with_asi(mut self, level: u8, record: AsiRecord) -> Self {
        self.asi.insert(level, record);
        self
    }

    pub fn without_asi(mut self, level: u8) -> Self {
        self.asi.remove(&level);
        self
    }

    // Hit points

    pub fn with_hp_roll(mut self, level: u8, roll: u32) -> Self {
        self.hp_rolls.insert(level, roll);
        self
    }

    pub fn without_hp_roll(mut self, level: u8) -> Self {
        self.hp_rolls.remove(&level);
        self
    }

    // Equipment and armor class

    pub fn with_armor(mut self, armor: Option<String>) -> Self {
        self.equipped.armor = armor;
        self
    }

    pub fn with_shield(mut self, shield: Option<String>) -> Self {
        self.equipped.shield = shield;
        self
    }

    pub fn with_ac_bonus(mut self, bonus: AcBonus) -> Self {
        self.ac_bonuses.push(bonus);
        self
    }

    pub fn without_ac_bonus(mut self, id: AcBonusId) -> Self {
        self.ac_bonuses.retain(|b| b.id != id);
        self
    }

    // Resources

    pub fn with_resources(mut self, resources: ResourceUsage) -> Self {
        self.resources = resources;
        self
    }
}
