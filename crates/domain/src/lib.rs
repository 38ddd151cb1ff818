//! charbldr domain: catalog entities, character drafts, the choice ledger
//! and the D&D 5e rule tables.
//!
//! Everything here is plain data and pure functions. No I/O, no logging.

pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use entities::{
    flatten_choices, unlocked, AcBonus, AggregatedCharacterData, Armor, ArmorCategory, AsiRecord,
    Background, Basics, Catalog, CatalogData, CharacterDraft, ChoiceLedger, ChoiceOption,
    ChoiceType, Class, ClassResources, Equipped, Feat, Feature, FeatureBody, FeatureVisitor, Grants,
    HpMode, Race, RaceVariant, ResourceStep, ResourceUsage, SkillDef, Spell, Spellcasting,
    Subclass, Subrace, Tool, Weapon, FIGHTING_STYLE_CATEGORY, MAX_LEVEL, MIN_LEVEL,
};
pub use error::DomainError;
pub use game_systems::{
    ability_modifier, proficiency_bonus, CasterType, ProficiencyLevel, ASI_POINTS,
    DEFAULT_ABILITY_CAP, DEFAULT_ASI_LEVELS,
};
pub use ids::{AcBonusId, DraftId};
pub use value_objects::{
    Ability, AbilityScores, Formula, FormulaContext, FormulaError, FormulaVar, OriginKind,
    Proficiency, ProficiencyKind, ProficiencyTarget, SourcePath, UNASSIGNED_SCORE,
};
