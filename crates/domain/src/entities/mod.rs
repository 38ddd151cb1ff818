//! Domain entities - catalog records, the character draft and its ledger

mod aggregated;
mod background;
mod catalog;
mod choice;
mod class;
mod draft;
mod equipment;
mod feat;
mod feature;
mod grants;
mod ledger;
mod race;
mod spell;

pub use aggregated::AggregatedCharacterData;
pub use background::Background;
pub use catalog::{Catalog, CatalogData, SkillDef};
pub use choice::{ChoiceOption, ChoiceType};
pub use class::{Class, ClassResources, ResourceStep, Spellcasting, Subclass};
pub use draft::{
    AcBonus, AsiRecord, Basics, CharacterDraft, Equipped, HpMode, ResourceUsage, MAX_LEVEL,
    MIN_LEVEL,
};
pub use equipment::{Armor, ArmorCategory, Tool, Weapon};
pub use feat::Feat;
pub use feature::{flatten_choices, Feature, FeatureBody, FeatureVisitor, FIGHTING_STYLE_CATEGORY};
pub use grants::Grants;
pub use ledger::ChoiceLedger;
pub use race::{unlocked, Race, RaceVariant, Subrace};
pub use spell::Spell;
