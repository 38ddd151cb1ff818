//! Game system rules.
//!
//! Only D&D 5th Edition is supported; its tables live in `dnd5e`.

pub mod dnd5e;

pub use dnd5e::{
    ability_modifier, proficiency_bonus, CasterType, ProficiencyLevel, ASI_POINTS,
    DEFAULT_ABILITY_CAP, DEFAULT_ASI_LEVELS,
};
