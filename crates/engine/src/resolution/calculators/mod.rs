//! Derived stat calculators.
//!
//! Each calculator is a pure function over the draft, the catalog and the
//! aggregated data. None of them fail: missing inputs produce neutral
//! values (0 HP without a class, unarmored AC, no spellcasting).

pub mod armor_class;
pub mod hit_points;
pub mod modifiers;
pub mod resources;
pub mod spellcasting;

pub use armor_class::{armor_class, ArmorClass};
pub use hit_points::max_hit_points;
pub use modifiers::{
    ability_modifiers, initiative, passive_perception, saving_throw_modifiers, skill_modifier,
    skill_modifiers,
};
pub use resources::{resource_pools, ResourcePool, ResourcePools};
pub use spellcasting::{prepared_spell_limit, spellcasting_summary, SpellcastingSummary};
