//! Full resolution of a draft against the catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use charbldr_domain::{
    proficiency_bonus, Ability, AbilityScores, AggregatedCharacterData, Catalog, CharacterDraft,
    DraftId, DEFAULT_ABILITY_CAP,
};
use serde::Serialize;

use super::aggregator::Aggregator;
use super::calculators::{
    ability_modifiers, armor_class, initiative, max_hit_points, passive_perception,
    resource_pools, saving_throw_modifiers, skill_modifiers, spellcasting_summary, ArmorClass,
    ResourcePools, SpellcastingSummary,
};
use super::completeness::{CompletenessValidator, IncompleteChoice};
use super::slots::ClassSelection;

/// Everything derived from one draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCharacter {
    pub draft_id: DraftId,
    pub name: String,
    pub level: u8,
    pub proficiency_bonus: i32,
    /// Final scores, bonuses and caps applied.
    pub ability_scores: AbilityScores,
    pub ability_modifiers: BTreeMap<Ability, i32>,
    pub skills: BTreeMap<String, i32>,
    pub saving_throws: BTreeMap<Ability, i32>,
    pub initiative: i32,
    pub passive_perception: i32,
    pub speed: u32,
    pub max_hit_points: i32,
    pub armor_class: ArmorClass,
    pub spellcasting: Option<SpellcastingSummary>,
    pub resources: ResourcePools,
    pub aggregated: AggregatedCharacterData,
    pub incomplete: Vec<IncompleteChoice>,
}

impl ResolvedCharacter {
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_empty()
    }
}

/// Resolves drafts against one catalog.
///
/// Cheap to clone; the catalog is shared.
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    catalog: Arc<Catalog>,
    default_ability_cap: i32,
}

impl ResolutionEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            default_ability_cap: DEFAULT_ABILITY_CAP,
        }
    }

    pub fn with_default_ability_cap(mut self, cap: i32) -> Self {
        self.default_ability_cap = cap;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn aggregate(&self, draft: &CharacterDraft) -> AggregatedCharacterData {
        Aggregator::new(&self.catalog)
            .with_default_ability_cap(self.default_ability_cap)
            .aggregate(draft)
    }

    pub fn check_completeness(&self, draft: &CharacterDraft) -> Vec<IncompleteChoice> {
        CompletenessValidator::new(&self.catalog).check(draft)
    }

    pub fn resolve(&self, draft: &CharacterDraft) -> ResolvedCharacter {
        let catalog = self.catalog.as_ref();
        let level = draft.level();
        let aggregated = self.aggregate(draft);
        let scores = aggregated.final_scores(&draft.basics().ability_scores);
        let class = ClassSelection::resolve(draft, catalog);

        let resolved = ResolvedCharacter {
            draft_id: draft.id(),
            name: draft.basics().name.clone(),
            level,
            proficiency_bonus: proficiency_bonus(level),
            ability_modifiers: ability_modifiers(&scores),
            skills: skill_modifiers(catalog, &scores, &aggregated, level),
            saving_throws: saving_throw_modifiers(&scores, &aggregated, level),
            initiative: initiative(&scores, &aggregated),
            passive_perception: passive_perception(catalog, &scores, &aggregated, level),
            speed: aggregated.speed,
            max_hit_points: max_hit_points(draft, class.map(|c| c.class), &aggregated),
            armor_class: armor_class(draft, catalog, &scores, &aggregated),
            spellcasting: class
                .and_then(|c| spellcasting_summary(c.class, c.subclass, level, &scores)),
            resources: resource_pools(class.map(|c| c.class), level, draft.resources()),
            incomplete: self.check_completeness(draft),
            ability_scores: scores,
            aggregated,
        };

        tracing::debug!(
            draft_id = %resolved.draft_id,
            level,
            incomplete = resolved.incomplete.len(),
            "Resolved draft"
        );
        resolved
    }
}
