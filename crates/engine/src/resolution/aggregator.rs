//! Bonus/proficiency aggregation.
//!
//! Fixed grants and player choices are collected into an [`Accumulator`]
//! and turned into [`AggregatedCharacterData`] in one pass. Every
//! collection is a set, so merging the same source twice is harmless and
//! the output does not depend on hash order.

use std::collections::{BTreeMap, BTreeSet};

use charbldr_domain::{
    unlocked, Ability, AggregatedCharacterData, AsiRecord, Catalog, CharacterDraft, ChoiceType,
    Feat, Feature, Grants, Proficiency, ProficiencyKind, ProficiencyTarget, SourcePath,
    DEFAULT_ABILITY_CAP,
};

use super::slots::{feat_node, reachable_nodes, walk_slots, ClassSelection, Page, RaceSelection};

/// Saving throw category granting every save.
const ALL_SAVES: &str = "all";

/// Most one ability can gain from a single ASI.
const MAX_ASI_INCREMENT: i32 = 2;

pub struct Aggregator<'c> {
    catalog: &'c Catalog,
    default_ability_cap: i32,
}

impl<'c> Aggregator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            default_ability_cap: DEFAULT_ABILITY_CAP,
        }
    }

    pub fn with_default_ability_cap(mut self, cap: i32) -> Self {
        self.default_ability_cap = cap;
        self
    }

    pub fn aggregate(&self, draft: &CharacterDraft) -> AggregatedCharacterData {
        let level = draft.level();
        let race = RaceSelection::resolve(draft, self.catalog);
        let class = ClassSelection::resolve(draft, self.catalog);
        let mut acc = Accumulator::new(self.catalog);

        if let Some(selection) = race {
            acc.base_speed = selection.race.speed;
            acc.apply_grants(&selection.race.grants, &selection.race.key);
            acc.apply_features(unlocked(&selection.race.traits, level));
            if let Some(subrace) = selection.subrace {
                acc.apply_grants(&subrace.grants, &subrace.key);
                acc.apply_features(unlocked(&subrace.traits, level));
            }
            if let Some(variant) = selection.variant {
                acc.apply_grants(&variant.grants, &variant.key);
                acc.apply_features(unlocked(&variant.traits, level));
            }
        }

        if let Some(selection) = class {
            acc.apply_grants(&selection.class.grants, &selection.class.key);
            acc.data
                .saving_throws
                .extend(selection.class.saving_throws.iter().copied());
            acc.apply_features(selection.class.features_up_to(level));
            if let Some(subclass) = selection.subclass {
                acc.apply_grants(&subclass.grants, &subclass.key);
                acc.apply_features(subclass.features_up_to(level));
            }
        }

        let asi_feats = self.asi_feats(draft, class);
        let picks = self.collect_picks(draft, &asi_feats);

        for key in &picks.feats {
            match self.catalog.feat(key) {
                Some(feat) => acc.apply_feat(feat),
                None => tracing::debug!(feat = %key, "Chosen feat not in catalog"),
            }
        }
        for feat in &asi_feats {
            acc.apply_feat(feat);
        }

        for pick in &picks.values {
            acc.apply_pick(pick);
        }

        if let Some(background) = draft
            .basics()
            .background
            .as_deref()
            .and_then(|key| self.catalog.background(key))
        {
            acc.apply_grants(&background.grants, &background.key);
            acc.apply_features(background.features.iter());
        }

        if let Some(selection) = class {
            for asi_level in selection.class.asi_levels_up_to(level) {
                if let Some(AsiRecord::Abilities(increments)) = draft.asi().get(&asi_level) {
                    for (ability, increment) in increments {
                        acc.add_bonus(*ability, (*increment).clamp(0, MAX_ASI_INCREMENT));
                    }
                }
            }
        }

        acc.finish(self.default_ability_cap)
    }

    /// Feats taken at reached ASI levels, in level order.
    fn asi_feats(&self, draft: &CharacterDraft, class: Option<ClassSelection<'c>>) -> Vec<&'c Feat> {
        let Some(selection) = class else {
            return Vec::new();
        };
        selection
            .class
            .asi_levels_up_to(draft.level())
            .into_iter()
            .filter_map(|level| match draft.asi().get(&level) {
                Some(AsiRecord::Feat(key)) => {
                    let feat = self.catalog.feat(key);
                    if feat.is_none() {
                        tracing::debug!(feat = %key, level, "ASI feat not in catalog");
                    }
                    feat
                }
                _ => None,
            })
            .collect()
    }

    /// Every selection in a reachable slot, nested ones included. A slot
    /// reached twice (the same feat picked in two places) counts once.
    fn collect_picks(&self, draft: &CharacterDraft, asi_feats: &[&Feat]) -> Picks {
        let mut picks = Picks::default();
        let mut seen: BTreeSet<SourcePath> = BTreeSet::new();

        let mut nodes = reachable_nodes(draft, self.catalog);
        nodes.extend(asi_feats.iter().map(|feat| feat_node(feat, Page::Abilities)));

        for node in &nodes {
            walk_slots(node, draft, self.catalog, &mut |slot| {
                if !seen.insert(slot.path.clone()) {
                    return;
                }
                for value in slot.selections {
                    if slot.option.kind == ChoiceType::Feat {
                        picks.feats.push(value.to_string());
                    } else {
                        picks.values.push(Pick {
                            kind: slot.option.kind,
                            value: value.to_string(),
                            amount: slot.option.amount,
                            path: slot.path.clone(),
                        });
                    }
                }
            });
        }
        picks
    }
}

#[derive(Debug, Default)]
struct Picks {
    feats: Vec<String>,
    values: Vec<Pick>,
}

#[derive(Debug)]
struct Pick {
    kind: ChoiceType,
    value: String,
    amount: i32,
    path: SourcePath,
}

/// Collects modifications before the final caps and speed are known.
struct Accumulator<'c> {
    catalog: &'c Catalog,
    data: AggregatedCharacterData,
    base_speed: u32,
    speed_bonus: i32,
    max_overrides: BTreeMap<Ability, i32>,
    max_increases: BTreeMap<Ability, i32>,
}

impl<'c> Accumulator<'c> {
    fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            data: AggregatedCharacterData::default(),
            base_speed: 0,
            speed_bonus: 0,
            max_overrides: BTreeMap::new(),
            max_increases: BTreeMap::new(),
        }
    }

    fn add_bonus(&mut self, ability: Ability, bonus: i32) {
        if bonus != 0 {
            let total = self.data.ability_bonuses.entry(ability).or_insert(0);
            *total = total.saturating_add(bonus);
        }
    }

    fn apply_grants(&mut self, grants: &Grants, source: &str) {
        for proficiency in &grants.proficiencies {
            self.apply_proficiency(proficiency, source);
        }
        for language in &grants.languages {
            self.add_language(language, source);
        }
        for key in &grants.expertise {
            self.add_expertise(key, source);
        }
        for spell in &grants.spells {
            self.add_spell(spell, source);
        }
        for (ability, bonus) in &grants.ability_bonuses {
            self.add_bonus(*ability, *bonus);
        }
        for (ability, max) in &grants.ability_max_overrides {
            let entry = self.max_overrides.entry(*ability).or_insert(*max);
            *entry = (*entry).max(*max);
        }
        for (ability, increase) in &grants.ability_max_increases {
            let total = self.max_increases.entry(*ability).or_insert(0);
            *total = total.saturating_add(*increase);
        }
        self.speed_bonus = self.speed_bonus.saturating_add(grants.speed_bonus);
        self.data.initiative_bonus = self.data.initiative_bonus.saturating_add(grants.initiative_bonus);
        self.data.hp_per_level = self.data.hp_per_level.saturating_add(grants.hp_per_level);
    }

    /// A feature and everything it bundles. A feature reached from two
    /// sources grants once.
    fn apply_feature(&mut self, feature: &Feature) {
        for feature in feature.flatten() {
            if !self.data.features.insert(feature.key.clone()) {
                continue;
            }
            if feature.is_fighting_style() {
                self.data.fighting_styles.insert(feature.key.clone());
            }
            self.apply_grants(&feature.grants, &feature.key);
        }
    }

    fn apply_features<'f>(&mut self, features: impl IntoIterator<Item = &'f Feature>) {
        for feature in features {
            self.apply_feature(feature);
        }
    }

    fn apply_feat(&mut self, feat: &Feat) {
        if !self.data.feats.insert(feat.key.clone()) && !feat.repeatable {
            return;
        }
        self.apply_grants(&feat.grants, &feat.key);
        self.apply_features(feat.features.iter());
    }

    fn apply_pick(&mut self, pick: &Pick) {
        let source = pick.path.to_string();
        let value = pick.value.as_str();
        match pick.kind {
            ChoiceType::Skill => {
                if self.catalog.skill(value).is_some() {
                    self.data.skills.insert(value.to_string());
                } else {
                    unrecognized("skill", value, &source);
                }
            }
            ChoiceType::Tool => {
                if self.catalog.tool(value).is_some() {
                    self.data.tools.insert(value.to_string());
                } else {
                    unrecognized("tool", value, &source);
                }
            }
            ChoiceType::Language => self.add_language(value, &source),
            ChoiceType::Spell => self.add_spell(value, &source),
            ChoiceType::Expertise => self.add_expertise(value, &source),
            ChoiceType::WeaponMastery => {
                if self.catalog.weapon(value).is_some() {
                    self.data.weapon_masteries.insert(value.to_string());
                } else {
                    unrecognized("weapon mastery", value, &source);
                }
            }
            ChoiceType::FightingStyle => match self.catalog.feature(value) {
                Some(feature) => {
                    self.data.fighting_styles.insert(value.to_string());
                    self.apply_feature(feature);
                }
                None => unrecognized("fighting style", value, &source),
            },
            ChoiceType::Feature => match self.catalog.feature(value) {
                Some(feature) => self.apply_feature(feature),
                None => tracing::debug!(feature = %value, source = %source, "Chosen feature not in catalog"),
            },
            ChoiceType::Ability => match value.parse::<Ability>() {
                Ok(ability) => self.add_bonus(ability, pick.amount),
                Err(_) => unrecognized("ability", value, &source),
            },
            // Feats are applied as fixed effects; subclass picks live in the basics.
            ChoiceType::Feat | ChoiceType::Subclass => {}
        }
    }

    fn add_language(&mut self, language: &str, source: &str) {
        if self.catalog.has_language(language) {
            self.data.languages.insert(language.to_string());
        } else {
            unrecognized("language", language, source);
        }
    }

    fn add_spell(&mut self, spell: &str, source: &str) {
        if self.catalog.spell(spell).is_some() {
            self.data.spells.insert(spell.to_string());
        } else {
            unrecognized("spell", spell, source);
        }
    }

    /// Expertise applies to skills and tools alike.
    fn add_expertise(&mut self, key: &str, source: &str) {
        if self.catalog.skill(key).is_some() || self.catalog.tool(key).is_some() {
            self.data.expertise.insert(key.to_string());
        } else {
            unrecognized("expertise", key, source);
        }
    }

    fn apply_proficiency(&mut self, proficiency: &Proficiency, source: &str) {
        let catalog = self.catalog;
        match (&proficiency.kind, &proficiency.target) {
            (ProficiencyKind::SavingThrow, ProficiencyTarget::Key(key)) => match key.parse::<Ability>() {
                Ok(ability) => {
                    self.data.saving_throws.insert(ability);
                }
                Err(_) => unrecognized_proficiency(proficiency, source),
            },
            (ProficiencyKind::SavingThrow, ProficiencyTarget::Category(category)) => {
                if category == ALL_SAVES {
                    self.data.saving_throws.extend(Ability::ALL);
                } else {
                    unrecognized_proficiency(proficiency, source);
                }
            }
            (kind, ProficiencyTarget::Key(key)) => {
                let known = match kind {
                    ProficiencyKind::Skill => catalog.skill(key).is_some(),
                    ProficiencyKind::Tool => catalog.tool(key).is_some(),
                    ProficiencyKind::Weapon => catalog.weapon(key).is_some(),
                    ProficiencyKind::Armor => catalog.armor(key).is_some(),
                    ProficiencyKind::SavingThrow => false,
                };
                match self.set_for(*kind) {
                    Some(set) if known => {
                        set.insert(key.clone());
                    }
                    _ => unrecognized_proficiency(proficiency, source),
                }
            }
            (kind, ProficiencyTarget::Category(category)) => {
                let keys = match kind {
                    // A skill category names the ability the skills key off.
                    ProficiencyKind::Skill => category
                        .parse::<Ability>()
                        .map(|ability| catalog.skills_for(ability))
                        .unwrap_or_default(),
                    ProficiencyKind::Tool => catalog.tools_in_category(category),
                    ProficiencyKind::Weapon => catalog.weapons_in_category(category),
                    ProficiencyKind::Armor => catalog.armors_in_category(category),
                    ProficiencyKind::SavingThrow => Vec::new(),
                };
                match self.set_for(*kind) {
                    Some(set) if !keys.is_empty() => {
                        set.extend(keys.into_iter().map(str::to_string));
                    }
                    _ => unrecognized_proficiency(proficiency, source),
                }
            }
        }
    }

    /// Key set for a kind; saves are stored by ability instead.
    fn set_for(&mut self, kind: ProficiencyKind) -> Option<&mut BTreeSet<String>> {
        match kind {
            ProficiencyKind::Skill => Some(&mut self.data.skills),
            ProficiencyKind::Tool => Some(&mut self.data.tools),
            ProficiencyKind::Weapon => Some(&mut self.data.weapons),
            ProficiencyKind::Armor => Some(&mut self.data.armors),
            ProficiencyKind::SavingThrow => None,
        }
    }

    fn finish(mut self, default_cap: i32) -> AggregatedCharacterData {
        for ability in Ability::ALL {
            let raised =
                default_cap.saturating_add(self.max_increases.get(&ability).copied().unwrap_or(0));
            let cap = self
                .max_overrides
                .get(&ability)
                .map_or(raised, |max| raised.max(*max));
            self.data.ability_max.insert(ability, cap);
        }
        let speed = i64::from(self.base_speed) + i64::from(self.speed_bonus);
        self.data.speed = u32::try_from(speed.max(0)).unwrap_or(0);
        self.data
    }
}

fn unrecognized(kind: &str, key: &str, source: &str) {
    tracing::warn!(kind, key = %key, source = %source, "Unrecognized key, skipping");
}

fn unrecognized_proficiency(proficiency: &Proficiency, source: &str) {
    tracing::warn!(
        kind = ?proficiency.kind,
        target = ?proficiency.target,
        source = %source,
        "Unrecognized proficiency, skipping"
    );
}
