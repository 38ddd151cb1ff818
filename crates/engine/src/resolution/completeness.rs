//! Completeness validation: which required choices are still open.

use charbldr_domain::{AsiRecord, Catalog, CharacterDraft, SourcePath, ASI_POINTS};
use serde::{Deserialize, Serialize};

use super::slots::{
    background_node, class_level_node, feat_node, offered_variants, race_node, subclass_level_node,
    subrace_node, variant_node, walk_slots, ChoiceNode, ClassSelection, Page, RaceSelection,
};

/// A top-level pick that has not been made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    Race,
    Subrace,
    Variant,
    Class,
    Background,
    AbilityScores,
}

/// Where the player has to go to finish a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ChoicePath {
    /// First unmet slot of an incomplete node.
    Slot(SourcePath),
    Selection(Selection),
    /// Ability score improvement at this level.
    Asi(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteChoice {
    pub page: Page,
    pub label: String,
    pub path: ChoicePath,
}

impl IncompleteChoice {
    fn selection(page: Page, label: impl Into<String>, selection: Selection) -> Self {
        Self {
            page,
            label: label.into(),
            path: ChoicePath::Selection(selection),
        }
    }
}

pub struct CompletenessValidator<'c> {
    catalog: &'c Catalog,
}

impl<'c> CompletenessValidator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// One entry per incomplete node, in page order.
    pub fn check(&self, draft: &CharacterDraft) -> Vec<IncompleteChoice> {
        let mut missing = Vec::new();
        self.check_race(draft, &mut missing);
        self.check_class(draft, &mut missing);
        self.check_background(draft, &mut missing);
        self.check_abilities(draft, &mut missing);
        missing
    }

    fn check_race(&self, draft: &CharacterDraft, missing: &mut Vec<IncompleteChoice>) {
        let Some(selection) = RaceSelection::resolve(draft, self.catalog) else {
            if let Some(key) = draft.basics().race.as_deref() {
                tracing::debug!(race = %key, "Race not in catalog");
            }
            missing.push(IncompleteChoice::selection(Page::Race, "Race", Selection::Race));
            return;
        };
        let race = selection.race;

        if race.has_subraces() && selection.subrace.is_none() {
            missing.push(IncompleteChoice::selection(Page::Race, "Subrace", Selection::Subrace));
            return;
        }

        let has_variants = offered_variants(race, selection.subrace).next().is_some();
        if has_variants && selection.variant.is_none() {
            let label = race.variant_label.as_deref().unwrap_or("Variant");
            missing.push(IncompleteChoice::selection(Page::Race, label, Selection::Variant));
            return;
        }

        let level = draft.level();
        let nodes = std::iter::once(race_node(race, level))
            .chain(selection.subrace.map(|s| subrace_node(s, level)))
            .chain(selection.variant.map(|v| variant_node(v, level)));
        missing.extend(nodes.filter_map(|node| self.check_node(&node, draft)));
    }

    fn check_class(&self, draft: &CharacterDraft, missing: &mut Vec<IncompleteChoice>) {
        let Some(selection) = ClassSelection::resolve(draft, self.catalog) else {
            if let Some(key) = draft.basics().class.as_deref() {
                tracing::debug!(class = %key, "Class not in catalog");
            }
            missing.push(IncompleteChoice::selection(Page::Class, "Class", Selection::Class));
            return;
        };

        let level = draft.level();
        for class_level in 1..=level {
            let node = class_level_node(selection.class, class_level);
            missing.extend(self.check_node(&node, draft));
        }

        match (selection.subclass, draft.basics().subclass.as_deref()) {
            (Some(subclass), _) => {
                for subclass_level in selection.subclass_levels(level) {
                    let node = subclass_level_node(subclass, subclass_level);
                    missing.extend(self.check_node(&node, draft));
                }
            }
            (None, Some(key)) => {
                tracing::debug!(class = %selection.class.key, subclass = %key, "Subclass not in catalog");
            }
            (None, None) => {}
        }
    }

    fn check_background(&self, draft: &CharacterDraft, missing: &mut Vec<IncompleteChoice>) {
        let background = draft
            .basics()
            .background
            .as_deref()
            .and_then(|key| self.catalog.background(key));
        match background {
            Some(background) => missing.extend(self.check_node(&background_node(background), draft)),
            None => missing.push(IncompleteChoice::selection(
                Page::Background,
                "Background",
                Selection::Background,
            )),
        }
    }

    fn check_abilities(&self, draft: &CharacterDraft, missing: &mut Vec<IncompleteChoice>) {
        if !draft.basics().ability_scores.is_complete() {
            missing.push(IncompleteChoice::selection(
                Page::Abilities,
                "Ability Scores",
                Selection::AbilityScores,
            ));
        }

        let Some(selection) = ClassSelection::resolve(draft, self.catalog) else {
            return;
        };
        for level in selection.class.asi_levels_up_to(draft.level()) {
            if !self.asi_complete(draft.asi().get(&level), draft) {
                missing.push(IncompleteChoice {
                    page: Page::Abilities,
                    label: format!("Ability Score Improvement (level {level})"),
                    path: ChoicePath::Asi(level),
                });
            }
        }
    }

    /// An ability record spends exactly the ASI points with no increment
    /// above two; a feat record names a known feat with its choices made.
    fn asi_complete(&self, record: Option<&AsiRecord>, draft: &CharacterDraft) -> bool {
        match record {
            None => false,
            Some(AsiRecord::Abilities(increments)) => {
                increments.values().all(|v| (0..=ASI_POINTS).contains(v))
                    && increments.values().sum::<i32>() == ASI_POINTS
            }
            Some(AsiRecord::Feat(key)) => match self.catalog.feat(key) {
                Some(feat) => self
                    .check_node(&feat_node(feat, Page::Abilities), draft)
                    .is_none(),
                None => {
                    tracing::debug!(feat = %key, "ASI feat not in catalog");
                    false
                }
            },
        }
    }

    /// `None` when every slot of the node, nested ones included, is full.
    fn check_node(&self, node: &ChoiceNode<'_>, draft: &CharacterDraft) -> Option<IncompleteChoice> {
        let mut total = 0usize;
        let mut selected = 0usize;
        let mut first_unmet: Option<SourcePath> = None;

        walk_slots(node, draft, self.catalog, &mut |slot| {
            let count = slot.option.count as usize;
            let made = slot.selections.len().min(count);
            total += count;
            selected += made;
            if made < count && first_unmet.is_none() {
                first_unmet = Some(slot.path.clone());
            }
        });

        if selected >= total {
            return None;
        }
        first_unmet.map(|path| IncompleteChoice {
            page: node.page,
            label: node.label.clone(),
            path: ChoicePath::Slot(path),
        })
    }
}
