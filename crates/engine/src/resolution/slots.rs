//! Reachable choice nodes and the recursive slot walk.
//!
//! A node is one validator unit: a race, a subrace, a variant, one class
//! level, one subclass level, a background, or a feat taken at an ASI.
//! Its slots are the node's flattened choice list. Walking a node visits
//! every slot in pre-order and descends into the catalog entries selected
//! in `feature` and `feat` slots.

use std::borrow::Cow;

use charbldr_domain::{
    Background, Catalog, CharacterDraft, ChoiceOption, ChoiceType, Class, Feat, OriginKind, Race,
    RaceVariant, SourcePath, Subclass, Subrace,
};
use serde::{Deserialize, Serialize};

/// Builder page a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Race,
    Class,
    Background,
    Abilities,
}

#[derive(Debug, Clone)]
pub struct ChoiceNode<'c> {
    pub page: Page,
    pub label: String,
    pub origin: OriginKind,
    pub key: &'c str,
    pub level: Option<u8>,
    /// Open slots with their slot index; the synthetic subclass slot is
    /// owned.
    pub options: Vec<(usize, Cow<'c, ChoiceOption>)>,
}

impl<'c> ChoiceNode<'c> {
    fn new(
        page: Page,
        label: impl Into<String>,
        origin: OriginKind,
        key: &'c str,
        level: Option<u8>,
        options: Vec<&'c ChoiceOption>,
    ) -> Self {
        Self::indexed(page, label, origin, key, level, options.into_iter().enumerate().collect())
    }

    fn indexed(
        page: Page,
        label: impl Into<String>,
        origin: OriginKind,
        key: &'c str,
        level: Option<u8>,
        options: Vec<(usize, &'c ChoiceOption)>,
    ) -> Self {
        Self {
            page,
            label: label.into(),
            origin,
            key,
            level,
            options: options
                .into_iter()
                .map(|(index, option)| (index, Cow::Borrowed(option)))
                .collect(),
        }
    }

    /// Path of the slot at `index`.
    pub fn path(&self, index: usize) -> SourcePath {
        SourcePath::new(self.origin, self.key, self.level, index)
    }

    pub fn has_slots(&self) -> bool {
        !self.options.is_empty()
    }
}

pub fn race_node(race: &Race, level: u8) -> ChoiceNode<'_> {
    ChoiceNode::indexed(
        Page::Race,
        &race.name,
        OriginKind::Race,
        &race.key,
        None,
        race.choice_options(level),
    )
}

pub fn subrace_node(subrace: &Subrace, level: u8) -> ChoiceNode<'_> {
    ChoiceNode::indexed(
        Page::Race,
        &subrace.name,
        OriginKind::Subrace,
        &subrace.key,
        None,
        subrace.choice_options(level),
    )
}

pub fn variant_node(variant: &RaceVariant, level: u8) -> ChoiceNode<'_> {
    ChoiceNode::indexed(
        Page::Race,
        &variant.name,
        OriginKind::Variant,
        &variant.key,
        None,
        variant.choice_options(level),
    )
}

/// One class level. The level that unlocks subclasses leads with the
/// synthetic subclass slot.
pub fn class_level_node(class: &Class, level: u8) -> ChoiceNode<'_> {
    let mut options: Vec<Cow<'_, ChoiceOption>> = class
        .choice_options_at(level)
        .into_iter()
        .map(Cow::Borrowed)
        .collect();
    if class.subclass_level == Some(level) {
        if let Some(choice) = class.subclass_choice() {
            options.insert(0, Cow::Owned(choice));
        }
    }
    ChoiceNode {
        page: Page::Class,
        label: format!("{} level {}", class.name, level),
        origin: OriginKind::Class,
        key: &class.key,
        level: Some(level),
        options: options.into_iter().enumerate().collect(),
    }
}

pub fn subclass_level_node(subclass: &Subclass, level: u8) -> ChoiceNode<'_> {
    ChoiceNode::new(
        Page::Class,
        format!("{} level {}", subclass.name, level),
        OriginKind::Subclass,
        &subclass.key,
        Some(level),
        subclass.choice_options_at(level),
    )
}

pub fn background_node(background: &Background) -> ChoiceNode<'_> {
    ChoiceNode::new(
        Page::Background,
        &background.name,
        OriginKind::Background,
        &background.key,
        None,
        background.choice_options(),
    )
}

/// A feat's own choices, addressed the same way as when the feat is picked
/// through a `feat` slot.
pub fn feat_node(feat: &Feat, page: Page) -> ChoiceNode<'_> {
    ChoiceNode::new(
        page,
        &feat.name,
        OriginKind::Feat,
        &feat.key,
        None,
        feat.choice_options(),
    )
}

/// Variants offered by a race and its subrace.
pub fn offered_variants<'c>(
    race: &'c Race,
    subrace: Option<&'c Subrace>,
) -> impl Iterator<Item = &'c RaceVariant> {
    race.variants
        .iter()
        .chain(subrace.into_iter().flat_map(|s| s.variants.iter()))
}

pub fn find_variant<'c>(
    race: &'c Race,
    subrace: Option<&'c Subrace>,
    key: &str,
) -> Option<&'c RaceVariant> {
    offered_variants(race, subrace).find(|v| v.key == key)
}

/// Race, subrace and variant resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct RaceSelection<'c> {
    pub race: &'c Race,
    pub subrace: Option<&'c Subrace>,
    pub variant: Option<&'c RaceVariant>,
}

impl<'c> RaceSelection<'c> {
    pub fn resolve(draft: &CharacterDraft, catalog: &'c Catalog) -> Option<Self> {
        let basics = draft.basics();
        let race = basics.race.as_deref().and_then(|key| catalog.race(key))?;
        let subrace = basics
            .subrace
            .as_deref()
            .and_then(|key| catalog.subrace_of(&race.key, key));
        let variant = basics
            .race_variant
            .as_deref()
            .and_then(|key| find_variant(race, subrace, key));
        Some(Self {
            race,
            subrace,
            variant,
        })
    }
}

/// Class and subclass resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ClassSelection<'c> {
    pub class: &'c Class,
    pub subclass: Option<&'c Subclass>,
}

impl<'c> ClassSelection<'c> {
    pub fn resolve(draft: &CharacterDraft, catalog: &'c Catalog) -> Option<Self> {
        let basics = draft.basics();
        let class = basics.class.as_deref().and_then(|key| catalog.class(key))?;
        let subclass = basics
            .subclass
            .as_deref()
            .and_then(|key| catalog.subclass_of(&class.key, key));
        Some(Self { class, subclass })
    }

    /// Subclass levels reached at `level` that grant features.
    pub fn subclass_levels(&self, level: u8) -> Vec<u8> {
        self.subclass
            .map(|s| s.feature_levels().into_iter().filter(|l| *l <= level).collect())
            .unwrap_or_default()
    }
}

/// Every node whose catalog entry is selected and known, in traversal
/// order: race, subrace, variant, class levels, subclass levels, background.
pub fn reachable_nodes<'c>(draft: &CharacterDraft, catalog: &'c Catalog) -> Vec<ChoiceNode<'c>> {
    let level = draft.level();
    let mut nodes = Vec::new();

    if let Some(selection) = RaceSelection::resolve(draft, catalog) {
        nodes.push(race_node(selection.race, level));
        if let Some(subrace) = selection.subrace {
            nodes.push(subrace_node(subrace, level));
        }
        if let Some(variant) = selection.variant {
            nodes.push(variant_node(variant, level));
        }
    }

    if let Some(selection) = ClassSelection::resolve(draft, catalog) {
        for class_level in 1..=level {
            nodes.push(class_level_node(selection.class, class_level));
        }
        if let Some(subclass) = selection.subclass {
            for subclass_level in selection.subclass_levels(level) {
                nodes.push(subclass_level_node(subclass, subclass_level));
            }
        }
    }

    if let Some(background) = draft
        .basics()
        .background
        .as_deref()
        .and_then(|key| catalog.background(key))
    {
        nodes.push(background_node(background));
    }

    nodes
}

/// One slot seen during a walk.
#[derive(Debug, Clone, Copy)]
pub struct SlotVisit<'v> {
    pub path: &'v SourcePath,
    pub option: &'v ChoiceOption,
    /// Non-blank selections, at most `option.count` of them.
    pub selections: &'v [&'v str],
    /// 0 for the node's own slots, +1 per feature/feat descent.
    pub depth: usize,
}

/// Visit every slot of `node` in pre-order, descending into selected
/// features and feats that carry choices of their own.
pub fn walk_slots<F>(node: &ChoiceNode<'_>, draft: &CharacterDraft, catalog: &Catalog, visit: &mut F)
where
    F: FnMut(SlotVisit<'_>),
{
    let options: Vec<(usize, &ChoiceOption)> = node
        .options
        .iter()
        .map(|(index, option)| (*index, option.as_ref()))
        .collect();
    let mut trail = Vec::new();
    let walk = Walk { draft, catalog };
    walk.options(node.origin, node.key, node.level, &options, 0, &mut trail, visit);
}

struct Walk<'a> {
    draft: &'a CharacterDraft,
    catalog: &'a Catalog,
}

impl Walk<'_> {
    fn options<F>(
        &self,
        origin: OriginKind,
        key: &str,
        level: Option<u8>,
        options: &[(usize, &ChoiceOption)],
        depth: usize,
        trail: &mut Vec<(OriginKind, String)>,
        visit: &mut F,
    ) where
        F: FnMut(SlotVisit<'_>),
    {
        for (index, option) in options.iter().copied() {
            let path = SourcePath::new(origin, key, level, index);
            let selections = self.selections(&path, option);
            visit(SlotVisit {
                path: &path,
                option,
                selections: &selections,
                depth,
            });

            let nested_origin = match option.kind {
                ChoiceType::Feature => OriginKind::Feature,
                ChoiceType::Feat => OriginKind::Feat,
                _ => continue,
            };

            for chosen in selections.iter().copied() {
                if trail.iter().any(|(o, k)| *o == nested_origin && k == chosen) {
                    tracing::debug!(key = %chosen, path = %path, "Skipping cyclic selection");
                    continue;
                }
                let nested = match nested_origin {
                    OriginKind::Feature => self.catalog.feature(chosen).map(|f| f.choice_options()),
                    _ => self.catalog.feat(chosen).map(|f| f.choice_options()),
                };
                let Some(nested) = nested else {
                    tracing::debug!(key = %chosen, kind = %option.kind, "Selected key not in catalog");
                    continue;
                };
                if nested.is_empty() {
                    continue;
                }
                let nested: Vec<(usize, &ChoiceOption)> = nested.into_iter().enumerate().collect();

                trail.push((nested_origin, chosen.to_string()));
                self.options(nested_origin, chosen, None, &nested, depth + 1, trail, visit);
                trail.pop();
            }
        }
    }

    /// Selections that count toward a slot. Subclass slots read the draft's
    /// subclass instead of the ledger.
    fn selections(&self, path: &SourcePath, option: &ChoiceOption) -> Vec<&str> {
        let mut selected: Vec<&str> = if option.kind == ChoiceType::Subclass {
            self.draft
                .basics()
                .subclass
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .into_iter()
                .collect()
        } else {
            self.draft.chosen().selected(path, option.kind)
        };
        selected.truncate(option.count as usize);
        selected
    }
}
