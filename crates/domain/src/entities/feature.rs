//! Class features, racial traits and background features.
//!
//! A feature either does nothing mechanical, asks the player for choices,
//! or bundles further features. [`Feature::walk`] is the one recursive
//! traversal used to collect both choice slots and fixed grants.

use serde::{Deserialize, Serialize};

use super::{ChoiceOption, Grants};

fn default_level() -> u8 {
    1
}

/// What a feature contains beyond its own grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FeatureBody {
    #[default]
    Simple,
    WithChoices(Vec<ChoiceOption>),
    Grants(Vec<Feature>),
}

/// A named feature unlocked at a level.
///
/// Nested features inherit their parent's level; only top-level levels are
/// consulted when deciding what a character has unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub key: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    /// Free-form category, e.g. "fighting-style".
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub grants: Grants,
    #[serde(default)]
    pub body: FeatureBody,
}

/// Category marking a feature as a fighting style.
pub const FIGHTING_STYLE_CATEGORY: &str = "fighting-style";

/// Callbacks for [`Feature::walk`].
pub trait FeatureVisitor<'a> {
    /// Called for every feature, parents before children.
    fn visit_feature(&mut self, _feature: &'a Feature) {}

    /// Called for every choice slot in pre-order.
    fn visit_choice(&mut self, _choice: &'a ChoiceOption) {}
}

impl Feature {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            level: default_level(),
            category: None,
            grants: Grants::default(),
            body: FeatureBody::Simple,
        }
    }

    pub fn at_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_grants(mut self, grants: Grants) -> Self {
        self.grants = grants;
        self
    }

    pub fn with_choices(mut self, choices: Vec<ChoiceOption>) -> Self {
        self.body = FeatureBody::WithChoices(choices);
        self
    }

    pub fn with_sub_features(mut self, features: Vec<Feature>) -> Self {
        self.body = FeatureBody::Grants(features);
        self
    }

    pub fn is_fighting_style(&self) -> bool {
        self.category.as_deref() == Some(FIGHTING_STYLE_CATEGORY)
    }

    /// Pre-order walk over this feature and everything it bundles.
    pub fn walk<'a, V: FeatureVisitor<'a>>(&'a self, visitor: &mut V) {
        visitor.visit_feature(self);
        match &self.body {
            FeatureBody::Simple => {}
            FeatureBody::WithChoices(choices) => {
                for choice in choices {
                    visitor.visit_choice(choice);
                }
            }
            FeatureBody::Grants(features) => {
                for feature in features {
                    feature.walk(visitor);
                }
            }
        }
    }

    /// Every choice slot in this feature tree, in pre-order.
    pub fn choice_options(&self) -> Vec<&ChoiceOption> {
        let mut collector = ChoiceCollector::default();
        self.walk(&mut collector);
        collector.choices
    }

    /// This feature and every bundled feature, parents first.
    pub fn flatten(&self) -> Vec<&Feature> {
        let mut collector = FeatureCollector::default();
        self.walk(&mut collector);
        collector.features
    }
}

#[derive(Default)]
struct ChoiceCollector<'a> {
    choices: Vec<&'a ChoiceOption>,
}

impl<'a> FeatureVisitor<'a> for ChoiceCollector<'a> {
    fn visit_choice(&mut self, choice: &'a ChoiceOption) {
        self.choices.push(choice);
    }
}

#[derive(Default)]
struct FeatureCollector<'a> {
    features: Vec<&'a Feature>,
}

impl<'a> FeatureVisitor<'a> for FeatureCollector<'a> {
    fn visit_feature(&mut self, feature: &'a Feature) {
        self.features.push(feature);
    }
}

/// Flattened choice list of a catalog node: its own choices first, then
/// each feature's choices in pre-order.
pub fn flatten_choices<'a>(
    own: &'a [ChoiceOption],
    features: impl IntoIterator<Item = &'a Feature>,
) -> Vec<&'a ChoiceOption> {
    let mut choices: Vec<&ChoiceOption> = own.iter().collect();
    for feature in features {
        choices.extend(feature.choice_options());
    }
    choices
}
