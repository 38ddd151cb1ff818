//! Read-only rule catalog.
//!
//! Lookups return `Option`: a key the catalog does not know is "absent",
//! never an error. On the wire a catalog is a JSON object of arrays; in
//! memory every table is keyed for lookup.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{
    Armor, ArmorCategory, Background, Class, Feat, Feature, Race, Spell, Subclass, Subrace, Tool,
    Weapon,
};
use crate::game_systems::dnd5e;
use crate::value_objects::Ability;

/// A skill and the ability it keys off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDef {
    pub key: String,
    pub name: String,
    pub ability: Ability,
}

impl SkillDef {
    pub fn new(key: impl Into<String>, name: impl Into<String>, ability: Ability) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            ability,
        }
    }
}

/// Serialized catalog layout. Empty skill and language tables fall back to
/// the standard 5e lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogData {
    pub races: Vec<Race>,
    pub subraces: Vec<Subrace>,
    pub classes: Vec<Class>,
    pub subclasses: Vec<Subclass>,
    pub backgrounds: Vec<Background>,
    pub feats: Vec<Feat>,
    pub features: Vec<Feature>,
    pub spells: Vec<Spell>,
    pub weapons: Vec<Weapon>,
    pub armors: Vec<Armor>,
    pub tools: Vec<Tool>,
    pub skills: Vec<SkillDef>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CatalogData", into = "CatalogData")]
pub struct Catalog {
    races: BTreeMap<String, Race>,
    subraces: BTreeMap<String, Subrace>,
    classes: BTreeMap<String, Class>,
    subclasses: BTreeMap<String, Subclass>,
    backgrounds: BTreeMap<String, Background>,
    feats: BTreeMap<String, Feat>,
    features: BTreeMap<String, Feature>,
    spells: BTreeMap<String, Spell>,
    weapons: BTreeMap<String, Weapon>,
    armors: BTreeMap<String, Armor>,
    tools: BTreeMap<String, Tool>,
    skills: BTreeMap<String, SkillDef>,
    languages: BTreeSet<String>,
}

fn keyed<T>(items: Vec<T>, key: impl Fn(&T) -> &str) -> BTreeMap<String, T> {
    items.into_iter().map(|item| (key(&item).to_string(), item)).collect()
}

impl From<CatalogData> for Catalog {
    fn from(data: CatalogData) -> Self {
        let skills = if data.skills.is_empty() {
            dnd5e::STANDARD_SKILLS
                .iter()
                .map(|(key, name, ability)| SkillDef::new(*key, *name, *ability))
                .collect()
        } else {
            data.skills
        };
        let languages = if data.languages.is_empty() {
            dnd5e::STANDARD_LANGUAGES.iter().map(|l| l.to_string()).collect()
        } else {
            data.languages.into_iter().collect()
        };

        Self {
            races: keyed(data.races, |r| r.key.as_str()),
            subraces: keyed(data.subraces, |r| r.key.as_str()),
            classes: keyed(data.classes, |c| c.key.as_str()),
            subclasses: keyed(data.subclasses, |c| c.key.as_str()),
            backgrounds: keyed(data.backgrounds, |b| b.key.as_str()),
            feats: keyed(data.feats, |f| f.key.as_str()),
            features: keyed(data.features, |f| f.key.as_str()),
            spells: keyed(data.spells, |s| s.key.as_str()),
            weapons: keyed(data.weapons, |w| w.key.as_str()),
            armors: keyed(data.armors, |a| a.key.as_str()),
            tools: keyed(data.tools, |t| t.key.as_str()),
            skills: keyed(skills, |s| s.key.as_str()),
            languages,
        }
    }
}

impl From<Catalog> for CatalogData {
    fn from(catalog: Catalog) -> Self {
        Self {
            races: catalog.races.into_values().collect(),
            subraces: catalog.subraces.into_values().collect(),
            classes: catalog.classes.into_values().collect(),
            subclasses: catalog.subclasses.into_values().collect(),
            backgrounds: catalog.backgrounds.into_values().collect(),
            feats: catalog.feats.into_values().collect(),
            features: catalog.features.into_values().collect(),
            spells: catalog.spells.into_values().collect(),
            weapons: catalog.weapons.into_values().collect(),
            armors: catalog.armors.into_values().collect(),
            tools: catalog.tools.into_values().collect(),
            skills: catalog.skills.into_values().collect(),
            languages: catalog.languages.into_iter().collect(),
        }
    }
}

impl Default for Catalog {
    /// An empty catalog with the standard skills and languages.
    fn default() -> Self {
        CatalogData::default().into()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // Builders

    pub fn with_race(mut self, race: Race) -> Self {
        self.races.insert(race.key.clone(), race);
        self
    }

    pub fn with_subrace(mut self, subrace: Subrace) -> Self {
        self.subraces.insert(subrace.key.clone(), subrace);
        self
    }

    pub fn with_class(mut self, class: Class) -> Self {
        self.classes.insert(class.key.clone(), class);
        self
    }

    pub fn with_subclass(mut self, subclass: Subclass) -> Self {
        self.subclasses.insert(subclass.key.clone(), subclass);
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.backgrounds.insert(background.key.clone(), background);
        self
    }

    pub fn with_feat(mut self, feat: Feat) -> Self {
        self.feats.insert(feat.key.clone(), feat);
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature.key.clone(), feature);
        self
    }

    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.spells.insert(spell.key.clone(), spell);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.insert(weapon.key.clone(), weapon);
        self
    }

    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armors.insert(armor.key.clone(), armor);
        self
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.insert(tool.key.clone(), tool);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.insert(language.into());
        self
    }

    // Lookups

    pub fn race(&self, key: &str) -> Option<&Race> {
        self.races.get(key)
    }

    /// A subrace, only if it belongs to `race`.
    pub fn subrace_of(&self, race: &str, key: &str) -> Option<&Subrace> {
        self.subraces.get(key).filter(|s| s.race == race)
    }

    pub fn class(&self, key: &str) -> Option<&Class> {
        self.classes.get(key)
    }

    /// A subclass, only if it belongs to `class`.
    pub fn subclass_of(&self, class: &str, key: &str) -> Option<&Subclass> {
        self.subclasses.get(key).filter(|s| s.class == class)
    }

    pub fn background(&self, key: &str) -> Option<&Background> {
        self.backgrounds.get(key)
    }

    pub fn feat(&self, key: &str) -> Option<&Feat> {
        self.feats.get(key)
    }

    pub fn feature(&self, key: &str) -> Option<&Feature> {
        self.features.get(key)
    }

    pub fn spell(&self, key: &str) -> Option<&Spell> {
        self.spells.get(key)
    }

    pub fn weapon(&self, key: &str) -> Option<&Weapon> {
        self.weapons.get(key)
    }

    pub fn armor(&self, key: &str) -> Option<&Armor> {
        self.armors.get(key)
    }

    pub fn tool(&self, key: &str) -> Option<&Tool> {
        self.tools.get(key)
    }

    pub fn skill(&self, key: &str) -> Option<&SkillDef> {
        self.skills.get(key)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDef> {
        self.skills.values()
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains(language)
    }

    // Category expansion

    pub fn weapons_in_category(&self, category: &str) -> Vec<&str> {
        self.weapons
            .values()
            .filter(|w| w.category == category)
            .map(|w| w.key.as_str())
            .collect()
    }

    pub fn armors_in_category(&self, category: &str) -> Vec<&str> {
        self.armors
            .values()
            .filter(|a| a.category.as_str() == category)
            .map(|a| a.key.as_str())
            .collect()
    }

    pub fn armors_of(&self, category: ArmorCategory) -> Vec<&str> {
        self.armors_in_category(category.as_str())
    }

    pub fn tools_in_category(&self, category: &str) -> Vec<&str> {
        self.tools
            .values()
            .filter(|t| t.category.as_deref() == Some(category))
            .map(|t| t.key.as_str())
            .collect()
    }

    /// Skills keyed off `ability`.
    pub fn skills_for(&self, ability: Ability) -> Vec<&str> {
        self.skills
            .values()
            .filter(|s| s.ability == ability)
            .map(|s| s.key.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_knows_standard_skills_and_languages() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.skill("perception").map(|s| s.ability),
            Some(Ability::Wis)
        );
        assert!(catalog.has_language("common"));
        assert!(catalog.race("elf").is_none());
    }

    #[test]
    fn categories_expand_to_keys() {
        let catalog = Catalog::new()
            .with_weapon(Weapon::new("longsword", "Longsword", "martial"))
            .with_weapon(Weapon::new("dagger", "Dagger", "simple"))
            .with_armor(Armor::new("leather", "Leather", ArmorCategory::Light, 11))
            .with_armor(Armor::new("shield", "Shield", ArmorCategory::Shield, 2));
        assert_eq!(catalog.weapons_in_category("martial"), vec!["longsword"]);
        assert_eq!(catalog.armors_of(ArmorCategory::Shield), vec!["shield"]);
        assert!(catalog.weapons_in_category("exotic").is_empty());
    }

    #[test]
    fn subrace_lookup_checks_parent() {
        let catalog = Catalog::new().with_subrace(Subrace::new("hill-dwarf", "Hill Dwarf", "dwarf"));
        assert!(catalog.subrace_of("dwarf", "hill-dwarf").is_some());
        assert!(catalog.subrace_of("elf", "hill-dwarf").is_none());
    }

    #[test]
    fn loads_from_array_json() {
        let catalog: Catalog = serde_json::from_str(
            r#"{
                "classes": [{"key": "wizard", "name": "Wizard", "hitDie": 6}],
                "languages": ["common", "elvish"]
            }"#,
        )
        .expect("catalog");
        assert_eq!(catalog.class("wizard").map(|c| c.hit_die), Some(6));
        assert!(catalog.has_language("elvish"));
        assert!(!catalog.has_language("dwarvish"));
    }
}
