//! Spellcasting: prepared-spell limits, slots, save DC and attack bonus.

use std::collections::BTreeMap;

use charbldr_domain::{
    ability_modifier,
    game_systems::dnd5e::{spell_attack_bonus, spell_save_dc, spell_slots},
    Ability, AbilityScores, CasterType, Class, Formula, FormulaContext, Spellcasting, Subclass,
};
use serde::Serialize;

/// Substituted when a prepared-spell formula cannot be parsed or evaluated.
const FALLBACK_PREPARED: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingSummary {
    /// Key of the class or subclass that grants spellcasting.
    pub source: String,
    pub ability: Ability,
    pub progression: CasterType,
    pub ability_modifier: i32,
    pub spell_save_dc: i32,
    pub spell_attack_bonus: i32,
    pub prepared_limit: u32,
    /// Slots by spell level.
    pub slots: BTreeMap<u8, u8>,
}

/// Prepared-spell limit for `level` and `ability_mod`.
///
/// The formula is evaluated in floating point, truncated toward zero and
/// floored at 0. A broken formula yields 1 and is logged.
pub fn prepared_spell_limit(spellcasting: &Spellcasting, level: u8, ability_mod: i32) -> u32 {
    let formula = match spellcasting.prepared_formula.as_deref() {
        None => Ok(Formula::default_prepared()),
        Some(source) => Formula::parse(source),
    };
    let ctx = FormulaContext { level, ability_mod };
    match formula.and_then(|f| f.eval(&ctx)) {
        // Saturating cast; the value is finite and non-negative here.
        Ok(value) => value.trunc().max(0.0) as u32,
        Err(error) => {
            tracing::warn!(
                formula = ?spellcasting.prepared_formula,
                error = %error,
                "Prepared spell formula failed, using fallback"
            );
            FALLBACK_PREPARED
        }
    }
}

/// Spellcasting granted by the class, or failing that by the subclass.
/// `scores` are final scores.
pub fn spellcasting_summary(
    class: &Class,
    subclass: Option<&Subclass>,
    level: u8,
    scores: &AbilityScores,
) -> Option<SpellcastingSummary> {
    let (source, spellcasting) = match (&class.spellcasting, subclass) {
        (Some(spellcasting), _) => (class.key.as_str(), spellcasting),
        (None, Some(subclass)) => (subclass.key.as_str(), subclass.spellcasting.as_ref()?),
        (None, None) => return None,
    };

    let modifier = ability_modifier(scores.score(spellcasting.ability));
    Some(SpellcastingSummary {
        source: source.to_string(),
        ability: spellcasting.ability,
        progression: spellcasting.progression,
        ability_modifier: modifier,
        spell_save_dc: spell_save_dc(level, modifier),
        spell_attack_bonus: spell_attack_bonus(level, modifier),
        prepared_limit: prepared_spell_limit(spellcasting, level, modifier),
        slots: spell_slots(spellcasting.progression, level),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::catalog;

    fn half_caster(formula: &str) -> Spellcasting {
        Spellcasting::new(Ability::Cha, CasterType::Half).with_prepared_formula(formula)
    }

    #[test]
    fn paladin_five_with_plus_two() {
        assert_eq!(prepared_spell_limit(&half_caster("floor(level/2)+abilityMod"), 5, 2), 4);
    }

    #[test]
    fn default_formula_is_level_plus_mod_at_least_one() {
        let wizard = Spellcasting::new(Ability::Int, CasterType::Full);
        assert_eq!(prepared_spell_limit(&wizard, 3, 3), 6);
        assert_eq!(prepared_spell_limit(&wizard, 1, -3), 1);
    }

    #[test]
    fn malformed_formula_falls_back_to_one() {
        assert_eq!(prepared_spell_limit(&half_caster("floor(level/"), 5, 2), 1);
        assert_eq!(prepared_spell_limit(&half_caster("level + charm"), 5, 2), 1);
        assert_eq!(prepared_spell_limit(&half_caster("level / (abilityMod - 2)"), 5, 2), 1);
    }

    #[test]
    fn negative_results_floor_at_zero() {
        assert_eq!(prepared_spell_limit(&half_caster("abilityMod"), 5, -1), 0);
        assert_eq!(prepared_spell_limit(&half_caster("level / 4"), 3, 0), 0);
    }

    #[test]
    fn subclass_spellcasting_is_used_when_class_has_none() {
        let catalog = catalog::srd();
        let fighter = catalog.class("fighter").expect("fighter");
        let knight = catalog.subclass_of("fighter", "eldritch-knight");
        let scores = AbilityScores::from_array([16, 12, 14, 14, 10, 8]);

        let summary = spellcasting_summary(fighter, knight, 3, &scores).expect("casts");
        assert_eq!(summary.source, "eldritch-knight");
        assert_eq!(summary.spell_save_dc, 8 + 2 + 2);
        assert_eq!(summary.slots.get(&1), Some(&2));

        assert!(spellcasting_summary(fighter, None, 3, &scores).is_none());
    }

    #[test]
    fn class_summary_includes_slots_and_dc() {
        let catalog = catalog::srd();
        let paladin = catalog.class("paladin").expect("paladin");
        let scores = AbilityScores::from_array([16, 10, 14, 8, 10, 14]);
        let summary = spellcasting_summary(paladin, None, 5, &scores).expect("casts");
        assert_eq!(summary.prepared_limit, 4);
        assert_eq!(summary.spell_attack_bonus, 3 + 2);
        assert_eq!(summary.slots.get(&1), Some(&4));
        assert_eq!(summary.slots.get(&2), Some(&2));
    }
}
