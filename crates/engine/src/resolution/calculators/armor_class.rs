//! Armor class.

use charbldr_domain::{
    ability_modifier, Ability, AbilityScores, AggregatedCharacterData, Catalog, CharacterDraft,
};
use serde::Serialize;

/// Base AC without armor.
const UNARMORED_AC: i32 = 10;

/// Fighting style granting +1 AC while wearing armor.
const DEFENSE_STYLE: &str = "defense";

/// AC and where each part of it came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorClass {
    pub base: i32,
    pub dex_bonus: i32,
    pub shield: i32,
    pub fighting_style: i32,
    pub ad_hoc: i32,
    pub total: i32,
}

/// AC from equipped armor and shield, final DEX, fighting styles and the
/// draft's ad-hoc bonuses. Unknown armor keys count as unarmored.
pub fn armor_class(
    draft: &CharacterDraft,
    catalog: &Catalog,
    scores: &AbilityScores,
    data: &AggregatedCharacterData,
) -> ArmorClass {
    let equipped = draft.equipped();
    let armor = equipped.armor.as_deref().and_then(|key| {
        let armor = catalog.armor(key).filter(|a| !a.is_shield());
        if armor.is_none() {
            tracing::debug!(armor = %key, "Equipped armor not in catalog");
        }
        armor
    });
    let shield = equipped
        .shield
        .as_deref()
        .and_then(|key| catalog.armor(key))
        .filter(|a| a.is_shield());

    let dex_mod = ability_modifier(scores.score(Ability::Dex));
    let (base, dex_bonus) = match armor {
        Some(armor) => {
            let dex = armor.max_dex_bonus.map_or(dex_mod, |max| dex_mod.min(max));
            (armor.base_ac, dex)
        }
        None => (UNARMORED_AC, dex_mod),
    };
    let shield = shield.map_or(0, |s| s.base_ac);
    let fighting_style = i32::from(armor.is_some() && data.has_fighting_style(DEFENSE_STYLE));
    let ad_hoc = draft
        .ac_bonuses()
        .iter()
        .map(|b| b.bonus)
        .fold(0, i32::saturating_add);

    ArmorClass {
        base,
        dex_bonus,
        shield,
        fighting_style,
        ad_hoc,
        total: [dex_bonus, shield, fighting_style, ad_hoc]
            .into_iter()
            .fold(base, i32::saturating_add),
    }
}
