//! Maximum hit points.

use charbldr_domain::{
    ability_modifier, game_systems::dnd5e::average_hit_die_roll, Ability, AggregatedCharacterData,
    CharacterDraft, Class, HpMode,
};

/// Max HP from the class hit die, final CON and flat per-level bonuses.
///
/// Level 1 takes the full die. Later levels take the fixed average or the
/// recorded roll; a missing or zero roll counts as 1. No class means 0.
/// Sums saturate, so oversized rolls cannot overflow.
pub fn max_hit_points(
    draft: &CharacterDraft,
    class: Option<&Class>,
    data: &AggregatedCharacterData,
) -> i32 {
    let Some(class) = class else {
        return 0;
    };
    let level = draft.level();
    let con = data.final_score(Ability::Con, draft.basics().ability_scores.score(Ability::Con));
    let con_mod = ability_modifier(con);
    let die = i32::from(class.hit_die);

    let later_levels: i32 = (2..=level)
        .map(|l| {
            let gained = match draft.basics().hp_mode {
                HpMode::Fixed => average_hit_die_roll(class.hit_die),
                HpMode::Roll => match draft.hp_roll(l) {
                    Some(roll) if roll > 0 => i32::try_from(roll).unwrap_or(i32::MAX),
                    _ => 1,
                },
            };
            gained.saturating_add(con_mod)
        })
        .fold(0, i32::saturating_add);

    die.saturating_add(con_mod)
        .saturating_add(later_levels)
        .saturating_add(data.hp_per_level.saturating_mul(i32::from(level)))
        .max(0)
}

#[cfg(test)]
mod tests {
    use charbldr_domain::AbilityScores;

    use super::*;

    fn class(key: &str, hit_die: u8) -> Class {
        Class::new(key, key, hit_die)
    }

    fn scores_with_con(con: i32) -> AbilityScores {
        AbilityScores::from_array([10, 10, con, 10, 10, 10])
    }

    #[test]
    fn no_class_means_zero() {
        let draft = CharacterDraft::new();
        assert_eq!(max_hit_points(&draft, None, &AggregatedCharacterData::default()), 0);
    }

    #[test]
    fn fixed_fighter_five_with_con_fourteen() {
        let draft = CharacterDraft::new()
            .with_level(5)
            .with_ability_scores(scores_with_con(14));
        let hp = max_hit_points(&draft, Some(&class("fighter", 10)), &AggregatedCharacterData::default());
        assert_eq!(hp, 44);
    }

    #[test]
    fn rolled_barbarian_three() {
        let draft = CharacterDraft::new()
            .with_level(3)
            .with_hp_mode(HpMode::Roll)
            .with_ability_scores(scores_with_con(16))
            .with_hp_roll(2, 8)
            .with_hp_roll(3, 5);
        let hp = max_hit_points(&draft, Some(&class("barbarian", 12)), &AggregatedCharacterData::default());
        assert_eq!(hp, 34);
    }

    #[test]
    fn missing_and_zero_rolls_count_as_one() {
        let draft = CharacterDraft::new()
            .with_level(3)
            .with_hp_mode(HpMode::Roll)
            .with_ability_scores(scores_with_con(10))
            .with_hp_roll(2, 0);
        let hp = max_hit_points(&draft, Some(&class("wizard", 6)), &AggregatedCharacterData::default());
        assert_eq!(hp, 6 + 1 + 1);
    }

    #[test]
    fn per_level_bonus_and_con_bonus_apply() {
        let mut data = AggregatedCharacterData::default();
        data.hp_per_level = 1;
        data.ability_bonuses.insert(Ability::Con, 2);
        let draft = CharacterDraft::new()
            .with_level(2)
            .with_ability_scores(scores_with_con(13));
        // CON 15 -> +2: 10 + 2, then 6 + 2, then 2 x 1
        let hp = max_hit_points(&draft, Some(&class("fighter", 10)), &data);
        assert_eq!(hp, 22);
    }

    #[test]
    fn oversized_rolls_saturate() {
        let draft = CharacterDraft::new()
            .with_level(3)
            .with_hp_mode(HpMode::Roll)
            .with_ability_scores(scores_with_con(10))
            .with_hp_roll(2, 3_000_000_000)
            .with_hp_roll(3, u32::MAX);
        let hp = max_hit_points(&draft, Some(&class("rogue", 8)), &AggregatedCharacterData::default());
        assert_eq!(hp, i32::MAX);
    }

    #[test]
    fn never_negative() {
        let draft = CharacterDraft::new()
            .with_level(4)
            .with_ability_scores(scores_with_con(1));
        let hp = max_hit_points(&draft, Some(&class("wizard", 6)), &AggregatedCharacterData::default());
        assert_eq!(hp, 0);
    }
}
