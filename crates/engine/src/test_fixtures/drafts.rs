//! Draft builders over the fixture catalog.

use charbldr_domain::{AbilityScores, CharacterDraft, ChoiceType, SourcePath};

/// STR 15, DEX 14, CON 13, INT 12, WIS 10, CHA 8.
pub fn standard_array() -> AbilityScores {
    AbilityScores::from_array([15, 14, 13, 12, 10, 8])
}

pub fn blank() -> CharacterDraft {
    CharacterDraft::new()
}

fn character(race: &str, class: &str, background: &str, level: u8) -> CharacterDraft {
    CharacterDraft::new()
        .with_race(Some(race.into()))
        .with_class(Some(class.into()))
        .with_background(Some(background.into()))
        .with_level(level)
        .with_ability_scores(standard_array())
}

/// Hill dwarf fighter with a soldier background and no choices recorded.
pub fn dwarf_fighter(level: u8) -> CharacterDraft {
    character("dwarf", "fighter", "soldier", level).with_subrace(Some("hill-dwarf".into()))
}

/// Level 1 hill dwarf fighter with every choice made.
pub fn complete_dwarf_fighter() -> CharacterDraft {
    dwarf_fighter(1)
        .with_name("Brottor")
        .with_choice(SourcePath::race("dwarf", 0), ChoiceType::Tool, ["smiths-tools"])
        .with_choice(
            SourcePath::class("fighter", 1, 0),
            ChoiceType::Skill,
            ["athletics", "perception"],
        )
        .with_choice(SourcePath::class("fighter", 1, 1), ChoiceType::Feature, ["defense"])
        .with_choice(SourcePath::background("soldier", 0), ChoiceType::Tool, ["dice-set"])
}

pub fn half_elf_fighter(level: u8) -> CharacterDraft {
    character("half-elf", "fighter", "soldier", level)
}

pub fn human_wizard(level: u8) -> CharacterDraft {
    character("human", "wizard", "acolyte", level)
}

pub fn human_paladin(level: u8) -> CharacterDraft {
    character("human", "paladin", "acolyte", level)
}

/// A class and scores only, for calculator scenarios.
pub fn bare_class(class: &str, level: u8, scores: AbilityScores) -> CharacterDraft {
    CharacterDraft::new()
        .with_class(Some(class.into()))
        .with_level(level)
        .with_ability_scores(scores)
}
