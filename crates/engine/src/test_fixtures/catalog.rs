//! An SRD-flavoured catalog covering every rule the engine resolves.
//!
//! - Races: human, dwarf (hill dwarf), dragonborn (draconic ancestry
//!   variants), half-elf
//! - Classes: fighter, barbarian, wizard, paladin, cleric, each with one or
//!   two subclasses
//! - Backgrounds: soldier, acolyte
//! - Feats: alert, tough, resilient, weapon-master, skilled, boon-of-might
//! - Fighting styles as catalog features, blessed warrior with nested
//!   spell picks

use charbldr_domain::{
    Ability, Armor, ArmorCategory, Background, CasterType, Catalog, ChoiceOption, ChoiceType,
    Class, ClassResources, Feat, Feature, Grants, Proficiency, Race, RaceVariant,
    ResourceStep, Spell, Spellcasting, Subclass, Subrace, Tool, Weapon, FIGHTING_STYLE_CATEGORY,
};

pub fn srd() -> Catalog {
    let catalog = Catalog::new();
    let catalog = races(catalog);
    let catalog = classes(catalog);
    let catalog = backgrounds(catalog);
    let catalog = feats(catalog);
    let catalog = fighting_styles(catalog);
    equipment(spells(catalog))
}

fn all_abilities_plus(bonus: i32) -> Grants {
    Ability::ALL
        .iter()
        .fold(Grants::new(), |grants, ability| grants.with_ability_bonus(*ability, bonus))
}

fn any(kind: ChoiceType, count: u32) -> ChoiceOption {
    ChoiceOption::new(kind, count, Vec::<String>::new())
}

fn races(catalog: Catalog) -> Catalog {
    catalog
        .with_race(
            Race::new("human", "Human")
                .with_grants(all_abilities_plus(1).with_language("common"))
                .with_choice(any(ChoiceType::Language, 1)),
        )
        .with_race(
            Race::new("dwarf", "Dwarf")
                .with_speed(25)
                .with_grants(
                    Grants::new()
                        .with_ability_bonus(Ability::Con, 2)
                        .with_proficiency(Proficiency::weapon("battleaxe"))
                        .with_language("common")
                        .with_language("dwarvish"),
                )
                .with_choice(
                    ChoiceOption::new(
                        ChoiceType::Tool,
                        1,
                        ["smiths-tools", "brewers-supplies", "masons-tools"],
                    )
                    .with_label("Tool Proficiency"),
                )
                .with_trait(Feature::new("darkvision", "Darkvision"))
                .with_subrace("hill-dwarf"),
        )
        .with_subrace(
            Subrace::new("hill-dwarf", "Hill Dwarf", "dwarf")
                .with_grants(
                    Grants::new()
                        .with_ability_bonus(Ability::Wis, 1)
                        .with_hp_per_level(1),
                )
                .with_trait(Feature::new("dwarven-toughness", "Dwarven Toughness")),
        )
        .with_race(
            Race::new("dragonborn", "Dragonborn")
                .with_grants(
                    Grants::new()
                        .with_ability_bonus(Ability::Str, 2)
                        .with_ability_bonus(Ability::Cha, 1)
                        .with_language("common")
                        .with_language("draconic"),
                )
                .with_variant_label("Draconic Ancestry")
                .with_variant(RaceVariant::new("red", "Red Dragon Ancestry"))
                .with_variant(RaceVariant::new("gold", "Gold Dragon Ancestry"))
                .with_variant(RaceVariant::new("blue", "Blue Dragon Ancestry")),
        )
        .with_race(
            Race::new("half-elf", "Half-Elf")
                .with_grants(
                    Grants::new()
                        .with_ability_bonus(Ability::Cha, 2)
                        .with_language("common")
                        .with_language("elvish"),
                )
                .with_choice(
                    ChoiceOption::new(ChoiceType::Ability, 2, ["str", "dex", "con", "int", "wis"])
                        .with_label("Ability Score Increase"),
                )
                .with_choice(any(ChoiceType::Skill, 2).with_label("Skill Versatility"))
                .with_choice(any(ChoiceType::Language, 1)),
        )
}

fn martial_grants() -> Grants {
    Grants::new()
        .with_proficiency(Proficiency::weapon_category("simple"))
        .with_proficiency(Proficiency::weapon_category("martial"))
        .with_proficiency(Proficiency::armor_category("light"))
        .with_proficiency(Proficiency::armor_category("medium"))
        .with_proficiency(Proficiency::armor_category("shield"))
}

fn classes(catalog: Catalog) -> Catalog {
    catalog
        .with_class(
            Class::new("fighter", "Fighter", 10)
                .with_saving_throws([Ability::Str, Ability::Con])
                .with_grants(martial_grants().with_proficiency(Proficiency::armor_category("heavy")))
                .with_choice(ChoiceOption::new(
                    ChoiceType::Skill,
                    2,
                    [
                        "acrobatics",
                        "animal-handling",
                        "athletics",
                        "history",
                        "insight",
                        "intimidation",
                        "perception",
                        "survival",
                    ],
                ))
                .with_feature(
                    Feature::new("fighter-fighting-style", "Fighting Style").with_choices(vec![
                        ChoiceOption::new(
                            ChoiceType::Feature,
                            1,
                            ["archery", "defense", "dueling", "blessed-warrior"],
                        )
                        .with_label("Fighting Style"),
                    ]),
                )
                .with_feature(Feature::new("second-wind", "Second Wind"))
                .with_feature(Feature::new("action-surge", "Action Surge").at_level(2))
                .with_subclasses(3, ["champion", "eldritch-knight"])
                .with_subclass_label("Martial Archetype"),
        )
        .with_subclass(
            Subclass::new("champion", "Champion", "fighter")
                .with_feature(Feature::new("improved-critical", "Improved Critical").at_level(3))
                .with_feature(Feature::new("remarkable-athlete", "Remarkable Athlete").at_level(7)),
        )
        .with_subclass(
            Subclass::new("eldritch-knight", "Eldritch Knight", "fighter")
                .with_spellcasting(Spellcasting::new(Ability::Int, CasterType::Third))
                .with_feature(
                    Feature::new("ek-spellcasting", "Spellcasting")
                        .at_level(3)
                        .with_choices(vec![ChoiceOption::new(
                            ChoiceType::Spell,
                            2,
                            ["fire-bolt", "light"],
                        )]),
                ),
        )
        .with_class(
            Class::new("barbarian", "Barbarian", 12)
                .with_saving_throws([Ability::Str, Ability::Con])
                .with_grants(martial_grants())
                .with_choice(ChoiceOption::new(
                    ChoiceType::Skill,
                    2,
                    ["animal-handling", "athletics", "intimidation", "nature", "perception", "survival"],
                ))
                .with_feature(Feature::new("rage", "Rage"))
                .with_feature(Feature::new("reckless-attack", "Reckless Attack").at_level(2))
                .with_subclasses(3, ["berserker"])
                .with_subclass_label("Primal Path"),
        )
        .with_subclass(
            Subclass::new("berserker", "Path of the Berserker", "barbarian")
                .with_feature(Feature::new("frenzy", "Frenzy").at_level(3)),
        )
        .with_class(
            Class::new("wizard", "Wizard", 6)
                .with_saving_throws([Ability::Int, Ability::Wis])
                .with_grants(
                    Grants::new()
                        .with_proficiency(Proficiency::weapon("dagger"))
                        .with_proficiency(Proficiency::weapon("quarterstaff")),
                )
                .with_choice(ChoiceOption::new(
                    ChoiceType::Skill,
                    2,
                    ["arcana", "history", "insight", "investigation", "medicine", "religion"],
                ))
                .with_feature(
                    Feature::new("wizard-cantrips", "Cantrips").with_choices(vec![
                        ChoiceOption::new(ChoiceType::Spell, 2, ["fire-bolt", "light"])
                            .with_label("Cantrips"),
                    ]),
                )
                .with_subclasses(2, ["evocation"])
                .with_subclass_label("Arcane Tradition")
                .with_spellcasting(Spellcasting::new(Ability::Int, CasterType::Full)),
        )
        .with_subclass(
            Subclass::new("evocation", "School of Evocation", "wizard")
                .with_feature(Feature::new("evocation-savant", "Evocation Savant").at_level(2)),
        )
        .with_class(
            Class::new("paladin", "Paladin", 10)
                .with_saving_throws([Ability::Wis, Ability::Cha])
                .with_grants(martial_grants().with_proficiency(Proficiency::armor_category("heavy")))
                .with_choice(ChoiceOption::new(
                    ChoiceType::Skill,
                    2,
                    ["athletics", "insight", "intimidation", "medicine", "persuasion", "religion"],
                ))
                .with_feature(Feature::new("lay-on-hands", "Lay on Hands"))
                .with_feature(
                    Feature::new("paladin-fighting-style", "Fighting Style")
                        .at_level(2)
                        .with_choices(vec![ChoiceOption::new(
                            ChoiceType::Feature,
                            1,
                            ["defense", "dueling", "blessed-warrior"],
                        )]),
                )
                .with_subclasses(3, ["devotion"])
                .with_subclass_label("Sacred Oath")
                .with_spellcasting(
                    Spellcasting::new(Ability::Cha, CasterType::Half)
                        .with_prepared_formula("floor(level/2)+abilityMod"),
                )
                .with_resources(ClassResources {
                    lay_on_hands_per_level: Some(5),
                    channel_divinity: vec![ResourceStep { level: 3, uses: 1 }],
                }),
        )
        .with_subclass(
            Subclass::new("devotion", "Oath of Devotion", "paladin")
                .with_feature(Feature::new("sacred-weapon", "Sacred Weapon").at_level(3)),
        )
        .with_class(
            Class::new("cleric", "Cleric", 8)
                .with_saving_throws([Ability::Wis, Ability::Cha])
                .with_grants(
                    Grants::new()
                        .with_proficiency(Proficiency::weapon_category("simple"))
                        .with_proficiency(Proficiency::armor_category("light"))
                        .with_proficiency(Proficiency::armor_category("medium"))
                        .with_proficiency(Proficiency::armor_category("shield")),
                )
                .with_choice(ChoiceOption::new(
                    ChoiceType::Skill,
                    2,
                    ["history", "insight", "medicine", "persuasion", "religion"],
                ))
                .with_subclasses(1, ["life"])
                .with_subclass_label("Divine Domain")
                .with_spellcasting(Spellcasting::new(Ability::Wis, CasterType::Full))
                .with_resources(ClassResources {
                    lay_on_hands_per_level: None,
                    channel_divinity: vec![
                        ResourceStep { level: 2, uses: 1 },
                        ResourceStep { level: 6, uses: 2 },
                        ResourceStep { level: 18, uses: 3 },
                    ],
                }),
        )
        .with_subclass(
            Subclass::new("life", "Life Domain", "cleric").with_feature(
                Feature::new("disciple-of-life", "Disciple of Life").with_grants(
                    Grants::new()
                        .with_proficiency(Proficiency::armor_category("heavy"))
                        .with_spell("bless")
                        .with_spell("cure-wounds"),
                ),
            ),
        )
}

fn backgrounds(catalog: Catalog) -> Catalog {
    catalog
        .with_background(
            Background::new("soldier", "Soldier")
                .with_grants(
                    Grants::new()
                        .with_proficiency(Proficiency::skill("athletics"))
                        .with_proficiency(Proficiency::skill("intimidation")),
                )
                .with_choice(
                    ChoiceOption::new(ChoiceType::Tool, 1, ["dice-set", "playing-cards"])
                        .with_label("Gaming Set"),
                ),
        )
        .with_background(
            Background::new("acolyte", "Acolyte")
                .with_grants(
                    Grants::new()
                        .with_proficiency(Proficiency::skill("insight"))
                        .with_proficiency(Proficiency::skill("religion")),
                )
                .with_choice(any(ChoiceType::Language, 2)),
        )
}

fn feats(catalog: Catalog) -> Catalog {
    catalog
        .with_feat(Feat::new("alert", "Alert").with_grants(Grants::new().with_initiative_bonus(5)))
        .with_feat(Feat::new("tough", "Tough").with_grants(Grants::new().with_hp_per_level(2)))
        .with_feat(
            Feat::new("resilient", "Resilient")
                .with_choice(any(ChoiceType::Ability, 1).with_label("Ability Score Increase")),
        )
        .with_feat(
            Feat::new("weapon-master", "Weapon Master")
                .with_grants(Grants::new().with_proficiency(Proficiency::weapon_category("martial")))
                .with_choice(ChoiceOption::new(ChoiceType::Ability, 1, ["str", "dex"])),
        )
        .with_feat(
            Feat::new("skilled", "Skilled")
                .with_category("origin")
                .with_choice(any(ChoiceType::Skill, 3))
                .repeatable(),
        )
        .with_feat(
            Feat::new("boon-of-might", "Boon of Might")
                .with_category("epic-boon")
                .with_grants(
                    Grants::new()
                        .with_ability_bonus(Ability::Str, 1)
                        .with_ability_max_override(Ability::Str, 30),
                ),
        )
}

fn fighting_styles(catalog: Catalog) -> Catalog {
    catalog
        .with_feature(Feature::new("archery", "Archery").with_category(FIGHTING_STYLE_CATEGORY))
        .with_feature(Feature::new("defense", "Defense").with_category(FIGHTING_STYLE_CATEGORY))
        .with_feature(Feature::new("dueling", "Dueling").with_category(FIGHTING_STYLE_CATEGORY))
        .with_feature(
            Feature::new("blessed-warrior", "Blessed Warrior")
                .with_category(FIGHTING_STYLE_CATEGORY)
                .with_choices(vec![ChoiceOption::new(
                    ChoiceType::Spell,
                    2,
                    ["guidance", "sacred-flame", "light"],
                )
                .with_label("Cleric Cantrips")]),
        )
}

fn spells(catalog: Catalog) -> Catalog {
    [
        Spell::new("guidance", "Guidance", 0).for_classes(["cleric"]),
        Spell::new("sacred-flame", "Sacred Flame", 0).for_classes(["cleric"]),
        Spell::new("light", "Light", 0).for_classes(["cleric", "wizard"]),
        Spell::new("fire-bolt", "Fire Bolt", 0).for_classes(["wizard"]),
        Spell::new("magic-missile", "Magic Missile", 1).for_classes(["wizard"]),
        Spell::new("shield", "Shield", 1).for_classes(["wizard"]),
        Spell::new("bless", "Bless", 1).for_classes(["cleric", "paladin"]),
        Spell::new("cure-wounds", "Cure Wounds", 1).for_classes(["cleric", "paladin"]),
    ]
    .into_iter()
    .fold(catalog, Catalog::with_spell)
}

fn equipment(catalog: Catalog) -> Catalog {
    let catalog = [
        Weapon::new("dagger", "Dagger", "simple").with_mastery("nick"),
        Weapon::new("quarterstaff", "Quarterstaff", "simple").with_mastery("topple"),
        Weapon::new("shortbow", "Shortbow", "simple").with_mastery("vex"),
        Weapon::new("longsword", "Longsword", "martial").with_mastery("sap"),
        Weapon::new("battleaxe", "Battleaxe", "martial").with_mastery("topple"),
        Weapon::new("whip", "Whip", "martial").with_mastery("slow"),
    ]
    .into_iter()
    .fold(catalog, Catalog::with_weapon);

    let catalog = [
        Armor::new("leather", "Leather", ArmorCategory::Light, 11),
        Armor::new("chain-shirt", "Chain Shirt", ArmorCategory::Medium, 13).with_max_dex_bonus(2),
        Armor::new("chain-mail", "Chain Mail", ArmorCategory::Heavy, 16).with_max_dex_bonus(0),
        Armor::new("plate", "Plate", ArmorCategory::Heavy, 18).with_max_dex_bonus(0),
        Armor::new("shield", "Shield", ArmorCategory::Shield, 2),
    ]
    .into_iter()
    .fold(catalog, Catalog::with_armor);

    [
        Tool::new("smiths-tools", "Smith's Tools").in_category("artisan"),
        Tool::new("brewers-supplies", "Brewer's Supplies").in_category("artisan"),
        Tool::new("masons-tools", "Mason's Tools").in_category("artisan"),
        Tool::new("dice-set", "Dice Set").in_category("gaming-set"),
        Tool::new("playing-cards", "Playing Card Set").in_category("gaming-set"),
        Tool::new("thieves-tools", "Thieves' Tools"),
    ]
    .into_iter()
    .fold(catalog, Catalog::with_tool)
}
