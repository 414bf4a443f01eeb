//=========================================================================
// Origins & Backgrounds
//=========================================================================
//
// The two one-time character choices and the fixed skill bonuses each
// grants. Both implement `CreationChoice`, which the selection screens
// are generic over.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::record::CharacterRecord;
use super::skill::SkillCategory;

//=== Bonus ===============================================================

/// A fixed subskill delta granted by a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bonus {
    pub category: SkillCategory,
    pub subskill: &'static str,
    pub delta: i32,
}

/// Struct literal form so bonus tables promote to `'static`.
macro_rules! bonus {
    ($category:ident, $subskill:literal, $delta:literal) => {
        Bonus { category: SkillCategory::$category, subskill: $subskill, delta: $delta }
    };
}

impl fmt::Display for Bonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} {} ({})", self.delta, self.subskill, self.category)
    }
}

//=== CreationChoice ======================================================

/// A selectable option on a creation screen.
pub trait CreationChoice: Copy + PartialEq + fmt::Debug + 'static {
    /// Every option, in button order.
    const ALL: &'static [Self];

    /// Screen title.
    const TITLE: &'static str;

    fn name(self) -> &'static str;
    fn description(self) -> &'static str;
    fn lore(self) -> &'static str;
    fn bonuses(self) -> &'static [Bonus];

    /// Records the choice on `record` and applies its bonuses.
    fn apply(self, record: &mut CharacterRecord);

    /// Bonus lines for the info panel.
    fn bonus_lines(self) -> Vec<String> {
        self.bonuses().iter().map(|b| b.to_string()).collect()
    }
}

//=== Origin ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Corporate,
    Street,
    Nomad,
    Academic,
}

impl CreationChoice for Origin {
    const ALL: &'static [Self] = &[Self::Corporate, Self::Street, Self::Nomad, Self::Academic];
    const TITLE: &'static str = "Choose Your Origin";

    fn name(self) -> &'static str {
        match self {
            Self::Corporate => "Corporate",
            Self::Street => "Street",
            Self::Nomad => "Nomad",
            Self::Academic => "Academic",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Corporate => "Raised inside the arcology towers",
            Self::Street => "Grew up in the lower city sprawl",
            Self::Nomad => "Came of age on the wasteland convoys",
            Self::Academic => "Trained in the university enclaves",
        }
    }

    fn lore(self) -> &'static str {
        match self {
            Self::Corporate => {
                "Every door opened with a keycard and every friend had a\n\
                 performance review. You learned the rules so you could bend them."
            }
            Self::Street => {
                "Neon, rain and gang colors. Nobody gave you anything,\n\
                 so you learned to move fast and keep your back to the wall."
            }
            Self::Nomad => {
                "Family meant the clan and home meant the road.\n\
                 You can walk all day and fix a truck with scrap."
            }
            Self::Academic => {
                "Libraries, labs and endless lectures. Your memory is\n\
                 your weapon, and you never stop asking why."
            }
        }
    }

    fn bonuses(self) -> &'static [Bonus] {
        match self {
            Self::Corporate => &[bonus!(Social, "Persuasion", 1), bonus!(Tech, "Hacking", 1)],
            Self::Street => &[bonus!(Combat, "Evasion", 2)],
            Self::Nomad => &[bonus!(Physical, "Stamina", 1), bonus!(Combat, "Melee", 1)],
            Self::Academic => &[bonus!(Intellect, "Memory", 2)],
        }
    }

    fn apply(self, record: &mut CharacterRecord) {
        record.set_origin(self);
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== Background ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    Hacker,
    Mercenary,
    Trader,
    Technician,
    StreetDoctor,
    Detective,
}

impl CreationChoice for Background {
    const ALL: &'static [Self] = &[
        Self::Hacker,
        Self::Mercenary,
        Self::Trader,
        Self::Technician,
        Self::StreetDoctor,
        Self::Detective,
    ];
    const TITLE: &'static str = "Choose Your Background";

    fn name(self) -> &'static str {
        match self {
            Self::Hacker => "Hacker",
            Self::Mercenary => "Mercenary",
            Self::Trader => "Trader",
            Self::Technician => "Technician",
            Self::StreetDoctor => "Street Doctor",
            Self::Detective => "Detective",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Hacker => "Breaks into systems for money or spite",
            Self::Mercenary => "Sells a steady trigger finger",
            Self::Trader => "Moves goods nobody else can find",
            Self::Technician => "Keeps the city's machines running",
            Self::StreetDoctor => "Patches wounds and installs chrome",
            Self::Detective => "Follows the data trail to the truth",
        }
    }

    fn lore(self) -> &'static str {
        match self {
            Self::Hacker => {
                "ICE is just a puzzle with a timer. You've burned out\n\
                 two decks already and you're shopping for a third."
            }
            Self::Mercenary => {
                "Contracts, extractions, bodyguard work. Loyalty lasts\n\
                 exactly as long as the payment schedule."
            }
            Self::Trader => {
                "Everything has a price and you know all of them.\n\
                 Your contact list is worth more than your apartment."
            }
            Self::Technician => {
                "Drones, turbines, cyberdecks. If it hums, you can\n\
                 fix it, and if it doesn't, you can make it."
            }
            Self::StreetDoctor => {
                "A clinic in the back of a noodle bar. You've seen\n\
                 every kind of wound and every kind of implant."
            }
            Self::Detective => {
                "Badge or no badge, the questions keep coming.\n\
                 Someone always knows something."
            }
        }
    }

    fn bonuses(self) -> &'static [Bonus] {
        match self {
            Self::Hacker => &[bonus!(Tech, "Hacking", 3)],
            Self::Mercenary => &[bonus!(Combat, "Shooting", 2), bonus!(Physical, "Strength", 1)],
            Self::Trader => &[bonus!(Social, "Trading", 3)],
            Self::Technician => &[bonus!(Tech, "Repair", 2)],
            Self::StreetDoctor => &[bonus!(Biomod, "Regeneration", 2), bonus!(Tech, "Repair", 1)],
            Self::Detective => &[bonus!(Intellect, "Analytics", 2), bonus!(Social, "Persuasion", 1)],
        }
    }

    fn apply(self, record: &mut CharacterRecord) {
        record.set_background(self);
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::character::Skill;

    #[test]
    fn every_bonus_targets_an_existing_subskill() {
        let origins = Origin::ALL.iter().flat_map(|o| o.bonuses());
        let backgrounds = Background::ALL.iter().flat_map(|b| b.bonuses());

        for bonus in origins.chain(backgrounds) {
            assert!(
                Skill::new(bonus.category).subskill(bonus.subskill).is_some(),
                "{} is not a {} subskill",
                bonus.subskill,
                bonus.category
            );
        }
    }

    #[test]
    fn bonus_tables_match_choices() {
        assert_eq!(Origin::Street.bonuses(), &[bonus!(Combat, "Evasion", 2)]);
        assert_eq!(
            Background::StreetDoctor.bonuses(),
            &[
                bonus!(Biomod, "Regeneration", 2),
                bonus!(Tech, "Repair", 1),
            ]
        );
    }

    #[test]
    fn bonus_lines_are_signed() {
        assert_eq!(
            Origin::Corporate.bonus_lines(),
            vec!["+1 Persuasion (Social)", "+1 Hacking (Tech)"]
        );
    }

    #[test]
    fn street_doctor_displays_with_space() {
        assert_eq!(Background::StreetDoctor.to_string(), "Street Doctor");
    }
}
