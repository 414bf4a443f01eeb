//=========================================================================
// Skills
//=========================================================================
//
// The six skill categories, their subskills and the derived values the
// creation screens display.
//
// Architecture:
//   SkillCategory ──▶ Skill
//                       └─ subskills: BTreeMap<String, SkillLevel>
//
// Subskill iteration for display follows `SkillCategory::subskill_names`,
// not map order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;

//=== Constants ===========================================================

/// Upper bound for every subskill.
pub const MAX_LEVEL: u32 = 100;

//=== SkillCategory =======================================================

/// Skill categories in declaration order (also the archetype tie order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillCategory {
    Tech,
    Intellect,
    Physical,
    Biomod,
    Social,
    Combat,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 6] = [
        Self::Tech,
        Self::Intellect,
        Self::Physical,
        Self::Biomod,
        Self::Social,
        Self::Combat,
    ];

    /// Short name used in skill lists and bonus lines.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tech => "Tech",
            Self::Intellect => "Intellect",
            Self::Physical => "Physical",
            Self::Biomod => "Biomod",
            Self::Social => "Social",
            Self::Combat => "Combat",
        }
    }

    /// Long label used on the free-point screen.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Tech => "Technology",
            Self::Intellect => "Intellect",
            Self::Physical => "Physical",
            Self::Biomod => "Bio-modifications",
            Self::Social => "Social",
            Self::Combat => "Combat",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Tech => "Machines, code and everything wired in between",
            Self::Intellect => "Raw cognition and accumulated knowledge",
            Self::Physical => "The meat: strength, speed and endurance",
            Self::Biomod => "Living with chrome under the skin",
            Self::Social => "Reading people and making them listen",
            Self::Combat => "Staying alive when talking fails",
        }
    }

    pub fn subskill_names(self) -> &'static [&'static str] {
        match self {
            Self::Tech => &["Hacking", "Repair", "Programming", "Drone Control", "Assembly"],
            Self::Intellect => &[
                "Analytics",
                "Memory",
                "Erudition",
                "Mathematics",
                "Linguistics",
                "Chemistry/Physics",
            ],
            Self::Physical => &["Strength", "Dexterity", "Stamina", "Reaction", "Balance"],
            Self::Biomod => &[
                "Compatibility",
                "Adjustment",
                "Self-Diagnosis",
                "Implant Communication",
                "Regeneration",
            ],
            Self::Social => &["Persuasion", "Deception", "Trading", "Leadership", "Acting"],
            Self::Combat => &[
                "Shooting",
                "Melee",
                "Tactics",
                "Weapon Mastery",
                "Evasion",
                "Unarmed",
            ],
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== SkillLevel ==========================================================

/// Level of one subskill. `level <= max_level` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillLevel {
    pub level: u32,
    pub max_level: u32,
}

impl SkillLevel {
    pub fn new() -> Self {
        Self { level: 0, max_level: MAX_LEVEL }
    }

    /// Points needed to go from the current level to the next.
    pub fn raise_cost(&self) -> u32 {
        self.level / 10 + 1
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::new()
    }
}

//=== Skill ===============================================================

/// A category with its subskill levels.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    category: SkillCategory,
    subskills: BTreeMap<String, SkillLevel>,
}

impl Skill {
    /// All subskills of `category` at level 0.
    pub fn new(category: SkillCategory) -> Self {
        let subskills = category
            .subskill_names()
            .iter()
            .map(|name| (name.to_string(), SkillLevel::new()))
            .collect();
        Self { category, subskills }
    }

    //--- Accessors --------------------------------------------------------

    pub fn category(&self) -> SkillCategory {
        self.category
    }

    pub fn name(&self) -> &'static str {
        self.category.name()
    }

    pub fn description(&self) -> &'static str {
        self.category.description()
    }

    pub fn subskill(&self, name: &str) -> Option<&SkillLevel> {
        self.subskills.get(name)
    }

    /// Level of `name`, or `None` for a subskill this category lacks.
    pub fn level(&self, name: &str) -> Option<u32> {
        self.subskills.get(name).map(|s| s.level)
    }

    /// Subskills in declaration order.
    pub fn subskills(&self) -> impl Iterator<Item = (&'static str, SkillLevel)> + '_ {
        self.category
            .subskill_names()
            .iter()
            .filter_map(|name| self.subskills.get(*name).map(|level| (*name, *level)))
    }

    //--- Derived Values ---------------------------------------------------

    pub fn total_level(&self) -> u32 {
        self.subskills.values().map(|s| s.level).sum()
    }

    pub fn average_level(&self) -> f32 {
        if self.subskills.is_empty() {
            return 0.0;
        }
        self.total_level() as f32 / self.subskills.len() as f32
    }

    /// Category rank: average subskill level divided by ten.
    pub fn skill_level(&self) -> u32 {
        (self.average_level() / 10.0) as u32
    }

    pub fn xp_for_next_level(&self) -> u32 {
        (10.0 * 1.5_f64.powi(self.skill_level() as i32)) as u32
    }

    //--- Mutation ---------------------------------------------------------

    /// Shifts `name` by `delta`, clamped to `[0, max_level]`.
    ///
    /// Returns the delta actually applied, or `None` if the subskill does
    /// not exist.
    pub fn adjust(&mut self, name: &str, delta: i32) -> Option<i32> {
        let entry = self.subskills.get_mut(name)?;
        let before = entry.level as i64;
        let after = (before + delta as i64).clamp(0, entry.max_level as i64);
        entry.level = after as u32;
        Some((after - before) as i32)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_skill_has_all_subskills_at_zero() {
        for category in SkillCategory::ALL {
            let skill = Skill::new(category);
            assert_eq!(skill.subskills().count(), category.subskill_names().len());
            assert!(skill.subskills().all(|(_, s)| s.level == 0 && s.max_level == MAX_LEVEL));
        }
    }

    #[test]
    fn subskills_iterate_in_declaration_order() {
        let skill = Skill::new(SkillCategory::Combat);
        let names: Vec<_> = skill.subskills().map(|(n, _)| n).collect();
        assert_eq!(names, SkillCategory::Combat.subskill_names());
    }

    #[test]
    fn raise_cost_steps_every_ten_levels() {
        let mut level = SkillLevel::new();
        assert_eq!(level.raise_cost(), 1);
        level.level = 9;
        assert_eq!(level.raise_cost(), 1);
        level.level = 10;
        assert_eq!(level.raise_cost(), 2);
        level.level = 99;
        assert_eq!(level.raise_cost(), 10);
    }

    #[test]
    fn adjust_clamps_and_reports_applied_delta() {
        let mut skill = Skill::new(SkillCategory::Tech);

        assert_eq!(skill.adjust("Hacking", 3), Some(3));
        assert_eq!(skill.adjust("Hacking", -5), Some(-3));
        assert_eq!(skill.level("Hacking"), Some(0));

        assert_eq!(skill.adjust("Repair", 150), Some(100));
        assert_eq!(skill.level("Repair"), Some(MAX_LEVEL));
        assert_eq!(skill.adjust("Repair", 1), Some(0));
    }

    #[test]
    fn adjust_unknown_subskill_is_none() {
        let mut skill = Skill::new(SkillCategory::Tech);
        assert_eq!(skill.adjust("Evasion", 1), None);
    }

    #[test]
    fn derived_values_follow_average() {
        let mut skill = Skill::new(SkillCategory::Physical);
        for (name, level) in [("Strength", 20), ("Dexterity", 30), ("Stamina", 50)] {
            skill.adjust(name, level);
        }

        assert_eq!(skill.total_level(), 100);
        assert_eq!(skill.average_level(), 20.0);
        assert_eq!(skill.skill_level(), 2);
        assert_eq!(skill.xp_for_next_level(), 22);
    }

    #[test]
    fn xp_at_level_zero_is_ten() {
        assert_eq!(Skill::new(SkillCategory::Social).xp_for_next_level(), 10);
    }
}
