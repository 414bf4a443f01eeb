//=========================================================================
// Character Record
//=========================================================================
//
// The one mutable character for a creation session.
//
// Architecture:
//   CharacterRecord
//     ├─ origin / background   (Option, set once per flow)
//     ├─ skills                BTreeMap<SkillCategory, Skill>
//     ├─ skill_points          SkillPointPool (branch A, cost curve)
//     ├─ free_points           FreePointPool  (branch B, flat)
//     ├─ appearance, name
//     └─ ledger                BonusSource → applied deltas
//
// Bonus application is idempotent: applying a source first reverts what
// that source granted last time, then grants the new table. The ledger
// stores the clamped deltas actually applied, so reverting is exact.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, HashMap};

use log::debug;

//=== Internal Dependencies ===============================================

use super::allocation::{AllocationError, FreePointPool, SkillPointPool};
use super::appearance::Appearance;
use super::origin::{Background, Bonus, CreationChoice, Origin};
use super::skill::{Skill, SkillCategory};

//=== Constants ===========================================================

/// Longest accepted character name, in characters.
pub const MAX_NAME_LEN: usize = 20;

//=== BonusSource =========================================================

/// Which choice granted a set of bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusSource {
    Origin,
    Background,
}

/// One granted delta, as actually applied after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Grant {
    category: SkillCategory,
    subskill: &'static str,
    applied: i32,
}

//=== CharacterRecord =====================================================

#[derive(Debug, Clone)]
pub struct CharacterRecord {
    origin: Option<Origin>,
    background: Option<Background>,
    skills: BTreeMap<SkillCategory, Skill>,
    skill_points: SkillPointPool,
    free_points: FreePointPool,
    appearance: Appearance,
    name: Option<String>,
    ledger: HashMap<BonusSource, Vec<Grant>>,
}

impl CharacterRecord {
    //--- Construction -----------------------------------------------------

    /// A blank character: all subskills at zero, full budgets.
    pub fn new() -> Self {
        Self {
            origin: None,
            background: None,
            skills: SkillCategory::ALL.iter().map(|c| (*c, Skill::new(*c))).collect(),
            skill_points: SkillPointPool::default(),
            free_points: FreePointPool::default(),
            appearance: Appearance::default(),
            name: None,
            ledger: HashMap::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    pub fn background(&self) -> Option<Background> {
        self.background
    }

    pub fn skill(&self, category: SkillCategory) -> Option<&Skill> {
        self.skills.get(&category)
    }

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    /// Level of one subskill, `None` if the category lacks it.
    pub fn subskill_level(&self, category: SkillCategory, subskill: &str) -> Option<u32> {
        self.skills.get(&category)?.level(subskill)
    }

    pub fn skill_points(&self) -> &SkillPointPool {
        &self.skill_points
    }

    pub fn free_points(&self) -> &FreePointPool {
        &self.free_points
    }

    pub fn free_points_mut(&mut self) -> &mut FreePointPool {
        &mut self.free_points
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    //--- Choices ----------------------------------------------------------

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = Some(origin);
        self.apply_origin_bonuses();
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
        self.apply_background_bonuses();
    }

    /// Grants the current origin's bonuses, replacing any earlier grant.
    pub fn apply_origin_bonuses(&mut self) {
        let bonuses = self.origin.map_or(&[][..], |o| o.bonuses());
        self.apply_bonuses(BonusSource::Origin, bonuses);
    }

    /// Grants the current background's bonuses, replacing any earlier grant.
    pub fn apply_background_bonuses(&mut self) {
        let bonuses = self.background.map_or(&[][..], |b| b.bonuses());
        self.apply_bonuses(BonusSource::Background, bonuses);
    }

    fn apply_bonuses(&mut self, source: BonusSource, bonuses: &'static [Bonus]) {
        for grant in self.ledger.remove(&source).unwrap_or_default() {
            if let Some(skill) = self.skills.get_mut(&grant.category) {
                skill.adjust(grant.subskill, -grant.applied);
            }
        }

        let mut grants = Vec::with_capacity(bonuses.len());
        for bonus in bonuses {
            let applied = self
                .skills
                .get_mut(&bonus.category)
                .and_then(|skill| skill.adjust(bonus.subskill, bonus.delta));

            if let Some(applied) = applied {
                grants.push(Grant {
                    category: bonus.category,
                    subskill: bonus.subskill,
                    applied,
                });
            }
        }

        debug!(target: "character", "Applied {} bonus grants from {:?}", grants.len(), source);
        self.ledger.insert(source, grants);
    }

    //--- Skill Points -----------------------------------------------------

    /// Spends cost-curve points on one subskill level.
    pub fn raise_subskill(
        &mut self,
        category: SkillCategory,
        subskill: &str,
    ) -> Result<u32, AllocationError> {
        let skill = self
            .skills
            .get_mut(&category)
            .ok_or_else(|| AllocationError::UnknownSubskill(subskill.to_string()))?;
        self.skill_points.raise(skill, subskill)
    }

    /// Refunds the last purchased level of one subskill.
    pub fn lower_subskill(
        &mut self,
        category: SkillCategory,
        subskill: &str,
    ) -> Result<u32, AllocationError> {
        let skill = self
            .skills
            .get_mut(&category)
            .ok_or_else(|| AllocationError::UnknownSubskill(subskill.to_string()))?;
        self.skill_points.lower(skill, subskill)
    }

    //--- Name -------------------------------------------------------------

    /// Stores a trimmed name with control characters (line breaks
    /// included) removed. Empty names clear it; returns whether a name is
    /// now set.
    pub fn set_name(&mut self, name: &str) -> bool {
        let printable: String = name.chars().filter(|c| !c.is_control()).collect();
        let trimmed: String = printable.trim().chars().take(MAX_NAME_LEN).collect();
        self.name = (!trimmed.is_empty()).then_some(trimmed);
        self.name.is_some()
    }

    //--- Summary ----------------------------------------------------------

    /// Sum of every subskill level.
    pub fn power_level(&self) -> u32 {
        self.skills.values().map(Skill::total_level).sum()
    }

    /// "<Category> Specialist" for the strongest category, "Novice" when
    /// nothing has been learned. Ties go to the earlier category.
    pub fn archetype(&self) -> String {
        let mut best: Option<(SkillCategory, u32)> = None;
        for skill in self.skills.values() {
            let total = skill.total_level();
            if total > best.map_or(0, |(_, t)| t) {
                best = Some((skill.category(), total));
            }
        }

        match best {
            Some((category, _)) => format!("{} Specialist", category),
            None => "Novice".to_string(),
        }
    }
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::character::{MAX_LEVEL, SKILL_POINT_BUDGET};

    #[test]
    fn new_record_is_blank() {
        let record = CharacterRecord::new();
        assert_eq!(record.power_level(), 0);
        assert_eq!(record.archetype(), "Novice");
        assert_eq!(record.skill_points().remaining(), SKILL_POINT_BUDGET);
        assert!(record.origin().is_none() && record.name().is_none());
    }

    #[test]
    fn origin_grants_its_bonuses() {
        let mut record = CharacterRecord::new();
        record.set_origin(Origin::Corporate);

        assert_eq!(record.subskill_level(SkillCategory::Social, "Persuasion"), Some(1));
        assert_eq!(record.subskill_level(SkillCategory::Tech, "Hacking"), Some(1));
        assert_eq!(record.power_level(), 2);
    }

    #[test]
    fn reapplying_bonuses_is_idempotent() {
        let mut record = CharacterRecord::new();
        record.set_background(Background::Hacker);
        record.apply_background_bonuses();
        record.apply_background_bonuses();

        assert_eq!(record.subskill_level(SkillCategory::Tech, "Hacking"), Some(3));
    }

    #[test]
    fn changing_choice_replaces_previous_grant() {
        let mut record = CharacterRecord::new();
        record.set_background(Background::Hacker);
        record.set_background(Background::Trader);

        assert_eq!(record.subskill_level(SkillCategory::Tech, "Hacking"), Some(0));
        assert_eq!(record.subskill_level(SkillCategory::Social, "Trading"), Some(3));
    }

    #[test]
    fn origin_and_background_stack() {
        let mut record = CharacterRecord::new();
        record.set_origin(Origin::Corporate);
        record.set_background(Background::Hacker);
        record.apply_origin_bonuses();

        assert_eq!(record.subskill_level(SkillCategory::Tech, "Hacking"), Some(4));
    }

    #[test]
    fn bonuses_clamp_at_max_level() {
        let mut record = CharacterRecord::new();
        let skill = record.skills.get_mut(&SkillCategory::Tech).unwrap();
        skill.adjust("Hacking", MAX_LEVEL as i32 - 1);

        record.set_background(Background::Hacker);
        assert_eq!(record.subskill_level(SkillCategory::Tech, "Hacking"), Some(MAX_LEVEL));

        record.set_background(Background::Detective);
        assert_eq!(record.subskill_level(SkillCategory::Tech, "Hacking"), Some(MAX_LEVEL - 1));
    }

    #[test]
    fn raise_and_lower_through_record() {
        let mut record = CharacterRecord::new();

        assert_eq!(record.raise_subskill(SkillCategory::Biomod, "Regeneration"), Ok(1));
        assert_eq!(record.skill_points().remaining(), SKILL_POINT_BUDGET - 1);
        assert_eq!(record.lower_subskill(SkillCategory::Biomod, "Regeneration"), Ok(1));
        assert_eq!(record.skill_points().remaining(), SKILL_POINT_BUDGET);
    }

    #[test]
    fn archetype_picks_strongest_category() {
        let mut record = CharacterRecord::new();
        record.set_origin(Origin::Street);
        record.set_background(Background::Trader);

        assert_eq!(record.archetype(), "Social Specialist");
    }

    #[test]
    fn archetype_ties_go_to_first_category() {
        let mut record = CharacterRecord::new();
        record.set_origin(Origin::Academic);
        record.set_background(Background::Technician);

        assert_eq!(record.archetype(), "Tech Specialist");
    }

    #[test]
    fn name_is_trimmed_and_capped() {
        let mut record = CharacterRecord::new();

        assert!(record.set_name("  Vex  "));
        assert_eq!(record.name(), Some("Vex"));

        assert!(record.set_name("abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(record.name().map(str::len), Some(MAX_NAME_LEN));

        assert!(!record.set_name("   "));
        assert_eq!(record.name(), None);
    }

    #[test]
    fn name_drops_line_breaks() {
        let mut record = CharacterRecord::new();

        assert!(record.set_name("Vex\nlevel=99\r"));
        assert_eq!(record.name(), Some("Vexlevel=99"));

        assert!(!record.set_name("\n\t"));
    }
}
