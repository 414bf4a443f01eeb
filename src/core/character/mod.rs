//=========================================================================
// Character Model
//=========================================================================
//
// Everything the creation screens mutate: the record itself, its skill
// tree, the two point budgets, origin/background bonuses and appearance.
//
// Architecture:
//   skill.rs       SkillCategory, Skill, SkillLevel
//   origin.rs      Origin, Background, Bonus, CreationChoice
//   allocation.rs  SkillPointPool, FreePointPool, AllocationError
//   appearance.rs  Appearance, AppearanceField, portrait part names
//   record.rs      CharacterRecord (owns all of the above)
//
//=========================================================================

//=== Module Declarations =================================================

mod allocation;
mod appearance;
mod origin;
mod record;
mod skill;

//=== Public API ==========================================================

pub use allocation::{
    AllocationError, FreePointPool, SkillPointPool, FREE_POINT_BUDGET, SKILL_POINT_BUDGET,
};
pub use appearance::{Appearance, AppearanceField};
pub use origin::{Background, Bonus, CreationChoice, Origin};
pub use record::{BonusSource, CharacterRecord, MAX_NAME_LEN};
pub use skill::{Skill, SkillCategory, SkillLevel, MAX_LEVEL};
