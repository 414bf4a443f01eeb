//=========================================================================
// Point Allocation
//=========================================================================
//
// Two budgets used by the two creation branches:
//
//   SkillPointPool  50 points, raising a subskill costs level/10 + 1,
//                   lowering refunds what the removed level cost
//   FreePointPool   20 points spread flat over the six categories
//
// Both keep `remaining + spent == budget` and never let `remaining` go
// negative. A rejected operation leaves every value unchanged.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, HashMap};
use std::fmt;

//=== Internal Dependencies ===============================================

use super::skill::{Skill, SkillCategory};

//=== Constants ===========================================================

pub const SKILL_POINT_BUDGET: u32 = 50;
pub const FREE_POINT_BUDGET: u32 = 20;

//=== AllocationError =====================================================

/// Why a point could not be moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The next level costs more than what is left.
    InsufficientPoints { needed: u32, remaining: u32 },

    /// The subskill is already at its maximum level.
    AtMaxLevel,

    /// There is nothing allocated here to take back.
    NothingToRefund,

    /// The category has no subskill with this name.
    UnknownSubskill(String),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientPoints { needed, remaining } => {
                write!(f, "Need {} points, {} remaining", needed, remaining)
            }
            Self::AtMaxLevel => write!(f, "Already at maximum level"),
            Self::NothingToRefund => write!(f, "No allocated points to refund"),
            Self::UnknownSubskill(name) => write!(f, "Unknown subskill: {}", name),
        }
    }
}

impl std::error::Error for AllocationError {}

//=== SkillPointPool ======================================================

/// Cost-curve budget for the subskill tree.
///
/// Each purchase is remembered per subskill so lowering refunds exactly
/// what was paid, and only purchased levels (not bonuses) can be lowered.
#[derive(Debug, Clone)]
pub struct SkillPointPool {
    budget: u32,
    remaining: u32,
    purchases: HashMap<(SkillCategory, String), Vec<u32>>,
}

impl SkillPointPool {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            remaining: budget,
            purchases: HashMap::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn spent(&self) -> u32 {
        self.budget - self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Levels bought for `subskill` through this pool.
    pub fn purchased_levels(&self, category: SkillCategory, subskill: &str) -> usize {
        self.purchases
            .get(&(category, subskill.to_string()))
            .map_or(0, Vec::len)
    }

    /// Cost of the next level, or `None` for an unknown subskill.
    pub fn next_cost(&self, skill: &Skill, subskill: &str) -> Option<u32> {
        skill.subskill(subskill).map(|s| s.raise_cost())
    }

    pub fn can_afford(&self, skill: &Skill, subskill: &str) -> bool {
        skill
            .subskill(subskill)
            .is_some_and(|s| !s.is_maxed() && s.raise_cost() <= self.remaining)
    }

    //--- Operations -------------------------------------------------------

    /// Raises `subskill` by one level, returning the points spent.
    pub fn raise(&mut self, skill: &mut Skill, subskill: &str) -> Result<u32, AllocationError> {
        let level = *skill
            .subskill(subskill)
            .ok_or_else(|| AllocationError::UnknownSubskill(subskill.to_string()))?;

        if level.is_maxed() {
            return Err(AllocationError::AtMaxLevel);
        }
        let cost = level.raise_cost();
        if cost > self.remaining {
            return Err(AllocationError::InsufficientPoints {
                needed: cost,
                remaining: self.remaining,
            });
        }

        skill.adjust(subskill, 1);
        self.remaining -= cost;
        self.purchases
            .entry((skill.category(), subskill.to_string()))
            .or_default()
            .push(cost);
        Ok(cost)
    }

    /// Lowers `subskill` by one purchased level, returning the refund.
    pub fn lower(&mut self, skill: &mut Skill, subskill: &str) -> Result<u32, AllocationError> {
        if skill.subskill(subskill).is_none() {
            return Err(AllocationError::UnknownSubskill(subskill.to_string()));
        }

        let key = (skill.category(), subskill.to_string());
        let refund = self
            .purchases
            .get_mut(&key)
            .and_then(Vec::pop)
            .ok_or(AllocationError::NothingToRefund)?;

        skill.adjust(subskill, -1);
        self.remaining += refund;
        Ok(refund)
    }
}

impl Default for SkillPointPool {
    fn default() -> Self {
        Self::new(SKILL_POINT_BUDGET)
    }
}

//=== FreePointPool =======================================================

/// Flat one-point-per-step budget over the six categories.
#[derive(Debug, Clone, PartialEq)]
pub struct FreePointPool {
    budget: u32,
    points: BTreeMap<SkillCategory, u32>,
}

impl FreePointPool {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            points: SkillCategory::ALL.iter().map(|c| (*c, 0)).collect(),
        }
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn spent(&self) -> u32 {
        self.points.values().sum()
    }

    pub fn remaining(&self) -> u32 {
        self.budget - self.spent()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn points(&self, category: SkillCategory) -> u32 {
        self.points.get(&category).copied().unwrap_or(0)
    }

    /// Moves one point into `category`.
    pub fn add(&mut self, category: SkillCategory) -> Result<(), AllocationError> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Err(AllocationError::InsufficientPoints { needed: 1, remaining });
        }
        *self.points.entry(category).or_insert(0) += 1;
        Ok(())
    }

    /// Takes one point back from `category`.
    pub fn remove(&mut self, category: SkillCategory) -> Result<(), AllocationError> {
        match self.points.get_mut(&category) {
            Some(points) if *points > 0 => {
                *points -= 1;
                Ok(())
            }
            _ => Err(AllocationError::NothingToRefund),
        }
    }
}

impl Default for FreePointPool {
    fn default() -> Self {
        Self::new(FREE_POINT_BUDGET)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
