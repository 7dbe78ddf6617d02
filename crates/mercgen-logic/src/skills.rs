//! Skill levels, improvement rules, and experience ratings.
//!
//! Skill levels are integers where higher is better. A skill that is absent
//! has never been acquired; acquiring it places it at
//! [`MIN_ACQUIRED_LEVEL`], so a first improvement can leave a freshly
//! learned skill at zero.
//!
//! ```
//! use mercgen_logic::skills::{SkillSet, SkillType};
//!
//! let mut skills = SkillSet::default();
//! assert_eq!(skills.improve(SkillType::Tactics), 0);
//! assert_eq!(skills.improve(SkillType::Tactics), 1);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Level a skill sits at immediately after being acquired.
pub const MIN_ACQUIRED_LEVEL: i32 = 0;

/// Hard ceiling for any skill.
pub const MAX_SKILL_LEVEL: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillType {
    Gunnery,
    Piloting,
    Leadership,
    Strategy,
    Tactics,
    TechMech,
    Medical,
    Administration,
    Astech,
    Medtech,
}

impl SkillType {
    /// The three command skills officers are trained in.
    pub const OFFICER: [SkillType; 3] = [
        SkillType::Leadership,
        SkillType::Strategy,
        SkillType::Tactics,
    ];

    /// Officer skill selected by a d3 roll (1, 2, 3).
    pub fn officer_skill_for_roll(roll: u32) -> Option<SkillType> {
        match roll {
            1 => Some(SkillType::Leadership),
            2 => Some(SkillType::Strategy),
            3 => Some(SkillType::Tactics),
            _ => None,
        }
    }
}

/// A person's acquired skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    levels: BTreeMap<SkillType, i32>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, skill: SkillType) -> bool {
        self.levels.contains_key(&skill)
    }

    /// Current level, or `None` if the skill was never acquired.
    pub fn level(&self, skill: SkillType) -> Option<i32> {
        self.levels.get(&skill).copied()
    }

    /// Current level, treating an absent skill as zero.
    pub fn level_or_zero(&self, skill: SkillType) -> i32 {
        self.level(skill).unwrap_or(0)
    }

    /// Set a skill directly, clamped to the valid range.
    pub fn set(&mut self, skill: SkillType, level: i32) {
        self.levels
            .insert(skill, level.clamp(MIN_ACQUIRED_LEVEL, MAX_SKILL_LEVEL));
    }

    /// Improve a skill by one level, acquiring it at the minimum level if it
    /// was absent. Never lowers a skill. Returns the new level.
    pub fn improve(&mut self, skill: SkillType) -> i32 {
        let level = match self.levels.get(&skill) {
            None => MIN_ACQUIRED_LEVEL,
            Some(current) => (current + 1).min(MAX_SKILL_LEVEL).max(*current),
        };
        self.levels.insert(skill, level);
        level
    }

    /// Sum of leadership, strategy, and tactics levels.
    pub fn officer_skill_sum(&self) -> i32 {
        SkillType::OFFICER
            .iter()
            .map(|s| self.level_or_zero(*s))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillType, i32)> + '_ {
        self.levels.iter().map(|(s, l)| (*s, *l))
    }
}

/// Raise an officer skill chosen by a d3 `roll`. If the improvement only
/// acquired the skill (leaving it at the minimum level) it is improved a
/// second time so the new skill registers as non-zero.
///
/// Returns the skill that was raised, or `None` for an out-of-range roll.
pub fn boost_officer_skill(skills: &mut SkillSet, roll: u32) -> Option<SkillType> {
    let skill = SkillType::officer_skill_for_roll(roll)?;
    if skills.improve(skill) == MIN_ACQUIRED_LEVEL {
        skills.improve(skill);
    }
    Some(skill)
}

/// Experience rating derived from a person's role skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    UltraGreen,
    Green,
    Regular,
    Veteran,
    Elite,
    Heroic,
    Legendary,
}

impl ExperienceLevel {
    /// Rating for an averaged role-skill level.
    pub fn from_average_level(level: i32) -> Self {
        match level {
            i32::MIN..=0 => ExperienceLevel::UltraGreen,
            1..=2 => ExperienceLevel::Green,
            3..=4 => ExperienceLevel::Regular,
            5..=6 => ExperienceLevel::Veteran,
            7..=8 => ExperienceLevel::Elite,
            9 => ExperienceLevel::Heroic,
            _ => ExperienceLevel::Legendary,
        }
    }

    /// Typical skill level of a freshly generated person at this rating.
    pub fn base_skill_level(&self) -> i32 {
        match self {
            ExperienceLevel::UltraGreen => 0,
            ExperienceLevel::Green => 2,
            ExperienceLevel::Regular => 4,
            ExperienceLevel::Veteran => 6,
            ExperienceLevel::Elite => 8,
            ExperienceLevel::Heroic => 9,
            ExperienceLevel::Legendary => 10,
        }
    }

    /// Salary multiplier applied to a role's base salary.
    pub fn salary_multiplier(&self) -> f64 {
        match self {
            ExperienceLevel::UltraGreen => 0.5,
            ExperienceLevel::Green => 0.6,
            ExperienceLevel::Regular => 1.0,
            ExperienceLevel::Veteran => 1.6,
            ExperienceLevel::Elite => 3.2,
            ExperienceLevel::Heroic => 6.4,
            ExperienceLevel::Legendary => 12.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExperienceLevel::UltraGreen => "Ultra-Green",
            ExperienceLevel::Green => "Green",
            ExperienceLevel::Regular => "Regular",
            ExperienceLevel::Veteran => "Veteran",
            ExperienceLevel::Elite => "Elite",
            ExperienceLevel::Heroic => "Heroic",
            ExperienceLevel::Legendary => "Legendary",
        }
    }
}

/// Experience from the given role skills (absent skills count as zero,
/// averaged with integer division). An empty slice is UltraGreen.
pub fn experience_for(skills: &SkillSet, role_skills: &[SkillType]) -> ExperienceLevel {
    if role_skills.is_empty() {
        return ExperienceLevel::UltraGreen;
    }
    let total: i32 = role_skills.iter().map(|s| skills.level_or_zero(*s)).sum();
    ExperienceLevel::from_average_level(total / role_skills.len() as i32)
}
