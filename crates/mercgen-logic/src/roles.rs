//! Personnel roles, their skills, and base salaries.

use serde::{Deserialize, Serialize};

use crate::skills::{ExperienceLevel, SkillType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PersonnelRole {
    MechWarrior,
    MechTech,
    Doctor,
    AdminCommand,
    AdminLogistics,
    AdminTransport,
    AdminHR,
    Astech,
    Medic,
}

impl PersonnelRole {
    /// Support roles that may be requested in the options.
    pub const SUPPORT: [PersonnelRole; 6] = [
        PersonnelRole::MechTech,
        PersonnelRole::Doctor,
        PersonnelRole::AdminCommand,
        PersonnelRole::AdminLogistics,
        PersonnelRole::AdminTransport,
        PersonnelRole::AdminHR,
    ];

    pub fn is_combat(&self) -> bool {
        matches!(self, PersonnelRole::MechWarrior)
    }

    pub fn is_tech(&self) -> bool {
        matches!(self, PersonnelRole::MechTech)
    }

    pub fn is_doctor(&self) -> bool {
        matches!(self, PersonnelRole::Doctor)
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, PersonnelRole::Astech | PersonnelRole::Medic)
    }

    /// Skills that define competence in this role.
    pub fn role_skills(&self) -> &'static [SkillType] {
        match self {
            PersonnelRole::MechWarrior => &[SkillType::Gunnery, SkillType::Piloting],
            PersonnelRole::MechTech => &[SkillType::TechMech],
            PersonnelRole::Doctor => &[SkillType::Medical],
            PersonnelRole::AdminCommand
            | PersonnelRole::AdminLogistics
            | PersonnelRole::AdminTransport
            | PersonnelRole::AdminHR => &[SkillType::Administration],
            PersonnelRole::Astech => &[SkillType::Astech],
            PersonnelRole::Medic => &[SkillType::Medtech],
        }
    }

    /// Monthly base salary in C-bills before the experience multiplier.
    pub fn base_salary(&self) -> i64 {
        match self {
            PersonnelRole::MechWarrior => 1_500,
            PersonnelRole::MechTech => 800,
            PersonnelRole::Doctor => 1_500,
            PersonnelRole::AdminCommand
            | PersonnelRole::AdminLogistics
            | PersonnelRole::AdminTransport
            | PersonnelRole::AdminHR => 500,
            PersonnelRole::Astech => 400,
            PersonnelRole::Medic => 500,
        }
    }

    /// Monthly salary at the given experience, rounded to whole C-bills.
    pub fn salary(&self, experience: ExperienceLevel) -> i64 {
        (self.base_salary() as f64 * experience.salary_multiplier()).round() as i64
    }

    pub fn name(&self) -> &'static str {
        match self {
            PersonnelRole::MechWarrior => "MechWarrior",
            PersonnelRole::MechTech => "Mech Tech",
            PersonnelRole::Doctor => "Doctor",
            PersonnelRole::AdminCommand => "Admin/Command",
            PersonnelRole::AdminLogistics => "Admin/Logistics",
            PersonnelRole::AdminTransport => "Admin/Transport",
            PersonnelRole::AdminHR => "Admin/HR",
            PersonnelRole::Astech => "Astech",
            PersonnelRole::Medic => "Medic",
        }
    }
}

/// Astechs needed per technician.
pub const ASTECHS_PER_TECH: u32 = 6;

/// Medics needed per doctor.
pub const MEDICS_PER_DOCTOR: u32 = 4;
