//! People components: Person, Name, Family, Dependent.

use chrono::{Datelike, NaiveDate};
use hecs::Entity;
use mercgen_logic::roles::PersonnelRole;
use mercgen_logic::skills::{experience_for, ExperienceLevel, SkillSet};
use serde::{Deserialize, Serialize};

/// A person's name, with an optional callsign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub given: String,
    pub family: String,
    pub callsign: Option<String>,
}

impl Name {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
            callsign: None,
        }
    }

    pub fn with_callsign(mut self, callsign: impl Into<String>) -> Self {
        self.callsign = Some(callsign.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.given, self.family)
    }

    /// Name with the callsign quoted in the middle, if there is one
    pub fn display_name(&self) -> String {
        match &self.callsign {
            Some(callsign) => format!("{} \"{}\" {}", self.given, callsign, self.family),
            None => self.full_name(),
        }
    }
}

/// Highest completed education
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Education {
    HighSchool,
    College,
}

impl Education {
    /// Anyone rated above ultra-green has been through college.
    pub fn for_experience(experience: ExperienceLevel) -> Self {
        if experience > ExperienceLevel::UltraGreen {
            Education::College
        } else {
            Education::HighSchool
        }
    }
}

/// A member of the company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: Name,
    pub role: PersonnelRole,
    pub skills: SkillSet,
    pub tactical_genius: bool,
    pub rank: u8,
    pub founder: bool,
    pub education: Option<Education>,
    pub birth_date: NaiveDate,
    /// Faction code the person comes from
    pub origin_faction: String,
    pub origin_planet: Option<String>,
}

impl Person {
    pub fn new(name: Name, role: PersonnelRole, birth_date: NaiveDate) -> Self {
        Self {
            name,
            role,
            skills: SkillSet::new(),
            tactical_genius: false,
            rank: 0,
            founder: false,
            education: None,
            birth_date,
            origin_faction: String::new(),
            origin_planet: None,
        }
    }

    pub fn experience(&self) -> ExperienceLevel {
        experience_for(&self.skills, self.role.role_skills())
    }

    /// Monthly salary
    pub fn salary(&self) -> i64 {
        self.role.salary(self.experience())
    }

    /// Age in whole years on `date`
    pub fn age_on(&self, date: NaiveDate) -> i32 {
        let mut age = date.year() - self.birth_date.year();
        if (date.month(), date.day()) < (self.birth_date.month(), self.birth_date.day()) {
            age -= 1;
        }
        age
    }
}

/// Marriage and children of a recruited person
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Family {
    pub spouse: Option<Entity>,
    pub children: Vec<Entity>,
}

impl Family {
    pub fn is_married(&self) -> bool {
        self.spouse.is_some()
    }
}

/// A child born into the company; not part of the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependent {
    pub name: Name,
    pub birth_date: NaiveDate,
    pub parents: [Entity; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercgen_logic::skills::SkillType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn display_name_includes_callsign() {
        let name = Name::new("Natasha", "Kerensky").with_callsign("Black Widow");
        assert_eq!(name.display_name(), "Natasha \"Black Widow\" Kerensky");
        assert_eq!(name.full_name(), "Natasha Kerensky");
    }

    #[test]
    fn age_counts_whole_years() {
        let person = Person::new(
            Name::new("A", "B"),
            PersonnelRole::MechWarrior,
            date(3000, 6, 15),
        );
        assert_eq!(person.age_on(date(3025, 6, 14)), 24);
        assert_eq!(person.age_on(date(3025, 6, 15)), 25);
    }

    #[test]
    fn experience_and_salary_follow_role_skills() {
        let mut person = Person::new(
            Name::new("A", "B"),
            PersonnelRole::MechWarrior,
            date(3000, 1, 1),
        );
        person.skills.set(SkillType::Gunnery, 4);
        person.skills.set(SkillType::Piloting, 4);
        assert_eq!(person.experience(), ExperienceLevel::Regular);
        assert_eq!(person.salary(), 1_500);
    }

    #[test]
    fn education_threshold() {
        assert_eq!(
            Education::for_experience(ExperienceLevel::UltraGreen),
            Education::HighSchool
        );
        assert_eq!(
            Education::for_experience(ExperienceLevel::Green),
            Education::College
        );
    }
}
