//! Person generation: where recruits come from and what they can do.

use chrono::{Days, Months, NaiveDate};
use mercgen_logic::faction::Faction;
use mercgen_logic::roles::PersonnelRole;
use mercgen_logic::skills::{boost_officer_skill, ExperienceLevel};

use super::names::generate_name;
use crate::components::Person;
use crate::dice::Dice;

/// Faction and planet a recruit comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub faction: Faction,
    pub planet: Option<String>,
}

/// Chooses the origin of recruits and spare units.
pub trait OriginSelector {
    fn select_faction(&self, campaign_faction: &Faction, dice: &mut dyn Dice) -> Faction;

    fn select_planet(&self, faction: &Faction, dice: &mut dyn Dice) -> Option<String>;

    fn select_origin(&self, campaign_faction: &Faction, dice: &mut dyn Dice) -> Origin {
        let faction = self.select_faction(campaign_faction, dice);
        let planet = self.select_planet(&faction, dice);
        Origin { faction, planet }
    }
}

/// Everyone comes from the campaign's faction and the starting planet.
#[derive(Debug, Clone, Default)]
pub struct FixedOrigin {
    pub planet: Option<String>,
}

impl FixedOrigin {
    pub fn new(planet: Option<String>) -> Self {
        Self { planet }
    }
}

impl OriginSelector for FixedOrigin {
    fn select_faction(&self, campaign_faction: &Faction, _dice: &mut dyn Dice) -> Faction {
        *campaign_faction
    }

    fn select_planet(&self, _faction: &Faction, _dice: &mut dyn Dice) -> Option<String> {
        self.planet.clone()
    }
}

/// Creates a new person for a role.
pub trait PersonFactory {
    fn new_person(
        &self,
        role: PersonnelRole,
        origin: &Origin,
        date: NaiveDate,
        dice: &mut dyn Dice,
    ) -> Person;
}

/// Random recruits: a 2d6 experience roll drives every role skill.
///
/// Roll order: given name, family name, experience (2d6), one d6 per role
/// skill, then for MechWarriors the officer-training d6 (plus a d3 on a 6)
/// and the tactical-genius 2d6, then age (3d6) and birthday.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPersonFactory;

/// Experience of a random recruit from a 2d6 roll.
pub fn experience_for_roll(roll: i32) -> ExperienceLevel {
    match roll {
        i32::MIN..=2 => ExperienceLevel::UltraGreen,
        3..=5 => ExperienceLevel::Green,
        6..=9 => ExperienceLevel::Regular,
        10..=11 => ExperienceLevel::Veteran,
        _ => ExperienceLevel::Elite,
    }
}

/// Skill level adjustment from a d6: 1 is a step down, 6 a step up.
fn skill_jitter(roll: i32) -> i32 {
    match roll {
        1 => -1,
        6 => 1,
        _ => 0,
    }
}

const MINIMUM_AGE: i32 = 16;

impl PersonFactory for RandomPersonFactory {
    fn new_person(
        &self,
        role: PersonnelRole,
        origin: &Origin,
        date: NaiveDate,
        dice: &mut dyn Dice,
    ) -> Person {
        let name = generate_name(dice);
        let experience = experience_for_roll(dice.d6(2));

        let mut person = Person::new(name, role, date);
        for skill in role.role_skills() {
            let level = experience.base_skill_level() + skill_jitter(dice.d6(1));
            person.skills.set(*skill, level);
        }

        if role.is_combat() {
            if dice.d6(1) == 6 {
                boost_officer_skill(&mut person.skills, dice.dice(1, 3) as u32);
            }
            person.tactical_genius = dice.d6(2) == 12;
        }

        let age = (MINIMUM_AGE + dice.d6(3)) as u32;
        let birthday_offset = dice.random_int(365) as u64;
        person.birth_date = date
            .checked_sub_months(Months::new(age * 12))
            .and_then(|d| d.checked_sub_days(Days::new(birthday_offset)))
            .unwrap_or(date);

        person.origin_faction = origin.faction.code.to_string();
        person.origin_planet = origin.planet.clone();
        person
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use mercgen_logic::faction::{codes, faction_by_code};
    use mercgen_logic::skills::SkillType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn origin() -> Origin {
        Origin {
            faction: faction_by_code(codes::MERCENARY).unwrap(),
            planet: Some("Galatea".to_string()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(3025, 1, 1).unwrap()
    }

    #[test]
    fn scripted_mechwarrior() {
        // names, experience 10 (veteran), gunnery d6=6, piloting d6=1,
        // officer d6=6 then d3=3, genius 2d6=12, age 3d6=9, birthday 0
        let mut dice = ScriptedDice::new([0, 0, 10, 6, 1, 6, 3, 12, 9, 0]);
        let person = RandomPersonFactory.new_person(
            PersonnelRole::MechWarrior,
            &origin(),
            today(),
            &mut dice,
        );

        assert_eq!(person.skills.level(SkillType::Gunnery), Some(7));
        assert_eq!(person.skills.level(SkillType::Piloting), Some(5));
        assert_eq!(person.skills.level(SkillType::Tactics), Some(1));
        assert!(person.tactical_genius);
        assert_eq!(person.age_on(today()), 25);
        assert_eq!(person.origin_faction, "MERC");
        assert_eq!(person.origin_planet.as_deref(), Some("Galatea"));
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn support_roles_skip_combat_rolls() {
        let mut rng = StdRng::seed_from_u64(5);
        let person = RandomPersonFactory.new_person(
            PersonnelRole::MechTech,
            &origin(),
            today(),
            &mut rng,
        );
        assert!(person.skills.has(SkillType::TechMech));
        assert!(!person.skills.has(SkillType::Gunnery));
        assert!(!person.tactical_genius);
        assert_eq!(person.skills.officer_skill_sum(), 0);
    }

    #[test]
    fn experience_table() {
        assert_eq!(experience_for_roll(2), ExperienceLevel::UltraGreen);
        assert_eq!(experience_for_roll(5), ExperienceLevel::Green);
        assert_eq!(experience_for_roll(7), ExperienceLevel::Regular);
        assert_eq!(experience_for_roll(11), ExperienceLevel::Veteran);
        assert_eq!(experience_for_roll(12), ExperienceLevel::Elite);
    }

    #[test]
    fn fixed_origin_uses_campaign_faction() {
        let mut rng = StdRng::seed_from_u64(0);
        let selector = FixedOrigin::new(Some("Outreach".to_string()));
        let campaign_faction = faction_by_code("FS").unwrap();
        let origin = selector.select_origin(&campaign_faction, &mut rng);
        assert_eq!(origin.faction, campaign_faction);
        assert_eq!(origin.planet.as_deref(), Some("Outreach"));
    }
}
