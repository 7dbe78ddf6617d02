//! Backdated start-up simulation: a few years of marriages and births
//! played out week by week before the campaign begins.

use chrono::{Days, Months, NaiveDate};
use hecs::Entity;
use mercgen_logic::options::GenerationOptions;

use super::names::generate_name;
use crate::campaign::Campaign;
use crate::components::{Dependent, Family, Person};
use crate::dice::Dice;

pub trait MarriageProcessor {
    /// Called once per person per simulated week.
    fn process_week(&self, campaign: &mut Campaign, person: Entity, date: NaiveDate, dice: &mut dyn Dice);
}

pub trait ProcreationProcessor {
    /// Called once per person per simulated week.
    fn process_week(&self, campaign: &mut Campaign, person: Entity, date: NaiveDate, dice: &mut dyn Dice);
}

/// Unmarried adults marry another unmarried adult with a fixed weekly chance.
#[derive(Debug, Clone, Copy)]
pub struct RandomMarriage {
    /// One in this many weeks
    pub weekly_odds: u32,
    pub minimum_age: i32,
}

impl Default for RandomMarriage {
    fn default() -> Self {
        Self {
            weekly_odds: 520,
            minimum_age: 18,
        }
    }
}

fn age_of(campaign: &Campaign, person: Entity, date: NaiveDate) -> Option<i32> {
    campaign
        .world
        .get::<&Person>(person)
        .ok()
        .map(|p| p.age_on(date))
}

fn is_married(campaign: &Campaign, person: Entity) -> bool {
    campaign
        .world
        .get::<&Family>(person)
        .map(|f| f.is_married())
        .unwrap_or(true)
}

impl MarriageProcessor for RandomMarriage {
    fn process_week(&self, campaign: &mut Campaign, person: Entity, date: NaiveDate, dice: &mut dyn Dice) {
        if is_married(campaign, person) {
            return;
        }
        match age_of(campaign, person, date) {
            Some(age) if age >= self.minimum_age => {}
            _ => return,
        }
        if dice.random_int(self.weekly_odds) != 0 {
            return;
        }

        let candidates: Vec<Entity> = campaign
            .personnel()
            .into_iter()
            .filter(|&other| other != person)
            .filter(|&other| !is_married(campaign, other))
            .filter(|&other| {
                age_of(campaign, other, date)
                    .map(|age| age >= self.minimum_age)
                    .unwrap_or(false)
            })
            .collect();
        if candidates.is_empty() {
            return;
        }
        let spouse = candidates[dice.random_int(candidates.len() as u32) as usize % candidates.len()];

        for (a, b) in [(person, spouse), (spouse, person)] {
            if let Ok(mut family) = campaign.world.get::<&mut Family>(a) {
                family.spouse = Some(b);
            }
        }
        log::debug!("simulated marriage on {}", date);
    }
}

/// Married couples have a child with a fixed weekly chance.
#[derive(Debug, Clone, Copy)]
pub struct RandomProcreation {
    /// One in this many weeks
    pub weekly_odds: u32,
}

impl Default for RandomProcreation {
    fn default() -> Self {
        Self { weekly_odds: 260 }
    }
}

impl ProcreationProcessor for RandomProcreation {
    fn process_week(&self, campaign: &mut Campaign, person: Entity, date: NaiveDate, dice: &mut dyn Dice) {
        let spouse = match campaign.world.get::<&Family>(person) {
            Ok(family) => family.spouse,
            Err(_) => return,
        };
        // Each couple rolls once, from the partner with the lower id
        let Some(spouse) = spouse.filter(|s| s.id() > person.id()) else {
            return;
        };
        if dice.random_int(self.weekly_odds) != 0 {
            return;
        }

        let family_name = match campaign.world.get::<&Person>(person) {
            Ok(p) => p.name.family.clone(),
            Err(_) => return,
        };
        let mut name = generate_name(dice);
        name.family = family_name;

        let child = campaign.world.spawn((Dependent {
            name,
            birth_date: date,
            parents: [person, spouse],
        },));
        for parent in [person, spouse] {
            if let Ok(mut family) = campaign.world.get::<&mut Family>(parent) {
                family.children.push(child);
            }
        }
        log::debug!("simulated birth on {}", date);
    }
}

/// First simulated week: `years` years and one week before `today`.
pub fn simulation_start(today: NaiveDate, years: u32) -> Option<NaiveDate> {
    today
        .checked_sub_months(Months::new(years * 12))
        .and_then(|d| d.checked_sub_days(Days::new(7)))
}

/// Step weekly from the simulation start up to `campaign.date`, running the
/// enabled processors for every person in `people`.
pub fn run_starting_simulation(
    campaign: &mut Campaign,
    options: &GenerationOptions,
    people: &[Entity],
    marriage: &dyn MarriageProcessor,
    procreation: &dyn ProcreationProcessor,
    dice: &mut dyn Dice,
) {
    let today = campaign.date;
    let Some(mut date) = simulation_start(today, options.simulation_duration_years) else {
        log::warn!("simulation start before the calendar begins; skipping");
        return;
    };

    let mut weeks = 0;
    while date < today {
        for &person in people {
            if options.simulate_random_marriages {
                marriage.process_week(campaign, person, date, dice);
            }
            if options.simulate_random_procreation {
                procreation.process_week(campaign, person, date, dice);
            }
        }
        weeks += 1;
        match date.checked_add_days(Days::new(7)) {
            Some(next) => date = next,
            None => break,
        }
    }
    log::info!("simulated {} weeks before {}", weeks, today);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Name;
    use crate::dice::ScriptedDice;
    use mercgen_logic::faction::{codes, faction_by_code};
    use mercgen_logic::roles::PersonnelRole;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn campaign_with_adults(count: usize) -> (Campaign, Vec<Entity>) {
        let faction = faction_by_code(codes::MERCENARY).unwrap();
        let mut campaign = Campaign::new("Test", faction, date(3025, 1, 1));
        let people = (0..count)
            .map(|i| {
                campaign.recruit_person(Person::new(
                    Name::new(format!("P{i}"), "Smith"),
                    PersonnelRole::MechWarrior,
                    date(3000, 1, 1),
                ))
            })
            .collect();
        (campaign, people)
    }

    #[test]
    fn start_is_years_and_a_week_back() {
        assert_eq!(simulation_start(date(3025, 1, 8), 5), Some(date(3020, 1, 1)));
    }

    #[test]
    fn marriage_links_both_spouses() {
        let (mut campaign, people) = campaign_with_adults(3);
        // chance hit, then pick the second candidate
        let mut dice = ScriptedDice::new([0, 1]);
        RandomMarriage::default().process_week(&mut campaign, people[0], date(3024, 1, 1), &mut dice);

        let spouse = campaign.world.get::<&Family>(people[0]).unwrap().spouse;
        assert_eq!(spouse, Some(people[2]));
        assert_eq!(campaign.world.get::<&Family>(people[2]).unwrap().spouse, Some(people[0]));
        assert!(!campaign.world.get::<&Family>(people[1]).unwrap().is_married());
    }

    #[test]
    fn missed_chance_changes_nothing() {
        let (mut campaign, people) = campaign_with_adults(2);
        let mut dice = ScriptedDice::new([5]);
        RandomMarriage::default().process_week(&mut campaign, people[0], date(3024, 1, 1), &mut dice);
        assert!(!campaign.world.get::<&Family>(people[0]).unwrap().is_married());
    }

    #[test]
    fn couple_has_one_child_per_hit() {
        let (mut campaign, people) = campaign_with_adults(2);
        for (a, b) in [(people[0], people[1]), (people[1], people[0])] {
            campaign.world.get::<&mut Family>(a).unwrap().spouse = Some(b);
        }
        let procreation = RandomProcreation::default();
        let mut dice = ScriptedDice::new([0, 0, 0]);
        // the higher-id partner never rolls
        procreation.process_week(&mut campaign, people[1], date(3024, 1, 1), &mut dice);
        assert_eq!(dice.remaining(), 3);
        procreation.process_week(&mut campaign, people[0], date(3024, 1, 1), &mut dice);

        let children = campaign.world.get::<&Family>(people[0]).unwrap().children.clone();
        assert_eq!(children.len(), 1);
        assert_eq!(campaign.world.get::<&Family>(people[1]).unwrap().children, children);
        let child = campaign.world.get::<&Dependent>(children[0]).unwrap();
        assert_eq!(child.name.family, "Smith");
        assert_eq!(child.parents, [people[0], people[1]]);
    }
}
