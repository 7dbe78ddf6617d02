//! Personnel roster generation.
//!
//! Produces the tracker list in seniority order: company commander, lance
//! officers, rank-and-file, then support personnel and (when assistants are
//! not pooled) astechs and medics.
//!
//! Dice order: for each combat person the origin and person-factory rolls,
//! then a callsign pick if enabled; officer shaping rolls a d3 per officer
//! skill increase (commander first, then captains, then lieutenants); support
//! personnel and assistants roll through the factory in role order.

use std::cmp::Ordering;

use mercgen_logic::faction::Faction;
use mercgen_logic::options::GenerationOptions;
use mercgen_logic::ranks::{
    rank_and_file_rank, support_rank, RankPolicy, CAPTAIN_RANK, LIEUTENANT_RANK,
};
use mercgen_logic::roles::PersonnelRole;
use mercgen_logic::skills::{boost_officer_skill, SkillSet, SkillType};

use super::crew::{OriginSelector, PersonFactory};
use super::names::generate_callsign;
use super::simulation::{run_starting_simulation, MarriageProcessor, ProcreationProcessor};
use super::tracker::{PersonTracker, PersonType};
use crate::campaign::Campaign;
use crate::components::{Education, Person};
use crate::dice::Dice;

/// Collaborators the roster stage draws people and ranks from.
#[derive(Clone, Copy)]
pub struct PersonnelSources<'a> {
    pub person_factory: &'a dyn PersonFactory,
    pub origin: &'a dyn OriginSelector,
    pub rank_policy: &'a dyn RankPolicy,
}

// ============================================================================
// SELECTION
// ============================================================================

/// Command suitability, best first: tactical geniuses lead, then experience
/// and officer skills in the order the policy prefers.
pub fn command_order(a: &Person, b: &Person, prioritize_combat_skills: bool) -> Ordering {
    let genius = b.tactical_genius.cmp(&a.tactical_genius);
    let experience = b.experience().cmp(&a.experience());
    let officer = b
        .skills
        .officer_skill_sum()
        .cmp(&a.skills.officer_skill_sum());
    if prioritize_combat_skills {
        genius.then(experience).then(officer)
    } else {
        genius.then(officer).then(experience)
    }
}

/// Remove and return the best commander candidate. Ties go to the earliest.
pub fn select_company_commander(
    pool: &mut Vec<PersonTracker>,
    prioritize_combat_skills: bool,
) -> Option<PersonTracker> {
    let index = pool
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| command_order(&a.person, &b.person, prioritize_combat_skills))
        .map(|(i, _)| i)?;
    Some(pool.remove(index))
}

/// Remove and return the best `count` officer candidates, best first. The
/// rest of the pool keeps its order.
pub fn select_officers(
    pool: &mut Vec<PersonTracker>,
    count: usize,
    prioritize_combat_skills: bool,
) -> Vec<PersonTracker> {
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.sort_by(|&a, &b| command_order(&pool[a].person, &pool[b].person, prioritize_combat_skills));
    order.truncate(count);

    let mut slots: Vec<Option<PersonTracker>> = pool.drain(..).map(Some).collect();
    let officers: Vec<PersonTracker> = order
        .iter()
        .filter_map(|&i| slots[i].take())
        .collect();
    pool.extend(slots.into_iter().flatten());
    officers
}

/// Stable sort of the remaining pool: geniuses first, then optionally the
/// most experienced.
pub fn sort_residual(pool: &mut [PersonTracker], by_experience: bool) {
    pool.sort_by(|a, b| {
        let genius = b.person.tactical_genius.cmp(&a.person.tactical_genius);
        if by_experience {
            genius.then(b.person.experience().cmp(&a.person.experience()))
        } else {
            genius
        }
    });
}

/// Order raw combat personnel by seniority and tag each one by position. The
/// first tracker is the commander, the next `lance_count - 1` are lance
/// officers.
pub fn order_combat_personnel(
    mut pool: Vec<PersonTracker>,
    options: &GenerationOptions,
) -> Vec<PersonTracker> {
    let lance_count = options.lance_count() as usize;
    let mut ordered = Vec::with_capacity(pool.len());

    if options.assign_best_company_commander {
        if let Some(commander) = select_company_commander(
            &mut pool,
            options.prioritize_company_commander_combat_skills,
        ) {
            ordered.push(commander);
        }
    }

    if options.assign_best_officers {
        let count = lance_count.saturating_sub(ordered.len());
        ordered.extend(select_officers(
            &mut pool,
            count,
            options.prioritize_officer_combat_skills,
        ));
    }

    sort_residual(&mut pool, options.assign_most_skilled_to_primary_lances);
    ordered.extend(pool);

    for (i, tracker) in ordered.iter_mut().enumerate() {
        tracker.person_type = if i == 0 {
            PersonType::CompanyCommander
        } else if i < lance_count {
            PersonType::Lieutenant
        } else {
            PersonType::RankAndFile
        };
    }
    ordered
}

// ============================================================================
// OFFICER SHAPING
// ============================================================================

/// Apply `count` random officer-skill increases.
pub fn increase_officer_skills(skills: &mut SkillSet, count: u32, dice: &mut dyn Dice) {
    for _ in 0..count {
        boost_officer_skill(skills, dice.dice(1, 3) as u32);
    }
}

/// Raise the lower of gunnery and piloting; both if neither is known.
/// Ties raise gunnery.
pub fn balance_combat_skills(skills: &mut SkillSet) {
    let gunnery = skills.level(SkillType::Gunnery);
    let piloting = skills.level(SkillType::Piloting);
    match (gunnery, piloting) {
        (None, None) => {
            skills.improve(SkillType::Gunnery);
            skills.improve(SkillType::Piloting);
        }
        (g, p) if g <= p => {
            skills.improve(SkillType::Gunnery);
        }
        _ => {
            skills.improve(SkillType::Piloting);
        }
    }
}

/// `rank` is `None` when ranks are not assigned automatically; the person
/// keeps their current rank.
pub fn generate_commanding_officer(
    tracker: &mut PersonTracker,
    rank: Option<u8>,
    dice: &mut dyn Dice,
) {
    if !tracker.person_type.is_officer() {
        log::error!(
            "cannot make {} the company commander: tagged {:?}",
            tracker.person.name.full_name(),
            tracker.person_type
        );
        return;
    }
    tracker.person_type = PersonType::CompanyCommander;
    let skills = &mut tracker.person.skills;
    skills.improve(SkillType::Gunnery);
    skills.improve(SkillType::Piloting);
    increase_officer_skills(skills, 2, dice);
    if let Some(rank) = rank {
        tracker.person.rank = rank;
    }
}

pub fn generate_captain(tracker: &mut PersonTracker, assign_rank: bool, dice: &mut dyn Dice) {
    if !tracker.person_type.is_officer() {
        log::error!(
            "cannot make {} a captain: tagged {:?}",
            tracker.person.name.full_name(),
            tracker.person_type
        );
        return;
    }
    tracker.person_type = PersonType::Captain;
    increase_officer_skills(&mut tracker.person.skills, 2, dice);
    if assign_rank {
        tracker.person.rank = CAPTAIN_RANK;
    }
}

pub fn generate_lieutenant(tracker: &mut PersonTracker, assign_rank: bool, dice: &mut dyn Dice) {
    if !tracker.person_type.is_officer() {
        log::error!(
            "cannot make {} a lieutenant: tagged {:?}",
            tracker.person.name.full_name(),
            tracker.person_type
        );
        return;
    }
    tracker.person_type = PersonType::Lieutenant;
    balance_combat_skills(&mut tracker.person.skills);
    increase_officer_skills(&mut tracker.person.skills, 1, dice);
    if assign_rank {
        tracker.person.rank = LIEUTENANT_RANK;
    }
}

/// Shape the commander and lance officers at the front of a seniority-ordered
/// roster, then rank the rank-and-file. Nobody is ranked unless
/// `automatically_assign_ranks` is set.
pub fn shape_combat_personnel(
    trackers: &mut [PersonTracker],
    options: &GenerationOptions,
    faction: &Faction,
    rank_policy: &dyn RankPolicy,
    dice: &mut dyn Dice,
) {
    let officer_count = (options.lance_count() as usize).saturating_sub(1);
    let captain_count = options.captain_count() as usize;
    let assign_ranks = options.automatically_assign_ranks;

    if let Some(commander) = trackers.first_mut() {
        let rank = assign_ranks.then(|| {
            rank_policy.commanding_officer_rank(faction, options.combat_personnel_count())
        });
        generate_commanding_officer(commander, rank, dice);
    }

    for (n, officer) in trackers.iter_mut().skip(1).take(officer_count).enumerate() {
        if n < captain_count {
            generate_captain(officer, assign_ranks, dice);
        } else {
            generate_lieutenant(officer, assign_ranks, dice);
        }
    }

    if assign_ranks {
        let rank = rank_and_file_rank(faction);
        for tracker in trackers
            .iter_mut()
            .filter(|t| t.person_type == PersonType::RankAndFile)
        {
            tracker.person.rank = rank;
        }
    }
}

// ============================================================================
// GENERATION
// ============================================================================

fn new_tracker(
    campaign: &Campaign,
    sources: PersonnelSources<'_>,
    role: PersonnelRole,
    person_type: PersonType,
    dice: &mut dyn Dice,
) -> PersonTracker {
    let origin = sources.origin.select_origin(&campaign.faction, dice);
    let person = sources
        .person_factory
        .new_person(role, &origin, campaign.date, dice);
    PersonTracker::new(person_type, person)
}

/// Raw MechWarriors, one per lance slot.
pub fn generate_combat_personnel(
    campaign: &Campaign,
    options: &GenerationOptions,
    sources: PersonnelSources<'_>,
    dice: &mut dyn Dice,
) -> Vec<PersonTracker> {
    (0..options.combat_personnel_count())
        .map(|_| {
            let mut tracker = new_tracker(
                campaign,
                sources,
                PersonnelRole::MechWarrior,
                PersonType::RankAndFile,
                dice,
            );
            if options.assign_random_callsigns {
                tracker.person.name.callsign = Some(generate_callsign(dice));
            }
            tracker
        })
        .collect()
}

/// Support personnel per configured role and count.
pub fn generate_support_personnel(
    campaign: &Campaign,
    options: &GenerationOptions,
    sources: PersonnelSources<'_>,
    dice: &mut dyn Dice,
) -> Vec<PersonTracker> {
    let rank = support_rank(&campaign.faction);
    let mut trackers = Vec::new();
    for (&role, &count) in &options.support_personnel {
        if role.is_combat() || role.is_assistant() {
            log::warn!("{} requested as support personnel; skipped", role.name());
            continue;
        }
        for _ in 0..count {
            let mut tracker = new_tracker(campaign, sources, role, PersonType::Support, dice);
            tracker.person.rank = rank;
            trackers.push(tracker);
        }
    }
    trackers
}

/// Astechs and medics to cover the campaign's current need, counting the
/// techs and doctors in `support`.
pub fn generate_assistants(
    campaign: &Campaign,
    support: &[PersonTracker],
    sources: PersonnelSources<'_>,
    dice: &mut dyn Dice,
) -> Vec<PersonTracker> {
    let techs = support.iter().filter(|t| t.person.role.is_tech()).count() as u32;
    let doctors = support.iter().filter(|t| t.person.role.is_doctor()).count() as u32;
    let rank = support_rank(&campaign.faction);

    let needs = [
        (PersonnelRole::Astech, campaign.astechs_needed(techs)),
        (PersonnelRole::Medic, campaign.medics_needed(doctors)),
    ];
    let mut trackers = Vec::new();
    for (role, count) in needs {
        for _ in 0..count {
            let mut tracker = new_tracker(campaign, sources, role, PersonType::Assistant, dice);
            tracker.person.rank = rank;
            trackers.push(tracker);
        }
    }
    trackers
}

/// Full roster: combat personnel in seniority order, support, assistants.
pub fn generate_personnel(
    campaign: &Campaign,
    options: &GenerationOptions,
    sources: PersonnelSources<'_>,
    dice: &mut dyn Dice,
) -> Vec<PersonTracker> {
    let raw = generate_combat_personnel(campaign, options, sources, dice);
    let mut trackers = order_combat_personnel(raw, options);
    shape_combat_personnel(
        &mut trackers,
        options,
        &campaign.faction,
        sources.rank_policy,
        dice,
    );

    let support = generate_support_personnel(campaign, options, sources, dice);
    let assistants = if options.pool_assistants {
        Vec::new()
    } else {
        generate_assistants(campaign, &support, sources, dice)
    };
    trackers.extend(support);
    trackers.extend(assistants);

    log::info!(
        "generated {} personnel ({} combat)",
        trackers.len(),
        options.combat_personnel_count()
    );
    trackers
}

/// Founder flags, recruitment, the optional start-up simulation, and
/// education.
pub fn finalize_personnel(
    campaign: &mut Campaign,
    options: &GenerationOptions,
    trackers: &mut [PersonTracker],
    marriage: &dyn MarriageProcessor,
    procreation: &dyn ProcreationProcessor,
    dice: &mut dyn Dice,
) {
    if options.assign_founder_flag {
        for tracker in trackers.iter_mut() {
            tracker.person.founder = true;
        }
    }

    for tracker in trackers.iter_mut() {
        tracker.person_entity = Some(campaign.recruit_person(tracker.person.clone()));
    }

    if options.pool_assistants {
        campaign.fill_assistant_pools();
    }

    if options.run_starting_simulation {
        let people: Vec<_> = trackers.iter().filter_map(|t| t.person_entity).collect();
        run_starting_simulation(campaign, options, &people, marriage, procreation, dice);
    }

    for tracker in trackers.iter_mut() {
        let education = Education::for_experience(tracker.person.experience());
        tracker.person.education = Some(education);
        if let Some(entity) = tracker.person_entity {
            if let Ok(mut person) = campaign.world.get::<&mut Person>(entity) {
                person.education = Some(education);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Name;
    use crate::dice::ScriptedDice;
    use chrono::NaiveDate;
    use mercgen_logic::faction::{codes, faction_by_code};
    use mercgen_logic::ranks::{StandardRankPolicy, RANK_NONE};
    use mercgen_logic::skills::ExperienceLevel;

    fn tracker(name: &str, gunnery: i32, officer: i32, genius: bool) -> PersonTracker {
        let mut person = Person::new(
            Name::new(name, "Test"),
            PersonnelRole::MechWarrior,
            NaiveDate::from_ymd_opt(3000, 1, 1).unwrap(),
        );
        person.skills.set(SkillType::Gunnery, gunnery);
        person.skills.set(SkillType::Piloting, gunnery);
        if officer > 0 {
            person.skills.set(SkillType::Leadership, officer);
        }
        person.tactical_genius = genius;
        PersonTracker::new(PersonType::RankAndFile, person)
    }

    fn names(trackers: &[PersonTracker]) -> Vec<&str> {
        trackers.iter().map(|t| t.person.name.given.as_str()).collect()
    }

    #[test]
    fn genius_outranks_experience() {
        let mut pool = vec![tracker("vet", 6, 0, false), tracker("genius", 2, 0, true)];
        let commander = select_company_commander(&mut pool, true).unwrap();
        assert_eq!(commander.person.name.given, "genius");
        assert_eq!(names(&pool), vec!["vet"]);
    }

    #[test]
    fn commander_policy_switches_priority() {
        let pool = vec![tracker("fighter", 8, 0, false), tracker("leader", 2, 6, false)];

        let mut combat_first = pool.clone();
        let chosen = select_company_commander(&mut combat_first, true).unwrap();
        assert_eq!(chosen.person.name.given, "fighter");

        let mut command_first = pool;
        let chosen = select_company_commander(&mut command_first, false).unwrap();
        assert_eq!(chosen.person.name.given, "leader");
    }

    #[test]
    fn commander_selection_is_repeatable() {
        let pool = vec![
            tracker("a", 4, 1, false),
            tracker("b", 4, 1, false),
            tracker("c", 2, 1, false),
        ];
        let first = select_company_commander(&mut pool.clone(), true).unwrap();
        let second = select_company_commander(&mut pool.clone(), true).unwrap();
        assert_eq!(first.person, second.person);
        // tie goes to generation order
        assert_eq!(first.person.name.given, "a");
    }

    #[test]
    fn officers_leave_pool_order_intact() {
        let mut pool = vec![
            tracker("a", 2, 0, false),
            tracker("b", 8, 0, false),
            tracker("c", 4, 0, false),
            tracker("d", 6, 0, false),
        ];
        let officers = select_officers(&mut pool, 2, true);
        assert_eq!(names(&officers), vec!["b", "d"]);
        // tagging is positional and happens once the roster is ordered
        assert!(officers.iter().all(|t| t.person_type == PersonType::RankAndFile));
        assert_eq!(names(&pool), vec!["a", "c"]);
    }

    #[test]
    fn default_company_shape() {
        let options = GenerationOptions::default();
        let pool: Vec<PersonTracker> = (0..12)
            .map(|i| tracker(&format!("p{i}"), (i % 9) as i32, 0, false))
            .collect();
        let ordered = order_combat_personnel(pool, &options);
        assert_eq!(ordered.len(), 12);
        assert_eq!(ordered[0].person_type, PersonType::CompanyCommander);
        assert!(ordered[1..3].iter().all(|t| t.person_type == PersonType::Lieutenant));
        assert!(ordered[3..].iter().all(|t| t.person_type == PersonType::RankAndFile));
        // most experienced first
        assert_eq!(ordered[0].person.experience(), ExperienceLevel::Elite);
    }

    #[test]
    fn officer_boost_acquires_skill_at_one() {
        let mut skills = SkillSet::new();
        let mut dice = ScriptedDice::new([3]);
        increase_officer_skills(&mut skills, 1, &mut dice);
        assert_eq!(skills.level(SkillType::Tactics), Some(1));
    }

    #[test]
    fn balancing_raises_lower_skill() {
        let mut skills = SkillSet::new();
        balance_combat_skills(&mut skills);
        assert_eq!(skills.level(SkillType::Gunnery), Some(0));
        assert_eq!(skills.level(SkillType::Piloting), Some(0));

        skills.set(SkillType::Gunnery, 5);
        balance_combat_skills(&mut skills);
        assert_eq!(skills.level(SkillType::Piloting), Some(1));
        assert_eq!(skills.level(SkillType::Gunnery), Some(5));
    }

    #[test]
    fn non_officer_shaping_is_skipped() {
        let mut trooper = tracker("t", 4, 0, false);
        let before = trooper.person.clone();
        let mut dice = ScriptedDice::new([1, 1]);
        generate_captain(&mut trooper, true, &mut dice);
        assert_eq!(trooper.person, before);
        assert_eq!(trooper.person_type, PersonType::RankAndFile);
        assert_eq!(dice.remaining(), 2);
    }

    #[test]
    fn commander_gets_combat_and_officer_boosts() {
        let mut commander = tracker("c", 4, 0, false);
        commander.person_type = PersonType::CompanyCommander;
        let mut dice = ScriptedDice::new([1, 1]);
        generate_commanding_officer(&mut commander, Some(30), &mut dice);
        let skills = &commander.person.skills;
        assert_eq!(skills.level(SkillType::Gunnery), Some(5));
        assert_eq!(skills.level(SkillType::Piloting), Some(5));
        assert_eq!(skills.level(SkillType::Leadership), Some(2));
        assert_eq!(commander.person.rank, 30);
    }

    #[test]
    fn ranks_left_alone_when_not_assigned() {
        let options = GenerationOptions {
            automatically_assign_ranks: false,
            ..GenerationOptions::default()
        };
        let merc = faction_by_code(codes::MERCENARY).unwrap();
        let pool: Vec<PersonTracker> = (0..12)
            .map(|i| tracker(&format!("p{i}"), (i % 9) as i32, 0, false))
            .collect();
        let mut ordered = order_combat_personnel(pool, &options);
        let mut dice = ScriptedDice::new([]);
        shape_combat_personnel(&mut ordered, &options, &merc, &StandardRankPolicy, &mut dice);

        assert_eq!(ordered[0].person_type, PersonType::CompanyCommander);
        assert_eq!(ordered[1].person_type, PersonType::Captain);
        assert!(ordered.iter().all(|t| t.person.rank == RANK_NONE));
    }

    #[test]
    fn officer_ranks_follow_seniority() {
        let options = GenerationOptions::default();
        let merc = faction_by_code(codes::MERCENARY).unwrap();
        let pool: Vec<PersonTracker> = (0..12)
            .map(|i| tracker(&format!("p{i}"), (i % 9) as i32, 0, false))
            .collect();
        let mut ordered = order_combat_personnel(pool, &options);
        let mut dice = ScriptedDice::new([]);
        shape_combat_personnel(&mut ordered, &options, &merc, &StandardRankPolicy, &mut dice);

        assert_eq!(
            ordered[0].person.rank,
            StandardRankPolicy.commanding_officer_rank(&merc, 12)
        );
        assert!(ordered[1..3].iter().all(|t| t.person.rank == CAPTAIN_RANK));
        assert!(ordered[3..].iter().all(|t| t.person.rank == rank_and_file_rank(&merc)));
    }
}
