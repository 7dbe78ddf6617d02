//! Integration tests for the full company generation pipeline.
//!
//! Exercises: options → roster → unit rolls → designs → force tree → icons
//! → spares → finances, against an in-memory campaign.

use chrono::NaiveDate;
use mercgen_core::campaign::Campaign;
use mercgen_core::components::{Family, Person, Unit};
use mercgen_core::dice::ScriptedDice;
use mercgen_core::forces::{ForceKind, LayerSlot};
use mercgen_core::generation::parameters::roll_parameters;
use mercgen_core::generation::{PersonType, UnitGenerationParameters};
use mercgen_core::generator::{CompanyGenerator, GenerationResult};
use mercgen_logic::armor::{merge_armor, ArmorLot, ArmorType, PartQuality};
use mercgen_logic::options::{GenerationMethod, GenerationOptions, PartGenerationMethod};
use mercgen_logic::ranks::{rank_and_file_rank, CAPTAIN_RANK, LIEUTENANT_RANK, RANK_NONE};
use mercgen_logic::skills::{boost_officer_skill, SkillSet, SkillType};
use mercgen_logic::weight::{RollTables, StandardRollTables, WindchildRollTables};
use proptest::prelude::*;
use std::cmp::Ordering;

// ── Helpers ────────────────────────────────────────────────────────────

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(3025, 1, 1).unwrap()
}

fn run(options: GenerationOptions, seed: u64) -> (Campaign, GenerationResult) {
    let generator = CompanyGenerator::new(options).unwrap();
    let mut campaign = generator.new_campaign(start_date()).unwrap();
    let result = generator.generate_seeded(&mut campaign, seed).unwrap();
    (campaign, result)
}

fn count_type(result: &GenerationResult, person_type: PersonType) -> usize {
    result
        .trackers
        .iter()
        .filter(|t| t.person_type == person_type)
        .count()
}

// ── Roster ─────────────────────────────────────────────────────────────

#[test]
fn roster_size_with_pooled_assistants() {
    let options = GenerationOptions::default();
    let expected = (options.combat_personnel_count() + options.support_personnel_count()) as usize;
    let (campaign, result) = run(options, 1);

    assert_eq!(result.trackers.len(), expected);
    assert_eq!(campaign.personnel().len(), expected);
    // five techs and one doctor
    assert_eq!(campaign.astech_pool, 30);
    assert_eq!(campaign.medic_pool, 4);
}

#[test]
fn roster_size_with_generated_assistants() {
    let options = GenerationOptions {
        pool_assistants: false,
        ..GenerationOptions::default()
    };
    let (campaign, result) = run(options, 2);

    assert_eq!(count_type(&result, PersonType::Assistant), 34);
    assert_eq!(result.trackers.len(), 12 + 10 + 34);
    assert_eq!(campaign.astech_pool, 0);
    assert_eq!(campaign.astechs_needed(0), 0);
    assert_eq!(campaign.medics_needed(0), 0);
}

#[test]
fn single_company_command_structure() {
    let (_, result) = run(GenerationOptions::default(), 3);

    assert_eq!(count_type(&result, PersonType::CompanyCommander), 1);
    assert_eq!(count_type(&result, PersonType::Captain), 2);
    assert_eq!(count_type(&result, PersonType::Lieutenant), 0);
    assert_eq!(count_type(&result, PersonType::RankAndFile), 9);

    for tracker in result.combat() {
        match tracker.person_type {
            PersonType::Captain => assert_eq!(tracker.person.rank, CAPTAIN_RANK),
            PersonType::RankAndFile => assert_eq!(tracker.person.rank, 8),
            _ => {}
        }
    }
}

#[test]
fn individual_lance_is_led_by_a_lieutenant() {
    let options = GenerationOptions {
        individual_lance_count: 1,
        ..GenerationOptions::default()
    };
    let (_, result) = run(options, 4);

    assert_eq!(count_type(&result, PersonType::Captain), 2);
    assert_eq!(count_type(&result, PersonType::Lieutenant), 1);
    let lieutenant = result
        .combat()
        .find(|t| t.person_type == PersonType::Lieutenant)
        .unwrap();
    assert_eq!(lieutenant.person.rank, LIEUTENANT_RANK);
}

#[test]
fn unranked_company_when_ranks_are_not_assigned() {
    let options = GenerationOptions {
        automatically_assign_ranks: false,
        ..GenerationOptions::default()
    };
    let (_, result) = run(options, 3);

    assert_eq!(count_type(&result, PersonType::CompanyCommander), 1);
    assert_eq!(count_type(&result, PersonType::Captain), 2);
    for tracker in result.combat() {
        assert_eq!(
            tracker.person.rank, RANK_NONE,
            "{:?} was ranked",
            tracker.person_type
        );
    }
}

#[test]
fn commander_leads_the_first_lance() {
    let (campaign, result) = run(GenerationOptions::default(), 5);

    let first_lance = campaign.forces.get(result.chart.lances[0]).unwrap();
    let commander = result
        .combat()
        .find(|t| t.person_type == PersonType::CompanyCommander)
        .unwrap();
    assert_eq!(Some(first_lance.slots[0].person), commander.person_entity);
}

#[test]
fn commander_is_the_best_candidate() {
    let (_, result) = run(GenerationOptions::default(), 6);
    let commander = &result.trackers[0];
    assert_eq!(commander.person_type, PersonType::CompanyCommander);

    // Nobody else is a tactical genius when the commander is not one.
    if !commander.person.tactical_genius {
        assert!(result.combat().all(|t| !t.person.tactical_genius));
    }
}

#[test]
fn founders_and_education() {
    let (campaign, result) = run(GenerationOptions::default(), 7);
    for tracker in &result.trackers {
        assert!(tracker.person.founder);
        let entity = tracker.person_entity.unwrap();
        let person = campaign.world.get::<&Person>(entity).unwrap();
        assert!(person.education.is_some());
        assert_eq!(person.education, tracker.person.education);
    }
}

#[test]
fn simulated_marriages_are_mutual() {
    let options = GenerationOptions {
        run_starting_simulation: true,
        simulate_random_marriages: true,
        simulate_random_procreation: true,
        ..GenerationOptions::default()
    };
    let (campaign, _) = run(options, 8);

    for person in campaign.personnel() {
        let family = campaign.world.get::<&Family>(person).unwrap();
        if let Some(spouse) = family.spouse {
            let other = campaign.world.get::<&Family>(spouse).unwrap();
            assert_eq!(other.spouse, Some(person));
        }
    }
}

// ── Units ──────────────────────────────────────────────────────────────

#[test]
fn units_are_crewed_attached_and_seated() {
    let (campaign, result) = run(GenerationOptions::default(), 9);

    for tracker in result.combat() {
        let Some(unit) = tracker.unit_entity else {
            assert!(tracker
                .parameters
                .map(|p| !p.generates_unit())
                .unwrap_or(true)
                || tracker.design.is_none());
            continue;
        };
        let record = campaign.world.get::<&Unit>(unit).unwrap();
        assert_eq!(record.commander, tracker.person_entity);
        assert!(record.attached);
        assert!(!record.mothballed);
        assert!(record.force.is_some());
    }

    for &lance in &result.chart.lances {
        assert_eq!(campaign.forces.get(lance).unwrap().slots.len(), 4);
    }
}

#[test]
fn techs_assigned_in_lance_order() {
    let (campaign, result) = run(GenerationOptions::default(), 10);
    let active = result.active_units();
    let with_tech = active
        .iter()
        .filter(|&&u| campaign.world.get::<&Unit>(u).unwrap().tech.is_some())
        .count();
    assert_eq!(with_tech, active.len().min(5));
}

#[test]
fn star_league_only_company() {
    let options = GenerationOptions {
        star_league_only: true,
        ..GenerationOptions::default()
    };
    let (_, result) = run(options, 11);
    for tracker in result.combat() {
        let parameters = tracker.parameters.unwrap();
        assert!(parameters.star_league);
        if let Some(design) = &tracker.design {
            assert!(design.star_league);
        }
    }
}

#[test]
fn windchild_clan_company() {
    let options = GenerationOptions {
        method: GenerationMethod::Windchild,
        faction_code: "CW".into(),
        ..GenerationOptions::default()
    };
    let generator = CompanyGenerator::new(options).unwrap();
    let date = NaiveDate::from_ymd_opt(3050, 6, 1).unwrap();
    let mut campaign = generator.new_campaign(date).unwrap();
    let result = generator.generate_seeded(&mut campaign, 12).unwrap();

    let clan_rank = rank_and_file_rank(&campaign.faction);
    for tracker in result.combat() {
        if tracker.person_type == PersonType::RankAndFile {
            assert_eq!(tracker.person.rank, clan_rank);
        }
    }
    let lance = campaign.forces.get(result.chart.lances[0]).unwrap();
    assert!(lance.name.ends_with("Star"));
}

// ── Unit rolls ─────────────────────────────────────────────────────────

fn rolled(
    modifier: i32,
    rolls: [i32; 3],
    tables: &dyn RollTables,
) -> UnitGenerationParameters {
    let mut dice = ScriptedDice::new(rolls);
    roll_parameters(modifier, false, tables, &mut dice)
}

proptest! {
    #[test]
    fn higher_seniority_never_rolls_worse(
        weight in 2i32..=12,
        reroll in 2i32..=12,
        quality in 2i32..=12,
        low in 0i32..=2,
        bump in 0i32..=2,
        windchild in any::<bool>(),
    ) {
        let tables: &dyn RollTables = if windchild {
            &WindchildRollTables
        } else {
            &StandardRollTables
        };
        let junior = rolled(low, [weight, reroll, quality], tables);
        let senior = rolled(low + bump, [weight, reroll, quality], tables);
        prop_assert_ne!(senior.rank_cmp(&junior), Ordering::Less);
    }
}

#[test]
fn officer_boost_acquires_absent_skill() {
    let mut skills = SkillSet::new();
    assert_eq!(boost_officer_skill(&mut skills, 3), Some(SkillType::Tactics));
    assert_eq!(skills.level(SkillType::Tactics), Some(1));
    assert_eq!(boost_officer_skill(&mut skills, 3), Some(SkillType::Tactics));
    assert_eq!(skills.level(SkillType::Tactics), Some(2));
}

// ── Spares ─────────────────────────────────────────────────────────────

#[test]
fn armour_lots_merge_by_key() {
    let mut worn = ArmorLot::new(ArmorType::Standard, false, 40);
    worn.quality = PartQuality::C;
    let lots = [
        ArmorLot::new(ArmorType::Standard, false, 100),
        ArmorLot::new(ArmorType::Standard, false, 60),
        worn,
        ArmorLot::new(ArmorType::FerroFibrous, false, 80),
    ];
    let merged = merge_armor(&lots);
    assert_eq!(merged.len(), 3);
    let total: u32 = merged.iter().map(|l| l.amount).sum();
    assert_eq!(total, 280);
    let standard = merged
        .iter()
        .find(|l| l.armor_type == ArmorType::Standard && l.quality == PartQuality::D)
        .unwrap();
    assert_eq!(standard.amount, 160);
}

#[test]
fn spares_land_in_the_warehouse() {
    let options = GenerationOptions {
        generate_mothballed_spare_units: true,
        spare_units_percent: 25,
        part_generation_method: PartGenerationMethod::Windchild,
        ..GenerationOptions::default()
    };
    let (campaign, result) = run(options, 13);

    let active = result.active_units().len();
    let expected = (active as f64 * 0.25).round() as usize;
    assert!(result.spares.mothballed.len() <= expected);
    for &unit in &result.spares.mothballed {
        let record = campaign.world.get::<&Unit>(unit).unwrap();
        assert!(record.mothballed);
        assert!(record.force.is_none());
        assert!(record.commander.is_none());
    }

    assert_eq!(campaign.warehouse.parts().len(), result.spares.parts.len());
    if !result.spares.armor.is_empty() {
        let tons: f64 = campaign.warehouse.armor().iter().map(ArmorLot::tonnage).sum();
        assert!((tons - 60.0).abs() < 5.0, "armour tonnage {tons}");
    }
}

// ── Finances ───────────────────────────────────────────────────────────

#[test]
fn shortfall_becomes_a_loan() {
    let options = GenerationOptions {
        starting_cash: 0,
        ..GenerationOptions::default()
    };
    let (campaign, result) = run(options, 14);

    let costs = result.ledger.costs.unwrap().total();
    assert!(costs > 0);
    assert_eq!(result.ledger.final_cash, 3_500_000);
    let loan = result.ledger.loan.as_ref().unwrap();
    assert_eq!(loan.principal, costs + 3_500_000);
    assert_eq!(loan.rate, 15);
    assert_eq!(loan.start_date, start_date());
    assert_eq!(campaign.finances.balance(), 3_500_000);
    assert_eq!(campaign.finances.loans().len(), 1);
    assert!(campaign.reports()[0].contains("starting loan"));
}

#[test]
fn rich_company_pays_outright() {
    let options = GenerationOptions {
        starting_cash: 1_000_000_000_000,
        ..GenerationOptions::default()
    };
    let (campaign, result) = run(options, 15);

    let costs = result.ledger.costs.unwrap().total();
    assert_eq!(result.ledger.final_cash, 1_000_000_000_000 - costs);
    assert!(result.ledger.loan.is_none());
    assert!(campaign.finances.loans().is_empty());
    assert!(!campaign.reports()[0].contains("loan"));
}

#[test]
fn no_loans_means_float_only() {
    let options = GenerationOptions {
        starting_cash: 0,
        allow_starting_loan: false,
        ..GenerationOptions::default()
    };
    let (campaign, result) = run(options, 16);
    assert_eq!(result.ledger.final_cash, 3_500_000);
    assert!(result.ledger.loan.is_none());
    assert!(campaign.finances.loans().is_empty());
}

// ── Forces and icons ───────────────────────────────────────────────────

#[test]
fn command_lance_tree_and_icons() {
    let options = GenerationOptions {
        generate_mercenary_company_command_lance: true,
        use_faction_background_icon: true,
        ..GenerationOptions::default()
    };
    let (campaign, result) = run(options, 17);

    assert_eq!(count_type(&result, PersonType::Captain), 3);
    let command = campaign.forces.get(result.chart.command_lance.unwrap()).unwrap();
    assert_eq!(command.kind, ForceKind::CommandLance);
    let icon = command.icon.as_ref().unwrap();
    assert_eq!(icon.layers(LayerSlot::Alphanumeric)[0].filename, "HQ.png");

    for id in campaign.forces.subtree(result.chart.origin) {
        let icon = campaign.forces.get(id).unwrap().icon.as_ref().unwrap();
        assert_eq!(icon.layers(LayerSlot::Background).len(), 1);
    }
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn same_seed_same_company() {
    let (first_campaign, first) = run(GenerationOptions::default(), 99);
    let (second_campaign, second) = run(GenerationOptions::default(), 99);

    let people = |r: &GenerationResult| -> Vec<Person> {
        r.trackers.iter().map(|t| t.person.clone()).collect()
    };
    assert_eq!(people(&first), people(&second));
    assert_eq!(first.ledger, second.ledger);
    assert_eq!(
        first_campaign.warehouse.parts(),
        second_campaign.warehouse.parts()
    );
    let designs = |r: &GenerationResult| -> Vec<Option<String>> {
        r.trackers
            .iter()
            .map(|t| t.design.as_ref().map(|d| d.full_name()))
            .collect()
    };
    assert_eq!(designs(&first), designs(&second));
}
