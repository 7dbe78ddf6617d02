//! MercGen Headless Generation Harness
//!
//! Generates companies across a sweep of seeds and scenarios and checks the
//! invariants every generated company must satisfy.
//! Runs entirely in-process against an in-memory campaign.
//!
//! Usage:
//!   cargo run -p mercgen-simtest
//!   cargo run -p mercgen-simtest -- --verbose

use chrono::NaiveDate;
use mercgen_core::campaign::Campaign;
use mercgen_core::components::Unit;
use mercgen_core::generation::PersonType;
use mercgen_core::generator::{CompanyGenerator, GenerationResult};
use mercgen_logic::options::{GenerationMethod, GenerationOptions, PartGenerationMethod};

const SEEDS: u64 = 25;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Scenario {
    name: &'static str,
    options: GenerationOptions,
    date: NaiveDate,
}

fn date(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default()
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "standard_company",
            options: GenerationOptions::default(),
            date: date(3025),
        },
        Scenario {
            name: "battalion_command_lance",
            options: GenerationOptions {
                company_count: 3,
                generate_mercenary_company_command_lance: true,
                individual_lance_count: 1,
                pool_assistants: false,
                keep_officer_rolls_separate: true,
                ..GenerationOptions::default()
            },
            date: date(3025),
        },
        Scenario {
            name: "windchild_clan_trinary",
            options: GenerationOptions {
                method: GenerationMethod::Windchild,
                faction_code: "CJF".into(),
                lance_size: 5,
                ..GenerationOptions::default()
            },
            date: date(3052),
        },
        Scenario {
            name: "star_league_spares",
            options: GenerationOptions {
                star_league_only: true,
                generate_mothballed_spare_units: true,
                spare_units_percent: 30,
                part_generation_method: PartGenerationMethod::Multiple(2),
                starting_cash: 0,
                ..GenerationOptions::default()
            },
            date: date(3025),
        },
        Scenario {
            name: "random_cash_simulation",
            options: GenerationOptions {
                start_with_random_cash: true,
                run_starting_simulation: true,
                simulate_random_marriages: true,
                simulate_random_procreation: true,
                assign_random_callsigns: true,
                ..GenerationOptions::default()
            },
            date: date(3030),
        },
    ]
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    println!("=== MercGen Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Options round-trip through JSON
    results.extend(validate_options_json());

    // 2. Scenario sweeps
    for scenario in scenarios() {
        results.extend(validate_scenario(&scenario, verbose));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Options ──────────────────────────────────────────────────────────

fn validate_options_json() -> Vec<TestResult> {
    println!("--- Options ---");
    let mut results = Vec::new();

    for scenario in scenarios() {
        let name = format!("{}_json_roundtrip", scenario.name);
        let outcome = scenario
            .options
            .to_json_string()
            .and_then(|json| GenerationOptions::from_json_str(&json));
        results.push(match outcome {
            Ok(reloaded) => TestResult {
                name,
                passed: reloaded == scenario.options,
                detail: "options survive serialisation".into(),
            },
            Err(e) => TestResult {
                name,
                passed: false,
                detail: format!("JSON error: {}", e),
            },
        });
    }
    results
}

// ── 2. Scenarios ────────────────────────────────────────────────────────

#[derive(Default)]
struct Sweep {
    runs: u64,
    units: usize,
    mothballed: usize,
    loans: usize,
    children: usize,
    failures: Vec<String>,
}

impl Sweep {
    fn check(&mut self, seed: u64, ok: bool, what: impl FnOnce() -> String) {
        if !ok {
            self.failures.push(format!("seed {}: {}", seed, what()));
        }
    }
}

fn run(scenario: &Scenario, seed: u64) -> Result<(Campaign, GenerationResult), String> {
    let generator = CompanyGenerator::new(scenario.options.clone()).map_err(|e| e.to_string())?;
    let mut campaign = generator
        .new_campaign(scenario.date)
        .map_err(|e| e.to_string())?;
    let result = generator
        .generate_seeded(&mut campaign, seed)
        .map_err(|e| e.to_string())?;
    Ok((campaign, result))
}

fn validate_scenario(scenario: &Scenario, verbose: bool) -> Vec<TestResult> {
    println!("--- {} ---", scenario.name);
    let options = &scenario.options;
    let mut sweep = Sweep::default();

    for seed in 0..SEEDS {
        let (campaign, result) = match run(scenario, seed) {
            Ok(run) => run,
            Err(e) => {
                sweep.failures.push(format!("seed {}: generation failed: {}", seed, e));
                continue;
            }
        };
        sweep.runs += 1;
        check_roster(&mut sweep, seed, options, &result);
        check_forces(&mut sweep, seed, options, &campaign, &result);
        check_finances(&mut sweep, seed, options, &campaign, &result);
        sweep.units += result.active_units().len();
        sweep.mothballed += result.spares.mothballed.len();
        sweep.loans += usize::from(result.ledger.loan.is_some());
        sweep.children += campaign
            .world
            .query::<&mercgen_core::components::Dependent>()
            .iter()
            .count();
    }

    let mut results = vec![TestResult {
        name: format!("{}_invariants", scenario.name),
        passed: sweep.failures.is_empty(),
        detail: if sweep.failures.is_empty() {
            format!(
                "{} seeds, {:.1} units/run, {} mothballed, {} loans, {} children",
                sweep.runs,
                sweep.units as f64 / sweep.runs.max(1) as f64,
                sweep.mothballed,
                sweep.loans,
                sweep.children
            )
        } else {
            let shown = if verbose { sweep.failures.len() } else { 3 };
            format!(
                "{} failures: {}",
                sweep.failures.len(),
                sweep
                    .failures
                    .iter()
                    .take(shown)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("; ")
            )
        },
    }];

    results.push(validate_determinism(scenario));
    results
}

fn check_roster(sweep: &mut Sweep, seed: u64, options: &GenerationOptions, result: &GenerationResult) {
    let count = |t: PersonType| result.trackers.iter().filter(|x| x.person_type == t).count();
    let lance_count = options.lance_count() as usize;
    let captains = (options.captain_count() as usize).min(lance_count.saturating_sub(1));
    let lieutenants = lance_count.saturating_sub(1) - captains;

    let combat = result.combat().count();
    sweep.check(seed, combat == options.combat_personnel_count() as usize, || {
        format!("{} combat personnel", combat)
    });
    sweep.check(seed, count(PersonType::CompanyCommander) == 1, || {
        "commander count".into()
    });
    sweep.check(seed, count(PersonType::Captain) == captains, || {
        format!("{} captains, expected {}", count(PersonType::Captain), captains)
    });
    sweep.check(seed, count(PersonType::Lieutenant) == lieutenants, || {
        format!(
            "{} lieutenants, expected {}",
            count(PersonType::Lieutenant),
            lieutenants
        )
    });
    sweep.check(
        seed,
        count(PersonType::Support) == options.support_personnel_count() as usize,
        || "support count".into(),
    );
    sweep.check(
        seed,
        result.trackers.iter().all(|t| t.person_entity.is_some()),
        || "unrecruited tracker".into(),
    );
}

fn check_forces(
    sweep: &mut Sweep,
    seed: u64,
    options: &GenerationOptions,
    campaign: &Campaign,
    result: &GenerationResult,
) {
    let lances = &result.chart.lances;
    sweep.check(seed, lances.len() == options.lance_count() as usize, || {
        format!("{} lances", lances.len())
    });

    let seated: usize = lances
        .iter()
        .filter_map(|&l| campaign.forces.get(l))
        .map(|f| f.slots.len())
        .sum();
    sweep.check(seed, seated == result.combat().count(), || {
        format!("{} seated of {}", seated, result.combat().count())
    });

    for tracker in result.combat() {
        let Some(unit) = tracker.unit_entity else {
            continue;
        };
        let ok = campaign
            .world
            .get::<&Unit>(unit)
            .map(|u| {
                u.commander == tracker.person_entity
                    && u.attached == options.generate_units_as_attached
                    && u.force.is_some()
            })
            .unwrap_or(false);
        sweep.check(seed, ok, || {
            format!("unit of {} not seated", tracker.person.name.full_name())
        });
    }

    if options.star_league_only {
        let ok = result.combat().all(|t| {
            t.parameters.map(|p| p.star_league).unwrap_or(false)
                && t.design.as_ref().map(|d| d.star_league).unwrap_or(true)
        });
        sweep.check(seed, ok, || "non-Star League roll".into());
    }
}

fn check_finances(
    sweep: &mut Sweep,
    seed: u64,
    options: &GenerationOptions,
    campaign: &Campaign,
    result: &GenerationResult,
) {
    let ledger = &result.ledger;
    sweep.check(seed, ledger.final_cash >= options.minimum_starting_float, || {
        format!("final cash {} below float", ledger.final_cash)
    });
    if ledger.loan.is_some() {
        sweep.check(seed, ledger.final_cash == options.minimum_starting_float, || {
            "loan taken while above float".into()
        });
    }
    sweep.check(seed, campaign.finances.balance() == ledger.final_cash, || {
        format!(
            "balance {} != final cash {}",
            campaign.finances.balance(),
            ledger.final_cash
        )
    });
    sweep.check(seed, campaign.reports().len() == 1, || "missing report".into());
}

fn validate_determinism(scenario: &Scenario) -> TestResult {
    let name = format!("{}_deterministic", scenario.name);
    let snapshot = |seed| -> Result<String, String> {
        let (_, result) = run(scenario, seed)?;
        let people: Vec<_> = result.trackers.iter().map(|t| &t.person).collect();
        let people = serde_json::to_string(&people).map_err(|e| e.to_string())?;
        let ledger = serde_json::to_string(&result.ledger).map_err(|e| e.to_string())?;
        Ok(format!("{}{}", people, ledger))
    };
    match (snapshot(0), snapshot(0)) {
        (Ok(a), Ok(b)) => TestResult {
            name,
            passed: a == b,
            detail: format!("seed 0 snapshot {} bytes", a.len()),
        },
        (Err(e), _) | (_, Err(e)) => TestResult {
            name,
            passed: false,
            detail: e,
        },
    }
}
