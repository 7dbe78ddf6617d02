//! The company generator: runs every stage against a campaign.

use chrono::NaiveDate;
use hecs::Entity;
use mercgen_logic::faction::faction_by_code;
use mercgen_logic::options::{validate_options, GenerationMethod, GenerationOptions};
use mercgen_logic::ranks::{RankPolicy, StandardRankPolicy, WindchildRankPolicy};
use mercgen_logic::weight::{RollTables, StandardRollTables, WindchildRollTables};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::campaign::Campaign;
use crate::catalog::{StaticUnitTable, UnitTable};
use crate::dice::Dice;
use crate::error::GenerationError;
use crate::generation::entities::generate_entities;
use crate::generation::finances::generate_finances;
use crate::generation::icons::generate_force_icons;
use crate::generation::org_chart::{assemble_org_chart, assign_techs, partition_into_lances};
use crate::generation::parameters::generate_unit_generation_parameters;
use crate::generation::personnel::{finalize_personnel, generate_personnel};
use crate::generation::spares::generate_spares;
use crate::generation::*;

/// Everything a generation run produced, beyond what it wrote into the
/// campaign.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Combat personnel in lance order, then support and assistants
    pub trackers: Vec<PersonTracker>,
    pub chart: OrgChart,
    pub spares: SpareInventory,
    pub ledger: FinanceLedger,
}

impl GenerationResult {
    pub fn combat(&self) -> impl Iterator<Item = &PersonTracker> + '_ {
        self.trackers.iter().filter(|t| t.person_type.is_combat())
    }

    /// Units crewed by the generated combat personnel.
    pub fn active_units(&self) -> Vec<Entity> {
        self.trackers.iter().filter_map(|t| t.unit_entity).collect()
    }
}

/// A configured generator. Options are validated once, at construction;
/// every collaborator can be swapped before generating.
pub struct CompanyGenerator {
    options: GenerationOptions,
    rank_policy: Box<dyn RankPolicy>,
    roll_tables: Box<dyn RollTables>,
    resolution: Box<dyn EntityResolutionPolicy>,
    person_factory: Box<dyn PersonFactory>,
    origin: Box<dyn OriginSelector>,
    unit_table: Box<dyn UnitTable>,
    part_generator: Box<dyn PartGenerator>,
    marriage: Box<dyn MarriageProcessor>,
    procreation: Box<dyn ProcreationProcessor>,
}

impl std::fmt::Debug for CompanyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanyGenerator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CompanyGenerator {
    /// Generator with the default collaborators for `options.method`.
    pub fn new(options: GenerationOptions) -> Result<Self, GenerationError> {
        let errors = validate_options(&options);
        if !errors.is_empty() {
            return Err(GenerationError::InvalidOptions(errors));
        }

        let (rank_policy, roll_tables, resolution): (
            Box<dyn RankPolicy>,
            Box<dyn RollTables>,
            Box<dyn EntityResolutionPolicy>,
        ) = match options.method {
            GenerationMethod::Standard => (
                Box::new(StandardRankPolicy),
                Box::new(StandardRollTables),
                Box::new(StandardResolution),
            ),
            GenerationMethod::Windchild => (
                Box::new(WindchildRankPolicy),
                Box::new(WindchildRollTables),
                Box::new(WindchildResolution),
            ),
        };

        Ok(Self {
            rank_policy,
            roll_tables,
            resolution,
            person_factory: Box::new(RandomPersonFactory),
            origin: Box::new(FixedOrigin::new(options.starting_planet.clone())),
            unit_table: Box::new(StaticUnitTable::builtin()?),
            part_generator: part_generator_for(options.part_generation_method),
            marriage: Box::new(RandomMarriage::default()),
            procreation: Box::new(RandomProcreation::default()),
            options,
        })
    }

    /// Generator from a JSON options document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        Self::new(GenerationOptions::from_json_str(json)?)
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn with_person_factory(mut self, factory: impl PersonFactory + 'static) -> Self {
        self.person_factory = Box::new(factory);
        self
    }

    pub fn with_origin_selector(mut self, origin: impl OriginSelector + 'static) -> Self {
        self.origin = Box::new(origin);
        self
    }

    pub fn with_unit_table(mut self, table: impl UnitTable + 'static) -> Self {
        self.unit_table = Box::new(table);
        self
    }

    pub fn with_part_generator(mut self, generator: impl PartGenerator + 'static) -> Self {
        self.part_generator = Box::new(generator);
        self
    }

    pub fn with_rank_policy(mut self, policy: impl RankPolicy + 'static) -> Self {
        self.rank_policy = Box::new(policy);
        self
    }

    pub fn with_roll_tables(mut self, tables: impl RollTables + 'static) -> Self {
        self.roll_tables = Box::new(tables);
        self
    }

    pub fn with_resolution(mut self, policy: impl EntityResolutionPolicy + 'static) -> Self {
        self.resolution = Box::new(policy);
        self
    }

    pub fn with_marriage(mut self, processor: impl MarriageProcessor + 'static) -> Self {
        self.marriage = Box::new(processor);
        self
    }

    pub fn with_procreation(mut self, processor: impl ProcreationProcessor + 'static) -> Self {
        self.procreation = Box::new(processor);
        self
    }

    /// Empty campaign for the configured faction and company name.
    pub fn new_campaign(&self, date: NaiveDate) -> Result<Campaign, GenerationError> {
        let faction = faction_by_code(&self.options.faction_code)
            .ok_or_else(|| GenerationError::UnknownFaction(self.options.faction_code.clone()))?;
        Ok(Campaign::new(self.options.company_name.clone(), faction, date))
    }

    /// Run with a `StdRng` seeded from `seed`.
    pub fn generate_seeded(
        &self,
        campaign: &mut Campaign,
        seed: u64,
    ) -> Result<GenerationResult, GenerationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(campaign, &mut rng)
    }

    /// Generate the company into `campaign`. Campaign changes made before a
    /// failure are kept.
    pub fn generate(
        &self,
        campaign: &mut Campaign,
        dice: &mut dyn Dice,
    ) -> Result<GenerationResult, GenerationError> {
        let options = &self.options;
        log::info!(
            "generating {} ({:?} method) for {}",
            options.company_name,
            options.method,
            campaign.faction.name
        );

        // Personnel
        let sources = PersonnelSources {
            person_factory: self.person_factory.as_ref(),
            origin: self.origin.as_ref(),
            rank_policy: self.rank_policy.as_ref(),
        };
        let mut trackers = generate_personnel(campaign, options, sources, dice);
        finalize_personnel(
            campaign,
            options,
            &mut trackers,
            self.marriage.as_ref(),
            self.procreation.as_ref(),
            dice,
        );

        let combat_count = trackers
            .iter()
            .take_while(|t| t.person_type.is_combat())
            .count();
        let support = trackers.split_off(combat_count);
        let mut combat = partition_into_lances(
            trackers,
            options.lance_count() as usize,
            options.lance_size as usize,
        );

        // Units
        generate_unit_generation_parameters(&mut combat, options, self.roll_tables.as_ref(), dice);
        generate_entities(
            campaign,
            &mut combat,
            self.unit_table.as_ref(),
            self.resolution.as_ref(),
            dice,
        );

        // Force tree
        let chart = assemble_org_chart(campaign, options, &mut combat)?;
        if options.assign_techs_to_units {
            assign_techs(campaign, &support, &chart);
        }
        if options.generate_force_icons {
            generate_force_icons(campaign, options, &chart);
        }

        // Spares
        let active: Vec<Entity> = combat.iter().filter_map(|t| t.unit_entity).collect();
        let spare_sources = SpareSources {
            origin: self.origin.as_ref(),
            roll_tables: self.roll_tables.as_ref(),
            unit_table: self.unit_table.as_ref(),
            resolution: self.resolution.as_ref(),
            part_generator: self.part_generator.as_ref(),
        };
        let spares = generate_spares(campaign, options, spare_sources, &active, dice);

        // Finances
        let mut trackers = combat;
        trackers.extend(support);
        let units: Vec<Entity> = active.iter().chain(&spares.mothballed).copied().collect();
        let ledger = generate_finances(campaign, options, &trackers, &units, &spares, dice);

        log::info!(
            "generated {}: {} personnel, {} units",
            options.company_name,
            trackers.len(),
            units.len()
        );
        Ok(GenerationResult {
            trackers,
            chart,
            spares,
            ledger,
        })
    }
}
