//! Generation options: every switch and parameter the company generator
//! reads. Options are immutable for the duration of a run.
//!
//! Options load from JSON with `#[serde(default)]`, so a document only needs
//! to list the fields it changes:
//!
//! ```
//! use mercgen_logic::options::GenerationOptions;
//!
//! let options = GenerationOptions::from_json_str(r#"{ "company_count": 2 }"#).unwrap();
//! assert_eq!(options.company_count, 2);
//! assert_eq!(options.lance_size, 4);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::faction::{faction_by_code, codes};
use crate::naming::ForceNamingMethod;
use crate::roles::PersonnelRole;

/// Which rule variant drives ranks, roll tables, and entity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenerationMethod {
    #[default]
    Standard,
    Windchild,
}

/// How spare parts are derived from the generated units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PartGenerationMethod {
    Disabled,
    /// One spare of every distinct component in the force.
    #[default]
    Windchild,
    /// `n` spares of every installed component.
    Multiple(u32),
}

/// Advance payment terms of a contract accepted at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub name: String,
    pub advance_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub method: GenerationMethod,
    pub company_name: String,
    pub faction_code: String,
    pub starting_planet: Option<String>,

    // Base sizing
    pub generate_mercenary_company_command_lance: bool,
    pub company_count: u32,
    pub individual_lance_count: u32,
    pub lances_per_company: u32,
    pub lance_size: u32,

    // Personnel
    pub support_personnel: BTreeMap<PersonnelRole, u32>,
    pub pool_assistants: bool,
    pub generate_captains: bool,
    pub assign_best_company_commander: bool,
    pub prioritize_company_commander_combat_skills: bool,
    pub assign_best_officers: bool,
    pub prioritize_officer_combat_skills: bool,
    pub assign_most_skilled_to_primary_lances: bool,
    pub automatically_assign_ranks: bool,
    pub assign_founder_flag: bool,
    pub assign_random_callsigns: bool,
    pub run_starting_simulation: bool,
    pub simulation_duration_years: u32,
    pub simulate_random_marriages: bool,
    pub simulate_random_procreation: bool,

    // Units
    pub generate_units_as_attached: bool,
    pub assign_best_roll_to_company_commander: bool,
    pub sort_star_league_units_first: bool,
    pub group_by_weight: bool,
    pub group_by_quality: bool,
    pub keep_officer_rolls_separate: bool,
    pub assign_techs_to_units: bool,
    pub star_league_only: bool,

    // Force icons and naming
    pub force_naming_method: ForceNamingMethod,
    pub generate_force_icons: bool,
    pub use_faction_background_icon: bool,
    pub use_origin_node_faction_logo: bool,

    // Spares
    pub generate_mothballed_spare_units: bool,
    pub spare_units_percent: u32,
    pub part_generation_method: PartGenerationMethod,
    pub starting_armour_weight: f64,
    pub generate_spare_ammunition: bool,
    pub number_reloads_per_weapon: u32,
    pub generate_fractional_machine_gun_ammunition: bool,

    // Finances
    pub start_with_random_cash: bool,
    pub random_cash_dice_count: u32,
    pub starting_cash: i64,
    pub minimum_starting_float: i64,
    pub include_initial_contract_payment: bool,
    pub initial_contract: Option<ContractTerms>,
    pub allow_starting_loan: bool,
    pub pay_for_setup: bool,
    pub pay_for_personnel: bool,
    pub pay_for_units: bool,
    pub pay_for_parts: bool,
    pub pay_for_armour: bool,
    pub pay_for_ammunition: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        let support_personnel = BTreeMap::from([
            (PersonnelRole::MechTech, 5),
            (PersonnelRole::Doctor, 1),
            (PersonnelRole::AdminCommand, 1),
            (PersonnelRole::AdminLogistics, 1),
            (PersonnelRole::AdminTransport, 1),
            (PersonnelRole::AdminHR, 1),
        ]);

        Self {
            method: GenerationMethod::Standard,
            company_name: "Mercenary Company".to_string(),
            faction_code: codes::MERCENARY.to_string(),
            starting_planet: Some("Galatea".to_string()),

            generate_mercenary_company_command_lance: false,
            company_count: 1,
            individual_lance_count: 0,
            lances_per_company: 3,
            lance_size: 4,

            support_personnel,
            pool_assistants: true,
            generate_captains: true,
            assign_best_company_commander: true,
            prioritize_company_commander_combat_skills: false,
            assign_best_officers: true,
            prioritize_officer_combat_skills: false,
            assign_most_skilled_to_primary_lances: true,
            automatically_assign_ranks: true,
            assign_founder_flag: true,
            assign_random_callsigns: false,
            run_starting_simulation: false,
            simulation_duration_years: 5,
            simulate_random_marriages: false,
            simulate_random_procreation: false,

            generate_units_as_attached: true,
            assign_best_roll_to_company_commander: true,
            sort_star_league_units_first: true,
            group_by_weight: true,
            group_by_quality: true,
            keep_officer_rolls_separate: false,
            assign_techs_to_units: true,
            star_league_only: false,

            force_naming_method: ForceNamingMethod::Ccb1943,
            generate_force_icons: true,
            use_faction_background_icon: false,
            use_origin_node_faction_logo: true,

            generate_mothballed_spare_units: false,
            spare_units_percent: 10,
            part_generation_method: PartGenerationMethod::Windchild,
            starting_armour_weight: 60.0,
            generate_spare_ammunition: true,
            number_reloads_per_weapon: 2,
            generate_fractional_machine_gun_ammunition: true,

            start_with_random_cash: false,
            random_cash_dice_count: 8,
            starting_cash: 0,
            minimum_starting_float: 3_500_000,
            include_initial_contract_payment: false,
            initial_contract: None,
            allow_starting_loan: true,
            pay_for_setup: true,
            pay_for_personnel: true,
            pay_for_units: true,
            pay_for_parts: true,
            pay_for_armour: true,
            pay_for_ammunition: true,
        }
    }
}

impl GenerationOptions {
    /// Options for the given method with every other field at its default.
    pub fn for_method(method: GenerationMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Total lances, including the standalone command lance if requested.
    pub fn lance_count(&self) -> u32 {
        self.company_count * self.lances_per_company
            + self.individual_lance_count
            + u32::from(self.generate_mercenary_company_command_lance)
    }

    /// Combat personnel to generate (one per lance slot).
    pub fn combat_personnel_count(&self) -> u32 {
        self.lance_count() * self.lance_size
    }

    /// Captains among the lance officers: company lance leaders are captains
    /// (the commander leads one of them unless a separate command lance
    /// exists), standalone lance leaders are lieutenants.
    pub fn captain_count(&self) -> u32 {
        if !self.generate_captains {
            return 0;
        }
        let company_lances = self.company_count * self.lances_per_company;
        if self.generate_mercenary_company_command_lance {
            company_lances
        } else {
            company_lances.saturating_sub(1)
        }
    }

    /// Support personnel requested across all roles.
    pub fn support_personnel_count(&self) -> u32 {
        self.support_personnel.values().sum()
    }
}

/// Options validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Faction code not in the registry.
    UnknownFaction(String),
    /// A percentage outside 0–100.
    PercentOutOfRange { field: &'static str, value: u32 },
    /// A support-personnel entry for a combat or assistant role.
    InvalidSupportRole(String),
    /// Monetary amount below zero.
    NegativeAmount { field: &'static str, value: i64 },
    /// Armour tonnage is NaN or infinite.
    InvalidArmourWeight,
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::UnknownFaction(code) => write!(f, "unknown faction code '{}'", code),
            OptionsError::PercentOutOfRange { field, value } => {
                write!(f, "{} must be 0-100, got {}", field, value)
            }
            OptionsError::InvalidSupportRole(role) => {
                write!(f, "{} cannot be requested as support personnel", role)
            }
            OptionsError::NegativeAmount { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            OptionsError::InvalidArmourWeight => write!(f, "starting armour weight is not finite"),
        }
    }
}

/// Validate options, returning every problem found.
///
/// Only structural invariants are checked; self-consistency of the sizing
/// fields is the caller's responsibility.
pub fn validate_options(options: &GenerationOptions) -> Vec<OptionsError> {
    let mut errors = Vec::new();

    if faction_by_code(&options.faction_code).is_none() {
        errors.push(OptionsError::UnknownFaction(options.faction_code.clone()));
    }
    if options.spare_units_percent > 100 {
        errors.push(OptionsError::PercentOutOfRange {
            field: "spare_units_percent",
            value: options.spare_units_percent,
        });
    }
    for role in options.support_personnel.keys() {
        if role.is_combat() || role.is_assistant() {
            errors.push(OptionsError::InvalidSupportRole(role.name().to_string()));
        }
    }
    for (field, value) in [
        ("starting_cash", options.starting_cash),
        ("minimum_starting_float", options.minimum_starting_float),
    ] {
        if value < 0 {
            errors.push(OptionsError::NegativeAmount { field, value });
        }
    }
    if !options.starting_armour_weight.is_finite() {
        errors.push(OptionsError::InvalidArmourWeight);
    }

    errors
}
