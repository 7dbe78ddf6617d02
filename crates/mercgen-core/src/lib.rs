//! MercGen Core - Mercenary Company Generator
//!
//! Generates a complete starting company for a campaign: a personnel roster
//! in a command hierarchy, a unit for every combat position rolled by
//! seniority, spare equipment, and a reconciled starting budget.
//!
//! # Architecture
//!
//! The campaign keeps people and units in an ECS world via `hecs`:
//! - **Entities**: people, their children, units
//! - **Components**: pure data (`Person`, `Family`, `Dependent`, `Unit`)
//! - **Stages**: functions in [`generation`] that read options and write into
//!   the campaign, one after another
//!
//! | Stage | Module |
//! |-------|--------|
//! | Roster, officers, ranks, recruitment | [`generation::personnel`] |
//! | Weight and quality rolls | [`generation::parameters`] |
//! | Rolls to unit designs | [`generation::entities`] |
//! | Force tree, techs | [`generation::org_chart`] |
//! | Force icons | [`generation::icons`] |
//! | Mothballed units, parts, armour, ammo | [`generation::spares`] |
//! | Starting cash and loan | [`generation::finances`] |
//!
//! # Example
//!
//! ```rust,no_run
//! use mercgen_core::prelude::*;
//!
//! let generator = CompanyGenerator::new(GenerationOptions::default())?;
//! let date = chrono::NaiveDate::from_ymd_opt(3025, 1, 1).unwrap();
//! let mut campaign = generator.new_campaign(date)?;
//! let result = generator.generate_seeded(&mut campaign, 42)?;
//! println!("{} people, {} C-bills", result.trackers.len(), result.ledger.final_cash);
//! # Ok::<(), GenerationError>(())
//! ```

pub mod campaign;
pub mod catalog;
pub mod components;
pub mod dice;
pub mod error;
pub mod forces;
pub mod generation;
pub mod generator;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::campaign::Campaign;
    pub use crate::components::*;
    pub use crate::dice::{Dice, ScriptedDice};
    pub use crate::error::GenerationError;
    pub use crate::generator::{CompanyGenerator, GenerationResult};
    pub use mercgen_logic::options::{GenerationMethod, GenerationOptions};
}
