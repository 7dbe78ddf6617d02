//! Generation stages, in pipeline order.

pub mod crew;
pub mod entities;
pub mod finances;
pub mod icons;
pub mod names;
pub mod org_chart;
pub mod parameters;
pub mod personnel;
pub mod simulation;
pub mod spares;
pub mod tracker;

pub use crew::{FixedOrigin, Origin, OriginSelector, PersonFactory, RandomPersonFactory};
pub use entities::{EntityResolutionPolicy, StandardResolution, WindchildResolution};
pub use finances::FinanceLedger;
pub use org_chart::OrgChart;
pub use parameters::UnitGenerationParameters;
pub use personnel::PersonnelSources;
pub use simulation::{MarriageProcessor, ProcreationProcessor, RandomMarriage, RandomProcreation};
pub use spares::{part_generator_for, PartGenerator, SpareInventory, SpareSources};
pub use tracker::{PersonTracker, PersonType};
