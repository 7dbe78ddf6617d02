//! Per-person generation state carried between stages.

use hecs::Entity;

use super::parameters::UnitGenerationParameters;
use crate::components::{Person, UnitDesign, UnitSummary};

/// A person's place in the company structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonType {
    CompanyCommander,
    Captain,
    Lieutenant,
    RankAndFile,
    Support,
    Assistant,
}

impl PersonType {
    pub fn is_officer(&self) -> bool {
        matches!(
            self,
            PersonType::CompanyCommander | PersonType::Captain | PersonType::Lieutenant
        )
    }

    pub fn is_combat(&self) -> bool {
        self.is_officer() || *self == PersonType::RankAndFile
    }
}

/// One generated person moving through the pipeline.
#[derive(Debug, Clone)]
pub struct PersonTracker {
    pub person_type: PersonType,
    pub person: Person,
    /// Set once the person is recruited
    pub person_entity: Option<Entity>,
    pub parameters: Option<UnitGenerationParameters>,
    pub summary: Option<UnitSummary>,
    pub design: Option<UnitDesign>,
    /// Set once the unit is added to the campaign
    pub unit_entity: Option<Entity>,
}

impl PersonTracker {
    pub fn new(person_type: PersonType, person: Person) -> Self {
        Self {
            person_type,
            person,
            person_entity: None,
            parameters: None,
            summary: None,
            design: None,
            unit_entity: None,
        }
    }
}
