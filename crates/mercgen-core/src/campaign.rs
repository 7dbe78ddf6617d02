//! In-memory campaign the generator writes into.
//!
//! The campaign owns an ECS world holding people and units, the force tree,
//! the ledger, and the warehouse. The generator only uses the mutators
//! defined here.

use chrono::NaiveDate;
use hecs::{Entity, World};
use mercgen_logic::armor::{merge_armor, ArmorLot, PartQuality};
use mercgen_logic::faction::Faction;
use mercgen_logic::finance::{loan_payment, loan_payment_count, FinancialTerm};
use mercgen_logic::roles::{PersonnelRole, ASTECHS_PER_TECH, MEDICS_PER_DOCTOR};
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::error::GenerationError;
use crate::forces::{Force, ForceId, ForceSlot, ForceTree};

// ============================================================================
// FINANCES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: i64,
    pub description: String,
}

/// A fixed-term loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub principal: i64,
    /// Annual interest rate, percent
    pub rate: u32,
    pub years: u32,
    pub term: FinancialTerm,
    /// Collateral, percent of principal
    pub collateral: u32,
    pub start_date: NaiveDate,
}

impl Loan {
    pub fn payment_count(&self) -> u32 {
        loan_payment_count(self.years, self.term)
    }

    pub fn payment_amount(&self) -> i64 {
        loan_payment(self.principal, self.rate, self.years, self.term)
    }

    pub fn collateral_value(&self) -> i64 {
        self.principal * self.collateral as i64 / 100
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Finances {
    transactions: Vec<Transaction>,
    loans: Vec<Loan>,
}

impl Finances {
    pub fn credit(&mut self, amount: i64, date: NaiveDate, description: impl Into<String>) {
        self.transactions.push(Transaction {
            date,
            amount,
            description: description.into(),
        });
    }

    pub fn add_loan(&mut self, loan: Loan) {
        self.loans.push(loan);
    }

    pub fn balance(&self) -> i64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }
}

// ============================================================================
// WAREHOUSE
// ============================================================================

/// Spare equipment in storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparePart {
    pub name: String,
    /// Value of one item
    pub value: i64,
    pub quantity: u32,
    pub quality: PartQuality,
}

impl SparePart {
    pub fn total_value(&self) -> i64 {
        self.value * self.quantity as i64
    }
}

/// Loose ammunition in storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoLot {
    pub ammo_type: String,
    pub shots: u32,
    pub shots_per_ton: u32,
    pub cost_per_ton: i64,
}

impl AmmoLot {
    pub fn tonnage(&self) -> f64 {
        if self.shots_per_ton == 0 {
            return 0.0;
        }
        self.shots as f64 / self.shots_per_ton as f64
    }

    pub fn value(&self) -> i64 {
        (self.tonnage() * self.cost_per_ton as f64).round() as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StockItem {
    Part(SparePart),
    Armor(ArmorLot),
    Ammo(AmmoLot),
}

/// Stored parts, merged with matching stock as they arrive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Warehouse {
    parts: Vec<SparePart>,
    armor: Vec<ArmorLot>,
    ammo: Vec<AmmoLot>,
}

impl Warehouse {
    pub fn add_part(&mut self, item: StockItem) {
        match item {
            StockItem::Part(part) => {
                match self
                    .parts
                    .iter_mut()
                    .find(|p| p.name == part.name && p.quality == part.quality && p.value == part.value)
                {
                    Some(existing) => existing.quantity += part.quantity,
                    None => self.parts.push(part),
                }
            }
            StockItem::Armor(lot) => {
                self.armor.push(lot);
                self.armor = merge_armor(&self.armor);
            }
            StockItem::Ammo(lot) => match self.ammo.iter_mut().find(|a| a.ammo_type == lot.ammo_type) {
                Some(existing) => existing.shots += lot.shots,
                None => self.ammo.push(lot),
            },
        }
    }

    pub fn parts(&self) -> &[SparePart] {
        &self.parts
    }

    pub fn armor(&self) -> &[ArmorLot] {
        &self.armor
    }

    pub fn ammo(&self) -> &[AmmoLot] {
        &self.ammo
    }
}

// ============================================================================
// CAMPAIGN
// ============================================================================

pub struct Campaign {
    pub name: String,
    pub faction: Faction,
    pub date: NaiveDate,
    /// People and units
    pub world: World,
    pub forces: ForceTree,
    pub finances: Finances,
    pub warehouse: Warehouse,
    pub astech_pool: u32,
    pub medic_pool: u32,
    reports: Vec<String>,
}

impl Campaign {
    pub fn new(name: impl Into<String>, faction: Faction, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            faction,
            date,
            world: World::new(),
            forces: ForceTree::new(),
            finances: Finances::default(),
            warehouse: Warehouse::default(),
            astech_pool: 0,
            medic_pool: 0,
            reports: Vec::new(),
        }
    }

    /// Add a person to the roster.
    pub fn recruit_person(&mut self, person: Person) -> Entity {
        self.world.spawn((person, Family::default()))
    }

    /// Add a unit to the campaign, not yet in any force.
    pub fn add_new_unit(&mut self, design: UnitDesign, quality: PartQuality) -> Entity {
        self.world.spawn((Unit::new(design, quality),))
    }

    pub fn add_force(&mut self, force: Force, parent: ForceId) -> Result<ForceId, GenerationError> {
        let name = force.name.clone();
        self.forces
            .add(force, parent)
            .ok_or(GenerationError::MissingForce { name, parent })
    }

    /// Place a person, and the unit they crew, into a force.
    pub fn add_unit_to_force(
        &mut self,
        force: ForceId,
        person: Entity,
        unit: Option<Entity>,
    ) -> Result<(), GenerationError> {
        if let Some(unit) = unit {
            let mut record = self
                .world
                .get::<&mut Unit>(unit)
                .map_err(|_| GenerationError::MissingEntity(unit))?;
            record.force = Some(force);
        }
        let target = self
            .forces
            .get_mut(force)
            .ok_or(GenerationError::UnknownForce(force))?;
        target.slots.push(ForceSlot { person, unit });
        Ok(())
    }

    pub fn add_report(&mut self, report: impl Into<String>) {
        self.reports.push(report.into());
    }

    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    /// Recruited people with the given role.
    pub fn count_role(&self, role: PersonnelRole) -> u32 {
        self.world
            .query::<&Person>()
            .iter()
            .filter(|(_, p)| p.role == role)
            .count() as u32
    }

    /// Astechs still needed, counting `extra_techs` not yet recruited.
    pub fn astechs_needed(&self, extra_techs: u32) -> u32 {
        let techs = self.count_role(PersonnelRole::MechTech) + extra_techs;
        let have = self.count_role(PersonnelRole::Astech) + self.astech_pool;
        (techs * ASTECHS_PER_TECH).saturating_sub(have)
    }

    /// Medics still needed, counting `extra_doctors` not yet recruited.
    pub fn medics_needed(&self, extra_doctors: u32) -> u32 {
        let doctors = self.count_role(PersonnelRole::Doctor) + extra_doctors;
        let have = self.count_role(PersonnelRole::Medic) + self.medic_pool;
        (doctors * MEDICS_PER_DOCTOR).saturating_sub(have)
    }

    /// Top up both assistant pools to the current need.
    pub fn fill_assistant_pools(&mut self) {
        self.astech_pool += self.astechs_needed(0);
        self.medic_pool += self.medics_needed(0);
    }

    /// Every person in the world, in spawn order.
    pub fn personnel(&self) -> Vec<Entity> {
        let mut people: Vec<Entity> = self
            .world
            .query::<&Person>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        people.sort_by_key(|e| e.id());
        people
    }
}
