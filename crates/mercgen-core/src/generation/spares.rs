//! Spare equipment: mothballed units, spare parts, armour, and ammunition.
//!
//! Dice order: for each mothballed unit the origin rolls, then parameter
//! rolls (repeated while they come up empty), then the unit table pick.
//! Parts, armour, and ammunition are derived without rolling.

use chrono::Datelike;
use hecs::Entity;
use mercgen_logic::armor::{merge_armor, rescale_armor, ArmorLot};
use mercgen_logic::options::{GenerationOptions, PartGenerationMethod};
use mercgen_logic::weight::RollTables;

use super::crew::OriginSelector;
use super::entities::{resolve_entity, EntityResolutionPolicy};
use super::parameters::roll_parameters;
use crate::campaign::{AmmoLot, Campaign, SparePart, StockItem};
use crate::catalog::UnitTable;
use crate::components::{part_quality_for, Unit, MACHINE_GUN_HALF_LOT};
use crate::dice::Dice;

/// Give up on a mothballed unit after this many empty parameter rolls.
const MAX_SPARE_REROLLS: u32 = 100;

/// Derives spare parts from the company's units.
pub trait PartGenerator {
    fn generate(&self, units: &[Unit]) -> Vec<SparePart>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPartGenerator;

impl PartGenerator for DisabledPartGenerator {
    fn generate(&self, _units: &[Unit]) -> Vec<SparePart> {
        Vec::new()
    }
}

/// One spare of every distinct component, at the quality of the first unit
/// carrying it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindchildPartGenerator;

impl PartGenerator for WindchildPartGenerator {
    fn generate(&self, units: &[Unit]) -> Vec<SparePart> {
        let mut parts: Vec<SparePart> = Vec::new();
        for unit in units {
            for component in &unit.design.components {
                if parts.iter().any(|p| p.name == component.name) {
                    continue;
                }
                parts.push(SparePart {
                    name: component.name.clone(),
                    value: component.value,
                    quantity: 1,
                    quality: unit.quality,
                });
            }
        }
        parts
    }
}

/// `copies` spares of every installed component.
#[derive(Debug, Clone, Copy)]
pub struct MultiplePartGenerator {
    pub copies: u32,
}

impl PartGenerator for MultiplePartGenerator {
    fn generate(&self, units: &[Unit]) -> Vec<SparePart> {
        if self.copies == 0 {
            return Vec::new();
        }
        units
            .iter()
            .flat_map(|unit| {
                unit.design.components.iter().map(move |component| SparePart {
                    name: component.name.clone(),
                    value: component.value,
                    quantity: component.quantity * self.copies,
                    quality: unit.quality,
                })
            })
            .collect()
    }
}

pub fn part_generator_for(method: PartGenerationMethod) -> Box<dyn PartGenerator> {
    match method {
        PartGenerationMethod::Disabled => Box::new(DisabledPartGenerator),
        PartGenerationMethod::Windchild => Box::new(WindchildPartGenerator),
        PartGenerationMethod::Multiple(copies) => Box::new(MultiplePartGenerator { copies }),
    }
}

/// Collaborators used to roll and resolve mothballed units.
#[derive(Clone, Copy)]
pub struct SpareSources<'a> {
    pub origin: &'a dyn OriginSelector,
    pub roll_tables: &'a dyn RollTables,
    pub unit_table: &'a dyn UnitTable,
    pub resolution: &'a dyn EntityResolutionPolicy,
    pub part_generator: &'a dyn PartGenerator,
}

/// Everything put into storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpareInventory {
    pub mothballed: Vec<Entity>,
    pub parts: Vec<SparePart>,
    pub armor: Vec<ArmorLot>,
    pub ammunition: Vec<AmmoLot>,
}

impl SpareInventory {
    pub fn parts_value(&self) -> i64 {
        self.parts.iter().map(SparePart::total_value).sum()
    }

    pub fn armor_value(&self) -> i64 {
        self.armor.iter().map(ArmorLot::value).sum()
    }

    pub fn ammunition_value(&self) -> i64 {
        self.ammunition.iter().map(AmmoLot::value).sum()
    }
}

/// Number of mothballed spares for `active` units.
pub fn mothballed_unit_count(active: usize, percent: u32) -> usize {
    (active as f64 * percent as f64 / 100.0).round() as usize
}

/// Roll and add mothballed spare units.
pub fn generate_mothballed_units(
    campaign: &mut Campaign,
    options: &GenerationOptions,
    sources: SpareSources<'_>,
    active: usize,
    dice: &mut dyn Dice,
) -> Vec<Entity> {
    let count = mothballed_unit_count(active, options.spare_units_percent);
    let year = campaign.date.year();
    let mut mothballed = Vec::with_capacity(count);

    for _ in 0..count {
        let origin = sources.origin.select_origin(&campaign.faction, dice);

        let mut parameters =
            roll_parameters(0, options.star_league_only, sources.roll_tables, dice);
        let mut rerolls = 0;
        while !parameters.generates_unit() && rerolls < MAX_SPARE_REROLLS {
            parameters = roll_parameters(0, options.star_league_only, sources.roll_tables, dice);
            rerolls += 1;
        }
        if !parameters.generates_unit() {
            log::warn!("no spare unit after {} rerolls; skipping", rerolls);
            continue;
        }

        let Some((summary, design)) = resolve_entity(
            sources.unit_table,
            sources.resolution,
            &origin.faction,
            &parameters,
            year,
            dice,
        ) else {
            continue;
        };

        let entity = campaign.add_new_unit(design, part_quality_for(parameters.quality));
        if let Ok(mut unit) = campaign.world.get::<&mut Unit>(entity) {
            unit.mothballed = true;
        }
        log::debug!("mothballed spare {}", summary.full_name());
        mothballed.push(entity);
    }
    mothballed
}

/// Installed armour merged by type and quality, rescaled to
/// `target_tonnage`. Nothing when the target is not positive.
pub fn generate_armor(units: &[Unit], target_tonnage: f64) -> Vec<ArmorLot> {
    if target_tonnage <= 0.0 {
        return Vec::new();
    }
    let installed: Vec<ArmorLot> = units.iter().flat_map(Unit::armor_lots).collect();
    let mut merged = merge_armor(&installed);
    rescale_armor(&mut merged, target_tonnage);
    merged.retain(|lot| lot.amount > 0);
    merged
}

/// Spare ammunition for every installed bin.
pub fn generate_ammunition(units: &[Unit], options: &GenerationOptions) -> Vec<AmmoLot> {
    let mut lots = Vec::new();
    for bin in units.iter().flat_map(|u| &u.design.ammo) {
        let shots = if options.generate_fractional_machine_gun_ammunition && bin.machine_gun {
            MACHINE_GUN_HALF_LOT
        } else if options.generate_spare_ammunition {
            bin.capacity() * options.number_reloads_per_weapon
        } else {
            0
        };
        if shots == 0 {
            continue;
        }
        lots.push(AmmoLot {
            ammo_type: bin.ammo_type.clone(),
            shots,
            shots_per_ton: bin.shots_per_ton,
            cost_per_ton: bin.cost_per_ton,
        });
    }
    lots
}

/// Mothball spare units, then derive parts, armour, and ammunition from
/// every unit and store them in the warehouse.
pub fn generate_spares(
    campaign: &mut Campaign,
    options: &GenerationOptions,
    sources: SpareSources<'_>,
    active: &[Entity],
    dice: &mut dyn Dice,
) -> SpareInventory {
    let mothballed = if options.generate_mothballed_spare_units {
        generate_mothballed_units(campaign, options, sources, active.len(), dice)
    } else {
        Vec::new()
    };

    let units: Vec<Unit> = active
        .iter()
        .chain(&mothballed)
        .filter_map(|&e| campaign.world.get::<&Unit>(e).ok().map(|u| (*u).clone()))
        .collect();

    let inventory = SpareInventory {
        parts: sources.part_generator.generate(&units),
        armor: generate_armor(&units, options.starting_armour_weight),
        ammunition: generate_ammunition(&units, options),
        mothballed,
    };

    for part in &inventory.parts {
        campaign.warehouse.add_part(StockItem::Part(part.clone()));
    }
    for lot in &inventory.armor {
        campaign.warehouse.add_part(StockItem::Armor(lot.clone()));
    }
    for lot in &inventory.ammunition {
        campaign.warehouse.add_part(StockItem::Ammo(lot.clone()));
    }

    log::info!(
        "stored {} mothballed units, {} parts, {} armour lots, {} ammo lots",
        inventory.mothballed.len(),
        inventory.parts.len(),
        inventory.armor.len(),
        inventory.ammunition.len()
    );
    inventory
}
