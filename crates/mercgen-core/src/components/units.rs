//! Unit components: designs loaded from the unit table, and the units
//! built from them.

use hecs::Entity;
use mercgen_logic::armor::{ArmorLot, PartQuality};
use mercgen_logic::weight::{QualityRating, WeightClass};
use serde::{Deserialize, Serialize};

use crate::forces::ForceId;

/// Fractional machine-gun ammunition lot size, in rounds.
pub const MACHINE_GUN_HALF_LOT: u32 = 50;

/// Catalog entry returned by a unit table before the full design is loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSummary {
    pub chassis: String,
    pub model: String,
    pub tonnage: f64,
    pub year: i32,
}

impl UnitSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.chassis, self.model)
    }
}

/// Installed equipment that can be stocked as a spare part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    /// Value of one item in C-bills
    pub value: i64,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

/// An ammunition bin installed on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoBin {
    pub ammo_type: String,
    #[serde(default)]
    pub machine_gun: bool,
    /// Rounds in a full one-ton bin
    pub shots_per_ton: u32,
    pub cost_per_ton: i64,
}

impl AmmoBin {
    pub fn capacity(&self) -> u32 {
        self.shots_per_ton
    }
}

/// A fully loaded unit design
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDesign {
    pub chassis: String,
    pub model: String,
    pub tonnage: f64,
    pub weight_class: WeightClass,
    pub clan: bool,
    pub star_league: bool,
    /// Purchase price in C-bills
    pub cost: i64,
    pub components: Vec<Component>,
    pub armor: Vec<ArmorLot>,
    pub ammo: Vec<AmmoBin>,
}

impl UnitDesign {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.chassis, self.model)
    }
}

/// Part quality a newly acquired unit is delivered at, by rolled rating.
pub fn part_quality_for(rating: QualityRating) -> PartQuality {
    match rating {
        QualityRating::F => PartQuality::B,
        QualityRating::D => PartQuality::C,
        QualityRating::C | QualityRating::B => PartQuality::D,
        QualityRating::A => PartQuality::E,
        QualityRating::AStar => PartQuality::F,
    }
}

/// A unit owned by the campaign
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub design: UnitDesign,
    pub quality: PartQuality,
    /// Person in the pilot's seat
    pub commander: Option<Entity>,
    /// Assigned technician
    pub tech: Option<Entity>,
    /// Owned by its pilot rather than the company
    pub attached: bool,
    pub mothballed: bool,
    pub force: Option<ForceId>,
}

impl Unit {
    pub fn new(design: UnitDesign, quality: PartQuality) -> Self {
        Self {
            design,
            quality,
            commander: None,
            tech: None,
            attached: false,
            mothballed: false,
            force: None,
        }
    }

    /// Price the company pays to acquire this unit. Attached units with a
    /// pilot aboard cost half.
    pub fn buy_cost(&self) -> i64 {
        if self.attached && self.commander.is_some() {
            self.design.cost / 2
        } else {
            self.design.cost
        }
    }

    /// Installed armour, at this unit's quality
    pub fn armor_lots(&self) -> impl Iterator<Item = ArmorLot> + '_ {
        self.design.armor.iter().map(|lot| ArmorLot {
            quality: self.quality,
            ..lot.clone()
        })
    }
}
