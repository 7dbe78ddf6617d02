//! Unit tables: pick a design for a rolled weight class and load it.
//!
//! [`StaticUnitTable`] serves the catalog bundled in `data/unit_catalog.json`.
//! Entries carry faction tags: a faction code, `"IS"` (any non-Clan
//! faction except the Star League table), `"CLAN"`, or `"*"` (everyone).

use mercgen_logic::armor::{ArmorLot, ArmorType};
use mercgen_logic::faction::{codes, Faction};
use mercgen_logic::weight::{QualityRating, WeightClass};
use serde::Deserialize;

use crate::components::{AmmoBin, Component, UnitDesign, UnitSummary};
use crate::dice::Dice;
use crate::error::GenerationError;

const BUILTIN_CATALOG: &str = include_str!("../data/unit_catalog.json");

/// What a unit table is asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitQuery {
    pub faction: Faction,
    pub weight: WeightClass,
    pub year: i32,
    pub quality: QualityRating,
    /// Only Star League designs qualify
    pub star_league: bool,
}

pub trait UnitTable {
    /// Pick a design matching the query, or `None` if the table has nothing.
    fn generate(&self, query: &UnitQuery, dice: &mut dyn Dice) -> Option<UnitSummary>;

    /// Load the full design for a summary returned by `generate`.
    fn load_design(&self, summary: &UnitSummary) -> Result<UnitDesign, GenerationError>;
}

/// Weight class of a 'Mech by tonnage.
pub fn weight_class_for_tonnage(tonnage: f64) -> WeightClass {
    match tonnage.round() as i64 {
        i64::MIN..=15 => WeightClass::UltraLight,
        16..=35 => WeightClass::Light,
        36..=55 => WeightClass::Medium,
        56..=75 => WeightClass::Heavy,
        _ => WeightClass::Assault,
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ArmorEntry {
    armor_type: ArmorType,
    points: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    chassis: String,
    model: String,
    tonnage: f64,
    year: i32,
    factions: Vec<String>,
    #[serde(default)]
    star_league: bool,
    #[serde(default)]
    clan: bool,
    cost: i64,
    armor: ArmorEntry,
    #[serde(default)]
    components: Vec<Component>,
    #[serde(default)]
    ammo: Vec<AmmoBin>,
}

impl CatalogEntry {
    fn available_to(&self, faction: &Faction) -> bool {
        self.factions.iter().any(|tag| match tag.as_str() {
            "*" => true,
            "IS" => !faction.is_clan() && faction.code != codes::STAR_LEAGUE,
            "CLAN" => faction.is_clan(),
            code => code == faction.code,
        })
    }

    fn matches(&self, query: &UnitQuery) -> bool {
        self.available_to(&query.faction)
            && weight_class_for_tonnage(self.tonnage) == query.weight
            && self.year <= query.year
            && (!query.star_league || self.star_league)
    }

    fn summary(&self) -> UnitSummary {
        UnitSummary {
            chassis: self.chassis.clone(),
            model: self.model.clone(),
            tonnage: self.tonnage,
            year: self.year,
        }
    }

    fn design(&self) -> UnitDesign {
        UnitDesign {
            chassis: self.chassis.clone(),
            model: self.model.clone(),
            tonnage: self.tonnage,
            weight_class: weight_class_for_tonnage(self.tonnage),
            clan: self.clan,
            star_league: self.star_league,
            cost: self.cost,
            components: self.components.clone(),
            armor: vec![ArmorLot::new(self.armor.armor_type, self.clan, self.armor.points)],
            ammo: self.ammo.clone(),
        }
    }
}

/// Unit table backed by a fixed list of designs.
#[derive(Debug, Clone)]
pub struct StaticUnitTable {
    entries: Vec<CatalogEntry>,
}

impl StaticUnitTable {
    /// The bundled catalog.
    pub fn builtin() -> Result<Self, GenerationError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_json_str(json: &str) -> Result<Self, GenerationError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        for entry in &entries {
            if entry.tonnage <= 0.0 {
                return Err(GenerationError::InvalidDesign(
                    format!("{} {}", entry.chassis, entry.model),
                    "tonnage must be positive",
                ));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl UnitTable for StaticUnitTable {
    fn generate(&self, query: &UnitQuery, dice: &mut dyn Dice) -> Option<UnitSummary> {
        let candidates: Vec<&CatalogEntry> =
            self.entries.iter().filter(|e| e.matches(query)).collect();
        if candidates.is_empty() {
            return None;
        }
        let pick = dice.random_int(candidates.len() as u32) as usize;
        candidates.get(pick).map(|e| e.summary())
    }

    fn load_design(&self, summary: &UnitSummary) -> Result<UnitDesign, GenerationError> {
        self.entries
            .iter()
            .find(|e| e.chassis == summary.chassis && e.model == summary.model)
            .map(CatalogEntry::design)
            .ok_or_else(|| GenerationError::UnknownDesign {
                chassis: summary.chassis.clone(),
                model: summary.model.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercgen_logic::faction::faction_by_code;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn query(code: &str, weight: WeightClass, star_league: bool) -> UnitQuery {
        UnitQuery {
            faction: faction_by_code(code).unwrap(),
            weight,
            year: 3050,
            quality: QualityRating::C,
            star_league,
        }
    }

    #[test]
    fn builtin_catalog_loads() {
        let table = StaticUnitTable::builtin().unwrap();
        assert!(!table.is_empty());
    }

    #[test]
    fn every_table_covers_every_concrete_weight() {
        let table = StaticUnitTable::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for (code, star_league) in [("MERC", false), ("SL", true), ("CW", false), ("CW", true)] {
            for weight in WeightClass::CONCRETE {
                let found = table.generate(&query(code, weight, star_league), &mut rng);
                assert!(found.is_some(), "{code} {star_league} {weight:?} has no design");
            }
        }
    }

    #[test]
    fn generated_design_matches_query() {
        let table = StaticUnitTable::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let summary = table
                .generate(&query("MERC", WeightClass::Heavy, false), &mut rng)
                .unwrap();
            let design = table.load_design(&summary).unwrap();
            assert_eq!(design.weight_class, WeightClass::Heavy);
            assert!(!design.clan);
        }
    }

    #[test]
    fn star_league_query_only_returns_star_league_designs() {
        let table = StaticUnitTable::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for weight in WeightClass::CONCRETE {
            let summary = table.generate(&query("CJF", weight, true), &mut rng).unwrap();
            assert!(table.load_design(&summary).unwrap().star_league);
        }
    }

    #[test]
    fn intro_year_filters_designs() {
        let table = StaticUnitTable::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut early = query("CW", WeightClass::Light, false);
        early.year = 2500;
        assert!(table.generate(&early, &mut rng).is_none());
    }

    #[test]
    fn unknown_design_is_an_error() {
        let table = StaticUnitTable::builtin().unwrap();
        let missing = UnitSummary {
            chassis: "Nope".to_string(),
            model: "X".to_string(),
            tonnage: 50.0,
            year: 3000,
        };
        assert!(matches!(
            table.load_design(&missing),
            Err(GenerationError::UnknownDesign { .. })
        ));
    }

    #[test]
    fn tonnage_classes() {
        assert_eq!(weight_class_for_tonnage(20.0), WeightClass::Light);
        assert_eq!(weight_class_for_tonnage(55.0), WeightClass::Medium);
        assert_eq!(weight_class_for_tonnage(75.0), WeightClass::Heavy);
        assert_eq!(weight_class_for_tonnage(100.0), WeightClass::Assault);
    }
}
