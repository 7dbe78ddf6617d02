//! Entity resolution: turn rolled parameters into concrete unit designs.
//!
//! The resolution policy decides which table a roll is looked up in. The
//! standard policy sends Inner Sphere Star League rolls to the Star League
//! table and keeps Clans on their own table (restricted to Star League
//! designs). The Windchild policy sends every Star League roll to the Star
//! League table and raises the quality of ordinary Clan rolls one step.

use chrono::Datelike;
use mercgen_logic::faction::{codes, faction_by_code, Faction};

use super::parameters::UnitGenerationParameters;
use super::tracker::PersonTracker;
use crate::campaign::Campaign;
use crate::catalog::{UnitQuery, UnitTable};
use crate::components::{UnitDesign, UnitSummary};
use crate::dice::Dice;

pub trait EntityResolutionPolicy {
    /// Table query for a person of `faction` with the given roll.
    fn query_for(
        &self,
        faction: &Faction,
        parameters: &UnitGenerationParameters,
        year: i32,
    ) -> UnitQuery;
}

fn star_league_table(fallback: &Faction) -> Faction {
    faction_by_code(codes::STAR_LEAGUE).unwrap_or(*fallback)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardResolution;

impl EntityResolutionPolicy for StandardResolution {
    fn query_for(
        &self,
        faction: &Faction,
        parameters: &UnitGenerationParameters,
        year: i32,
    ) -> UnitQuery {
        let table = if parameters.star_league && !faction.is_clan() {
            star_league_table(faction)
        } else {
            *faction
        };
        UnitQuery {
            faction: table,
            weight: parameters.weight,
            year,
            quality: parameters.quality,
            star_league: parameters.star_league,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindchildResolution;

impl EntityResolutionPolicy for WindchildResolution {
    fn query_for(
        &self,
        faction: &Faction,
        parameters: &UnitGenerationParameters,
        year: i32,
    ) -> UnitQuery {
        if parameters.star_league {
            return UnitQuery {
                faction: star_league_table(faction),
                weight: parameters.weight,
                year,
                quality: parameters.quality,
                star_league: true,
            };
        }
        let quality = if faction.is_clan() {
            parameters.quality.raised()
        } else {
            parameters.quality
        };
        UnitQuery {
            faction: *faction,
            weight: parameters.weight,
            year,
            quality,
            star_league: false,
        }
    }
}

/// Resolve one roll to a design. `None` for no-unit rolls and for
/// lookup or load failures, which are logged.
pub fn resolve_entity(
    table: &dyn UnitTable,
    policy: &dyn EntityResolutionPolicy,
    faction: &Faction,
    parameters: &UnitGenerationParameters,
    year: i32,
    dice: &mut dyn Dice,
) -> Option<(UnitSummary, UnitDesign)> {
    if !parameters.generates_unit() {
        return None;
    }
    let query = policy.query_for(faction, parameters, year);
    let Some(summary) = table.generate(&query, dice) else {
        log::warn!(
            "no {} unit available for {} in {} (star league: {})",
            query.weight.name(),
            query.faction.name,
            year,
            query.star_league
        );
        return None;
    };
    match table.load_design(&summary) {
        Ok(design) => Some((summary, design)),
        Err(e) => {
            log::error!("failed to load {}: {}", summary.full_name(), e);
            None
        }
    }
}

/// Resolve a design for every combat tracker, by the person's origin faction.
pub fn generate_entities(
    campaign: &Campaign,
    trackers: &mut [PersonTracker],
    table: &dyn UnitTable,
    policy: &dyn EntityResolutionPolicy,
    dice: &mut dyn Dice,
) {
    let year = campaign.date.year();
    for tracker in trackers.iter_mut() {
        let Some(parameters) = tracker.parameters else {
            continue;
        };
        let faction =
            faction_by_code(&tracker.person.origin_faction).unwrap_or(campaign.faction);
        if let Some((summary, design)) =
            resolve_entity(table, policy, &faction, &parameters, year, dice)
        {
            tracker.summary = Some(summary);
            tracker.design = Some(design);
        }
    }
}
