//! Unit generation parameters: the weight and quality each combat person's
//! unit is rolled at.
//!
//! Rolls happen per tracker in lance order. For each tracker the dice are
//! called as: weight 2d6 (skipped when Star League is forced), a second
//! weight 2d6 if the first result was Star League, then quality 2d6.

use std::cmp::Ordering;

use mercgen_logic::options::GenerationOptions;
use mercgen_logic::weight::{QualityRating, RollTables, WeightClass};
use serde::{Deserialize, Serialize};

use super::tracker::{PersonTracker, PersonType};
use crate::dice::Dice;

/// Modifier used for a person type that should never receive a unit roll.
pub const INVALID_TYPE_MODIFIER: i32 = -20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitGenerationParameters {
    pub weight: WeightClass,
    pub quality: QualityRating,
    pub star_league: bool,
}

impl UnitGenerationParameters {
    pub fn generates_unit(&self) -> bool {
        !self.weight.is_no_unit()
    }

    /// Strict "better roll" order: Star League beats everything else, then
    /// heavier weight, then better quality.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        (self.star_league, self.weight, self.quality).cmp(&(
            other.star_league,
            other.weight,
            other.quality,
        ))
    }
}

/// Roll modifier by seniority.
pub fn seniority_modifier(person_type: PersonType) -> i32 {
    match person_type {
        PersonType::CompanyCommander => 2,
        PersonType::Captain | PersonType::Lieutenant => 1,
        PersonType::RankAndFile => 0,
        other => {
            log::error!(
                "unit generation requested for non-combat person type {:?}",
                other
            );
            INVALID_TYPE_MODIFIER
        }
    }
}

/// Roll weight and quality with a modifier.
pub fn roll_parameters(
    modifier: i32,
    star_league_only: bool,
    tables: &dyn RollTables,
    dice: &mut dyn Dice,
) -> UnitGenerationParameters {
    let initial = if star_league_only {
        WeightClass::StarLeague
    } else {
        tables.weight_class(dice.d6(2) + modifier, true)
    };

    let (weight, star_league) = if initial.is_star_league() {
        (tables.weight_class(dice.d6(2) + modifier, false), true)
    } else {
        (initial, false)
    };

    let quality = tables.quality(dice.d6(2) + modifier);

    UnitGenerationParameters {
        weight,
        quality,
        star_league,
    }
}

/// Index of the best roll; the earliest wins ties.
pub fn best_roll_index(parameters: &[UnitGenerationParameters]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, candidate) in parameters.iter().enumerate() {
        match best {
            Some(b) if candidate.rank_cmp(&parameters[b]) != Ordering::Greater => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Comparator built from the enabled sort flags, in fixed precedence, then
/// reversed so the best rolls come first. `None` when no flag is set.
pub fn parameter_ordering(
    options: &GenerationOptions,
) -> Option<impl Fn(&UnitGenerationParameters, &UnitGenerationParameters) -> Ordering> {
    let star_league = options.sort_star_league_units_first;
    let weight = options.group_by_weight;
    let quality = options.group_by_quality;
    if !(star_league || weight || quality) {
        return None;
    }

    Some(move |a: &UnitGenerationParameters, b: &UnitGenerationParameters| {
        let mut ordering = Ordering::Equal;
        if star_league {
            ordering = ordering.then(a.star_league.cmp(&b.star_league));
        }
        if weight {
            ordering = ordering.then(a.weight.cmp(&b.weight));
        }
        if quality {
            ordering = ordering.then(a.quality.cmp(&b.quality));
        }
        ordering.reverse()
    })
}

/// Stable-sort the values at `indices`, writing them back to the same
/// positions in index order.
fn sort_positions<F>(parameters: &mut [UnitGenerationParameters], indices: &[usize], compare: &F)
where
    F: Fn(&UnitGenerationParameters, &UnitGenerationParameters) -> Ordering,
{
    let mut values: Vec<UnitGenerationParameters> =
        indices.iter().map(|&i| parameters[i]).collect();
    values.sort_by(compare);
    for (&i, value) in indices.iter().zip(values) {
        parameters[i] = value;
    }
}

/// Roll, reorder, and assign parameters to combat trackers.
///
/// `trackers` must hold only combat personnel, in lance order; sorted
/// parameters are assigned positionally, so the sort decides which lance
/// receives the best units.
pub fn generate_unit_generation_parameters(
    trackers: &mut [PersonTracker],
    options: &GenerationOptions,
    tables: &dyn RollTables,
    dice: &mut dyn Dice,
) {
    let mut parameters: Vec<UnitGenerationParameters> = trackers
        .iter()
        .map(|t| {
            roll_parameters(
                seniority_modifier(t.person_type),
                options.star_league_only,
                tables,
                dice,
            )
        })
        .collect();

    let commander = trackers
        .iter()
        .position(|t| t.person_type == PersonType::CompanyCommander);

    let mut commander_fixed = None;
    if options.assign_best_roll_to_company_commander {
        if let (Some(c), Some(best)) = (commander, best_roll_index(&parameters)) {
            parameters.swap(c, best);
            commander_fixed = Some(c);
        }
    }

    if let Some(compare) = parameter_ordering(options) {
        let eligible = |i: &usize| Some(*i) != commander_fixed;
        if options.keep_officer_rolls_separate {
            let officers: Vec<usize> = (0..trackers.len())
                .filter(eligible)
                .filter(|&i| trackers[i].person_type.is_officer())
                .collect();
            let rank_and_file: Vec<usize> = (0..trackers.len())
                .filter(eligible)
                .filter(|&i| !trackers[i].person_type.is_officer())
                .collect();
            sort_positions(&mut parameters, &officers, &compare);
            sort_positions(&mut parameters, &rank_and_file, &compare);
        } else {
            let everyone: Vec<usize> = (0..trackers.len()).filter(eligible).collect();
            sort_positions(&mut parameters, &everyone, &compare);
        }
    }

    for (tracker, rolled) in trackers.iter_mut().zip(parameters) {
        tracker.parameters = Some(rolled);
    }
}
