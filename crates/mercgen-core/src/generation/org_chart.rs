//! Force tree assembly: lances, companies, and the units crewed in them.

use hecs::Entity;
use mercgen_logic::naming::{formation_name, FormationLevel};
use mercgen_logic::options::GenerationOptions;

use super::tracker::{PersonTracker, PersonType};
use crate::campaign::Campaign;
use crate::components::{part_quality_for, Person, Unit};
use crate::error::GenerationError;
use crate::forces::{Force, ForceId, ForceKind, ForceTree};

/// Handles to the forces created for the company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgChart {
    pub origin: ForceId,
    pub command_lance: Option<ForceId>,
    pub companies: Vec<ForceId>,
    /// Every lance, in the order they were filled
    pub lances: Vec<ForceId>,
}

/// Reorder seniority-ordered combat trackers into lance order: lance `i` is
/// led by officer `i` (the first `lance_count` trackers) and filled with the
/// next `lance_size - 1` rank-and-file.
pub fn partition_into_lances(
    trackers: Vec<PersonTracker>,
    lance_count: usize,
    lance_size: usize,
) -> Vec<PersonTracker> {
    let split = lance_count.min(trackers.len());
    let mut officers = trackers;
    let mut rank_and_file = officers.split_off(split).into_iter();

    let mut lanced = Vec::with_capacity(officers.len() + rank_and_file.len());
    for officer in officers {
        lanced.push(officer);
        lanced.extend(rank_and_file.by_ref().take(lance_size.saturating_sub(1)));
    }
    lanced.extend(rank_and_file);
    lanced
}

fn lance_name(campaign: &Campaign, options: &GenerationOptions, index: usize) -> String {
    format!(
        "{} {}",
        options.force_naming_method.designator(index),
        formation_name(&campaign.faction, FormationLevel::Lance)
    )
}

/// Create the origin force and its lances, then seat each lance's trackers
/// and their units. `trackers` must be the combat roster in lance order,
/// already recruited.
pub fn assemble_org_chart(
    campaign: &mut Campaign,
    options: &GenerationOptions,
    trackers: &mut [PersonTracker],
) -> Result<OrgChart, GenerationError> {
    let origin = campaign.add_force(
        Force::new(options.company_name.clone(), ForceKind::Origin),
        ForceTree::ROOT,
    )?;
    let mut chart = OrgChart {
        origin,
        command_lance: None,
        companies: Vec::new(),
        lances: Vec::new(),
    };

    if options.generate_mercenary_company_command_lance {
        let name = format!(
            "Command {}",
            formation_name(&campaign.faction, FormationLevel::Lance)
        );
        let lance = campaign.add_force(Force::new(name, ForceKind::CommandLance), origin)?;
        chart.command_lance = Some(lance);
        chart.lances.push(lance);
    }

    for c in 0..options.company_count as usize {
        let name = format!(
            "{} {}",
            options.force_naming_method.designator(c),
            formation_name(&campaign.faction, FormationLevel::Company)
        );
        let company = campaign.add_force(Force::new(name, ForceKind::Company), origin)?;
        chart.companies.push(company);
        for l in 0..options.lances_per_company as usize {
            let name = lance_name(campaign, options, l);
            chart
                .lances
                .push(campaign.add_force(Force::new(name, ForceKind::Lance), company)?);
        }
    }

    for i in 0..options.individual_lance_count as usize {
        let name = lance_name(campaign, options, options.company_count as usize + i);
        chart
            .lances
            .push(campaign.add_force(Force::new(name, ForceKind::Lance), origin)?);
    }

    let lance_size = (options.lance_size as usize).max(1);
    for (&lance, members) in chart.lances.iter().zip(trackers.chunks_mut(lance_size)) {
        for tracker in members {
            seat_tracker(campaign, options, lance, tracker)?;
        }
    }

    log::info!(
        "assembled {} with {} companies and {} lances",
        options.company_name,
        chart.companies.len(),
        chart.lances.len()
    );
    Ok(chart)
}

/// Put a tracker's person, and their unit if one was resolved, into a lance.
fn seat_tracker(
    campaign: &mut Campaign,
    options: &GenerationOptions,
    lance: ForceId,
    tracker: &mut PersonTracker,
) -> Result<(), GenerationError> {
    let Some(person) = tracker.person_entity else {
        log::error!(
            "{} was never recruited; leaving them out of the force tree",
            tracker.person.name.full_name()
        );
        return Ok(());
    };

    let unit = match (&tracker.design, &tracker.parameters) {
        (Some(design), Some(parameters)) => {
            let entity = campaign.add_new_unit(design.clone(), part_quality_for(parameters.quality));
            let mut record = campaign
                .world
                .get::<&mut Unit>(entity)
                .map_err(|_| GenerationError::MissingEntity(entity))?;
            record.commander = Some(person);
            record.attached = options.generate_units_as_attached;
            drop(record);
            tracker.unit_entity = Some(entity);
            Some(entity)
        }
        _ => None,
    };

    campaign.add_unit_to_force(lance, person, unit)
}

/// Give each combat unit a technician: the most experienced tech gets the
/// first unit in lance order. Extra units stay unassigned.
pub fn assign_techs(
    campaign: &mut Campaign,
    support: &[PersonTracker],
    chart: &OrgChart,
) -> usize {
    let mut techs: Vec<&PersonTracker> = support
        .iter()
        .filter(|t| t.person_type == PersonType::Support && t.person.role.is_tech())
        .collect();
    techs.sort_by(|a, b| b.person.experience().cmp(&a.person.experience()));

    let units: Vec<Entity> = chart
        .lances
        .iter()
        .flat_map(|&lance| campaign.forces.units_in(lance))
        .collect();

    let mut assigned = 0;
    for (tech, unit) in techs.iter().filter_map(|t| t.person_entity).zip(units) {
        if let Ok(mut record) = campaign.world.get::<&mut Unit>(unit) {
            record.tech = Some(tech);
            assigned += 1;
        }
    }
    log::debug!("assigned {} techs", assigned);
    assigned
}

/// Tonnage and count of the units crewed in a force's subtree.
pub fn force_tonnage(campaign: &Campaign, force: ForceId) -> (f64, usize) {
    campaign
        .forces
        .units_in(force)
        .into_iter()
        .filter_map(|unit| campaign.world.get::<&Unit>(unit).ok().map(|u| u.design.tonnage))
        .fold((0.0, 0), |(total, count), tonnage| (total + tonnage, count + 1))
}

/// Name of the person seated first in a force, for reports.
pub fn force_leader(campaign: &Campaign, force: ForceId) -> Option<String> {
    let slot = campaign.forces.get(force)?.slots.first()?;
    let person = campaign.world.get::<&Person>(slot.person).ok()?;
    Some(person.name.display_name())
}
