//! Layered force icons: which image goes in which slot of each force's icon.

use mercgen_logic::faction::{Faction, FactionFamily};
use mercgen_logic::naming::{formation_name, FormationLevel};
use mercgen_logic::options::GenerationOptions;
use mercgen_logic::weight::force_weight_class;

use super::org_chart::{force_tonnage, OrgChart};
use crate::campaign::Campaign;
use crate::forces::{ForceId, ForceKind, IconLayer, LayerSlot, LayeredIcon};

pub const BACKGROUND_CATEGORY: &str = "Pieces/Backgrounds/";
pub const TYPE_CATEGORY: &str = "Pieces/Types/";
pub const FORMATION_CATEGORY: &str = "Pieces/Formations/";
pub const ALPHANUMERIC_CATEGORY: &str = "Pieces/Alphanumerics/";
pub const LOGO_CATEGORY: &str = "Logos/Factions/";

pub const DEFAULT_TYPE_FILE: &str = "Default.png";
pub const HEADQUARTERS_FILE: &str = "HQ.png";

fn default_type() -> IconLayer {
    IconLayer::new(TYPE_CATEGORY, DEFAULT_TYPE_FILE)
}

/// Formation image directory for a faction family.
fn formation_directory(faction: &Faction) -> &'static str {
    match faction.family {
        FactionFamily::Clan => "Clan",
        FactionFamily::ComStar | FactionFamily::WordOfBlake => "ComStar",
        FactionFamily::InnerSphere | FactionFamily::Periphery => "Inner Sphere",
    }
}

/// Type layer from the weight of the units in a force. A force with no
/// units gets the default glyph.
pub fn type_layer(campaign: &Campaign, force: ForceId) -> IconLayer {
    let (tonnage, count) = force_tonnage(campaign, force);
    match force_weight_class(tonnage, count) {
        Some(class) => IconLayer::new(TYPE_CATEGORY, format!("{}.png", class.name())),
        None => default_type(),
    }
}

pub fn formation_layer(faction: &Faction, kind: ForceKind) -> Option<IconLayer> {
    let level = match kind {
        ForceKind::Company => FormationLevel::Company,
        ForceKind::Lance | ForceKind::CommandLance => FormationLevel::Lance,
        ForceKind::Root | ForceKind::Origin => return None,
    };
    Some(IconLayer::new(
        FORMATION_CATEGORY,
        format!(
            "{}/{}.png",
            formation_directory(faction),
            formation_name(faction, level)
        ),
    ))
}

/// Compose the icon for one force.
pub fn compose_icon(
    campaign: &Campaign,
    options: &GenerationOptions,
    force: ForceId,
    kind: ForceKind,
) -> LayeredIcon {
    let faction = campaign.faction;
    let mut icon = LayeredIcon::new();

    if options.use_faction_background_icon {
        icon.append(
            LayerSlot::Background,
            IconLayer::new(BACKGROUND_CATEGORY, format!("{}.png", faction.name)),
        );
    }

    if kind == ForceKind::Origin {
        if options.use_origin_node_faction_logo {
            icon.append(
                LayerSlot::Logo,
                IconLayer::new(LOGO_CATEGORY, format!("{}.png", faction.name)),
            );
        } else {
            icon.append(LayerSlot::Type, default_type());
        }
        return icon;
    }

    icon.append(LayerSlot::Type, type_layer(campaign, force));
    if let Some(formation) = formation_layer(&faction, kind) {
        icon.append(LayerSlot::Formation, formation);
    }
    if kind == ForceKind::CommandLance {
        icon.append(
            LayerSlot::Alphanumeric,
            IconLayer::new(ALPHANUMERIC_CATEGORY, HEADQUARTERS_FILE),
        );
    }
    icon
}

/// Set an icon on every force in the company.
pub fn generate_force_icons(campaign: &mut Campaign, options: &GenerationOptions, chart: &OrgChart) {
    let forces = campaign.forces.subtree(chart.origin);
    for &force in &forces {
        let Some(kind) = campaign.forces.get(force).map(|f| f.kind) else {
            continue;
        };
        let icon = compose_icon(campaign, options, force, kind);
        if let Some(target) = campaign.forces.get_mut(force) {
            target.icon = Some(icon);
        }
    }
    log::debug!("composed {} force icons", forces.len());
}
