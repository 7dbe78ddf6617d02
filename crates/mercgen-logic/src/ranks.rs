//! Rank codes and the commanding-officer rank policies.
//!
//! Rank codes index a faction's rank table: 0 is unranked, 1–20 are enlisted
//! grades, 21 and above are officer grades.

use crate::faction::Faction;

pub const RANK_NONE: u8 = 0;

/// Enlisted grade for Clan, ComStar, and Word of Blake rank-and-file.
pub const RANK_AND_FILE_LOW: u8 = 4;
/// Enlisted grade for everyone else's rank-and-file.
pub const RANK_AND_FILE_STANDARD: u8 = 8;

/// Support grade for ComStar, Word of Blake, and Magistracy personnel.
pub const SUPPORT_LOW: u8 = 2;
/// Support grade for everyone else.
pub const SUPPORT_STANDARD: u8 = 5;

pub const LIEUTENANT_RANK: u8 = 23;
pub const CAPTAIN_RANK: u8 = 26;

/// Commanding-officer grade per force-size tier, largest tier first.
const COMMANDER_TIERS: [u8; 4] = [30, 28, 26, 23];

/// ComStar and Word of Blake tables place the equivalent grade one code up.
const COMSTAR_ADJUSTMENT: u8 = 1;

/// Force-size tier thresholds (number of combat personnel).
const TIER_THRESHOLDS: [u32; 3] = [36, 12, 4];

/// Picks the rank of the company commander.
pub trait RankPolicy {
    /// Rank code for a commander of `force_size` combat personnel.
    fn commanding_officer_rank(&self, faction: &Faction, force_size: u32) -> u8;
}

/// Tier boundaries are inclusive (`>=`).
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRankPolicy;

impl RankPolicy for StandardRankPolicy {
    fn commanding_officer_rank(&self, faction: &Faction, force_size: u32) -> u8 {
        let tier = TIER_THRESHOLDS
            .iter()
            .position(|t| force_size >= *t)
            .unwrap_or(TIER_THRESHOLDS.len());
        adjust_for_faction(COMMANDER_TIERS[tier], faction)
    }
}

/// Tier boundaries are exclusive (`>`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WindchildRankPolicy;

impl RankPolicy for WindchildRankPolicy {
    fn commanding_officer_rank(&self, faction: &Faction, force_size: u32) -> u8 {
        let tier = TIER_THRESHOLDS
            .iter()
            .position(|t| force_size > *t)
            .unwrap_or(TIER_THRESHOLDS.len());
        adjust_for_faction(COMMANDER_TIERS[tier], faction)
    }
}

fn adjust_for_faction(rank: u8, faction: &Faction) -> u8 {
    if faction.is_comstar_or_wob() {
        rank + COMSTAR_ADJUSTMENT
    } else {
        rank
    }
}

/// Rank for combat personnel without a command role.
pub fn rank_and_file_rank(faction: &Faction) -> u8 {
    if faction.is_clan() || faction.is_comstar_or_wob() {
        RANK_AND_FILE_LOW
    } else {
        RANK_AND_FILE_STANDARD
    }
}

/// Rank for support personnel and assistants.
pub fn support_rank(faction: &Faction) -> u8 {
    if faction.is_clan() || faction.is_warrior_house() {
        RANK_NONE
    } else if faction.is_comstar_or_wob() || faction.is_magistracy() {
        SUPPORT_LOW
    } else {
        SUPPORT_STANDARD
    }
}
