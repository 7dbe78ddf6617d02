//! Faction registry: codes, families, and the flags generation rules key on.
//!
//! Ranks, formation names, and unit-table lookups all branch on a faction's
//! family (Clan, ComStar, Word of Blake, Inner Sphere, Periphery) plus two
//! special cases: Warrior Houses and the Magistracy of Canopus.

use serde::{Deserialize, Serialize};

/// Broad faction family used by rank, naming, and icon rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactionFamily {
    InnerSphere,
    Periphery,
    Clan,
    ComStar,
    WordOfBlake,
}

/// A single faction entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Faction {
    pub code: &'static str,
    pub name: &'static str,
    pub family: FactionFamily,
    pub warrior_house: bool,
    pub mercenary: bool,
}

impl Faction {
    const fn new(code: &'static str, name: &'static str, family: FactionFamily) -> Self {
        Self {
            code,
            name,
            family,
            warrior_house: false,
            mercenary: false,
        }
    }

    const fn warrior_house(mut self) -> Self {
        self.warrior_house = true;
        self
    }

    const fn mercenary(mut self) -> Self {
        self.mercenary = true;
        self
    }

    pub fn is_clan(&self) -> bool {
        self.family == FactionFamily::Clan
    }

    pub fn is_comstar(&self) -> bool {
        self.family == FactionFamily::ComStar
    }

    pub fn is_word_of_blake(&self) -> bool {
        self.family == FactionFamily::WordOfBlake
    }

    pub fn is_comstar_or_wob(&self) -> bool {
        self.is_comstar() || self.is_word_of_blake()
    }

    pub fn is_magistracy(&self) -> bool {
        self.code == codes::MAGISTRACY_OF_CANOPUS
    }

    pub fn is_warrior_house(&self) -> bool {
        self.warrior_house
    }

    pub fn is_mercenary(&self) -> bool {
        self.mercenary
    }
}

/// Faction codes referenced directly by generation rules.
pub mod codes {
    pub const MERCENARY: &str = "MERC";
    pub const STAR_LEAGUE: &str = "SL";
    pub const COMSTAR: &str = "CS";
    pub const WORD_OF_BLAKE: &str = "WOB";
    pub const MAGISTRACY_OF_CANOPUS: &str = "MOC";
}

static FACTIONS: &[Faction] = &[
    Faction::new(codes::MERCENARY, "Mercenary", FactionFamily::InnerSphere).mercenary(),
    Faction::new(codes::STAR_LEAGUE, "Star League", FactionFamily::InnerSphere),
    Faction::new("FS", "Federated Suns", FactionFamily::InnerSphere),
    Faction::new("LA", "Lyran Alliance", FactionFamily::InnerSphere),
    Faction::new("DC", "Draconis Combine", FactionFamily::InnerSphere),
    Faction::new("CC", "Capellan Confederation", FactionFamily::InnerSphere),
    Faction::new("FWL", "Free Worlds League", FactionFamily::InnerSphere),
    Faction::new(codes::COMSTAR, "ComStar", FactionFamily::ComStar),
    Faction::new(codes::WORD_OF_BLAKE, "Word of Blake", FactionFamily::WordOfBlake),
    Faction::new(
        codes::MAGISTRACY_OF_CANOPUS,
        "Magistracy of Canopus",
        FactionFamily::Periphery,
    ),
    Faction::new("TC", "Taurian Concordat", FactionFamily::Periphery),
    Faction::new("OA", "Outworlds Alliance", FactionFamily::Periphery),
    Faction::new("WHI", "Warrior House Imarra", FactionFamily::InnerSphere).warrior_house(),
    Faction::new("WHD", "Warrior House Dai Da Chi", FactionFamily::InnerSphere).warrior_house(),
    Faction::new("CJF", "Clan Jade Falcon", FactionFamily::Clan),
    Faction::new("CW", "Clan Wolf", FactionFamily::Clan),
    Faction::new("CGB", "Clan Ghost Bear", FactionFamily::Clan),
    Faction::new("CSJ", "Clan Smoke Jaguar", FactionFamily::Clan),
];

/// All registered factions.
pub fn all_factions() -> &'static [Faction] {
    FACTIONS
}

/// Look up a faction by its short code (case-sensitive).
pub fn faction_by_code(code: &str) -> Option<Faction> {
    FACTIONS.iter().find(|f| f.code == code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_codes() {
        let cs = faction_by_code("CS").unwrap();
        assert!(cs.is_comstar_or_wob());
        assert!(!cs.is_clan());

        let cjf = faction_by_code("CJF").unwrap();
        assert!(cjf.is_clan());

        assert!(faction_by_code("MOC").unwrap().is_magistracy());
        assert!(faction_by_code("WHI").unwrap().is_warrior_house());
        assert!(faction_by_code("MERC").unwrap().is_mercenary());
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(faction_by_code("XYZ").is_none());
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = all_factions().iter().map(|f| f.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all_factions().len());
    }
}
