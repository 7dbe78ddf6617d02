//! Weight classes, quality ratings, and the 2d6 roll tables that map a
//! modified roll onto them.
//!
//! Two table sets exist. The standard set matches the classic mercenary
//! start-up rules; the Windchild set is slightly harsher on low rolls (a
//! natural 2 yields no unit at all) and gates the top quality ratings one
//! point higher.

use serde::{Deserialize, Serialize};

/// Ordinal weight class of a generated unit, including the two sentinels.
///
/// `NoUnit` and `UltraLight` both mean "this person receives no unit".
/// `StarLeague` means "re-roll the weight and pull from the Star League table".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    NoUnit,
    UltraLight,
    Light,
    Medium,
    Heavy,
    Assault,
    StarLeague,
}

impl WeightClass {
    /// The concrete classes a unit table can be queried with.
    pub const CONCRETE: [WeightClass; 4] = [
        WeightClass::Light,
        WeightClass::Medium,
        WeightClass::Heavy,
        WeightClass::Assault,
    ];

    /// Heaviest class a re-roll may produce.
    pub const HEAVIEST: WeightClass = WeightClass::Assault;

    /// True when no unit should be generated for this result.
    pub fn is_no_unit(&self) -> bool {
        matches!(self, WeightClass::NoUnit | WeightClass::UltraLight)
    }

    pub fn is_star_league(&self) -> bool {
        *self == WeightClass::StarLeague
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeightClass::NoUnit => "None",
            WeightClass::UltraLight => "Ultra Light",
            WeightClass::Light => "Light",
            WeightClass::Medium => "Medium",
            WeightClass::Heavy => "Heavy",
            WeightClass::Assault => "Assault",
            WeightClass::StarLeague => "Star League",
        }
    }
}

/// Dragoons-style quality rating (F is worst, A* is best; there is no E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityRating {
    F,
    D,
    C,
    B,
    A,
    AStar,
}

impl QualityRating {
    /// One step better, saturating at A*.
    pub fn raised(self) -> Self {
        match self {
            QualityRating::F => QualityRating::D,
            QualityRating::D => QualityRating::C,
            QualityRating::C => QualityRating::B,
            QualityRating::B => QualityRating::A,
            QualityRating::A | QualityRating::AStar => QualityRating::AStar,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QualityRating::F => "F",
            QualityRating::D => "D",
            QualityRating::C => "C",
            QualityRating::B => "B",
            QualityRating::A => "A",
            QualityRating::AStar => "A*",
        }
    }
}

/// Maps a modified 2d6 roll onto weight and quality.
///
/// Implementations must be monotone: a higher roll never yields a lighter
/// class or a worse rating.
pub trait RollTables {
    /// Weight class for `roll`. With `allow_star_league == false` any result
    /// that would be `StarLeague` is capped at [`WeightClass::HEAVIEST`].
    fn weight_class(&self, roll: i32, allow_star_league: bool) -> WeightClass;

    /// Quality rating for `roll`.
    fn quality(&self, roll: i32) -> QualityRating;
}

/// Classic start-up tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRollTables;

impl RollTables for StandardRollTables {
    fn weight_class(&self, roll: i32, allow_star_league: bool) -> WeightClass {
        match roll {
            i32::MIN..=1 => WeightClass::UltraLight,
            2..=5 => WeightClass::Light,
            6..=8 => WeightClass::Medium,
            9..=10 => WeightClass::Heavy,
            11..=12 => WeightClass::Assault,
            _ if allow_star_league => WeightClass::StarLeague,
            _ => WeightClass::HEAVIEST,
        }
    }

    fn quality(&self, roll: i32) -> QualityRating {
        match roll {
            i32::MIN..=5 => QualityRating::F,
            6..=8 => QualityRating::D,
            9..=10 => QualityRating::C,
            11 => QualityRating::B,
            12 => QualityRating::A,
            _ => QualityRating::AStar,
        }
    }
}

/// Windchild tables: a natural 2 gives no unit, top ratings need one more pip.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindchildRollTables;

impl RollTables for WindchildRollTables {
    fn weight_class(&self, roll: i32, allow_star_league: bool) -> WeightClass {
        match roll {
            i32::MIN..=2 => WeightClass::NoUnit,
            3..=6 => WeightClass::Light,
            7..=8 => WeightClass::Medium,
            9..=10 => WeightClass::Heavy,
            11..=12 => WeightClass::Assault,
            _ if allow_star_league => WeightClass::StarLeague,
            _ => WeightClass::HEAVIEST,
        }
    }

    fn quality(&self, roll: i32) -> QualityRating {
        match roll {
            i32::MIN..=5 => QualityRating::F,
            6..=8 => QualityRating::D,
            9..=10 => QualityRating::C,
            11..=12 => QualityRating::B,
            13 => QualityRating::A,
            _ => QualityRating::AStar,
        }
    }
}

/// Upper bounds (inclusive) of normalised lance tonnage for each force class.
const FORCE_WEIGHT_THRESHOLDS: [(i64, WeightClass); 5] = [
    (40, WeightClass::UltraLight),
    (130, WeightClass::Light),
    (200, WeightClass::Medium),
    (280, WeightClass::Heavy),
    (400, WeightClass::Assault),
];

/// Weight class of a force from the tonnage of its units.
///
/// Tonnage is normalised to a four-unit lance (`total × 4 ÷ count`, rounded)
/// and looked up in the threshold table; anything above the table is the
/// heaviest class. Returns `None` when there are no units to aggregate.
pub fn force_weight_class(total_tonnage: f64, unit_count: usize) -> Option<WeightClass> {
    if unit_count == 0 {
        return None;
    }
    let normalised = (total_tonnage * 4.0 / unit_count as f64).round() as i64;
    let class = FORCE_WEIGHT_THRESHOLDS
        .iter()
        .find(|(max, _)| normalised <= *max)
        .map(|(_, class)| *class)
        .unwrap_or(WeightClass::HEAVIEST);
    Some(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn standard_weight_boundaries() {
        let t = StandardRollTables;
        assert_eq!(t.weight_class(1, true), WeightClass::UltraLight);
        assert_eq!(t.weight_class(2, true), WeightClass::Light);
        assert_eq!(t.weight_class(5, true), WeightClass::Light);
        assert_eq!(t.weight_class(6, true), WeightClass::Medium);
        assert_eq!(t.weight_class(10, true), WeightClass::Heavy);
        assert_eq!(t.weight_class(12, true), WeightClass::Assault);
        assert_eq!(t.weight_class(13, true), WeightClass::StarLeague);
        assert_eq!(t.weight_class(14, false), WeightClass::Assault);
    }

    #[test]
    fn windchild_natural_two_is_no_unit() {
        let t = WindchildRollTables;
        assert_eq!(t.weight_class(2, true), WeightClass::NoUnit);
        assert!(t.weight_class(2, true).is_no_unit());
        assert_eq!(t.quality(12), QualityRating::B);
        assert_eq!(t.quality(13), QualityRating::A);
    }

    #[test]
    fn large_negative_modifier_yields_no_unit() {
        assert!(StandardRollTables.weight_class(7 - 20, true).is_no_unit());
        assert_eq!(StandardRollTables.quality(7 - 20), QualityRating::F);
    }

    #[test]
    fn quality_raise_saturates() {
        assert_eq!(QualityRating::F.raised(), QualityRating::D);
        assert_eq!(QualityRating::AStar.raised(), QualityRating::AStar);
    }

    #[test]
    fn force_weight_class_normalises_to_lance() {
        // Four 55-ton mechs = 220 tons → Heavy
        assert_eq!(force_weight_class(220.0, 4), Some(WeightClass::Heavy));
        // Two 20-ton mechs → normalised 80 → Light
        assert_eq!(force_weight_class(40.0, 2), Some(WeightClass::Light));
        // Twelve 100-ton mechs → 400 → Assault
        assert_eq!(force_weight_class(1200.0, 12), Some(WeightClass::Assault));
    }

    #[test]
    fn force_weight_class_defaults_to_heaviest_past_table() {
        assert_eq!(force_weight_class(1000.0, 4), Some(WeightClass::Assault));
    }

    #[test]
    fn force_weight_class_empty_is_none() {
        assert_eq!(force_weight_class(0.0, 0), None);
    }

    proptest! {
        #[test]
        fn seniority_modifier_never_lightens(raw in 2i32..=12, modifier in 0i32..=2) {
            for tables in [&StandardRollTables as &dyn RollTables, &WindchildRollTables] {
                let base = tables.weight_class(raw, true);
                let boosted = tables.weight_class(raw + modifier, true);
                prop_assert!(boosted >= base);
                prop_assert!(tables.quality(raw + modifier) >= tables.quality(raw));
            }
        }
    }
}
