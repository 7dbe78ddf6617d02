//! Armour lots: merging identical armour and rescaling to a target tonnage.
//!
//! Two lots merge iff armour type, clan flag, quality, hit count, and skill
//! minimum all match. Merging is keyed through a `BTreeMap`, so the result
//! does not depend on input order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArmorType {
    Standard,
    FerroFibrous,
    LightFerroFibrous,
    HeavyFerroFibrous,
    Stealth,
    Reactive,
    Reflective,
    Hardened,
}

impl ArmorType {
    /// Armour points per ton.
    pub fn points_per_ton(&self, clan: bool) -> f64 {
        match self {
            ArmorType::Standard => 16.0,
            ArmorType::FerroFibrous if clan => 19.2,
            ArmorType::FerroFibrous => 17.92,
            ArmorType::LightFerroFibrous => 16.96,
            ArmorType::HeavyFerroFibrous => 19.84,
            ArmorType::Stealth => 16.0,
            ArmorType::Reactive if clan => 17.6,
            ArmorType::Reactive => 16.0,
            ArmorType::Reflective if clan => 17.6,
            ArmorType::Reflective => 16.0,
            ArmorType::Hardened => 8.0,
        }
    }

    /// C-bill value of one ton.
    pub fn cost_per_ton(&self) -> i64 {
        match self {
            ArmorType::Standard => 10_000,
            ArmorType::FerroFibrous => 20_000,
            ArmorType::LightFerroFibrous => 15_000,
            ArmorType::HeavyFerroFibrous => 25_000,
            ArmorType::Stealth => 50_000,
            ArmorType::Reactive => 30_000,
            ArmorType::Reflective => 30_000,
            ArmorType::Hardened => 15_000,
        }
    }
}

/// Part quality grade (A is worst, F is best; D is factory standard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PartQuality {
    A,
    B,
    C,
    #[default]
    D,
    E,
    F,
}

/// Work mode a part is maintained or repaired under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkMode {
    #[default]
    Normal,
    Rush,
    ExtraTime,
}

/// A quantity of armour points, installed or in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorLot {
    pub armor_type: ArmorType,
    pub clan: bool,
    pub quality: PartQuality,
    pub hits: u32,
    pub skill_min: i32,
    /// Armour points.
    pub amount: u32,
    pub mode: WorkMode,
    pub omni_podded: bool,
}

/// The identity two lots must share to merge.
pub type ArmorKey = (ArmorType, bool, PartQuality, u32, i32);

impl ArmorLot {
    pub fn new(armor_type: ArmorType, clan: bool, amount: u32) -> Self {
        Self {
            armor_type,
            clan,
            quality: PartQuality::default(),
            hits: 0,
            skill_min: 0,
            amount,
            mode: WorkMode::Normal,
            omni_podded: false,
        }
    }

    pub fn key(&self) -> ArmorKey {
        (
            self.armor_type,
            self.clan,
            self.quality,
            self.hits,
            self.skill_min,
        )
    }

    pub fn tonnage(&self) -> f64 {
        self.amount as f64 / self.armor_type.points_per_ton(self.clan)
    }

    /// Value of the lot in C-bills, rounded.
    pub fn value(&self) -> i64 {
        (self.tonnage() * self.armor_type.cost_per_ton() as f64).round() as i64
    }
}

/// Merge lots sharing a key by summing their amounts. Each group is
/// represented by a clone reset to normal mode and not omni-podded.
pub fn merge_armor<'a>(lots: impl IntoIterator<Item = &'a ArmorLot>) -> Vec<ArmorLot> {
    let mut groups: BTreeMap<ArmorKey, ArmorLot> = BTreeMap::new();
    for lot in lots {
        groups
            .entry(lot.key())
            .and_modify(|merged| merged.amount += lot.amount)
            .or_insert_with(|| ArmorLot {
                mode: WorkMode::Normal,
                omni_podded: false,
                ..lot.clone()
            });
    }
    groups.into_values().collect()
}

/// Rescale every lot so the total tonnage approaches `target_tonnage`.
/// Amounts are rounded to the nearest whole point. No-op when the target is
/// not positive or there is no armour to scale.
pub fn rescale_armor(lots: &mut [ArmorLot], target_tonnage: f64) {
    if target_tonnage <= 0.0 {
        return;
    }
    let current: f64 = lots.iter().map(ArmorLot::tonnage).sum();
    if current <= 0.0 {
        return;
    }
    let factor = target_tonnage / current;
    for lot in lots.iter_mut() {
        lot.amount = (lot.amount as f64 * factor).round() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lot(amount: u32) -> ArmorLot {
        ArmorLot::new(ArmorType::Standard, false, amount)
    }

    #[test]
    fn matching_lots_merge() {
        let merged = merge_armor(&[lot(5), lot(3)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].amount, 8);

        let reversed = merge_armor(&[lot(3), lot(5)]);
        assert_eq!(merged, reversed);
    }

    #[test]
    fn differing_key_fields_do_not_merge() {
        let mut clan = lot(4);
        clan.clan = true;
        let mut hit = lot(4);
        hit.hits = 1;
        let mut skilled = lot(4);
        skilled.skill_min = 2;
        let mut worn = lot(4);
        worn.quality = PartQuality::B;
        let ferro = ArmorLot::new(ArmorType::FerroFibrous, false, 4);

        let merged = merge_armor(&[lot(4), clan, hit, skilled, worn, ferro]);
        assert_eq!(merged.len(), 6);
    }

    #[test]
    fn representative_is_reset() {
        let mut podded = lot(10);
        podded.omni_podded = true;
        podded.mode = WorkMode::Rush;
        let merged = merge_armor(&[podded]);
        assert!(!merged[0].omni_podded);
        assert_eq!(merged[0].mode, WorkMode::Normal);
    }

    #[test]
    fn rescale_to_target_tonnage() {
        // 32 points of standard armour = 2 tons; target 5 tons
        let mut lots = vec![lot(32)];
        rescale_armor(&mut lots, 5.0);
        assert_eq!(lots[0].amount, 80);
    }

    #[test]
    fn rescale_noop_for_non_positive_target() {
        let mut lots = vec![lot(32)];
        rescale_armor(&mut lots, 0.0);
        assert_eq!(lots[0].amount, 32);
        rescale_armor(&mut lots, -1.0);
        assert_eq!(lots[0].amount, 32);
    }

    #[test]
    fn rescale_noop_without_armour() {
        let mut lots: Vec<ArmorLot> = Vec::new();
        rescale_armor(&mut lots, 10.0);
        assert!(lots.is_empty());
    }

    #[test]
    fn value_from_tonnage() {
        assert_eq!(lot(16).value(), 10_000);
    }

    proptest! {
        #[test]
        fn merge_is_order_independent(amounts in proptest::collection::vec(0u32..200, 1..12), flags in proptest::collection::vec(any::<bool>(), 12)) {
            let lots: Vec<ArmorLot> = amounts
                .iter()
                .zip(flags.iter())
                .map(|(a, clan)| ArmorLot::new(ArmorType::Standard, *clan, *a))
                .collect();
            let mut reversed = lots.clone();
            reversed.reverse();

            let forward = merge_armor(&lots);
            prop_assert_eq!(&forward, &merge_armor(&reversed));
            let total: u32 = forward.iter().map(|l| l.amount).sum();
            prop_assert_eq!(total, amounts.iter().sum::<u32>());
        }
    }
}
