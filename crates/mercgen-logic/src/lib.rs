//! Pure generation rules for mercenary company start-up.
//!
//! This crate contains the tables and arithmetic that are independent of any
//! campaign model, dice source, or engine. Functions take plain data and
//! return results, so they are unit-testable on their own and shared by the
//! generator core and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`armor`] | Armour lots, merge keys, tonnage rescaling |
//! | [`faction`] | Faction registry and family flags |
//! | [`finance`] | Starting-cash waterfall, set-up costs, loan payments |
//! | [`naming`] | Company/lance designators and formation names |
//! | [`options`] | `GenerationOptions` and validation |
//! | [`ranks`] | Rank codes and commanding-officer rank policies |
//! | [`roles`] | Personnel roles, role skills, salaries |
//! | [`skills`] | Skill sets, officer-skill boosts, experience levels |
//! | [`weight`] | Weight classes, quality ratings, 2d6 roll tables |

pub mod armor;
pub mod faction;
pub mod finance;
pub mod naming;
pub mod options;
pub mod ranks;
pub mod roles;
pub mod skills;
pub mod weight;
