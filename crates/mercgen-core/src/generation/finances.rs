//! Starting finances: cash on hand, set-up costs, and the loan covering any
//! shortfall.
//!
//! Dice order: one `N`d6 roll when starting cash is randomised, nothing
//! otherwise.

use hecs::Entity;
use mercgen_logic::finance::{
    reconcile, FinancialTerm, SetupCosts, HIRING_SALARY_MULTIPLIER, RANDOM_CASH_MULTIPLIER,
    STARTING_LOAN_COLLATERAL, STARTING_LOAN_RATE, STARTING_LOAN_YEARS,
};
use mercgen_logic::options::GenerationOptions;
use serde::Serialize;

use super::spares::SpareInventory;
use super::tracker::PersonTracker;
use crate::campaign::{Campaign, Loan};
use crate::components::Unit;
use crate::dice::Dice;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinanceLedger {
    pub starting_cash: i64,
    /// Costs counted against the starting cash; `None` when set-up is free
    pub costs: Option<SetupCosts>,
    pub final_cash: i64,
    pub loan: Option<Loan>,
}

/// `1234567` as `"1,234,567"`.
pub fn format_cbills(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Fixed or rolled starting cash plus any contract advance.
pub fn starting_cash(options: &GenerationOptions, dice: &mut dyn Dice) -> i64 {
    let mut cash = if options.start_with_random_cash {
        dice.d6(options.random_cash_dice_count) as i64 * RANDOM_CASH_MULTIPLIER
    } else {
        options.starting_cash
    };
    if options.include_initial_contract_payment {
        if let Some(contract) = &options.initial_contract {
            cash += contract.advance_amount;
        }
    }
    cash
}

/// Set-up costs by category. Disabled categories are zero.
pub fn setup_costs(
    campaign: &Campaign,
    options: &GenerationOptions,
    trackers: &[PersonTracker],
    units: &[Entity],
    spares: &SpareInventory,
) -> SetupCosts {
    let mut costs = SetupCosts::default();
    if options.pay_for_personnel {
        costs.personnel = trackers
            .iter()
            .map(|t| t.person.salary() * HIRING_SALARY_MULTIPLIER)
            .sum();
    }
    if options.pay_for_units {
        costs.units = units
            .iter()
            .filter_map(|&e| campaign.world.get::<&Unit>(e).ok().map(|u| u.buy_cost()))
            .sum();
    }
    if options.pay_for_parts {
        costs.parts = spares.parts_value();
    }
    if options.pay_for_armour {
        costs.armor = spares.armor_value();
    }
    if options.pay_for_ammunition {
        costs.ammunition = spares.ammunition_value();
    }
    costs
}

/// Settle the starting budget and book it in the campaign ledger.
pub fn generate_finances(
    campaign: &mut Campaign,
    options: &GenerationOptions,
    trackers: &[PersonTracker],
    units: &[Entity],
    spares: &SpareInventory,
    dice: &mut dyn Dice,
) -> FinanceLedger {
    let cash = starting_cash(options, dice);
    let costs = options
        .pay_for_setup
        .then(|| setup_costs(campaign, options, trackers, units, spares));

    let settled = reconcile(
        cash,
        options.minimum_starting_float,
        costs.map(|c| c.total()),
        options.allow_starting_loan,
    );

    let date = campaign.date;
    if settled.final_cash > 0 {
        campaign
            .finances
            .credit(settled.final_cash, date, "Starting capital");
    }

    let loan = (settled.loan > 0).then(|| Loan {
        principal: settled.loan,
        rate: STARTING_LOAN_RATE,
        years: STARTING_LOAN_YEARS,
        term: FinancialTerm::Monthly,
        collateral: STARTING_LOAN_COLLATERAL,
        start_date: date,
    });
    if let Some(loan) = &loan {
        campaign.finances.add_loan(loan.clone());
    }

    let mut report = format!(
        "{} starts with {} C-bills",
        options.company_name,
        format_cbills(settled.final_cash)
    );
    if let Some(loan) = &loan {
        report.push_str(&format!(
            " and a starting loan of {} C-bills",
            format_cbills(loan.principal)
        ));
    }
    log::info!("{}", report);
    campaign.add_report(report);

    FinanceLedger {
        starting_cash: cash,
        costs,
        final_cash: settled.final_cash,
        loan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use chrono::NaiveDate;
    use mercgen_logic::faction::{codes, faction_by_code};
    use mercgen_logic::options::ContractTerms;

    fn campaign() -> Campaign {
        let faction = faction_by_code(codes::MERCENARY).unwrap();
        Campaign::new("Test", faction, NaiveDate::from_ymd_opt(3025, 1, 1).unwrap())
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_cbills(0), "0");
        assert_eq!(format_cbills(999), "999");
        assert_eq!(format_cbills(1_000), "1,000");
        assert_eq!(format_cbills(3_500_000), "3,500,000");
        assert_eq!(format_cbills(-12_345), "-12,345");
    }

    #[test]
    fn random_cash_plus_advance() {
        let options = GenerationOptions {
            start_with_random_cash: true,
            include_initial_contract_payment: true,
            initial_contract: Some(ContractTerms {
                name: "Garrison".into(),
                advance_amount: 250_000,
            }),
            ..GenerationOptions::default()
        };
        let mut dice = ScriptedDice::new([30]);
        assert_eq!(starting_cash(&options, &mut dice), 30_250_000);
    }

    #[test]
    fn free_setup_keeps_float() {
        let mut campaign = campaign();
        let options = GenerationOptions {
            pay_for_setup: false,
            starting_cash: 1_000_000,
            ..GenerationOptions::default()
        };
        let mut dice = ScriptedDice::new([]);
        let ledger = generate_finances(
            &mut campaign,
            &options,
            &[],
            &[],
            &SpareInventory::default(),
            &mut dice,
        );
        assert_eq!(ledger.final_cash, 3_500_000);
        assert!(ledger.costs.is_none());
        assert!(ledger.loan.is_none());
        assert_eq!(campaign.finances.balance(), 3_500_000);
        assert_eq!(
            campaign.reports().last().map(String::as_str),
            Some("Mercenary Company starts with 3,500,000 C-bills")
        );
    }

    #[test]
    fn zero_cash_is_not_credited() {
        let mut campaign = campaign();
        let options = GenerationOptions {
            pay_for_setup: false,
            minimum_starting_float: 0,
            ..GenerationOptions::default()
        };
        let mut dice = ScriptedDice::new([]);
        let ledger = generate_finances(
            &mut campaign,
            &options,
            &[],
            &[],
            &SpareInventory::default(),
            &mut dice,
        );
        assert_eq!(ledger.final_cash, 0);
        assert!(campaign.finances.transactions().is_empty());
        assert_eq!(campaign.reports().len(), 1);
    }
}
