//! Starting-finance waterfall and loan arithmetic.
//!
//! All amounts are whole C-bills (`i64`).

use serde::{Deserialize, Serialize};

/// Multiplier applied to the d6 total when starting cash is randomised.
pub const RANDOM_CASH_MULTIPLIER: i64 = 1_000_000;

/// Terms of the loan taken out to cover set-up costs.
pub const STARTING_LOAN_RATE: u32 = 15;
pub const STARTING_LOAN_YEARS: u32 = 2;
pub const STARTING_LOAN_COLLATERAL: u32 = 100;

/// Hiring cost as a multiple of monthly salary.
pub const HIRING_SALARY_MULTIPLIER: i64 = 2;

/// Set-up costs by category; disabled categories stay at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupCosts {
    pub personnel: i64,
    pub units: i64,
    pub parts: i64,
    pub armor: i64,
    pub ammunition: i64,
}

impl SetupCosts {
    pub fn total(&self) -> i64 {
        self.personnel + self.units + self.parts + self.armor + self.ammunition
    }
}

/// Outcome of reconciling starting cash against set-up costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub final_cash: i64,
    pub loan: i64,
}

/// Reconcile starting cash against costs.
///
/// With `costs == None` (set-up is not paid for) the company keeps
/// `max(starting_cash, minimum_float)`. Otherwise costs are paid out of the
/// headroom above the float; any shortfall leaves exactly the float and, if
/// `loans_allowed`, becomes the loan principal.
pub fn reconcile(
    starting_cash: i64,
    minimum_float: i64,
    costs: Option<i64>,
    loans_allowed: bool,
) -> Reconciliation {
    let Some(costs) = costs else {
        return Reconciliation {
            final_cash: starting_cash.max(minimum_float),
            loan: 0,
        };
    };

    let headroom = starting_cash - minimum_float;
    if headroom >= costs {
        Reconciliation {
            final_cash: starting_cash - costs,
            loan: 0,
        }
    } else {
        Reconciliation {
            final_cash: minimum_float,
            loan: if loans_allowed { costs - headroom } else { 0 },
        }
    }
}

/// How often loan payments fall due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FinancialTerm {
    #[default]
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl FinancialTerm {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            FinancialTerm::Monthly => 12,
            FinancialTerm::Quarterly => 4,
            FinancialTerm::SemiAnnually => 2,
            FinancialTerm::Annually => 1,
        }
    }
}

/// Number of payments over the life of a loan.
pub fn loan_payment_count(years: u32, term: FinancialTerm) -> u32 {
    years * term.periods_per_year()
}

/// Amortised payment per period, rounded up to the next C-bill.
pub fn loan_payment(principal: i64, rate_percent: u32, years: u32, term: FinancialTerm) -> i64 {
    let n = loan_payment_count(years, term);
    if principal <= 0 || n == 0 {
        return 0;
    }
    let r = rate_percent as f64 / 100.0 / term.periods_per_year() as f64;
    if r == 0.0 {
        return (principal as f64 / n as f64).ceil() as i64;
    }
    let payment = principal as f64 * r / (1.0 - (1.0 + r).powi(-(n as i32)));
    payment.ceil() as i64
}
