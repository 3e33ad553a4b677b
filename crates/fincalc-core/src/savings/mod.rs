pub mod deposits;
pub mod interest;
pub mod nps;
pub mod sip;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{summarize_by_year, ScheduleRow};
use crate::types::Money;

/// Year-wise view of an accumulating investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentYear {
    /// Year number, or the investor's age for age-labelled plans.
    pub year: i32,
    pub invested: Money,
    pub total_invested: Money,
    pub growth: Money,
    pub balance: Money,
    pub total_gain: Money,
}

/// Roll an accumulation schedule into years, labelling them from `first_label`.
pub(crate) fn investment_years(
    schedule: &[ScheduleRow],
    periods_per_year: u32,
    first_label: i32,
) -> Vec<InvestmentYear> {
    let mut total_invested = Decimal::ZERO;
    summarize_by_year(schedule, periods_per_year)
        .into_iter()
        .map(|y| {
            total_invested += y.principal_component;
            InvestmentYear {
                year: first_label.saturating_add(y.year - 1),
                invested: y.principal_component,
                total_invested,
                growth: y.interest_component,
                balance: y.ending_balance,
                total_gain: y.ending_balance - total_invested,
            }
        })
        .collect()
}
