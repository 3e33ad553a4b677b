use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::ScheduleRow;
use crate::error::FinCalcError;
use crate::types::Money;
use crate::FinCalcResult;

/// A contiguous run of schedule rows rolled up into one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummaryRow {
    /// Year number (1-based) or the calendar year for dated schedules.
    pub year: i32,
    pub periods: u32,
    pub payment_total: Money,
    /// Principal paid (loans) or amount invested (accumulations).
    pub principal_component: Money,
    /// Interest paid (loans) or growth earned (investments).
    pub interest_component: Money,
    pub ending_balance: Money,
}

fn roll_up(year: i32, rows: &[ScheduleRow]) -> YearlySummaryRow {
    let mut summary = YearlySummaryRow {
        year,
        periods: rows.len() as u32,
        payment_total: Decimal::ZERO,
        principal_component: Decimal::ZERO,
        interest_component: Decimal::ZERO,
        ending_balance: Decimal::ZERO,
    };
    for row in rows {
        summary.payment_total += row.payment;
        summary.principal_component += row.principal_component;
        summary.interest_component += row.interest_component;
    }
    if let Some(last) = rows.last() {
        summary.ending_balance = last.ending_balance;
    }
    summary
}

/// Group every `periods_per_year` consecutive rows into a year; the final
/// year may be partial. A frequency of zero is treated as one period a year.
pub fn summarize_by_year(schedule: &[ScheduleRow], periods_per_year: u32) -> Vec<YearlySummaryRow> {
    let chunk = periods_per_year.max(1) as usize;
    schedule
        .chunks(chunk)
        .enumerate()
        .map(|(i, rows)| roll_up(i as i32 + 1, rows))
        .collect()
}

/// Group dated rows by the calendar year of their due date.
pub fn summarize_by_calendar_year(schedule: &[ScheduleRow]) -> FinCalcResult<Vec<YearlySummaryRow>> {
    let mut out: Vec<YearlySummaryRow> = Vec::new();
    let mut start = 0;

    while start < schedule.len() {
        let year = schedule[start]
            .due_date
            .ok_or_else(|| {
                FinCalcError::invalid("schedule", "Calendar-year summary needs dated rows")
            })?
            .year();
        let mut end = start + 1;
        while end < schedule.len() {
            match schedule[end].due_date {
                Some(d) if d.year() == year => end += 1,
                Some(_) => break,
                None => {
                    return Err(FinCalcError::invalid(
                        "schedule",
                        "Calendar-year summary needs dated rows",
                    ))
                }
            }
        }
        out.push(roll_up(year, &schedule[start..end]));
        start = end;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn row(period: u32, principal: Decimal, interest: Decimal, balance: Decimal) -> ScheduleRow {
        ScheduleRow {
            period,
            due_date: None,
            payment: principal + interest,
            principal_component: principal,
            interest_component: interest,
            ending_balance: balance,
        }
    }

    #[test]
    fn test_partial_final_year() {
        let rows: Vec<ScheduleRow> = (1..=14)
            .map(|p| row(p, dec!(10), dec!(1), Decimal::from(140 - 10 * p)))
            .collect();
        let years = summarize_by_year(&rows, 12);
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].periods, 12);
        assert_eq!(years[0].principal_component, dec!(120));
        assert_eq!(years[0].interest_component, dec!(12));
        assert_eq!(years[0].payment_total, dec!(132));
        assert_eq!(years[0].ending_balance, dec!(20));
        assert_eq!(years[1].periods, 2);
        assert_eq!(years[1].year, 2);
        assert_eq!(years[1].ending_balance, Decimal::ZERO);
    }

    #[test]
    fn test_empty_schedule() {
        assert!(summarize_by_year(&[], 12).is_empty());
    }

    #[test]
    fn test_calendar_year_grouping() {
        let mut rows: Vec<ScheduleRow> = (1..=4)
            .map(|p| row(p, dec!(5), dec!(1), dec!(100)))
            .collect();
        let start = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        super::super::schedule::assign_due_dates(&mut rows, start, 12);
        let years = summarize_by_calendar_year(&rows).unwrap();
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2024);
        assert_eq!(years[0].periods, 2);
        assert_eq!(years[1].year, 2025);
        assert_eq!(years[1].periods, 2);
    }

    #[test]
    fn test_calendar_year_requires_dates() {
        let rows = vec![row(1, dec!(5), dec!(1), dec!(100))];
        assert!(summarize_by_calendar_year(&rows).is_err());
    }
}
