//! Advance-tax installment schedule.
//!
//! Taxpayers whose liability exceeds the statutory floor pay the year's
//! estimated tax in four installments, due June 15, September 15 and
//! December 15 of the fiscal year and March 15 of the following calendar
//! year. The estimate is split into equal quarters; each quarter is
//! floored to the paise and the final installment absorbs the remainder,
//! so the schedule always sums exactly to the estimated liability.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::models::TaxRegime;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvanceTaxError {
    /// Fiscal years are written `YYYY-YY`, e.g. `2024-25`.
    #[error("'{0}' is not a fiscal year of the form YYYY-YY")]
    InvalidFiscalYear(String),

    #[error("estimated tax must be non-negative, got {0}")]
    NegativeTax(Decimal),
}

/// One quarterly installment of the advance-tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceTaxInstallment {
    pub label: String,
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

/// Builds installment schedules for one fiscal year.
#[derive(Debug, Clone)]
pub struct AdvanceTaxWorksheet {
    start_year: i32,
}

impl AdvanceTaxWorksheet {
    /// Parses a `YYYY-YY` fiscal year such as `2024-25`. The second
    /// component must be the following calendar year.
    pub fn new(fiscal_year: &str) -> Result<Self, AdvanceTaxError> {
        let invalid = || AdvanceTaxError::InvalidFiscalYear(fiscal_year.to_string());

        let (start, end) = fiscal_year.split_once('-').ok_or_else(invalid)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(invalid());
        }
        let start_year: i32 = start.parse().map_err(|_| invalid())?;
        let end_year: i32 = end.parse().map_err(|_| invalid())?;
        if (start_year + 1).rem_euclid(100) != end_year {
            return Err(invalid());
        }

        Ok(Self { start_year })
    }

    pub fn for_regime(regime: &TaxRegime) -> Result<Self, AdvanceTaxError> {
        Self::new(&regime.fiscal_year)
    }

    /// Splits an estimated annual liability into the four statutory
    /// installments.
    ///
    /// # Errors
    ///
    /// Returns [`AdvanceTaxError::NegativeTax`] for a negative estimate.
    pub fn schedule(
        &self,
        estimated_tax: Decimal,
    ) -> Result<Vec<AdvanceTaxInstallment>, AdvanceTaxError> {
        if estimated_tax < Decimal::ZERO {
            return Err(AdvanceTaxError::NegativeTax(estimated_tax));
        }
        let estimated_tax = round_half_up(estimated_tax);

        // Floor the quarter to the paise; Q4 picks up the remainder.
        let quarter = (estimated_tax / Decimal::from(4))
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::ToNegativeInfinity);
        let last = estimated_tax - quarter * Decimal::from(3);

        let due = |month: u32, day: u32, year: i32| {
            NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| AdvanceTaxError::InvalidFiscalYear(self.start_year.to_string()))
        };

        Ok(vec![
            AdvanceTaxInstallment {
                label: "Q1 (June 15)".to_string(),
                due_date: due(6, 15, self.start_year)?,
                amount: quarter,
            },
            AdvanceTaxInstallment {
                label: "Q2 (Sept 15)".to_string(),
                due_date: due(9, 15, self.start_year)?,
                amount: quarter,
            },
            AdvanceTaxInstallment {
                label: "Q3 (Dec 15)".to_string(),
                due_date: due(12, 15, self.start_year)?,
                amount: quarter,
            },
            AdvanceTaxInstallment {
                label: "Q4 (March 15)".to_string(),
                due_date: due(3, 15, self.start_year + 1)?,
                amount: last,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_well_formed_fiscal_year() {
        assert!(AdvanceTaxWorksheet::new("2024-25").is_ok());
    }

    #[test]
    fn rejects_mismatched_fiscal_year() {
        let result = AdvanceTaxWorksheet::new("2024-26");

        assert_eq!(
            result.err(),
            Some(AdvanceTaxError::InvalidFiscalYear("2024-26".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_fiscal_year() {
        for s in ["2024", "24-25", "2024/25", "abcd-ef"] {
            assert!(AdvanceTaxWorksheet::new(s).is_err(), "accepted '{s}'");
        }
    }

    #[test]
    fn century_rollover_fiscal_year_is_accepted() {
        assert!(AdvanceTaxWorksheet::new("2099-00").is_ok());
    }

    #[test]
    fn schedule_has_statutory_due_dates() {
        let worksheet = AdvanceTaxWorksheet::new("2024-25").unwrap();

        let schedule = worksheet.schedule(dec!(200000)).unwrap();

        let dates: Vec<NaiveDate> = schedule.iter().map(|i| i.due_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            ]
        );
    }

    #[test]
    fn even_liability_splits_into_equal_quarters() {
        let worksheet = AdvanceTaxWorksheet::new("2024-25").unwrap();

        let schedule = worksheet.schedule(dec!(200000)).unwrap();

        for installment in &schedule {
            assert_eq!(installment.amount, dec!(50000));
        }
    }

    #[test]
    fn final_installment_absorbs_the_rounding_remainder() {
        let worksheet = AdvanceTaxWorksheet::new("2024-25").unwrap();

        let schedule = worksheet.schedule(dec!(100.01)).unwrap();

        assert_eq!(schedule[0].amount, dec!(25.00));
        assert_eq!(schedule[3].amount, dec!(25.01));
        let total: Decimal = schedule.iter().map(|i| i.amount).sum();
        assert_eq!(total, dec!(100.01));
    }

    #[test]
    fn tiny_liability_lands_entirely_in_the_final_installment() {
        let worksheet = AdvanceTaxWorksheet::new("2024-25").unwrap();

        let schedule = worksheet.schedule(dec!(0.02)).unwrap();

        assert_eq!(schedule[0].amount, dec!(0));
        assert_eq!(schedule[3].amount, dec!(0.02));
    }

    #[test]
    fn zero_liability_yields_zero_installments() {
        let worksheet = AdvanceTaxWorksheet::new("2024-25").unwrap();

        let schedule = worksheet.schedule(dec!(0)).unwrap();

        let total: Decimal = schedule.iter().map(|i| i.amount).sum();
        assert_eq!(total, dec!(0));
    }

    #[test]
    fn rejects_negative_liability() {
        let worksheet = AdvanceTaxWorksheet::new("2024-25").unwrap();

        let result = worksheet.schedule(dec!(-1));

        assert_eq!(result, Err(AdvanceTaxError::NegativeTax(dec!(-1))));
    }
}
