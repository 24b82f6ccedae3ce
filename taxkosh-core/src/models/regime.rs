use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::category::{AgeCategory, BusinessType};
use super::slab::{Slab, SlabSchedule};

/// Errors raised when regime-level constants are out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRegimeError {
    #[error("cess rate must be between 0 and 100, got {0}")]
    InvalidCessRate(Decimal),

    #[error("standard deduction must be non-negative, got {0}")]
    NegativeStandardDeduction(Decimal),

    #[error("flat rate for {kind} must be between 0 and 100, got {rate}")]
    InvalidBusinessRate { kind: &'static str, rate: Decimal },
}

/// Flat rates applied to business taxable income, by legal form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessRates {
    pub domestic_company: Decimal,
    pub foreign_company: Decimal,
    pub partnership: Decimal,
    pub llp: Decimal,
    pub sole_proprietorship: Decimal,
}

impl BusinessRates {
    pub fn rate_for(&self, kind: BusinessType) -> Decimal {
        match kind {
            BusinessType::DomesticCompany => self.domestic_company,
            BusinessType::ForeignCompany => self.foreign_company,
            BusinessType::Partnership => self.partnership,
            BusinessType::Llp => self.llp,
            BusinessType::SoleProprietorship => self.sole_proprietorship,
        }
    }
}

/// All fiscal-year constants in one place: cess rate, standard deduction,
/// the slab schedule for each individual age category, and the flat rates
/// for each business form.
///
/// Engines take their parameters from a regime value rather than carrying
/// year-specific literals, so a new fiscal year is a new `TaxRegime`, not
/// an engine change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxRegime {
    pub fiscal_year: String,
    pub cess_rate_percent: Decimal,
    pub standard_deduction: Decimal,
    pub below_sixty: SlabSchedule,
    pub senior: SlabSchedule,
    pub super_senior: SlabSchedule,
    pub business_rates: BusinessRates,
}

impl TaxRegime {
    /// The built-in regime for FY 2024-25 (AY 2025-26).
    pub fn fy_2024_25() -> Self {
        let d = Decimal::from;
        let below_sixty = SlabSchedule::new(vec![
            Slab::new(d(0), Some(d(250_000)), d(0)),
            Slab::new(d(250_000), Some(d(500_000)), d(5)),
            Slab::new(d(500_000), Some(d(1_000_000)), d(20)),
            Slab::new(d(1_000_000), None, d(30)),
        ]);
        let senior = SlabSchedule::new(vec![
            Slab::new(d(0), Some(d(300_000)), d(0)),
            Slab::new(d(300_000), Some(d(500_000)), d(5)),
            Slab::new(d(500_000), Some(d(1_000_000)), d(20)),
            Slab::new(d(1_000_000), None, d(30)),
        ]);
        let super_senior = SlabSchedule::new(vec![
            Slab::new(d(0), Some(d(500_000)), d(0)),
            Slab::new(d(500_000), Some(d(1_000_000)), d(20)),
            Slab::new(d(1_000_000), None, d(30)),
        ]);

        Self {
            fiscal_year: "2024-25".to_string(),
            cess_rate_percent: d(4),
            standard_deduction: d(50_000),
            below_sixty: below_sixty.expect("built-in below-60 schedule is well-formed"),
            senior: senior.expect("built-in senior schedule is well-formed"),
            super_senior: super_senior.expect("built-in super-senior schedule is well-formed"),
            business_rates: BusinessRates {
                domestic_company: d(30),
                foreign_company: d(40),
                partnership: d(30),
                llp: d(30),
                sole_proprietorship: d(30),
            },
        }
    }

    pub fn schedule_for(&self, category: AgeCategory) -> &SlabSchedule {
        match category {
            AgeCategory::BelowSixty => &self.below_sixty,
            AgeCategory::Senior => &self.senior,
            AgeCategory::SuperSenior => &self.super_senior,
        }
    }

    /// Checks the regime-level constants. Slab schedules are already
    /// validated by construction.
    pub fn validate(&self) -> Result<(), TaxRegimeError> {
        if self.cess_rate_percent < Decimal::ZERO || self.cess_rate_percent > Decimal::ONE_HUNDRED {
            return Err(TaxRegimeError::InvalidCessRate(self.cess_rate_percent));
        }
        if self.standard_deduction < Decimal::ZERO {
            return Err(TaxRegimeError::NegativeStandardDeduction(
                self.standard_deduction,
            ));
        }
        for kind in BusinessType::ALL {
            let rate = self.business_rates.rate_for(kind);
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(TaxRegimeError::InvalidBusinessRate {
                    kind: kind.as_str(),
                    rate,
                });
            }
        }
        Ok(())
    }
}
