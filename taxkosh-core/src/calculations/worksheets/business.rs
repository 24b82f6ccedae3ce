//! Business income-tax worksheet.
//!
//! Businesses are taxed at a flat rate by legal form rather than through
//! slabs, which makes this the single-band case of the individual
//! worksheet: one aggregate deduction figure, no standard deduction, one
//! multiplication, then cess.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxkosh_core::BusinessType;
//! use taxkosh_core::TaxRegime;
//! use taxkosh_core::calculations::{BusinessWorksheet, BusinessWorksheetInput};
//!
//! let regime = TaxRegime::fy_2024_25();
//! let worksheet = BusinessWorksheet::for_regime(&regime, BusinessType::DomesticCompany);
//!
//! let input = BusinessWorksheetInput {
//!     gross_income: dec!(5000000),
//!     deductions: dec!(500000),
//! };
//!
//! let assessment = worksheet.calculate(&input).unwrap();
//! assert_eq!(assessment.total_tax, dec!(1404000.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{cess_on, clamp_non_negative, round_half_up};
use crate::models::{BusinessAssessment, BusinessType, TaxRegime};

/// Errors that can occur during business worksheet calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessWorksheetError {
    #[error("gross income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("deductions must be non-negative, got {0}")]
    NegativeDeductions(Decimal),
}

/// Input values for a business assessment: gross income and a single
/// aggregate deduction figure (expenses, depreciation, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessWorksheetInput {
    pub gross_income: Decimal,
    pub deductions: Decimal,
}

/// Calculator for flat-rate business assessments.
#[derive(Debug, Clone)]
pub struct BusinessWorksheet {
    rate_percent: Decimal,
    cess_rate_percent: Decimal,
}

impl BusinessWorksheet {
    pub fn new(
        rate_percent: Decimal,
        cess_rate_percent: Decimal,
    ) -> Self {
        Self {
            rate_percent,
            cess_rate_percent,
        }
    }

    /// Convenience constructor taking the flat rate for `kind` from the
    /// regime.
    pub fn for_regime(
        regime: &TaxRegime,
        kind: BusinessType,
    ) -> Self {
        Self::new(
            regime.business_rates.rate_for(kind),
            regime.cess_rate_percent,
        )
    }

    /// Calculates the complete assessment for one set of inputs.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessWorksheetError`] if the gross income or the
    /// deduction figure is negative.
    pub fn calculate(
        &self,
        input: &BusinessWorksheetInput,
    ) -> Result<BusinessAssessment, BusinessWorksheetError> {
        if input.gross_income < Decimal::ZERO {
            return Err(BusinessWorksheetError::NegativeIncome(input.gross_income));
        }
        if input.deductions < Decimal::ZERO {
            return Err(BusinessWorksheetError::NegativeDeductions(input.deductions));
        }

        let taxable_income =
            clamp_non_negative(round_half_up(input.gross_income - input.deductions));
        let base_tax = round_half_up(taxable_income * self.rate_percent / Decimal::ONE_HUNDRED);
        let cess = cess_on(base_tax, self.cess_rate_percent);
        let total_tax = round_half_up(base_tax + cess);
        let net_income = round_half_up(input.gross_income - total_tax);

        debug!(%taxable_income, %base_tax, %cess, "business assessment computed");

        Ok(BusinessAssessment {
            gross_income: input.gross_income,
            deductions: input.deductions,
            taxable_income,
            rate_percent: self.rate_percent,
            base_tax,
            cess,
            total_tax,
            net_income,
        })
    }
}
