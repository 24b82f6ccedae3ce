//! Individual income-tax worksheet for the Indian slab regime.
//!
//! Implements the assessment pipeline for individual taxpayers: itemized
//! deductions plus the standard deduction, the taxable-income floor, the
//! progressive slab computation, and the health-and-education cess.
//!
//! # Worksheet Structure
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Gross annual income |
//! | 2a   | Section 80C investments (PPF, ELSS, life insurance, ...) |
//! | 2b   | Section 80D health insurance premium |
//! | 2c   | HRA exemption |
//! | 2d   | Other deductions (80G, 80E, ...) |
//! | 2e   | Standard deduction (from the regime) |
//! | 3    | Total deductions (2a + 2b + 2c + 2d + 2e) |
//! | 4    | Taxable income (Line 1 - Line 3, minimum 0) |
//! | 5    | Tax on Line 4 per the age category's slab schedule |
//! | 6    | Health and education cess (Line 5 × cess rate) |
//! | 7    | Total tax (Line 5 + Line 6) |
//! | 8    | Net income after tax (Line 1 - Line 7) |
//!
//! The slab computation walks the schedule in ascending order, taxing each
//! band's span at its marginal rate until the taxable income is consumed.
//! Income exactly on a slab boundary is taxed in the lower slab.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxkosh_core::AgeCategory;
//! use taxkosh_core::TaxRegime;
//! use taxkosh_core::calculations::{IndividualWorksheet, IndividualWorksheetInput};
//!
//! let regime = TaxRegime::fy_2024_25();
//! let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);
//!
//! let input = IndividualWorksheetInput {
//!     gross_income: dec!(1000000),
//!     section_80c: dec!(150000),
//!     section_80d: dec!(25000),
//!     hra_exemption: dec!(0),
//!     other_deductions: dec!(0),
//! };
//!
//! let assessment = worksheet.calculate(&input).unwrap();
//! assert_eq!(assessment.total_tax, dec!(70200.00));
//! assert_eq!(assessment.net_income, dec!(929800.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{cess_on, clamp_non_negative, round_half_up};
use crate::models::{AgeCategory, SlabSchedule, TaxAssessment, TaxRegime};

/// Errors that can occur during individual worksheet calculations.
///
/// Negative inputs are rejected outright: summing a negative deduction
/// would silently inflate taxable income.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndividualWorksheetError {
    #[error("gross income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("{field} must be non-negative, got {value}")]
    NegativeDeduction { field: &'static str, value: Decimal },
}

/// Input values for an individual assessment, as entered on the
/// calculator form. Absent fields default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualWorksheetInput {
    /// Gross annual income.
    pub gross_income: Decimal,

    /// Section 80C investments (capped by law at 150,000; the cap is the
    /// form's concern, not the worksheet's).
    pub section_80c: Decimal,

    /// Section 80D health insurance premium.
    pub section_80d: Decimal,

    /// House rent allowance exemption.
    pub hra_exemption: Decimal,

    /// Other deductions (Section 80G, 80E, etc.).
    pub other_deductions: Decimal,
}

/// Calculator for individual assessments.
///
/// Borrows the slab schedule for one age category and carries the
/// regime-level constants it needs (cess rate and standard deduction).
#[derive(Debug, Clone)]
pub struct IndividualWorksheet<'a> {
    schedule: &'a SlabSchedule,
    cess_rate_percent: Decimal,
    standard_deduction: Decimal,
}

impl<'a> IndividualWorksheet<'a> {
    pub fn new(
        schedule: &'a SlabSchedule,
        cess_rate_percent: Decimal,
        standard_deduction: Decimal,
    ) -> Self {
        Self {
            schedule,
            cess_rate_percent,
            standard_deduction,
        }
    }

    /// Convenience constructor wiring the worksheet to a regime and age
    /// category.
    pub fn for_regime(
        regime: &'a TaxRegime,
        category: AgeCategory,
    ) -> Self {
        Self::new(
            regime.schedule_for(category),
            regime.cess_rate_percent,
            regime.standard_deduction,
        )
    }

    /// Calculates the complete assessment for one set of inputs.
    ///
    /// Deterministic and side-effect free: identical inputs always yield
    /// identical assessments.
    ///
    /// # Errors
    ///
    /// Returns [`IndividualWorksheetError`] if the gross income or any
    /// deduction field is negative.
    pub fn calculate(
        &self,
        input: &IndividualWorksheetInput,
    ) -> Result<TaxAssessment, IndividualWorksheetError> {
        self.validate(input)?;

        let total_deductions = self.total_deductions(input);
        let taxable_income = self.taxable_income(input.gross_income, total_deductions);
        let base_tax = self.slab_tax(taxable_income);
        let cess = cess_on(base_tax, self.cess_rate_percent);
        let total_tax = round_half_up(base_tax + cess);
        let net_income = round_half_up(input.gross_income - total_tax);

        debug!(
            %taxable_income,
            %base_tax,
            %cess,
            "individual assessment computed"
        );

        Ok(TaxAssessment {
            gross_income: input.gross_income,
            total_deductions,
            taxable_income,
            base_tax,
            cess,
            total_tax,
            net_income,
        })
    }

    fn validate(
        &self,
        input: &IndividualWorksheetInput,
    ) -> Result<(), IndividualWorksheetError> {
        if input.gross_income < Decimal::ZERO {
            return Err(IndividualWorksheetError::NegativeIncome(input.gross_income));
        }
        for (field, value) in [
            ("section 80C deduction", input.section_80c),
            ("section 80D deduction", input.section_80d),
            ("HRA exemption", input.hra_exemption),
            ("other deductions", input.other_deductions),
        ] {
            if value < Decimal::ZERO {
                return Err(IndividualWorksheetError::NegativeDeduction { field, value });
            }
        }
        Ok(())
    }

    /// Sums the itemized deduction fields and the standard deduction.
    fn total_deductions(
        &self,
        input: &IndividualWorksheetInput,
    ) -> Decimal {
        round_half_up(
            input.section_80c
                + input.section_80d
                + input.hra_exemption
                + input.other_deductions
                + self.standard_deduction,
        )
    }

    /// Gross income less deductions, floored at zero.
    fn taxable_income(
        &self,
        gross_income: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        clamp_non_negative(round_half_up(gross_income - total_deductions))
    }

    /// Marginal-rate tax across the slab schedule.
    ///
    /// Walks the slabs in ascending order, taxing each band's span at its
    /// rate until the taxable income is consumed. The unbounded final
    /// slab absorbs whatever remains.
    fn slab_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut remaining = taxable_income;
        let mut tax = Decimal::ZERO;
        for slab in self.schedule.slabs() {
            if remaining <= Decimal::ZERO {
                break;
            }
            let span = match slab.upper_bound {
                Some(upper) => remaining.min(upper - slab.lower_bound),
                None => remaining,
            };
            tax += span * slab.rate_percent / Decimal::ONE_HUNDRED;
            remaining -= span;
        }

        round_half_up(tax)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Slab, TaxRegime};

    fn regime() -> TaxRegime {
        TaxRegime::fy_2024_25()
    }

    fn input(gross_income: Decimal) -> IndividualWorksheetInput {
        IndividualWorksheetInput {
            gross_income,
            ..Default::default()
        }
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn rejects_negative_income() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        let result = worksheet.calculate(&input(dec!(-1)));

        assert_eq!(
            result,
            Err(IndividualWorksheetError::NegativeIncome(dec!(-1)))
        );
    }

    #[test]
    fn rejects_negative_deduction_field() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);
        let input = IndividualWorksheetInput {
            gross_income: dec!(1000000),
            other_deductions: dec!(-5000),
            ..Default::default()
        };

        let result = worksheet.calculate(&input);

        assert_eq!(
            result,
            Err(IndividualWorksheetError::NegativeDeduction {
                field: "other deductions",
                value: dec!(-5000),
            })
        );
    }

    // =========================================================================
    // deduction aggregation tests
    // =========================================================================

    #[test]
    fn total_deductions_includes_standard_deduction() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);
        let input = IndividualWorksheetInput {
            gross_income: dec!(1000000),
            section_80c: dec!(150000),
            section_80d: dec!(25000),
            hra_exemption: dec!(10000),
            other_deductions: dec!(5000),
        };

        assert_eq!(worksheet.total_deductions(&input), dec!(240000));
    }

    #[test]
    fn zero_itemized_deductions_leave_only_the_standard_deduction() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        assert_eq!(worksheet.total_deductions(&input(dec!(800000))), dec!(50000));
    }

    // =========================================================================
    // taxable income tests
    // =========================================================================

    #[test]
    fn taxable_income_is_floored_at_zero() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        assert_eq!(worksheet.taxable_income(dec!(30000), dec!(50000)), dec!(0));
    }

    // =========================================================================
    // slab engine tests
    // =========================================================================

    #[test]
    fn slab_tax_is_zero_for_zero_income() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        assert_eq!(worksheet.slab_tax(dec!(0)), dec!(0));
    }

    #[test]
    fn slab_tax_within_exempt_band_is_zero() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        assert_eq!(worksheet.slab_tax(dec!(250000)), dec!(0));
    }

    #[test]
    fn slab_boundary_income_is_taxed_in_the_lower_slab() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        // 500000 exactly: 250000 @ 0% + 250000 @ 5%; no part at 20%.
        assert_eq!(worksheet.slab_tax(dec!(500000)), dec!(12500));
        // One rupee above the boundary picks up the 20% rate.
        assert_eq!(worksheet.slab_tax(dec!(500001)), dec!(12500.20));
    }

    #[test]
    fn slab_tax_spans_multiple_bands() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        // 775000: 0 + 250000 * 5% + 275000 * 20% = 12500 + 55000
        assert_eq!(worksheet.slab_tax(dec!(775000)), dec!(67500));
    }

    #[test]
    fn unbounded_final_slab_has_no_cap() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        // 5000000: 0 + 12500 + 100000 + 4000000 * 30%
        assert_eq!(worksheet.slab_tax(dec!(5000000)), dec!(1312500));
    }

    #[test]
    fn slab_tax_matches_naive_per_band_reference() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        // Reference: sum (min(income, upper) - lower) * rate over bands
        // the income reaches, computed independently of the engine's
        // remaining-income walk.
        let naive = |income: Decimal| -> Decimal {
            let mut tax = Decimal::ZERO;
            for slab in regime.below_sixty.slabs() {
                if income <= slab.lower_bound {
                    break;
                }
                let top = match slab.upper_bound {
                    Some(upper) => income.min(upper),
                    None => income,
                };
                tax += (top - slab.lower_bound) * slab.rate_percent / Decimal::ONE_HUNDRED;
            }
            round_half_up(tax)
        };

        for income in [
            dec!(0),
            dec!(1),
            dec!(249999.99),
            dec!(250000),
            dec!(250000.01),
            dec!(400000),
            dec!(500000),
            dec!(775000),
            dec!(1000000),
            dec!(1000000.01),
            dec!(2500000),
        ] {
            assert_eq!(worksheet.slab_tax(income), naive(income));
        }
    }

    #[test]
    fn slab_tax_is_monotonic_in_income() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);

        let incomes = [
            dec!(0),
            dec!(100000),
            dec!(250000),
            dec!(250001),
            dec!(499999),
            dec!(500000),
            dec!(999999),
            dec!(1000000),
            dec!(1500000),
        ];
        let mut previous = Decimal::ZERO;
        for income in incomes {
            let tax = worksheet.slab_tax(income);
            assert!(tax >= previous, "tax decreased at income {income}");
            previous = tax;
        }
    }

    // =========================================================================
    // full assessment tests
    // =========================================================================

    #[test]
    fn assessment_for_ten_lakh_below_sixty() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);
        let input = IndividualWorksheetInput {
            gross_income: dec!(1000000),
            section_80c: dec!(150000),
            section_80d: dec!(25000),
            hra_exemption: dec!(0),
            other_deductions: dec!(0),
        };

        let assessment = worksheet.calculate(&input).unwrap();

        assert_eq!(assessment.gross_income, dec!(1000000));
        assert_eq!(assessment.total_deductions, dec!(225000));
        assert_eq!(assessment.taxable_income, dec!(775000));
        assert_eq!(assessment.base_tax, dec!(67500));
        assert_eq!(assessment.cess, dec!(2700));
        assert_eq!(assessment.total_tax, dec!(70200));
        assert_eq!(assessment.net_income, dec!(929800));
    }

    #[test]
    fn assessment_upholds_result_invariants() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::Senior);
        let input = IndividualWorksheetInput {
            gross_income: dec!(1234567.89),
            section_80c: dec!(100000),
            section_80d: dec!(30000),
            hra_exemption: dec!(120000),
            other_deductions: dec!(7500),
        };

        let assessment = worksheet.calculate(&input).unwrap();

        assert_eq!(
            assessment.total_tax,
            assessment.base_tax + assessment.cess
        );
        assert_eq!(
            assessment.net_income,
            assessment.gross_income - assessment.total_tax
        );
        assert_eq!(
            assessment.taxable_income,
            assessment.gross_income - assessment.total_deductions
        );
    }

    #[test]
    fn assessment_is_idempotent() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::SuperSenior);
        let input = IndividualWorksheetInput {
            gross_income: dec!(1750000),
            section_80c: dec!(150000),
            ..Default::default()
        };

        let first = worksheet.calculate(&input).unwrap();
        let second = worksheet.calculate(&input).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn senior_schedule_has_higher_exemption_than_below_sixty() {
        let regime = regime();
        let below = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);
        let senior = IndividualWorksheet::for_regime(&regime, AgeCategory::Senior);
        let input = input(dec!(400000));

        let below_tax = below.calculate(&input).unwrap().total_tax;
        let senior_tax = senior.calculate(&input).unwrap().total_tax;

        assert!(senior_tax < below_tax);
    }

    #[test]
    fn super_senior_pays_nothing_up_to_five_lakh_taxable() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::SuperSenior);

        // 550000 gross - 50000 standard deduction = 500000 taxable, all
        // within the exempt band.
        let assessment = worksheet.calculate(&input(dec!(550000))).unwrap();

        assert_eq!(assessment.total_tax, dec!(0));
        assert_eq!(assessment.net_income, dec!(550000));
    }

    #[test]
    fn deductions_exceeding_income_produce_zero_tax() {
        let regime = regime();
        let worksheet = IndividualWorksheet::for_regime(&regime, AgeCategory::BelowSixty);
        let input = IndividualWorksheetInput {
            gross_income: dec!(180000),
            section_80c: dec!(150000),
            section_80d: dec!(25000),
            hra_exemption: dec!(50000),
            other_deductions: dec!(0),
        };

        let assessment = worksheet.calculate(&input).unwrap();

        assert_eq!(assessment.taxable_income, dec!(0));
        assert_eq!(assessment.total_tax, dec!(0));
        assert_eq!(assessment.net_income, dec!(180000));
    }

    #[test]
    fn custom_schedule_and_cess_rate_are_honored() {
        let schedule = SlabSchedule::new(vec![
            Slab::new(dec!(0), Some(dec!(100000)), dec!(0)),
            Slab::new(dec!(100000), None, dec!(10)),
        ])
        .unwrap();
        let worksheet = IndividualWorksheet::new(&schedule, dec!(2), dec!(0));

        let assessment = worksheet.calculate(&input(dec!(200000))).unwrap();

        assert_eq!(assessment.base_tax, dec!(10000));
        assert_eq!(assessment.cess, dec!(200));
        assert_eq!(assessment.total_tax, dec!(10200));
    }
}
