use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Breakdown of an individual income-tax computation.
///
/// Invariants, maintained by the worksheet that builds this:
/// `total_tax = base_tax + cess`, `net_income = gross_income - total_tax`,
/// `taxable_income = max(0, gross_income - total_deductions)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub base_tax: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub net_income: Decimal,
}

/// Breakdown of a flat-rate business tax computation. Carries the applied
/// rate so callers can render it alongside the figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessAssessment {
    pub gross_income: Decimal,
    pub deductions: Decimal,
    pub taxable_income: Decimal,
    pub rate_percent: Decimal,
    pub base_tax: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub net_income: Decimal,
}
