use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid GSTIN")]
pub struct GstinError(String);

fn gstin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$")
            .expect("GSTIN pattern is a valid regex")
    })
}

/// A validated 15-character GST identification number
/// (state code, PAN, entity code, `Z`, check character).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gstin(String);

impl Gstin {
    pub fn parse(s: &str) -> Result<Self, GstinError> {
        let candidate = s.trim().to_uppercase();
        if gstin_pattern().is_match(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(GstinError(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxType {
    Gst,
    PropertyTax,
    LocalTax,
    IncomeTax,
}

impl TaxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gst => "GST",
            Self::PropertyTax => "Property Tax",
            Self::LocalTax => "Local Tax",
            Self::IncomeTax => "Income Tax",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GST" => Some(Self::Gst),
            "Property Tax" => Some(Self::PropertyTax),
            "Local Tax" => Some(Self::LocalTax),
            "Income Tax" => Some(Self::IncomeTax),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxpayerStatus {
    Active,
    Inactive,
}

impl TaxpayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// A registered taxpayer as tracked by the collection portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxpayer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gstin: Gstin,
    pub tax_type: TaxType,
    pub total_due: Decimal,
    pub last_payment: Option<NaiveDate>,
    pub status: TaxpayerStatus,
}

/// For registering new taxpayers (no id yet; GSTIN still unvalidated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaxpayer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gstin: String,
    pub tax_type: TaxType,
    pub total_due: Decimal,
    pub last_payment: Option<NaiveDate>,
}
