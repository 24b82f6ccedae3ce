//! In-memory taxpayer registry.
//!
//! The portal tracks taxpayers without a persistence layer; this module
//! provides the CRUD surface over an in-process store. Each record gets a
//! sequential id, GSTINs are validated on entry and must be unique.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::models::{Gstin, GstinError, NewTaxpayer, TaxType, Taxpayer, TaxpayerStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("taxpayer {0} not found")]
    NotFound(i64),

    #[error("GSTIN {0} is already registered")]
    DuplicateGstin(String),

    #[error(transparent)]
    InvalidGstin(#[from] GstinError),
}

/// Sequentially-id'd in-memory store of taxpayer records.
#[derive(Debug, Default)]
pub struct TaxpayerRegistry {
    taxpayers: BTreeMap<i64, Taxpayer>,
    next_id: i64,
}

impl TaxpayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the demo records.
    pub fn with_sample_data() -> Self {
        let mut registry = Self::new();
        for taxpayer in sample_taxpayers() {
            registry
                .create(taxpayer)
                .expect("sample records are valid and distinct");
        }
        registry
    }

    /// Registers a new taxpayer, validating the GSTIN and rejecting
    /// duplicates. New records start out `Active`.
    pub fn create(
        &mut self,
        new: NewTaxpayer,
    ) -> Result<Taxpayer, RegistryError> {
        let gstin = Gstin::parse(&new.gstin)?;
        if self.taxpayers.values().any(|t| t.gstin == gstin) {
            return Err(RegistryError::DuplicateGstin(gstin.as_str().to_string()));
        }

        self.next_id += 1;
        let taxpayer = Taxpayer {
            id: self.next_id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            gstin,
            tax_type: new.tax_type,
            total_due: new.total_due,
            last_payment: new.last_payment,
            status: TaxpayerStatus::Active,
        };
        info!(id = taxpayer.id, name = %taxpayer.name, "taxpayer registered");
        self.taxpayers.insert(taxpayer.id, taxpayer.clone());
        Ok(taxpayer)
    }

    pub fn get(
        &self,
        id: i64,
    ) -> Result<&Taxpayer, RegistryError> {
        self.taxpayers.get(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Replaces an existing record wholesale. The id must already exist
    /// and the GSTIN must not collide with another record's.
    pub fn update(
        &mut self,
        taxpayer: Taxpayer,
    ) -> Result<(), RegistryError> {
        if !self.taxpayers.contains_key(&taxpayer.id) {
            return Err(RegistryError::NotFound(taxpayer.id));
        }
        if self
            .taxpayers
            .values()
            .any(|t| t.id != taxpayer.id && t.gstin == taxpayer.gstin)
        {
            return Err(RegistryError::DuplicateGstin(
                taxpayer.gstin.as_str().to_string(),
            ));
        }
        self.taxpayers.insert(taxpayer.id, taxpayer);
        Ok(())
    }

    pub fn delete(
        &mut self,
        id: i64,
    ) -> Result<(), RegistryError> {
        self.taxpayers
            .remove(&id)
            .map(|_| ())
            .ok_or(RegistryError::NotFound(id))
    }

    /// All records in id order.
    pub fn list(&self) -> Vec<&Taxpayer> {
        self.taxpayers.values().collect()
    }

    /// Case-insensitive substring match over name and email, plus plain
    /// substring match over phone.
    pub fn search(
        &self,
        query: &str,
    ) -> Vec<&Taxpayer> {
        let needle = query.to_lowercase();
        self.taxpayers
            .values()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle)
                    || t.email.to_lowercase().contains(&needle)
                    || t.phone.contains(query)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.taxpayers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxpayers.is_empty()
    }
}

/// The demo taxpayer records used to seed a fresh registry.
pub fn sample_taxpayers() -> Vec<NewTaxpayer> {
    vec![
        NewTaxpayer {
            name: "Rajesh Kumar".to_string(),
            email: "rajesh@example.com".to_string(),
            phone: "+91 9876543210".to_string(),
            gstin: "29ABCDE1234F1Z5".to_string(),
            tax_type: TaxType::Gst,
            total_due: Decimal::from(45_000),
            last_payment: NaiveDate::from_ymd_opt(2024, 1, 10),
        },
        NewTaxpayer {
            name: "Priya Sharma".to_string(),
            email: "priya@example.com".to_string(),
            phone: "+91 9876543211".to_string(),
            gstin: "29ABCDE1234F1Z6".to_string(),
            tax_type: TaxType::PropertyTax,
            total_due: Decimal::from(25_000),
            last_payment: NaiveDate::from_ymd_opt(2024, 1, 5),
        },
        NewTaxpayer {
            name: "Amit Patel".to_string(),
            email: "amit@example.com".to_string(),
            phone: "+91 9876543212".to_string(),
            gstin: "29ABCDE1234F1Z7".to_string(),
            tax_type: TaxType::LocalTax,
            total_due: Decimal::from(15_000),
            last_payment: NaiveDate::from_ymd_opt(2024, 1, 12),
        },
    ]
}
