//! Worksheet implementations for the assessment pipeline.

pub mod advance_tax;
pub mod business;
pub mod individual;

pub use advance_tax::{AdvanceTaxError, AdvanceTaxInstallment, AdvanceTaxWorksheet};
pub use business::{BusinessWorksheet, BusinessWorksheetError, BusinessWorksheetInput};
pub use individual::{IndividualWorksheet, IndividualWorksheetError, IndividualWorksheetInput};
