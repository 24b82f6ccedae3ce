mod assessment;
mod category;
mod regime;
mod slab;
mod taxpayer;

pub use assessment::{BusinessAssessment, TaxAssessment};
pub use category::{AgeCategory, BusinessType};
pub use regime::{BusinessRates, TaxRegime, TaxRegimeError};
pub use slab::{Slab, SlabSchedule, SlabScheduleError};
pub use taxpayer::{Gstin, GstinError, NewTaxpayer, TaxType, Taxpayer, TaxpayerStatus};
