mod loader;

pub use loader::{SlabScheduleLoader, SlabScheduleLoaderError, SlabScheduleRecord};
