pub mod convert;
pub mod report;
pub mod serialization;

pub use convert::{atomic_to_weight, convert, validate_composition, weight_to_atomic};
pub use report::{ConversionReport, DEFAULT_PRECISION, MAX_PRECISION, ReportRow};
