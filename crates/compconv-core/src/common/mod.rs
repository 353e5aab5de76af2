pub mod weights;

pub use weights::{AtomicWeightTable, BUILTIN_TABLE_NAME, canonical_symbol, is_canonical_symbol};
