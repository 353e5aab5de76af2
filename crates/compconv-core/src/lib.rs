//! Atomic percent / weight percent conversion for element mixtures.
//!
//! The [`common::AtomicWeightTable`] is loaded once and passed by reference to
//! the pure conversion functions in [`modules::convert`].

pub mod common;
pub mod domain;
pub mod modules;
pub mod parser;

pub use common::AtomicWeightTable;
pub use domain::{
    Composition, CompositionEntry, CompositionUnit, ConversionDirection, ConversionError,
    ConversionErrorKind, ConversionOptions, ConversionResult, ElementRecord,
};
pub use modules::{ConversionReport, atomic_to_weight, convert, weight_to_atomic};
pub use parser::parse_composition;
