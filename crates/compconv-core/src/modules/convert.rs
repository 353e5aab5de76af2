use crate::common::AtomicWeightTable;
use crate::domain::{
    Composition, CompositionEntry, ConversionDirection, ConversionError, ConversionOptions,
    ConversionResult,
};
use std::collections::HashSet;
use tracing::{debug, warn};

const PERCENT: f64 = 100.0;
/// Floor for the sum check; also the drift above which an accepted sum is logged.
const ROUNDING_NOISE: f64 = 1.0e-6;

pub fn convert(
    table: &AtomicWeightTable,
    composition: &Composition,
    direction: ConversionDirection,
    options: &ConversionOptions,
) -> ConversionResult<Composition> {
    match direction {
        ConversionDirection::AtomicToWeight => atomic_to_weight(table, composition, options),
        ConversionDirection::WeightToAtomic => weight_to_atomic(table, composition, options),
    }
}

/// `wt_i = a_i * w_i / sum_j(a_j * w_j) * 100`
pub fn atomic_to_weight(
    table: &AtomicWeightTable,
    composition: &Composition,
    options: &ConversionOptions,
) -> ConversionResult<Composition> {
    let weights = validate_composition(table, composition, options)?;
    let masses: Vec<f64> = composition
        .iter()
        .zip(&weights)
        .map(|(entry, weight)| entry.percent * weight)
        .collect();
    normalize(composition, &masses, ConversionDirection::AtomicToWeight)
}

/// `at_i = (g_i / w_i) / sum_j(g_j / w_j) * 100`
pub fn weight_to_atomic(
    table: &AtomicWeightTable,
    composition: &Composition,
    options: &ConversionOptions,
) -> ConversionResult<Composition> {
    let weights = validate_composition(table, composition, options)?;
    let moles: Vec<f64> = composition
        .iter()
        .zip(&weights)
        .map(|(entry, weight)| entry.percent / weight)
        .collect();
    normalize(composition, &moles, ConversionDirection::WeightToAtomic)
}

/// Checks every precondition and returns the atomic weight of each entry.
pub fn validate_composition(
    table: &AtomicWeightTable,
    composition: &Composition,
    options: &ConversionOptions,
) -> ConversionResult<Vec<f64>> {
    if composition.is_empty() {
        return Err(ConversionError::degenerate_input("composition has no elements"));
    }

    for entry in composition.iter() {
        if !entry.percent.is_finite() {
            return Err(ConversionError::invalid_composition(format!(
                "percentage for '{}' is not a finite number",
                entry.symbol
            )));
        }
        if entry.percent < 0.0 {
            return Err(ConversionError::invalid_composition(format!(
                "percentage for '{}' is negative ({})",
                entry.symbol, entry.percent
            )));
        }
    }

    let mut seen = HashSet::with_capacity(composition.len());
    for entry in composition.iter() {
        if !seen.insert(entry.symbol.as_str()) {
            return Err(ConversionError::invalid_composition(format!(
                "element '{}' appears more than once",
                entry.symbol
            )));
        }
    }

    let weights = composition
        .iter()
        .map(|entry| table.lookup(&entry.symbol))
        .collect::<ConversionResult<Vec<_>>>()?;

    if composition.iter().all(|entry| entry.percent == 0.0) {
        return Err(ConversionError::degenerate_input("all percentages are zero"));
    }

    let total = composition.total();
    let deviation = (total - PERCENT).abs();
    if deviation > options.tolerance.max(ROUNDING_NOISE) {
        return Err(ConversionError::invalid_composition(format!(
            "sum is {:.4}, not equal to 100%",
            total
        )));
    }
    if deviation > ROUNDING_NOISE {
        warn!(
            total,
            tolerance = options.tolerance,
            "composition sum deviates from 100% but is within tolerance"
        );
    }

    Ok(weights)
}

fn normalize(
    composition: &Composition,
    amounts: &[f64],
    direction: ConversionDirection,
) -> ConversionResult<Composition> {
    let denominator: f64 = amounts.iter().sum();
    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(ConversionError::degenerate_input(format!(
            "weighted total {} cannot be normalized",
            denominator
        )));
    }

    let entries = composition
        .iter()
        .zip(amounts)
        .map(|(entry, amount)| {
            CompositionEntry::new(entry.symbol.clone(), amount / denominator * PERCENT)
        })
        .collect();
    let converted = Composition::new(entries);

    debug!(
        %direction,
        elements = converted.len(),
        total = converted.total(),
        "converted composition"
    );
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::{atomic_to_weight, convert, weight_to_atomic};
    use crate::common::AtomicWeightTable;
    use crate::domain::{
        Composition, ConversionDirection, ConversionErrorKind, ConversionOptions,
    };

    const BOTH_DIRECTIONS: [ConversionDirection; 2] = [
        ConversionDirection::AtomicToWeight,
        ConversionDirection::WeightToAtomic,
    ];

    fn table() -> AtomicWeightTable {
        AtomicWeightTable::builtin().expect("builtin table should load")
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn equiatomic_iron_carbon_matches_closed_form() {
        let input = Composition::from_pairs([("Fe", 50.0), ("C", 50.0)]);
        let output = atomic_to_weight(&table(), &input, &ConversionOptions::default())
            .expect("conversion should succeed");

        let expected_fe = 55.845 / (55.845 + 12.011) * 100.0;
        assert_close(output.percent_of("Fe").unwrap(), expected_fe, 1.0e-12);
        assert_close(output.percent_of("Fe").unwrap(), 82.29, 0.01);
        assert_close(output.percent_of("C").unwrap(), 17.71, 0.01);
    }

    #[test]
    fn weight_percent_iron_carbon_returns_to_equiatomic() {
        let input = Composition::from_pairs([("Fe", 82.29), ("C", 17.71)]);
        let output = weight_to_atomic(&table(), &input, &ConversionOptions::default())
            .expect("conversion should succeed");

        assert_close(output.percent_of("Fe").unwrap(), 50.0, 0.05);
        assert_close(output.percent_of("C").unwrap(), 50.0, 0.05);
    }

    #[test]
    fn round_trips_reproduce_input() {
        let table = table();
        let options = ConversionOptions::default();
        let cases = [
            Composition::from_pairs([("Fe", 98.0), ("C", 2.0)]),
            Composition::from_pairs([("Ni", 50.0), ("Ti", 50.0)]),
            Composition::from_pairs([
                ("Fe", 70.0),
                ("Cr", 18.0),
                ("Ni", 8.0),
                ("Mn", 2.0),
                ("Si", 1.0),
                ("C", 1.0),
            ]),
            Composition::from_pairs([("H", 0.0), ("U", 100.0)]),
        ];

        for direction in BOTH_DIRECTIONS {
            for input in &cases {
                let forward = convert(&table, input, direction, &options).expect("forward");
                let back = convert(&table, &forward, direction.reversed(), &options).expect("back");
                for (original, restored) in input.iter().zip(back.iter()) {
                    assert_eq!(original.symbol, restored.symbol);
                    assert_close(restored.percent, original.percent, 1.0e-6);
                }
            }
        }
    }

    #[test]
    fn zero_tolerance_still_accepts_converted_output() {
        let table = table();
        let strict = ConversionOptions::with_tolerance(0.0).expect("zero tolerance is allowed");
        let cases = [
            Composition::from_pairs([
                ("Fe", 70.0),
                ("Cr", 18.0),
                ("Ni", 8.0),
                ("Mn", 2.0),
                ("Si", 1.0),
                ("C", 1.0),
            ]),
            Composition::from_pairs([("Al", 90.0), ("Cu", 4.0), ("Mg", 6.0)]),
            Composition::from_pairs([("Cu", 63.0), ("Zn", 37.0)]),
        ];

        for direction in BOTH_DIRECTIONS {
            for input in &cases {
                let forward = convert(&table, input, direction, &strict).expect("forward");
                let back = convert(&table, &forward, direction.reversed(), &strict).expect("back");
                for (original, restored) in input.iter().zip(back.iter()) {
                    assert_close(restored.percent, original.percent, 1.0e-6);
                }
            }
        }

        let off = Composition::from_pairs([("Cu", 63.0), ("Zn", 36.99)]);
        let error = convert(&table, &off, ConversionDirection::WeightToAtomic, &strict)
            .expect_err("sum of 99.99 is outside zero tolerance");
        assert_eq!(error.kind(), ConversionErrorKind::InvalidComposition);
    }

    #[test]
    fn outputs_sum_to_one_hundred_and_keep_order() {
        let table = table();
        let input = Composition::from_pairs([("Al", 90.005), ("Cu", 4.0), ("Mg", 5.99)]);
        for direction in BOTH_DIRECTIONS {
            let output = convert(&table, &input, direction, &ConversionOptions::default())
                .expect("within default tolerance");
            assert_close(output.total(), 100.0, 1.0e-9);
            let symbols: Vec<&str> = output.iter().map(|e| e.symbol.as_str()).collect();
            assert_eq!(symbols, ["Al", "Cu", "Mg"]);
        }
    }

    #[test]
    fn single_element_converts_to_one_hundred() {
        let input = Composition::from_pairs([("Cu", 100.0)]);
        let output = weight_to_atomic(&table(), &input, &ConversionOptions::default()).unwrap();
        assert_close(output.percent_of("Cu").unwrap(), 100.0, 1.0e-12);
    }

    #[test]
    fn unknown_symbol_fails_with_unknown_element() {
        let input = Composition::from_pairs([("Fe", 50.0), ("Xx", 50.0)]);
        let error = atomic_to_weight(&table(), &input, &ConversionOptions::default())
            .expect_err("Xx is not in the table");
        assert_eq!(error.kind(), ConversionErrorKind::UnknownElement);
        assert!(error.message().contains("'Xx'"));
    }

    #[test]
    fn all_zero_composition_is_degenerate() {
        let input = Composition::from_pairs([("Fe", 0.0), ("C", 0.0)]);
        let error = weight_to_atomic(&table(), &input, &ConversionOptions::default())
            .expect_err("zeros cannot be normalized");
        assert_eq!(error.kind(), ConversionErrorKind::DegenerateInput);
        assert_eq!(error.exit_code(), 4);
    }

    #[test]
    fn empty_composition_is_degenerate() {
        let error = atomic_to_weight(&table(), &Composition::default(), &ConversionOptions::default())
            .expect_err("empty input");
        assert_eq!(error.kind(), ConversionErrorKind::DegenerateInput);
    }

    #[test]
    fn sum_outside_tolerance_is_invalid() {
        let input = Composition::from_pairs([("Fe", 98.0), ("C", 1.0)]);
        let error = atomic_to_weight(&table(), &input, &ConversionOptions::default())
            .expect_err("99% total");
        assert_eq!(error.kind(), ConversionErrorKind::InvalidComposition);
        assert_eq!(error.message(), "sum is 99.0000, not equal to 100%");

        let relaxed = ConversionOptions::with_tolerance(1.0).unwrap();
        assert!(atomic_to_weight(&table(), &input, &relaxed).is_ok());
    }

    #[test]
    fn negative_nan_and_duplicate_entries_are_invalid() {
        let table = table();
        let options = ConversionOptions::default();
        let cases = [
            Composition::from_pairs([("Fe", 110.0), ("C", -10.0)]),
            Composition::from_pairs([("Fe", f64::NAN), ("C", 100.0)]),
            Composition::from_pairs([("Fe", 50.0), ("Fe", 50.0)]),
        ];

        for input in &cases {
            let error = weight_to_atomic(&table, input, &options).expect_err("invalid input");
            assert_eq!(error.kind(), ConversionErrorKind::InvalidComposition, "{input:?}");
        }
    }

    #[test]
    fn element_check_precedes_sum_check() {
        let input = Composition::from_pairs([("Fe", 10.0), ("Qq", 10.0)]);
        let error = atomic_to_weight(&table(), &input, &ConversionOptions::default()).unwrap_err();
        assert_eq!(error.kind(), ConversionErrorKind::UnknownElement);
    }
}
