#![allow(dead_code)]

use binscore::distribution::Histogram;

/// Histogram with explicit per-bin errors.
pub fn hist(contents: &[f64], errors: &[f64]) -> Histogram {
    Histogram::new(contents.to_vec(), errors.to_vec()).expect("valid test histogram")
}

/// Histogram with every bin error set to `err`.
pub fn flat_err(contents: &[f64], err: f64) -> Histogram {
    hist(contents, &vec![err; contents.len()])
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {} within {} of {}",
        actual,
        tol,
        expected
    );
}
