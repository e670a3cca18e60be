//! Bin-by-bin discrepancy scores between two aligned histograms.
//!
//! Two scorers compare a candidate distribution against a reference:
//! [`scorer::KullbackLeibler`] (log-ratio divergence) and [`scorer::Gini`]
//! (separation). Both return the score together with a standard deviation
//! propagated from the per-bin errors. Bins whose contribution cannot be
//! computed are reported to a [`diagnostics::DiagnosticSink`] and left out.
//!
//! ```
//! use binscore::distribution::Histogram;
//! use binscore::diagnostics::CollectingSink;
//! use binscore::scorer::KullbackLeibler;
//!
//! let reference = Histogram::new(vec![5.0], vec![1.0]).unwrap();
//! let candidate = Histogram::new(vec![10.0], vec![1.0]).unwrap();
//!
//! let kl = KullbackLeibler::new(CollectingSink::new());
//! let score = kl.divergence(&reference, &candidate, 0).unwrap();
//! assert!((score.value - 1.9315).abs() < 1e-4);
//! assert!((score.std_dev - 2.6204).abs() < 1e-3);
//! ```

pub mod config;
pub mod consts;
pub mod diagnostics;
pub mod distribution;
pub mod error;
pub mod scorer;
