use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use strum_macros::{Display, EnumString};
use tracing::warn;

#[derive(
    Debug, Clone, Copy, Display, EnumString, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    DivideByZero,
    FloatingPointFault,
}

#[derive(
    Debug, Clone, Copy, Display, EnumString, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    KullbackLeibler,
    Gini,
}

/// A bin excluded from a score because its contribution could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinFault {
    pub scorer: ScorerKind,
    pub kind: FaultKind,
    pub bin_index: usize,
    pub p: f64,
    pub q: f64,
    pub w_p: f64,
    pub w_q: f64,
}

/// Receiver for per-bin numeric faults.
///
/// Scorers shared across threads need a `Send + Sync` sink.
pub trait DiagnosticSink {
    fn report(&self, fault: &BinFault);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn report(&self, fault: &BinFault) {
        (**self).report(fault)
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<T> {
    fn report(&self, fault: &BinFault) {
        (**self).report(fault)
    }
}

/// Emits each fault as a structured `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, fault: &BinFault) {
        warn!(
            scorer = %fault.scorer,
            fault_kind = %fault.kind,
            bin = fault.bin_index,
            p = fault.p,
            q = fault.q,
            w_p = fault.w_p,
            w_q = fault.w_q,
            "bin excluded from score"
        );
    }
}

/// Keeps every reported fault in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    faults: Mutex<Vec<BinFault>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn faults(&self) -> Vec<BinFault> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&self) -> Vec<BinFault> {
        std::mem::take(&mut *self.lock())
    }

    // Ignores poisoning: a push either happened or it didn't.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<BinFault>> {
        self.faults.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, fault: &BinFault) {
        self.lock().push(fault.clone());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _fault: &BinFault) {}
}
