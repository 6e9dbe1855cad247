use crate::error::Error;
use crate::types::ChantNumber;

/// Receives the per-chant failures that corpus-wide aggregates skip over.
pub trait DiagnosticsSink: Send + Sync {
    fn chant_skipped(&self, number: ChantNumber, error: &Error);
}
