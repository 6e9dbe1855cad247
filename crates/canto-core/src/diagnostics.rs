//! Default diagnostics sink backed by `tracing`.

use tracing::warn;

use crate::error::Error;
use crate::traits::DiagnosticsSink;
use crate::types::ChantNumber;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn chant_skipped(&self, number: ChantNumber, error: &Error) {
        warn!(chant = number.get(), error = %error, "Skipping chant");
    }
}
