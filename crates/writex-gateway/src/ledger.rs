//! A ledger that writes each publication to the log.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::LedgerError;
use crate::traits::{Ledger, LedgerAck, LedgerEntry};

/// Emits every entry as an `info` event on the `writex::ledger` target.
///
/// Useful when no external ledger is wired up but the publication trail
/// should still be captured by whatever collects the logs. Sequence
/// numbers are per process.
#[derive(Debug, Default)]
pub struct TracingLedger {
    next: AtomicU64,
}

impl TracingLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Ledger for TracingLedger {
    async fn record(&self, entry: &LedgerEntry) -> Result<LedgerAck, LedgerError> {
        let sequence = self.next.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            target: "writex::ledger",
            sequence,
            locator = %entry.locator,
            author = %entry.author,
            commitment = %entry.commitment,
            recorded_at = entry.recorded_at,
            "publication recorded"
        );

        Ok(LedgerAck { sequence })
    }
}
