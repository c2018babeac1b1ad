//! Observation side channel for committed steps.

use crate::core::Phase;

/// One committed step: which node and phase were processed, and where the
/// machine moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord<'a> {
    pub from: &'a str,
    pub from_phase: Phase,
    pub to: &'a str,
    pub to_phase: Phase,
    pub message: &'static str,
}

/// Receiver for [`TraceRecord`]s. A sink observes the machine; it cannot
/// influence it.
pub trait TraceSink: Send + Sync {
    fn record(&self, record: &TraceRecord<'_>);
}

impl<F> TraceSink for F
where
    F: Fn(&TraceRecord<'_>) + Send + Sync,
{
    fn record(&self, record: &TraceRecord<'_>) {
        self(record)
    }
}

/// Sink that forwards every record to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&self, record: &TraceRecord<'_>) {
        tracing::debug!(
            from = record.from,
            from_phase = record.from_phase.name(),
            to = record.to,
            to_phase = record.to_phase.name(),
            "{}",
            record.message
        );
    }
}
