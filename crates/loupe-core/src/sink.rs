//! Where render failures are reported.
//!
//! A failed render returns the bare `error` sentinel to its caller; the detail
//! goes to a [`FailureSink`] owned by the renderer.

use std::sync::Arc;

/// Receives a human-readable message each time a top-level render fails.
pub trait FailureSink {
    fn report_failure(&self, message: &str);
}

/// Default sink: logs through `tracing` at ERROR level under target `loupe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl FailureSink for TracingSink {
    fn report_failure(&self, message: &str) {
        tracing::error!(target: "loupe", "{}", message);
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FailureSink for NullSink {
    fn report_failure(&self, _message: &str) {}
}

impl<S: FailureSink + ?Sized> FailureSink for &S {
    fn report_failure(&self, message: &str) {
        (**self).report_failure(message)
    }
}

impl<S: FailureSink + ?Sized> FailureSink for Box<S> {
    fn report_failure(&self, message: &str) {
        (**self).report_failure(message)
    }
}

impl<S: FailureSink + ?Sized> FailureSink for Arc<S> {
    fn report_failure(&self, message: &str) {
        (**self).report_failure(message)
    }
}
