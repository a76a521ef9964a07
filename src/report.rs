//! Side channel for failures the pipeline recovers from.
//!
//! A recoverable failure still yields a snapshot (with a default value in
//! place of the missing data), so it is handed to an `ErrorReporter` rather
//! than returned.

use std::sync::Mutex;

use serde::Serialize;

use crate::error::Stage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveredFailure {
    pub stage: Stage,
    pub message: String,
}

pub trait ErrorReporter: Send + Sync {
    fn report(&self, failure: RecoveredFailure);
}

/// Emits each failure as a `warn` event.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, failure: RecoveredFailure) {
        tracing::warn!(stage = %failure.stage, "{}", failure.message);
    }
}

/// Keeps failures in memory for the caller to inspect.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    failures: Mutex<Vec<RecoveredFailure>>,
}

impl CollectingReporter {
    pub fn failures(&self) -> Vec<RecoveredFailure> {
        match self.failures.lock() {
            Ok(failures) => failures.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, failure: RecoveredFailure) {
        match self.failures.lock() {
            Ok(mut failures) => failures.push(failure),
            Err(poisoned) => poisoned.into_inner().push(failure),
        }
    }
}
