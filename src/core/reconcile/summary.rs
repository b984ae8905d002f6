//! Reconciliation results and error accounting

use serde::Serialize;
use std::fmt;

/// Stage at which a reconciliation error was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileErrorKind {
    /// A record lacked a required field and was skipped
    Validation,
    /// The bulk read of stored plants failed
    StoreRead,
    /// A write call failed
    StoreWrite,
}

impl fmt::Display for ReconcileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReconcileErrorKind::Validation => "validation",
            ReconcileErrorKind::StoreRead => "store_read",
            ReconcileErrorKind::StoreWrite => "store_write",
        };
        write!(f, "{name}")
    }
}

/// One accumulated error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileError {
    pub kind: ReconcileErrorKind,
    pub message: String,
}

impl ReconcileError {
    pub fn new(kind: ReconcileErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ReconcileErrorKind::Validation, message)
    }

    pub fn store_read(message: impl Into<String>) -> Self {
        Self::new(ReconcileErrorKind::StoreRead, message)
    }

    pub fn store_write(message: impl Into<String>) -> Self {
        Self::new(ReconcileErrorKind::StoreWrite, message)
    }
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of writing one chunk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub written: usize,
    pub errors: Vec<ReconcileError>,
}

impl BatchOutcome {
    pub fn written(count: usize) -> Self {
        Self {
            written: count,
            errors: Vec::new(),
        }
    }

    pub fn add_success(&mut self) {
        self.written += 1;
    }

    pub fn add_failure(&mut self, error: ReconcileError) {
        self.errors.push(error);
    }
}

/// Summary of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciliationResult {
    /// Records created, fallback inserts included
    pub saved: usize,

    /// Records in successful update chunks
    pub updated: usize,

    /// Errors in the order they were recorded
    pub errors: Vec<ReconcileError>,

    /// True when nothing was written
    pub dry_run: bool,
}

impl ReconciliationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// A run that stopped at the bulk read
    pub fn read_failed(message: impl Into<String>) -> Self {
        Self {
            errors: vec![ReconcileError::store_read(message)],
            ..Self::default()
        }
    }

    pub fn add_error(&mut self, error: ReconcileError) {
        self.errors.push(error);
    }

    pub fn merge_inserts(&mut self, outcome: BatchOutcome) {
        self.saved += outcome.written;
        self.errors.extend(outcome.errors);
    }

    pub fn merge_updates(&mut self, outcome: BatchOutcome) {
        self.updated += outcome.written;
        self.errors.extend(outcome.errors);
    }

    /// True iff no error was recorded
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Errors of one kind
    pub fn errors_of(&self, kind: ReconcileErrorKind) -> impl Iterator<Item = &ReconcileError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    pub fn log_summary(&self) {
        tracing::info!(
            saved = self.saved,
            updated = self.updated,
            errors = self.errors.len(),
            dry_run = self.dry_run,
            "Reconciliation completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Reconciliation completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(kind = %error.kind, message = %error.message, "Reconciliation error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_successful() {
        let result = ReconciliationResult::new();
        assert!(result.success());
        assert_eq!(result.saved, 0);
        assert_eq!(result.updated, 0);
    }

    #[test]
    fn test_merge_keeps_error_order() {
        let mut result = ReconciliationResult::new();
        result.add_error(ReconcileError::validation("first"));

        let mut inserts = BatchOutcome::written(3);
        inserts.add_failure(ReconcileError::store_write("second"));
        result.merge_inserts(inserts);
        result.merge_updates(BatchOutcome::written(2));

        assert_eq!(result.saved, 3);
        assert_eq!(result.updated, 2);
        assert!(!result.success());
        let messages: Vec<&str> = result.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert_eq!(result.errors_of(ReconcileErrorKind::StoreWrite).count(), 1);
    }

    #[test]
    fn test_read_failure_has_single_error() {
        let result = ReconciliationResult::read_failed("connection reset");
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors[0].kind, ReconcileErrorKind::StoreRead);
        assert_eq!(result.saved + result.updated, 0);
    }

    #[test]
    fn test_error_kind_serializes_snake_case() {
        let json = serde_json::to_value(ReconcileError::store_write("boom")).unwrap();
        assert_eq!(json["kind"], "store_write");
        assert_eq!(json["message"], "boom");
    }
}
