//! Failure reporting seam.
//!
//! The validation core never talks to a UI toolkit; it reports through this
//! narrow trait, injected at construction. Each failed job produces exactly
//! one report. A continuation that fails after a successful validation is
//! reported through its own method so the two channels never double up.

use crate::core::host::ConnectionDescriptor;
use crate::util::diagnostic::{emit, suggestions, Diagnostic};

/// Surfaces validation failures to a user-facing layer.
pub trait ValidationReporter: Send + Sync {
    /// The host could not be brought online, or discovery on it failed.
    fn report_connect_failure(&self, desc: &ConnectionDescriptor);

    /// Validation succeeded but the success continuation itself failed.
    fn report_continuation_failure(&self, desc: &ConnectionDescriptor);
}

/// Reporter that writes failures to the log.
pub struct LogReporter;

impl ValidationReporter for LogReporter {
    fn report_connect_failure(&self, desc: &ConnectionDescriptor) {
        tracing::warn!(host = %desc.display_name(), "host validation failed");
    }

    fn report_continuation_failure(&self, desc: &ConnectionDescriptor) {
        tracing::error!(
            host = %desc.display_name(),
            "continuation failed after successful validation"
        );
    }
}

/// Reporter that renders diagnostics to stderr.
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    /// Create a console reporter.
    pub fn new(color: bool) -> Self {
        ConsoleReporter { color }
    }
}

impl ValidationReporter for ConsoleReporter {
    fn report_connect_failure(&self, desc: &ConnectionDescriptor) {
        let diag = Diagnostic::error(format!("cannot reach `{}`", desc.display_name()))
            .with_suggestion(suggestions::HOST_UNREACHABLE);
        emit(&diag, self.color);
    }

    fn report_continuation_failure(&self, desc: &ConnectionDescriptor) {
        let diag = Diagnostic::warning(format!(
            "`{}` validated, but the follow-up action failed",
            desc.display_name()
        ));
        emit(&diag, self.color);
    }
}
