//! The serialized validation worker.
//!
//! One thread drains one FIFO queue. Jobs for different hosts still run
//! strictly in submission order; nothing validates in parallel. A job's
//! failure - including a panic - is terminal for that job only.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use crate::core::host::ConnectionDescriptor;
use crate::discovery::ToolchainBinding;
use crate::registry::HostRegistry;
use crate::validator::context::{Action, PresentationContext};
use crate::validator::report::ValidationReporter;
use crate::validator::connect_and_discover;

/// A queued unit of validation work. Created per `validate` call, destroyed
/// when the job completes or fails; never persisted.
pub(crate) struct ValidationJob {
    pub key: String,
    pub desc: ConnectionDescriptor,
    pub on_success: Action,
    pub on_error: Option<Action>,
}

pub(crate) struct Worker {
    pub jobs: mpsc::Receiver<ValidationJob>,
    pub registry: Arc<dyn HostRegistry>,
    pub binding: Arc<ToolchainBinding>,
    pub reporter: Arc<dyn ValidationReporter>,
    pub presentation: Arc<dyn PresentationContext>,
}

impl Worker {
    /// Drain the queue until every sender is gone.
    pub(crate) fn run(self) {
        while let Ok(job) = self.jobs.recv() {
            let key = job.key.clone();
            if panic::catch_unwind(AssertUnwindSafe(|| self.process(job))).is_err() {
                tracing::error!(host = %key, "validation job panicked; worker continues");
            }
        }
        tracing::debug!("validation worker stopped");
    }

    fn process(&self, job: ValidationJob) {
        tracing::debug!(host = %job.key, "validation job started");

        match connect_and_discover(self.registry.as_ref(), &self.binding, &job.desc) {
            Ok(()) => {
                tracing::debug!(host = %job.key, "validated");
                if self.invoke(job.on_success) {
                    self.reporter.report_continuation_failure(&job.desc);
                }
            }
            Err(e) => {
                tracing::warn!(host = %job.key, "validation failed: {:#}", e);
                self.reporter.report_connect_failure(&job.desc);
                if let Some(on_error) = job.on_error {
                    self.invoke(on_error);
                }
            }
        }
    }

    /// Marshal an action to the presentation context and wait for it.
    /// Returns `true` if the action panicked.
    fn invoke(&self, action: Action) -> bool {
        let panicked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&panicked);

        self.presentation.run_sync(Box::new(move || {
            if panic::catch_unwind(AssertUnwindSafe(action)).is_err() {
                flag.store(true, Ordering::SeqCst);
            }
        }));

        panicked.load(Ordering::SeqCst)
    }
}
