//! Host validation - bring a host online, discover its toolchain, then hand
//! control back to the caller.
//!
//! [`HostValidator`] is constructed once at startup and shared by reference;
//! it owns the single worker thread that serializes all validation work in
//! the process. Callers choose between the fire-and-forget `validate`
//! variants (continuations marshaled to the presentation context) and the
//! blocking `validate_sync` used when the outcome gates the next step.

use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use thiserror::Error;

use crate::core::configuration::DebugConfiguration;
use crate::core::engine::{debugger_engine_of, select_for_engine, EngineKind};
use crate::core::host::{
    is_local, ConnectionDescriptor, ConnectionState, HostKeyError, DEFAULT_PORT, LOCAL_HOST,
};
use crate::discovery::{DiscoveryError, ToolchainBinding};
use crate::registry::HostRegistry;
use crate::util::diagnostic::{suggestions, Diagnostic};

mod context;
mod report;
mod worker;

pub use context::{Action, CallbackLoop, DirectContext, PresentationContext};
pub use report::{ConsoleReporter, LogReporter, ValidationReporter};

use worker::{ValidationJob, Worker};

/// Error from a validation attempt.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The host key could not be decoded. Surfaced synchronously to the
    /// caller; never queued and never sent through the reporter.
    #[error(transparent)]
    HostKey(#[from] HostKeyError),

    /// The host could not be brought online.
    #[error("cannot reach `{host}`")]
    ConnectFailed { host: ConnectionDescriptor },

    /// Connected, but toolchain or platform discovery failed. A host with
    /// an unknown toolchain is not usable, so this fails the whole job.
    #[error("toolchain discovery failed on `{host}`")]
    DiscoveryFailed {
        host: ConnectionDescriptor,
        #[source]
        source: DiscoveryError,
    },
}

impl ValidationError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ValidationError::HostKey(e) => {
                Diagnostic::error(e.to_string()).with_suggestion(suggestions::BAD_HOST_KEY)
            }

            ValidationError::ConnectFailed { host } => {
                Diagnostic::error(format!("cannot reach `{}`", host.display_name()))
                    .with_suggestion(suggestions::HOST_UNREACHABLE)
            }

            ValidationError::DiscoveryFailed { host, source } => {
                Diagnostic::error(format!(
                    "toolchain discovery failed on `{}`",
                    host.display_name()
                ))
                .with_context(source.to_string())
                .with_suggestion(suggestions::NO_TOOLCHAINS)
            }
        }
    }
}

/// Bring a host online and force-refresh its toolchain state.
///
/// Shared by the queued jobs and the synchronous variant. Discovery is
/// forced every time; a cache from a previous session is never trusted
/// because host toolchains change between sessions.
fn connect_and_discover(
    registry: &dyn HostRegistry,
    binding: &ToolchainBinding,
    desc: &ConnectionDescriptor,
) -> Result<(), ValidationError> {
    match registry.bring_online(desc) {
        ConnectionState::Online => {}
        _ => return Err(ValidationError::ConnectFailed { host: desc.clone() }),
    }

    binding
        .refresh(desc, true, true)
        .map_err(|source| ValidationError::DiscoveryFailed {
            host: desc.clone(),
            source,
        })?;
    binding
        .platform_info(desc)
        .map_err(|source| ValidationError::DiscoveryFailed {
            host: desc.clone(),
            source,
        })?;

    Ok(())
}

/// Serializes host validation through one process-wide worker.
pub struct HostValidator {
    registry: Arc<dyn HostRegistry>,
    binding: Arc<ToolchainBinding>,
    jobs: Option<mpsc::Sender<ValidationJob>>,
    worker: Option<JoinHandle<()>>,
}

impl HostValidator {
    /// Create a validator and spawn its worker thread.
    pub fn new(
        registry: Arc<dyn HostRegistry>,
        binding: Arc<ToolchainBinding>,
        reporter: Arc<dyn ValidationReporter>,
        presentation: Arc<dyn PresentationContext>,
    ) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::channel();

        let worker = Worker {
            jobs: jobs_rx,
            registry: Arc::clone(&registry),
            binding: Arc::clone(&binding),
            reporter,
            presentation,
        };

        let handle = std::thread::Builder::new()
            .name("berth-validator".to_string())
            .spawn(move || worker.run())
            .expect("failed to spawn validation worker");

        HostValidator {
            registry,
            binding,
            jobs: Some(jobs_tx),
            worker: Some(handle),
        }
    }

    /// Validate a host, then run `on_success`. Fire-and-forget.
    ///
    /// The local host short-circuits: `on_success` runs synchronously on the
    /// calling thread and no job is queued. A failed remote validation is
    /// reported and `on_success` is simply never called.
    pub fn validate(
        &self,
        key: &str,
        on_success: impl FnOnce() + Send + 'static,
    ) -> Result<(), HostKeyError> {
        self.submit(key, Box::new(on_success), None)
    }

    /// Like [`validate`](Self::validate), with an explicit error handler
    /// invoked (after reporting) when validation fails.
    pub fn validate_or(
        &self,
        key: &str,
        on_success: impl FnOnce() + Send + 'static,
        on_error: impl FnOnce() + Send + 'static,
    ) -> Result<(), HostKeyError> {
        self.submit(key, Box::new(on_success), Some(Box::new(on_error)))
    }

    fn submit(
        &self,
        key: &str,
        on_success: Action,
        on_error: Option<Action>,
    ) -> Result<(), HostKeyError> {
        if is_local(key) {
            on_success();
            return Ok(());
        }

        let desc = self.registry.descriptor_for(key)?;
        let job = ValidationJob {
            key: key.to_string(),
            desc,
            on_success,
            on_error,
        };

        if let Some(jobs) = &self.jobs {
            if jobs.send(job).is_err() {
                tracing::error!(host = %key, "validation worker is gone; job dropped");
            }
        }
        Ok(())
    }

    /// Validate a host inline on the calling thread.
    ///
    /// Runs the same connect+discover sequence as a queued job but does not
    /// enqueue, take continuations, or fire the reporter; the outcome goes
    /// straight back to the caller.
    pub fn validate_now(&self, key: &str) -> Result<(), ValidationError> {
        if is_local(key) {
            return Ok(());
        }

        let desc = self.registry.descriptor_for(key)?;
        connect_and_discover(self.registry.as_ref(), &self.binding, &desc)
    }

    /// Blocking variant returning just the outcome: `true` iff the host is
    /// local or connect+discover succeeded.
    pub fn validate_sync(&self, key: &str) -> bool {
        self.validate_now(key).is_ok()
    }

    /// Bind a configuration to a validated host.
    ///
    /// Writes the host into the configuration, refreshes the toolchain, and
    /// rebinds the compiler set when the current one does not match the
    /// desired engine. When no set matches, the existing binding stays as it
    /// is - a silent best-effort correction, not an error.
    pub fn bind_configuration_to_host(
        &self,
        config: &mut DebugConfiguration,
        desired: EngineKind,
        key: &str,
    ) -> Result<(), ValidationError> {
        let local = is_local(key);
        let desc = if local {
            ConnectionDescriptor {
                user: None,
                host: LOCAL_HOST.to_string(),
                port: DEFAULT_PORT,
            }
        } else {
            self.registry.descriptor_for(key)?
        };

        config.host = (!local).then(|| desc.clone());

        let set = self
            .binding
            .refresh(&desc, true, true)
            .map_err(|source| ValidationError::DiscoveryFailed {
                host: desc.clone(),
                source,
            })?;

        let current_engine = config
            .compiler_set
            .as_deref()
            .and_then(|name| set.by_name(name))
            .and_then(debugger_engine_of);

        if current_engine != Some(desired) {
            if let Some(entry) = select_for_engine(&set, desired) {
                tracing::debug!(
                    configuration = %config.name,
                    set = %entry.name,
                    "rebinding compiler set for engine {}",
                    desired
                );
                config.compiler_set = Some(entry.name.clone());
            }
        }

        Ok(())
    }

    /// Keys of all known connection targets, from the host registry.
    pub fn known_host_keys(&self) -> Vec<String> {
        self.registry.known_host_keys()
    }

    /// The toolchain cache shared with this validator.
    pub fn toolchains(&self) -> &ToolchainBinding {
        &self.binding
    }
}

impl Drop for HostValidator {
    fn drop(&mut self) {
        // Close the queue; already-queued jobs drain before the join.
        self.jobs.take();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
