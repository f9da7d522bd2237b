//! Callback marshaling onto the presentation layer.
//!
//! Continuations never run on the validation worker thread. The worker hands
//! them to a [`PresentationContext`] and waits for the invocation to finish
//! before the job is considered done (synchronous hand-off).

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread::JoinHandle;

/// A continuation or error handler queued for the presentation layer.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// The presentation layer's designated callback context.
pub trait PresentationContext: Send + Sync {
    /// Run the action on the presentation context and return once it has
    /// completed.
    fn run_sync(&self, action: Action);
}

/// Runs actions inline on the calling thread.
///
/// For headless use (CLI, tests) where no UI thread exists.
pub struct DirectContext;

impl PresentationContext for DirectContext {
    fn run_sync(&self, action: Action) {
        action();
    }
}

/// A dedicated single callback thread.
///
/// All actions run on the one thread this context owns, in submission
/// order. A panicking action is swallowed so the thread keeps serving.
pub struct CallbackLoop {
    sender: Option<mpsc::Sender<(Action, mpsc::Sender<()>)>>,
    handle: Option<JoinHandle<()>>,
}

impl CallbackLoop {
    /// Spawn the callback thread.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel::<(Action, mpsc::Sender<()>)>();

        let handle = std::thread::Builder::new()
            .name("berth-callbacks".to_string())
            .spawn(move || {
                for (action, ack) in receiver {
                    let _ = panic::catch_unwind(AssertUnwindSafe(action));
                    let _ = ack.send(());
                }
            })
            .expect("failed to spawn callback thread");

        CallbackLoop {
            sender: Some(sender),
            handle: Some(handle),
        }
    }
}

impl Default for CallbackLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationContext for CallbackLoop {
    fn run_sync(&self, action: Action) {
        let Some(sender) = &self.sender else {
            return;
        };

        let (ack_tx, ack_rx) = mpsc::channel();
        if sender.send((action, ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for CallbackLoop {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_direct_context_runs_inline() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        DirectContext.run_sync(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_callback_loop_runs_on_its_own_thread() {
        let ctx = CallbackLoop::new();

        let seen = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&seen);
        ctx.run_sync(Box::new(move || {
            *slot.lock().unwrap() = Some(std::thread::current().id());
        }));

        // run_sync returned, so the action has already completed.
        let id = seen.lock().unwrap().expect("action did not run");
        assert_ne!(id, std::thread::current().id());
    }

    #[test]
    fn test_callback_loop_survives_panicking_action() {
        let ctx = CallbackLoop::new();
        ctx.run_sync(Box::new(|| panic!("bad continuation")));

        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        ctx.run_sync(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_callback_loop_preserves_order() {
        let ctx = CallbackLoop::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..4 {
            let log = Arc::clone(&log);
            ctx.run_sync(Box::new(move || log.lock().unwrap().push(i)));
        }

        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3]);
    }
}
