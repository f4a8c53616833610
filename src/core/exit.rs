//! Exit hooks run before a fatal record terminates the process
//!
//! Handlers are collected in an [`ExitHandlers`] list. Every logger shares
//! the process-wide list from [`ExitHandlers::global`] unless it was built
//! with a private one, which is how tests observe fatal handling without
//! touching global state.

use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

/// A registered exit handler
pub type ExitHandler = Arc<dyn Fn() + Send + Sync>;

/// Process termination primitive invoked with the exit status
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// The exit primitive used unless a logger is built with its own
pub fn default_exit_fn() -> ExitFn {
    Arc::new(|code| std::process::exit(code))
}

/// Ordered, add-only list of exit handlers
///
/// Cloning yields another handle to the same list.
#[derive(Clone, Default)]
pub struct ExitHandlers {
    handlers: Arc<Mutex<Vec<ExitHandler>>>,
}

static GLOBAL_HANDLERS: OnceLock<ExitHandlers> = OnceLock::new();

impl ExitHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide list
    pub fn global() -> &'static ExitHandlers {
        GLOBAL_HANDLERS.get_or_init(ExitHandlers::new)
    }

    /// Append a handler; it runs after all previously registered ones
    pub fn register<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handlers.lock().push(Arc::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.lock().is_empty()
    }

    /// Run every handler in registration order
    ///
    /// The list is snapshotted first, so a handler may register further
    /// handlers; those run on the next call. A panicking handler is reported
    /// on stderr and the remaining handlers still run. Returns the number of
    /// handlers that completed.
    pub fn run_all(&self) -> usize {
        let snapshot: Vec<ExitHandler> = self.handlers.lock().clone();
        let mut completed = 0;

        for (idx, handler) in snapshot.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| handler())) {
                Ok(()) => completed += 1,
                Err(e) => {
                    let panic_msg = if let Some(s) = e.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = e.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    eprintln!("[LOGGER ERROR] Exit handler #{} panicked: {}", idx, panic_msg);
                }
            }
        }

        completed
    }
}

impl std::fmt::Debug for ExitHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExitHandlers")
            .field("len", &self.len())
            .finish()
    }
}

/// Register a handler on the process-wide list
///
/// Handlers run, in registration order, when any logger using the global
/// list emits a fatal record. They are never removed.
///
/// ```
/// hlog::register_exit_handler(|| {
///     // flush buffers, close connections ...
/// });
/// ```
pub fn register_exit_handler<F>(handler: F)
where
    F: Fn() + Send + Sync + 'static,
{
    ExitHandlers::global().register(handler);
}
