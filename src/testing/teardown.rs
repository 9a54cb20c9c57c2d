//! Scoped cleanup.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::runtime::{Handle, RuntimeFlavor};

type Step = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

struct Entry {
    label: String,
    step: Step,
}

/// A stack of cleanup steps released in reverse acquisition order.
///
/// Each step undoes one acquisition. [`run`](Teardown::run) releases them
/// last-in first-out and is idempotent. A `Teardown` dropped before it ran
/// (early return, failed assertion) runs its remaining steps from `Drop`.
///
/// A panicking step does not stop the others; the first panic is resumed
/// once every step has completed, unless the thread is already unwinding.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use vpckit::testing::Teardown;
///
/// let order = Arc::new(Mutex::new(Vec::new()));
/// let mut teardown = Teardown::new();
/// for name in ["fixture", "vpc"] {
///     let order = order.clone();
///     teardown.push(name, move || async move { order.lock().unwrap().push(name) });
/// }
///
/// futures::executor::block_on(teardown.run());
/// assert_eq!(*order.lock().unwrap(), ["vpc", "fixture"]);
/// ```
#[derive(Default)]
pub struct Teardown {
    steps: Vec<Entry>,
}

impl Teardown {
    /// Creates an empty teardown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a step; it runs before every step pushed earlier.
    pub fn push<F, Fut>(&mut self, label: impl Into<String>, step: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.steps.push(Entry {
            label: label.into(),
            step: Box::new(move || step().boxed()),
        });
    }

    /// Takes over the steps of a teardown acquired after this one.
    ///
    /// The appended steps are released before the existing ones.
    pub fn append(&mut self, mut later: Teardown) {
        self.steps.append(&mut later.steps);
    }

    /// Returns the number of pending steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no step is pending.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the pending step labels in release order.
    pub fn labels(&self) -> Vec<&str> {
        self.steps.iter().rev().map(|e| e.label.as_str()).collect()
    }

    /// Runs every pending step, last registered first.
    pub async fn run(&mut self) {
        let steps = std::mem::take(&mut self.steps);
        let mut first_panic: Option<Box<dyn Any + Send>> = None;

        for Entry { label, step } in steps.into_iter().rev() {
            tracing::debug!(step = %label, "teardown");
            let outcome = AssertUnwindSafe(async move { step().await })
                .catch_unwind()
                .await;
            if let Err(payload) = outcome {
                tracing::error!(step = %label, "teardown step panicked");
                first_panic.get_or_insert(payload);
            }
        }

        if let Some(payload) = first_panic
            && !std::thread::panicking()
        {
            std::panic::resume_unwind(payload);
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        let mut pending = Teardown {
            steps: std::mem::take(&mut self.steps),
        };
        tracing::debug!(steps = pending.len(), "teardown dropped before running");

        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(pending.run()));
            }
            Ok(_) => {
                // A current-thread runtime cannot be blocked from inside.
                let joined = std::thread::spawn(move || {
                    match tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                    {
                        Ok(runtime) => runtime.block_on(pending.run()),
                        Err(e) => {
                            tracing::error!(error = %e, "cannot start teardown runtime, skipping cleanup")
                        }
                    }
                })
                .join();
                if let Err(payload) = joined
                    && !std::thread::panicking()
                {
                    std::panic::resume_unwind(payload);
                }
            }
            Err(_) => futures::executor::block_on(pending.run()),
        }
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("steps", &self.labels())
            .finish()
    }
}
