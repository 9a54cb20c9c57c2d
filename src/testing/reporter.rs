//! Test failure sink.

use std::sync::Arc;

use parking_lot::Mutex;

/// Collects failures reported during a test.
///
/// [`error`](TestReporter::error) records a failure and lets the test go on;
/// [`fatal`](TestReporter::fatal) records one and marks the test aborted so
/// the scenario can skip its remaining assertions. Nothing panics until
/// [`finish`](TestReporter::finish), which keeps teardown running after a
/// failed assertion.
///
/// Clones share the same failure list, so a reporter can be moved into
/// teardown steps.
///
/// ```rust
/// use vpckit::testing::TestReporter;
///
/// let reporter = TestReporter::new("TestVPC_Create");
/// reporter.error("label mismatch");
/// assert!(reporter.failed());
/// assert!(!reporter.aborted());
/// ```
#[derive(Clone)]
pub struct TestReporter {
    name: Arc<str>,
    state: Arc<Mutex<ReporterState>>,
}

#[derive(Default)]
struct ReporterState {
    failures: Vec<String>,
    aborted: bool,
}

impl TestReporter {
    /// Creates a reporter for the named test.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            state: Arc::new(Mutex::new(ReporterState::default())),
        }
    }

    /// Returns the test name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records a non-fatal failure.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(test = %self.name, "{}", message);
        self.state.lock().failures.push(message);
    }

    /// Records a failure and marks the test as aborted.
    pub fn fatal(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(test = %self.name, fatal = true, "{}", message);
        let mut state = self.state.lock();
        state.failures.push(message);
        state.aborted = true;
    }

    /// Returns `true` if any failure was recorded.
    pub fn failed(&self) -> bool {
        !self.state.lock().failures.is_empty()
    }

    /// Returns `true` if a fatal failure was recorded.
    pub fn aborted(&self) -> bool {
        self.state.lock().aborted
    }

    /// Returns a copy of the recorded failures, oldest first.
    pub fn failures(&self) -> Vec<String> {
        self.state.lock().failures.clone()
    }

    /// Fails the test if anything was reported.
    ///
    /// All failures are listed in the panic message.
    pub fn finish(&self) {
        let failures = self.failures();
        assert!(
            failures.is_empty(),
            "{} failed with {} error(s):\n  {}",
            self.name,
            failures.len(),
            failures.join("\n  ")
        );
    }
}

impl std::fmt::Debug for TestReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TestReporter")
            .field("name", &self.name)
            .field("failures", &state.failures.len())
            .field("aborted", &state.aborted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_reporter_finishes() {
        let reporter = TestReporter::new("clean");
        assert!(!reporter.failed());
        reporter.finish();
    }

    #[test]
    fn test_clones_share_failures() {
        let reporter = TestReporter::new("shared");
        let clone = reporter.clone();
        clone.error("first");
        reporter.fatal("second");

        assert_eq!(reporter.failures(), vec!["first", "second"]);
        assert!(clone.aborted());
    }

    #[test]
    #[should_panic(expected = "label mismatch")]
    fn test_finish_panics_with_failures() {
        let reporter = TestReporter::new("failing");
        reporter.error("label mismatch");
        reporter.finish();
    }
}
