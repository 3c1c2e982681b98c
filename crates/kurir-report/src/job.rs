//! Background report jobs.
//!
//! The surface (CLI today, possibly a GUI later) runs one pipeline at a
//! time off its foreground loop. A [`ReportJob`] wraps the spawned task
//! and exposes completion state for polling plus a joined result; there
//! is no cancellation, matching the run-to-completion pipeline contract,
//! but the handle is the seam where one would go.

use std::future::Future;

use tokio::task::JoinHandle;

use crate::ReportError;

/// Handle to a single in-flight report pipeline.
pub struct ReportJob<T> {
    handle: JoinHandle<Result<T, ReportError>>,
}

impl<T: Send + 'static> ReportJob<T> {
    /// Spawns the pipeline future onto the runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, ReportError>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// True once the pipeline has produced a result (or died). Safe to
    /// poll from a foreground loop.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the pipeline and returns its result. A panicked job is
    /// surfaced as [`ReportError::Unexpected`] carrying the original
    /// diagnostic text.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's own error, or `Unexpected` if the task
    /// panicked or was aborted.
    pub async fn join(self) -> Result<T, ReportError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(ReportError::Unexpected(e.to_string())),
        }
    }
}
