//! Background activity recording.
//!
//! Admin handlers hand entries to [`ActivityRecorder::record`], which spawns
//! the write onto the runtime and returns immediately. A slow or failing
//! `activity_logs` insert never holds up the response.

use std::sync::Arc;

use tokio::task::JoinHandle;

use ansania_core::{ActivityData, ActivitySink, LogOutcome, PgActivitySink, log_activity};

/// Fire-and-forget wrapper around an [`ActivitySink`].
#[derive(Debug)]
pub struct ActivityRecorder<S = PgActivitySink> {
    sink: Arc<S>,
}

impl<S> Clone for ActivityRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S: ActivitySink + 'static> ActivityRecorder<S> {
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Record an action in the background.
    ///
    /// The returned handle resolves to the outcome; dropping it detaches the
    /// task without cancelling the write.
    pub fn record(&self, action: impl Into<String>, data: ActivityData) -> JoinHandle<LogOutcome> {
        let sink = Arc::clone(&self.sink);
        let action = action.into();
        tokio::spawn(async move { log_activity(sink.as_ref(), &action, data).await })
    }
}
