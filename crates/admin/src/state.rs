//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use ansania_core::PgActivitySink;

use crate::services::ActivityRecorder;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the database pool and the activity recorder.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    activity: ActivityRecorder,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Activity entries are written to `activity_logs` through the same pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let activity = ActivityRecorder::new(PgActivitySink::new(pool.clone()));
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                activity,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the background activity recorder.
    #[must_use]
    pub fn activity(&self) -> &ActivityRecorder {
        &self.inner.activity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    #[tokio::test]
    async fn test_state_shares_one_pool() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://ansania@localhost/ansania")
            .unwrap();

        let state = AppState::new(pool);
        let clone = state.clone();

        assert_eq!(state.pool().size(), 0);
        assert!(Arc::ptr_eq(&state.inner, &clone.inner));
    }
}
