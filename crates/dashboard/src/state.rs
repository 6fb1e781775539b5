//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use soh_allocations_core::Dataset;

use crate::session::Session;

/// Application state shared across all handlers.
///
/// Cloning is cheap: everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    dataset: Arc<Dataset>,
    session: Mutex<Session>,
}

impl AppState {
    /// Build state around a loaded dataset with an idle session.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let session = Session::new(Arc::clone(&dataset));
        Self {
            inner: Arc::new(AppStateInner {
                dataset,
                session: Mutex::new(session),
            }),
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.inner.dataset
    }

    /// Lock the dashboard session.
    ///
    /// Requests are serialized through this lock so events apply one at a
    /// time in arrival order.
    pub async fn session(&self) -> MutexGuard<'_, Session> {
        self.inner.session.lock().await
    }
}
