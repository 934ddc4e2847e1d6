//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and talks to the external
//! collaborators. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling per screen
//! - `navigation`: Access gate, menu and screen transitions
//! - `library`: Library loading, previews, bulk actions and uploads

mod input;
mod navigation;
mod library;

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::backend::{FilePicker, MediaBackend};
use crate::error::BackendError;
use crate::model::{AccessGate, AppModel, BulkActionCoordinator};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    gate: AccessGate,
    backend: Arc<dyn MediaBackend>,
    bulk: BulkActionCoordinator,
    picker: Arc<dyn FilePicker>,
    /// Background bulk action started from the open library screen
    pending_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        gate: AccessGate,
        backend: Arc<dyn MediaBackend>,
        picker: Arc<dyn FilePicker>,
    ) -> Self {
        Self {
            model,
            gate,
            bulk: BulkActionCoordinator::new(backend.clone()),
            backend,
            picker,
            pending_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Abort the in-flight bulk action, if any
    pub async fn cancel_pending_task(&self) {
        if let Some(handle) = self.pending_task.lock().await.take() {
            if !handle.is_finished() {
                tracing::info!("Cancelling pending bulk action");
                handle.abort();
            }
        }
    }

    pub(crate) fn format_error(error: &BackendError) -> String {
        match error {
            BackendError::Unavailable(_) => "Media storage is unreachable. Please try again later.".to_string(),
            BackendError::ItemNotFound(id) => format!("Item {} no longer exists.", id),
            BackendError::Rejected(reason) => format!("Request rejected: {}", reason),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    #[test]
    fn backend_errors_become_user_messages() {
        assert_eq!(
            AppController::format_error(&BackendError::ItemNotFound(ItemId(4))),
            "Item #4 no longer exists."
        );
        assert!(AppController::format_error(&BackendError::Unavailable("x".into())).contains("unreachable"));
    }
}
