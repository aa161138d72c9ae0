use std::sync::Arc;

use tracing::{debug, warn};

use super::{DirectoryController, OperationOutcome};
use crate::{notification::Notification, reducer::Action, state::ViewMode};

pub(crate) const LOAD_FAILED_TEXT: &str =
    "Failed to load employees. Please check if the backend is running.";

impl DirectoryController {
    /// Replaces the authoritative set with the backend's. No retry on failure.
    pub async fn refresh(self: &Arc<Self>) -> OperationOutcome {
        match self.client.list().await {
            Ok(records) => {
                debug!(count = records.len(), "employee directory refreshed");
                self.dispatch(Action::RefreshSucceeded(records)).await;
                OperationOutcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "failed to load employees");
                self.dispatch(Action::RefreshFailed).await;
                self.show_notification(Notification::error(LOAD_FAILED_TEXT))
                    .await;
                OperationOutcome::Failed
            }
        }
    }

    /// Leaves a search result, if one is shown, and refetches the full set.
    pub async fn show_all(self: &Arc<Self>) -> OperationOutcome {
        if self
            .read(|state| state.view_mode == ViewMode::SearchResult)
            .await
        {
            self.clear_search().await;
        }
        self.refresh().await
    }
}
