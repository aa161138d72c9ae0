use std::sync::Arc;

use tracing::{debug, warn};

use super::{DirectoryController, OperationOutcome};
use crate::{notification::Notification, reducer::Action};

impl DirectoryController {
    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.dispatch(Action::SearchQueryChanged(query.into()))
            .await;
    }

    /// Looks up one record by its employee id and switches to the search
    /// result view, found or not. Blank queries and submissions while a
    /// search is in flight are ignored.
    pub async fn search(self: &Arc<Self>, query: &str) -> OperationOutcome {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return OperationOutcome::Ignored;
        }
        if !self
            .dispatch(Action::SearchStarted {
                query: query.to_string(),
            })
            .await
        {
            return OperationOutcome::Ignored;
        }

        match self.client.search_by_id(trimmed).await {
            Ok(record) => {
                debug!(query = trimmed, record_id = record.id.0, "employee found");
                let text = format!("Employee found: {}", record.name);
                self.dispatch(Action::SearchSucceeded(record)).await;
                self.show_notification(Notification::success(text)).await;
                OperationOutcome::Succeeded
            }
            Err(err) => {
                warn!(query = trimmed, error = %err, "employee search failed");
                self.dispatch(Action::SearchFailed).await;
                self.show_notification(Notification::error(format!(
                    "Employee with ID \"{trimmed}\" not found."
                )))
                .await;
                OperationOutcome::Failed
            }
        }
    }

    /// Searches for the query currently held in state.
    pub async fn submit_search(self: &Arc<Self>) -> OperationOutcome {
        let query = self.read(|state| state.search.query.clone()).await;
        self.search(&query).await
    }

    /// Back to the full directory; also drops any notification.
    pub async fn clear_search(&self) -> OperationOutcome {
        self.dispatch(Action::SearchCleared).await;
        self.dismiss_notification().await;
        OperationOutcome::Succeeded
    }
}
