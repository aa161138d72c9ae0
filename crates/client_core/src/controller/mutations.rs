use std::sync::Arc;

use shared::domain::RecordId;
use tracing::{debug, info, warn};

use super::{DirectoryController, OperationOutcome};
use crate::{
    form::EmployeeForm,
    notification::Notification,
    reducer::Action,
    state::ViewMode,
};

const CREATE_SUCCEEDED_TEXT: &str = "Employee added successfully!";
const CREATE_FAILED_TEXT: &str = "Failed to add employee. Please try again.";
const UPDATE_SUCCEEDED_TEXT: &str = "Employee updated successfully!";
const UPDATE_FAILED_TEXT: &str = "Failed to update employee. Please try again.";
const DELETE_FAILED_TEXT: &str = "Failed to delete employee. Please try again.";

/// Proof that the user was asked before a delete. Obtained from
/// [`DirectoryController::request_delete`] and spent by
/// [`DirectoryController::confirm_delete`].
#[derive(Debug)]
#[must_use = "nothing is deleted until the confirmation is passed to confirm_delete"]
pub struct DeleteConfirmation {
    record_id: RecordId,
    name: String,
}

impl DeleteConfirmation {
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete employee \"{}\"? This action cannot be undone.",
            self.name
        )
    }
}

impl DirectoryController {
    pub async fn open_form(&self) -> OperationOutcome {
        applied(self.dispatch(Action::FormOpened).await)
    }

    /// Closes the add form and discards the draft.
    pub async fn cancel_form(&self) -> OperationOutcome {
        applied(self.dispatch(Action::FormCancelled).await)
    }

    pub async fn update_create_draft(&self, draft: EmployeeForm) -> OperationOutcome {
        applied(self.dispatch(Action::CreateDraftChanged(draft)).await)
    }

    /// Submits the add-form draft. On failure the form stays open with the
    /// draft intact.
    pub async fn submit_create(self: &Arc<Self>) -> OperationOutcome {
        let draft = self
            .read(|state| {
                (state.view_mode == ViewMode::FormOpen && !state.create_form.submitting)
                    .then(|| state.create_form.draft.clone())
            })
            .await;
        let Some(draft) = draft else {
            return OperationOutcome::Ignored;
        };

        let employee = match draft.to_new_employee() {
            Ok(employee) => employee,
            Err(err) => {
                debug!(error = %err, "add form rejected before submit");
                self.show_notification(Notification::error(err.to_string()))
                    .await;
                return OperationOutcome::Failed;
            }
        };
        if !self.dispatch(Action::CreateStarted).await {
            return OperationOutcome::Ignored;
        }

        match self.client.create(&employee).await {
            Ok(record) => {
                info!(record_id = record.id.0, employee_id = %record.employee_id, "employee added");
                self.dispatch(Action::CreateSucceeded).await;
                self.show_notification(Notification::success(CREATE_SUCCEEDED_TEXT))
                    .await;
                self.refresh().await;
                OperationOutcome::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "failed to add employee");
                self.dispatch(Action::CreateFailed).await;
                self.show_notification(Notification::error(CREATE_FAILED_TEXT))
                    .await;
                OperationOutcome::Failed
            }
        }
    }

    /// Opens the edit dialog for a record in the directory or the search
    /// result.
    pub async fn open_edit(&self, id: RecordId) -> OperationOutcome {
        let record = self.read(|state| state.find_record(id).cloned()).await;
        let Some(record) = record else {
            return OperationOutcome::Ignored;
        };
        applied(self.dispatch(Action::EditOpened(record)).await)
    }

    pub async fn update_edit_draft(&self, draft: EmployeeForm) -> OperationOutcome {
        applied(self.dispatch(Action::EditDraftChanged(draft)).await)
    }

    /// Ignored while an update is in flight.
    pub async fn close_edit(&self) -> OperationOutcome {
        applied(self.dispatch(Action::EditClosed).await)
    }

    /// Sends the edit draft for the record it was opened on. On failure the
    /// dialog stays open.
    pub async fn submit_update(self: &Arc<Self>) -> OperationOutcome {
        let session = self
            .read(|state| {
                state
                    .edit
                    .as_ref()
                    .filter(|edit| !edit.submitting)
                    .map(|edit| (edit.record_id, edit.draft.clone()))
            })
            .await;
        let Some((record_id, draft)) = session else {
            return OperationOutcome::Ignored;
        };

        let update = match draft.to_update() {
            Ok(update) => update,
            Err(err) => {
                debug!(record_id = record_id.0, error = %err, "edit form rejected before submit");
                self.show_notification(Notification::error(err.to_string()))
                    .await;
                return OperationOutcome::Failed;
            }
        };
        if !self.dispatch(Action::UpdateStarted).await {
            return OperationOutcome::Ignored;
        }

        match self.client.update_by_id(record_id, &update).await {
            Ok(_) => {
                info!(record_id = record_id.0, "employee updated");
                self.dispatch(Action::UpdateSucceeded).await;
                self.show_notification(Notification::success(UPDATE_SUCCEEDED_TEXT))
                    .await;
                self.refresh().await;
                OperationOutcome::Succeeded
            }
            Err(err) => {
                warn!(record_id = record_id.0, error = %err, "failed to update employee");
                self.dispatch(Action::UpdateFailed).await;
                self.show_notification(Notification::error(UPDATE_FAILED_TEXT))
                    .await;
                OperationOutcome::Failed
            }
        }
    }

    /// First phase of a delete. `None` when the record is unknown or a delete
    /// for it is already in flight.
    pub async fn request_delete(&self, id: RecordId) -> Option<DeleteConfirmation> {
        self.read(|state| {
            if state.is_deleting(id) {
                return None;
            }
            state.find_record(id).map(|record| DeleteConfirmation {
                record_id: record.id,
                name: record.name.clone(),
            })
        })
        .await
    }

    pub fn decline_delete(&self, confirmation: DeleteConfirmation) {
        debug!(record_id = confirmation.record_id.0, "delete declined");
    }

    /// Second phase of a delete. Deleting the record shown as the search
    /// result also clears the search.
    pub async fn confirm_delete(
        self: &Arc<Self>,
        confirmation: DeleteConfirmation,
    ) -> OperationOutcome {
        let DeleteConfirmation { record_id, name } = confirmation;
        if !self.dispatch(Action::DeleteStarted(record_id)).await {
            return OperationOutcome::Ignored;
        }

        let result = self.client.delete_by_id(record_id).await;
        self.dispatch(Action::DeleteFinished(record_id)).await;

        match result {
            Ok(()) => {
                info!(record_id = record_id.0, "employee deleted");
                let was_search_result = self
                    .read(|state| {
                        state.search.result.as_ref().map(|record| record.id) == Some(record_id)
                    })
                    .await;
                if was_search_result {
                    self.clear_search().await;
                }
                self.show_notification(Notification::success(format!(
                    "Employee \"{name}\" deleted successfully!"
                )))
                .await;
                self.refresh().await;
                OperationOutcome::Succeeded
            }
            Err(err) => {
                warn!(record_id = record_id.0, error = %err, "failed to delete employee");
                self.show_notification(Notification::error(DELETE_FAILED_TEXT))
                    .await;
                OperationOutcome::Failed
            }
        }
    }
}

fn applied(applied: bool) -> OperationOutcome {
    if applied {
        OperationOutcome::Succeeded
    } else {
        OperationOutcome::Ignored
    }
}
