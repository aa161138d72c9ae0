//! State transitions. Every change to [`DirectoryState`] goes through
//! [`reduce`], which refuses transitions the view state machine does not allow.

use shared::domain::{EmployeeRecord, RecordId};
use tokio::time::Instant;

use crate::{
    form::EmployeeForm,
    notification::{ActiveNotification, Notification},
    state::{CreateFormState, DirectoryState, EditSession, ViewMode},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RefreshSucceeded(Vec<EmployeeRecord>),
    RefreshFailed,
    SearchQueryChanged(String),
    SearchStarted { query: String },
    SearchSucceeded(EmployeeRecord),
    SearchFailed,
    SearchCleared,
    FormOpened,
    FormCancelled,
    CreateDraftChanged(EmployeeForm),
    CreateStarted,
    CreateSucceeded,
    CreateFailed,
    EditOpened(EmployeeRecord),
    EditDraftChanged(EmployeeForm),
    EditClosed,
    UpdateStarted,
    UpdateSucceeded,
    UpdateFailed,
    DeleteStarted(RecordId),
    DeleteFinished(RecordId),
    NotificationShown {
        notification: Notification,
        expires_at: Instant,
    },
    NotificationExpired { generation: u64 },
    NotificationDismissed,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::RefreshSucceeded(_) => "refresh_succeeded",
            Action::RefreshFailed => "refresh_failed",
            Action::SearchQueryChanged(_) => "search_query_changed",
            Action::SearchStarted { .. } => "search_started",
            Action::SearchSucceeded(_) => "search_succeeded",
            Action::SearchFailed => "search_failed",
            Action::SearchCleared => "search_cleared",
            Action::FormOpened => "form_opened",
            Action::FormCancelled => "form_cancelled",
            Action::CreateDraftChanged(_) => "create_draft_changed",
            Action::CreateStarted => "create_started",
            Action::CreateSucceeded => "create_succeeded",
            Action::CreateFailed => "create_failed",
            Action::EditOpened(_) => "edit_opened",
            Action::EditDraftChanged(_) => "edit_draft_changed",
            Action::EditClosed => "edit_closed",
            Action::UpdateStarted => "update_started",
            Action::UpdateSucceeded => "update_succeeded",
            Action::UpdateFailed => "update_failed",
            Action::DeleteStarted(_) => "delete_started",
            Action::DeleteFinished(_) => "delete_finished",
            Action::NotificationShown { .. } => "notification_shown",
            Action::NotificationExpired { .. } => "notification_expired",
            Action::NotificationDismissed => "notification_dismissed",
        }
    }
}

/// Applies `action`. Returns `false` when the action is not allowed in the
/// current state; the state is then left untouched.
pub fn reduce(state: &mut DirectoryState, action: Action) -> bool {
    match action {
        Action::RefreshSucceeded(records) => {
            state.records = records;
            state.loading = false;
        }
        Action::RefreshFailed => state.loading = false,

        Action::SearchQueryChanged(query) => state.search.query = query,
        Action::SearchStarted { query } => {
            if state.view_mode == ViewMode::FormOpen || state.search.searching {
                return false;
            }
            state.search.query = query;
            state.search.searching = true;
        }
        // Applied whatever happened since the search started, including a
        // clear; stale responses are not filtered out.
        Action::SearchSucceeded(record) => {
            state.search.result = Some(record);
            state.search.searching = false;
            state.view_mode = ViewMode::SearchResult;
        }
        Action::SearchFailed => {
            state.search.result = None;
            state.search.searching = false;
            state.view_mode = ViewMode::SearchResult;
        }
        Action::SearchCleared => {
            state.search.query.clear();
            state.search.result = None;
            if state.view_mode == ViewMode::SearchResult {
                state.view_mode = ViewMode::Directory;
            }
        }

        Action::FormOpened => {
            if state.view_mode != ViewMode::Directory || state.search.searching {
                return false;
            }
            state.view_mode = ViewMode::FormOpen;
        }
        Action::FormCancelled => {
            if state.view_mode != ViewMode::FormOpen || state.create_form.submitting {
                return false;
            }
            state.create_form = CreateFormState::default();
            state.view_mode = ViewMode::Directory;
        }
        Action::CreateDraftChanged(draft) => {
            if state.view_mode != ViewMode::FormOpen || state.create_form.submitting {
                return false;
            }
            state.create_form.draft = draft;
        }
        Action::CreateStarted => {
            if state.view_mode != ViewMode::FormOpen || state.create_form.submitting {
                return false;
            }
            state.create_form.submitting = true;
        }
        Action::CreateSucceeded => {
            state.create_form = CreateFormState::default();
            if state.view_mode == ViewMode::FormOpen {
                state.view_mode = ViewMode::Directory;
            }
        }
        Action::CreateFailed => state.create_form.submitting = false,

        Action::EditOpened(record) => {
            if state.view_mode == ViewMode::FormOpen
                || state.edit.as_ref().is_some_and(|edit| edit.submitting)
            {
                return false;
            }
            state.edit = Some(EditSession {
                record_id: record.id,
                draft: EmployeeForm::from_record(&record),
                submitting: false,
            });
        }
        Action::EditDraftChanged(draft) => match state.edit.as_mut() {
            Some(edit) if !edit.submitting => edit.draft = draft,
            _ => return false,
        },
        Action::EditClosed => match state.edit.as_ref() {
            Some(edit) if !edit.submitting => state.edit = None,
            _ => return false,
        },
        Action::UpdateStarted => match state.edit.as_mut() {
            Some(edit) if !edit.submitting => edit.submitting = true,
            _ => return false,
        },
        Action::UpdateSucceeded => state.edit = None,
        Action::UpdateFailed => match state.edit.as_mut() {
            Some(edit) => edit.submitting = false,
            None => return false,
        },

        Action::DeleteStarted(id) => return state.deleting.insert(id),
        Action::DeleteFinished(id) => return state.deleting.remove(&id),

        Action::NotificationShown {
            notification,
            expires_at,
        } => {
            state.notification_seq += 1;
            state.notification = Some(ActiveNotification {
                notification,
                generation: state.notification_seq,
                expires_at,
            });
        }
        Action::NotificationExpired { generation } => match state.notification.as_ref() {
            Some(active) if active.generation == generation => state.notification = None,
            _ => return false,
        },
        Action::NotificationDismissed => {
            if state.notification.take().is_none() {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
