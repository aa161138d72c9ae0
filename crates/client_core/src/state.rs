//! The single state container behind every directory view.

use std::collections::BTreeSet;

use shared::domain::{EmployeeRecord, RecordId};

use crate::{form::EmployeeForm, notification::ActiveNotification};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Directory,
    FormOpen,
    SearchResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub result: Option<EmployeeRecord>,
    pub searching: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateFormState {
    pub draft: EmployeeForm,
    pub submitting: bool,
}

/// Edit dialog for one record, keyed by the server id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub record_id: RecordId,
    pub draft: EmployeeForm,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryState {
    pub records: Vec<EmployeeRecord>,
    pub loading: bool,
    pub view_mode: ViewMode,
    pub search: SearchState,
    pub create_form: CreateFormState,
    pub edit: Option<EditSession>,
    pub deleting: BTreeSet<RecordId>,
    pub notification: Option<ActiveNotification>,
    pub(crate) notification_seq: u64,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            view_mode: ViewMode::Directory,
            search: SearchState::default(),
            create_form: CreateFormState::default(),
            edit: None,
            deleting: BTreeSet::new(),
            notification: None,
            notification_seq: 0,
        }
    }
}

/// What the main panel renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Form(&'a CreateFormState),
    Directory(&'a [EmployeeRecord]),
    SearchResult(Option<&'a EmployeeRecord>),
}

impl DirectoryState {
    pub fn view(&self) -> View<'_> {
        match self.view_mode {
            ViewMode::FormOpen => View::Form(&self.create_form),
            _ if self.loading => View::Loading,
            ViewMode::Directory => View::Directory(&self.records),
            ViewMode::SearchResult => View::SearchResult(self.search.result.as_ref()),
        }
    }

    /// Rows of the directory table: the whole set, or just the search result.
    pub fn visible_records(&self) -> Vec<&EmployeeRecord> {
        match self.view_mode {
            ViewMode::SearchResult => self.search.result.iter().collect(),
            _ => self.records.iter().collect(),
        }
    }

    pub fn can_submit_search(&self) -> bool {
        !self.search.query.trim().is_empty() && !self.search.searching
    }

    pub fn is_deleting(&self, id: RecordId) -> bool {
        self.deleting.contains(&id)
    }

    /// Looks in the authoritative set first, then the search result.
    pub fn find_record(&self, id: RecordId) -> Option<&EmployeeRecord> {
        self.records
            .iter()
            .chain(self.search.result.iter())
            .find(|record| record.id == id)
    }
}
