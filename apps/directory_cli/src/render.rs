//! Plain-text rendering of the controller state.

use std::fmt::Write as _;

use client_core::{notification::NotificationKind, state::DirectoryState, Notification, View};
use shared::domain::EmployeeRecord;

pub const EMPTY_DIRECTORY: &str =
    "No employees found. Get started by adding your first employee with 'add'.";

const FORM_OPEN: &str = "Add employee form is open ('add' to fill it in, 'cancel' to close).";

pub fn render_state(state: &DirectoryState) -> String {
    let mut out = String::new();
    match state.view() {
        View::Loading => out.push_str("Loading employees..."),
        View::Form(_) => out.push_str(FORM_OPEN),
        View::Directory([]) => out.push_str(EMPTY_DIRECTORY),
        View::Directory(records) => {
            let _ = writeln!(out, "Employees ({})", records.len());
            render_rows(&mut out, records.iter(), state);
        }
        View::SearchResult(Some(record)) => {
            let _ = writeln!(out, "Search result for \"{}\"", state.search.query.trim());
            render_rows(&mut out, std::iter::once(record), state);
            out.push_str("('clear' to go back to all employees)");
        }
        View::SearchResult(None) => {
            let _ = write!(
                out,
                "No employee matches \"{}\". ('clear' to go back to all employees)",
                state.search.query.trim()
            );
        }
    }
    if let Some(edit) = &state.edit {
        let _ = write!(out, "\nEditing record {}", edit.record_id);
        if edit.submitting {
            out.push_str(" (saving...)");
        }
    }
    out.trim_end().to_string()
}

fn render_rows<'a>(
    out: &mut String,
    records: impl Iterator<Item = &'a EmployeeRecord>,
    state: &DirectoryState,
) {
    for record in records {
        let _ = writeln!(out, "{}", render_row(record, state.is_deleting(record.id)));
    }
}

pub fn render_row(record: &EmployeeRecord, deleting: bool) -> String {
    let secondary = if record.secondary_skill.is_empty() {
        "-"
    } else {
        record.secondary_skill.as_str()
    };
    let mut row = format!(
        "[{}] {} {} ({}) | {} / {} | {} + {} | {}/10 | {} years | {}",
        record.id,
        record.initial().unwrap_or('?'),
        record.name,
        record.employee_id,
        record.department,
        record.designation,
        record.primary_skill,
        secondary,
        record.skill_rating,
        record.years_of_experience,
        record.email,
    );
    if deleting {
        row.push_str(" (deleting...)");
    }
    row
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
    };
    format!("[{tag}] {}", notification.text)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
