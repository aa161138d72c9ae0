use super::*;
use client_core::reducer::{reduce, Action};
use shared::domain::RecordId;

fn alice() -> EmployeeRecord {
    EmployeeRecord {
        id: RecordId(3),
        employee_id: "E01".into(),
        name: "alice".into(),
        department: "Engineering".into(),
        designation: "Engineer".into(),
        primary_skill: "Rust".into(),
        secondary_skill: String::new(),
        skill_rating: 7,
        years_of_experience: 3,
        email: "alice@example.com".into(),
    }
}

#[test]
fn empty_directory_invites_adding_an_employee() {
    let mut state = DirectoryState::default();
    assert_eq!(render_state(&state), "Loading employees...");

    reduce(&mut state, Action::RefreshSucceeded(Vec::new()));
    assert_eq!(render_state(&state), EMPTY_DIRECTORY);
}

#[test]
fn rows_show_rating_out_of_ten_and_years() {
    let row = render_row(&alice(), false);
    assert_eq!(
        row,
        "[3] A alice (E01) | Engineering / Engineer | Rust + - | 7/10 | 3 years | alice@example.com"
    );
    assert!(render_row(&alice(), true).ends_with("(deleting...)"));
}

#[test]
fn missing_search_result_names_the_query() {
    let mut state = DirectoryState::default();
    reduce(&mut state, Action::RefreshSucceeded(vec![alice()]));
    reduce(&mut state, Action::SearchStarted { query: "E99".into() });
    reduce(&mut state, Action::SearchFailed);

    assert!(render_state(&state).starts_with("No employee matches \"E99\"."));
}

#[test]
fn notifications_are_tagged_by_kind() {
    assert_eq!(
        render_notification(&Notification::error("Failed to load employees.")),
        "[error] Failed to load employees."
    );
    assert_eq!(
        render_notification(&Notification::success("Employee added successfully!")),
        "[ok] Employee added successfully!"
    );
}
