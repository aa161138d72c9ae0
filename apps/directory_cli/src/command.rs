//! Parsing of REPL input lines.

use shared::domain::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Clear,
    Add,
    Cancel,
    Edit(RecordId),
    Delete(RecordId),
    Dismiss,
    Help,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Search(_) => "search",
            Command::Clear => "clear",
            Command::Add => "add",
            Command::Cancel => "cancel",
            Command::Edit(_) => "edit",
            Command::Delete(_) => "delete",
            Command::Dismiss => "dismiss",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
commands:
  list                 leave any search result and refetch the full directory
  search <employeeId>  show the employee with that id
  clear                leave the search result
  add                  fill in and submit the add-employee form
  cancel               close the add form or edit dialog
  edit <id>            edit the record with server id <id>
  delete <id>          delete the record with server id <id>
  dismiss              hide the current notification
  help                 show this text
  quit                 exit";

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        // Blank queries are passed through; the controller ignores them.
        "search" | "find" => Command::Search(rest.to_string()),
        "clear" => Command::Clear,
        "add" | "new" => Command::Add,
        "cancel" => Command::Cancel,
        "edit" => Command::Edit(parse_record_id(rest)?),
        "delete" | "rm" => Command::Delete(parse_record_id(rest)?),
        "dismiss" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

fn parse_record_id(raw: &str) -> Result<RecordId, String> {
    if raw.is_empty() {
        return Err("expected a record id".to_string());
    }
    raw.parse::<i64>()
        .map(RecordId)
        .map_err(|_| format!("'{raw}' is not a record id"))
}

#[cfg(test)]
#[path = "tests/command_tests.rs"]
mod tests;
