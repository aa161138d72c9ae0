use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_client_settings, ClientSettings, DirectoryController, DirectoryEvent, EmployeeForm,
    FormField, HttpRecordClient, OperationOutcome, ViewMode,
};
use shared::domain::{RecordId, KNOWN_DEPARTMENTS};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin},
    sync::broadcast::error::RecvError,
};
use tracing_subscriber::EnvFilter;

mod command;
mod render;

use command::{parse_command, Command, HELP};

#[derive(Parser, Debug)]
struct Args {
    /// Base url of the employee collection. Overrides directory.toml.
    #[arg(long, env = "EMPLOYEE_API_URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_client_settings(Path::new("."));
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let client = build_client(&settings)?;
    tracing::info!(api_url = %client.base_url(), "starting employee directory");

    let controller = DirectoryController::new(Arc::new(client));
    tokio::spawn(print_notifications(controller.clone()));
    controller.start().await;

    let mut session = Session {
        controller,
        input: BufReader::new(tokio::io::stdin()).lines(),
    };
    session.run().await
}

fn build_client(settings: &ClientSettings) -> Result<HttpRecordClient> {
    HttpRecordClient::new(&settings.api_url)
        .with_context(|| format!("cannot use api url '{}'", settings.api_url))
}

async fn print_notifications(controller: Arc<DirectoryController>) {
    let mut events = controller.subscribe_events();
    loop {
        match events.recv().await {
            Ok(DirectoryEvent::NotificationShown(notification)) => {
                println!("{}", render::render_notification(&notification));
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "notification printer lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

struct Session {
    controller: Arc<DirectoryController>,
    input: Lines<BufReader<Stdin>>,
}

impl Session {
    async fn run(&mut self) -> Result<()> {
        println!("{HELP}");
        self.render().await;
        loop {
            let Some(line) = self.prompt("> ").await? else {
                return Ok(());
            };
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            };
            tracing::debug!(command = command.name(), "running command");
            match command {
                Command::Quit => return Ok(()),
                Command::Help => {
                    println!("{HELP}");
                    continue;
                }
                command => self.execute(command).await?,
            }
            self.render().await;
        }
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        let controller = self.controller.clone();
        match command {
            Command::List => {
                controller.show_all().await;
            }
            Command::Search(query) => {
                controller.set_search_query(query).await;
                if controller.submit_search().await == OperationOutcome::Ignored {
                    println!("Enter an employee id to search for (and close the add form first).");
                }
            }
            Command::Clear => {
                controller.clear_search().await;
            }
            Command::Add => self.add().await?,
            Command::Cancel => {
                let form = controller.cancel_form().await;
                let edit = controller.close_edit().await;
                if form == OperationOutcome::Ignored && edit == OperationOutcome::Ignored {
                    println!("Nothing to cancel.");
                }
            }
            Command::Edit(id) => self.edit(id).await?,
            Command::Delete(id) => self.delete(id).await?,
            Command::Dismiss => {
                controller.dismiss_notification().await;
            }
            Command::Help | Command::Quit => {}
        }
        Ok(())
    }

    async fn add(&mut self) -> Result<()> {
        let controller = self.controller.clone();
        let state = controller.snapshot().await;
        if controller.open_form().await == OperationOutcome::Ignored
            && state.view_mode != ViewMode::FormOpen
        {
            println!("Clear the search result before adding an employee.");
            return Ok(());
        }
        let draft = controller.snapshot().await.create_form.draft;
        let Some(draft) = self.fill_form(draft).await? else {
            return Ok(());
        };
        controller.update_create_draft(draft).await;
        controller.submit_create().await;
        Ok(())
    }

    async fn edit(&mut self, id: RecordId) -> Result<()> {
        let controller = self.controller.clone();
        if controller.open_edit(id).await == OperationOutcome::Ignored {
            println!("Cannot edit id {id}: no such employee, or the add form is open.");
            return Ok(());
        }
        let Some(edit) = controller.snapshot().await.edit else {
            return Ok(());
        };
        let Some(draft) = self.fill_form(edit.draft).await? else {
            return Ok(());
        };
        controller.update_edit_draft(draft).await;
        controller.submit_update().await;
        Ok(())
    }

    async fn delete(&mut self, id: RecordId) -> Result<()> {
        let controller = self.controller.clone();
        let Some(confirmation) = controller.request_delete(id).await else {
            println!("No employee with id {id}, or it is already being deleted.");
            return Ok(());
        };
        let answer = self
            .prompt(&format!("{} [y/N] ", confirmation.prompt()))
            .await?
            .unwrap_or_default();
        if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            controller.confirm_delete(confirmation).await;
        } else {
            controller.decline_delete(confirmation);
        }
        Ok(())
    }

    /// Prompts for every field, keeping the current value on an empty line.
    /// `None` when input ends part way.
    async fn fill_form(&mut self, mut draft: EmployeeForm) -> Result<Option<EmployeeForm>> {
        for field in FormField::ALL {
            let current = draft.get(field).to_string();
            let hint = match field {
                FormField::Department => format!(" ({})", KNOWN_DEPARTMENTS.join("/")),
                _ => String::new(),
            };
            let marker = if field.is_required() { "*" } else { "" };
            let label = if current.is_empty() {
                format!("{field}{marker}{hint}: ")
            } else {
                format!("{field}{marker}{hint} [{current}]: ")
            };
            let Some(value) = self.prompt(&label).await? else {
                return Ok(None);
            };
            if !value.trim().is_empty() {
                draft.set(field, value);
            }
        }
        Ok(Some(draft))
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(label.as_bytes()).await?;
        stdout.flush().await?;
        Ok(self.input.next_line().await?)
    }

    async fn render(&self) {
        let state = self.controller.snapshot().await;
        println!("{}", render::render_state(&state));
    }
}
