use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use server_api::ApiContext;
use shared::{domain::RecordId, protocol::NewEmployee};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://./data/employees.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert every employee from a JSON array file (camelCase keys).
    Seed { file: PathBuf },
    List,
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;
    let ctx = ApiContext { storage };

    match cli.command {
        Command::Seed { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read '{}'", file.display()))?;
            let employees: Vec<NewEmployee> = serde_json::from_str(&raw).with_context(|| {
                format!("'{}' is not a JSON array of employees", file.display())
            })?;
            for employee in employees {
                let employee_id = employee.employee_id.clone();
                match server_api::create_employee(&ctx, employee).await {
                    Ok(record) => {
                        println!("created id={} employee_id={}", record.id, record.employee_id)
                    }
                    Err(err) => println!("skipped employee_id={employee_id}: {}", err.message),
                }
            }
        }
        Command::List => {
            for record in server_api::list_employees(&ctx).await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}/10",
                    record.id,
                    record.employee_id,
                    record.name,
                    record.department,
                    record.skill_rating
                );
            }
        }
        Command::Delete { id } => {
            server_api::delete_employee(&ctx, RecordId(id)).await?;
            println!("deleted id={id}");
        }
    }

    Ok(())
}
