//! `nameday` — identity code checks and nameday resolution from the shell.
//!
//! The binary is a thin boundary around the pure library: it reads JSON
//! files, takes "today" from the local clock, and prints JSON results.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;

use nameday_engine::{identity, roster, NamedayEntry, NamedayResolver, Person};

#[derive(Parser)]
#[command(
    name = "nameday",
    version,
    about = "Identity code validation and nameday resolution"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an identity code and print the decoded fields as JSON
    Check {
        /// The 10-digit identity code
        code: String,
    },
    /// Resolve the nameday for a given name against a mapping table
    Resolve {
        /// The person's first name
        name: String,
        /// JSON file with an array of {name, month, day} entries
        #[arg(long)]
        table: PathBuf,
    },
    /// List people with a birthday or nameday in the next N days
    Upcoming {
        /// JSON file with an array of person records
        #[arg(long)]
        people: PathBuf,
        /// Window size in days, inclusive
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
}

#[derive(Serialize)]
struct ResolvedNameday<'a> {
    name: &'a str,
    month: u32,
    day: u32,
    next: Option<NaiveDate>,
}

#[derive(Serialize)]
struct UpcomingRow {
    name: String,
    email: Option<String>,
    next_celebration: Option<NaiveDate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match cli.command {
        Command::Check { code } => {
            let decoded = identity::decode(&code, today)?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
        Command::Resolve { name, table } => {
            let resolver = load_resolver(&table)?;
            match resolver.resolve(&name) {
                Some(entry) => {
                    let resolved = ResolvedNameday {
                        name: &entry.name,
                        month: entry.month,
                        day: entry.day,
                        next: entry.month_day().next_from(today),
                    };
                    println!("{}", serde_json::to_string_pretty(&resolved)?);
                }
                // Absence is a result, not an error.
                None => println!("null"),
            }
        }
        Command::Upcoming { people, days } => {
            let people = load_people(&people)?;
            let rows: Vec<UpcomingRow> = roster::upcoming_celebrations(&people, today, days)
                .into_iter()
                .map(|p| UpcomingRow {
                    name: p.full_name(),
                    email: p.email.clone(),
                    next_celebration: p.next_celebration(today),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}

fn load_resolver(path: &Path) -> Result<NamedayResolver> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read nameday table {}", path.display()))?;
    let entries: Vec<NamedayEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("malformed nameday table {}", path.display()))?;
    for entry in &entries {
        entry
            .validate()
            .with_context(|| format!("invalid entry in {}", path.display()))?;
    }
    Ok(NamedayResolver::new(entries))
}

fn load_people(path: &Path) -> Result<Vec<Person>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read people file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed people file {}", path.display()))
}
