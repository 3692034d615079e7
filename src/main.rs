use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use orderdesk_tools::config::SheetConfig;
use orderdesk_tools::dropdown::DropdownOutcome;
use orderdesk_tools::sync;
use orderdesk_tools::{Result, SheetError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| SheetError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Validate(args) => execute_validate(args),
        Command::Edit(args) => execute_edit(args),
    }
}

fn execute_validate(args: ValidateArgs) -> Result<i32> {
    let config = load_config(args.workbook.config.as_deref())?;
    let (input, output) = args.workbook.paths()?;

    let report = sync::validate_workbook(input, output, &config)?;
    println!(
        "{} row(s) checked, {} issue(s) written to '{}'",
        report.checked,
        report.issues.len(),
        config.issues_sheet
    );
    for failure in &report.failures {
        warn!(row = failure.row, error = %failure.error, "row skipped");
        eprintln!("row {}: {}", failure.row, failure.error);
    }
    Ok(if report.failures.is_empty() { 0 } else { 2 })
}

fn execute_edit(args: EditArgs) -> Result<i32> {
    let config = load_config(args.workbook.config.as_deref())?;
    let (input, output) = args.workbook.paths()?;
    match sync::edit_workbook(input, output, args.row - 1, &config)? {
        DropdownOutcome::Prompt => println!("{}", config.prompt_text),
        DropdownOutcome::Constrained { options, default } => {
            println!("options: {}", options.join(", "));
            if let Some(default) = default {
                println!("selected: {default}");
            }
        }
        DropdownOutcome::Unconstrained => println!("no matching paths, free text allowed"),
    }
    Ok(0)
}

fn load_config(path: Option<&Path>) -> Result<SheetConfig> {
    match path {
        Some(path) => SheetConfig::load(path),
        None => Ok(SheetConfig::default()),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Validate order workbooks and refresh path dropdowns.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check every order row against its path rules and publish the issues.
    Validate(ValidateArgs),
    /// Refresh the path dropdown of one order row.
    Edit(EditArgs),
}

#[derive(clap::Args)]
struct WorkbookArgs {
    /// Workbook to read.
    #[arg(long)]
    input: PathBuf,

    /// Where to save the result. Must differ from the input, whose dropdowns
    /// cannot be read back.
    #[arg(long)]
    output: PathBuf,

    /// JSON file overriding sheet and column names.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl WorkbookArgs {
    fn paths(&self) -> Result<(&Path, &Path)> {
        if !self.input.exists() {
            return Err(SheetError::MissingInput(self.input.clone()));
        }
        let same_file = match (fs::canonicalize(&self.input), fs::canonicalize(&self.output)) {
            (Ok(input), Ok(output)) => input == output,
            _ => self.input == self.output,
        };
        if same_file {
            return Err(SheetError::InPlaceOutput(self.output.clone()));
        }
        Ok((self.input.as_path(), self.output.as_path()))
    }
}

#[derive(clap::Args)]
struct ValidateArgs {
    #[command(flatten)]
    workbook: WorkbookArgs,
}

#[derive(clap::Args)]
struct EditArgs {
    #[command(flatten)]
    workbook: WorkbookArgs,

    /// Spreadsheet row (1-based) whose item changed.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    row: u32,
}
