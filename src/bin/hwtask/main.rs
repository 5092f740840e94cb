mod list;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::debug;

use hwtask::dispatch::{DispatchError, Dispatcher};
use hwtask::load_project;
use hwtask::targets::target::Target;

#[derive(Parser, Debug)]
#[command(
    name = "hwtask",
    version,
    about = "Run the homework_01 project tasks: install, run, lint, test"
)]
struct Cli {
    /// Target to run (install, run, lint, test)
    #[arg(required_unless_present = "list")]
    target: Option<String>,

    /// List targets and the commands they run
    #[arg(short, long, conflicts_with_all = ["target", "dry_run"])]
    list: bool,

    /// Print the command for the target instead of running it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Run in this directory instead of the current one
    #[arg(short = 'C', long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Path to project file, relative to the run directory (auto-detected if not specified)
    #[arg(short, long)]
    config: Option<String>,

    /// Also write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File, String> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("unable to open log file {}: {e}", path.display()))
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Unknown names are rejected before anything else can fail
    let target = match cli.target.as_deref().map(str::parse::<Target>).transpose() {
        Ok(target) => target,
        Err(e) => return Ok(report(&DispatchError::from(e))),
    };

    let log_file = cli.log_file.as_deref().map(open_log_file).transpose()?;
    hwtask::logger::init(cli.verbose, log_file)?;

    let project = load_project(cli.config.as_deref(), cli.directory.as_deref())?;

    if cli.list {
        list::run(&project);
        return Ok(ExitCode::SUCCESS);
    }

    // clap enforces a target unless --list was given
    let Some(target) = target else {
        return Ok(ExitCode::from(2));
    };

    let mut dispatcher = Dispatcher::new(project);
    debug!("Project: {:?}", dispatcher.project());
    if cli.dry_run {
        println!("{}", dispatcher.resolve(target));
        return Ok(ExitCode::SUCCESS);
    }

    Ok(match dispatcher.dispatch_target(target) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(e) => report(&e),
    })
}

fn report(error: &DispatchError) -> ExitCode {
    eprintln!("Error: {error}");
    ExitCode::from(error.exit_code())
}
