use std::io::{self, BufRead};

use shell_words::split;
use tracing::{debug, info};

use crate::{
    cli::{
        commands::{
            parse_command, suggest, Command, LoopControl, ParseError, ShellContext,
            INVALID_CHOICE,
        },
        io as prompts,
        output::{self, OutputPreferences},
    },
    config::ConfigManager,
    core::ExpenseTracker,
    errors::CliError,
};

/// Setting this variable switches the CLI to line-oriented script mode on stdin.
pub const SCRIPT_ENV: &str = "EXPENSE_LEDGER_CLI_SCRIPT";

const MENU_TITLE: &str = "Personal Finance Manager";
const MENU_ITEMS: &[&str] = &[
    "Add Expense",
    "Generate Report",
    "Monthly Summary",
    "Plot Expenses",
    "Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    output::set_preferences(OutputPreferences {
        plain: mode == CliMode::Script,
    });

    let manager = ConfigManager::new();
    let config = manager.load()?;
    info!(config = %manager.path().display(), ledger = %config.data_file.display(), "starting");
    let tracker = ExpenseTracker::open(&config)?;
    let mut context = ShellContext::new(tracker);

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    loop {
        output::section(MENU_TITLE);
        let choice = prompts::select(context.theme(), "Choose an option", MENU_ITEMS)?;
        let result = match choice {
            0 => context.prompt_expense().map(|_| LoopControl::Continue),
            1 => context.execute(Command::Report),
            2 => context.execute(Command::Monthly),
            3 => context.execute(Command::Plot),
            4 => context.execute(Command::Exit),
            _ => {
                output::warning(INVALID_CHOICE);
                Ok(LoopControl::Continue)
            }
        };
        match result {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => report_error(err)?,
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let tokens = match split(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse `{trimmed}`: {err}"));
            return Ok(LoopControl::Continue);
        }
    };
    debug!(line = trimmed, "script line");

    match parse_command(&tokens) {
        Ok(command) => context.execute(command),
        Err(ParseError::Usage(usage)) => {
            output::warning(format!("Usage: {usage}"));
            Ok(LoopControl::Continue)
        }
        Err(ParseError::Unknown(name)) => {
            output::warning(INVALID_CHOICE);
            if let Some(candidate) = suggest(&name) {
                output::info(format!("Did you mean `{candidate}`?"));
            }
            Ok(LoopControl::Continue)
        }
    }
}

/// Prints recoverable errors; prompt and terminal failures end the session.
fn report_error(err: CliError) -> Result<(), CliError> {
    match err {
        CliError::Prompt(_) | CliError::Io(_) => Err(err),
        other => {
            output::error(other);
            Ok(())
        }
    }
}
