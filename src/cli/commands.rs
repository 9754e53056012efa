use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    cli::{io, output},
    core::{services::format_amount, ExpenseTracker},
    errors::CliError,
    utils::build_info,
};

pub const INVALID_AMOUNT: &str = "Invalid amount. Please enter a numeric value.";
pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Canonical command names; menu numbers 1-5 alias the first five in menu order.
pub const COMMAND_NAMES: &[&str] = &["add", "report", "monthly", "plot", "exit", "help", "version"];

const HELP: &str = "\
Available commands:
  add <amount> <category> [description]  Record an expense (1)
  report                                 Print totals per category (2)
  monthly                                Print totals per month and category (3)
  plot                                   Save the category bar chart (4)
  exit                                   Leave the program (5)
  version                                Show build information
  help                                   Show this overview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        amount: String,
        category: String,
        description: String,
    },
    Report,
    Monthly,
    Plot,
    Exit,
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Unknown(String),
    Usage(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Turns a tokenised script line into a command.
pub fn parse_command(tokens: &[String]) -> Result<Command, ParseError> {
    let Some((head, args)) = tokens.split_first() else {
        return Err(ParseError::Unknown(String::new()));
    };
    let command = match head.to_ascii_lowercase().as_str() {
        "1" | "add" => match args {
            [amount, category, rest @ ..] => Command::Add {
                amount: amount.clone(),
                category: category.clone(),
                description: rest.join(" "),
            },
            _ => return Err(ParseError::Usage("add <amount> <category> [description]")),
        },
        "2" | "report" => Command::Report,
        "3" | "monthly" | "summary" => Command::Monthly,
        "4" | "plot" => Command::Plot,
        "5" | "exit" | "quit" => Command::Exit,
        "help" | "?" => Command::Help,
        "version" => Command::Version,
        _ => return Err(ParseError::Unknown(head.clone())),
    };
    Ok(command)
}

/// Closest known command name, if the typo is small enough to guess.
pub fn suggest(input: &str) -> Option<&'static str> {
    let needle = input.to_ascii_lowercase();
    COMMAND_NAMES
        .iter()
        .map(|name| (levenshtein(&needle, name), *name))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

/// Session state shared by the interactive menu and script mode.
pub struct ShellContext {
    tracker: ExpenseTracker,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(tracker: ExpenseTracker) -> Self {
        Self {
            tracker,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn tracker(&self) -> &ExpenseTracker {
        &self.tracker
    }

    pub fn execute(&mut self, command: Command) -> Result<LoopControl, CliError> {
        debug!(?command, "executing command");
        match command {
            Command::Add {
                amount,
                category,
                description,
            } => self.add_expense(&amount, &category, &description)?,
            Command::Report => self.print_report(),
            Command::Monthly => self.print_monthly_summary()?,
            Command::Plot => self.plot()?,
            Command::Help => output::info(HELP),
            Command::Version => output::info(build_info::current()),
            Command::Exit => {
                output::info("Goodbye!");
                return Ok(LoopControl::Exit);
            }
        }
        Ok(LoopControl::Continue)
    }

    /// Interactive "Add Expense" flow: amount, category, then description.
    pub fn prompt_expense(&mut self) -> Result<(), CliError> {
        let amount = io::prompt_text(&self.theme, "Enter amount", false)?;
        if io::parse_amount(&amount).is_err() {
            output::warning(INVALID_AMOUNT);
            return Ok(());
        }
        let category = io::prompt_text(&self.theme, "Enter category", false)?;
        let description = io::prompt_text(&self.theme, "Enter description", true)?;
        self.add_expense(&amount, &category, &description)
    }

    pub fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    fn add_expense(&mut self, amount: &str, category: &str, description: &str) -> Result<(), CliError> {
        let amount = match io::parse_amount(amount) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "rejected amount");
                output::warning(INVALID_AMOUNT);
                return Ok(());
            }
        };
        self.tracker.add(amount, category.trim(), description.trim())?;
        output::success("Expense added successfully.");
        Ok(())
    }

    fn print_report(&self) {
        output::info(format!("\n{}", self.tracker.report()));
    }

    fn print_monthly_summary(&self) -> Result<(), CliError> {
        let summary = self.tracker.monthly_summary()?;
        if summary.is_empty() {
            output::info("No expenses recorded yet.");
        }
        let symbol = self.tracker.currency_symbol();
        for (month, categories) in &summary {
            output::section(month);
            for (category, amount) in categories {
                output::info(format!("  {}: {}", category, format_amount(symbol, *amount)));
            }
        }
        Ok(())
    }

    fn plot(&self) -> Result<(), CliError> {
        let path = self.tracker.plot()?;
        output::success(format!("Expense plot saved as '{}'.", path.display()));
        Ok(())
    }
}
