use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::errors::CliError;

/// Prompt the user for free-form text input.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str, allow_empty: bool) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(CliError::from)
}

/// Present a list of choices and return the selected index.
pub fn select(theme: &ColorfulTheme, prompt: &str, items: &[&str]) -> Result<usize, CliError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(CliError::from)
}

/// Parses a user-supplied amount. Only finite numbers are accepted.
pub fn parse_amount(raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CliError::Input(format!("`{}` is not a numeric amount", raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_decimals_and_signs() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), 12.5);
        assert_eq!(parse_amount("-3").unwrap(), -3.0);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn parse_amount_rejects_text_and_non_finite_values() {
        for raw in ["ten", "", "12,50", "NaN", "inf"] {
            assert!(
                matches!(parse_amount(raw), Err(CliError::Input(_))),
                "`{raw}` should be rejected"
            );
        }
    }
}
