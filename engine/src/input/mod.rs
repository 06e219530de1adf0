// Interactive input: which coins to analyze and over how many days.
//
// The two questions are asked through an `InputProvider`; parsing of the
// answers is shared so every provider yields the same `AnalysisRequest`.
pub mod dialog;
pub mod terminal;

use shared::models::AnalysisRequest;
use std::collections::VecDeque;

use crate::error::InputError;

pub use dialog::DialogInput;
pub use terminal::TerminalInput;

pub const COINS_PROMPT: &str =
    "Enter the coin names separated by commas (e.g., bitcoin, ethereum, litecoin):";
pub const DAYS_PROMPT: &str =
    "Enter the number of days for historical data (e.g., 365 for one year):";

pub trait InputProvider {
    /// Asks one question. `Ok(None)` means the user cancelled or input ended.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, InputError>;
}

/// Answers supplied up front, e.g. from command line flags.
#[derive(Debug, Default)]
pub struct PresetInput {
    answers: VecDeque<Option<String>>,
}

impl PresetInput {
    pub fn new(coins: impl Into<String>, days: impl Into<String>) -> Self {
        Self {
            answers: VecDeque::from(vec![Some(coins.into()), Some(days.into())]),
        }
    }

    pub fn from_answers(answers: Vec<Option<String>>) -> Self {
        Self { answers: answers.into() }
    }
}

impl InputProvider for PresetInput {
    fn ask(&mut self, _prompt: &str) -> Result<Option<String>, InputError> {
        Ok(self.answers.pop_front().flatten())
    }
}

/// Tells the provider selection what the current environment can do.
pub trait EnvironmentProbe {
    fn has_display(&self) -> bool;
    fn dialog_available(&self) -> bool;
}

/// Probes the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl EnvironmentProbe for SystemProbe {
    fn has_display(&self) -> bool {
        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|var| std::env::var_os(var).map_or(false, |v| !v.is_empty()))
    }

    fn dialog_available(&self) -> bool {
        dialog::helper_on_path()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Dialog,
    Terminal,
}

/// Dialog when a display and the dialog helper exist, terminal prompt otherwise.
pub fn choose_mode(probe: &dyn EnvironmentProbe) -> InputMode {
    if probe.has_display() && probe.dialog_available() {
        InputMode::Dialog
    } else {
        InputMode::Terminal
    }
}

pub fn select_provider(probe: &dyn EnvironmentProbe) -> Box<dyn InputProvider> {
    let mode = choose_mode(probe);
    tracing::debug!(?mode, "Selected input provider");
    match mode {
        InputMode::Dialog => Box::new(DialogInput::new()),
        InputMode::Terminal => Box::new(TerminalInput::stdio()),
    }
}

/// Asks both questions and turns the answers into a request.
///
/// Empty or cancelled answers are terminal. A day count that does not parse
/// falls back to `default_days`; one that parses but is not positive is rejected.
pub fn read_request(
    provider: &mut dyn InputProvider,
    default_days: u32,
) -> Result<AnalysisRequest, InputError> {
    let coins_answer = provider.ask(COINS_PROMPT)?;
    let days_answer = provider.ask(DAYS_PROMPT)?;

    let coins_answer = non_empty(coins_answer).ok_or(InputError::MissingCoins)?;
    let days_answer = non_empty(days_answer).ok_or(InputError::MissingDays)?;

    let coins = parse_coins(&coins_answer);
    if coins.is_empty() {
        return Err(InputError::MissingCoins);
    }
    let days = parse_days(&days_answer, default_days)?;

    Ok(AnalysisRequest { coins, days })
}

fn non_empty(answer: Option<String>) -> Option<String> {
    answer.filter(|s| !s.trim().is_empty())
}

/// Splits on commas and trims; blank entries ("bitcoin,,ethereum") are dropped.
pub fn parse_coins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|coin| !coin.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_days(raw: &str, default_days: u32) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(days) if days <= 0 => Err(InputError::NonPositiveDays(days)),
        Ok(days) => Ok(u32::try_from(days).unwrap_or(u32::MAX)),
        Err(_) => {
            tracing::warn!(input = %trimmed, default_days, "Could not parse day count, using default");
            Ok(default_days)
        }
    }
}
