use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::output;
use crate::errors::CliError;
use crate::form::{ConfirmationSurface, ConfirmationTexts, Notice, NoticeLevel, NotificationSurface};

/// Prompt for free-form text, pre-filled with the current value.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str, current: &str) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(CliError::from)
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool, CliError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CliError::from)
}

/// Publish confirmation rendered as a terminal yes/no prompt.
pub struct DialoguerConfirmation {
    theme: ColorfulTheme,
}

impl DialoguerConfirmation {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationSurface for DialoguerConfirmation {
    fn ask(&mut self, texts: &ConfirmationTexts) -> bool {
        output::section(texts.title);
        let prompt = format!("{} ({} / {})", texts.subtitle, texts.confirm, texts.cancel);
        match confirm_action(&self.theme, &prompt, false) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "confirmation prompt failed, treating as cancel");
                false
            }
        }
    }
}

/// Prints notices with the colored output helpers.
#[derive(Debug, Default)]
pub struct TerminalNotifications;

impl NotificationSurface for TerminalNotifications {
    fn notify(&mut self, notice: &Notice) {
        let line = format!("{}: {}", notice.title, notice.message);
        match notice.level {
            NoticeLevel::Success => output::success(line),
            NoticeLevel::Error => output::error(line),
        }
    }
}
