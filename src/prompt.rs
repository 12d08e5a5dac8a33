//! Interactive "show more?" prompt between directory levels

use std::io::IsTerminal;

use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use tracing::debug;

/// Asks the user whether a listing should keep descending.
pub trait Prompter {
    /// Whether prompting is possible at all (e.g. a terminal is attached).
    fn can_prompt(&self) -> bool;

    /// Ask to continue. `false` means the user declined.
    fn confirm_continue(&self) -> bool;
}

/// Never prompts; listings always run to completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverPrompt;

impl Prompter for NeverPrompt {
    fn can_prompt(&self) -> bool {
        false
    }

    fn confirm_continue(&self) -> bool {
        true
    }
}

/// Prompts on the controlling terminal with dialoguer.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    enabled: bool,
}

impl TerminalPrompter {
    /// A prompter that only asks when both stdin and stdout are terminals.
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            enabled: std::io::stdin().is_terminal() && std::io::stdout().is_terminal(),
        }
    }

    /// Turn prompting off regardless of the terminal.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn can_prompt(&self) -> bool {
        self.enabled
    }

    fn confirm_continue(&self) -> bool {
        match Confirm::with_theme(&self.theme)
            .with_prompt("More?")
            .default(true)
            .interact()
        {
            Ok(answer) => answer,
            Err(err) => {
                debug!(error = %err, "prompt failed, stopping");
                false
            }
        }
    }
}
