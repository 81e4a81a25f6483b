// src/infrastructure/prompt.rs
use crate::application::Confirm;
use dialoguer::Confirm as ConfirmPrompt;
use tracing::warn;

/// Asks on the terminal. An unusable terminal counts as "no".
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        ConfirmPrompt::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Confirmation prompt failed, declining");
                false
            })
    }
}

/// Answers yes without asking, for `--yes`.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}
