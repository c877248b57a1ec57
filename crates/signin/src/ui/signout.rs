//! Confirmation guard in front of sign-out.

use signin_auth::AuthSessionController;

pub const SIGN_OUT_PROMPT: &str = "Are you sure you want to sign out?";

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Interactive terminal prompt. Defaults to "no".
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }
}

/// Answers yes without asking (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Sign out only if the user confirms. Returns whether sign-out ran.
pub async fn request_sign_out(confirm: &dyn Confirm, controller: &AuthSessionController) -> bool {
    if !confirm.confirm(SIGN_OUT_PROMPT) {
        tracing::debug!("Sign-out cancelled");
        return false;
    }
    controller.sign_out().await;
    true
}
