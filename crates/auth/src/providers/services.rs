//! Stand-ins for the implicit-flow provider's client-side runtime.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use signin_core::auth::{IdentityServices, PromptOutcome};

/// Runtime that never loaded (script blocked or offline).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnloadedIdentityServices;

impl IdentityServices for UnloadedIdentityServices {
    fn is_loaded(&self) -> bool {
        false
    }

    fn prompt(&self) -> PromptOutcome {
        PromptOutcome::NotDisplayed
    }

    fn disable_auto_select(&self) {}
}

/// Loaded runtime whose prompt reports a fixed outcome.
///
/// The credential itself is delivered separately through the controller's
/// callback path, as the real SDK does through its registered callback.
#[derive(Debug)]
pub struct ScriptedIdentityServices {
    outcome: PromptOutcome,
    prompts: AtomicUsize,
    auto_select_disabled: AtomicBool,
}

impl ScriptedIdentityServices {
    pub fn new(outcome: PromptOutcome) -> Self {
        Self {
            outcome,
            prompts: AtomicUsize::new(0),
            auto_select_disabled: AtomicBool::new(false),
        }
    }

    /// How many times the prompt was shown.
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn auto_select_disabled(&self) -> bool {
        self.auto_select_disabled.load(Ordering::SeqCst)
    }
}

impl IdentityServices for ScriptedIdentityServices {
    fn is_loaded(&self) -> bool {
        true
    }

    fn prompt(&self) -> PromptOutcome {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }

    fn disable_auto_select(&self) {
        self.auto_select_disabled.store(true, Ordering::SeqCst);
    }
}
