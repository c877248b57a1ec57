//! Terminal output for the current panel.

use crate::ui::{Avatar, NotificationLevel, Panel, UiChoreographer};

pub use anstream::println as aprintln;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[38;2;158;206;106m"; // #9ece6a
const RED: &str = "\x1b[38;2;247;118;142m"; // #f7768e
const BLUE: &str = "\x1b[38;2;122;162;247m"; // #7aa2f7

fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

pub fn p_g(text: &str) -> String {
    paint(GREEN, text)
}

pub fn p_r(text: &str) -> String {
    paint(RED, text)
}

pub fn p_b(text: &str) -> String {
    paint(BLUE, text)
}

/// Render the visible panel and any active notifications.
pub fn render(ui: &UiChoreographer) -> String {
    let mut lines = Vec::new();

    for notification in ui.notifications().active() {
        lines.push(match notification.level {
            NotificationLevel::Success => p_g(&notification.message),
            NotificationLevel::Error => p_r(&notification.message),
        });
    }

    match (ui.panel(), ui.profile()) {
        (Panel::Profile, Some(profile)) => {
            let avatar = match &profile.avatar {
                Avatar::Picture(url) => url.clone(),
                Avatar::Initials { text, color } => format!("[{text}] {color}"),
            };
            lines.push(p_b(&profile.name));
            if let Some(email) = &profile.email {
                lines.push(format!("  {email}"));
            }
            lines.push(format!("  avatar: {avatar}"));
            lines.push(format!("  {}", profile.provider_label));
        }
        (Panel::Loading, _) => lines.push("Signing in...".to_string()),
        _ => {
            lines.push("Not signed in.".to_string());
            lines.push("  signin login google --credential <id-token>".to_string());
            lines.push("  signin login github [--open]".to_string());
        }
    }

    lines.join("\n")
}
