//! Terminal rendition of the login, loading and profile panels.

mod choreographer;
mod notifications;
mod profile;
mod signout;

pub use choreographer::{Panel, UiChoreographer, SIGNED_OUT_MESSAGE};
pub use notifications::{Notification, NotificationLevel, Notifications};
pub use profile::{Avatar, ProfileView};
pub use signout::{request_sign_out, AssumeYes, Confirm, TerminalConfirm, SIGN_OUT_PROMPT};
