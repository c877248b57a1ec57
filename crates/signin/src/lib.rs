//! Terminal host for the signin session state machine.
//!
//! A [`app::Page`] is one page load: it wires the auth components from
//! `signin_auth` to a [`ui::UiChoreographer`] that renders the login, loading
//! and profile panels.

pub mod app;
pub mod render;
pub mod ui;
