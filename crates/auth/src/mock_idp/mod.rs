//! Mock Identity Provider for development.
//!
//! Provides a fake authorization-code server so the GitHub flow can run end
//! to end without a registered OAuth app.

mod server;
mod templates;

pub use server::{router, MockIdpServer};
