//! Functional core for signin.
//!
//! Pure types and functions shared by the session controller and the UI
//! layer. Nothing in here touches storage, the network or the clock except
//! through arguments.

#[cfg(feature = "auth")]
pub mod auth;
pub mod profile;
pub mod serde;
