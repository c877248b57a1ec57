//! Session storage.
//!
//! `SessionStore` sits on top of a `SessionStorage` backend:
//! - `MemoryStorage` lives as long as the process (the browsing session)
//! - `FileStorage` keeps a JSON object on disk so a CLI host can resume

mod file;
mod memory;
mod store;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use store::{SessionStore, AUTH_PROVIDER_KEY, CURRENT_USER_KEY, PENDING_STATE_KEY};
