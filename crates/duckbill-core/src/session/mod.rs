//! Session state: per-conversation model and the in-memory store.

pub mod model;
pub mod store;

pub use model::{Session, SessionContext};
pub use store::SessionStore;
