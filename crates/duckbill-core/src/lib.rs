//! duckbill-core: the conversational scenario engine.
//!
//! Classifies free-form utterances into pre-authored scenarios, advances a
//! per-session stage machine, extracts structured fields from raw text, and
//! synthesizes task drafts from the accumulated conversation. See
//! [`engine::ConversationEngine`] for the entry points.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod scenario;
pub mod session;
pub mod synth;
pub mod task;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{ConversationEngine, TurnOutcome};
pub use error::{DuckbillError, Result};
