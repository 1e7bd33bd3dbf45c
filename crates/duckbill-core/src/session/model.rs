//! Session domain model.
//!
//! A session tracks which scenario/stage a conversation is in and the
//! accumulated turn history. Sessions live only in process memory.

use crate::scenario::extract::ProcessedInput;
use crate::scenario::model::ScenarioKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accumulated conversation context for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    /// The utterance that started the scenario.
    pub initial_input: String,
    /// Every utterance seen in this session, in arrival order (the initial
    /// input is element zero).
    pub responses: Vec<String>,
    /// Fields extracted from the initial input, when the scenario has an
    /// extractor. Not re-populated on later turns.
    pub processed_input: Option<ProcessedInput>,
    pub selected_restaurant: Option<String>,
    pub selected_destination: Option<String>,
    pub selected_tasks: Option<Vec<String>>,
}

impl SessionContext {
    /// Creates a fresh context seeded with the scenario-starting utterance.
    pub fn new(initial_input: impl Into<String>) -> Self {
        let initial_input = initial_input.into();
        Self {
            responses: vec![initial_input.clone()],
            initial_input,
            processed_input: None,
            selected_restaurant: None,
            selected_destination: None,
            selected_tasks: None,
        }
    }
}

/// One active conversation, keyed by an opaque session id in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The scenario this session is working through.
    pub scenario: ScenarioKey,
    /// Current stage label within the scenario.
    pub stage: String,
    /// Creation time. TTL eviction compares against this and only this;
    /// `last_activity` is recorded but deliberately not consulted, so a
    /// long-running conversation can expire mid-flow.
    pub started_at: DateTime<Utc>,
    /// Refreshed on each continuing turn. Unused by eviction.
    pub last_activity: Option<DateTime<Utc>>,
    pub context: SessionContext,
}

impl Session {
    /// Creates a session for a freshly started scenario.
    pub fn new(
        scenario: ScenarioKey,
        stage: impl Into<String>,
        started_at: DateTime<Utc>,
        context: SessionContext,
    ) -> Self {
        Self {
            scenario,
            stage: stage.into(),
            started_at,
            last_activity: None,
            context,
        }
    }
}
