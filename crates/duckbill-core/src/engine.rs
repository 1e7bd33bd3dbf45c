//! The conversation engine.
//!
//! Orchestrates matching, extraction, the per-session stage machine, and
//! task synthesis. One write guard on the session map is held for the whole
//! turn, so read-decide-write is atomic per call.

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::scenario::model::{COMPLETE_STAGE, INITIAL_STAGE, NextStage, StageDefinition};
use crate::scenario::{Catalog, ScenarioKey};
use crate::session::{Session, SessionContext, SessionStore};
use crate::synth;
use duckbill_types::TurnResult;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const CLOSING_REPLY: &str = "Thanks for sharing that with me. What else is on your mind?";
const NO_BOOKING_SESSION_REPLY: &str = "I couldn't find your restaurant booking session.";
const NO_TRIP_SESSION_REPLY: &str = "I couldn't find your trip planning session.";
const SELECTION_ERROR_REPLY: &str = "There was an error with your selection.";
const TASKS_ERROR_REPLY: &str = "There was an error creating your tasks.";

/// The result of one turn plus the session id it applied to (generated when
/// the caller supplied none).
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session_id: String,
    pub result: TurnResult,
}

/// Per-session multi-turn state machine over the scenario catalog.
pub struct ConversationEngine {
    catalog: &'static Catalog,
    store: SessionStore,
    clock: Arc<dyn Clock>,
}

impl ConversationEngine {
    /// Creates an engine over the builtin catalog, using the wall clock.
    ///
    /// # Errors
    ///
    /// Returns a `Catalog` error if the builtin catalog fails validation;
    /// this is a programming error and surfaces at construction, never
    /// mid-conversation.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an engine with an injected clock, so tests drive TTL
    /// eviction deterministically.
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let catalog = Catalog::builtin();
        catalog.validate()?;
        Ok(Self {
            catalog,
            store: SessionStore::new(config.session_timeout(), clock.clone()),
            clock,
        })
    }

    /// Handles one free-text turn.
    ///
    /// Sweeps expired sessions, then either continues the active scenario
    /// for this session id, starts a newly matched one, or answers with a
    /// generic acknowledgment (which never creates a session). A `None`
    /// session id gets a generated one, returned in the outcome.
    pub async fn process_turn(&self, session_id: Option<&str>, text: &str) -> TurnOutcome {
        let session_id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut sessions = self.store.write().await;
        self.store.sweep_expired(&mut sessions);

        let result = if sessions.contains_key(&session_id) {
            self.continue_scenario(&mut sessions, &session_id, text)
        } else {
            match self.catalog.find_scenario(text) {
                Some(key) => self.start_scenario(&mut sessions, &session_id, key, text),
                None => {
                    debug!(session_id = %session_id, "no scenario matched");
                    TurnResult::reply_only(default_response(text))
                }
            }
        };

        TurnOutcome { session_id, result }
    }

    /// Starts a freshly matched scenario.
    ///
    /// The reported stage is literally `initial` even though the stored
    /// session has already advanced to the initial stage's successor; the
    /// caller sees "you are leaving the initial stage" while the session is
    /// primed for the next turn. When the initial stage itself terminates
    /// the scenario, no session is stored at all.
    fn start_scenario(
        &self,
        sessions: &mut HashMap<String, Session>,
        session_id: &str,
        key: ScenarioKey,
        text: &str,
    ) -> TurnResult {
        let Some(scenario) = self.catalog.get(key) else {
            return TurnResult::reply_only(default_response(text));
        };
        let Some(initial) = scenario.stage(INITIAL_STAGE) else {
            return TurnResult::reply_only(default_response(text));
        };

        let mut context = SessionContext::new(text);
        context.processed_input = scenario.extract.map(|f| f(text));

        let reply = initial.response.resolve(&context);
        let task_data = initial
            .effects
            .create_task
            .then(|| synth::synthesize(&context, initial.effects.task_type, self.clock.now()));

        info!(session_id = %session_id, scenario = %key.as_str(), "scenario started");

        match initial.next_stage {
            NextStage::Stage(next) => {
                let session = Session::new(key, next, self.clock.now(), context);
                sessions.insert(session_id.to_string(), session);
            }
            NextStage::Complete => {
                info!(session_id = %session_id, scenario = %key.as_str(), "single-stage scenario completed");
            }
        }

        let mut result = stage_result(reply, key, INITIAL_STAGE, initial);
        result.task_data = task_data;
        result
    }

    /// Continues the active scenario for a session.
    ///
    /// A stage lookup miss (scenario exhaustion or inconsistent state) ends
    /// the session with a fixed closing acknowledgment instead of an error.
    /// On a completing turn the reported stage is the label of the stage
    /// that just ran; otherwise it is the stage the session advanced to.
    fn continue_scenario(
        &self,
        sessions: &mut HashMap<String, Session>,
        session_id: &str,
        text: &str,
    ) -> TurnResult {
        let Some(mut session) = sessions.remove(session_id) else {
            return TurnResult::reply_only(default_response(text));
        };
        let key = session.scenario;

        let Some(stage) = self.catalog.stage(key, &session.stage) else {
            info!(session_id = %session_id, scenario = %key.as_str(), stage = %session.stage, "scenario exhausted");
            return TurnResult {
                reply: CLOSING_REPLY.to_string(),
                scenario: Some(key.as_str().to_string()),
                stage: Some(COMPLETE_STAGE.to_string()),
                ..TurnResult::default()
            };
        };

        session.context.responses.push(text.to_string());
        let reply = stage.response.resolve(&session.context);

        let reported_stage = match stage.next_stage {
            NextStage::Complete => {
                info!(session_id = %session_id, scenario = %key.as_str(), "scenario completed");
                session.stage.clone()
            }
            NextStage::Stage(next) => {
                debug!(session_id = %session_id, scenario = %key.as_str(), from = %session.stage, to = %next, "stage advanced");
                session.stage = next.to_string();
                session.last_activity = Some(self.clock.now());
                next.to_string()
            }
        };

        let task_data = stage
            .effects
            .create_task
            .then(|| synth::synthesize(&session.context, stage.effects.task_type, self.clock.now()));

        let mut result = stage_result(reply, key, &reported_stage, stage);
        result.task_data = task_data;

        if matches!(stage.next_stage, NextStage::Stage(_)) {
            sessions.insert(session_id.to_string(), session);
        }

        result
    }

    /// Records the restaurant the user picked and advances the booking
    /// session through its `selected` stage.
    pub async fn select_restaurant(&self, session_id: &str, restaurant: &str) -> TurnResult {
        self.select_option(
            session_id,
            ScenarioKey::RestaurantBooking,
            "selected",
            NO_BOOKING_SESSION_REPLY,
            |context| context.selected_restaurant = Some(restaurant.to_string()),
            |result| result.task_type = Some("restaurant_booking".to_string()),
        )
        .await
    }

    /// Records the ski destination the user picked and advances the trip
    /// session through its `destinations` stage.
    pub async fn select_destination(&self, session_id: &str, destination: &str) -> TurnResult {
        self.select_option(
            session_id,
            ScenarioKey::SkiTripPlanning,
            "destinations",
            NO_TRIP_SESSION_REPLY,
            |context| context.selected_destination = Some(destination.to_string()),
            |_| {},
        )
        .await
    }

    /// Shared body of the single-value selection entry points: guard the
    /// session's scenario, write the chosen value, run the named stage, and
    /// advance or terminate exactly like a free-text turn.
    async fn select_option(
        &self,
        session_id: &str,
        guard: ScenarioKey,
        stage_label: &str,
        missing_reply: &str,
        apply: impl FnOnce(&mut SessionContext),
        decorate: impl FnOnce(&mut TurnResult),
    ) -> TurnResult {
        let mut sessions = self.store.write().await;

        let Some(session) = sessions.get_mut(session_id) else {
            return TurnResult::reply_only(missing_reply);
        };
        if session.scenario != guard {
            return TurnResult::reply_only(missing_reply);
        }

        apply(&mut session.context);

        let Some(stage) = self.catalog.stage(guard, stage_label) else {
            return TurnResult {
                reply: SELECTION_ERROR_REPLY.to_string(),
                scenario: Some(guard.as_str().to_string()),
                stage: Some(session.stage.clone()),
                ..TurnResult::default()
            };
        };

        let reply = stage.response.resolve(&session.context);

        let reported_stage = match stage.next_stage {
            NextStage::Stage(next) => {
                session.stage = next.to_string();
                next.to_string()
            }
            NextStage::Complete => {
                sessions.remove(session_id);
                info!(session_id = %session_id, scenario = %guard.as_str(), "scenario completed via selection");
                COMPLETE_STAGE.to_string()
            }
        };

        let mut result = stage_result(reply, guard, &reported_stage, stage);
        decorate(&mut result);
        result
    }

    /// Records the batch of trip tasks the user checked off, emits them as a
    /// batch-create instruction, and terminates the session unconditionally.
    pub async fn select_trip_tasks(&self, session_id: &str, tasks: Vec<String>) -> TurnResult {
        let mut sessions = self.store.write().await;

        let Some(session) = sessions.get_mut(session_id) else {
            return TurnResult::reply_only(NO_TRIP_SESSION_REPLY);
        };
        if session.scenario != ScenarioKey::SkiTripPlanning {
            return TurnResult::reply_only(NO_TRIP_SESSION_REPLY);
        }

        session.context.selected_tasks = Some(tasks.clone());

        let Some(stage) = self.catalog.stage(ScenarioKey::SkiTripPlanning, "tasks") else {
            return TurnResult {
                reply: TASKS_ERROR_REPLY.to_string(),
                scenario: Some(ScenarioKey::SkiTripPlanning.as_str().to_string()),
                stage: Some(session.stage.clone()),
                ..TurnResult::default()
            };
        };

        let reply = stage.response.resolve(&session.context);
        let selected_destination = session.context.selected_destination.clone();

        sessions.remove(session_id);
        info!(session_id = %session_id, task_count = tasks.len(), "trip tasks selected, session closed");

        TurnResult {
            reply,
            scenario: Some(ScenarioKey::SkiTripPlanning.as_str().to_string()),
            stage: Some(COMPLETE_STAGE.to_string()),
            tasks_to_create: Some(tasks),
            selected_destination,
            ..TurnResult::default()
        }
    }

    /// Snapshot of a session, for debugging and tests. Read-only.
    pub async fn get_session(&self, session_id: &str) -> Option<Session> {
        self.store.get(session_id).await
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }

    /// Drops every session, for tests.
    pub async fn clear_all_sessions(&self) {
        self.store.clear_all().await;
    }
}

/// A reply drawn uniformly at random from the generic acknowledgment
/// templates, echoing the input.
fn default_response(input: &str) -> String {
    let templates = [
        format!("I understand you're thinking about \"{input}\". Would you like to explore this further?"),
        format!("That's interesting. Tell me more about \"{input}\"."),
        "I'm here to help you process that thought. What aspect of this is most important to you?"
            .to_string(),
        "Let's dive deeper into that. What's the next step you're considering?".to_string(),
    ];
    templates
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| templates[0].clone())
}

/// Assembles a full-shape result from a stage's reply and effects. Every
/// presentation directive is forwarded verbatim; `task_data` is filled in by
/// the caller when the stage creates a task.
fn stage_result(
    reply: String,
    key: ScenarioKey,
    reported_stage: &str,
    stage: &StageDefinition,
) -> TurnResult {
    TurnResult {
        reply,
        scenario: Some(key.as_str().to_string()),
        stage: Some(reported_stage.to_string()),
        create_task: stage.effects.create_task,
        task_data: None,
        task_type: stage.effects.task_type.map(Into::into),
        show_gameplan: stage.effects.show_gameplan,
        show_options: stage.effects.show_options,
        options_delay: stage.effects.options_delay,
        restaurant_options: stage.effects.restaurant_options.clone(),
        show_destinations: stage.effects.show_destinations,
        destination_options: stage.effects.destination_options.clone(),
        destinations_delay: stage.effects.destinations_delay,
        show_task_checklist: stage.effects.show_task_checklist,
        suggested_tasks: stage.effects.suggested_tasks.clone(),
        tasks_to_create: None,
        selected_destination: None,
    }
}
