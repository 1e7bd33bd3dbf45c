//! Scenario domain models.
//!
//! A scenario is a pre-authored multi-turn conversational flow: trigger
//! keywords, an ordered stage list, and an optional input extractor. The
//! catalog is pure data; stage responses are either fixed strings or plain
//! function pointers over the session context, so there is no dynamic
//! dispatch and nothing here performs I/O.

use crate::scenario::extract::ProcessedInput;
use crate::session::SessionContext;
use duckbill_types::{DestinationOption, RestaurantOption};
use serde::{Deserialize, Serialize};

/// The label every scenario's entry stage must carry.
pub const INITIAL_STAGE: &str = "initial";

/// The stage label reported to callers when a session ends.
pub const COMPLETE_STAGE: &str = "complete";

/// Identifies one of the pre-authored scenarios.
///
/// Variant order is meaningful nowhere; matching order is the catalog's
/// registration order, not this enum's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioKey {
    AppointmentCancellation,
    RestaurantBooking,
    SkiTripPlanning,
    TaskCreation,
    EmotionalSupport,
    Brainstorming,
    DailyReview,
}

impl ScenarioKey {
    /// Returns the wire name of the scenario key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKey::AppointmentCancellation => "appointmentCancellation",
            ScenarioKey::RestaurantBooking => "restaurantBooking",
            ScenarioKey::SkiTripPlanning => "skiTripPlanning",
            ScenarioKey::TaskCreation => "taskCreation",
            ScenarioKey::EmotionalSupport => "emotionalSupport",
            ScenarioKey::Brainstorming => "brainstorming",
            ScenarioKey::DailyReview => "dailyReview",
        }
    }
}

/// A stage's reply: a fixed string or a function of the turn context.
#[derive(Debug, Clone, Copy)]
pub enum Response {
    Fixed(&'static str),
    Computed(fn(&SessionContext) -> String),
}

impl Response {
    /// Resolves the reply text for the given context.
    pub fn resolve(&self, context: &SessionContext) -> String {
        match self {
            Response::Fixed(text) => (*text).to_string(),
            Response::Computed(f) => f(context),
        }
    }
}

/// Where a stage hands the session off to once it has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStage {
    /// Advance to the stage with this label.
    Stage(&'static str),
    /// Terminate the session.
    Complete,
}

/// Side effects and presentation directives attached to a stage.
///
/// The engine forwards these to the caller verbatim; it interprets only
/// `create_task` (and `task_type` as input to task synthesis).
#[derive(Debug, Clone, Default)]
pub struct StageEffects {
    pub create_task: bool,
    pub task_type: Option<&'static str>,
    pub show_gameplan: bool,
    pub show_options: bool,
    pub options_delay: u64,
    pub restaurant_options: Option<Vec<RestaurantOption>>,
    pub show_destinations: bool,
    pub destination_options: Option<Vec<DestinationOption>>,
    pub destinations_delay: u64,
    pub show_task_checklist: bool,
    pub suggested_tasks: Option<Vec<String>>,
}

/// One turn's worth of scripted behavior within a scenario.
#[derive(Debug, Clone)]
pub struct StageDefinition {
    pub stage: &'static str,
    pub response: Response,
    pub next_stage: NextStage,
    pub effects: StageEffects,
}

/// A named, pre-authored conversational flow.
#[derive(Debug, Clone)]
pub struct ScenarioDefinition {
    pub key: ScenarioKey,
    pub name: &'static str,
    /// Lowercase keywords; any substring hit in the lowercased utterance
    /// makes the scenario match.
    pub triggers: &'static [&'static str],
    /// Optional extractor run once, on the utterance that started the
    /// scenario.
    pub extract: Option<fn(&str) -> ProcessedInput>,
    pub stages: Vec<StageDefinition>,
    /// Stage labels with no definition that sessions may legitimately sit
    /// at, waiting for a selection entry point to move them forward. Free
    /// text at such a label ends the scenario via the exhaustion path.
    pub handoff_stages: &'static [&'static str],
}

impl ScenarioDefinition {
    /// Finds a stage by label.
    pub fn stage(&self, label: &str) -> Option<&StageDefinition> {
        self.stages.iter().find(|s| s.stage == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_resolve() {
        let context = SessionContext::new("hello");

        let fixed = Response::Fixed("static text");
        assert_eq!(fixed.resolve(&context), "static text");

        fn echo(ctx: &SessionContext) -> String {
            format!("you said {}", ctx.initial_input)
        }
        let computed = Response::Computed(echo);
        assert_eq!(computed.resolve(&context), "you said hello");
    }

    #[test]
    fn test_scenario_key_wire_names() {
        assert_eq!(
            ScenarioKey::AppointmentCancellation.as_str(),
            "appointmentCancellation"
        );
        assert_eq!(
            serde_json::to_string(&ScenarioKey::SkiTripPlanning).unwrap(),
            "\"skiTripPlanning\""
        );
    }
}
