//! The result of one conversational turn.

use crate::task_draft::TaskDraft;
use serde::{Deserialize, Serialize};

/// A restaurant suggestion shown by the booking scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantOption {
    pub name: String,
    pub cuisine: String,
    pub note: String,
}

/// A ski destination suggestion shown by the trip-planning scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationOption {
    pub name: String,
    pub location: String,
    pub note: String,
}

/// Everything the caller may rely on after one turn.
///
/// Every field is always present: absent values serialize as `null`, flags as
/// `false`, delays as `0`. The presentation directives are opaque pass-through
/// data the engine forwards verbatim from the stage that ran; it neither
/// interprets nor validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    /// Reply text to show the user.
    pub reply: String,
    /// Active scenario key, if a scenario matched or is in progress.
    pub scenario: Option<String>,
    /// Reported stage label (see the engine docs for its exact semantics).
    pub stage: Option<String>,
    /// Whether the caller should persist `task_data` as a task.
    pub create_task: bool,
    pub task_data: Option<TaskDraft>,
    pub task_type: Option<String>,
    pub show_gameplan: bool,
    pub show_options: bool,
    /// Milliseconds the presentation layer should wait before showing options.
    pub options_delay: u64,
    pub restaurant_options: Option<Vec<RestaurantOption>>,
    pub show_destinations: bool,
    pub destination_options: Option<Vec<DestinationOption>>,
    pub destinations_delay: u64,
    pub show_task_checklist: bool,
    pub suggested_tasks: Option<Vec<String>>,
    /// Batch-create instruction emitted by the trip-task selection.
    pub tasks_to_create: Option<Vec<String>>,
    pub selected_destination: Option<String>,
}

impl TurnResult {
    /// A result carrying only a reply, with every other field falsy.
    pub fn reply_only(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_fields_always_serialize() {
        let result = TurnResult::reply_only("hello");
        let json = serde_json::to_value(&result).unwrap();

        for key in [
            "reply",
            "scenario",
            "stage",
            "createTask",
            "taskData",
            "taskType",
            "showGameplan",
            "showOptions",
            "optionsDelay",
            "restaurantOptions",
            "showDestinations",
            "destinationOptions",
            "destinationsDelay",
            "showTaskChecklist",
            "suggestedTasks",
            "tasksToCreate",
            "selectedDestination",
        ] {
            assert!(json.get(key).is_some(), "missing contract field {key}");
        }

        assert_eq!(json["createTask"], false);
        assert_eq!(json["optionsDelay"], 0);
        assert!(json["scenario"].is_null());
    }
}
