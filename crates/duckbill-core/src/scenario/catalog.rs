//! The builtin scenario catalog.
//!
//! Registration order matters: the matcher walks scenarios in the order they
//! appear here and the first trigger hit wins, so broadly-worded scenarios
//! (taskCreation's "task", dailyReview's "today") sit after the specific
//! ones whose triggers overlap with them.

use crate::error::{DuckbillError, Result};
use crate::scenario::extract::{self, ProcessedInput};
use crate::scenario::model::{
    INITIAL_STAGE, NextStage, Response, ScenarioDefinition, ScenarioKey, StageDefinition,
    StageEffects,
};
use crate::session::SessionContext;
use duckbill_types::{DestinationOption, RestaurantOption};
use std::collections::HashSet;
use std::sync::OnceLock;

/// The immutable scenario registry.
pub struct Catalog {
    scenarios: Vec<ScenarioDefinition>,
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    pub(crate) fn new(scenarios: Vec<ScenarioDefinition>) -> Self {
        Self { scenarios }
    }

    /// Returns the builtin catalog, built once and cached for the lifetime
    /// of the process.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| Catalog::new(builtin_scenarios()))
    }

    /// All scenarios, in registration order.
    pub fn scenarios(&self) -> &[ScenarioDefinition] {
        &self.scenarios
    }

    /// Looks up a scenario by key.
    pub fn get(&self, key: ScenarioKey) -> Option<&ScenarioDefinition> {
        self.scenarios.iter().find(|s| s.key == key)
    }

    /// Looks up a stage definition by scenario key and stage label.
    pub fn stage(&self, key: ScenarioKey, label: &str) -> Option<&StageDefinition> {
        self.get(key).and_then(|s| s.stage(label))
    }

    /// Validates catalog integrity, failing fast on programming errors in
    /// the static data.
    ///
    /// Checks, per scenario: an `initial` stage exists, stage labels are
    /// unique, and every `next_stage` other than the completion sentinel
    /// resolves to a real stage or a declared hand-off label.
    ///
    /// # Errors
    ///
    /// Returns a `Catalog` error naming the offending scenario and stage.
    pub fn validate(&self) -> Result<()> {
        for scenario in &self.scenarios {
            let key = scenario.key.as_str();

            if scenario.stage(INITIAL_STAGE).is_none() {
                return Err(DuckbillError::catalog(format!(
                    "scenario '{key}' has no '{INITIAL_STAGE}' stage"
                )));
            }

            let mut labels: HashSet<&str> = HashSet::new();
            for stage in &scenario.stages {
                if !labels.insert(stage.stage) {
                    return Err(DuckbillError::catalog(format!(
                        "scenario '{key}' defines stage '{}' twice",
                        stage.stage
                    )));
                }
            }

            for stage in &scenario.stages {
                if let NextStage::Stage(next) = stage.next_stage {
                    let resolvable =
                        labels.contains(next) || scenario.handoff_stages.contains(&next);
                    if !resolvable {
                        return Err(DuckbillError::catalog(format!(
                            "scenario '{key}' stage '{}' advances to unknown stage '{next}'",
                            stage.stage
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn appointment_initial_reply(context: &SessionContext) -> String {
    let mut reply = String::from("I'll help you cancel your appointment");
    if let Some(ProcessedInput::Appointment(info)) = &context.processed_input {
        if let Some(doctor) = &info.doctor {
            reply.push_str(&format!(" with {doctor}"));
        }
        if let Some(date) = &info.date {
            reply.push_str(&format!(" on {date}"));
        }
        if let Some(time) = &info.time {
            reply.push_str(&format!(" at {time}"));
        }
    }
    reply.push_str(". Let me create a gameplan for you.");
    reply
}

fn booking_initial_reply(context: &SessionContext) -> String {
    let mut reply = String::from("I'll help you book a restaurant");
    if let Some(ProcessedInput::Booking(info)) = &context.processed_input {
        if let Some(location) = &info.location {
            reply.push_str(&format!(" {location}"));
        }
        if let Some(people) = &info.people {
            reply.push_str(&format!(" for {people} people"));
        }
        if let (Some(when), Some(time)) = (&info.when, &info.time) {
            reply.push_str(&format!(" {when} at {time}"));
        }
        if let Some(dietary) = &info.dietary {
            reply.push_str(&format!(" ({dietary})"));
        }
    }
    reply.push_str(". Let me find some options for you.");
    reply
}

fn restaurant_selected_reply(context: &SessionContext) -> String {
    let name = context
        .selected_restaurant
        .as_deref()
        .unwrap_or("the restaurant");
    format!(
        "Perfect choice! I'll handle the reservation at {name}. Since they don't accept online \
         reservations, I'll need to call them directly."
    )
}

fn trip_tasks_reply(context: &SessionContext) -> String {
    let count = context.selected_tasks.as_ref().map_or(0, Vec::len);
    match &context.selected_destination {
        Some(destination) => format!(
            "Perfect! I've added {count} tasks for your {destination} trip. I'll keep everything \
             organized so you can focus on the fun part."
        ),
        None => format!(
            "Perfect! I've added {count} trip tasks to your list. I'll keep everything organized \
             so you can focus on the fun part."
        ),
    }
}

fn restaurant_options() -> Vec<RestaurantOption> {
    vec![
        RestaurantOption {
            name: "Olive Garden Downtown".to_string(),
            cuisine: "Italian".to_string(),
            note: "Great vegetarian options, no online reservations".to_string(),
        },
        RestaurantOption {
            name: "The Green Table".to_string(),
            cuisine: "Farm-to-table".to_string(),
            note: "Fully vegetarian menu, call-only reservations".to_string(),
        },
        RestaurantOption {
            name: "Bistro Central".to_string(),
            cuisine: "Contemporary American".to_string(),
            note: "Excellent veg options, phone reservations only".to_string(),
        },
    ]
}

fn destination_options() -> Vec<DestinationOption> {
    vec![
        DestinationOption {
            name: "Whistler Blackcomb".to_string(),
            location: "British Columbia".to_string(),
            note: "Huge terrain, lively village, direct shuttle from Vancouver".to_string(),
        },
        DestinationOption {
            name: "Park City".to_string(),
            location: "Utah".to_string(),
            note: "Easy airport access, great groomers for mixed groups".to_string(),
        },
        DestinationOption {
            name: "Jackson Hole".to_string(),
            location: "Wyoming".to_string(),
            note: "Steeper terrain, quieter town, book lodging early".to_string(),
        },
    ]
}

fn suggested_trip_tasks() -> Vec<String> {
    vec![
        "Book flights".to_string(),
        "Reserve lodging".to_string(),
        "Arrange lift tickets".to_string(),
        "Rent ski gear".to_string(),
        "Check travel insurance".to_string(),
    ]
}

fn builtin_scenarios() -> Vec<ScenarioDefinition> {
    vec![
        ScenarioDefinition {
            key: ScenarioKey::AppointmentCancellation,
            name: "Appointment Cancellation",
            triggers: &["cancel", "appointment", "dr.", "doctor", "reschedule"],
            extract: Some(extract::extract_appointment),
            stages: vec![StageDefinition {
                stage: INITIAL_STAGE,
                response: Response::Computed(appointment_initial_reply),
                next_stage: NextStage::Complete,
                effects: StageEffects {
                    create_task: true,
                    task_type: Some("appointment_cancellation"),
                    show_gameplan: true,
                    ..StageEffects::default()
                },
            }],
            handoff_stages: &[],
        },
        ScenarioDefinition {
            key: ScenarioKey::RestaurantBooking,
            name: "Restaurant Booking",
            triggers: &[
                "book",
                "restaurant",
                "reservation",
                "table",
                "dinner",
                "lunch",
                "eat",
                "dining",
            ],
            extract: Some(extract::extract_booking),
            stages: vec![
                StageDefinition {
                    stage: INITIAL_STAGE,
                    response: Response::Computed(booking_initial_reply),
                    // "options" has no stage definition on purpose: the
                    // session waits there for select_restaurant, and free
                    // text ends the scenario via the exhaustion path.
                    next_stage: NextStage::Stage("options"),
                    effects: StageEffects {
                        create_task: true,
                        task_type: Some("restaurant_booking"),
                        show_options: true,
                        options_delay: 3000,
                        restaurant_options: Some(restaurant_options()),
                        ..StageEffects::default()
                    },
                },
                StageDefinition {
                    stage: "selected",
                    response: Response::Computed(restaurant_selected_reply),
                    next_stage: NextStage::Complete,
                    effects: StageEffects {
                        show_gameplan: true,
                        ..StageEffects::default()
                    },
                },
            ],
            handoff_stages: &["options"],
        },
        ScenarioDefinition {
            key: ScenarioKey::SkiTripPlanning,
            name: "Ski Trip Planning",
            triggers: &["ski", "snowboard", "trip", "vacation", "getaway", "slopes"],
            extract: None,
            stages: vec![
                StageDefinition {
                    stage: INITIAL_STAGE,
                    response: Response::Fixed(
                        "A ski trip sounds amazing! Let me pull up a few destinations worth \
                         considering.",
                    ),
                    next_stage: NextStage::Stage("destinations"),
                    effects: StageEffects {
                        show_destinations: true,
                        destination_options: Some(destination_options()),
                        destinations_delay: 3000,
                        ..StageEffects::default()
                    },
                },
                StageDefinition {
                    stage: "destinations",
                    response: Response::Fixed(
                        "Great choice! Here's a checklist of things to line up before you go. \
                         Pick the ones you'd like me to track for you.",
                    ),
                    next_stage: NextStage::Stage("tasks"),
                    effects: StageEffects {
                        show_task_checklist: true,
                        suggested_tasks: Some(suggested_trip_tasks()),
                        ..StageEffects::default()
                    },
                },
                StageDefinition {
                    stage: "tasks",
                    response: Response::Computed(trip_tasks_reply),
                    next_stage: NextStage::Complete,
                    effects: StageEffects::default(),
                },
            ],
            handoff_stages: &[],
        },
        ScenarioDefinition {
            key: ScenarioKey::TaskCreation,
            name: "Task Creation",
            triggers: &[
                "remind", "todo", "task", "need to", "have to", "must", "deadline",
            ],
            extract: None,
            stages: vec![
                StageDefinition {
                    stage: INITIAL_STAGE,
                    response: Response::Fixed(
                        "I'll help you create a task for that. What exactly needs to be done?",
                    ),
                    next_stage: NextStage::Stage("details"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "details",
                    response: Response::Fixed("Got it! When do you need this completed by?"),
                    next_stage: NextStage::Stage("deadline"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "deadline",
                    response: Response::Fixed(
                        "Perfect! I've noted that down. Would you like to set a priority level? \
                         (High/Medium/Low)",
                    ),
                    next_stage: NextStage::Stage("priority"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "priority",
                    response: Response::Fixed(
                        "Task created successfully! I'll make sure you don't forget about this. \
                         Anything else on your mind?",
                    ),
                    next_stage: NextStage::Complete,
                    effects: StageEffects {
                        create_task: true,
                        ..StageEffects::default()
                    },
                },
            ],
            handoff_stages: &[],
        },
        ScenarioDefinition {
            key: ScenarioKey::EmotionalSupport,
            name: "Emotional Support",
            triggers: &[
                "stressed",
                "anxious",
                "overwhelmed",
                "worried",
                "tired",
                "exhausted",
                "frustrated",
            ],
            extract: None,
            stages: vec![
                StageDefinition {
                    stage: INITIAL_STAGE,
                    response: Response::Fixed(
                        "I hear you. It sounds like you're dealing with a lot right now. Take a \
                         deep breath with me. What's the main thing weighing on your mind?",
                    ),
                    next_stage: NextStage::Stage("identify"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "identify",
                    response: Response::Fixed(
                        "That does sound challenging. Let's break this down into smaller, \
                         manageable pieces. What's one small step you could take today?",
                    ),
                    next_stage: NextStage::Stage("action"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "action",
                    response: Response::Fixed(
                        "That's a great start! Remember, you don't have to tackle everything at \
                         once. Would you like me to create a gentle reminder for this?",
                    ),
                    next_stage: NextStage::Stage("reminder"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "reminder",
                    response: Response::Fixed(
                        "You've got this! I'm here whenever you need to talk things through. How \
                         are you feeling now?",
                    ),
                    next_stage: NextStage::Complete,
                    effects: StageEffects::default(),
                },
            ],
            handoff_stages: &[],
        },
        ScenarioDefinition {
            key: ScenarioKey::Brainstorming,
            name: "Brainstorming",
            triggers: &[
                "idea",
                "thinking about",
                "planning",
                "what if",
                "considering",
                "wondering",
                "project",
            ],
            extract: None,
            stages: vec![
                StageDefinition {
                    stage: INITIAL_STAGE,
                    response: Response::Fixed(
                        "That sounds interesting! Tell me more about this idea. What sparked \
                         your interest in it?",
                    ),
                    next_stage: NextStage::Stage("explore"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "explore",
                    response: Response::Fixed(
                        "I love where this is going! What would success look like for this? \
                         What's your ideal outcome?",
                    ),
                    next_stage: NextStage::Stage("vision"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "vision",
                    response: Response::Fixed(
                        "That's a compelling vision! What resources or support would you need to \
                         make this happen?",
                    ),
                    next_stage: NextStage::Stage("resources"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "resources",
                    response: Response::Fixed(
                        "Great thinking! Should we capture these ideas as action items so you \
                         don't lose this momentum?",
                    ),
                    next_stage: NextStage::Complete,
                    effects: StageEffects {
                        create_task: true,
                        ..StageEffects::default()
                    },
                },
            ],
            handoff_stages: &[],
        },
        ScenarioDefinition {
            key: ScenarioKey::DailyReview,
            name: "Daily Review",
            triggers: &[
                "today",
                "accomplished",
                "review",
                "done",
                "completed",
                "achieved",
                "progress",
            ],
            extract: None,
            stages: vec![
                StageDefinition {
                    stage: INITIAL_STAGE,
                    response: Response::Fixed(
                        "Let's reflect on your day! What's one thing you're proud of \
                         accomplishing today?",
                    ),
                    next_stage: NextStage::Stage("wins"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "wins",
                    response: Response::Fixed(
                        "That's wonderful! Celebrating these wins is important. Was there \
                         anything that didn't go as planned?",
                    ),
                    next_stage: NextStage::Stage("challenges"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "challenges",
                    response: Response::Fixed(
                        "Thanks for sharing that. Every challenge is a learning opportunity. \
                         What's one thing you want to focus on tomorrow?",
                    ),
                    next_stage: NextStage::Stage("tomorrow"),
                    effects: StageEffects::default(),
                },
                StageDefinition {
                    stage: "tomorrow",
                    response: Response::Fixed(
                        "Excellent! You're setting yourself up for success. Would you like me to \
                         create a reminder for tomorrow's focus?",
                    ),
                    next_stage: NextStage::Complete,
                    effects: StageEffects {
                        create_task: true,
                        ..StageEffects::default()
                    },
                },
            ],
            handoff_stages: &[],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        Catalog::builtin().validate().unwrap();
    }

    #[test]
    fn test_every_scenario_has_an_initial_stage() {
        for scenario in Catalog::builtin().scenarios() {
            assert!(
                scenario.stage(INITIAL_STAGE).is_some(),
                "{} lacks an initial stage",
                scenario.key.as_str()
            );
        }
    }

    #[test]
    fn test_stage_lookup() {
        let catalog = Catalog::builtin();
        assert!(catalog.stage(ScenarioKey::RestaurantBooking, "selected").is_some());
        // The hand-off label is a session state, not a stage definition.
        assert!(catalog.stage(ScenarioKey::RestaurantBooking, "options").is_none());
        assert!(catalog.stage(ScenarioKey::TaskCreation, "priority").is_some());
    }

    #[test]
    fn test_validate_rejects_missing_initial_stage() {
        let catalog = Catalog::new(vec![ScenarioDefinition {
            key: ScenarioKey::TaskCreation,
            name: "broken",
            triggers: &["x"],
            extract: None,
            stages: vec![StageDefinition {
                stage: "details",
                response: Response::Fixed("hi"),
                next_stage: NextStage::Complete,
                effects: StageEffects::default(),
            }],
            handoff_stages: &[],
        }]);

        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("no 'initial' stage"), "{err}");
    }

    #[test]
    fn test_validate_rejects_dangling_next_stage() {
        let catalog = Catalog::new(vec![ScenarioDefinition {
            key: ScenarioKey::TaskCreation,
            name: "broken",
            triggers: &["x"],
            extract: None,
            stages: vec![StageDefinition {
                stage: INITIAL_STAGE,
                response: Response::Fixed("hi"),
                next_stage: NextStage::Stage("nowhere"),
                effects: StageEffects::default(),
            }],
            handoff_stages: &[],
        }]);

        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("unknown stage 'nowhere'"), "{err}");
    }
}
