//! Task draft types.
//!
//! A [`TaskDraft`] is what the conversation engine hands back to its caller
//! when a scenario stage asks for a task to be created. The caller (not the
//! engine) is responsible for turning a draft into a stored task record.

use serde::{Deserialize, Serialize};

/// Constant tag identifying drafts that originate from a brain-dump chat.
pub const BRAIN_DUMP_SOURCE: &str = "brain_dump";

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Returns the lowercase wire name of the priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Structured fields extracted from an appointment-cancellation utterance.
///
/// Every field is always present; unmatched patterns yield `None` / `false`,
/// never a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    /// Date mention like "Jan 5", if any.
    pub date: Option<String>,
    /// Time mention like "2:00pm", if any.
    pub time: Option<String>,
    /// Doctor mention like "Dr. Smith", if any.
    pub doctor: Option<String>,
    /// Whether the utterance mentioned a fee or charge.
    pub check_fee: bool,
    /// The raw utterance the fields were extracted from.
    pub full_text: String,
}

/// Structured fields extracted from a restaurant-booking utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    /// Party size, single ("4") or ranged ("2–4").
    pub people: Option<String>,
    /// Time mention like "7:30pm", if any.
    pub time: Option<String>,
    /// "tonight" / "today" / "this evening" mention, as written.
    pub when: Option<String>,
    /// Dietary flag, normalized to "vegetarian-friendly".
    pub dietary: Option<String>,
    /// Location mention like "downtown", if any.
    pub location: Option<String>,
    /// The raw utterance the fields were extracted from.
    pub full_text: String,
}

/// A task record synthesized from conversation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Deadline as an RFC 3339 timestamp, or a raw date mention for
    /// appointment drafts, or absent.
    pub deadline: Option<String>,
    /// Always [`BRAIN_DUMP_SOURCE`] for drafts produced by the engine.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_details: Option<AppointmentDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_details: Option<BookingDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_draft_omits_absent_details() {
        let draft = TaskDraft {
            title: "Call the office".to_string(),
            description: "Call the office".to_string(),
            priority: Priority::Medium,
            deadline: None,
            source: BRAIN_DUMP_SOURCE.to_string(),
            task_type: None,
            appointment_details: None,
            booking_details: None,
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("appointmentDetails").is_none());
        assert!(json.get("bookingDetails").is_none());
        // Contract fields stay present even when empty.
        assert!(json.get("deadline").is_some());
    }
}
