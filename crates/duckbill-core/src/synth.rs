//! Task draft synthesis from conversation context.
//!
//! Pure functions of the accumulated context: the two extractor-backed
//! scenarios get tailored drafts, everything else goes through a generic
//! mapping that reads meaning out of utterance positions (what → when →
//! priority), which is exactly the shape of the generic four-stage flows.

use crate::scenario::ProcessedInput;
use crate::session::SessionContext;
use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, Utc};
use duckbill_types::task_draft::BRAIN_DUMP_SOURCE;
use duckbill_types::{Priority, TaskDraft};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[/\-](\d{1,2})").expect("valid pattern"));

/// Builds a task draft from a session's accumulated context.
///
/// `task_type` comes from the stage that requested the task; the two
/// recognized values select a specialized branch when extracted fields are
/// available, anything else falls through to the generic positional mapping.
pub fn synthesize(
    context: &SessionContext,
    task_type: Option<&str>,
    now: DateTime<Utc>,
) -> TaskDraft {
    match (task_type, &context.processed_input) {
        (Some("appointment_cancellation"), Some(ProcessedInput::Appointment(info))) => {
            let title = match &info.doctor {
                Some(doctor) => format!("Cancel appointment with {doctor}"),
                None => "Cancel appointment".to_string(),
            };
            TaskDraft {
                title,
                description: context.initial_input.clone(),
                priority: Priority::High,
                deadline: info.date.clone(),
                source: BRAIN_DUMP_SOURCE.to_string(),
                task_type: Some("appointment_cancellation".to_string()),
                appointment_details: Some(info.clone()),
                booking_details: None,
            }
        }
        (Some("restaurant_booking"), Some(ProcessedInput::Booking(info))) => {
            let mut title = String::from("Book restaurant");
            if let Some(location) = &info.location {
                title.push_str(&format!(" {location}"));
            }
            if let Some(people) = &info.people {
                title.push_str(&format!(" for {people} people"));
            }
            if let (Some(when), Some(time)) = (&info.when, &info.time) {
                title.push_str(&format!(" {when} at {time}"));
            }
            TaskDraft {
                title,
                description: context.initial_input.clone(),
                priority: Priority::Medium,
                // Only a literal "tonight" makes the booking due right now.
                deadline: (info.when.as_deref() == Some("tonight"))
                    .then(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
                source: BRAIN_DUMP_SOURCE.to_string(),
                task_type: Some("restaurant_booking".to_string()),
                appointment_details: None,
                booking_details: Some(info.clone()),
            }
        }
        _ => generic_draft(context, task_type, now),
    }
}

/// The generic mapping for the fixed four-stage flows: responses[1] is the
/// "what", responses[2] the "when", responses[3] the priority answer.
fn generic_draft(context: &SessionContext, task_type: Option<&str>, now: DateTime<Utc>) -> TaskDraft {
    let responses = &context.responses;

    TaskDraft {
        title: responses
            .get(1)
            .cloned()
            .unwrap_or_else(|| context.initial_input.clone()),
        description: responses.join(" → "),
        priority: responses
            .get(3)
            .map(|r| extract_priority(r))
            .unwrap_or(Priority::Medium),
        deadline: responses.get(2).and_then(|r| extract_deadline(r, now)),
        source: BRAIN_DUMP_SOURCE.to_string(),
        task_type: task_type.map(Into::into),
        appointment_details: None,
        booking_details: None,
    }
}

/// Keyword scan for a priority level; defaults to medium.
pub fn extract_priority(input: &str) -> Priority {
    let lower = input.to_lowercase();
    if lower.contains("high") || lower.contains("urgent") {
        Priority::High
    } else if lower.contains("low") {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Keyword/pattern scan for a deadline, as an RFC 3339 timestamp.
///
/// "today" and "tomorrow" resolve to the end of the respective day, "week"
/// to seven days out, and a bare `M/D` or `M-D` to midnight of that date in
/// the current year. Impossible calendar dates yield no deadline.
pub fn extract_deadline(input: &str, now: DateTime<Utc>) -> Option<String> {
    let lower = input.to_lowercase();

    if lower.contains("today") {
        return end_of_day(now);
    }
    if lower.contains("tomorrow") {
        return end_of_day(now + Duration::days(1));
    }
    if lower.contains("week") {
        return Some((now + Duration::days(7)).to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    let captures = NUMERIC_DATE.captures(input)?;
    let month: u32 = captures[1].parse().ok()?;
    let day: u32 = captures[2].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(now.year(), month, day)?;
    Some(
        date.and_hms_opt(0, 0, 0)?
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

fn end_of_day(moment: DateTime<Utc>) -> Option<String> {
    Some(
        moment
            .date_naive()
            .and_hms_opt(23, 59, 59)?
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use duckbill_types::{AppointmentDetails, BookingDetails};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 13, 10, 0, 0).unwrap()
    }

    fn generic_context(turns: &[&str]) -> SessionContext {
        let mut context = SessionContext::new(turns[0]);
        for turn in &turns[1..] {
            context.responses.push((*turn).to_string());
        }
        context
    }

    #[test]
    fn test_extract_priority() {
        assert_eq!(extract_priority("HIGH priority please"), Priority::High);
        assert_eq!(extract_priority("this is urgent"), Priority::High);
        assert_eq!(extract_priority("low key"), Priority::Low);
        assert_eq!(extract_priority("whenever"), Priority::Medium);
    }

    #[test]
    fn test_extract_deadline_keywords() {
        let now = fixed_now();
        assert_eq!(
            extract_deadline("by today", now).unwrap(),
            "2025-08-13T23:59:59.000Z"
        );
        assert_eq!(
            extract_deadline("by tomorrow", now).unwrap(),
            "2025-08-14T23:59:59.000Z"
        );
        assert_eq!(
            extract_deadline("next week", now).unwrap(),
            "2025-08-20T10:00:00.000Z"
        );
        assert_eq!(extract_deadline("someday", now), None);
    }

    #[test]
    fn test_extract_deadline_numeric_date() {
        let now = fixed_now();
        assert_eq!(
            extract_deadline("due 9/1", now).unwrap(),
            "2025-09-01T00:00:00.000Z"
        );
        assert_eq!(
            extract_deadline("due 12-25", now).unwrap(),
            "2025-12-25T00:00:00.000Z"
        );
        // Not a real date, and rollover is not a feature.
        assert_eq!(extract_deadline("due 13/45", now), None);
    }

    #[test]
    fn test_generic_positional_mapping() {
        let context = generic_context(&[
            "remind me to do taxes",
            "file the federal return",
            "by tomorrow",
            "high priority",
        ]);
        let draft = synthesize(&context, None, fixed_now());

        assert_eq!(draft.title, "file the federal return");
        assert_eq!(
            draft.description,
            "remind me to do taxes → file the federal return → by tomorrow → high priority"
        );
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.deadline.as_deref(), Some("2025-08-14T23:59:59.000Z"));
        assert_eq!(draft.source, BRAIN_DUMP_SOURCE);
        assert!(draft.appointment_details.is_none());
    }

    #[test]
    fn test_generic_mapping_with_single_turn() {
        let context = generic_context(&["capture these ideas"]);
        let draft = synthesize(&context, None, fixed_now());

        assert_eq!(draft.title, "capture these ideas");
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.deadline, None);
    }

    #[test]
    fn test_appointment_branch() {
        let mut context =
            SessionContext::new("cancel my appointment with Dr. Smith on Jan 5 at 2:00pm");
        context.processed_input = Some(ProcessedInput::Appointment(AppointmentDetails {
            date: Some("Jan 5".to_string()),
            time: Some("2:00pm".to_string()),
            doctor: Some("Dr. Smith".to_string()),
            check_fee: true,
            full_text: context.initial_input.clone(),
        }));

        let draft = synthesize(&context, Some("appointment_cancellation"), fixed_now());
        assert_eq!(draft.title, "Cancel appointment with Dr. Smith");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.deadline.as_deref(), Some("Jan 5"));
        assert!(draft.appointment_details.is_some());
    }

    #[test]
    fn test_booking_branch() {
        let mut context = SessionContext::new("book a table downtown for 2-4 people tonight at 7pm");
        context.processed_input = Some(ProcessedInput::Booking(BookingDetails {
            people: Some("2–4".to_string()),
            time: Some("7pm".to_string()),
            when: Some("tonight".to_string()),
            dietary: None,
            location: Some("downtown".to_string()),
            full_text: context.initial_input.clone(),
        }));

        let draft = synthesize(&context, Some("restaurant_booking"), fixed_now());
        assert_eq!(draft.title, "Book restaurant downtown for 2–4 people tonight at 7pm");
        assert_eq!(draft.priority, Priority::Medium);
        assert!(draft.deadline.is_some());
        assert!(draft.booking_details.is_some());
    }

    #[test]
    fn test_booking_branch_without_tonight_has_no_deadline() {
        let mut context = SessionContext::new("book dinner for 2 people");
        context.processed_input = Some(ProcessedInput::Booking(BookingDetails {
            people: Some("2".to_string()),
            time: None,
            when: None,
            dietary: None,
            location: None,
            full_text: context.initial_input.clone(),
        }));

        let draft = synthesize(&context, Some("restaurant_booking"), fixed_now());
        assert_eq!(draft.deadline, None);
        assert_eq!(draft.title, "Book restaurant for 2 people");
    }

    #[test]
    fn test_unrecognized_task_type_falls_back_to_generic() {
        let context = generic_context(&["remind me", "water plants"]);
        let draft = synthesize(&context, Some("something_else"), fixed_now());
        assert_eq!(draft.title, "water plants");
        assert_eq!(draft.task_type.as_deref(), Some("something_else"));
    }
}
