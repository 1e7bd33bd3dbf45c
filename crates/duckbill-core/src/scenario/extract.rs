//! Field extraction from raw utterances.
//!
//! Each extractor is a pure, total function: it always returns a value with
//! every declared field present (`None` / `false` when a pattern did not
//! match) and never fails, whatever the input text looks like.

use duckbill_types::{AppointmentDetails, BookingDetails};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured fields produced when a scenario with an extractor starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessedInput {
    Appointment(AppointmentDetails),
    Booking(BookingDetails),
}

static APPOINTMENT_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sept?|Oct|Nov|Dec)\s+\d{1,2}")
        .expect("valid pattern")
});
static APPOINTMENT_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d{1,2}:\d{2}\s*(?:a\.?m\.?|p\.?m\.?)").expect("valid pattern"));
static DOCTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Dr\.?|Doctor)\s+\w+").expect("valid pattern"));
static FEE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)no fee|fee|charge").expect("valid pattern"));

static PEOPLE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)[-–—]\s*(\d+)\s+people").expect("valid pattern"));
static PEOPLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s+people").expect("valid pattern"));
static BOOKING_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d{1,2}(?::\d{2})?\s*(?:a\.?m\.?|p\.?m\.?)").expect("valid pattern")
});
static WHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tonight|today|this evening").expect("valid pattern"));
static DIETARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)veg").expect("valid pattern"));
static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)downtown|uptown|midtown|[A-Z][a-z]+\s+(?:area|district|neighborhood)")
        .expect("valid pattern")
});

fn find(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}

/// Extracts appointment details (date, time, doctor, fee mention) from the
/// utterance that triggered the cancellation scenario.
pub fn extract_appointment(text: &str) -> ProcessedInput {
    ProcessedInput::Appointment(AppointmentDetails {
        date: find(&APPOINTMENT_DATE, text),
        time: find(&APPOINTMENT_TIME, text),
        doctor: find(&DOCTOR, text),
        check_fee: FEE.is_match(text),
        full_text: text.to_string(),
    })
}

/// Extracts booking details (party size, time, when, dietary flag, location)
/// from the utterance that triggered the restaurant scenario.
pub fn extract_booking(text: &str) -> ProcessedInput {
    // Ranged party sizes ("2-4 people") win over single counts, joined with
    // an en dash for display.
    let people = PEOPLE_RANGE
        .captures(text)
        .map(|c| format!("{}–{}", &c[1], &c[2]))
        .or_else(|| PEOPLE.captures(text).map(|c| c[1].to_string()));

    ProcessedInput::Booking(BookingDetails {
        people,
        time: find(&BOOKING_TIME, text),
        when: find(&WHEN, text),
        dietary: DIETARY.is_match(text).then(|| "vegetarian-friendly".to_string()),
        location: find(&LOCATION, text),
        full_text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(text: &str) -> AppointmentDetails {
        match extract_appointment(text) {
            ProcessedInput::Appointment(details) => details,
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    fn booking(text: &str) -> BookingDetails {
        match extract_booking(text) {
            ProcessedInput::Booking(details) => details,
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_appointment_full_utterance() {
        let details =
            appointment("I need to cancel my appointment with Dr. Smith on Jan 5 at 2:00pm, no fee");
        assert_eq!(details.date.as_deref(), Some("Jan 5"));
        assert_eq!(details.time.as_deref(), Some("2:00pm"));
        assert_eq!(details.doctor.as_deref(), Some("Dr. Smith"));
        assert!(details.check_fee);
    }

    #[test]
    fn test_appointment_never_omits_fields() {
        for text in ["", "nothing recognizable here", "🦆🦆🦆"] {
            let details = appointment(text);
            assert_eq!(details.date, None);
            assert_eq!(details.time, None);
            assert_eq!(details.doctor, None);
            assert!(!details.check_fee);
            assert_eq!(details.full_text, text);
        }
    }

    #[test]
    fn test_booking_ranged_party_size() {
        let details = booking("book a table downtown for 2-4 people tonight at 7:30pm, vegetarian");
        assert_eq!(details.people.as_deref(), Some("2–4"));
        assert_eq!(details.time.as_deref(), Some("7:30pm"));
        assert_eq!(details.when.as_deref(), Some("tonight"));
        assert_eq!(details.dietary.as_deref(), Some("vegetarian-friendly"));
        assert_eq!(details.location.as_deref(), Some("downtown"));
    }

    #[test]
    fn test_booking_single_party_size_and_bare_hour() {
        let details = booking("dinner for 6 people at 8pm in the Mission district");
        assert_eq!(details.people.as_deref(), Some("6"));
        assert_eq!(details.time.as_deref(), Some("8pm"));
        assert_eq!(details.when, None);
        assert_eq!(details.location.as_deref(), Some("Mission district"));
    }

    #[test]
    fn test_booking_never_omits_fields() {
        let details = booking("");
        assert_eq!(details.people, None);
        assert_eq!(details.time, None);
        assert_eq!(details.when, None);
        assert_eq!(details.dietary, None);
        assert_eq!(details.location, None);
        assert_eq!(details.full_text, "");
    }
}
