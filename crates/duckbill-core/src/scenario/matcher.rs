//! Scenario matching.

use crate::scenario::catalog::Catalog;
use crate::scenario::model::ScenarioKey;

impl Catalog {
    /// Returns the key of the first registered scenario with a trigger that
    /// is a substring of the lowercased utterance, or `None`.
    ///
    /// Registration order is authoritative for tie-breaking: trigger sets
    /// overlap, and the first-registered scenario always wins.
    pub fn find_scenario(&self, text: &str) -> Option<ScenarioKey> {
        let lower = text.to_lowercase();
        self.scenarios()
            .iter()
            .find(|scenario| scenario.triggers.iter().any(|t| lower.contains(t)))
            .map(|scenario| scenario.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_matches() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.find_scenario("remind me to do taxes"),
            Some(ScenarioKey::TaskCreation)
        );
        assert_eq!(
            catalog.find_scenario("I'm feeling really overwhelmed"),
            Some(ScenarioKey::EmotionalSupport)
        );
        assert_eq!(
            catalog.find_scenario("thinking about a side project"),
            Some(ScenarioKey::Brainstorming)
        );
        assert_eq!(catalog.find_scenario("blorp"), None);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.find_scenario("CANCEL my APPOINTMENT"),
            Some(ScenarioKey::AppointmentCancellation)
        );
    }

    #[test]
    fn test_registry_order_breaks_ties() {
        let catalog = Catalog::builtin();

        // "cancel" (appointmentCancellation) and "dinner" (restaurantBooking)
        // both hit; the earlier registration wins, every time.
        for _ in 0..3 {
            assert_eq!(
                catalog.find_scenario("cancel my dinner plans"),
                Some(ScenarioKey::AppointmentCancellation)
            );
        }

        // "trip" (skiTripPlanning) beats "planning" (brainstorming).
        assert_eq!(
            catalog.find_scenario("planning a ski trip"),
            Some(ScenarioKey::SkiTripPlanning)
        );

        // "task" (taskCreation) beats "today" (dailyReview).
        assert_eq!(
            catalog.find_scenario("add a task for today"),
            Some(ScenarioKey::TaskCreation)
        );
    }

    #[test]
    fn test_empty_text_matches_nothing() {
        assert_eq!(Catalog::builtin().find_scenario(""), None);
    }
}
