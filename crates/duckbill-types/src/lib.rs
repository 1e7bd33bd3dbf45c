//! Shared wire-facing types for duckbill.
//!
//! Everything in this crate crosses the boundary to the presentation layer,
//! so the structs serialize in camelCase to match what the front end expects.

pub mod task_draft;
pub mod turn_result;

pub use task_draft::{AppointmentDetails, BookingDetails, Priority, TaskDraft};
pub use turn_result::{DestinationOption, RestaurantOption, TurnResult};
