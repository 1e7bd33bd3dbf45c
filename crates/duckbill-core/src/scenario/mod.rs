//! Scenario catalog, matching, and field extraction.

pub mod catalog;
pub mod extract;
pub mod matcher;
pub mod model;

pub use catalog::Catalog;
pub use extract::ProcessedInput;
pub use model::{
    COMPLETE_STAGE, INITIAL_STAGE, NextStage, Response, ScenarioDefinition, ScenarioKey,
    StageDefinition, StageEffects,
};
