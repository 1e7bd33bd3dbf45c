//! Task collaborator: model, repository seam, and the in-memory store.

pub mod model;
pub mod repository;
pub mod store;

pub use model::{Task, TaskState};
pub use repository::TaskRepository;
pub use store::InMemoryTaskStore;
