pub mod task;

pub use task::{Task, TaskCategory, TaskDifficulty, TaskStatus, TaskSuggestion};
