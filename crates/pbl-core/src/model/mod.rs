//! Student, task and team records supplied by the datastore.

pub mod datetime;
mod student;
mod task;
mod team;

pub use student::{normalize_mbti, SkillField, SkillRatings, Student};
pub use task::{normalize_category, Task, TaskStatus};
pub use team::{Team, TeamCompatibility};
