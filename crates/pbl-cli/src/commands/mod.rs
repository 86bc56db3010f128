pub mod config;
pub mod explain;
pub mod score;
pub mod student;
pub mod sync;
pub mod task;
pub mod team;
