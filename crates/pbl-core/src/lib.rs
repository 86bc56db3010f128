//! # PBL Dashboard Core Library
//!
//! Scoring engine and data plumbing for a project-based-learning dashboard.
//! Students, tasks and teams are read from JSON files; every score is a pure
//! function of those records and an injected reference time.
//!
//! ## Architecture
//!
//! - **Model**: student, task and team records
//! - **Scoring**: load, motivation, danger and compatibility calculators,
//!   each producing a 1-5 score rounded to one decimal
//! - **Explain**: narrative reasons and encouragement built from the same
//!   components as the scores
//! - **Report**: per-student report assembly and the dashboard ordering
//! - **Storage**: JSON-file datastore and TOML configuration
//! - **Integrations**: Airtable roster sync
//!
//! ## Key Components
//!
//! - [`compute_load`], [`compute_motivation`], [`compute_danger`]
//! - [`JsonStore`]: file-backed datastore
//! - [`Config`]: application configuration

pub mod error;
pub mod explain;
pub mod integrations;
pub mod model;
pub mod report;
pub mod scoring;
pub mod storage;

pub use error::{ConfigError, CoreError, StoreError, SyncError};
pub use explain::{encouragement_examples, load_reason, motivation_reason, LoadReason, MotivationReason};
pub use integrations::{sync_students, AirtableClient, SyncSummary};
pub use model::{SkillField, SkillRatings, Student, Task, TaskStatus, Team, TeamCompatibility};
pub use report::{build_student_report, dashboard, report_for, Snapshot, StudentReport};
pub use scoring::compatibility::{compatibility_matrix, pair_compatibility, CompatibilityMatrix};
pub use scoring::danger::{compute_danger, DangerLevel, RiskFactors};
pub use scoring::load::{compute_load, LoadLevel};
pub use scoring::motivation::{compute_motivation, estimate_motivation_from_progress};
pub use storage::{AirtableConfig, Config, JsonStore};
