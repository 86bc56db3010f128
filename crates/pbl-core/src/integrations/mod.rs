//! External data sources feeding the datastore.

pub mod airtable;

pub use airtable::{sync_students, AirtableClient, SyncSummary};
