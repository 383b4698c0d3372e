mod service;

pub use service::{SyncReport, SyncService};
