//! Core domain library for mdforge (config, editing session, admission control).

/// Configuration loading and defaults.
pub mod config;
/// Generation error taxonomy.
pub mod error;
/// Toolbar and keyboard formatting actions.
pub mod format;
/// Branch-discarding snapshot history.
pub mod history;
/// Document snapshots and API payloads.
pub mod models;
/// Download filename helpers.
pub mod naming;
/// Sliding-window admission control.
pub mod ratelimit;
/// Editable document session.
pub mod session;

pub use config::{Config, DEFAULT_PORT};
pub use error::GenerateError;
pub use format::FormatAction;
pub use history::HistoryStore;
pub use models::{Selection, Snapshot};
pub use ratelimit::RateLimiter;
pub use session::EditorSession;
