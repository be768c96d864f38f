pub mod core;
pub mod service;
pub mod utils;

// re‑export ergonomic entry points
pub use core::cache::ProfileCache;
pub use core::config::SessionConfig;
pub use core::errors::{ProfileError, Result};
pub use core::orchestrator::{
    ActionOrchestrator, Confirm, ConfirmPrompt, WorkflowEvent, WorkflowKind, WorkflowOutcome,
    WorkflowPhase,
};
pub use core::profile::ProfileRecord;
pub use core::session_manager::SessionManager;
pub use service::{ProfileService, SwitchReply};
