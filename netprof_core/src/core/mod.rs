pub mod cache;
pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod profile;
pub mod session_manager;
