//! gRPC transport to the agent daemon.
//!
//! [`GrpcProfileService`] implements [`netprof_core::ProfileService`] on top
//! of a `tonic` channel, so the session manager never sees protobuf types.

pub mod client;
mod convert;
pub mod proto;

pub use client::{GrpcProfileService, DEFAULT_DAEMON_ADDR};
