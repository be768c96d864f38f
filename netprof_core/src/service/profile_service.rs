use async_trait::async_trait;

use crate::core::errors::ProfileError;
use crate::core::profile::ProfileRecord;

/// The daemon's reply to a switch request.
///
/// `success == false` is a failure the daemon reported, not a transport
/// fault; `error` then carries its reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchReply {
    pub success: bool,
    pub error: String,
}

impl SwitchReply {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: String::new(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: reason.into(),
        }
    }
}

/// A trait representing the daemon's profile endpoint (gRPC, in-process fake, ...).
///
/// Implementations report transport problems as
/// [`ProfileError::RemoteUnavailable`] or [`ProfileError::RemoteError`].
/// They do not need to bound their own latency: the session manager wraps
/// every call in a timeout and drops the future when it fires.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_profiles(&self) -> Result<Vec<ProfileRecord>, ProfileError>;

    async fn switch_profile(&self, name: &str) -> Result<SwitchReply, ProfileError>;

    /// Only faults signal failure; there is no structured success flag.
    async fn remove_profile(&self, name: &str) -> Result<(), ProfileError>;
}
