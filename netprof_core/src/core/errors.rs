use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Everything a profile operation can fail with.
///
/// None of these are retried by the library; the caller decides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Empty or malformed input, detected before any remote call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The channel to the daemon could not be established.
    #[error("daemon unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("{op}: no response from daemon within {}ms", .after.as_millis())]
    Timeout { op: &'static str, after: Duration },

    /// The daemon was reached but reported a failure.
    #[error("{op}: {reason}")]
    RemoteError { op: &'static str, reason: String },
}

impl ProfileError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ProfileError::InvalidArgument(msg.into())
    }

    pub fn remote(op: &'static str, reason: impl Into<String>) -> Self {
        ProfileError::RemoteError {
            op,
            reason: reason.into(),
        }
    }

    /// Short label used in logs and by front-ends choosing an exit code.
    pub fn kind(&self) -> &'static str {
        match self {
            ProfileError::InvalidArgument(_) => "invalid-argument",
            ProfileError::RemoteUnavailable(_) => "remote-unavailable",
            ProfileError::Timeout { .. } => "timeout",
            ProfileError::RemoteError { .. } => "remote-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_operation() {
        let err = ProfileError::Timeout {
            op: "switch profile",
            after: Duration::from_millis(3000),
        };
        assert_eq!(
            err.to_string(),
            "switch profile: no response from daemon within 3000ms"
        );

        let err = ProfileError::remote("remove profile", "profile is in use");
        assert_eq!(err.to_string(), "remove profile: profile is in use");
        assert_eq!(err.kind(), "remote-error");
    }
}
