//! Conversion helpers between the protobuf world and the domain types of
//! netprof_core.

use netprof_core::{ProfileError, ProfileRecord, SwitchReply};
use tonic::{Code, Status};

use crate::proto;

/// protobuf ▸ core
impl From<proto::Profile> for ProfileRecord {
    fn from(p: proto::Profile) -> Self {
        ProfileRecord {
            name: p.name,
            is_active: p.is_active,
        }
    }
}

impl From<proto::SwitchProfileResponse> for SwitchReply {
    fn from(r: proto::SwitchProfileResponse) -> Self {
        SwitchReply {
            success: r.success,
            error: r.error,
        }
    }
}

/// Sort a failed call into the client's error taxonomy.
pub(crate) fn status_to_error(op: &'static str, status: Status) -> ProfileError {
    match status.code() {
        Code::Unavailable => ProfileError::RemoteUnavailable(format!("{op}: {}", status.message())),
        code => ProfileError::remote(op, format!("{}: {}", code.description(), status.message())),
    }
}
