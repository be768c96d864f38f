use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use netprof_core::{ProfileError, ProfileRecord, ProfileService, SwitchReply};
use tonic::transport::{Channel, Endpoint};

use crate::convert::status_to_error;
use crate::proto::daemon_service_client::DaemonServiceClient;
use crate::proto::{GetProfilesRequest, RemoveProfileRequest, SwitchProfileRequest};

/// Where the daemon listens unless told otherwise.
pub const DEFAULT_DAEMON_ADDR: &str = "http://127.0.0.1:41731";

/// [`ProfileService`] backed by the daemon's gRPC endpoint.
#[derive(Debug, Clone)]
pub struct GrpcProfileService {
    client: DaemonServiceClient<Channel>,
    addr: String,
}

impl GrpcProfileService {
    /// Prepare a channel to `addr` (`http://host:port`) without dialing.
    ///
    /// The connection is made on the first call, so an unreachable daemon
    /// shows up as `RemoteUnavailable` from that call rather than here.
    /// Must be called inside a tokio runtime.
    pub fn connect_lazy(addr: &str, connect_timeout: Duration) -> Result<Self, ProfileError> {
        let endpoint = Endpoint::from_shared(addr.to_owned())
            .map_err(|e| ProfileError::invalid(format!("daemon address '{addr}': {e}")))?
            .connect_timeout(connect_timeout);
        info!("Using daemon at {}", addr);
        Ok(Self {
            client: DaemonServiceClient::new(endpoint.connect_lazy()),
            addr: addr.to_owned(),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait]
impl ProfileService for GrpcProfileService {
    async fn get_profiles(&self) -> Result<Vec<ProfileRecord>, ProfileError> {
        let mut client = self.client.clone();
        let response = client
            .get_profiles(GetProfilesRequest {})
            .await
            .map_err(|s| status_to_error("get profiles", s))?
            .into_inner();
        debug!("GetProfiles returned {} entries", response.profiles.len());
        Ok(response.profiles.into_iter().map(Into::into).collect())
    }

    async fn switch_profile(&self, name: &str) -> Result<SwitchReply, ProfileError> {
        let mut client = self.client.clone();
        let response = client
            .switch_profile(SwitchProfileRequest {
                profile: name.to_owned(),
            })
            .await
            .map_err(|s| status_to_error("switch profile", s))?
            .into_inner();
        Ok(response.into())
    }

    async fn remove_profile(&self, name: &str) -> Result<(), ProfileError> {
        let mut client = self.client.clone();
        client
            .remove_profile(RemoveProfileRequest {
                profile: name.to_owned(),
            })
            .await
            .map_err(|s| status_to_error("remove profile", s))?;
        Ok(())
    }
}
