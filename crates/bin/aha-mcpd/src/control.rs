use aha_core::client::AhaClient;
use aha_core::control::AhaControlPlane;
use aha_core::error::ClientError;

use crate::config::AhaConfig;

/// Builds the process-wide client and the control plane that owns it.
pub fn build_control_plane(config: &AhaConfig) -> Result<AhaControlPlane<AhaClient>, ClientError> {
    let client = AhaClient::new(&config.domain, config.api_token.clone())?;
    Ok(AhaControlPlane::new(client, config.rest_settings()))
}
