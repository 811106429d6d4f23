use std::sync::Arc;

use serde::Serialize;

use crate::client::{AhaApi, RestAuth};
use crate::error::{ControlError, ControlResult};

pub mod features;
pub mod records;
pub mod search;

pub use features::{AssigneeRef, CreateFeatureRequest, WorkflowStatusRef};
pub use records::GetPageRequest;
pub use search::{SearchDocumentsRequest, SearchFeaturesRequest};

const MISSING_REST_SETTINGS: &str = "Missing AHA_API_TOKEN or AHA_DOMAIN environment variables";

/// Account settings used by the REST-backed handlers.
///
/// Both values are read once at startup. A missing value is reported when a
/// REST handler runs, before any request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestSettings {
    pub api_token: Option<String>,
    pub domain: Option<String>,
}

impl RestSettings {
    #[must_use]
    pub fn new(api_token: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            api_token: Some(api_token.into()),
            domain: Some(domain.into()),
        }
    }

    /// Resolves credentials for a REST call.
    ///
    /// # Errors
    /// Returns `ControlError::Internal` when either value is missing or blank.
    pub fn auth(&self) -> ControlResult<RestAuth<'_>> {
        let api_token = non_blank(self.api_token.as_deref());
        let domain = non_blank(self.domain.as_deref());
        match (api_token, domain) {
            (Some(api_token), Some(domain)) => Ok(RestAuth { domain, api_token }),
            _ => Err(ControlError::internal(MISSING_REST_SETTINGS)),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Tool handlers over a shared remote client.
pub struct AhaControlPlane<A: AhaApi> {
    api: Arc<A>,
    rest: RestSettings,
}

impl<A: AhaApi> Clone for AhaControlPlane<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            rest: self.rest.clone(),
        }
    }
}

impl<A: AhaApi> AhaControlPlane<A> {
    #[must_use]
    pub fn new(api: A, rest: RestSettings) -> Self {
        Self::from_arc(Arc::new(api), rest)
    }

    #[must_use]
    pub const fn from_arc(api: Arc<A>, rest: RestSettings) -> Self {
        Self { api, rest }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub const fn rest_settings(&self) -> &RestSettings {
        &self.rest
    }
}

/// Renders a handler result as 2-space indented JSON text.
pub(crate) fn pretty<T: Serialize>(value: &T, context: &str) -> ControlResult<String> {
    serde_json::to_string_pretty(value).map_err(|err| {
        tracing::error!(error = %err, "API Error: {context}");
        ControlError::Internal(format!("{context}: {err}"))
    })
}

/// Rejects a missing or empty required argument before any I/O.
pub(crate) fn require<'a>(value: &'a str, message: &str) -> ControlResult<&'a str> {
    if value.is_empty() {
        Err(ControlError::invalid_params(message))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_auth_requires_both_values() {
        assert!(RestSettings::new("token", "acme").auth().is_ok());

        let missing_domain = RestSettings {
            api_token: Some("token".to_string()),
            domain: None,
        };
        assert_eq!(
            missing_domain.auth(),
            Err(ControlError::internal(MISSING_REST_SETTINGS))
        );

        let blank_token = RestSettings {
            api_token: Some("  ".to_string()),
            domain: Some("acme".to_string()),
        };
        assert!(blank_token.auth().is_err());
        assert!(RestSettings::default().auth().is_err());
    }
}
