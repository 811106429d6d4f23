use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value, json};
use tracing::{debug, info};

use super::{AhaControlPlane, pretty, require};
use crate::client::AhaApi;
use crate::error::{ClientError, ControlError, ControlResult, wrap_rest};
use crate::payload::{FieldRule, build_sparse};

const CREATE_FEATURE_FAILED: &str = "Failed to create feature";

/// Optional feature fields and the rule deciding whether each is sent.
pub const FEATURE_FIELDS: &[FieldRule] = &[
    FieldRule::text("workflow_kind"),
    FieldRule::defined("workflow_status"),
    FieldRule::text("description"),
    FieldRule::text("created_by"),
    FieldRule::defined("assigned_to_user"),
    FieldRule::text("tags"),
    FieldRule::text("initial_estimate_text"),
    FieldRule::text("detailed_estimate_text"),
    FieldRule::text("remaining_estimate_text"),
    FieldRule::defined("initial_estimate"),
    FieldRule::defined("detailed_estimate"),
    FieldRule::defined("remaining_estimate"),
    FieldRule::text("start_date"),
    FieldRule::text("due_date"),
    FieldRule::text("release_phase"),
    FieldRule::text("initiative"),
    FieldRule::text("epic"),
    FieldRule::text("progress_source"),
    FieldRule::defined("progress"),
    FieldRule::text("team"),
    FieldRule::text("team_workflow_status"),
    FieldRule::text("iteration"),
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowStatusRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssigneeRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Input for creating a feature in a release.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateFeatureRequest {
    pub release_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_status: Option<WorkflowStatusRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_user: Option<AssigneeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_estimate_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_estimate_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_estimate_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_estimate: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_estimate: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_estimate: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_workflow_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,
}

impl CreateFeatureRequest {
    #[must_use]
    pub fn new(release_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            release_id: release_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// The `feature` object sent to the service: `name` plus only the
    /// optional fields the caller supplied.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if the request cannot be represented as JSON.
    pub fn feature_payload(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let Value::Object(input) = serde_json::to_value(self)? else {
            return Ok(Map::new());
        };
        let mut base = Map::new();
        base.insert("name".to_string(), Value::String(self.name.clone()));
        Ok(build_sparse(base, &input, FEATURE_FIELDS))
    }
}

#[must_use]
pub fn release_features_path(release_id: &str) -> String {
    format!("/api/v1/releases/{release_id}/features")
}

/// The `feature` member of a create response, passed through untouched.
/// A `null` feature counts as absent.
fn created_feature(body: Value) -> Option<Value> {
    match body {
        Value::Object(mut body) => body.remove("feature").filter(|feature| !feature.is_null()),
        _ => None,
    }
}

impl<A: AhaApi> AhaControlPlane<A> {
    /// Creates a feature in a release through the REST API.
    ///
    /// # Errors
    /// Returns `InvalidParams` when `release_id` or `name` is empty, and
    /// `Internal` when settings are missing, the service rejects the request,
    /// or the response carries no feature.
    pub async fn create_feature(&self, request: &CreateFeatureRequest) -> ControlResult<String> {
        let release_id = require(&request.release_id, "Release ID is required")?;
        require(&request.name, "Feature name is required")?;

        let feature = request
            .feature_payload()
            .map_err(|err| wrap_rest(CREATE_FEATURE_FAILED, &ClientError::Decode(err)))?;
        let auth = self.rest.auth()?;
        debug!(release_id, fields = feature.len(), "creating feature");

        let body = self
            .api
            .rest_post(auth, &release_features_path(release_id), &json!({ "feature": feature }))
            .await
            .map_err(|err| wrap_rest(CREATE_FEATURE_FAILED, &err))?;
        let created = created_feature(body).ok_or_else(|| {
            ControlError::internal("Failed to create feature - no feature returned")
        })?;

        let reference = created.get("reference_num").and_then(Value::as_str);
        info!(reference, release_id, "feature created");
        pretty(&created, CREATE_FEATURE_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_request_sends_only_name() {
        let payload = CreateFeatureRequest::new("PRJ-R-1", "Login")
            .feature_payload()
            .expect("payload should build");
        assert_eq!(Value::Object(payload), json!({ "name": "Login" }));
    }

    #[test]
    fn zero_progress_is_sent_and_missing_progress_is_not() {
        let mut request = CreateFeatureRequest::new("PRJ-R-1", "Login");
        request.progress = Some(Number::from(0));
        let payload = request.feature_payload().expect("payload should build");
        assert_eq!(payload.get("progress"), Some(&json!(0)));

        request.progress = None;
        let payload = request.feature_payload().expect("payload should build");
        assert!(!payload.contains_key("progress"));
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let mut request = CreateFeatureRequest::new("PRJ-R-1", "Login");
        request.description = Some(String::new());
        request.tags = Some("auth,mobile".to_string());
        request.assigned_to_user = Some(AssigneeRef {
            email: Some("dev@example.com".to_string()),
            id: None,
        });
        let payload = request.feature_payload().expect("payload should build");
        assert_eq!(
            Value::Object(payload),
            json!({
                "name": "Login",
                "tags": "auth,mobile",
                "assigned_to_user": { "email": "dev@example.com" }
            })
        );
    }

    #[test]
    fn created_feature_tolerates_sparse_bodies() {
        let feature = json!({ "id": "1", "name": "Login", "reference_num": null });
        assert_eq!(
            created_feature(json!({ "feature": feature.clone() })),
            Some(feature)
        );
        assert_eq!(created_feature(json!({ "feature": null })), None);
        assert_eq!(created_feature(json!({ "ok": true })), None);
        assert_eq!(created_feature(json!([])), None);
    }

    #[test]
    fn release_id_never_enters_the_feature_body() {
        let payload = CreateFeatureRequest::new("PRJ-R-1", "Login")
            .feature_payload()
            .expect("payload should build");
        assert!(!payload.contains_key("release_id"));
        assert_eq!(
            release_features_path("PRJ-R-1"),
            "/api/v1/releases/PRJ-R-1/features"
        );
    }
}
