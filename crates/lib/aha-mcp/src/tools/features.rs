use aha_core::client::AhaApi;
use aha_core::control::{AssigneeRef, CreateFeatureRequest, WorkflowStatusRef};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::{AhaMcp, helpers};

/// Workflow status selector for a new feature.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WorkflowStatusParam {
    #[schemars(description = "Name of the workflow status")]
    pub name: Option<String>,
    #[schemars(description = "ID of the workflow status")]
    pub id: Option<String>,
}

/// Assignee selector for a new feature.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AssigneeParam {
    #[schemars(description = "Email address of the assigned user")]
    pub email: Option<String>,
    #[schemars(description = "ID of the assigned user")]
    pub id: Option<String>,
}

/// Parameters for creating a feature in a release.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateFeatureParams {
    #[schemars(description = "Numeric ID or key of the release (required)")]
    pub release_id: String,
    #[schemars(description = "Name of the feature (required)")]
    pub name: String,
    #[schemars(description = "Type of feature")]
    pub workflow_kind: Option<String>,
    #[schemars(description = "Status of the feature")]
    pub workflow_status: Option<WorkflowStatusParam>,
    #[schemars(description = "Description of the feature (may include HTML formatting)")]
    pub description: Option<String>,
    #[schemars(description = "Email address of the user who created the feature")]
    pub created_by: Option<String>,
    #[schemars(description = "User assigned to the feature")]
    pub assigned_to_user: Option<AssigneeParam>,
    #[schemars(description = "Tags to add to the feature (comma-separated)")]
    pub tags: Option<String>,
    #[schemars(description = "Initial estimated effort (e.g., '2d 1h' for time or '4p' for points)")]
    pub initial_estimate_text: Option<String>,
    #[schemars(description = "Detailed estimated effort (e.g., '2d 1h' for time or '4p' for points)")]
    pub detailed_estimate_text: Option<String>,
    #[schemars(description = "Remaining estimated effort (e.g., '2d 1h' for time or '4p' for points)")]
    pub remaining_estimate_text: Option<String>,
    #[schemars(description = "Initial estimate in the product's estimation units")]
    pub initial_estimate: Option<Number>,
    #[schemars(description = "Detailed estimate in the product's estimation units")]
    pub detailed_estimate: Option<Number>,
    #[schemars(description = "Remaining estimate in the product's estimation units")]
    pub remaining_estimate: Option<Number>,
    #[schemars(description = "Date that work will start (YYYY-MM-DD format)")]
    pub start_date: Option<String>,
    #[schemars(description = "Date that work is due to be completed (YYYY-MM-DD format)")]
    pub due_date: Option<String>,
    #[schemars(description = "Name or ID of release phase")]
    pub release_phase: Option<String>,
    #[schemars(description = "Name or ID of initiative")]
    pub initiative: Option<String>,
    #[schemars(description = "Name or ID of epic")]
    pub epic: Option<String>,
    #[schemars(description = "Numeric ID or key of the team")]
    pub team: Option<String>,
    #[schemars(description = "Source used to calculate progress (e.g., manual)")]
    pub progress_source: Option<String>,
    #[schemars(description = "Progress percentage when the progress source is manual")]
    pub progress: Option<Number>,
    #[schemars(description = "Name or ID of the team workflow status")]
    pub team_workflow_status: Option<String>,
    #[schemars(description = "Name or ID of the iteration")]
    pub iteration: Option<String>,
}

impl From<CreateFeatureParams> for CreateFeatureRequest {
    fn from(params: CreateFeatureParams) -> Self {
        Self {
            release_id: params.release_id,
            name: params.name,
            workflow_kind: params.workflow_kind,
            workflow_status: params.workflow_status.map(|status| WorkflowStatusRef {
                name: status.name,
                id: status.id,
            }),
            description: params.description,
            created_by: params.created_by,
            assigned_to_user: params.assigned_to_user.map(|user| AssigneeRef {
                email: user.email,
                id: user.id,
            }),
            tags: params.tags,
            initial_estimate_text: params.initial_estimate_text,
            detailed_estimate_text: params.detailed_estimate_text,
            remaining_estimate_text: params.remaining_estimate_text,
            initial_estimate: params.initial_estimate,
            detailed_estimate: params.detailed_estimate,
            remaining_estimate: params.remaining_estimate,
            start_date: params.start_date,
            due_date: params.due_date,
            release_phase: params.release_phase,
            initiative: params.initiative,
            epic: params.epic,
            team: params.team,
            progress_source: params.progress_source,
            progress: params.progress,
            team_workflow_status: params.team_workflow_status,
            iteration: params.iteration,
        }
    }
}

#[tool_router(router = tool_router_features, vis = "pub")]
impl<A: AhaApi> AhaMcp<A> {
    #[tool(description = "Create a new feature in Aha!")]
    async fn create_feature(
        &self,
        Parameters(params): Parameters<CreateFeatureParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .control
            .create_feature(&params.into())
            .await
            .map_err(helpers::map_err)?;
        Ok(helpers::text_result(text))
    }
}
