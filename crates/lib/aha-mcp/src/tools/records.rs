use aha_core::client::AhaApi;
use aha_core::control::GetPageRequest;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{AhaMcp, helpers};

/// Parameters for fetching a feature or requirement.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetRecordParams {
    #[schemars(description = "Reference number (e.g., DEVELOP-123 or ADT-123-1)")]
    pub reference: String,
}

/// Parameters for fetching a page.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetPageParams {
    #[schemars(description = "Reference number (e.g., ABC-N-213)")]
    pub reference: String,
    #[serde(rename = "includeParent", default)]
    #[schemars(description = "Include parent page in the response")]
    pub include_parent: bool,
}

impl From<GetPageParams> for GetPageRequest {
    fn from(params: GetPageParams) -> Self {
        Self {
            reference: params.reference,
            include_parent: params.include_parent,
        }
    }
}

#[tool_router(router = tool_router_records, vis = "pub")]
impl<A: AhaApi> AhaMcp<A> {
    #[tool(description = "Get an Aha! feature or requirement by reference number")]
    async fn get_record(
        &self,
        Parameters(params): Parameters<GetRecordParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .control
            .get_record(&params.reference)
            .await
            .map_err(helpers::map_err)?;
        Ok(helpers::text_result(text))
    }

    #[tool(description = "Get an Aha! page by reference number with optional relationships")]
    async fn get_page(
        &self,
        Parameters(params): Parameters<GetPageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .control
            .get_page(&params.into())
            .await
            .map_err(helpers::map_err)?;
        Ok(helpers::text_result(text))
    }
}
