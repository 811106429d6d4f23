use aha_core::client::AhaApi;
use aha_core::control::{SearchDocumentsRequest, SearchFeaturesRequest};
use aha_core::control::search::DEFAULT_SEARCHABLE_TYPE;
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

/// Parameters for a document search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchDocumentsParams {
    #[schemars(description = "Search query string")]
    pub query: String,
    #[serde(rename = "searchableType", default = "default_searchable_type")]
    #[schemars(description = "Type of document to search for (e.g., Page)")]
    pub searchable_type: String,
}

fn default_searchable_type() -> String {
    DEFAULT_SEARCHABLE_TYPE.to_string()
}

/// Parameters for the REST feature listing. All filters are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchFeaturesParams {
    #[schemars(description = "Search term to match against feature name")]
    pub q: Option<String>,
    #[schemars(description = "Filter by product/project ID")]
    pub product_id: Option<String>,
    #[schemars(description = "Filter by assignee (user ID or email)")]
    pub assigned_to_user: Option<String>,
    #[schemars(description = "Filter by tag")]
    pub tag: Option<String>,
    #[schemars(description = "Only features updated after this timestamp (ISO8601)")]
    pub updated_since: Option<String>,
}

impl From<SearchDocumentsParams> for SearchDocumentsRequest {
    fn from(params: SearchDocumentsParams) -> Self {
        Self::new(params.query).with_searchable_type(params.searchable_type)
    }
}

impl From<SearchFeaturesParams> for SearchFeaturesRequest {
    fn from(params: SearchFeaturesParams) -> Self {
        Self {
            q: params.q,
            product_id: params.product_id,
            assigned_to_user: params.assigned_to_user,
            tag: params.tag,
            updated_since: params.updated_since,
        }
    }
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl<A: AhaApi> AhaMcp<A> {
    #[tool(description = "Search for Aha! documents")]
    async fn search_documents(
        &self,
        Parameters(params): Parameters<SearchDocumentsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .control
            .search_documents(&params.into())
            .await
            .map_err(helpers::map_err)?;
        Ok(helpers::text_result(text))
    }

    #[tool(description = "Search for Aha! features by name, assignee, tag, or update date")]
    async fn search_features(
        &self,
        Parameters(params): Parameters<SearchFeaturesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .control
            .search_features(&params.into())
            .await
            .map_err(helpers::map_err)?;
        Ok(helpers::text_result(text))
    }
}
