//! MCP server implementation for aha-mcp.
//!
//! This crate wires the aha-core control plane into rmcp tool handlers and
//! exposes the MCP-facing tool surface for Aha! lookups, searches, and feature
//! creation.

mod helpers;
mod tools;
pub mod server;

use aha_core::client::AhaApi;
use aha_core::control::AhaControlPlane;
use rmcp::{
    ErrorData,
    RoleServer,
    ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    service::RequestContext,
};
use rmcp::model::{
    CallToolRequestParams,
    CallToolResult,
    Implementation,
    ListToolsResult,
    PaginatedRequestParams,
    ServerCapabilities,
    ServerInfo,
};

pub use tools::features::{AssigneeParam, CreateFeatureParams, WorkflowStatusParam};
pub use tools::records::{GetPageParams, GetRecordParams};
pub use tools::search::{SearchDocumentsParams, SearchFeaturesParams};

const SERVER_NAME: &str = "aha-mcp";

const SERVER_INSTRUCTIONS: &str = r"aha-mcp exposes an Aha! account to MCP clients.

Tools:
- `get_record`: fetch a feature (`DEVELOP-123`) or requirement (`ADT-123-1`) by reference number.
- `get_page`: fetch a page/note (`ABC-N-213`); set `includeParent` to also fetch its parent page.
- `search_documents`: full-text search, filtered by `searchableType` (defaults to `Page`).
- `search_features`: list features, optionally filtered by `q`, `product_id`, `assigned_to_user`,
  `tag`, or `updated_since`.
- `create_feature`: create a feature in a release; `release_id` and `name` are required and only
  the optional fields you supply are sent.

Results are returned as pretty-printed JSON text. Lookups of unknown references return a short
'No record found' / 'No page found' message instead of an error.";

/// MCP server wrapper around the Aha! control plane and tool routers.
pub struct AhaMcp<A: AhaApi> {
    tool_router: ToolRouter<Self>,
    control: AhaControlPlane<A>,
}

impl<A: AhaApi> Clone for AhaMcp<A> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<A: AhaApi> AhaMcp<A> {
    /// Creates a new server over a control plane.
    #[must_use]
    pub fn new(control: AhaControlPlane<A>) -> Self {
        let tool_router = Self::tool_router_records()
            + Self::tool_router_search()
            + Self::tool_router_features();
        Self {
            tool_router,
            control,
        }
    }

    /// Names of the registered tools.
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }

    #[must_use]
    pub const fn control(&self) -> &AhaControlPlane<A> {
        &self.control
    }
}

impl<A: AhaApi> ServerHandler for AhaMcp<A> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_router.list_all()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if !self.tool_router.has_route(&request.name) {
            tracing::warn!(tool = %request.name, "call for unknown tool");
            return Err(helpers::unknown_tool(&request.name));
        }
        let call = ToolCallContext::new(self, request, context);
        self.tool_router.call(call).await
    }
}

#[cfg(test)]
mod tests {
    use aha_core::client::RestAuth;
    use aha_core::control::RestSettings;
    use aha_core::error::ClientResult;
    use serde_json::{Value, json};

    use super::*;

    struct OfflineApi;

    #[async_trait::async_trait]
    impl AhaApi for OfflineApi {
        async fn graphql(&self, _query: &str, _variables: Value) -> ClientResult<Value> {
            Ok(json!({}))
        }

        async fn rest_get(
            &self,
            _auth: RestAuth<'_>,
            _path: &str,
            _query: &[(&'static str, String)],
        ) -> ClientResult<Value> {
            Ok(json!({}))
        }

        async fn rest_post(
            &self,
            _auth: RestAuth<'_>,
            _path: &str,
            _body: &Value,
        ) -> ClientResult<Value> {
            Ok(json!({}))
        }
    }

    fn server() -> AhaMcp<OfflineApi> {
        AhaMcp::new(AhaControlPlane::new(OfflineApi, RestSettings::default()))
    }

    #[test]
    fn registers_the_five_tools() {
        assert_eq!(
            server().tool_names(),
            vec![
                "create_feature",
                "get_page",
                "get_record",
                "search_documents",
                "search_features",
            ]
        );
    }

    #[test]
    fn tool_schemas_declare_required_arguments() {
        let server = server();
        let tools = server.tool_router.list_all();
        let required = |name: &str| -> Vec<String> {
            let tool = tools
                .iter()
                .find(|tool| tool.name == name)
                .unwrap_or_else(|| panic!("tool {name} should be registered"));
            let mut fields: Vec<String> = tool
                .input_schema
                .get("required")
                .and_then(Value::as_array)
                .map(|fields| {
                    fields
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            fields.sort();
            fields
        };

        assert_eq!(required("get_record"), vec!["reference"]);
        assert_eq!(required("get_page"), vec!["reference"]);
        assert_eq!(required("search_documents"), vec!["query"]);
        assert!(required("search_features").is_empty());
        assert_eq!(required("create_feature"), vec!["name", "release_id"]);
    }

    #[test]
    fn server_info_advertises_tools() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, SERVER_NAME);
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }
}
