//! MCP server implementation for docfetch

use std::sync::Arc;

use docfetch_core::{CatalogIndex, Config, FetchPipeline};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorCode, ErrorData, Implementation,
    JsonObject, ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities,
    ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{McpError, McpResult};
use crate::tools;

/// Tool names served by [`McpServer`].
pub const TOOL_NAMES: [&str; 4] = ["search_docs", "list_components", "get_page", "get_component"];

/// MCP server exposing the documentation catalog and page pipeline as tools
#[derive(Clone)]
pub struct McpServer {
    pipeline: Arc<FetchPipeline>,
    catalog: Arc<CatalogIndex>,
}

impl McpServer {
    /// Create a server over an assembled pipeline and catalog
    pub fn new(pipeline: FetchPipeline, catalog: CatalogIndex) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            catalog: Arc::new(catalog),
        }
    }

    /// Create a server with the built-in catalog from resolved configuration
    pub fn from_config(config: &Config) -> McpResult<Self> {
        let pipeline = FetchPipeline::from_config(config)?;
        Ok(Self::new(pipeline, CatalogIndex::builtin()))
    }

    /// Tool descriptors advertised by `tools/list`
    pub fn tools() -> Vec<Tool> {
        vec![
            Tool::new(
                "search_docs",
                "Search documentation pages by case-insensitive substring of section or page name",
                string_args_schema("query", "Text to look for, e.g. 'bar' or 'customization'"),
            ),
            Tool::new(
                "list_components",
                "List every documentation section with its pages",
                schema(json!({ "type": "object", "properties": {} })),
            ),
            Tool::new(
                "get_page",
                "Fetch a documentation page by path, e.g. 'chart-types/line-chart'",
                string_args_schema("path", "Logical page path 'section/page'"),
            ),
            Tool::new(
                "get_component",
                "Fetch the documentation page for a component by bare name, e.g. 'line-chart'",
                string_args_schema("component", "Page name without its section"),
            ),
        ]
    }

    /// Run one tool call and return its JSON payload
    ///
    /// # Errors
    ///
    /// Returns [`McpError::UnknownTool`] for names outside [`TOOL_NAMES`],
    /// [`McpError::InvalidParams`] for missing or mistyped arguments, and
    /// whatever the handler itself fails with.
    #[tracing::instrument(skip(self, arguments))]
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> McpResult<Value> {
        let value = match name {
            "search_docs" => {
                let output = tools::handle_search_docs(parse_args(arguments)?, &self.catalog);
                serde_json::to_value(output)?
            },
            "list_components" => {
                serde_json::to_value(tools::handle_list_components(&self.catalog))?
            },
            "get_page" => {
                let page = tools::handle_get_page(parse_args(arguments)?, &self.pipeline).await?;
                serde_json::to_value(page)?
            },
            "get_component" => {
                let params = parse_args(arguments)?;
                let page =
                    tools::handle_get_component(params, &self.catalog, &self.pipeline).await?;
                serde_json::to_value(page)?
            },
            other => return Err(McpError::UnknownTool(other.to_string())),
        };
        Ok(value)
    }

    /// Serve the MCP protocol over stdio
    pub async fn serve_stdio(&self) -> McpResult<()> {
        tracing::info!(
            base_url = self.pipeline.base_url(),
            cache_enabled = self.pipeline.cache().is_enabled(),
            "docfetch MCP server starting"
        );

        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let service = rmcp::serve_server(self.clone(), (stdin, stdout))
            .await
            .map_err(|e| {
                tracing::error!("server initialization error: {}", e);
                McpError::Protocol(e.to_string())
            })?;

        service.waiting().await.map_err(|e| {
            tracing::error!("server runtime error: {}", e);
            McpError::Protocol(e.to_string())
        })?;

        tracing::info!("docfetch MCP server stopped");
        Ok(())
    }
}

/// Render a tool outcome as text content.
///
/// Failures become `{"error": "..."}` with the error flag set, so a bad call
/// never ends the session.
pub fn render(result: McpResult<Value>) -> CallToolResult {
    let rendered =
        result.and_then(|value| serde_json::to_string_pretty(&value).map_err(McpError::from));
    match rendered {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            tracing::warn!(code = e.error_code(), error = %e, "tool call failed");
            CallToolResult::error(vec![Content::text(
                json!({ "error": e.to_string() }).to_string(),
            )])
        },
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Option<JsonObject>) -> McpResult<T> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| McpError::InvalidParams(e.to_string()))
}

fn schema(value: Value) -> Arc<JsonObject> {
    Arc::new(value.as_object().cloned().unwrap_or_default())
}

fn string_args_schema(name: &str, description: &str) -> Arc<JsonObject> {
    let mut properties = JsonObject::new();
    properties.insert(
        name.to_string(),
        json!({ "type": "string", "description": description }),
    );
    schema(json!({
        "type": "object",
        "properties": properties,
        "required": [name],
    }))
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "docfetch-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Use search_docs or list_components to find a page, then get_page or \
                 get_component to read it."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(Self::tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.dispatch(&request.name, request.arguments).await {
            Err(e @ McpError::UnknownTool(_)) => {
                Err(ErrorData::new(ErrorCode(e.error_code()), e.to_string(), None))
            },
            result => Ok(render(result)),
        }
    }
}
