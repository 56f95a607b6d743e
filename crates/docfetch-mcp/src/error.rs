//! Error types for the docfetch MCP server with MCP error code mapping

use thiserror::Error;

/// Errors that can occur while serving a tool call
#[derive(Debug, Error)]
pub enum McpError {
    /// Page retrieval or configuration failed in the core library
    #[error(transparent)]
    Core(#[from] docfetch_core::Error),

    /// JSON serialization/deserialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protocol error
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Missing or malformed tool argument
    #[error("invalid parameter: {0}")]
    InvalidParams(String),

    /// Bare component name not present in the catalog
    #[error("component '{0}' not found. Use search_docs to find available pages.")]
    ComponentNotFound(String),

    /// Tool name not served by this server
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl McpError {
    /// Map error to MCP error code
    pub const fn error_code(&self) -> i32 {
        match self {
            Self::Core(_) => -32603, // Internal error
            Self::Json(_) => -32700, // Parse error
            Self::Protocol(_) | Self::UnknownTool(_) => {
                -32600 // Invalid request
            },
            Self::InvalidParams(_) | Self::ComponentNotFound(_) => {
                -32602 // Invalid params
            },
        }
    }
}

/// Result type alias for MCP operations
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(McpError::InvalidParams("x".into()).error_code(), -32602);
        assert_eq!(McpError::ComponentNotFound("x".into()).error_code(), -32602);
        assert_eq!(McpError::UnknownTool("x".into()).error_code(), -32600);
        assert_eq!(
            McpError::Core(docfetch_core::Error::Storage("disk".into())).error_code(),
            -32603
        );
    }

    #[test]
    fn test_component_not_found_points_at_search() {
        let msg = McpError::ComponentNotFound("sparkline".into()).to_string();
        assert!(msg.contains("sparkline"));
        assert!(msg.contains("search_docs"));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err = McpError::from(docfetch_core::Error::RemoteFetch {
            url: "https://d.example.com/x".into(),
            status: Some(404),
            status_text: "Not Found".into(),
        });
        assert_eq!(
            err.to_string(),
            "remote fetch failed: https://d.example.com/x (Not Found)"
        );
    }
}
