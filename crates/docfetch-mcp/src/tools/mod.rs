//! MCP tools for docfetch

pub mod list;
pub mod page;
pub mod search;

pub use list::{ListComponentsOutput, handle_list_components};
pub use page::{GetComponentParams, GetPageParams, handle_get_component, handle_get_page};
pub use search::{SearchDocsOutput, SearchDocsParams, handle_search_docs};

use crate::error::{McpError, McpResult};

/// Reject missing or blank string arguments.
pub(crate) fn require_non_empty(name: &str, value: &str) -> McpResult<()> {
    if value.trim().is_empty() {
        return Err(McpError::InvalidParams(format!("'{name}' cannot be empty")));
    }
    Ok(())
}
