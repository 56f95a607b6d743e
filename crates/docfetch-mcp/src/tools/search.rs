//! Substring search over the documentation catalog

use docfetch_core::CatalogIndex;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_docs` tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocsParams {
    /// Case-insensitive substring matched against section and page names.
    /// An empty query matches every page.
    pub query: String,
}

/// Output from `search_docs`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocsOutput {
    /// The query as given
    pub query: String,
    /// Matching `section/page` paths in catalog order
    pub results: Vec<String>,
    /// Human-readable summary
    pub message: String,
}

/// Handle the `search_docs` tool
#[tracing::instrument(skip(catalog))]
pub fn handle_search_docs(
    params: SearchDocsParams,
    catalog: &CatalogIndex,
) -> SearchDocsOutput {
    let results = catalog.search(&params.query);
    let message = if results.is_empty() {
        format!(
            "No pages match '{}'. Try list_components to browse every section.",
            params.query
        )
    } else {
        format!("Found {} matching pages", results.len())
    };
    tracing::debug!(count = results.len(), "searched catalog");

    SearchDocsOutput {
        query: params.query,
        results,
        message,
    }
}
