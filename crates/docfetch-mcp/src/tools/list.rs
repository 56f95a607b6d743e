//! Listing of every catalog section and its pages

use docfetch_core::CatalogIndex;
use serde::Serialize;

/// Output from `list_components`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComponentsOutput {
    /// Section name to page names, in catalog order
    pub categories: CatalogIndex,
    /// Number of pages across all sections
    pub total: usize,
}

/// Handle the `list_components` tool. Takes no arguments.
pub fn handle_list_components(catalog: &CatalogIndex) -> ListComponentsOutput {
    ListComponentsOutput {
        categories: catalog.clone(),
        total: catalog.total(),
    }
}
