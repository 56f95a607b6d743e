//! Page retrieval tools: by logical path and by bare component name

use docfetch_core::{CatalogIndex, FetchPipeline, Page};
use serde::{Deserialize, Serialize};

use crate::error::{McpError, McpResult};
use crate::tools::require_non_empty;

/// Parameters for the `get_page` tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPageParams {
    /// Logical page path, e.g. `chart-types/line-chart`
    pub path: String,
}

/// Parameters for the `get_component` tool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetComponentParams {
    /// Bare page name, e.g. `line-chart`
    pub component: String,
}

/// Handle the `get_page` tool
#[tracing::instrument(skip(pipeline))]
pub async fn handle_get_page(params: GetPageParams, pipeline: &FetchPipeline) -> McpResult<Page> {
    require_non_empty("path", &params.path)?;

    let page = pipeline.get(&params.path).await?;
    tracing::info!(chars = page.content.chars().count(), "served page");
    Ok(page)
}

/// Handle the `get_component` tool
///
/// Resolves the name through the catalog first; an unknown name never
/// reaches the network.
#[tracing::instrument(skip(catalog, pipeline))]
pub async fn handle_get_component(
    params: GetComponentParams,
    catalog: &CatalogIndex,
    pipeline: &FetchPipeline,
) -> McpResult<Page> {
    require_non_empty("component", &params.component)?;

    let path = catalog
        .resolve(&params.component)
        .ok_or_else(|| McpError::ComponentNotFound(params.component.clone()))?;
    tracing::debug!(%path, "resolved component");

    handle_get_page(GetPageParams { path }, pipeline).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use docfetch_core::{CacheStore, Fetcher, PageExtractor};
    use tempfile::TempDir;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const HTML: &str = "<html><head><title>Legend - Chart Docs</title></head>\
        <body><main><h1>Legend</h1><p>Shows series names.</p></main></body></html>";

    fn pipeline(base: &str, cache_dir: &std::path::Path) -> FetchPipeline {
        FetchPipeline::new(
            base,
            Fetcher::new().unwrap(),
            PageExtractor::new(15_000, "Chart Docs"),
            CacheStore::new(cache_dir, 3600),
        )
    }

    #[tokio::test]
    async fn test_get_component_resolves_through_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/components/legend"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HTML))
            .expect(1)
            .mount(&server)
            .await;
        let temp = TempDir::new().unwrap();

        let page = handle_get_component(
            GetComponentParams {
                component: "Legend".to_string(),
            },
            &CatalogIndex::builtin(),
            &pipeline(&server.uri(), temp.path()),
        )
        .await
        .unwrap();

        assert_eq!(page.title, "Legend");
        assert_eq!(page.content, "Legend\n\nShows series names.");
    }

    #[tokio::test]
    async fn test_unknown_component_never_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HTML))
            .expect(0)
            .mount(&server)
            .await;
        let temp = TempDir::new().unwrap();

        let err = handle_get_component(
            GetComponentParams {
                component: "sparkline".to_string(),
            },
            &CatalogIndex::builtin(),
            &pipeline(&server.uri(), temp.path()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, McpError::ComponentNotFound(ref name) if name == "sparkline"));
    }

    #[tokio::test]
    async fn test_get_page_fetch_failure_is_core_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let temp = TempDir::new().unwrap();

        let err = handle_get_page(
            GetPageParams {
                path: "missing/page".to_string(),
            },
            &pipeline(&server.uri(), temp.path()),
        )
        .await
        .unwrap_err();

        match err {
            McpError::Core(docfetch_core::Error::RemoteFetch { url, .. }) => {
                assert!(url.ends_with("/missing/page"));
            },
            other => panic!("expected RemoteFetch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_path_is_invalid() {
        let temp = TempDir::new().unwrap();
        let err = handle_get_page(
            GetPageParams {
                path: String::new(),
            },
            &pipeline("http://127.0.0.1:1", temp.path()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, McpError::InvalidParams(_)));
    }
}
