//! Static catalog of known documentation pages.
//!
//! The catalog maps section names to the page names they contain, in a fixed
//! declaration order. It backs component listing, substring search and
//! resolution of bare page names into `section/page` paths. It never changes
//! after construction and performs no discovery.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A catalog section and its pages, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSection {
    /// Section name, also the first segment of page paths.
    pub name: String,
    /// Page names within the section.
    pub pages: Vec<String>,
}

impl CatalogSection {
    /// Create a section from string slices.
    pub fn new(name: &str, pages: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            pages: pages.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    fn path_of(&self, page: &str) -> String {
        format!("{}/{page}", self.name)
    }
}

/// Ordered, read-only registry of documentation sections and pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIndex {
    sections: Vec<CatalogSection>,
}

impl CatalogIndex {
    /// Create a catalog from sections in the order they should be listed.
    #[must_use]
    pub const fn new(sections: Vec<CatalogSection>) -> Self {
        Self { sections }
    }

    /// The built-in catalog of the documentation site.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            CatalogSection::new(
                "getting-started",
                &["installation", "quick-start", "configuration", "theming"],
            ),
            CatalogSection::new(
                "chart-types",
                &[
                    "line-chart",
                    "bar-chart",
                    "area-chart",
                    "pie-chart",
                    "donut-chart",
                    "scatter-chart",
                    "radar-chart",
                    "radial-bar-chart",
                    "candlestick-chart",
                    "heatmap",
                ],
            ),
            CatalogSection::new(
                "components",
                &[
                    "axis",
                    "legend",
                    "tooltip",
                    "grid",
                    "data-label",
                    "reference-line",
                    "brush",
                ],
            ),
            CatalogSection::new(
                "customization",
                &["colors", "animations", "responsive", "custom-shapes", "gradients"],
            ),
            CatalogSection::new(
                "api-reference",
                &["chart-options", "data-format", "events", "methods"],
            ),
        ])
    }

    /// All sections, verbatim and in declaration order.
    #[must_use]
    pub fn list(&self) -> &[CatalogSection] {
        &self.sections
    }

    /// Total number of pages across all sections.
    #[must_use]
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.pages.len()).sum()
    }

    /// Every `section/page` whose page name or section name contains
    /// `query`, ignoring case.
    ///
    /// Results follow catalog order and each path appears at most once. An
    /// empty query matches everything.
    ///
    /// ```rust
    /// use docfetch_core::CatalogIndex;
    ///
    /// let catalog = CatalogIndex::builtin();
    /// assert!(catalog.search("BAR").contains(&"chart-types/bar-chart".to_string()));
    /// ```
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut results = Vec::new();
        for section in &self.sections {
            let section_matches = section.name.to_lowercase().contains(&needle);
            for page in &section.pages {
                if section_matches || page.to_lowercase().contains(&needle) {
                    results.push(section.path_of(page));
                }
            }
        }
        results
    }

    /// Resolve a bare page name to its `section/page` path.
    ///
    /// Matches page names only (not sections), exactly but ignoring case,
    /// and returns the first section in declaration order that has it.
    #[must_use]
    pub fn resolve(&self, component: &str) -> Option<String> {
        let wanted = component.to_lowercase();
        self.sections.iter().find_map(|section| {
            section
                .pages
                .iter()
                .find(|page| page.to_lowercase() == wanted)
                .map(|page| section.path_of(page))
        })
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Serializes as an ordered object of `section -> [pages]`.
impl Serialize for CatalogIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, &section.pages)?;
        }
        map.end()
    }
}
