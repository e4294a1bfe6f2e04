//! Shared types passed from scan to generate.
//!
//! These are serialized to `manifest.json` by the scan stage and read back by
//! the generate stage, so both stages use the exact same definitions.

use crate::config::SiteConfig;
use serde::{Deserialize, Serialize};

/// Scan output: every tutorial plus the resolved site config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub tutorials: Vec<Tutorial>,
    pub config: SiteConfig,
}

/// One tutorial page, ready to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutorial {
    /// URL slug: the page lives at `/tutorials/{slug}/`.
    pub slug: String,
    /// Markdown source, relative to the content root.
    pub source_path: String,
    pub page: PageData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub table_of_contents: Vec<TocEntry>,
    /// View count from the analytics export, when it has one for this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_views: Option<u64>,
}

impl Tutorial {
    /// Site-relative URL of the page, with trailing slash.
    pub fn url_path(&self) -> String {
        format!("/tutorials/{}/", self.slug)
    }
}

/// Everything the page template shows about a tutorial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Plain-text prefix of the body, used when there is no description.
    pub excerpt: String,
    /// Rendered HTML body.
    pub body: String,
    /// Site-relative public URL of the featured image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl PageData {
    /// Meta description: the explicit description, or the excerpt.
    pub fn summary(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&self.excerpt)
    }
}

/// A tutorial author, resolved from `authors.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contributor {
    pub id: String,
    pub name: String,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One table-of-contents line, derived from a body heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// In-page anchor, `#heading-id`.
    pub url: String,
    /// Heading text.
    pub value: String,
    /// Nesting depth: 0 for `h2`, 1 for `h3`, ...
    pub depth: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(description: Option<&str>) -> PageData {
        PageData {
            title: "T".to_string(),
            description: description.map(str::to_string),
            excerpt: "From the body".to_string(),
            body: String::new(),
            featured_image: None,
            contributors: vec![],
            categories: vec![],
        }
    }

    #[test]
    fn summary_prefers_description() {
        assert_eq!(page(Some("Explicit")).summary(), "Explicit");
    }

    #[test]
    fn summary_falls_back_to_excerpt() {
        assert_eq!(page(None).summary(), "From the body");
        assert_eq!(page(Some("  ")).summary(), "From the body");
    }

    #[test]
    fn tutorial_url_path_has_trailing_slash() {
        let tutorial = Tutorial {
            slug: "install-on-kubernetes".to_string(),
            source_path: "tutorials/install-on-kubernetes.md".to_string(),
            page: page(None),
            table_of_contents: vec![],
            page_views: None,
        };
        assert_eq!(tutorial.url_path(), "/tutorials/install-on-kubernetes/");
    }
}
