//! Tutorial front matter.
//!
//! A tutorial file starts with a TOML block fenced by `+++` lines:
//!
//! ```text
//! +++
//! title = "Deploying on Kubernetes"
//! contributors = ["joe"]
//! categories = ["Self-hosting"]
//! featured_image = "images/k8s.png"
//! +++
//!
//! Markdown body...
//! ```
//!
//! Unknown keys are rejected, same as `config.toml`.

use serde::Deserialize;
use thiserror::Error;

const FENCE: &str = "+++";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("missing opening +++ fence")]
    MissingOpening,
    #[error("missing closing +++ fence")]
    MissingClosing,
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parsed front matter of one tutorial.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Frontmatter {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Contributor ids, resolved against `authors.toml`.
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default, alias = "topics")]
    pub categories: Vec<String>,
    /// Path relative to the content root.
    #[serde(default, alias = "featuredImage")]
    pub featured_image: Option<String>,
}

/// Split a tutorial source into its front matter and markdown body.
pub fn parse(source: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source
        .trim_start_matches(['\n', '\r'])
        .strip_prefix(FENCE)
        .ok_or(FrontmatterError::MissingOpening)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .ok_or(FrontmatterError::MissingOpening)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let matter: Frontmatter = toml::from_str(&rest[..offset])?;
            return Ok((matter, &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FrontmatterError::MissingClosing)
}
