//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the final
//! static site.
//!
//! ## Generated Pages
//!
//! - **Tutorial pages** (`/tutorials/{slug}/index.html`): rendered in parallel
//! - **Tutorial index** (`/tutorials/index.html`): every tutorial, manifest order
//! - **Contributor pages** (`/tutorials/contributors/{slug}/index.html`)
//! - **Category pages** (`/tutorials/categories/{slug}/index.html`)
//!
//! Contributor and category names that slugify to the same path share a page;
//! the first spelling seen titles it.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── images/
//! │   └── kubernetes.svg              # Featured images, copied verbatim
//! └── tutorials/
//!     ├── index.html
//!     ├── feature-flags-in-nextjs/
//!     │   └── index.html
//!     ├── contributors/
//!     │   └── joe-martin/
//!     │       └── index.html
//!     └── categories/
//!         └── feature-flags/
//!             └── index.html
//! ```
//!
//! CSS and JavaScript are inlined into every page (see [`crate::template`]).

use crate::slug::slugify;
use crate::template::{self, Listing, Viewport};
use crate::types::{Manifest, Tutorial};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No tutorial with slug {0:?}")]
    UnknownTutorial(String),
}

/// One written HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub title: String,
    /// Output path relative to the output directory.
    pub path: String,
}

/// What the generate stage wrote, for CLI output.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub tutorials: Vec<GeneratedPage>,
    pub listings: Vec<GeneratedPage>,
    /// Copied featured images, relative to the output directory.
    pub assets: Vec<String>,
}

/// Read the manifest from `manifest_path` and generate the site.
pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_dir, output_dir)
}

/// Generate the site for an in-memory manifest.
pub fn generate_site(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let css = template::stylesheet(&manifest.config);
    fs::create_dir_all(output_dir)?;

    let tutorials = manifest
        .tutorials
        .par_iter()
        .map(|tutorial| -> Result<GeneratedPage, GenerateError> {
            let html =
                template::render_tutorial_page(tutorial, &manifest.config, &css, Viewport::Responsive);
            let path = format!("tutorials/{}/index.html", tutorial.slug);
            write_page(output_dir, &path, &html.into_string())?;
            Ok(GeneratedPage {
                title: tutorial.page.title.clone(),
                path,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut listings = Vec::new();
    for (listing, members) in listings_for(&manifest.tutorials) {
        let html = template::render_listing_page(listing, &members, &manifest.config, &css);
        let path = format!("{}/index.html", listing.path().trim_start_matches('/'));
        write_page(output_dir, &path, &html.into_string())?;
        listings.push(GeneratedPage {
            title: listing.heading(),
            path,
        });
    }

    let assets = copy_featured_images(&manifest.tutorials, source_dir, output_dir)?;

    Ok(GenerateReport {
        tutorials,
        listings,
        assets,
    })
}

/// Render one tutorial page to a string, for previewing a single page.
pub fn render_tutorial(
    manifest: &Manifest,
    slug: &str,
    viewport: Viewport,
) -> Result<String, GenerateError> {
    let tutorial = manifest
        .tutorials
        .iter()
        .find(|t| t.slug == slug)
        .ok_or_else(|| GenerateError::UnknownTutorial(slug.to_string()))?;
    let css = template::stylesheet(&manifest.config);
    Ok(template::render_tutorial_page(tutorial, &manifest.config, &css, viewport).into_string())
}

fn write_page(output_dir: &Path, rel_path: &str, html: &str) -> std::io::Result<()> {
    let path = output_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)
}

/// Every listing page with its tutorials: the index, then contributors, then
/// categories, each group ordered by slug.
fn listings_for(tutorials: &[Tutorial]) -> Vec<(Listing<'_>, Vec<&Tutorial>)> {
    let mut contributors: BTreeMap<String, (&str, Vec<&Tutorial>)> = BTreeMap::new();
    let mut categories: BTreeMap<String, (&str, Vec<&Tutorial>)> = BTreeMap::new();

    for tutorial in tutorials {
        for contributor in &tutorial.page.contributors {
            add_to_group(&mut contributors, &contributor.name, tutorial);
        }
        for category in &tutorial.page.categories {
            add_to_group(&mut categories, category, tutorial);
        }
    }

    let mut listings = vec![(Listing::All, tutorials.iter().collect())];
    listings.extend(
        contributors
            .into_values()
            .map(|(name, members)| (Listing::Contributor(name), members)),
    );
    listings.extend(
        categories
            .into_values()
            .map(|(name, members)| (Listing::Category(name), members)),
    );
    listings
}

fn add_to_group<'a>(
    groups: &mut BTreeMap<String, (&'a str, Vec<&'a Tutorial>)>,
    name: &'a str,
    tutorial: &'a Tutorial,
) {
    let slug = slugify(name);
    if slug.is_empty() {
        return;
    }
    let (_, members) = groups.entry(slug).or_insert_with(|| (name, Vec::new()));
    if !members.iter().any(|t| t.slug == tutorial.slug) {
        members.push(tutorial);
    }
}

/// Copy each referenced featured image from the content root to the same
/// relative path in the output.
fn copy_featured_images(
    tutorials: &[Tutorial],
    source_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<String>, GenerateError> {
    let images: BTreeSet<&str> = tutorials
        .iter()
        .filter_map(|t| t.page.featured_image.as_deref())
        .map(|image| image.trim_start_matches('/'))
        .collect();

    let mut copied = Vec::with_capacity(images.len());
    for rel in images {
        let dst = output_dir.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source_dir.join(rel), &dst)?;
        copied.push(rel.to_string());
    }
    Ok(copied)
}
