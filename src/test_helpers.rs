//! Shared test utilities.
//!
//! Fixture setup plus lookup helpers over scan output (`Manifest`,
//! `Tutorial`) and small builders for render tests.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let tutorial = find_tutorial(&manifest, "feature-flags-in-nextjs");
//! assert_eq!(contributor_names(tutorial), vec!["Joe Martin", "Ana Lúcia Souza"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Contributor, Manifest, PageData, TocEntry, Tutorial};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups: panic with a clear message on miss
// =========================================================================

/// Find a tutorial by slug. Panics if not found.
pub fn find_tutorial<'a>(manifest: &'a Manifest, slug: &str) -> &'a Tutorial {
    manifest
        .tutorials
        .iter()
        .find(|t| t.slug == slug)
        .unwrap_or_else(|| {
            let slugs = tutorial_slugs(manifest);
            panic!("tutorial '{slug}' not found. Available: {slugs:?}")
        })
}

/// All tutorial slugs in manifest order.
pub fn tutorial_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.tutorials.iter().map(|t| t.slug.as_str()).collect()
}

/// Contributor display names in page order.
pub fn contributor_names(tutorial: &Tutorial) -> Vec<&str> {
    tutorial
        .page
        .contributors
        .iter()
        .map(|c| c.name.as_str())
        .collect()
}

// =========================================================================
// Builders
// =========================================================================

pub fn contributor(id: &str, name: &str) -> Contributor {
    Contributor {
        id: id.to_string(),
        name: name.to_string(),
        image: Some(format!("https://avatars.example/{id}.png")),
    }
}

pub fn toc_entry(id: &str, value: &str, depth: u8) -> TocEntry {
    TocEntry {
        url: format!("#{id}"),
        value: value.to_string(),
        depth,
    }
}

/// A fully populated tutorial; tests strip what they don't need.
pub fn sample_tutorial() -> Tutorial {
    Tutorial {
        slug: "feature-flags-in-nextjs".to_string(),
        source_path: "tutorials/010-feature-flags-in-nextjs.md".to_string(),
        page: PageData {
            title: "How to set up feature flags in Next.js".to_string(),
            description: Some("Roll out safely".to_string()),
            excerpt: "Feature flags let you ship code".to_string(),
            body: r#"<h2 id="install">Install</h2><p>Body text</p>"#.to_string(),
            featured_image: Some("/images/flags.png".to_string()),
            contributors: vec![
                contributor("joe", "Joe Martin"),
                contributor("ana", "Ana Lúcia Souza"),
            ],
            categories: vec!["Feature flags".to_string(), "Next.js".to_string()],
        },
        table_of_contents: vec![
            toc_entry("install", "Install", 0),
            toc_entry("client-side", "Client side", 1),
            toc_entry("next-steps", "Next steps", 0),
        ],
        page_views: Some(1234),
    }
}
