//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each tutorial is shown
//! by its positional index and title, with the source file and resolved
//! metadata as indented context lines. The output reads as a content
//! inventory while still letting users trace data back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Tutorials
//! 001 How to set up feature flags in Next.js
//!     Source: tutorials/010-feature-flags-in-nextjs.md
//!     Contributors: Joe Martin, Ana Lúcia Souza
//!     Categories: Feature flags, Next.js
//!     Sections: 5
//!     Views: 1234
//!
//! Config
//!     config.toml
//!     authors.toml
//!     pageviews.json
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 How to set up feature flags in Next.js → tutorials/feature-flags-in-nextjs/index.html
//!
//! Listings
//! Tutorials → tutorials/index.html
//! Tutorials by Joe Martin → tutorials/contributors/joe-martin/index.html
//!
//! Assets
//!     images/kubernetes.svg
//!
//! Generated 3 tutorial pages, 7 listing pages, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::scan::{AUTHORS_FILE, PAGE_VIEWS_FILE};
use crate::types::{Manifest, Tutorial};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 asset`, `2 assets`.
fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

// ============================================================================
// Scan
// ============================================================================

fn tutorial_lines(index: usize, tutorial: &Tutorial) -> Vec<String> {
    let page = &tutorial.page;
    let ctx = indent(1);
    let mut lines = vec![
        format!("{} {}", format_index(index), page.title),
        format!("{ctx}Source: {}", tutorial.source_path),
    ];
    if let Some(description) = &page.description {
        lines.push(format!("{ctx}Description: {}", truncate_desc(description, 60)));
    }
    if !page.contributors.is_empty() {
        let names: Vec<&str> = page.contributors.iter().map(|c| c.name.as_str()).collect();
        lines.push(format!("{ctx}Contributors: {}", names.join(", ")));
    }
    if !page.categories.is_empty() {
        lines.push(format!("{ctx}Categories: {}", page.categories.join(", ")));
    }
    if let Some(image) = &page.featured_image {
        lines.push(format!("{ctx}Featured image: {image}"));
    }
    if !tutorial.table_of_contents.is_empty() {
        lines.push(format!("{ctx}Sections: {}", tutorial.table_of_contents.len()));
    }
    if let Some(views) = tutorial.page_views {
        lines.push(format!("{ctx}Views: {views}"));
    }
    lines
}

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Tutorials".to_string()];
    if manifest.tutorials.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, tutorial) in manifest.tutorials.iter().enumerate() {
        lines.extend(tutorial_lines(i + 1, tutorial));
    }

    let config_files: Vec<&str> = ["config.toml", AUTHORS_FILE, PAGE_VIEWS_FILE]
        .into_iter()
        .filter(|name| source_root.join(name).exists())
        .collect();
    if !config_files.is_empty() {
        lines.push(String::new());
        lines.push("Config".to_string());
        for name in config_files {
            lines.push(format!("{}{name}", indent(1)));
        }
    }
    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in report.tutorials.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), page.title, page.path));
    }

    if !report.listings.is_empty() {
        lines.push(String::new());
        lines.push("Listings".to_string());
        for page in &report.listings {
            lines.push(format!("{} → {}", page.title, page.path));
        }
    }

    if !report.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &report.assets {
            lines.push(format!("{}{asset}", indent(1)));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(report.tutorials.len(), "tutorial page"),
        plural(report.listings.len(), "listing page"),
        plural(report.assets.len(), "asset"),
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "asset"), "1 asset");
        assert_eq!(plural(0, "asset"), "0 assets");
        assert_eq!(plural(3, "listing page"), "3 listing pages");
    }

    #[test]
    fn truncate_desc_short_and_long() {
        assert_eq!(truncate_desc("short", 10), "short");
        assert_eq!(truncate_desc("exactly ten", 11), "exactly ten");
        assert_eq!(truncate_desc("Roll out features", 8), "Roll out...");
    }

    #[test]
    fn truncate_desc_multibyte() {
        assert_eq!(truncate_desc("Lúcia Souza", 5), "Lúcia...");
    }

    #[test]
    fn tutorial_lines_full() {
        let lines = tutorial_lines(1, &sample_tutorial());
        assert_eq!(
            lines,
            vec![
                "001 How to set up feature flags in Next.js",
                "    Source: tutorials/010-feature-flags-in-nextjs.md",
                "    Description: Roll out safely",
                "    Contributors: Joe Martin, Ana Lúcia Souza",
                "    Categories: Feature flags, Next.js",
                "    Featured image: /images/flags.png",
                "    Sections: 3",
                "    Views: 1234",
            ]
        );
    }

    #[test]
    fn tutorial_lines_minimal() {
        let mut tutorial = sample_tutorial();
        tutorial.page.description = None;
        tutorial.page.contributors.clear();
        tutorial.page.categories.clear();
        tutorial.page.featured_image = None;
        tutorial.table_of_contents.clear();
        tutorial.page_views = None;
        assert_eq!(
            tutorial_lines(2, &tutorial),
            vec![
                "002 How to set up feature flags in Next.js",
                "    Source: tutorials/010-feature-flags-in-nextjs.md",
            ]
        );
    }

    #[test]
    fn scan_output_lists_config_files_present() {
        let tmp = setup_fixtures();
        let manifest = crate::scan::scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        assert_eq!(lines[0], "Tutorials");
        assert_eq!(lines[1], "001 How to set up feature flags in Next.js");
        let config_at = lines.iter().position(|l| l == "Config").unwrap();
        assert_eq!(
            &lines[config_at + 1..],
            &["    config.toml", "    authors.toml", "    pageviews.json"]
        );
    }

    #[test]
    fn scan_output_empty() {
        let tmp = TempDir::new().unwrap();
        let manifest = Manifest {
            tutorials: vec![],
            config: SiteConfig::default(),
        };
        let lines = format_scan_output(&manifest, tmp.path());
        assert_eq!(lines, vec!["Tutorials", "    (none)"]);
    }

    #[test]
    fn generate_output_sections() {
        let report = GenerateReport {
            tutorials: vec![GeneratedPage {
                title: "Funnels 101".to_string(),
                path: "tutorials/funnels-101/index.html".to_string(),
            }],
            listings: vec![GeneratedPage {
                title: "Tutorials".to_string(),
                path: "tutorials/index.html".to_string(),
            }],
            assets: vec!["images/kubernetes.svg".to_string()],
        };
        assert_eq!(
            format_generate_output(&report),
            vec![
                "001 Funnels 101 → tutorials/funnels-101/index.html",
                "",
                "Listings",
                "Tutorials → tutorials/index.html",
                "",
                "Assets",
                "    images/kubernetes.svg",
                "",
                "Generated 1 tutorial page, 1 listing page, 1 asset",
            ]
        );
    }

    #[test]
    fn generate_output_without_assets() {
        let report = GenerateReport::default();
        assert_eq!(
            format_generate_output(&report),
            vec!["", "Generated 0 tutorial pages, 0 listing pages, 0 assets"]
        );
    }
}
