//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content directory and produces a
//! [`Manifest`] with one fully resolved [`Tutorial`] per markdown file, ready
//! for the generate stage.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                    # Site configuration (optional)
//! ├── authors.toml                   # Contributor registry ([[author]] id/name/image)
//! ├── pageviews.json                 # Analytics export: {"/tutorials/<slug>": count} (optional)
//! ├── images/
//! │   └── kubernetes.svg             # Featured images, referenced from front matter
//! └── tutorials/
//!     ├── 010-feature-flags.md       # NNN- prefix orders files, dropped from the slug
//!     ├── self-host-on-kubernetes.md
//!     └── drafts/
//!         └── funnels-101.mdx        # Subdirectories are scanned too
//! ```
//!
//! ## Validation
//!
//! The scanner rejects:
//! - front matter that is missing, malformed, or has unknown keys
//! - contributor ids not present in `authors.toml`
//! - featured images that do not exist or point outside the content root
//! - file names that leave nothing to build a slug from (`010-???.md`)
//! - two tutorials that resolve to the same slug

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontmatterError};
use crate::markdown;
use crate::slug::slugify;
use crate::types::{Contributor, Manifest, PageData, Tutorial};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub const TUTORIALS_DIR: &str = "tutorials";
pub const AUTHORS_FILE: &str = "authors.toml";
pub const PAGE_VIEWS_FILE: &str = "pageviews.json";

const TUTORIAL_EXTENSIONS: &[&str] = &["md", "mdx"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("authors.toml parse error: {0}")]
    Authors(#[from] toml::de::Error),
    #[error("pageviews.json parse error: {0}")]
    PageViews(#[from] serde_json::Error),
    #[error("No tutorials/ directory in {0}")]
    NoTutorialsDir(PathBuf),
    #[error("Front matter error in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    #[error("Unknown contributor {id:?} in {path} (not in authors.toml)")]
    UnknownContributor { id: String, path: PathBuf },
    #[error("Featured image {image:?} not found (referenced by {path})")]
    MissingImage { image: String, path: PathBuf },
    #[error("Cannot derive a slug from the file name of {path}")]
    EmptySlug { path: PathBuf },
    #[error("Duplicate tutorial slug {slug:?}: {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthorsFile {
    #[serde(default)]
    author: Vec<Contributor>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let authors = load_authors(root)?;
    let page_views = load_page_views(root)?;

    let tutorials_dir = root.join(TUTORIALS_DIR);
    if !tutorials_dir.is_dir() {
        return Err(ScanError::NoTutorialsDir(root.to_path_buf()));
    }

    let mut tutorials = Vec::new();
    let mut seen_slugs: BTreeMap<String, String> = BTreeMap::new();
    for path in collect_sources(&tutorials_dir)? {
        let tutorial = build_tutorial(&path, root, &config, &authors, &page_views)?;
        if let Some(first) = seen_slugs.get(&tutorial.slug) {
            return Err(ScanError::DuplicateSlug {
                slug: tutorial.slug,
                first: first.clone(),
                second: tutorial.source_path,
            });
        }
        seen_slugs.insert(tutorial.slug.clone(), tutorial.source_path.clone());
        tutorials.push(tutorial);
    }

    Ok(Manifest { tutorials, config })
}

/// Contributor registry keyed by id. A missing file means no contributors.
fn load_authors(root: &Path) -> Result<HashMap<String, Contributor>, ScanError> {
    let path = root.join(AUTHORS_FILE);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file: AuthorsFile = toml::from_str(&fs::read_to_string(&path)?)?;
    Ok(file
        .author
        .into_iter()
        .map(|author| (author.id.clone(), author))
        .collect())
}

/// Page view counts keyed by page path, trailing slash stripped.
fn load_page_views(root: &Path) -> Result<HashMap<String, u64>, ScanError> {
    let path = root.join(PAGE_VIEWS_FILE);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let raw: HashMap<String, u64> = serde_json::from_str(&fs::read_to_string(&path)?)?;
    Ok(raw
        .into_iter()
        .map(|(page, count)| (page.trim_end_matches('/').to_string(), count))
        .collect())
}

/// All tutorial sources under `dir`, in path order. Hidden entries are skipped.
fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut sources = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_tutorial(entry.path()) {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

fn is_tutorial(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| TUTORIAL_EXTENSIONS.contains(&ext.as_str()))
}

fn build_tutorial(
    path: &Path,
    root: &Path,
    config: &SiteConfig,
    authors: &HashMap<String, Contributor>,
    page_views: &HashMap<String, u64>,
) -> Result<Tutorial, ScanError> {
    let rel_path = relative_display(path, root);
    let source = fs::read_to_string(path)?;
    let (matter, body) =
        frontmatter::parse(&source).map_err(|source| ScanError::Frontmatter {
            path: PathBuf::from(&rel_path),
            source,
        })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let slug = tutorial_slug(&stem);
    if slug.is_empty() {
        return Err(ScanError::EmptySlug {
            path: PathBuf::from(&rel_path),
        });
    }

    let contributors = matter
        .contributors
        .iter()
        .map(|id| {
            authors
                .get(id)
                .cloned()
                .ok_or_else(|| ScanError::UnknownContributor {
                    id: id.clone(),
                    path: PathBuf::from(&rel_path),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let featured_image = match matter.featured_image {
        Some(image) => Some(resolve_image(&image, root, &rel_path)?),
        None => None,
    };

    let rendered = markdown::render(body, config.layout.excerpt_length);
    let page_views = page_views.get(&format!("/{TUTORIALS_DIR}/{slug}")).copied();

    Ok(Tutorial {
        slug,
        source_path: rel_path,
        page: PageData {
            title: matter.title.trim().to_string(),
            description: matter.description,
            excerpt: rendered.excerpt,
            body: rendered.html,
            featured_image,
            contributors,
            categories: dedupe_categories(matter.categories),
        },
        table_of_contents: rendered.table_of_contents,
        page_views,
    })
}

/// Slug from a file stem: `NNN-` ordering prefix dropped, then slugified.
///
/// - `010-feature-flags` → `feature-flags`
/// - `Self host on K8s` → `self-host-on-k8s`
/// - `2024` → `2024` (a bare number is the whole name)
pub fn tutorial_slug(stem: &str) -> String {
    let name = match stem.split_once('-') {
        Some((prefix, rest))
            if !prefix.is_empty()
                && prefix.chars().all(|c| c.is_ascii_digit())
                && !rest.is_empty() =>
        {
            rest
        }
        _ => stem,
    };
    slugify(name)
}

/// Site-relative public URL for a featured image, after checking it exists
/// inside the content root.
fn resolve_image(image: &str, root: &Path, referenced_by: &str) -> Result<String, ScanError> {
    let rel = image.trim_start_matches('/');
    let escapes_root = Path::new(rel)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes_root || !root.join(rel).is_file() {
        return Err(ScanError::MissingImage {
            image: image.to_string(),
            path: PathBuf::from(referenced_by),
        });
    }
    Ok(format!("/{rel}"))
}

/// Trimmed, non-empty categories with duplicates removed, first occurrence wins.
fn dedupe_categories(categories: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(categories.len());
    for category in categories {
        let category = category.trim().to_string();
        if !category.is_empty() && !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// `path` relative to `root`, with forward slashes.
fn relative_display(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    /// Minimal content root: no config, no authors, one tutorial.
    fn minimal_root(tutorial: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(TUTORIALS_DIR)).unwrap();
        fs::write(tmp.path().join("tutorials/intro.md"), tutorial).unwrap();
        tmp
    }

    #[test]
    fn scan_finds_all_tutorials_in_path_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            tutorial_slugs(&manifest),
            vec![
                "feature-flags-in-nextjs",
                "self-host-on-kubernetes",
                "funnels-101"
            ]
        );
    }

    #[test]
    fn numbered_prefix_dropped_from_slug() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let t = find_tutorial(&manifest, "feature-flags-in-nextjs");
        assert_eq!(t.source_path, "tutorials/010-feature-flags-in-nextjs.md");
    }

    #[test]
    fn contributors_resolved_in_front_matter_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let t = find_tutorial(&manifest, "feature-flags-in-nextjs");
        assert_eq!(contributor_names(t), vec!["Joe Martin", "Ana Lúcia Souza"]);
        assert_eq!(t.page.contributors[0].id, "joe");
        assert!(t.page.contributors[0].image.is_some());
    }

    #[test]
    fn config_loaded_from_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.name, "PostHog");
    }

    #[test]
    fn page_views_matched_with_or_without_trailing_slash() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            find_tutorial(&manifest, "feature-flags-in-nextjs").page_views,
            Some(1234)
        );
        assert_eq!(
            find_tutorial(&manifest, "self-host-on-kubernetes").page_views,
            Some(0)
        );
        assert_eq!(find_tutorial(&manifest, "funnels-101").page_views, None);
    }

    #[test]
    fn featured_image_becomes_site_relative_url() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let t = find_tutorial(&manifest, "self-host-on-kubernetes");
        assert_eq!(
            t.page.featured_image.as_deref(),
            Some("/images/kubernetes.svg")
        );
    }

    #[test]
    fn table_of_contents_from_headings() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let t = find_tutorial(&manifest, "feature-flags-in-nextjs");
        let urls: Vec<&str> = t.table_of_contents.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "#step-1-install-posthog",
                "#client-side-rendering",
                "#server-side-rendering",
                "#step-2-create-a-flag",
                "#further-reading"
            ]
        );
    }

    #[test]
    fn description_absent_leaves_excerpt() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let t = find_tutorial(&manifest, "funnels-101");
        assert!(t.page.description.is_none());
        assert!(t.page.excerpt.starts_with("Funnels show"));
        assert_eq!(t.page.summary(), t.page.excerpt);
    }

    #[test]
    fn tutorial_without_authors_file() {
        let tmp = minimal_root("+++\ntitle = \"Intro\"\n+++\nHello\n");
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.tutorials.len(), 1);
        assert!(manifest.tutorials[0].page.contributors.is_empty());
        assert_eq!(manifest.config.site.name, "Docs");
    }

    #[test]
    fn missing_tutorials_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::NoTutorialsDir(_))));
    }

    #[test]
    fn unknown_contributor_is_error() {
        let tmp = minimal_root("+++\ntitle = \"Intro\"\ncontributors = [\"ghost\"]\n+++\n");
        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::UnknownContributor { ref id, .. }) if id == "ghost"
        ));
    }

    #[test]
    fn missing_featured_image_is_error() {
        let tmp = minimal_root("+++\ntitle = \"Intro\"\nfeatured_image = \"images/nope.png\"\n+++\n");
        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::MissingImage { .. })));
    }

    #[test]
    fn featured_image_outside_root_is_error() {
        let tmp = minimal_root("+++\ntitle = \"Intro\"\nfeatured_image = \"../secret.png\"\n+++\n");
        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::MissingImage { .. })));
    }

    #[test]
    fn bad_front_matter_reports_path() {
        let tmp = minimal_root("# No front matter\n");
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::Frontmatter { .. }));
        assert!(err.to_string().contains("tutorials/intro.md"));
    }

    #[test]
    fn duplicate_slug_is_error() {
        let tmp = minimal_root("+++\ntitle = \"A\"\n+++\n");
        fs::write(
            tmp.path().join("tutorials/010-intro.md"),
            "+++\ntitle = \"B\"\n+++\n",
        )
        .unwrap();
        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::DuplicateSlug { ref slug, .. }) if slug == "intro"
        ));
    }

    #[test]
    fn file_name_without_slug_is_error() {
        let tmp = minimal_root("+++\ntitle = \"Intro\"\n+++\n");
        fs::write(
            tmp.path().join("tutorials/010-???.md"),
            "+++\ntitle = \"Questions\"\n+++\nBody\n",
        )
        .unwrap();
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            ScanError::EmptySlug { ref path } if path == Path::new("tutorials/010-???.md")
        ));
        assert!(err.to_string().contains("tutorials/010-???.md"));
    }

    #[test]
    fn hidden_files_skipped() {
        let tmp = minimal_root("+++\ntitle = \"Intro\"\n+++\n");
        fs::write(tmp.path().join("tutorials/.draft.md"), "not front matter").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.tutorials.len(), 1);
    }

    #[test]
    fn non_markdown_files_skipped() {
        let tmp = minimal_root("+++\ntitle = \"Intro\"\n+++\n");
        fs::write(tmp.path().join("tutorials/notes.txt"), "scratch").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.tutorials.len(), 1);
    }

    #[test]
    fn categories_trimmed_and_deduped() {
        assert_eq!(
            dedupe_categories(vec![
                " Product analytics ".to_string(),
                "Funnels".to_string(),
                "Product analytics".to_string(),
                "".to_string(),
            ]),
            vec!["Product analytics", "Funnels"]
        );
    }

    #[test]
    fn tutorial_slug_cases() {
        assert_eq!(tutorial_slug("010-feature-flags"), "feature-flags");
        assert_eq!(tutorial_slug("Self host on K8s"), "self-host-on-k8s");
        assert_eq!(tutorial_slug("2024"), "2024");
        assert_eq!(tutorial_slug("001-"), "001");
        assert_eq!(tutorial_slug("a-b"), "a-b");
    }
}
