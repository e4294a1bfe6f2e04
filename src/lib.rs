//! # Tutorial Page
//!
//! A static renderer for tutorial pages. Each markdown tutorial becomes one
//! HTML page with the rendered body, its contributors, share links, view
//! count, category chips and a table of contents that follows the reader.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content goes through two independent stages with a JSON manifest between
//! them:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (files → page data, TOC, views)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable, so a bad page can be traced to the data
//! that produced it without rerunning the renderer.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks `tutorials/`, resolves contributors and views, produces the manifest |
//! | [`generate`] | Stage 2: renders tutorial and listing pages in parallel, copies featured images |
//! | [`template`] | Maud templates for the page shell, article, sidebar and listings |
//! | [`markdown`] | Body renderer: anchors, TOC, component tags, excerpt |
//! | [`frontmatter`] | `+++` TOML front matter splitting |
//! | [`slug`] | URL slugs and unique heading anchors |
//! | [`share`] | Share link URLs |
//! | [`icons`] | Inline SVG icons |
//! | [`config`] | `config.toml` loading, validation and CSS generation |
//! | [`types`] | Manifest types shared by both stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One File For Every Viewport
//!
//! Generated pages contain both the mobile and the desktop table of contents.
//! A media query generated from `layout.mobile_max_width` hides the one that
//! does not apply, so the output works from any static file server with no
//! server-side device detection. `render --viewport` prints a single variant
//! when the exact per-breakpoint markup is wanted.
//!
//! ## Anchors Come From The Renderer
//!
//! Heading ids are assigned while rendering the body, and the table of contents
//! is built from the same pass. The sidebar links and the body anchors cannot
//! drift apart.
//!
//! ## Behavior Without A Framework
//!
//! The hash-scroll nudge, scrollspy and share popups are a few lines of vanilla
//! JavaScript inlined into each page, configured through `data-*` attributes
//! on `<body>`.

pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod icons;
pub mod markdown;
pub mod output;
pub mod scan;
pub mod share;
pub mod slug;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
