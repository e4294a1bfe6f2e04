//! The tutorial page template.
//!
//! Renders one [`Tutorial`] as a full HTML document:
//!
//! ```text
//! header.site-header       site name + breadcrumbs (Tutorials › title)
//! main.tutorial-layout
//! ├── article              h1, mobile "On this page", featured image, body
//! └── aside.sidebar        Contributors, Share, views, Filed under..., On this page
//! ```
//!
//! Rendering never fails: optional data only decides which sections appear.
//! The mobile and desktop table of contents are both emitted for
//! [`Viewport::Responsive`] and toggled by the generated breakpoint CSS. The
//! fixed viewports emit only their own variant.
//!
//! Listing pages (all tutorials, per contributor, per category) share the same
//! document shell.

use crate::config::{self, SiteConfig};
use crate::share::share_links;
use crate::slug::slugify;
use crate::types::{Contributor, TocEntry, Tutorial};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/tutorial.js");

/// Which sidebar layout to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    /// Both layouts, switched by a media query at `layout.mobile_max_width`.
    #[default]
    Responsive,
    /// At or below the breakpoint: collapsible TOC in the article.
    Mobile,
    /// Above the breakpoint: scrollspy TOC in the sidebar.
    Desktop,
}

impl Viewport {
    fn shows_mobile(self) -> bool {
        self != Viewport::Desktop
    }

    fn shows_desktop(self) -> bool {
        self != Viewport::Mobile
    }

    /// Extra class that hides the element on the other side of the breakpoint.
    fn toggle_class(self, mobile: bool) -> Option<&'static str> {
        match (self, mobile) {
            (Viewport::Responsive, true) => Some("mobile-only"),
            (Viewport::Responsive, false) => Some("desktop-only"),
            _ => None,
        }
    }
}

/// Full stylesheet for a site: config colors and breakpoints, then base styles.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_breakpoint_css(&config.layout),
        CSS_STATIC
    )
}

/// Contributor listing path, as linked from the sidebar.
pub fn contributor_path(name: &str) -> String {
    format!("/tutorials/contributors/{}", slugify(name))
}

/// Category listing path, as linked from the "Filed under..." chips.
pub fn category_path(category: &str) -> String {
    format!("/tutorials/categories/{}", slugify(category))
}

// ============================================================================
// Shell
// ============================================================================

/// Head tags beyond `<title>`.
struct HeadMeta<'a> {
    description: &'a str,
    /// Absolute page URL, used for canonical and `og:url`.
    url: String,
    /// Absolute featured image URL.
    image: Option<String>,
    article: bool,
}

fn base_document(
    title: &str,
    meta: &HeadMeta<'_>,
    config: &SiteConfig,
    css: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(meta.url);
                meta property="og:type" content=(if meta.article { "article" } else { "website" });
                meta property="og:title" content=(title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(meta.url);
                meta property="og:site_name" content=(config.site.name);
                @if let Some(image) = &meta.image {
                    meta property="og:image" content=(image);
                    meta name="twitter:card" content="summary_large_image";
                } @else {
                    meta name="twitter:card" content="summary";
                }
                style { (PreEscaped(css)) }
            }
            body
                data-scroll-offset=(config.layout.scroll_offset)
                data-popup-width=(config.share.popup_width)
                data-popup-height=(config.share.popup_height)
            {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn site_header(config: &SiteConfig, breadcrumb: Markup) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" { (config.site.name) }
            nav.breadcrumb aria-label="Breadcrumb" {
                (breadcrumb)
            }
        }
    }
}

// ============================================================================
// Tutorial page
// ============================================================================

/// Render the page for one tutorial.
pub fn render_tutorial_page(
    tutorial: &Tutorial,
    config: &SiteConfig,
    css: &str,
    viewport: Viewport,
) -> Markup {
    let page = &tutorial.page;
    let page_url = config.absolute_url(&tutorial.url_path());
    let title = format!("{} - {}", page.title, config.site.name);
    let meta = HeadMeta {
        description: page.summary(),
        url: page_url.clone(),
        image: page
            .featured_image
            .as_deref()
            .map(|image| config.absolute_url(image)),
        article: true,
    };

    let breadcrumb = html! {
        a href="/tutorials" { "Tutorials" }
        span.breadcrumb-separator { " › " }
        span.breadcrumb-current.truncate { (page.title) }
    };

    let content = html! {
        (site_header(config, breadcrumb))
        main.tutorial-layout {
            article.tutorial {
                h1 { (page.title) }
                @if viewport.shows_mobile() {
                    (mobile_sidebar(&tutorial.table_of_contents, viewport))
                }
                @if let Some(image) = &page.featured_image {
                    img.featured-image src=(image) alt=(page.title);
                }
                div.article-content {
                    (PreEscaped(&page.body))
                }
            }
            (sidebar(tutorial, &page_url, config, viewport))
        }
    };

    base_document(&title, &meta, config, css, content)
}

fn sidebar(tutorial: &Tutorial, page_url: &str, config: &SiteConfig, viewport: Viewport) -> Markup {
    let page = &tutorial.page;
    html! {
        aside.sidebar {
            (sidebar_section(Some("Contributors"), contributor_list(&page.contributors)))
            (sidebar_section(Some("Share"), share_list(page_url, &page.title)))
            @if let Some(views) = tutorial.page_views.filter(|&n| n > 0) {
                (sidebar_section(None, html! { p.view-count { (views) " views" } }))
            }
            @if !page.categories.is_empty() {
                (sidebar_section(Some("Filed under..."), category_chips(&page.categories)))
            }
            @if viewport.shows_desktop() {
                (desktop_toc(&tutorial.table_of_contents, config.layout.scroll_offset, viewport))
            }
        }
    }
}

fn sidebar_section(title: Option<&str>, body: Markup) -> Markup {
    html! {
        section.sidebar-section {
            @if let Some(title) = title {
                h3.sidebar-title { (title) }
            }
            (body)
        }
    }
}

fn contributor_list(contributors: &[Contributor]) -> Markup {
    html! {
        ul.contributors {
            @for contributor in contributors {
                li {
                    a.contributor href=(contributor_path(&contributor.name)) {
                        span.avatar {
                            @if let Some(image) = &contributor.image {
                                img src=(image) alt="" loading="lazy";
                            } @else {
                                (contributor.name.chars().next().unwrap_or('?'))
                            }
                        }
                        span.author { (contributor.name) }
                    }
                }
            }
        }
    }
}

fn share_list(page_url: &str, title: &str) -> Markup {
    html! {
        div.share-links {
            @for link in share_links(page_url, title) {
                a.share-link
                    href=(link.url)
                    aria-label={ "Share on " (link.network) }
                    data-network=(link.network)
                    data-share=[link.popup.then_some("popup")]
                {
                    (PreEscaped(link.icon))
                }
            }
        }
    }
}

fn category_chips(categories: &[String]) -> Markup {
    html! {
        ul.chips {
            @for category in categories {
                li {
                    a.chip href=(category_path(category)) { (category) }
                }
            }
        }
    }
}

fn toc_links(entries: &[TocEntry]) -> Markup {
    html! {
        @for entry in entries {
            li.toc-item style={ "--depth: " (entry.depth) } {
                a.toc-link href=(entry.url) data-depth=(entry.depth) { (entry.value) }
            }
        }
    }
}

/// Collapsible "On this page" shown at the top of the article on mobile.
fn mobile_sidebar(toc: &[TocEntry], viewport: Viewport) -> Markup {
    let class = with_toggle("mobile-sidebar", viewport.toggle_class(true));
    html! {
        @if !toc.is_empty() {
            details class=(class) {
                summary { "On this page" }
                ul.toc-list {
                    (toc_links(toc))
                }
            }
        }
    }
}

/// Scrollspy table of contents at the bottom of the sidebar.
fn desktop_toc(toc: &[TocEntry], scroll_offset: u32, viewport: Viewport) -> Markup {
    let class = with_toggle("desktop-toc", viewport.toggle_class(false));
    html! {
        @if !toc.is_empty() {
            nav class=(class) aria-label="On this page" {
                h4.sidebar-title { "On this page" }
                ul.toc-list data-scrollspy-offset=(scroll_offset) {
                    (toc_links(toc))
                }
            }
        }
    }
}

fn with_toggle(base: &str, toggle: Option<&str>) -> String {
    match toggle {
        Some(extra) => format!("{base} {extra}"),
        None => base.to_string(),
    }
}

// ============================================================================
// Listing pages
// ============================================================================

/// What a listing page collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing<'a> {
    All,
    Contributor(&'a str),
    Category(&'a str),
}

impl Listing<'_> {
    /// Site-relative path of the listing, without trailing slash.
    pub fn path(&self) -> String {
        match self {
            Listing::All => "/tutorials".to_string(),
            Listing::Contributor(name) => contributor_path(name),
            Listing::Category(category) => category_path(category),
        }
    }

    pub fn heading(&self) -> String {
        match self {
            Listing::All => "Tutorials".to_string(),
            Listing::Contributor(name) => format!("Tutorials by {name}"),
            Listing::Category(category) => format!("{category} tutorials"),
        }
    }
}

/// Render a listing page linking to each tutorial, in the order given.
pub fn render_listing_page(
    listing: Listing<'_>,
    tutorials: &[&Tutorial],
    config: &SiteConfig,
    css: &str,
) -> Markup {
    let heading = listing.heading();
    let title = format!("{heading} - {}", config.site.name);
    let description = format!("{heading} on {}", config.site.name);
    let meta = HeadMeta {
        description: &description,
        url: config.absolute_url(&format!("{}/", listing.path())),
        image: None,
        article: false,
    };

    let breadcrumb = html! {
        @if listing == Listing::All {
            span.breadcrumb-current { "Tutorials" }
        } @else {
            a href="/tutorials" { "Tutorials" }
            span.breadcrumb-separator { " › " }
            span.breadcrumb-current.truncate { (heading) }
        }
    };

    let content = html! {
        (site_header(config, breadcrumb))
        main.listing-page {
            h1 { (heading) }
            ul.tutorial-list {
                @for tutorial in tutorials {
                    li {
                        a.tutorial-card href=(tutorial.url_path()) {
                            h2 { (tutorial.page.title) }
                            p.tutorial-summary { (tutorial.page.summary()) }
                            @if !tutorial.page.contributors.is_empty() {
                                p.tutorial-byline {
                                    @for (i, contributor) in tutorial.page.contributors.iter().enumerate() {
                                        @if i > 0 { ", " }
                                        (contributor.name)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(&title, &meta, config, css, content)
}
