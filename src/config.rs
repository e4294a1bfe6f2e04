//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is layered over the stock defaults, so it only needs
//! the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Docs"                      # Appended to every <title>
//! base_url = "https://example.com"   # Absolute origin used for share links and og:url
//!
//! [share]
//! popup_width = 626                  # Share popup window size in px
//! popup_height = 436
//!
//! [layout]
//! mobile_max_width = 1024            # md breakpoint: mobile layout at or below this width
//! scroll_offset = 50                 # Sticky header height compensated on hash loads
//! excerpt_length = 150               # Max chars of the generated excerpt
//!
//! [colors.light]
//! background = "#eeefe9"
//! text = "#151515"
//! text_muted = "#73756b"    # Breadcrumbs, sidebar headings, view count
//! border = "#d0d1c9"
//! link = "#f54e00"
//! link_hover = "#cd4100"
//!
//! [colors.dark]
//! background = "#1d1f27"
//! text = "#eeefe9"
//! text_muted = "#9a9c92"
//! border = "#3b3d46"
//! link = "#f7a501"
//! link_hover = "#ffbf3d"
//!
//! [processing]
//! max_processes = 4         # Max parallel page renders (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in titles and absolute URLs.
    pub site: SiteSettings,
    /// Share popup geometry.
    pub share: ShareConfig,
    /// Breakpoint, scroll offset and excerpt settings.
    pub layout: LayoutConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.site.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "site.base_url must start with http:// or https://, got {base:?}"
            )));
        }
        if self.share.popup_width == 0 || self.share.popup_height == 0 {
            return Err(ConfigError::Validation(
                "share.popup_width and share.popup_height must be non-zero".into(),
            ));
        }
        if self.layout.mobile_max_width == 0 {
            return Err(ConfigError::Validation(
                "layout.mobile_max_width must be non-zero".into(),
            ));
        }
        if self.layout.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "layout.excerpt_length must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Absolute URL for a site-relative path, e.g. `/tutorials/foo/`.
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Suffix for page titles: `"{title} - {name}"`.
    pub name: String,
    /// Origin the site is published under, without trailing slash.
    pub base_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "Docs".to_string(),
            base_url: "https://example.com".to_string(),
        }
    }
}

/// `[share]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
    pub popup_width: u32,
    pub popup_height: u32,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            popup_width: 626,
            popup_height: 436,
        }
    }
}

/// `[layout]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Viewports at or below this width (px) use the mobile sidebar.
    pub mobile_max_width: u32,
    /// Pixels scrolled back up after loading a URL with a fragment.
    pub scroll_offset: u32,
    /// Maximum excerpt length in characters, before the ellipsis.
    pub excerpt_length: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_max_width: 1024,
            scroll_offset: 50,
            excerpt_length: 150,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page renders.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Used for breadcrumbs, sidebar headings and the view count.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#eeefe9".to_string(),
            text: "#151515".to_string(),
            text_muted: "#73756b".to_string(),
            border: "#d0d1c9".to_string(),
            link: "#f54e00".to_string(),
            link_hover: "#cd4100".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1d1f27".to_string(),
            text: "#eeefe9".to_string(),
            text_muted: "#9a9c92".to_string(),
            border: "#3b3d46".to_string(),
            link: "#f7a501".to_string(),
            link_hover: "#ffbf3d".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Tutorial Page Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "<tutorial title> - <name>".
name = "Docs"

# Origin the site is published under. Used for share links, og:url and
# og:image, which must be absolute.
base_url = "https://example.com"

# ---------------------------------------------------------------------------
# Share links
# ---------------------------------------------------------------------------
[share]
# Size in px of the popup window opened by the Facebook/Twitter/LinkedIn
# links. The popup is centered over the current window.
popup_width = 626
popup_height = 436

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Viewports at or below this width (px) get the collapsible mobile table of
# contents; wider viewports get the sticky sidebar table of contents.
mobile_max_width = 1024

# Height in px of the sticky header. When a page is opened with a #fragment
# the browser lands the heading under the header; the page scrolls back up
# by this much, once.
scroll_offset = 50

# Maximum length of the auto-generated excerpt (used as meta description when
# a tutorial has no description).
excerpt_length = 150

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#eeefe9"
text = "#151515"
text_muted = "#73756b"    # Breadcrumbs, sidebar headings, view count
border = "#d0d1c9"
link = "#f54e00"
link_hover = "#cd4100"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#1d1f27"
text = "#eeefe9"
text_muted = "#9a9c92"
border = "#3b3d46"
link = "#f7a501"
link_hover = "#ffbf3d"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page renders.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}

/// Generate the breakpoint rules that switch between the mobile and desktop
/// table of contents.
pub fn generate_breakpoint_css(layout: &LayoutConfig) -> String {
    format!(
        r#":root {{
    --scroll-offset: {offset}px;
}}

@media (max-width: {max}px) {{
    .desktop-only {{ display: none !important; }}
    .tutorial-layout {{ display: block; }}
    .tutorial,
    .sidebar {{
        position: static;
        width: 100%;
        max-width: none;
        max-height: none;
        padding: 2.5rem 1.25rem 0;
        border-right: none;
    }}
}}

@media (min-width: {min}px) {{
    .mobile-only {{ display: none !important; }}
}}"#,
        offset = layout.scroll_offset,
        max = layout.mobile_max_width,
        min = layout.mobile_max_width + 1,
    )
}
