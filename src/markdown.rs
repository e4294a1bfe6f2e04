//! Content renderer: tutorial markdown → HTML body, table of contents, excerpt.
//!
//! Parsing and HTML emission are delegated to `pulldown-cmark`. This module
//! only rewrites the event stream on the way through:
//!
//! - **Headings** get unique GitHub-style anchor ids. Every `h2`–`h6` becomes a
//!   [`TocEntry`] whose `url` is that anchor, so the sidebar links and the body
//!   always agree. `h1` is anchored but not listed; the page title is the `h1`.
//! - **Links** get the site link classes; external links open in a new tab.
//! - **Code blocks** are wrapped in a `div.code-block` carrying the language.
//! - **Component tags** embedded as raw HTML (`<Check />`, `<Hero>`, ...) are
//!   mapped to plain HTML through a fixed table. Anything else passes through.
//!   Opening tags of block components may span several lines; they are folded
//!   onto one line before parsing so they stay HTML blocks.
//!
//! The excerpt is the plain text of the body, pruned at a word boundary.

use crate::icons;
use crate::slug::Slugger;
use crate::types::TocEntry;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use pulldown_cmark_escape::{escape_href, escape_html};
use std::borrow::Cow;

const LINK_CLASS: &str = "text-red hover:text-red font-semibold";

/// Output of [`render`].
#[derive(Debug, Clone)]
pub struct RenderedContent {
    pub html: String,
    pub table_of_contents: Vec<TocEntry>,
    pub excerpt: String,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render a markdown body. `excerpt_length` caps the excerpt in characters.
pub fn render(markdown: &str, excerpt_length: usize) -> RenderedContent {
    let source = join_block_tags(markdown);
    let mut events: Vec<Event> = Parser::new_ext(&source, options()).collect();
    let table_of_contents = anchor_headings(&mut events);
    let excerpt = prune(&plain_text(&events), excerpt_length);

    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, events.into_iter().map(map_event));

    RenderedContent {
        html: body,
        table_of_contents,
        excerpt,
    }
}

// ============================================================================
// Headings
// ============================================================================

/// Assign anchor ids to every heading and collect the table of contents.
///
/// Explicit ids (`## Setup {#setup}`) are kept as written and reserved up
/// front, so generated ids never repeat them.
fn anchor_headings(events: &mut [Event<'_>]) -> Vec<TocEntry> {
    let mut slugger = Slugger::new();
    for event in events.iter() {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            slugger.reserve(id);
        }
    }
    let mut toc = Vec::new();

    for i in 0..events.len() {
        let level = match &events[i] {
            Event::Start(Tag::Heading { level, .. }) => *level,
            _ => continue,
        };
        let text = heading_text(&events[i + 1..]);

        let Event::Start(Tag::Heading { id, .. }) = &mut events[i] else {
            continue;
        };
        if id.is_none() {
            *id = Some(slugger.slug(&text).into());
        }
        let anchor = id.as_deref().unwrap_or_default().to_string();

        if level != HeadingLevel::H1 {
            toc.push(TocEntry {
                url: format!("#{anchor}"),
                value: text,
                depth: level as u8 - 2,
            });
        }
    }
    toc
}

/// Plain text of a heading, from the events following its start tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

// ============================================================================
// Component mapping
// ============================================================================

fn map_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) => Event::Html(open_link(&dest_url, &title).into()),
        Event::End(TagEnd::Link) => Event::Html("</a>".into()),
        Event::Start(Tag::CodeBlock(kind)) => Event::Html(open_code_block(&kind).into()),
        Event::End(TagEnd::CodeBlock) => Event::Html("</code></pre></div>\n".into()),
        Event::Html(raw) => Event::Html(map_component_tags(&raw).into()),
        Event::InlineHtml(raw) => Event::InlineHtml(map_component_tags(&raw).into()),
        other => other,
    }
}

fn open_link(href: &str, title: &str) -> String {
    let mut tag = String::from(r#"<a href=""#);
    // Writing to a String cannot fail.
    let _ = escape_href(&mut tag, href);
    tag.push_str(&format!(r#"" class="{LINK_CLASS}""#));
    if !title.is_empty() {
        tag.push_str(r#" title=""#);
        let _ = escape_html(&mut tag, title);
        tag.push('"');
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        tag.push_str(r#" target="_blank" rel="noopener""#);
    }
    tag.push('>');
    tag
}

fn open_code_block(kind: &CodeBlockKind<'_>) -> String {
    let language = match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
        CodeBlockKind::Indented => "",
    };
    if language.is_empty() {
        "<div class=\"code-block\"><pre><code>".to_string()
    } else {
        let mut escaped = String::with_capacity(language.len());
        let _ = escape_html(&mut escaped, language);
        let language = escaped;
        format!(
            r#"<div class="code-block" data-language="{language}"><pre><code class="language-{language}">"#
        )
    }
}

/// What a component tag turns into.
#[derive(Debug, Clone, Copy)]
enum Component {
    /// The opening tag becomes an inline icon. The closing tag is dropped and
    /// any children render as usual.
    Icon(&'static str),
    /// Renamed to a plain element with a class; attributes are kept.
    Element {
        tag: &'static str,
        class: &'static str,
    },
}

fn component(name: &str) -> Option<Component> {
    Some(match name {
        "Check" => Component::Icon(icons::CHECK),
        "Close" => Component::Icon(icons::CLOSE),
        "Hero" => Component::Element {
            tag: "div",
            class: "hero",
        },
        "Section" => Component::Element {
            tag: "section",
            class: "section",
        },
        "FeatureSnapshot" => Component::Element {
            tag: "div",
            class: "feature-snapshot",
        },
        _ => return None,
    })
}

/// Rewrite every known component tag in a raw HTML fragment.
fn map_component_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match render_component_tag(tail) {
            Some((rendered, consumed)) => {
                out.push_str(&rendered);
                rest = &tail[consumed..];
            }
            None => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// If `tail` starts with a component tag, render it and report how many bytes
/// it spanned.
fn render_component_tag(tail: &str) -> Option<(String, usize)> {
    let end = tail.find('>')?;
    let inner = &tail[1..end];
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(name) => (true, name),
        None => (false, inner),
    };
    let (inner, self_closing) = match inner.trim_end().strip_suffix('/') {
        Some(body) => (body, true),
        None => (inner, false),
    };
    let name_len = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    let attrs = inner[name_len..].trim();

    let rendered = match component(&inner[..name_len])? {
        Component::Icon(_) if closing => String::new(),
        Component::Icon(svg) => svg.to_string(),
        Component::Element { tag, .. } if closing => format!("</{tag}>"),
        Component::Element { tag, class } => {
            let mut open = format!(r#"<{tag} class="{class}""#);
            if !attrs.is_empty() {
                open.push(' ');
                open.push_str(attrs);
            }
            open.push('>');
            if self_closing {
                open.push_str(&format!("</{tag}>"));
            }
            open
        }
    };
    Some((rendered, end + 1))
}

/// Block components whose opening tag may span several lines.
const BLOCK_COMPONENTS: &[&str] = &["Hero", "Section", "FeatureSnapshot"];

/// Fold multi-line opening tags of block components onto one line.
///
/// `<Hero\n  title="Run">` is inline HTML to CommonMark and would land inside
/// a paragraph; on one line it starts an HTML block like any other tag.
/// Fenced code is left alone.
fn join_block_tags(markdown: &str) -> Cow<'_, str> {
    if !markdown.lines().any(opens_split_tag) {
        return Cow::Borrowed(markdown);
    }

    let mut out = String::with_capacity(markdown.len());
    let mut in_fence = false;
    let mut lines = markdown.lines();
    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }
        if !in_fence && opens_split_tag(line) {
            let mut tag = line.trim_end().to_string();
            while !tag_closed(&tag) {
                let Some(next) = lines.next() else { break };
                tag.push(' ');
                tag.push_str(next.trim());
            }
            out.push_str(&tag);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    Cow::Owned(out)
}

/// A line starting a block component tag that does not end on it.
fn opens_split_tag(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix('<') else {
        return false;
    };
    let is_component = BLOCK_COMPONENTS.iter().any(|name| {
        rest.strip_prefix(name)
            .is_some_and(|after| after.is_empty() || after.starts_with(char::is_whitespace))
    });
    is_component && !tag_closed(line)
}

/// Whether `tag` contains a `>` outside quoted attribute values.
fn tag_closed(tag: &str) -> bool {
    let mut quote = None;
    for c in tag.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return true,
            None => {}
        }
    }
    false
}

// ============================================================================
// Excerpt
// ============================================================================

/// Flatten the body to plain text: markup and raw HTML dropped, whitespace
/// collapsed.
fn plain_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => text.push(' '),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `max` characters, at a word boundary, appending `…`
/// when anything was removed.
pub fn prune(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut = text
        .char_indices()
        .nth(max)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..cut];
    let next_is_break = text[cut..].starts_with(char::is_whitespace);
    let head = if next_is_break {
        head
    } else {
        head.rfind(char::is_whitespace)
            .map(|i| &head[..i])
            .unwrap_or(head)
    };
    let head = head.trim_end_matches(|c: char| c.is_whitespace() || ",;:.-".contains(c));
    format!("{head}…")
}
