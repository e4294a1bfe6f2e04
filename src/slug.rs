//! Slug generation for URLs and heading anchors.
//!
//! Two flavors, because the site uses two conventions:
//!
//! - [`slugify`] builds path segments (`/tutorials/contributors/joe-martin`).
//!   Whitespace and dash runs collapse into one `-`, non-ASCII letters are
//!   transliterated, a few symbols become words (`&` → `and`), and everything
//!   is lowercased.
//! - [`Slugger`] builds in-page anchor ids the way GitHub does: punctuation is
//!   dropped, every space becomes a dash, and repeated headings get `-1`,
//!   `-2`, ... suffixes so ids stay unique within a document.

use std::collections::HashMap;

/// Punctuation kept verbatim in path slugs.
const KEPT_PUNCTUATION: &[char] = &[
    '$', '*', '_', '+', '~', '.', '(', ')', '\'', '"', '!', '-', ':', '@',
];

/// Symbols spelled out as words before filtering.
fn symbol_word(c: char) -> Option<&'static str> {
    Some(match c {
        '$' => "dollar",
        '%' => "percent",
        '&' => "and",
        '<' => "less",
        '>' => "greater",
        '|' => "or",
        '¢' => "cent",
        '£' => "pound",
        '¥' => "yen",
        '€' => "euro",
        '©' => "(c)",
        '®' => "(r)",
        '∞' => "infinity",
        '♥' => "love",
        _ => return None,
    })
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || KEPT_PUNCTUATION.contains(&c)
}

/// Lowercase URL slug of free text.
///
/// ```
/// use tutorial_page::slug::slugify;
///
/// assert_eq!(slugify("Joe Martin"), "joe-martin");
/// assert_eq!(slugify("Self-hosting  &  Ops"), "self-hosting-and-ops");
/// assert_eq!(slugify("Café Olé"), "cafe-ole");
/// ```
pub fn slugify(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len());
    for c in text.chars() {
        let mapped: &str = if let Some(word) = symbol_word(c) {
            word
        } else if c == '-' {
            // Dashes join the whitespace runs collapsed below.
            " "
        } else if c.is_ascii() {
            spaced.push(c);
            continue;
        } else {
            deunicode::deunicode_char(c).unwrap_or("")
        };
        spaced.extend(mapped.chars().map(|m| if m == '-' { ' ' } else { m }));
    }

    let mut slug = String::with_capacity(spaced.len());
    let mut pending_dash = false;
    for c in spaced.trim().chars().filter(|&c| is_kept(c)) {
        if c.is_whitespace() {
            pending_dash = true;
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push(c.to_ascii_lowercase());
    }
    slug
}

/// Generates unique heading anchors within one document.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, u32>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as taken, so generated anchors never collide with it.
    pub fn reserve(&mut self, id: &str) {
        self.occurrences.entry(id.to_string()).or_insert(0);
    }

    /// Anchor id for `heading`, suffixed with `-N` if already taken.
    pub fn slug(&mut self, heading: &str) -> String {
        let base = anchor_slug(heading);
        let mut candidate = base.clone();
        while self.occurrences.contains_key(&candidate) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{base}-{count}");
        }
        self.occurrences.insert(candidate.clone(), 0);
        candidate
    }
}

fn anchor_slug(heading: &str) -> String {
    heading
        .trim()
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_dashes_spaces() {
        assert_eq!(slugify("Product Analytics"), "product-analytics");
    }

    #[test]
    fn slugify_collapses_whitespace_and_dash_runs() {
        assert_eq!(slugify("a  -  b"), "a-b");
        assert_eq!(slugify("Feature--flags"), "feature-flags");
    }

    #[test]
    fn slugify_trims_ends() {
        assert_eq!(slugify("  Session recording \n"), "session-recording");
        assert_eq!(slugify("-leading and trailing-"), "leading-and-trailing");
    }

    #[test]
    fn slugify_spells_out_symbols() {
        assert_eq!(slugify("A/B testing & experiments"), "ab-testing-and-experiments");
        assert_eq!(slugify("100%"), "100percent");
    }

    #[test]
    fn slugify_keeps_allowed_punctuation() {
        assert_eq!(slugify("What's new?"), "what's-new");
        assert_eq!(slugify("C++ tips"), "c++-tips");
    }

    #[test]
    fn slugify_transliterates_non_ascii() {
        assert_eq!(slugify("Zoë Müller"), "zoe-muller");
        assert_eq!(slugify("Łukasz"), "lukasz");
    }

    #[test]
    fn slugify_drops_unsafe_characters() {
        assert_eq!(slugify("#hashtag"), "hashtag");
        assert_eq!(slugify("path/to?query=1"), "pathtoquery1");
    }

    #[test]
    fn slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn slugger_github_style() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Step 1: Install the SDK"), "step-1-install-the-sdk");
        assert_eq!(slugger.slug("What's next?"), "whats-next");
    }

    #[test]
    fn slugger_keeps_each_space_as_dash() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("a  b"), "a--b");
    }

    #[test]
    fn slugger_dedupes_repeats() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-1");
        assert_eq!(slugger.slug("Setup"), "setup-2");
    }

    #[test]
    fn slugger_dedupes_against_existing_suffix() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Setup 1"), "setup-1");
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-2");
    }

    #[test]
    fn slugger_skips_reserved_ids() {
        let mut slugger = Slugger::new();
        slugger.reserve("setup");
        assert_eq!(slugger.slug("Setup"), "setup-1");
        assert_eq!(slugger.slug("Install"), "install");
    }

    #[test]
    fn slugger_keeps_unicode_letters() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Über uns"), "über-uns");
    }
}
