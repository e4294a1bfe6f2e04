//! Share links for the sidebar.
//!
//! Social networks open in a popup window, sized from `[share]` config by the
//! page script. The mail link is a plain `mailto:` anchor. Page URL and title
//! are percent-encoded into the query.

use crate::icons;

/// Where a share link points and how it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    /// Short name, used for `aria-label` and the `data-network` attribute.
    pub network: &'static str,
    pub url: String,
    /// `true` for links opened in a popup window, `false` for plain anchors.
    pub popup: bool,
    pub icon: &'static str,
}

/// Share links for a page, in display order: Facebook, Twitter, LinkedIn, mail.
pub fn share_links(page_url: &str, title: &str) -> Vec<ShareLink> {
    let url = urlencoding::encode(page_url);
    vec![
        ShareLink {
            network: "Facebook",
            url: format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
            popup: true,
            icon: icons::FACEBOOK,
        },
        ShareLink {
            network: "Twitter",
            url: format!("https://twitter.com/intent/tweet?url={url}"),
            popup: true,
            icon: icons::TWITTER,
        },
        ShareLink {
            network: "LinkedIn",
            url: format!("https://www.linkedin.com/shareArticle?url={url}"),
            popup: true,
            icon: icons::LINKEDIN,
        },
        ShareLink {
            network: "Email",
            url: format!(
                "mailto:?subject={}&body={url}",
                urlencoding::encode(title)
            ),
            popup: false,
            icon: icons::MAIL,
        },
    ]
}
