//! Social media link discovery.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use serde::Serialize;

static SOCIAL_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://(?:www\.)?(facebook|twitter|instagram|linkedin|x)\.com")
        .expect("compile social link regex")
});

/// An anchor pointing at a known social platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Platform name taken from the domain (`facebook`, `x`, ...)
    pub platform: String,
    /// The anchor's full `href`
    pub href: String,
}

impl SocialLink {
    /// Form label, e.g. `Facebook URL`.
    pub fn label(&self) -> String {
        let mut chars = self.platform.chars();
        let name = chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect::<String>()
        });
        format!("{name} URL")
    }
}

/// Find every social link anchor, in document order.
///
/// Links are not deduplicated: two anchors with the same `href` are both
/// reported.
pub fn find_social_links(tree: &Html) -> Vec<SocialLink> {
    tree.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let caps = SOCIAL_HREF.captures(href)?;
            Some(SocialLink {
                platform: caps[1].to_string(),
                href: href.to_string(),
            })
        })
        .collect()
}
