//! Listing traversal.
//!
//! Collects detail-page links from a listing document, normalizes them by
//! stripping fragment and query, deduplicates preserving first-seen order,
//! and caps the count to bound crawl volume per run.

use url::Url;

use crate::document::Document;
use crate::sites::SiteProfile;

pub fn detail_links(doc: &dyn Document, profile: &SiteProfile, cap: usize) -> Vec<String> {
    let Ok(origin) = Url::parse(&profile.origin) else {
        return Vec::new();
    };

    let mut links: Vec<String> = Vec::new();
    for href in doc.attrs("a", "href") {
        if !href.contains(&profile.detail_pattern) {
            continue;
        }
        let Some(normalized) = normalize(&href, &origin) else {
            continue;
        };
        if !links.contains(&normalized) {
            links.push(normalized);
            if links.len() >= cap {
                break;
            }
        }
    }
    links
}

/// Absolutize against the origin and strip fragment and query, so the same
/// page reached via different tracking parameters counts once.
fn normalize(href: &str, origin: &Url) -> Option<String> {
    let mut url = origin.join(href.trim()).ok()?;
    url.set_fragment(None);
    url.set_query(None);
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
