//! Site profiles.
//!
//! Everything site-specific lives here as data: where the listing is, what
//! a detail link looks like, which classes the site uses for addresses,
//! content and gallery images, and how strict the description predicate
//! should be. The cascades themselves are site-agnostic.

/// Crawl and extraction parameters for one source site.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Provenance tag written into every record.
    pub source: String,
    /// Listing/category page the crawl starts from.
    pub listing_url: String,
    /// Origin used to absolutize relative links and image URLs.
    pub origin: String,
    /// Substring identifying a detail-page link on the listing.
    pub detail_pattern: String,
    /// Upper bound on detail pages visited per run.
    pub link_cap: usize,
    /// Category label used when the listing does not reveal one.
    pub default_category: String,
    /// Selector for category links on the landing page; when set, the crawl
    /// descends into the first category before collecting detail links.
    pub category_selector: Option<String>,
    /// Whether the site needs script execution to materialize its markup
    /// (used by the `headless` document source).
    pub needs_rendering: bool,
    pub address_selectors: &'static [&'static str],
    pub content_selectors: &'static [&'static str],
    pub image_selectors: &'static [&'static str],
    /// Minimum length for a container paragraph to count as a description.
    pub min_description_len: usize,
    /// Whether container paragraphs must contain a topic keyword.
    pub description_requires_topic: bool,
    /// Path-segment rewrite applied when an image download fails
    /// (the CDN serves `/large/` more reliably than `/xl/`).
    pub image_url_rewrite: Option<(&'static str, &'static str)>,
}

impl SiteProfile {
    /// City-guide restaurant listing. Static markup, JSON-LD hours.
    pub fn kudago() -> Self {
        Self {
            source: "kudago".to_string(),
            listing_url: "https://kudago.com/spb/restaurants/".to_string(),
            origin: "https://kudago.com".to_string(),
            detail_pattern: "/spb/place/".to_string(),
            link_cap: 3,
            default_category: "Рестораны".to_string(),
            category_selector: None,
            needs_rendering: false,
            address_selectors: &[
                ".location-address",
                ".post-place-address",
                ".addresses-list",
                ".post-address",
                r#"[class*="address"]"#,
                r#"[class*="location"]"#,
            ],
            content_selectors: &[
                ".post-big-content",
                ".post-content",
                ".post-body",
                ".place-description",
                ".post-description",
            ],
            image_selectors: &["img.post-big-preview-image"],
            min_description_len: 50,
            description_requires_topic: false,
            image_url_rewrite: Some(("/xl/", "/large/")),
        }
    }

    /// Attractions portal. Script-built markup, heading-based hours.
    pub fn peterburg_center() -> Self {
        Self {
            source: "peterburg_center".to_string(),
            listing_url: "https://peterburg.center/dostoprimechatelnocti".to_string(),
            origin: "https://peterburg.center".to_string(),
            detail_pattern: "/maps/".to_string(),
            link_cap: 2,
            default_category: "Достопримечательности".to_string(),
            category_selector: Some(r#".dropdown-menu a[href*="category"]"#.to_string()),
            needs_rendering: true,
            address_selectors: &[r#"[class*="address"]"#, r#"[class*="location"]"#],
            content_selectors: &[
                r#"div[class*="field-name-body"]"#,
                r#"div[class*="content"]"#,
                r#"div[class*="description"]"#,
                "article",
                "main",
            ],
            image_selectors: &[],
            min_description_len: 80,
            description_requires_topic: true,
            image_url_rewrite: None,
        }
    }

    /// All sites a full run crawls, in order.
    pub fn all() -> Vec<SiteProfile> {
        vec![Self::kudago(), Self::peterburg_center()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_have_sane_caps() {
        for profile in SiteProfile::all() {
            assert!(profile.link_cap >= 1 && profile.link_cap <= 3);
            assert!(profile.origin.starts_with("https://"));
            assert!(profile.listing_url.starts_with(&profile.origin));
        }
    }
}
