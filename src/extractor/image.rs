//! Primary-image cascade.
//!
//! Ordered selector groups from most to least specific; the first non-empty
//! URL wins. The only gate is "resolves to an http(s) URL against the site
//! origin" — image markup is too varied for a stronger predicate.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::document::Document;
use crate::sites::SiteProfile;

/// Attributes that carry the full-size source on lazy-loaded images,
/// preferred over `src` which is often a thumbnail or a 1px placeholder.
const LAZY_ATTRS: &[&str] = &["data-full", "data-src", "data-lazy"];

const CONTENT_IMAGE_SELECTORS: &[&str] = &[
    "article img",
    "main img",
    r#"div[class*="content"] img"#,
    r#"div[class*="post"] img"#,
];

static BACKGROUND_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\(['"]?([^'")]+)['"]?\)"#).unwrap());

pub fn extract_image(doc: &dyn Document, profile: &SiteProfile) -> Option<String> {
    let origin = Url::parse(&profile.origin).ok()?;
    candidate_url(doc, profile).and_then(|src| absolutize(&src, &origin))
}

fn candidate_url(doc: &dyn Document, profile: &SiteProfile) -> Option<String> {
    // (a) known gallery/carousel classes
    for selector in profile.image_selectors {
        for attr in LAZY_ATTRS.iter().chain(&["src"]) {
            if let Some(src) = first_usable(doc.attrs(selector, attr)) {
                return Some(src);
            }
        }
    }

    // (b) generic content-area images
    for selector in CONTENT_IMAGE_SELECTORS {
        if let Some(src) = first_usable(doc.attrs(selector, "src")) {
            return Some(src);
        }
    }

    // (c) social-preview metadata
    if let Some(src) = first_usable(doc.attrs(r#"meta[property="og:image"]"#, "content")) {
        return Some(src);
    }

    // (d) inline background-image declarations
    for style in doc.attrs(r#"[style*="background-image"]"#, "style") {
        if let Some(caps) = BACKGROUND_IMAGE.captures(&style) {
            let src = caps[1].trim().to_string();
            if is_usable(&src) {
                return Some(src);
            }
        }
    }

    // (e) lazy-load attributes on any image
    for attr in LAZY_ATTRS {
        if let Some(src) = first_usable(doc.attrs("img", attr)) {
            return Some(src);
        }
    }

    None
}

fn first_usable(values: Vec<String>) -> Option<String> {
    values.into_iter().find(|v| is_usable(v))
}

fn is_usable(src: &str) -> bool {
    !src.is_empty() && !src.starts_with("data:")
}

/// Rewrite protocol-relative and root-relative URLs against the site
/// origin; reject anything that is not http(s) after resolution.
fn absolutize(src: &str, origin: &Url) -> Option<String> {
    let resolved = origin.join(src.trim()).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StaticDocument;
    use crate::sites::SiteProfile;

    #[test]
    fn gallery_image_prefers_full_size_attribute() {
        let d = StaticDocument::parse(
            r#"<html><body><img class="post-big-preview-image" src="//media.kudago.com/thumbs/s/pic.jpg" data-full="//media.kudago.com/images/place/xl/pic.jpg"></body></html>"#,
        );
        assert_eq!(
            extract_image(&d, &SiteProfile::kudago()),
            Some("https://media.kudago.com/images/place/xl/pic.jpg".to_string())
        );
    }

    #[test]
    fn root_relative_src_is_rewritten_to_origin() {
        let d = StaticDocument::parse(
            r#"<html><body><article><img src="/images/hall.jpg"></article></body></html>"#,
        );
        assert_eq!(
            extract_image(&d, &SiteProfile::peterburg_center()),
            Some("https://peterburg.center/images/hall.jpg".to_string())
        );
    }

    #[test]
    fn social_preview_metadata_is_used_when_no_content_image() {
        let d = StaticDocument::parse(
            r#"<html><head><meta property="og:image" content="https://cdn.example.com/cover.jpg"></head><body></body></html>"#,
        );
        assert_eq!(
            extract_image(&d, &SiteProfile::kudago()),
            Some("https://cdn.example.com/cover.jpg".to_string())
        );
    }

    #[test]
    fn background_image_declaration_is_parsed() {
        let d = StaticDocument::parse(
            r#"<html><body><div style="background-image: url('/bg/facade.jpg');"></div></body></html>"#,
        );
        assert_eq!(
            extract_image(&d, &SiteProfile::peterburg_center()),
            Some("https://peterburg.center/bg/facade.jpg".to_string())
        );
    }

    #[test]
    fn data_uri_placeholders_are_skipped() {
        let d = StaticDocument::parse(
            r#"<html><body><article><img src="data:image/gif;base64,R0lGOD"></article><img data-src="/real.jpg"></body></html>"#,
        );
        assert_eq!(
            extract_image(&d, &SiteProfile::peterburg_center()),
            Some("https://peterburg.center/real.jpg".to_string())
        );
    }

    #[test]
    fn no_image_markup_yields_none() {
        let d = StaticDocument::parse("<html><body><p>Только текст</p></body></html>");
        assert_eq!(extract_image(&d, &SiteProfile::kudago()), None);
    }
}
