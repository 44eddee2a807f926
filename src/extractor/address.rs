//! Address cascade.
//!
//! Narrow structural selectors go first because a class hook is the least
//! likely to produce a false positive; the label scan over the whole page
//! text and the regex patterns are safety nets for pages with no address
//! markup at all. Every candidate passes through [`is_plausible_address`]
//! before it is accepted.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::Document;
use crate::extractor::normalize::clean;
use crate::extractor::predicates::is_plausible_address;
use crate::sites::SiteProfile;

const ADDRESS_LABEL: &str = "Адрес:";

/// Elements worth scanning when looking for a literal "Адрес:" label.
const LABEL_HOSTS: &str = "p, div, span, li, td, address";

static ADDRESS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Labelled address first: lowest false-positive risk of the four.
        r"(?i)Адрес:\s*([^\n]{10,80})",
        r"(?i)Санкт-Петербург[^,\n]{0,50}",
        r"(?i)ул\.\s*[^,\n]{5,40}",
        r"(?i)улица\s*[^,\n]{5,40}",
        r"(?i)проспект\s*[^,\n]{5,40}",
        r"(?i)пр\.\s*[^,\n]{5,40}",
        r"(?i)набережная\s*[^,\n]{5,40}",
        r"(?i)наб\.\s*[^,\n]{5,40}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("address pattern"))
    .collect()
});

pub fn extract_address(doc: &dyn Document, profile: &SiteProfile) -> Option<String> {
    from_markup(doc, profile)
        .or_else(|| from_labelled_elements(doc))
        .or_else(|| from_full_text_label(doc))
        .or_else(|| from_text_patterns(doc))
}

/// Strategy 1: elements whose class suggests an address block.
fn from_markup(doc: &dyn Document, profile: &SiteProfile) -> Option<String> {
    for selector in profile.address_selectors {
        for text in doc.texts(selector) {
            if let Some(address) = accept(&text) {
                return Some(address);
            }
        }
    }
    None
}

/// Strategy 2: elements that carry the literal label when no class hook
/// exists.
fn from_labelled_elements(doc: &dyn Document) -> Option<String> {
    for text in doc.texts(LABEL_HOSTS) {
        if !text.contains(ADDRESS_LABEL) {
            continue;
        }
        if let Some(address) = accept(&text) {
            return Some(address);
        }
    }
    None
}

/// Strategy 3: split the whole visible page text on the label and take the
/// first line of the remainder.
fn from_full_text_label(doc: &dyn Document) -> Option<String> {
    let full = doc.full_text();
    let (_, after) = full.split_once(ADDRESS_LABEL)?;
    let candidate = after.lines().next()?.trim();
    is_plausible_address(candidate).then(|| clean(candidate))
}

/// Strategy 4: fixed regex patterns over the whole page text, tried in
/// order, first plausible match in document order wins.
fn from_text_patterns(doc: &dyn Document) -> Option<String> {
    let full = doc.full_text();
    for pattern in ADDRESS_PATTERNS.iter() {
        for caps in pattern.captures_iter(&full) {
            let matched = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            if is_plausible_address(matched) {
                return Some(clean(matched));
            }
        }
    }
    None
}

/// Accept an element text as an address. When the text carries the label,
/// the substring after it is preferred so the label never leaks into the
/// field.
fn accept(text: &str) -> Option<String> {
    if let Some((_, tail)) = text.split_once(ADDRESS_LABEL) {
        let tail = tail.trim();
        if is_plausible_address(tail) {
            return Some(clean(tail));
        }
    }
    let trimmed = text.trim();
    is_plausible_address(trimmed).then(|| clean(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StaticDocument;
    use crate::sites::SiteProfile;

    fn doc(html: &str) -> StaticDocument {
        StaticDocument::parse(html)
    }

    #[test]
    fn class_hook_wins_over_body_text() {
        let d = doc(
            r#"<html><body>
            <div class="location-address">наб. реки Мойки, 12</div>
            <p>Адрес: ул. Другая, д. 1</p>
            </body></html>"#,
        );
        let profile = SiteProfile::kudago();
        assert_eq!(
            extract_address(&d, &profile),
            Some("наб. реки Мойки, 12".to_string())
        );
    }

    #[test]
    fn label_is_stripped_from_class_hook_text() {
        let d = doc(
            r#"<html><body><div class="address">Адрес: Невский проспект, 28</div></body></html>"#,
        );
        let profile = SiteProfile::peterburg_center();
        assert_eq!(
            extract_address(&d, &profile),
            Some("Невский проспект, 28".to_string())
        );
    }

    #[test]
    fn labelled_body_text_yields_exact_address() {
        let d = doc(
            "<html><body>Часы и билеты. Адрес: ул. Ленина, д. 5\n<p>Прочий текст страницы</p></body></html>",
        );
        let profile = SiteProfile::peterburg_center();
        assert_eq!(
            extract_address(&d, &profile),
            Some("ул. Ленина, д. 5".to_string())
        );
    }

    #[test]
    fn regex_fallback_finds_unlabelled_street() {
        let d = doc(
            "<html><body><p>Ресторан находится по адресу набережная канала Грибоедова, 26 и открыт ежедневно.</p></body></html>",
        );
        let profile = SiteProfile::kudago();
        let got = extract_address(&d, &profile).unwrap();
        assert!(got.starts_with("набережная канала Грибоедова"));
    }

    #[test]
    fn page_without_address_markup_yields_none() {
        let d = doc("<html><body><p>Ни намёка на местоположение.</p></body></html>");
        let profile = SiteProfile::kudago();
        assert_eq!(extract_address(&d, &profile), None);
    }

    #[test]
    fn short_candidates_never_pass() {
        let d = doc(r#"<html><body><div class="address">спб</div></body></html>"#);
        let profile = SiteProfile::kudago();
        assert_eq!(extract_address(&d, &profile), None);
    }
}
