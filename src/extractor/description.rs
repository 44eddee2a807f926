//! Description cascade.
//!
//! Pages that carry a contacts block put the prose right after it, so the
//! contact-label split runs first. The container scan is the usual path for
//! the restaurant site; the social-preview metadata is the last resort and
//! only accepted when it is long enough to be prose, not a slogan.

use regex::Regex;
use std::sync::LazyLock;

use crate::document::Document;
use crate::extractor::predicates::is_descriptive_sentence;
use crate::sites::SiteProfile;

/// Labels that end a contacts block.
static CONTACT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Официальный сайт|Телефон/факс|Телефон").unwrap());

const CONTACT_MARKERS: &[&str] = &["Официальный сайт", "Телефон"];

/// Minimum length for the contact-split strategy; sentences right after a
/// contacts block need to be unambiguous prose.
const CONTACT_SPLIT_MIN_LEN: usize = 80;

const META_DESCRIPTION_MIN_LEN: usize = 50;

pub fn extract_description(doc: &dyn Document, profile: &SiteProfile) -> Option<String> {
    after_contacts(doc)
        .or_else(|| from_containers(doc, profile))
        .or_else(|| from_metadata(doc))
}

/// Strategy 1: split the page text on the contact labels and scan what
/// follows the last one.
fn after_contacts(doc: &dyn Document) -> Option<String> {
    let full = doc.full_text();
    if !CONTACT_MARKERS.iter().any(|m| full.contains(m)) {
        return None;
    }
    let tail = CONTACT_SPLIT.split(&full).last()?;
    tail.lines()
        .map(str::trim)
        .find(|line| is_descriptive_sentence(line, CONTACT_SPLIT_MIN_LEN, true))
        .map(str::to_string)
}

/// Strategy 2: paragraphs inside the site's known content containers.
fn from_containers(doc: &dyn Document, profile: &SiteProfile) -> Option<String> {
    for container in profile.content_selectors {
        let selector = format!("{container} p");
        for text in doc.texts(&selector) {
            if is_descriptive_sentence(
                &text,
                profile.min_description_len,
                profile.description_requires_topic,
            ) {
                return Some(text);
            }
        }
    }
    None
}

/// Strategy 3: social-preview description metadata.
fn from_metadata(doc: &dyn Document) -> Option<String> {
    doc.attrs(r#"meta[property="og:description"]"#, "content")
        .into_iter()
        .find(|content| content.chars().count() > META_DESCRIPTION_MIN_LEN)
}
