//! The field-extraction engine.
//!
//! One cascade per field, each an ordered list of strategies tried against
//! the [`Document`](crate::document::Document) until one produces a value
//! the field's predicate accepts. A strategy that fails internally simply
//! yields no match; nothing in this module returns an error or panics on a
//! malformed page. The cascade orderings and keyword lists mirror what the
//! two source sites actually serve and are load-bearing: reordering changes
//! which heuristic wins on ambiguous documents.

pub mod address;
pub mod description;
pub mod hours;
pub mod image;
pub mod model;
pub mod name;
pub mod normalize;
pub mod predicates;

#[cfg(test)]
mod tests;

pub use model::PlaceRecord;

use crate::UNKNOWN;
use crate::document::Document;
use crate::extractor::normalize::{clean, truncate};
use crate::ids::IdGen;
use crate::sites::SiteProfile;

const ADDRESS_MAX_LEN: usize = 300;
const DESCRIPTION_MAX_LEN: usize = 350;

/// Run every cascade against one detail page and assemble the record.
///
/// Returns `None` when no strategy can produce a name; every other field
/// degrades to the unknown marker instead of failing the record. The image
/// field carries the resolved remote URL here; the crawler swaps it for a
/// local filename after download.
pub fn extract_place(
    doc: &dyn Document,
    profile: &SiteProfile,
    page_url: &str,
    category: &str,
    ids: &dyn IdGen,
) -> Option<PlaceRecord> {
    let name = name::extract_name(doc)?;

    let address = address::extract_address(doc, profile)
        .map(|a| truncate(&clean(&a), ADDRESS_MAX_LEN))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let work_time = hours::extract_hours(doc)
        .map(|w| clean(&w))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let description = description::extract_description(doc, profile)
        .map(|d| truncate(&clean(&d), DESCRIPTION_MAX_LEN))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let image_filename = image::extract_image(doc, profile)
        .unwrap_or_else(|| crate::NO_IMAGE.to_string());

    Some(PlaceRecord {
        id: ids.next_id(),
        category: category.to_string(),
        name,
        address,
        work_time,
        description,
        image_filename,
        source: profile.source.clone(),
        url: page_url.to_string(),
    })
}
