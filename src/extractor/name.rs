//! Name extraction.
//!
//! The only field with a hard requirement: no name, no record. Single
//! strategy with metadata fallbacks rather than a full cascade, since every
//! page worth keeping puts its name in the first heading.

use crate::document::Document;
use crate::extractor::normalize::clean;

/// Separators sites use to glue the site name onto the page title.
const TITLE_SUFFIX_SEPARATORS: &[&str] = &[" — ", " | ", " - "];

pub fn extract_name(doc: &dyn Document) -> Option<String> {
    if let Some(h1) = doc
        .texts("h1")
        .into_iter()
        .map(|t| clean(&t))
        .find(|t| !t.is_empty())
    {
        return Some(h1);
    }

    if let Some(og_title) = doc
        .attrs(r#"meta[property="og:title"]"#, "content")
        .into_iter()
        .map(|t| clean(&t))
        .find(|t| !t.is_empty())
    {
        return Some(og_title);
    }

    doc.texts("title")
        .into_iter()
        .map(|t| clean(&strip_site_suffix(&t)))
        .find(|t| !t.is_empty())
}

/// Drop a "… — Site Name" style suffix from a raw document title.
fn strip_site_suffix(title: &str) -> String {
    for sep in TITLE_SUFFIX_SEPARATORS {
        if let Some(pos) = title.rfind(sep) {
            return title[..pos].to_string();
        }
    }
    title.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StaticDocument;

    #[test]
    fn first_heading_wins() {
        let d = StaticDocument::parse(
            "<html><head><title>Заголовок — Сайт</title></head><body><h1>Эрмитаж</h1><h1>Другое</h1></body></html>",
        );
        assert_eq!(extract_name(&d), Some("Эрмитаж".to_string()));
    }

    #[test]
    fn empty_heading_falls_through_to_metadata() {
        let d = StaticDocument::parse(
            r#"<html><head><meta property="og:title" content="Летний сад"></head><body><h1>  </h1></body></html>"#,
        );
        assert_eq!(extract_name(&d), Some("Летний сад".to_string()));
    }

    #[test]
    fn raw_title_loses_site_suffix() {
        let d = StaticDocument::parse(
            "<html><head><title>Ресторан «Палкинъ» — KudaGo</title></head><body></body></html>",
        );
        assert_eq!(extract_name(&d), Some("Ресторан «Палкинъ»".to_string()));
    }

    #[test]
    fn no_name_anywhere_means_none() {
        let d = StaticDocument::parse("<html><body><p>Безымянная страница</p></body></html>");
        assert_eq!(extract_name(&d), None);
    }
}
