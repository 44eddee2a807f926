//! Opening-hours cascade.
//!
//! Structured data first: a schema.org block is trusted outright and skips
//! the schedule-line predicate. The heading, list-item and label strategies
//! are mutually exclusive alternatives over progressively weaker markup;
//! only the winning strategy's output is used.

use serde_json::Value;

use crate::document::Document;
use crate::extractor::normalize::{clean, truncate};
use crate::extractor::predicates::{WEEKDAYS, has_day_or_time_marker, is_schedule_line};

const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
const ENTRY_SEPARATOR: &str = " | ";
const MAX_JSON_LD_ENTRIES: usize = 3;
const MAX_LINES: usize = 8;
const MAX_TOTAL_LEN: usize = 400;

/// schema.org types that describe a place with business hours.
const BUSINESS_TYPES: &[&str] = &[
    "FoodEstablishment",
    "Restaurant",
    "CafeOrCoffeeShop",
    "BarOrPub",
    "LocalBusiness",
    "Museum",
    "TouristAttraction",
];

const HOURS_HEADINGS: &[&str] = &["Режим работы", "Время работы"];

/// Keywords marking a list item as schedule-bearing even without a weekday.
const LIST_ITEM_KEYWORDS: &[&str] = &["музей работает", "работает:", "касса работает", "выходной"];

const SCHEDULE_LABEL: &str = "расписание";
/// How many lines below the "Расписание" label are inspected.
const LABEL_LOOKAHEAD: usize = 2;
const LABEL_EXCLUDE: &[&str] = &["адрес", "телефон", "цена", "руб"];

pub fn extract_hours(doc: &dyn Document) -> Option<String> {
    from_json_ld(doc)
        .or_else(|| from_heading_section(doc))
        .or_else(|| from_list_items(doc))
        .or_else(|| from_schedule_label(doc))
}

/// Strategy 1: schema.org JSON-LD business markup.
fn from_json_ld(doc: &dyn Document) -> Option<String> {
    for block in doc.texts(JSON_LD_SELECTOR) {
        let Ok(value) = serde_json::from_str::<Value>(&block) else {
            continue;
        };

        // Top-level object, array, or @graph container.
        let mut candidates: Vec<Value> = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        let graphed: Vec<Value> = candidates
            .iter()
            .filter_map(|item| item.get("@graph").and_then(Value::as_array))
            .flatten()
            .cloned()
            .collect();
        candidates.extend(graphed);

        for item in candidates {
            if !is_business_type(item.get("@type")) {
                continue;
            }
            match item.get("openingHours") {
                Some(Value::String(s)) if !s.trim().is_empty() => {
                    return Some(s.trim().to_string());
                }
                Some(Value::Array(entries)) => {
                    let joined: Vec<&str> = entries
                        .iter()
                        .filter_map(Value::as_str)
                        .take(MAX_JSON_LD_ENTRIES)
                        .collect();
                    if !joined.is_empty() {
                        return Some(joined.join(ENTRY_SEPARATOR));
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// `@type` may be a string or an array of strings.
fn is_business_type(type_node: Option<&Value>) -> bool {
    let Some(node) = type_node else {
        return false;
    };
    let matches_one = |s: &str| BUSINESS_TYPES.iter().any(|t| s.eq_ignore_ascii_case(t));
    match node {
        Value::String(s) => matches_one(s),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .any(matches_one),
        _ => false,
    }
}

/// Strategy 2: a "Режим работы" heading followed by the schedule inside the
/// same parent element.
fn from_heading_section(doc: &dyn Document) -> Option<String> {
    for (heading, parent) in doc.texts_with_parent("h2, h3, h4") {
        if !HOURS_HEADINGS.iter().any(|h| heading.contains(h)) {
            continue;
        }
        let after = match parent.split_once(heading.as_str()) {
            Some((_, after)) => after,
            None => parent.as_str(),
        };

        let mut lines = Vec::new();
        for line in after.split('\n').take(10) {
            let line = line.trim();
            if line.chars().count() > 5 && is_schedule_line(line) {
                lines.push(clean(line));
            }
            if lines.len() == MAX_LINES {
                break;
            }
        }
        if !lines.is_empty() {
            return Some(truncate(&lines.join(ENTRY_SEPARATOR), MAX_TOTAL_LEN));
        }
    }
    None
}

/// Strategy 3: scan list items for schedule keywords, or a weekday combined
/// with a time indicator.
fn from_list_items(doc: &dyn Document) -> Option<String> {
    let mut hits = Vec::new();
    for text in doc.texts("li") {
        let lower = text.to_lowercase();
        let keyword = LIST_ITEM_KEYWORDS.iter().any(|k| lower.contains(k));
        let weekday = WEEKDAYS.iter().any(|d| lower.contains(d));
        let timed = [":", "—", "00"].iter().any(|t| text.contains(t));
        if keyword || (weekday && timed) {
            hits.push(clean(&text));
        }
        if hits.len() == MAX_LINES {
            break;
        }
    }
    if hits.is_empty() {
        None
    } else {
        Some(truncate(&hits.join(ENTRY_SEPARATOR), MAX_TOTAL_LEN))
    }
}

/// Strategy 4: a bare "Расписание" label with the schedule on one of the
/// following lines. Last resort: the next short line that is not a
/// contacts/price line.
fn from_schedule_label(doc: &dyn Document) -> Option<String> {
    let full = doc.full_text();
    let lines: Vec<&str> = full.split('\n').collect();

    for (i, line) in lines.iter().enumerate() {
        if !line.to_lowercase().contains(SCHEDULE_LABEL) {
            continue;
        }
        let window: Vec<&str> = lines
            .iter()
            .skip(i + 1)
            .take(LABEL_LOOKAHEAD)
            .map(|l| l.trim())
            .filter(|l| l.chars().count() > 3)
            .collect();

        for candidate in &window {
            if has_day_or_time_marker(candidate) {
                return Some(clean(candidate));
            }
        }
        for candidate in &window {
            let lower = candidate.to_lowercase();
            let excluded = LABEL_EXCLUDE.iter().any(|e| lower.contains(e));
            if !excluded && candidate.chars().count() < 50 {
                return Some(clean(candidate));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StaticDocument;

    #[test]
    fn json_ld_entries_joined_with_separator() {
        let d = StaticDocument::parse(
            r#"<html><head><script type="application/ld+json">
            {"@type": "Restaurant", "openingHours": ["Mo-Fr 10:00-18:00", "Sa 10:00-16:00", "Su closed", "ignored"]}
            </script></head><body></body></html>"#,
        );
        assert_eq!(
            extract_hours(&d),
            Some("Mo-Fr 10:00-18:00 | Sa 10:00-16:00 | Su closed".to_string())
        );
    }

    #[test]
    fn json_ld_graph_container_is_unwrapped() {
        let d = StaticDocument::parse(
            r#"<html><head><script type="application/ld+json">
            {"@graph": [{"@type": "FoodEstablishment", "openingHours": "ежедневно 12:00-23:00"}]}
            </script></head><body></body></html>"#,
        );
        assert_eq!(extract_hours(&d), Some("ежедневно 12:00-23:00".to_string()));
    }

    #[test]
    fn json_ld_of_wrong_type_is_ignored() {
        let d = StaticDocument::parse(
            r#"<html><head><script type="application/ld+json">
            {"@type": "BreadcrumbList", "openingHours": "never"}
            </script></head><body></body></html>"#,
        );
        assert_eq!(extract_hours(&d), None);
    }

    #[test]
    fn heading_section_collects_schedule_lines() {
        let d = StaticDocument::parse(
            "<html><body><section><h2>Режим работы</h2>\
             <p>Музей работает: 10:30—18:00</p>\
             <p>Касса работает до 17:00</p>\
             <p>Понедельник — выходной</p>\
             <p>Купить билет онлайн</p>\
             </section></body></html>",
        );
        let got = extract_hours(&d).unwrap();
        assert!(got.contains("Музей работает: 10:30—18:00"));
        assert!(got.contains("Понедельник — выходной"));
        assert!(got.contains(" | "));
        assert!(!got.contains("Купить билет онлайн"));
    }

    #[test]
    fn list_items_need_weekday_and_time_together() {
        let d = StaticDocument::parse(
            "<html><body><ul>\
             <li>Суббота и воскресенье с 11:00</li>\
             <li>Просто пункт меню</li>\
             <li>выходной — понедельник</li>\
             </ul></body></html>",
        );
        let got = extract_hours(&d).unwrap();
        assert!(got.contains("Суббота и воскресенье с 11:00"));
        assert!(got.contains("выходной — понедельник"));
        assert!(!got.contains("Просто пункт меню"));
    }

    #[test]
    fn schedule_label_lookahead_prefers_day_marker() {
        let d = StaticDocument::parse(
            "<html><body><div>Расписание</div><div>короткая заметка тут</div><div>ежедневно 12:00—00:00</div></body></html>",
        );
        assert_eq!(extract_hours(&d), Some("ежедневно 12:00—00:00".to_string()));
    }

    #[test]
    fn schedule_label_falls_back_to_short_neutral_line() {
        let d = StaticDocument::parse(
            "<html><body><div>Расписание</div><div>уточняйте у администратора</div></body></html>",
        );
        assert_eq!(
            extract_hours(&d),
            Some("уточняйте у администратора".to_string())
        );
    }

    #[test]
    fn page_without_schedule_yields_none() {
        let d = StaticDocument::parse(
            "<html><body><p>Страница о другом, без единой даты.</p></body></html>",
        );
        assert_eq!(extract_hours(&d), None);
    }
}
