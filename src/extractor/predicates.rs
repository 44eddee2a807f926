//! Per-field validity predicates.
//!
//! The token lists are tuned to the Russian-language markup of the two
//! source sites. The description exclude/topic lists are one shared set for
//! both description strategies, so a paragraph mentioning a price or a
//! phone number is rejected on either site, including the container scan.
//! The lists are data, not style: widening or reordering them changes which
//! candidate a cascade accepts.

/// Tokens whose presence makes a string look like a street address.
pub const ADDRESS_INDICATORS: &[&str] = &[
    "ул.",
    "улица",
    "пр.",
    "проспект",
    "наб.",
    "набережная",
    "санкт-петербург",
    "спб",
    "д.",
    "дом",
    "площадь",
    "аллея",
    "бульвар",
];

pub const WEEKDAYS: &[&str] = &[
    "понедельник",
    "вторник",
    "среда",
    "четверг",
    "пятница",
    "суббота",
    "воскресенье",
];

/// Schedule words that appear without a weekday ("музей работает: ...").
const SCHEDULE_MARKERS: &[&str] = &["работает", "касса", "выходной"];

/// Short day/time tokens the second site uses under its "Расписание" label.
const DAY_TIME_TOKENS: &[&str] = &[
    "ежедневно",
    "пн",
    "вт",
    "ср",
    "чт",
    "пт",
    "сб",
    "вс",
    "круглосуточно",
    "весь день",
];

/// Keywords that disqualify a line from being a description. Checked before
/// the topic list: a sentence mentioning both a palace and a phone number is
/// a contacts block, not a description.
const DESCRIPTION_EXCLUDE: &[&str] = &[
    "режим работы",
    "время работы",
    "расписание",
    "цена",
    "билет",
    "стоимость",
    "руб.",
    "заказ экскурсий",
    "адрес",
    "телефон",
    "сайт",
    "email",
    "@",
];

/// Topic words a real description of a place tends to contain.
const DESCRIPTION_TOPICS: &[&str] = &[
    "является",
    "служил",
    "расположен",
    "находится",
    "образцом",
    "площадь",
    "река",
    "парк",
    "дворец",
    "музей",
    "архитектур",
    "истори",
    "культур",
    "композиционным",
    "ансамбль",
    "резиденция",
    "коллекция",
    "экспонат",
];

/// Gate for the address cascade: anything shorter than 10 chars is noise,
/// anything longer must carry at least one address indicator.
pub fn is_plausible_address(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < 10 {
        return false;
    }
    let lower = trimmed.to_lowercase();
    ADDRESS_INDICATORS.iter().any(|t| lower.contains(t))
}

/// A line that looks like one entry of an opening-hours block.
pub fn is_schedule_line(text: &str) -> bool {
    if text.contains(':') || text.contains('—') {
        return true;
    }
    let lower = text.to_lowercase();
    WEEKDAYS.iter().any(|d| lower.contains(d))
        || SCHEDULE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Loose day/time check used by the "Расписание" label lookahead.
pub fn has_day_or_time_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    DAY_TIME_TOKENS.iter().any(|t| lower.contains(t))
}

/// Whether a line reads like descriptive prose about the place.
///
/// `min_len` differs per cascade (the contact-split strategy wants longer
/// sentences than the container scan); `require_topic` is off for the site
/// whose content containers are already description-only.
pub fn is_descriptive_sentence(text: &str, min_len: usize, require_topic: bool) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() <= min_len {
        return false;
    }
    let lower = trimmed.to_lowercase();
    if DESCRIPTION_EXCLUDE.iter().any(|e| lower.contains(e)) {
        return false;
    }
    if require_topic && !DESCRIPTION_TOPICS.iter().any(|t| lower.contains(t)) {
        return false;
    }
    true
}
