use std::fs;

use crate::document::StaticDocument;
use crate::extractor::extract_place;
use crate::ids::{IdGen, SequentialGen};
use crate::sites::SiteProfile;
use crate::{NO_IMAGE, UNKNOWN};

fn fixture(name: &str) -> StaticDocument {
    let html = fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture");
    StaticDocument::parse(&html)
}

#[test]
fn fully_populated_restaurant_page() {
    let doc = fixture("restaurant.html");
    let ids = SequentialGen::default();

    let record = extract_place(
        &doc,
        &SiteProfile::kudago(),
        "https://kudago.com/spb/place/palkin/",
        "Рестораны",
        &ids,
    )
    .expect("record");

    assert_eq!(record.id, "1");
    assert_eq!(record.name, "Палкинъ");
    assert_eq!(record.category, "Рестораны");
    assert_eq!(record.address, "Невский пр., д. 47");
    assert_eq!(
        record.work_time,
        "Пн-Чт 12:00-23:00 | Пт-Сб 12:00-01:00 | Вс 12:00-23:00"
    );
    assert!(record.description.starts_with("Ресторан высокой кухни"));
    assert_eq!(
        record.image_filename,
        "https://media.kudago.com/images/place/xl/palkin.jpg"
    );
    assert_eq!(record.source, "kudago");
    assert_eq!(record.url, "https://kudago.com/spb/place/palkin/");
}

#[test]
fn fully_populated_attraction_page() {
    let doc = fixture("museum.html");
    let ids = SequentialGen::default();

    let record = extract_place(
        &doc,
        &SiteProfile::peterburg_center(),
        "https://peterburg.center/maps/yusupovskiy-dvorec",
        "Дворцы",
        &ids,
    )
    .expect("record");

    assert_eq!(record.name, "Юсуповский дворец");
    assert_eq!(record.address, "наб. реки Мойки, д. 94");
    assert!(record.work_time.contains("Дворец работает: 11:00—18:00"));
    assert!(record.work_time.contains("Среда — выходной"));
    assert!(record.work_time.contains(" | "));
    assert!(record.description.starts_with("Юсуповский дворец является"));
    assert_eq!(
        record.image_filename,
        "https://peterburg.center/sites/default/palace.jpg"
    );
}

#[test]
fn sparse_page_degrades_to_markers() {
    let doc = fixture("sparse.html");
    let ids = SequentialGen::default();

    let record = extract_place(
        &doc,
        &SiteProfile::kudago(),
        "https://kudago.com/spb/place/quiet/",
        "Рестораны",
        &ids,
    )
    .expect("record");

    assert_eq!(record.name, "Тихое место");
    assert_eq!(record.address, UNKNOWN);
    assert_eq!(record.work_time, UNKNOWN);
    assert_eq!(record.description, UNKNOWN);
    assert_eq!(record.image_filename, NO_IMAGE);
}

#[test]
fn nameless_page_produces_no_record() {
    let doc = fixture("nameless.html");
    let ids = SequentialGen::default();

    let record = extract_place(
        &doc,
        &SiteProfile::kudago(),
        "https://kudago.com/spb/place/ghost/",
        "Рестораны",
        &ids,
    );
    assert!(record.is_none());
    // No id must be consumed for a discarded page.
    assert_eq!(ids.next_id(), "1");
}

#[test]
fn ids_come_from_the_injected_generator() {
    let ids = SequentialGen::default();
    let first = extract_place(
        &fixture("restaurant.html"),
        &SiteProfile::kudago(),
        "https://kudago.com/spb/place/palkin/",
        "Рестораны",
        &ids,
    )
    .unwrap();
    let second = extract_place(
        &fixture("sparse.html"),
        &SiteProfile::kudago(),
        "https://kudago.com/spb/place/quiet/",
        "Рестораны",
        &ids,
    )
    .unwrap();

    assert_eq!(first.id, "1");
    assert_eq!(second.id, "2");
}
