//! Conversion of an accumulated partial record into the public record shape.
//!
//! # Rules
//!
//! - Scalars: absent becomes the empty string.
//! - Hours: `:` removed from start and end, joined as `<start>-<end>`;
//!   a missing side stays empty (`"-1800"`, `"-"`).
//! - Offerings: entries lacking a name or price are dropped; a later entry
//!   with the same name replaces the price of an earlier one.
//! - Images: entries lacking a name or url are dropped, then the first entry
//!   per url wins. Captions start empty; hashtags are copied.
//! - Citations are copied in visitation order, duplicates included.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::record::{FinalRecord, ImageData, PartialRecord, TimeInterval};

/// Produce the public record for `record`, citing `citations`.
pub fn finalize(record: &PartialRecord, citations: &[String]) -> FinalRecord {
    FinalRecord {
        name: text(&record.name),
        address: text(&record.address),
        opening_hours: record.opening_hours.map(format_hours),
        description: text(&record.description),
        offerings: collect_offerings(record),
        contact: text(&record.contact),
        images: collect_images(record),
        citation: citations.to_vec(),
    }
}

/// Format one day's interval as `HHMM-HHMM`.
///
/// `{start: "09:00", end: "18:00"}` → `"0900-1800"`.
pub fn format_hours(interval: &TimeInterval) -> String {
    let strip = |t: &Option<String>| t.as_deref().unwrap_or_default().replace(':', "");
    format!("{}-{}", strip(&interval.start), strip(&interval.end))
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn collect_offerings(record: &PartialRecord) -> IndexMap<String, String> {
    let mut offerings = IndexMap::new();
    for offering in &record.offerings {
        let (Some(name), Some(price)) = (present(&offering.name), present(&offering.price)) else {
            continue;
        };
        offerings.insert(name.to_string(), price.to_string());
    }
    offerings
}

fn collect_images(record: &PartialRecord) -> IndexMap<String, ImageData> {
    let mut images = IndexMap::new();
    let mut seen_urls: HashSet<&str> = HashSet::new();
    for image in &record.images {
        let (Some(name), Some(url)) = (present(&image.name), present(&image.url)) else {
            continue;
        };
        if !seen_urls.insert(url) {
            continue;
        }
        images.insert(
            name.to_string(),
            ImageData {
                caption: String::new(),
                url: url.to_string(),
                hashtags: image.hashtags.clone(),
            },
        );
    }
    images
}
