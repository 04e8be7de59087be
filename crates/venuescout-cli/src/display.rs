//! Vertical card display for venue records.
//!
//! Renders one record as a grouped, human-readable card. Empty sections are
//! left out.

use std::fmt::Write;

use venuescout_core::{FinalRecord, Weekday};

const MAX_LIST_ITEMS: usize = 10;

/// Print a single venue record as a vertical card.
pub fn print_venue_card(record: &FinalRecord) {
    print!("{}", render_venue_card(record));
}

pub fn render_venue_card(record: &FinalRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", record.name);
    if !record.description.is_empty() {
        let _ = writeln!(out, "{}", record.description);
    }
    let _ = writeln!(out);

    section(
        &mut out,
        "Identity",
        [("address", record.address.as_str()), ("contact", record.contact.as_str())]
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.to_string(), v.to_string())),
    );
    section(
        &mut out,
        "Opening Hours",
        Weekday::ALL
            .into_iter()
            .map(|day| (day.as_str().to_string(), record.opening_hours.get(day).clone()))
            .filter(|(_, hours)| hours != "-"),
    );
    section(
        &mut out,
        "Offerings",
        record
            .offerings
            .iter()
            .map(|(name, price)| (name.clone(), price.clone())),
    );
    section(
        &mut out,
        "Images",
        record.images.iter().map(|(name, image)| {
            let mut line = image.url.clone();
            if !image.caption.is_empty() {
                line = format!("{line}\n{:<29}{}", "", image.caption);
            }
            if !image.hashtags.is_empty() {
                line = format!("{line}\n{:<29}{}", "", image.hashtags.join(" "));
            }
            (name.clone(), line)
        }),
    );

    if !record.citation.is_empty() {
        let _ = writeln!(out, "Sources");
        for url in &record.citation {
            let _ = writeln!(out, "  {url}");
        }
        let _ = writeln!(out);
    }
    out
}

fn section(out: &mut String, header: &str, rows: impl Iterator<Item = (String, String)>) {
    let rows: Vec<(String, String)> = rows.collect();
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "{header}");
    for (label, value) in rows.iter().take(MAX_LIST_ITEMS) {
        let _ = writeln!(out, "  {label:<26} {value}");
    }
    if rows.len() > MAX_LIST_ITEMS {
        let _ = writeln!(out, "    ... and {} more", rows.len() - MAX_LIST_ITEMS);
    }
    let _ = writeln!(out);
}
