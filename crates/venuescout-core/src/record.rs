//! Venue record types shared between the agent and its collaborators.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Day of the week, in the fixed order used by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

/// One value per weekday, serialised as `{"monday": .., ..., "sunday": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week<T> {
    pub monday: T,
    pub tuesday: T,
    pub wednesday: T,
    pub thursday: T,
    pub friday: T,
    pub saturday: T,
    pub sunday: T,
}

impl<T> Week<T> {
    pub fn get(&self, day: Weekday) -> &T {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn get_mut(&mut self, day: Weekday) -> &mut T {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    /// Build a week by evaluating `f` for each day in order.
    pub fn from_fn(mut f: impl FnMut(Weekday) -> T) -> Self {
        Self {
            monday: f(Weekday::Monday),
            tuesday: f(Weekday::Tuesday),
            wednesday: f(Weekday::Wednesday),
            thursday: f(Weekday::Thursday),
            friday: f(Weekday::Friday),
            saturday: f(Weekday::Saturday),
            sunday: f(Weekday::Sunday),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Week<U> {
        Week::from_fn(|day| f(self.get(day)))
    }
}

/// Opening interval for a single day. Times are kept as the model wrote them
/// (usually `HH:MM`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub name: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Mutable, partially-filled record for one candidate.
///
/// `None` means "never filled", which is distinct from an empty string.
/// Offerings and images only ever grow until the record is finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub opening_hours: Week<TimeInterval>,
    pub offerings: Vec<Offering>,
    pub images: Vec<ImageRef>,
}

impl PartialRecord {
    /// A fresh record with only the name known.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Public image entry of a finalized record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub caption: String,
    pub url: String,
    pub hashtags: Vec<String>,
}

/// Immutable public record for one venue.
///
/// Only the captioning pass touches it after creation, and only the
/// `caption`/`hashtags` of existing image entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRecord {
    pub name: String,
    pub address: String,
    /// Formatted as `<start>-<end>` in 24h `HHMM`, e.g. `1030-2100`.
    pub opening_hours: Week<String>,
    pub description: String,
    /// offering name → price
    pub offerings: IndexMap<String, String>,
    pub contact: String,
    /// image name → image data
    pub images: IndexMap<String, ImageData>,
    /// URLs that contributed to this record, in visitation order.
    pub citation: Vec<String>,
}

/// A venue or event name found during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    /// Page on which the name was first seen.
    pub source_url: String,
}

/// A single web search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Caption and hashtags produced for one image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDetails {
    pub caption: String,
    pub hashtags: Vec<String>,
}
