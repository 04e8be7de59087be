//! Target shapes shown to the model, and the field descriptors the parser
//! coerces against.

/// Leading character of every placeholder value in the templates below.
/// A model answer starting with it is an echo of the template, not data.
pub const PLACEHOLDER_SENTINEL: char = '<';

/// Template for one venue record, as shown to the model.
pub const VENUE_RECORD_TEMPLATE: &str = r#"{
    "name": "<name of location>",
    "address": "<address of the location>",
    "description": "<detailed description of the location>",
    "contact": "<contact number with the format '+65-1234-5678'>",
    "offerings": [
        {
            "name": "<name of product or service>",
            "price": "<price of product or service>"
        }
    ],
    "images": [
        {
            "name": "<image_name>",
            "url": "<image_url>"
        }
    ],
    "opening_hours": {
        "monday": {"start": "<start_time formatted as HH:MM>", "end": "<end_time formatted as HH:MM>"},
        "tuesday": {"start": "<start_time formatted as HH:MM>", "end": "<end_time formatted as HH:MM>"},
        "wednesday": {"start": "<start_time formatted as HH:MM>", "end": "<end_time formatted as HH:MM>"},
        "thursday": {"start": "<start_time formatted as HH:MM>", "end": "<end_time formatted as HH:MM>"},
        "friday": {"start": "<start_time formatted as HH:MM>", "end": "<end_time formatted as HH:MM>"},
        "saturday": {"start": "<start_time formatted as HH:MM>", "end": "<end_time formatted as HH:MM>"},
        "sunday": {"start": "<start_time formatted as HH:MM>", "end": "<end_time formatted as HH:MM>"}
    }
}"#;

/// Template for a caption answer.
pub const IMAGE_DETAILS_TEMPLATE: &str = r#"{
    "caption": "<image_caption>",
    "hashtags": [
        "<image_hashtag>"
    ]
}"#;

/// Shape of a single top-level field in a venue record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Nullable string.
    Text,
    /// Weekday → `{start, end}` of nullable strings.
    Hours,
    /// List of `{name, price}`.
    Offerings,
    /// List of `{name, url, hashtags}`.
    Images,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Every field of a venue record fragment, in template order.
pub const VENUE_RECORD_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "address",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "description",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "contact",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "offerings",
        kind: FieldKind::Offerings,
    },
    FieldSpec {
        name: "images",
        kind: FieldKind::Images,
    },
    FieldSpec {
        name: "opening_hours",
        kind: FieldKind::Hours,
    },
];
