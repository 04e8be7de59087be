//! Core venue types and the deterministic parts of extraction: parsing model
//! output, merging partial records, and finalizing them.

pub mod finalize;
pub mod merge;
pub mod parser;
pub mod record;
pub mod schema;

pub use finalize::{finalize, format_hours};
pub use merge::{MergeOutcome, merge};
pub use parser::{
    JsonShape, extract_json, parse_image_details, parse_listing, parse_record_fragment,
    parse_string_list,
};
pub use record::{
    Candidate, FinalRecord, ImageData, ImageDetails, ImageRef, Offering, PartialRecord, SearchHit,
    TimeInterval, Week, Weekday,
};
