//! Field-level reconciliation of two partial records.
//!
//! Scalars and opening-hour sub-fields take the newer value only when it is
//! present and non-empty. Offerings and images are appended verbatim; they are
//! deduplicated later, at finalization.

use crate::record::{PartialRecord, TimeInterval, Weekday};

/// Result of merging a fragment into an accumulated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Whether `merged` differs structurally from the record before the merge.
    pub changed: bool,
    pub merged: PartialRecord,
}

/// Merge `new` into `old`.
pub fn merge(old: &PartialRecord, new: &PartialRecord) -> MergeOutcome {
    let mut merged = old.clone();

    overwrite(&mut merged.name, &new.name);
    overwrite(&mut merged.address, &new.address);
    overwrite(&mut merged.contact, &new.contact);
    overwrite(&mut merged.description, &new.description);

    for day in Weekday::ALL {
        merge_interval(merged.opening_hours.get_mut(day), new.opening_hours.get(day));
    }

    merged.offerings.extend(new.offerings.iter().cloned());
    merged.images.extend(new.images.iter().cloned());

    MergeOutcome {
        changed: merged != *old,
        merged,
    }
}

fn merge_interval(old: &mut TimeInterval, new: &TimeInterval) {
    overwrite(&mut old.start, &new.start);
    overwrite(&mut old.end, &new.end);
}

fn overwrite(slot: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = incoming
        && !value.is_empty()
    {
        *slot = Some(value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ImageRef, Offering};

    fn offering(name: &str, price: &str) -> Offering {
        Offering {
            name: Some(name.into()),
            price: Some(price.into()),
        }
    }

    fn image(name: &str, url: &str) -> ImageRef {
        ImageRef {
            name: Some(name.into()),
            url: Some(url.into()),
            hashtags: Vec::new(),
        }
    }

    #[test]
    fn scalar_overwritten_only_by_non_empty() {
        let mut old = PartialRecord::named("Ramen House");
        old.address = Some("1 Orchard Road".into());
        old.contact = Some("+65-1111-2222".into());

        let mut new = PartialRecord::default();
        new.address = Some(String::new());
        new.contact = Some("+65-3333-4444".into());
        new.description = Some("Late-night noodles".into());

        let out = merge(&old, &new);
        assert!(out.changed);
        assert_eq!(out.merged.name.as_deref(), Some("Ramen House"));
        assert_eq!(out.merged.address.as_deref(), Some("1 Orchard Road"));
        assert_eq!(out.merged.contact.as_deref(), Some("+65-3333-4444"));
        assert_eq!(out.merged.description.as_deref(), Some("Late-night noodles"));
    }

    #[test]
    fn null_weekday_leaves_old_untouched() {
        let mut old = PartialRecord::named("A");
        old.opening_hours.monday = TimeInterval {
            start: Some("09:00".into()),
            end: Some("18:00".into()),
        };
        let new = PartialRecord::default();

        let out = merge(&old, &new);
        assert!(!out.changed);
        assert_eq!(out.merged.opening_hours.monday, old.opening_hours.monday);
    }

    #[test]
    fn weekday_sub_fields_merge_independently() {
        let mut old = PartialRecord::named("A");
        old.opening_hours.friday.start = Some("10:00".into());
        let mut new = PartialRecord::default();
        new.opening_hours.friday.start = Some(String::new());
        new.opening_hours.friday.end = Some("23:00".into());

        let out = merge(&old, &new);
        assert!(out.changed);
        assert_eq!(out.merged.opening_hours.friday.start.as_deref(), Some("10:00"));
        assert_eq!(out.merged.opening_hours.friday.end.as_deref(), Some("23:00"));
    }

    #[test]
    fn sequences_accumulate_without_dedup() {
        let mut old = PartialRecord::named("A");
        old.offerings = vec![offering("Shoyu", "$12")];
        old.images = vec![image("bowl", "https://x/1.jpg")];
        let mut new = PartialRecord::default();
        new.offerings = vec![offering("Shoyu", "$12"), offering("Gyoza", "$6")];
        new.images = vec![image("bowl", "https://x/1.jpg")];

        let out = merge(&old, &new);
        assert!(out.changed);
        assert_eq!(
            out.merged.offerings.len(),
            old.offerings.len() + new.offerings.len()
        );
        assert_eq!(out.merged.images.len(), old.images.len() + new.images.len());
        assert_eq!(out.merged.offerings[0], offering("Shoyu", "$12"));
        assert_eq!(out.merged.offerings[2], offering("Gyoza", "$6"));
    }

    #[test]
    fn repeated_scalar_merge_reports_no_change() {
        let old = PartialRecord::named("A");
        let mut new = PartialRecord::default();
        new.address = Some("2 Beach Road".into());
        new.opening_hours.sunday.end = Some("17:00".into());

        let first = merge(&old, &new);
        assert!(first.changed);
        let second = merge(&first.merged, &new);
        assert!(!second.changed);
        assert_eq!(second.merged, first.merged);
    }

    #[test]
    fn identical_values_are_not_a_change() {
        let mut old = PartialRecord::named("A");
        old.address = Some("2 Beach Road".into());
        let mut new = PartialRecord::default();
        new.name = Some("A".into());
        new.address = Some("2 Beach Road".into());

        assert!(!merge(&old, &new).changed);
    }
}
