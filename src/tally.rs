use indexmap::IndexMap;
use serde::Serialize;

use crate::data::ReviewRecord;
use crate::types::CategoryLabel;

/// Categorical review field that can be tallied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryField {
    /// Traveler purpose (`trip_type` column).
    #[default]
    TripType,
    /// Review platform (`Platform` column).
    Platform,
    /// The raw sentiment label.
    Sentiment,
}

impl CategoryField {
    /// Borrow this field's value from a record.
    pub fn value_of<'a>(&self, record: &'a ReviewRecord) -> &'a str {
        match self {
            Self::TripType => &record.trip_type,
            Self::Platform => &record.platform,
            Self::Sentiment => record.sentiment.as_str(),
        }
    }
}

/// Occurrence count for one category label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category label as it appeared in the input.
    pub label: CategoryLabel,
    /// Records carrying `label`.
    pub count: u64,
}

/// Count each distinct value of `field`, in order of first occurrence.
///
/// Labels are compared byte-for-byte: `Solo` and `solo ` are different categories.
pub fn tally_by_field(records: &[ReviewRecord], field: CategoryField) -> Vec<CategoryCount> {
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for record in records {
        *counts.entry(field.value_of(record)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
        })
        .collect()
}
