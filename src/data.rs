use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::sentiment::{NEGATIVE, POSITIVE};
use crate::types::{CategoryLabel, SentimentLabel};

/// Pre-computed polarity label attached to a review.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    /// The `Positive` label.
    Positive,
    /// The `Negative` label.
    Negative,
    /// Any other label, kept verbatim.
    Other(SentimentLabel),
}

impl Sentiment {
    /// Classify a raw label. Matching is exact; `positive` is not `Positive`.
    pub fn from_label(label: &str) -> Self {
        match label {
            POSITIVE => Self::Positive,
            NEGATIVE => Self::Negative,
            other => Self::Other(other.to_string()),
        }
    }

    /// Label as it appeared in the input.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => POSITIVE,
            Self::Negative => NEGATIVE,
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Sentiment {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<Sentiment> for String {
    fn from(value: Sentiment) -> Self {
        match value {
            Sentiment::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// One row of review input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Original row position from the unlabeled leading column.
    pub sequence_index: u64,
    /// Parsed stay date.
    pub stay_date: NaiveDate,
    /// Free-text review body, possibly empty.
    pub review_text: String,
    /// Traveler purpose category.
    pub trip_type: CategoryLabel,
    /// Provenance link, passed through untouched.
    pub source_url: String,
    /// Polarity label assigned upstream.
    pub sentiment: Sentiment,
    /// Review platform name.
    pub platform: CategoryLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_labels_match_exactly() {
        assert_eq!(Sentiment::from_label("Positive"), Sentiment::Positive);
        assert_eq!(Sentiment::from_label("Negative"), Sentiment::Negative);
        assert_eq!(
            Sentiment::from_label("positive"),
            Sentiment::Other("positive".to_string())
        );
        assert_eq!(Sentiment::from_label("Neutral").as_str(), "Neutral");
    }

    #[test]
    fn sentiment_serializes_as_raw_label() {
        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
        let other: Sentiment = serde_json::from_str("\"Mixed\"").unwrap();
        assert_eq!(other, Sentiment::Other("Mixed".to_string()));
    }
}
