//! Aggregate sentiment statistics.
//!
//! Both entry points are pure: they read the record slice, build a fresh
//! result, and never touch shared state. Calling them twice on the same input
//! yields identical output.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{StatsConfig, TotalReviewsPolicy};
use crate::data::{ReviewRecord, Sentiment};
use crate::dates::{month_of, year_month_key};
use crate::types::YearMonth;

/// Summary statistics for one data load.
///
/// Built wholesale by `compute_stats` and never mutated afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardStats {
    /// Total review count under `TotalReviewsPolicy`.
    pub total_reviews: u64,
    /// Reviews with a stay strictly after the configured cutoff.
    pub new_reviews_count: usize,
    /// Share of positive reviews in `[0, 100]`.
    pub positive_percentage: f64,
    /// Share of negative reviews in `[0, 100]`.
    pub negative_percentage: f64,
    /// Full record sequence, shared with charts and the review list.
    #[serde(skip)]
    pub records: Arc<[ReviewRecord]>,
}

/// Sentiment counts for one calendar month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlySentimentBucket {
    /// `YYYY-MM` bucket key.
    pub year_month: YearMonth,
    /// Records labeled `Positive`.
    pub positive_count: u64,
    /// Records labeled `Negative`.
    pub negative_count: u64,
    /// Records in this month carrying any other label. Not charted.
    pub other_count: u64,
}

impl MonthlySentimentBucket {
    /// Number of records that fell into this month.
    pub fn record_count(&self) -> u64 {
        self.positive_count + self.negative_count + self.other_count
    }
}

/// Positive/negative tallies over a record slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SentimentTally {
    positive: u64,
    negative: u64,
    other: u64,
}

impl SentimentTally {
    fn add(&mut self, sentiment: &Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Other(_) => self.other += 1,
        }
    }
}

/// Derive summary statistics from the full record sequence.
pub fn compute_stats(records: Arc<[ReviewRecord]>, config: &StatsConfig) -> DashboardStats {
    let total_reviews = total_reviews(&records, config.total_reviews_policy);

    let new_reviews_count = records
        .iter()
        .filter(|record| record.stay_date > config.new_review_cutoff)
        .count();

    let mut tally = SentimentTally::default();
    for record in records.iter() {
        tally.add(&record.sentiment);
    }

    let classified = tally.positive + tally.negative;
    if classified > total_reviews {
        warn!(
            total_reviews,
            classified, "classified reviews exceed reported total; using classified count"
        );
    }
    let denominator = total_reviews.max(classified);

    let stats = DashboardStats {
        total_reviews,
        new_reviews_count,
        positive_percentage: percentage(tally.positive, denominator),
        negative_percentage: percentage(tally.negative, denominator),
        records,
    };
    debug!(
        total = stats.total_reviews,
        new = stats.new_reviews_count,
        positive = stats.positive_percentage,
        negative = stats.negative_percentage,
        "computed dashboard stats"
    );
    stats
}

/// Group records by stay month, ascending by calendar month.
pub fn compute_monthly_sentiment(records: &[ReviewRecord]) -> Vec<MonthlySentimentBucket> {
    let mut months: BTreeMap<(i32, u32), SentimentTally> = BTreeMap::new();
    for record in records {
        months
            .entry(month_of(record.stay_date))
            .or_default()
            .add(&record.sentiment);
    }
    months
        .into_iter()
        .map(|((year, month), tally)| MonthlySentimentBucket {
            year_month: year_month_key(year, month),
            positive_count: tally.positive,
            negative_count: tally.negative,
            other_count: tally.other,
        })
        .collect()
}

/// `count / total * 100`, or `0.0` when `total` is zero.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn total_reviews(records: &[ReviewRecord], policy: TotalReviewsPolicy) -> u64 {
    match policy {
        TotalReviewsPolicy::LastSequenceIndex => records
            .last()
            .map(|record| record.sequence_index)
            .unwrap_or(0),
        TotalReviewsPolicy::RecordCount => records.len() as u64,
    }
}
