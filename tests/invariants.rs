use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use review_dashboard::config::StatsConfig;
use review_dashboard::dates::year_month_key;
use review_dashboard::pagination::{Pager, page_count, page_slice};
use review_dashboard::{
    CategoryField, ReviewRecord, Sentiment, compute_monthly_sentiment, compute_stats,
    monthly_sentiment_chart, tally_by_field,
};

const SENTIMENTS: [&str; 4] = ["Positive", "Negative", "Neutral", "Positive"];
const TRIP_TYPES: [&str; 5] = ["Couples", "Solo", "Family", "Business", "Friends"];

/// Deterministic pseudo-random dataset; `seed` varies dates, labels, and order.
fn build_records(seed: u64, len: usize) -> Vec<ReviewRecord> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };
    let base = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    (0..len)
        .map(|idx| ReviewRecord {
            sequence_index: idx as u64 + 1,
            stay_date: base + chrono::Days::new((next() % 900) as u64),
            review_text: format!("review {idx}"),
            trip_type: TRIP_TYPES[next() % TRIP_TYPES.len()].to_string(),
            source_url: format!("https://example.test/{idx}"),
            sentiment: Sentiment::from_label(SENTIMENTS[next() % SENTIMENTS.len()]),
            platform: "TripAdvisor".to_string(),
        })
        .collect()
}

#[test]
fn percentages_are_bounded_for_non_empty_inputs() {
    for seed in 0..20 {
        for len in [1usize, 2, 7, 50, 333] {
            let records: Arc<[ReviewRecord]> = build_records(seed, len).into();
            let stats = compute_stats(records, &StatsConfig::default());
            assert!((0.0..=100.0).contains(&stats.positive_percentage));
            assert!((0.0..=100.0).contains(&stats.negative_percentage));
            assert!(stats.positive_percentage + stats.negative_percentage <= 100.0 + 1e-9);
            assert_eq!(stats.total_reviews, len as u64);
        }
    }
}

#[test]
fn monthly_sentiment_is_idempotent() {
    let records = build_records(7, 250);
    let first = compute_monthly_sentiment(&records);
    let second = compute_monthly_sentiment(&records);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn every_record_lands_in_exactly_its_stay_month() {
    let records = build_records(11, 400);
    let buckets = compute_monthly_sentiment(&records);

    let mut expected: HashMap<String, u64> = HashMap::new();
    for record in &records {
        let key = year_month_key(record.stay_date.year(), record.stay_date.month());
        *expected.entry(key).or_insert(0) += 1;
    }

    assert_eq!(buckets.len(), expected.len());
    for bucket in &buckets {
        assert_eq!(Some(&bucket.record_count()), expected.get(&bucket.year_month));
    }
    let total: u64 = buckets.iter().map(|bucket| bucket.record_count()).sum();
    assert_eq!(total, records.len() as u64);
}

#[test]
fn monthly_buckets_ascend_by_calendar_month() {
    let records = build_records(3, 300);
    let buckets = compute_monthly_sentiment(&records);
    let keys: Vec<&String> = buckets.iter().map(|bucket| &bucket.year_month).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn unrecognized_sentiments_are_not_charted() {
    let records = build_records(5, 200);
    let buckets = compute_monthly_sentiment(&records);
    let charted: u64 = buckets
        .iter()
        .map(|bucket| bucket.positive_count + bucket.negative_count)
        .sum();
    let recognized = records
        .iter()
        .filter(|record| !matches!(record.sentiment, Sentiment::Other(_)))
        .count() as u64;
    assert_eq!(charted, recognized);
}

#[test]
fn tally_counts_sum_to_record_count() {
    for seed in 0..10 {
        let records = build_records(seed, 123);
        for field in [
            CategoryField::TripType,
            CategoryField::Platform,
            CategoryField::Sentiment,
        ] {
            let tally = tally_by_field(&records, field);
            let sum: u64 = tally.iter().map(|entry| entry.count).sum();
            assert_eq!(sum, records.len() as u64);
        }
    }
}

#[test]
fn chart_labels_align_with_series() {
    let records = build_records(13, 180);
    let chart = monthly_sentiment_chart(&compute_monthly_sentiment(&records));
    assert!(chart.data.is_aligned());
    for dataset in &chart.data.datasets {
        assert_eq!(dataset.data.len(), chart.data.labels.len());
    }
}

#[test]
fn pagination_slices_never_overrun_and_cover_everything() {
    let items: Vec<usize> = (0..17).collect();
    for page_size in 1..=20 {
        let pages = page_count(items.len(), page_size);
        assert_eq!(pages, items.len().div_ceil(page_size));

        let mut seen = Vec::new();
        for page in 0..pages + 2 {
            let slice = page_slice(&items, page, page_size);
            assert!(slice.len() <= page_size);
            seen.extend_from_slice(slice);
        }
        assert_eq!(seen, items);
    }
}

#[test]
fn pager_walks_every_page_in_order() {
    let items: Vec<usize> = (0..10).collect();
    let mut pager = Pager::new(items.len(), 3, 5).unwrap();
    let mut seen = pager.slice(&items).to_vec();
    while pager.next_page() {
        seen.extend_from_slice(pager.slice(&items));
    }
    assert_eq!(seen, items);
    assert_eq!(pager.current_page(), 3);
}

#[test]
fn reference_example_matches() {
    let date = |d: u32, m: u32| NaiveDate::from_ymd_opt(2023, m, d).unwrap();
    let make = |seq: u64, stay_date: NaiveDate, sentiment: &str| ReviewRecord {
        sequence_index: seq,
        stay_date,
        review_text: String::new(),
        trip_type: "Couples".to_string(),
        source_url: String::new(),
        sentiment: Sentiment::from_label(sentiment),
        platform: String::new(),
    };
    let records = vec![
        make(1, date(1, 1), "Positive"),
        make(2, date(15, 1), "Negative"),
        make(3, date(2, 2), "Positive"),
    ];

    let buckets = compute_monthly_sentiment(&records);
    let series: Vec<(&str, u64, u64)> = buckets
        .iter()
        .map(|b| (b.year_month.as_str(), b.positive_count, b.negative_count))
        .collect();
    assert_eq!(series, vec![("2023-01", 1, 1), ("2023-02", 1, 0)]);

    let stats = compute_stats(records.into(), &StatsConfig::default());
    assert_eq!(stats.total_reviews, 3);
    assert_eq!(format!("{:.2}", stats.positive_percentage), "66.67");
    assert_eq!(format!("{:.2}", stats.negative_percentage), "33.33");

    let empty = compute_stats(Vec::new().into(), &StatsConfig::default());
    assert_eq!(empty.total_reviews, 0);
    assert_eq!(empty.positive_percentage, 0.0);
    assert_eq!(empty.negative_percentage, 0.0);
}
