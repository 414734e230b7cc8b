//! Reshaping of aggregation output into renderer payloads.
//!
//! Nothing here counts or filters records; every function maps an already
//! computed structure onto the `{ labels, datasets: [{ label, data }] }` shape
//! consumed by the chart renderer, keeping `labels[i]` aligned with every
//! dataset's `data[i]`.

use serde::Serialize;

use crate::constants::dates::STAY_DATE_FORMAT;
use crate::constants::presentation::{
    CARD_NEGATIVE_REVIEWS, CARD_NEW_REVIEWS, CARD_POSITIVE_REVIEWS, CARD_TOTAL_REVIEWS,
    CATEGORY_BORDER_WIDTH, NEGATIVE_BORDER, NEGATIVE_FILL, NEGATIVE_SERIES_LABEL,
    POSITIVE_BORDER, POSITIVE_FILL, POSITIVE_SERIES_LABEL, TREND_EXPORT_FILENAME,
    TREND_X_AXIS_TITLE, TREND_Y_AXIS_TITLE,
};
use crate::data::{ReviewRecord, Sentiment};
use crate::stats::{DashboardStats, MonthlySentimentBucket};
use crate::tally::CategoryCount;
use crate::text::{is_expandable, review_preview};
use crate::types::{CategoryLabel, CssColor, DisplayLabel};

/// Background color for a dataset: one color, or one per data point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DatasetColors {
    /// One color for the whole series.
    Single(CssColor),
    /// One color per data point, aligned with `data`.
    PerPoint(Vec<CssColor>),
}

/// One series handed to the chart renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    /// Series name shown in the legend.
    pub label: DisplayLabel,
    /// One value per chart label.
    pub data: Vec<u64>,
    /// Line or slice border color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<CssColor>,
    /// Fill color, or one color per slice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<DatasetColors>,
    /// Fill the area under a line series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    /// Slice border width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

impl ChartDataset {
    /// Unstyled dataset.
    pub fn new(label: impl Into<DisplayLabel>, data: Vec<u64>) -> Self {
        Self {
            label: label.into(),
            data,
            border_color: None,
            background_color: None,
            fill: None,
            border_width: None,
        }
    }
}

/// Chart renderer input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    /// X axis or slice labels.
    pub labels: Vec<DisplayLabel>,
    /// Series, each aligned with `labels`.
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    /// True when every dataset has exactly one value per label.
    pub fn is_aligned(&self) -> bool {
        self.datasets
            .iter()
            .all(|dataset| dataset.data.len() == self.labels.len())
    }
}

/// Line chart of monthly sentiment with its axis titles.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentTrendChart {
    /// Labels and series.
    pub data: ChartData,
    /// X axis title.
    pub x_axis_title: DisplayLabel,
    /// Y axis title.
    pub y_axis_title: DisplayLabel,
    /// Suggested file name for image export.
    pub export_filename: String,
}

/// One summary card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatCard {
    /// Card heading.
    pub title: DisplayLabel,
    /// Pre-formatted value, e.g. `66.67%`.
    pub value: String,
}

/// Badge styling class for a review's sentiment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBadge {
    /// Review labeled `Positive`.
    Positive,
    /// Review labeled `Negative`.
    Negative,
    /// Any label other than `Positive` or `Negative`.
    Neutral,
}

impl From<&Sentiment> for SentimentBadge {
    fn from(value: &Sentiment) -> Self {
        match value {
            Sentiment::Positive => Self::Positive,
            Sentiment::Negative => Self::Negative,
            Sentiment::Other(_) => Self::Neutral,
        }
    }
}

/// Review list row as displayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReviewListItem {
    /// Row index from the input.
    pub sequence_index: u64,
    /// Review platform name.
    pub platform: CategoryLabel,
    /// Stay date in the input's `DD-MM-YYYY` layout.
    pub stay_date: String,
    /// Sentiment label as it appeared in the input.
    pub sentiment: String,
    /// Badge style for `sentiment`.
    pub badge: SentimentBadge,
    /// Traveler purpose category.
    pub trip_type: CategoryLabel,
    /// Full review text.
    pub text: String,
    /// Single-line, shortened form of `text`.
    pub preview: String,
    /// Whether the list should offer a "See More" toggle.
    pub expandable: bool,
}

/// Build the monthly positive/negative line chart.
pub fn monthly_sentiment_chart(buckets: &[MonthlySentimentBucket]) -> SentimentTrendChart {
    let labels = buckets
        .iter()
        .map(|bucket| bucket.year_month.clone())
        .collect();
    let positive = buckets.iter().map(|bucket| bucket.positive_count).collect();
    let negative = buckets.iter().map(|bucket| bucket.negative_count).collect();

    SentimentTrendChart {
        data: ChartData {
            labels,
            datasets: vec![
                styled_line(POSITIVE_SERIES_LABEL, positive, POSITIVE_BORDER, POSITIVE_FILL),
                styled_line(NEGATIVE_SERIES_LABEL, negative, NEGATIVE_BORDER, NEGATIVE_FILL),
            ],
        },
        x_axis_title: TREND_X_AXIS_TITLE.to_string(),
        y_axis_title: TREND_Y_AXIS_TITLE.to_string(),
        export_filename: TREND_EXPORT_FILENAME.to_string(),
    }
}

/// Build a proportional (pie) chart from a category tally.
///
/// Colors are taken from `palette` by position, wrapping around when there are
/// more categories than colors. An empty palette leaves slices uncolored.
pub fn category_chart(
    counts: &[CategoryCount],
    label: impl Into<DisplayLabel>,
    palette: &[CssColor],
) -> ChartData {
    let labels = counts.iter().map(|entry| entry.label.clone()).collect();
    let data = counts.iter().map(|entry| entry.count).collect();
    let colors: Vec<CssColor> = (0..counts.len())
        .filter_map(|idx| palette_color(palette, idx).cloned())
        .collect();

    let mut dataset = ChartDataset::new(label, data);
    if !colors.is_empty() {
        dataset.background_color = Some(DatasetColors::PerPoint(colors));
    }
    dataset.border_width = Some(CATEGORY_BORDER_WIDTH);

    ChartData {
        labels,
        datasets: vec![dataset],
    }
}

/// Cyclic palette lookup.
pub fn palette_color(palette: &[CssColor], idx: usize) -> Option<&CssColor> {
    if palette.is_empty() {
        return None;
    }
    palette.get(idx % palette.len())
}

/// Format a percentage with two decimals, e.g. `66.67%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// The four summary cards in display order.
pub fn summary_cards(stats: &DashboardStats) -> Vec<StatCard> {
    vec![
        StatCard {
            title: CARD_TOTAL_REVIEWS.to_string(),
            value: stats.total_reviews.to_string(),
        },
        StatCard {
            title: CARD_NEW_REVIEWS.to_string(),
            value: stats.new_reviews_count.to_string(),
        },
        StatCard {
            title: CARD_POSITIVE_REVIEWS.to_string(),
            value: format_percentage(stats.positive_percentage),
        },
        StatCard {
            title: CARD_NEGATIVE_REVIEWS.to_string(),
            value: format_percentage(stats.negative_percentage),
        },
    ]
}

/// Map a record to its list row.
pub fn review_list_item(record: &ReviewRecord) -> ReviewListItem {
    ReviewListItem {
        sequence_index: record.sequence_index,
        platform: record.platform.clone(),
        stay_date: record.stay_date.format(STAY_DATE_FORMAT).to_string(),
        sentiment: record.sentiment.as_str().to_string(),
        badge: SentimentBadge::from(&record.sentiment),
        trip_type: record.trip_type.clone(),
        text: record.review_text.clone(),
        preview: review_preview(&record.review_text),
        expandable: is_expandable(&record.review_text),
    }
}

fn styled_line(label: &str, data: Vec<u64>, border: &str, fill: &str) -> ChartDataset {
    ChartDataset {
        border_color: Some(border.to_string()),
        background_color: Some(DatasetColors::Single(fill.to_string())),
        fill: Some(true),
        ..ChartDataset::new(label, data)
    }
}
