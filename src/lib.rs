#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line report runner shared by the demo binary.
pub mod cli;
/// Dashboard configuration types.
pub mod config;
/// Centralized constants: columns, formats, labels, and defaults.
pub mod constants;
/// Load orchestration and published dashboard state.
pub mod dashboard;
/// Review record types.
pub mod data;
/// Stay-date parsing and month bucketing.
pub mod dates;
/// Category proportion helpers.
pub mod metrics;
/// Review list paging.
pub mod pagination;
/// CSV review parsing.
pub mod parser;
/// Chart and list payload shaping.
pub mod presentation;
/// Summary statistics and monthly sentiment series.
pub mod stats;
/// Categorical field tallies.
pub mod tally;
/// Review text helpers.
pub mod text;
/// Raw resource transports (filesystem and in-memory).
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{DashboardConfig, RowPolicy, StatsConfig, TotalReviewsPolicy};
pub use dashboard::{
    Dashboard, DashboardPayload, DashboardState, DashboardView, FailureKind, LoadSequencer,
    ReviewPage, build_view,
};
pub use data::{ReviewRecord, Sentiment};
pub use errors::DashboardError;
pub use metrics::{CategoryProportions, CategoryShare, category_proportions};
pub use pagination::{PageWindow, Pager, page_count, page_slice};
pub use parser::{ParsedReviews, RowRejection, parse_reviews, parse_reviews_from_reader};
pub use presentation::{
    ChartData, ChartDataset, DatasetColors, ReviewListItem, SentimentBadge, SentimentTrendChart,
    StatCard, category_chart, monthly_sentiment_chart, summary_cards,
};
pub use stats::{DashboardStats, MonthlySentimentBucket, compute_monthly_sentiment, compute_stats};
pub use tally::{CategoryCount, CategoryField, tally_by_field};
pub use transport::{FileResource, InMemoryResource, ReviewResource};
pub use types::{CategoryLabel, CssColor, DisplayLabel, LoadToken, YearMonth};
