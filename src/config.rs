use std::time::Duration;

use chrono::NaiveDate;

use crate::constants::dates::DEFAULT_NEW_REVIEW_CUTOFF;
use crate::constants::loading::DEFAULT_LOAD_TIMEOUT;
use crate::constants::pagination::{DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE};
use crate::constants::presentation::CATEGORY_PALETTE;
use crate::errors::DashboardError;
use crate::types::CssColor;

/// How `total_reviews` is derived from the record sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TotalReviewsPolicy {
    /// Use the sequence index of the last record (the data source's running count).
    #[default]
    LastSequenceIndex,
    /// Use the number of parsed records.
    RecordCount,
}

/// What the parser does with a row it cannot type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Skip the row and report it in `ParsedReviews::rejected`.
    #[default]
    DropMalformed,
    /// Fail the whole load on the first malformed row.
    Strict,
}

/// Aggregation settings.
#[derive(Clone, Debug)]
pub struct StatsConfig {
    /// Stays strictly after this date count as new reviews.
    pub new_review_cutoff: NaiveDate,
    /// Source of the total review count.
    pub total_reviews_policy: TotalReviewsPolicy,
}

impl Default for StatsConfig {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_NEW_REVIEW_CUTOFF;
        Self {
            new_review_cutoff: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            total_reviews_policy: TotalReviewsPolicy::default(),
        }
    }
}

/// Top-level dashboard configuration.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    /// Aggregation settings.
    pub stats: StatsConfig,
    /// Malformed row handling.
    pub row_policy: RowPolicy,
    /// Reviews per list page.
    pub page_size: usize,
    /// Number of page links shown by the pager.
    pub max_visible_pages: usize,
    /// Upper bound on reading the review resource; `None` waits indefinitely.
    pub load_timeout: Option<Duration>,
    /// Colors assigned to categories, cycled when there are more categories than colors.
    pub palette: Vec<CssColor>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            stats: StatsConfig::default(),
            row_policy: RowPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            load_timeout: Some(DEFAULT_LOAD_TIMEOUT),
            palette: CATEGORY_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    /// Override the new-review cutoff date.
    pub fn with_new_review_cutoff(mut self, cutoff: NaiveDate) -> Self {
        self.stats.new_review_cutoff = cutoff;
        self
    }

    /// Override how the total review count is derived.
    pub fn with_total_reviews_policy(mut self, policy: TotalReviewsPolicy) -> Self {
        self.stats.total_reviews_policy = policy;
        self
    }

    /// Override malformed row handling.
    pub fn with_row_policy(mut self, row_policy: RowPolicy) -> Self {
        self.row_policy = row_policy;
        self
    }

    /// Override reviews per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the resource read timeout.
    pub fn with_load_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Replace the category palette.
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CssColor>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    /// Reject settings that would make paging or coloring meaningless.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.page_size == 0 {
            return Err(DashboardError::Configuration(
                "page_size must be greater than zero".to_string(),
            ));
        }
        if self.max_visible_pages == 0 {
            return Err(DashboardError::Configuration(
                "max_visible_pages must be greater than zero".to_string(),
            ));
        }
        if self.palette.is_empty() {
            return Err(DashboardError::Configuration(
                "palette must contain at least one color".to_string(),
            ));
        }
        Ok(())
    }
}
