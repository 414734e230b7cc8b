//! Load orchestration.
//!
//! A load runs fetch → parse → aggregate to completion and produces an
//! immutable `DashboardView`. `Dashboard` publishes the newest completed load
//! and rejects results from loads that were superseded while in flight.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::constants::presentation::{REVIEW_TABLE_EXPORT_FILENAME, TRIP_TYPE_SERIES_LABEL};
use crate::data::ReviewRecord;
use crate::errors::DashboardError;
use crate::metrics::{CategoryProportions, category_proportions};
use crate::pagination::{PageWindow, Pager};
use crate::parser::{ParsedReviews, RowRejection, parse_reviews, parse_reviews_from_reader};
use crate::presentation::{
    ChartData, ReviewListItem, SentimentTrendChart, StatCard, category_chart,
    monthly_sentiment_chart, review_list_item, summary_cards,
};
use crate::stats::{
    DashboardStats, MonthlySentimentBucket, compute_monthly_sentiment, compute_stats,
};
use crate::tally::{CategoryCount, CategoryField, tally_by_field};
use crate::transport::{FileResource, ReviewResource};
use crate::types::LoadToken;

/// Everything the presentation layer needs from one data load.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardView {
    /// Summary numbers and the shared record sequence.
    pub stats: DashboardStats,
    /// Summary cards in display order.
    pub cards: Vec<StatCard>,
    /// Monthly buckets, oldest first.
    pub monthly_sentiment: Vec<MonthlySentimentBucket>,
    /// Line chart built from `monthly_sentiment`.
    pub trend_chart: SentimentTrendChart,
    /// Trip type tally in first-occurrence order.
    pub trip_types: Vec<CategoryCount>,
    /// Pie chart built from `trip_types`.
    pub trip_type_chart: ChartData,
    /// `None` when no records were loaded.
    pub trip_type_proportions: Option<CategoryProportions>,
    /// Rows dropped while parsing.
    pub rejected: Vec<RowRejection>,
    #[serde(skip)]
    page_size: usize,
    #[serde(skip)]
    max_visible_pages: usize,
}

/// One page of the review list.
#[derive(Clone, Debug, Serialize)]
pub struct ReviewPage {
    /// 0-based page shown.
    pub page: usize,
    /// Total number of pages.
    pub page_count: usize,
    /// Page links to render around `page`.
    pub window: PageWindow,
    /// Rows on this page, in input order.
    pub items: Vec<ReviewListItem>,
    /// Suggested file name for image export.
    pub export_filename: String,
}

/// Serialized view plus one page of reviews.
#[derive(Debug, Serialize)]
pub struct DashboardPayload<'a> {
    /// Dashboard structures, serialized inline.
    #[serde(flatten)]
    pub view: &'a DashboardView,
    /// Requested page of the review list.
    pub reviews: ReviewPage,
}

impl DashboardView {
    /// Derive every dashboard structure from parsed reviews.
    pub fn build(parsed: ParsedReviews, config: &DashboardConfig) -> Self {
        let ParsedReviews { records, rejected } = parsed;
        let records: Arc<[ReviewRecord]> = records.into();

        let monthly_sentiment = compute_monthly_sentiment(&records);
        let trip_types = tally_by_field(&records, CategoryField::TripType);
        let stats = compute_stats(records, &config.stats);

        Self {
            cards: summary_cards(&stats),
            trend_chart: monthly_sentiment_chart(&monthly_sentiment),
            trip_type_chart: category_chart(
                &trip_types,
                TRIP_TYPE_SERIES_LABEL,
                &config.palette,
            ),
            trip_type_proportions: category_proportions(&trip_types),
            stats,
            monthly_sentiment,
            trip_types,
            rejected,
            page_size: config.page_size,
            max_visible_pages: config.max_visible_pages,
        }
    }

    /// Full record sequence in input order.
    pub fn records(&self) -> &[ReviewRecord] {
        &self.stats.records
    }

    /// Number of rows dropped as malformed.
    pub fn dropped_count(&self) -> usize {
        self.rejected.len()
    }

    /// Pager over the review list, positioned on the first page.
    pub fn pager(&self) -> Result<Pager, DashboardError> {
        Pager::new(self.records().len(), self.page_size, self.max_visible_pages)
    }

    /// List rows for the pager's current page.
    pub fn review_page(&self, pager: &Pager) -> ReviewPage {
        ReviewPage {
            page: pager.current_page(),
            page_count: pager.page_count(),
            window: pager.visible_window(),
            items: pager
                .slice(self.records())
                .iter()
                .map(review_list_item)
                .collect(),
            export_filename: REVIEW_TABLE_EXPORT_FILENAME.to_string(),
        }
    }

    /// Renderer payload with review list page `page`.
    ///
    /// An out-of-range page falls back to the first page.
    pub fn payload(&self, page: usize) -> Result<DashboardPayload<'_>, DashboardError> {
        let mut pager = self.pager()?;
        if !pager.go_to(page) && page != 0 {
            debug!(page, page_count = pager.page_count(), "requested page out of range");
        }
        Ok(DashboardPayload {
            view: self,
            reviews: self.review_page(&pager),
        })
    }
}

/// Parse `text` and build a view, with no load sequencing.
pub fn build_view(text: &str, config: &DashboardConfig) -> Result<DashboardView, DashboardError> {
    config.validate()?;
    let parsed = parse_reviews(text, config.row_policy)?;
    Ok(DashboardView::build(parsed, config))
}

/// Which stage a failed load broke in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The resource could not be read.
    Io,
    /// The resource was read but its contents were not valid review data.
    Format,
    /// The dashboard configuration was rejected.
    Configuration,
    /// A newer load superseded this one.
    Stale,
}

impl From<&DashboardError> for FailureKind {
    fn from(err: &DashboardError) -> Self {
        match err {
            DashboardError::Io(_) | DashboardError::ResourceTimeout { .. } => Self::Io,
            DashboardError::Format { .. } => Self::Format,
            DashboardError::Configuration(_) => Self::Configuration,
            DashboardError::StaleLoad { .. } => Self::Stale,
        }
    }
}

/// What the presentation layer should currently show.
#[derive(Clone, Debug)]
pub enum DashboardState {
    /// No load has completed yet.
    Empty,
    /// Most recent successful load.
    Loaded(Arc<DashboardView>),
    /// Most recent load failed.
    Failed {
        /// Stage that failed.
        kind: FailureKind,
        /// User-facing error text.
        message: String,
    },
}

/// Issues monotonically increasing load tokens.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    issued: AtomicU64,
}

impl LoadSequencer {
    /// Start a new load; any earlier token becomes stale.
    pub fn begin(&self) -> LoadToken {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently issued token (`0` before the first load).
    pub fn latest(&self) -> LoadToken {
        self.issued.load(Ordering::SeqCst)
    }

    /// True when no load has started since `token`.
    pub fn is_current(&self, token: LoadToken) -> bool {
        token == self.latest()
    }
}

/// Top-level orchestrator owning the published dashboard state.
pub struct Dashboard {
    config: DashboardConfig,
    sequencer: LoadSequencer,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    /// Create an orchestrator after validating `config`.
    pub fn new(config: DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        Ok(Self {
            config,
            sequencer: LoadSequencer::default(),
            state: Mutex::new(DashboardState::Empty),
        })
    }

    /// Configuration applied to every load.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Snapshot of the published state.
    pub fn state(&self) -> DashboardState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Fetch, parse, and aggregate `resource`, then publish the result.
    ///
    /// Failures are published as `DashboardState::Failed` and returned. If a
    /// newer load started while this one was in flight, nothing is published
    /// and `DashboardError::StaleLoad` is returned.
    pub fn load(
        &self,
        resource: &dyn ReviewResource,
    ) -> Result<Arc<DashboardView>, DashboardError> {
        let token = self.sequencer.begin();
        debug!(token, resource = %resource.id(), "starting dashboard load");

        let outcome = resource
            .fetch()
            .and_then(|bytes| {
                parse_reviews_from_reader(bytes.as_slice(), self.config.row_policy)
            })
            .map(|parsed| Arc::new(DashboardView::build(parsed, &self.config)));
        self.commit(token, outcome)
    }

    /// Load a review CSV file, bounded by the configured timeout.
    pub fn load_file(
        &self,
        path: impl Into<PathBuf>,
    ) -> Result<Arc<DashboardView>, DashboardError> {
        let resource = FileResource::new(path).with_timeout(self.config.load_timeout);
        self.load(&resource)
    }

    /// Publish the outcome of load `token` unless a newer load has started.
    pub fn commit(
        &self,
        token: LoadToken,
        outcome: Result<Arc<DashboardView>, DashboardError>,
    ) -> Result<Arc<DashboardView>, DashboardError> {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !self.sequencer.is_current(token) {
            let latest = self.sequencer.latest();
            warn!(token, latest, "discarding stale dashboard load");
            return Err(DashboardError::StaleLoad { token, latest });
        }
        match outcome {
            Ok(view) => {
                info!(
                    token,
                    records = view.records().len(),
                    dropped = view.dropped_count(),
                    "dashboard load complete"
                );
                *state = DashboardState::Loaded(Arc::clone(&view));
                Ok(view)
            }
            Err(err) => {
                warn!(token, error = %err, "dashboard load failed");
                *state = DashboardState::Failed {
                    kind: FailureKind::from(&err),
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Start a load whose outcome will be supplied later through `commit`.
    pub fn begin_load(&self) -> LoadToken {
        self.sequencer.begin()
    }
}
