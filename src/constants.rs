/// Column names expected in the review CSV header.
pub mod columns {
    /// Leading unlabeled column carrying the row sequence index.
    pub const SEQUENCE_INDEX: &str = "";
    /// Stay date column, formatted `DD-MM-YYYY`.
    pub const DATE_OF_STAY: &str = "date_of_stay";
    /// Free-text review body.
    pub const REVIEW: &str = "review";
    /// Traveler purpose category.
    pub const TRIP_TYPE: &str = "trip_type";
    /// Provenance link.
    pub const HOTEL_URL: &str = "Hotel URL";
    /// Pre-computed sentiment label.
    pub const SENTIMENT: &str = "Sentiment";
    /// Review platform name.
    pub const PLATFORM: &str = "Platform";
    /// Required header order.
    pub const ALL: [&str; 7] = [
        SEQUENCE_INDEX,
        DATE_OF_STAY,
        REVIEW,
        TRIP_TYPE,
        HOTEL_URL,
        SENTIMENT,
        PLATFORM,
    ];
}

/// Date formats on both sides of stay-date parsing.
pub mod dates {
    /// Input format of `date_of_stay` values (for example `15-01-2023`).
    pub const STAY_DATE_FORMAT: &str = "%d-%m-%Y";
    /// Output format of monthly bucket keys (for example `2023-01`).
    pub const YEAR_MONTH_FORMAT: &str = "%Y-%m";
    /// Default cutoff after which a stay counts as a new review (January 7th).
    pub const DEFAULT_NEW_REVIEW_CUTOFF: (i32, u32, u32) = (2023, 1, 7);
}

/// Recognized sentiment labels.
pub mod sentiment {
    /// Label for positive reviews.
    pub const POSITIVE: &str = "Positive";
    /// Label for negative reviews.
    pub const NEGATIVE: &str = "Negative";
}

/// Labels and colors used by chart payloads.
pub mod presentation {
    /// Dataset label for the positive monthly series.
    pub const POSITIVE_SERIES_LABEL: &str = "Positive Reviews";
    /// Dataset label for the negative monthly series.
    pub const NEGATIVE_SERIES_LABEL: &str = "Negative Reviews";
    /// Dataset label for the trip type pie chart.
    pub const TRIP_TYPE_SERIES_LABEL: &str = "Travel Types";
    /// X axis title of the sentiment trend chart.
    pub const TREND_X_AXIS_TITLE: &str = "Month-Year";
    /// Y axis title of the sentiment trend chart.
    pub const TREND_Y_AXIS_TITLE: &str = "Number of Reviews";

    /// Line color of the positive series.
    pub const POSITIVE_BORDER: &str = "rgba(75, 192, 192, 1)";
    /// Area fill under the positive series.
    pub const POSITIVE_FILL: &str = "rgba(75, 192, 192, 0.2)";
    /// Line color of the negative series.
    pub const NEGATIVE_BORDER: &str = "rgba(255, 99, 132, 1)";
    /// Area fill under the negative series.
    pub const NEGATIVE_FILL: &str = "rgba(255, 99, 132, 0.2)";

    /// Border width applied to proportional chart slices.
    pub const CATEGORY_BORDER_WIDTH: u32 = 1;

    /// Default category palette, assigned cyclically by position.
    pub const CATEGORY_PALETTE: [&str; 8] = [
        "rgba(241, 94, 140, 0.6)",
        "rgba(62, 13, 182, 0.2)",
        "rgba(116, 222, 226, 0.8)",
        "rgba(125, 201, 91, 0.1)",
        "rgba(115, 15, 36, 0.7)",
        "rgba(58, 19, 200, 0.7)",
        "rgba(48, 193, 5, 0.9)",
        "rgba(115, 15, 36, 0.7)",
    ];

    /// Title of the first summary card.
    pub const CARD_TOTAL_REVIEWS: &str = "Total Reviews";
    /// Title of the second summary card.
    pub const CARD_NEW_REVIEWS: &str = "New Reviews";
    /// Title of the third summary card.
    pub const CARD_POSITIVE_REVIEWS: &str = "Positive Reviews";
    /// Title of the fourth summary card.
    pub const CARD_NEGATIVE_REVIEWS: &str = "Negative Reviews";

    /// File name suggested to the image exporter for the trend chart.
    pub const TREND_EXPORT_FILENAME: &str = "sentiment_trends.png";
    /// File name suggested to the image exporter for the review list.
    pub const REVIEW_TABLE_EXPORT_FILENAME: &str = "review_table.png";
}

/// Review list paging defaults.
pub mod pagination {
    /// Reviews shown per page.
    pub const DEFAULT_PAGE_SIZE: usize = 3;
    /// Page links shown at once in the pager.
    pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;
}

/// Review list text handling.
pub mod text {
    /// Reviews longer than this many characters get a "See More" toggle.
    pub const EXPANDABLE_REVIEW_CHARS: usize = 100;
}

/// Resource loading defaults.
pub mod loading {
    use std::time::Duration;

    /// Upper bound on reading the review file.
    pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);
    /// Log message used when malformed rows are skipped.
    pub const SKIP_MALFORMED_MSG: &str = "skipping malformed review row";
}
