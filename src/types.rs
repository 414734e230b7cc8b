/// Calendar month bucket key.
/// Example: `2023-01`
pub type YearMonth = String;
/// Value of a categorical review field.
/// Examples: `Couples`, `Solo traveler`, `TripAdvisor`
pub type CategoryLabel = String;
/// Raw sentiment label as it appears in the input.
/// Examples: `Positive`, `Negative`, `Mixed`
pub type SentimentLabel = String;
/// Human-readable series or card title.
/// Examples: `Positive Reviews`, `Travel Types`
pub type DisplayLabel = String;
/// CSS color string handed to the chart renderer.
/// Example: `rgba(75, 192, 192, 0.2)`
pub type CssColor = String;
/// Monotonic identifier for a dashboard load request.
/// Example: `3`
pub type LoadToken = u64;
/// 1-based line number in the source file.
/// Example: `42`
pub type LineNumber = u64;
