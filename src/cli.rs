use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::config::{DashboardConfig, RowPolicy, TotalReviewsPolicy};
use crate::dashboard::{Dashboard, DashboardView};
use crate::presentation::format_percentage;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TotalArg {
    /// Sequence index of the last row.
    LastSequence,
    /// Number of parsed rows.
    RecordCount,
}

impl From<TotalArg> for TotalReviewsPolicy {
    fn from(value: TotalArg) -> Self {
        match value {
            TotalArg::LastSequence => TotalReviewsPolicy::LastSequenceIndex,
            TotalArg::RecordCount => TotalReviewsPolicy::RecordCount,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dashboard_report",
    disable_help_subcommand = true,
    about = "Summarize a hotel review CSV",
    long_about = "Load a review CSV, compute sentiment statistics, and print the dashboard summary or its renderer payload as JSON."
)]
struct DashboardReportCli {
    #[arg(value_name = "CSV", help = "Path to the review CSV file")]
    path: PathBuf,
    #[arg(
        long = "new-since",
        value_name = "YYYY-MM-DD",
        value_parser = parse_cutoff_arg,
        help = "Stays strictly after this date count as new reviews"
    )]
    new_since: Option<NaiveDate>,
    #[arg(
        long = "total",
        value_enum,
        default_value_t = TotalArg::LastSequence,
        help = "How the total review count is derived"
    )]
    total: TotalArg,
    #[arg(long, help = "Fail on the first malformed row instead of skipping it")]
    strict: bool,
    #[arg(
        long = "page-size",
        default_value_t = 3,
        value_parser = parse_positive_usize,
        help = "Reviews per list page"
    )]
    page_size: usize,
    #[arg(long, default_value_t = 0, help = "0-based review list page to include")]
    page: usize,
    #[arg(
        long = "timeout-secs",
        value_name = "SECONDS",
        help = "Give up reading the file after this many seconds"
    )]
    timeout_secs: Option<u64>,
    #[arg(long, help = "Print the renderer payload as JSON")]
    json: bool,
}

impl DashboardReportCli {
    fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::default()
            .with_total_reviews_policy(self.total.into())
            .with_page_size(self.page_size);
        if let Some(cutoff) = self.new_since {
            config = config.with_new_review_cutoff(cutoff);
        }
        if self.strict {
            config = config.with_row_policy(RowPolicy::Strict);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_load_timeout(Some(Duration::from_secs(secs)));
        }
        config
    }
}

/// Run the `dashboard_report` command against stdout.
pub fn run_dashboard_report<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_dashboard_report_to(args_iter, &mut out)
}

/// Run the `dashboard_report` command, writing its report to `out`.
pub fn run_dashboard_report_to<I, W>(args_iter: I, out: &mut W) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
    W: Write,
{
    let Some(cli) = parse_cli::<DashboardReportCli, _>(
        std::iter::once("dashboard_report".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let dashboard = Dashboard::new(cli.config())?;
    let view = dashboard.load_file(&cli.path)?;

    if cli.json {
        let payload = view.payload(cli.page)?;
        serde_json::to_writer_pretty(&mut *out, &payload)?;
        writeln!(out)?;
    } else {
        write_text_report(&view, cli.page, out)?;
    }
    Ok(())
}

fn write_text_report<W: Write>(
    view: &DashboardView,
    page: usize,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    writeln!(out, "=== summary ===")?;
    for card in &view.cards {
        writeln!(out, "{:<18} {}", card.title, card.value)?;
    }
    if view.dropped_count() > 0 {
        writeln!(out, "{:<18} {}", "Dropped rows", view.dropped_count())?;
    }

    writeln!(out, "\n=== monthly sentiment ===")?;
    for bucket in &view.monthly_sentiment {
        writeln!(
            out,
            "{}  positive={:<5} negative={:<5}",
            bucket.year_month, bucket.positive_count, bucket.negative_count
        )?;
    }

    writeln!(out, "\n=== trip types ===")?;
    if let Some(proportions) = &view.trip_type_proportions {
        for entry in &proportions.per_category {
            writeln!(
                out,
                "{:<24} {:>6} {:>8}",
                entry.label,
                entry.count,
                format_percentage(entry.share * 100.0)
            )?;
        }
    }

    let payload = view.payload(page)?;
    let reviews = &payload.reviews;
    writeln!(
        out,
        "\n=== reviews (page {} of {}) ===",
        reviews.page + 1,
        reviews.page_count.max(1)
    )?;
    for item in &reviews.items {
        writeln!(
            out,
            "[{}] {} ({}) {} / {}",
            item.sequence_index, item.platform, item.stay_date, item.sentiment, item.trip_type
        )?;
        writeln!(out, "    {}", item.preview)?;
    }
    Ok(())
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw.parse::<usize>().map_err(|_| {
        format!(
            "Could not parse --page-size value '{}' as a positive integer",
            raw
        )
    })?;
    if parsed == 0 {
        return Err("--page-size must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cutoff_arg(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid --new-since date '{}': expected YYYY-MM-DD", raw.trim()))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
