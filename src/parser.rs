//! CSV review parsing.
//!
//! The header row is validated up front and any problem there fails the whole
//! parse with `DashboardError::Format`. Row-level problems are governed by
//! `RowPolicy`: dropped and reported by default, or fatal under `Strict`.

use std::io;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RowPolicy;
use crate::constants::columns;
use crate::constants::loading::SKIP_MALFORMED_MSG;
use crate::data::{ReviewRecord, Sentiment};
use crate::dates::parse_stay_date;
use crate::errors::{DashboardError, csv_kind_reason};
use crate::types::LineNumber;

/// A row that was skipped during parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    /// 1-based line in the source text where the row starts, when known.
    pub line: Option<LineNumber>,
    /// Why the row could not be typed.
    pub reason: String,
}

/// Parser output: typed records in input order plus the rows that were dropped.
#[derive(Clone, Debug, Default)]
pub struct ParsedReviews {
    /// Typed rows in input order.
    pub records: Vec<ReviewRecord>,
    /// Rows skipped under `RowPolicy::DropMalformed`.
    pub rejected: Vec<RowRejection>,
}

impl ParsedReviews {
    /// Number of rows dropped as malformed.
    pub fn dropped_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Column positions resolved from the header row.
#[derive(Clone, Copy, Debug)]
struct ColumnLayout {
    sequence_index: usize,
    date_of_stay: usize,
    review: usize,
    trip_type: usize,
    hotel_url: usize,
    sentiment: usize,
    platform: usize,
    width: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, DashboardError> {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);
        let missing: Vec<String> = columns::ALL
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| column_display_name(name))
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::format(
                Some(1),
                format!("header is missing columns: {}", missing.join(", ")),
            ));
        }
        let find = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            sequence_index: find(columns::SEQUENCE_INDEX),
            date_of_stay: find(columns::DATE_OF_STAY),
            review: find(columns::REVIEW),
            trip_type: find(columns::TRIP_TYPE),
            hotel_url: find(columns::HOTEL_URL),
            sentiment: find(columns::SENTIMENT),
            platform: find(columns::PLATFORM),
            width: headers.len(),
        })
    }

    fn build_record(&self, row: &StringRecord) -> Result<ReviewRecord, String> {
        if row.len() != self.width {
            return Err(format!(
                "expected {} fields, found {}",
                self.width,
                row.len()
            ));
        }
        let field = |idx: usize| row.get(idx).unwrap_or_default();

        let raw_index = field(self.sequence_index).trim();
        let sequence_index = raw_index
            .parse::<u64>()
            .map_err(|_| format!("sequence index '{raw_index}' is not a non-negative integer"))?;

        let raw_date = field(self.date_of_stay);
        let stay_date = parse_stay_date(raw_date)
            .ok_or_else(|| format!("date_of_stay '{raw_date}' is not DD-MM-YYYY"))?;

        Ok(ReviewRecord {
            sequence_index,
            stay_date,
            review_text: field(self.review).to_string(),
            trip_type: field(self.trip_type).to_string(),
            source_url: field(self.hotel_url).to_string(),
            sentiment: Sentiment::from_label(field(self.sentiment)),
            platform: field(self.platform).to_string(),
        })
    }
}

/// Parse review CSV text held in memory.
pub fn parse_reviews(text: &str, policy: RowPolicy) -> Result<ParsedReviews, DashboardError> {
    parse_reviews_from_reader(text.as_bytes(), policy)
}

/// Parse review CSV from any reader. Empty lines are skipped.
pub fn parse_reviews_from_reader<R: io::Read>(
    reader: R,
    policy: RowPolicy,
) -> Result<ParsedReviews, DashboardError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|header| header.trim().is_empty()) {
        return Err(DashboardError::format(Some(1), "missing header row"));
    }
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut parsed = ParsedReviews::default();
    let mut last_index: Option<u64> = None;
    let mut row = StringRecord::new();
    loop {
        let has_row = match reader.read_record(&mut row) {
            Ok(has_row) => has_row,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(err) => {
                let rejection = RowRejection {
                    line: err.position().map(|pos| pos.line()),
                    reason: csv_kind_reason(err.kind()),
                };
                reject(&mut parsed, rejection, policy)?;
                continue;
            }
        };
        if !has_row {
            break;
        }
        let line = row.position().map(|pos| pos.line());
        match layout.build_record(&row) {
            Ok(record) => {
                if let Some(previous) = last_index
                    && record.sequence_index < previous
                {
                    warn!(
                        line,
                        previous,
                        current = record.sequence_index,
                        "review sequence index decreased"
                    );
                }
                last_index = Some(record.sequence_index);
                parsed.records.push(record);
            }
            Err(reason) => reject(&mut parsed, RowRejection { line, reason }, policy)?,
        }
    }

    debug!(
        records = parsed.records.len(),
        dropped = parsed.dropped_count(),
        "parsed review csv"
    );
    Ok(parsed)
}

fn column_display_name(name: &str) -> String {
    if name.is_empty() {
        "<unlabeled index>".to_string()
    } else {
        format!("'{name}'")
    }
}

fn reject(
    parsed: &mut ParsedReviews,
    rejection: RowRejection,
    policy: RowPolicy,
) -> Result<(), DashboardError> {
    match policy {
        RowPolicy::Strict => Err(DashboardError::Format {
            line: rejection.line,
            reason: rejection.reason,
        }),
        RowPolicy::DropMalformed => {
            warn!(line = rejection.line, reason = %rejection.reason, "{SKIP_MALFORMED_MSG}");
            parsed.rejected.push(rejection);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str = ",date_of_stay,review,trip_type,Hotel URL,Sentiment,Platform\n";

    fn csv(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn parses_typed_records_in_order() {
        let text = csv(&[
            "1,01-01-2023,Great stay,Couples,https://h/1,Positive,TripAdvisor",
            "2,15-01-2023,Noisy,Solo,https://h/2,Negative,Booking",
        ]);
        let parsed = parse_reviews(&text, RowPolicy::DropMalformed).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.dropped_count(), 0);

        let first = &parsed.records[0];
        assert_eq!(first.sequence_index, 1);
        assert_eq!(first.stay_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(first.review_text, "Great stay");
        assert_eq!(first.trip_type, "Couples");
        assert_eq!(first.source_url, "https://h/1");
        assert_eq!(first.sentiment, Sentiment::Positive);
        assert_eq!(first.platform, "TripAdvisor");
        assert_eq!(parsed.records[1].sentiment, Sentiment::Negative);
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let text = csv(&[
            "1,02-02-2023,\"Clean, quiet\nand friendly\",Family,u,Positive,Expedia",
        ]);
        let parsed = parse_reviews(&text, RowPolicy::DropMalformed).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].review_text, "Clean, quiet\nand friendly");
    }

    #[test]
    fn skips_empty_lines() {
        let text = format!(
            "{HEADER}\n1,01-01-2023,a,Solo,u,Positive,P\n\n\n2,01-02-2023,b,Solo,u,Negative,P\n"
        );
        let parsed = parse_reviews(&text, RowPolicy::DropMalformed).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.dropped_count(), 0);
    }

    #[test]
    fn drops_malformed_rows_and_reports_them() {
        let text = csv(&[
            "1,01-01-2023,ok,Solo,u,Positive,P",
            "2,2023-01-02,bad date,Solo,u,Positive,P",
            "x,03-01-2023,bad index,Solo,u,Positive,P",
            "4,04-01-2023,too few",
            "5,05-01-2023,ok,Solo,u,Neutral,P",
        ]);
        let parsed = parse_reviews(&text, RowPolicy::DropMalformed).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.dropped_count(), 3);
        assert_eq!(parsed.rejected[0].line, Some(3));
        assert!(parsed.rejected[0].reason.contains("date_of_stay"));
        assert!(parsed.rejected[1].reason.contains("sequence index"));
        assert!(parsed.rejected[2].reason.contains("expected 7 fields"));
        assert_eq!(
            parsed.records[1].sentiment,
            Sentiment::Other("Neutral".to_string())
        );
    }

    #[test]
    fn strict_policy_fails_on_first_malformed_row() {
        let text = csv(&[
            "1,01-01-2023,ok,Solo,u,Positive,P",
            "2,31-02-2023,bad,Solo,u,Positive,P",
        ]);
        let err = parse_reviews(&text, RowPolicy::Strict).unwrap_err();
        match err {
            DashboardError::Format { line, reason } => {
                assert_eq!(line, Some(3));
                assert!(reason.contains("31-02-2023"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn undecodable_row_is_rejected_with_bare_reason() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"1,01-01-2023,");
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b",Solo,u,Positive,P\n2,02-01-2023,fine,Solo,u,Negative,P\n");

        let parsed = parse_reviews_from_reader(bytes.as_slice(), RowPolicy::DropMalformed).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].sequence_index, 2);
        assert_eq!(parsed.rejected.len(), 1);

        let rejection = &parsed.rejected[0];
        assert_eq!(rejection.line, Some(2));
        assert!(rejection.reason.starts_with("invalid utf-8"));
        assert!(!rejection.reason.contains("malformed review data"));
        assert_eq!(rejection.reason.matches("invalid utf-8").count(), 1);

        let err = parse_reviews_from_reader(bytes.as_slice(), RowPolicy::Strict).unwrap_err();
        assert!(!err.is_io());
        assert!(matches!(err, DashboardError::Format { line: Some(2), .. }));
    }

    #[test]
    fn missing_header_column_is_a_format_error() {
        let text = ",date_of_stay,review,trip_type,Hotel URL,Platform\n1,01-01-2023,a,b,c,d\n";
        let err = parse_reviews(text, RowPolicy::DropMalformed).unwrap_err();
        assert!(matches!(err, DashboardError::Format { .. }));
        assert!(!err.is_io());
        assert!(err.to_string().contains("Sentiment"));
    }

    #[test]
    fn empty_input_is_a_format_error() {
        let err = parse_reviews("", RowPolicy::DropMalformed).unwrap_err();
        assert!(matches!(err, DashboardError::Format { .. }));
    }

    #[test]
    fn header_only_yields_no_records() {
        let parsed = parse_reviews(HEADER, RowPolicy::DropMalformed).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.dropped_count(), 0);
    }

    #[test]
    fn columns_are_resolved_by_name() {
        let text = "Platform,Sentiment,Hotel URL,trip_type,review,date_of_stay,\nP,Negative,u,Solo,meh,09-03-2023,7\n";
        let parsed = parse_reviews(text, RowPolicy::Strict).unwrap();
        assert_eq!(parsed.records[0].sequence_index, 7);
        assert_eq!(parsed.records[0].platform, "P");
        assert_eq!(parsed.records[0].sentiment, Sentiment::Negative);
    }
}
