//! Spreadsheet-friendly agreement report.

use crate::allocation_presenter::format_percentage;
use fairshare_application::SplitOutcome;
use std::io;
use thiserror::Error;

const HEADERS: [&str; 4] = ["Participant", "Recommended Share", "Percentage", "Reasoning"];
const TOTAL_LABEL: &str = "TOTAL";
const SUMMARY_LABEL: &str = "Summary";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error("report is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub struct CsvReport;

impl CsvReport {
    /// One row per participant, a blank row, the total, then the summary
    /// when one is given.
    pub fn write<W: io::Write>(
        outcome: &SplitOutcome<'_>,
        summary: Option<&str>,
        writer: W,
    ) -> Result<(), ReportError> {
        let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);

        csv.write_record(HEADERS)?;
        for allocation in &outcome.allocations {
            let share = allocation.share.to_string();
            let percentage = format_percentage(allocation.share_percentage);
            csv.write_record([
                allocation.name,
                share.as_str(),
                percentage.as_str(),
                allocation.reasoning.as_str(),
            ])?;
        }

        csv.write_record(["", "", "", ""])?;
        let total = outcome.total_amount.to_string();
        csv.write_record([TOTAL_LABEL, total.as_str(), "100%", ""])?;
        if let Some(summary) = summary {
            csv.write_record([SUMMARY_LABEL, summary])?;
        }

        csv.flush()?;
        Ok(())
    }

    pub fn render(
        outcome: &SplitOutcome<'_>,
        summary: Option<&str>,
    ) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        Self::write(outcome, summary, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
