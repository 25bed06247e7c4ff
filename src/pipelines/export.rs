//! CSV export of analysis results and session history.

use std::io::Write;
use std::path::Path;

use super::history::SentimentRecord;
use super::segmentation::Segment;
use super::sentiment_analysis::ClassificationResult;
use crate::core::{Result, SegmentFilter, SentimentError};

pub const HEADER: [&str; 3] = ["Sentence", "Sentiment", "Confidence"];

#[derive(Debug, Clone, Copy)]
pub struct ResultExporter {
    filter: SegmentFilter,
}

impl Default for ResultExporter {
    fn default() -> Self {
        Self {
            filter: SegmentFilter::All,
        }
    }
}

impl ResultExporter {
    pub fn new(filter: SegmentFilter) -> Self {
        Self { filter }
    }

    /// Serialize segment/result pairs to UTF-8 CSV, in original order.
    pub fn export(&self, segments: &[Segment], results: &[ClassificationResult]) -> Result<Vec<u8>> {
        if segments.len() != results.len() {
            return Err(SentimentError::MisalignedExport {
                segments: segments.len(),
                results: results.len(),
            });
        }

        let rows = segments
            .iter()
            .zip(results)
            .filter(|(segment, _)| self.filter.keeps(&segment.text))
            .map(|(segment, result)| (segment.text.as_str(), result));
        write_table(Vec::new(), rows)
    }

    /// Serialize a history snapshot to the same table layout.
    pub fn export_history(&self, records: &[SentimentRecord]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;
        for record in records {
            let confidence = record.confidence.to_string();
            writer.write_record([
                record.segment_text.as_str(),
                record.label.as_str(),
                confidence.as_str(),
            ])?;
        }
        finish(writer)
    }
}

fn write_table<'a, W, I>(sink: W, rows: I) -> Result<W>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a ClassificationResult)>,
{
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(HEADER)?;
    for (sentence, result) in rows {
        let confidence = result.confidence.to_string();
        writer.write_record([sentence, result.label.as_str(), confidence.as_str()])?;
    }
    finish(writer)
}

fn finish<W: Write>(writer: csv::Writer<W>) -> Result<W> {
    writer.into_inner().map_err(|e| {
        let err = e.error();
        SentimentError::io(
            "flushing results table",
            std::io::Error::new(err.kind(), err.to_string()),
        )
    })
}

/// Write an exported table to `path`.
pub fn save(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path.as_ref(), bytes).map_err(|e| SentimentError::io("writing results table", e))
}
