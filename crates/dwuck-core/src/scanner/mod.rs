mod machine;
mod rows;

use crate::domain::CodecResult;
use crate::series::SeriesCollection;

/// Marker tokens that delimit series in the engine report. The report has no
/// schema beyond these recurring textual conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    pub title_token: String,
    pub energy_unit_token: String,
    pub header_token: String,
    pub totals_token: String,
}

impl ScannerConfig {
    pub fn sulfur36_dp() -> Self {
        Self {
            title_token: "36S(d,p)".to_string(),
            energy_unit_token: "keV".to_string(),
            header_token: "Theta".to_string(),
            totals_token: "Tot-sig".to_string(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::sulfur36_dp()
    }
}

/// A title that never grew a table: recorded, not fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedSeriesWarning {
    pub label: String,
    pub title_line: usize,
}

/// Outcome of one decoding pass: the collection plus the aggregate counters
/// callers report in run summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub collection: SeriesCollection,
    pub warnings: Vec<MalformedSeriesWarning>,
    pub titles_seen: usize,
    pub rows_parsed: usize,
    pub replaced_labels: usize,
}

/// Single-pass stateful scanner over engine report text:
/// `SeekingTitle -> SeekingTableHeader -> SeekingFirstDataRow ->
/// AccumulatingRows -> (SeekingTitle)`. The whole report is resident in
/// memory before scanning begins; the collection is handed out only after
/// the pass completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesScanner {
    config: ScannerConfig,
}

impl SeriesScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    pub fn standard() -> Self {
        Self::new(ScannerConfig::sulfur36_dp())
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn scan(&self, report_text: &str) -> CodecResult<ScanReport> {
        let mut machine = machine::Machine::new(&self.config);
        for (index, line) in report_text.lines().enumerate() {
            machine.observe(index + 1, line);
        }
        machine.finish()
    }
}
