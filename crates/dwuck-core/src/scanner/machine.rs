use super::rows::parse_data_row;
use super::{MalformedSeriesWarning, ScanReport, ScannerConfig};
use crate::domain::{CodecResult, DwuckError};
use crate::series::{ResultSeries, SeriesCollection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingTitle,
    SeekingTableHeader,
    SeekingFirstDataRow,
    AccumulatingRows,
}

#[derive(Debug, Clone)]
struct PendingSeries {
    label: String,
    excitation_kev: Option<f64>,
    title_line: usize,
    angles_deg: Vec<f64>,
    values: Vec<f64>,
}

pub(super) struct Machine<'a> {
    config: &'a ScannerConfig,
    state: ScanState,
    pending: Option<PendingSeries>,
    collection: SeriesCollection,
    warnings: Vec<MalformedSeriesWarning>,
    titles_seen: usize,
    rows_parsed: usize,
    replaced_labels: usize,
}

impl<'a> Machine<'a> {
    pub(super) fn new(config: &'a ScannerConfig) -> Self {
        Self {
            config,
            state: ScanState::SeekingTitle,
            pending: None,
            collection: SeriesCollection::default(),
            warnings: Vec::new(),
            titles_seen: 0,
            rows_parsed: 0,
            replaced_labels: 0,
        }
    }

    pub(super) fn observe(&mut self, line_number: usize, line: &str) {
        loop {
            match self.state {
                ScanState::SeekingTitle => {
                    if self.is_title(line) {
                        self.open_series(line_number, line);
                    }
                    return;
                }
                ScanState::SeekingTableHeader => {
                    if self.is_title(line) {
                        self.flag_pending_as_malformed();
                        self.open_series(line_number, line);
                    } else if self.is_table_header(line) {
                        self.state = ScanState::SeekingFirstDataRow;
                    }
                    return;
                }
                ScanState::SeekingFirstDataRow => {
                    if self.is_title(line) {
                        self.flag_pending_as_malformed();
                        self.open_series(line_number, line);
                        return;
                    }
                    if let Some((angle, value)) = parse_data_row(line) {
                        self.push_row(angle, value);
                        self.state = ScanState::AccumulatingRows;
                    }
                    return;
                }
                ScanState::AccumulatingRows => {
                    if !line.contains(&self.config.totals_token)
                        && let Some((angle, value)) = parse_data_row(line)
                    {
                        self.push_row(angle, value);
                        return;
                    }
                    // table ended; flush and re-examine this same line as a
                    // potential next title
                    self.flush_pending();
                    self.state = ScanState::SeekingTitle;
                }
            }
        }
    }

    pub(super) fn finish(mut self) -> CodecResult<ScanReport> {
        match self.state {
            ScanState::AccumulatingRows => self.flush_pending(),
            ScanState::SeekingTableHeader | ScanState::SeekingFirstDataRow => {
                self.flag_pending_as_malformed();
            }
            ScanState::SeekingTitle => {}
        }

        if self.titles_seen == 0 {
            return Err(DwuckError::no_series_found(
                "SCAN.NO_SERIES",
                format!(
                    "no line matched the series-title markers '{}' + '{}'",
                    self.config.title_token, self.config.energy_unit_token
                ),
            ));
        }

        Ok(ScanReport {
            collection: self.collection,
            warnings: self.warnings,
            titles_seen: self.titles_seen,
            rows_parsed: self.rows_parsed,
            replaced_labels: self.replaced_labels,
        })
    }

    fn is_title(&self, line: &str) -> bool {
        line.contains(&self.config.title_token) && line.contains(&self.config.energy_unit_token)
    }

    fn is_table_header(&self, line: &str) -> bool {
        line.to_ascii_lowercase()
            .contains(&self.config.header_token.to_ascii_lowercase())
    }

    fn open_series(&mut self, line_number: usize, line: &str) {
        let label = line.trim().to_string();
        let excitation_kev = extract_excitation_kev(&label, &self.config.energy_unit_token);
        self.titles_seen += 1;
        self.pending = Some(PendingSeries {
            label,
            excitation_kev,
            title_line: line_number,
            angles_deg: Vec::new(),
            values: Vec::new(),
        });
        self.state = ScanState::SeekingTableHeader;
    }

    fn push_row(&mut self, angle: f64, value: f64) {
        if let Some(pending) = self.pending.as_mut() {
            pending.angles_deg.push(angle);
            pending.values.push(value);
            self.rows_parsed += 1;
        }
    }

    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            let mut series = ResultSeries::new(pending.label, pending.excitation_kev);
            series.angles_deg = pending.angles_deg;
            series.values = pending.values;
            if self.collection.insert(series) {
                self.replaced_labels += 1;
            }
        }
    }

    fn flag_pending_as_malformed(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.warnings.push(MalformedSeriesWarning {
                label: pending.label,
                title_line: pending.title_line,
            });
        }
    }
}

/// Pulls the excitation numeral out of a title, e.g. `... 1000 keV 0f7/2 ...`
/// yields 1000.0. Absent or unparsable numerals are simply `None`; the label
/// still identifies the series.
fn extract_excitation_kev(label: &str, energy_unit_token: &str) -> Option<f64> {
    let before_unit = label.split(energy_unit_token).next()?;
    before_unit
        .split_whitespace()
        .next_back()?
        .parse::<f64>()
        .ok()
}
