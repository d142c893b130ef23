use serde::Serialize;

/// One decoded result series: an identifying label plus equal-length angle
/// and observable sequences, in report row order. Consumers treat this as
/// read-only once the decode pass has published it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSeries {
    pub label: String,
    pub excitation_kev: Option<f64>,
    pub angles_deg: Vec<f64>,
    pub values: Vec<f64>,
}

impl ResultSeries {
    pub fn new(label: impl Into<String>, excitation_kev: Option<f64>) -> Self {
        Self {
            label: label.into(),
            excitation_kev,
            angles_deg: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn push_row(&mut self, angle_deg: f64, value: f64) {
        self.angles_deg.push(angle_deg);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.angles_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles_deg.is_empty()
    }
}

/// Insertion-ordered label -> series mapping. A duplicate label overwrites
/// the earlier series in place (last write wins), keeping the first
/// insertion's position in the iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesCollection {
    series: Vec<ResultSeries>,
}

impl SeriesCollection {
    /// Returns true when an existing series with the same label was
    /// replaced.
    pub fn insert(&mut self, series: ResultSeries) -> bool {
        if let Some(existing) = self
            .series
            .iter_mut()
            .find(|candidate| candidate.label == series.label)
        {
            *existing = series;
            true
        } else {
            self.series.push(series);
            false
        }
    }

    pub fn get(&self, label: &str) -> Option<&ResultSeries> {
        self.series.iter().find(|series| series.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultSeries> {
        self.series.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|series| series.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl IntoIterator for SeriesCollection {
    type Item = ResultSeries;
    type IntoIter = std::vec::IntoIter<ResultSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.into_iter()
    }
}
