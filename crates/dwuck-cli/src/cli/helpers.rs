use super::CliError;
use dwuck_core::domain::{CodecResult, DwuckError, StateInput};
use dwuck_core::potential::ParameterModel;
use dwuck_core::series::SeriesCollection;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One row of the per-state parameter table. Column names follow the legacy
/// tabular convention; unknown columns are ignored and a missing exit-energy
/// column falls back to the model's reference energy minus the excitation.
#[derive(Debug, Deserialize)]
pub(super) struct StateRecord {
    #[serde(rename = "Ex_keV")]
    ex_kev: f64,
    orbital: String,
    #[serde(rename = "L")]
    l_transfer: u32,
    #[serde(rename = "j_times_2")]
    j2_transfer: u32,
    nodes: u32,
    #[serde(rename = "Q_MeV")]
    q_mev: f64,
    #[serde(rename = "E_bind_MeV")]
    e_bind_mev: f64,
    #[serde(rename = "E_exit_MeV", default)]
    e_exit_mev: Option<f64>,
}

impl StateRecord {
    fn into_state(self, model: &ParameterModel) -> StateInput {
        let exit_energy_mev = self
            .e_exit_mev
            .unwrap_or_else(|| model.exit_reference_energy_mev() - self.ex_kev / 1000.0);
        StateInput {
            excitation_kev: self.ex_kev,
            orbital: self.orbital,
            l_transfer: self.l_transfer,
            j2_transfer: self.j2_transfer,
            nodes: self.nodes,
            q_value_mev: self.q_mev,
            binding_energy_mev: self.e_bind_mev,
            exit_energy_mev,
        }
    }
}

/// Reads the state table, recovering row-by-row: an unparsable row becomes a
/// rejected entry (1-based row number plus reason) and the batch continues.
pub(super) fn read_state_table(
    path: &Path,
    model: &ParameterModel,
) -> Result<(Vec<StateInput>, Vec<(usize, DwuckError)>), CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| {
            CliError::Codec(DwuckError::io_system(
                "IO.STATE_TABLE_READ",
                format!("failed to read state table '{}': {}", path.display(), source),
            ))
        })?;

    let mut states = Vec::new();
    let mut rejected = Vec::new();
    for (index, record) in reader.deserialize::<StateRecord>().enumerate() {
        let row_number = index + 1;
        match record {
            Ok(record) => states.push(record.into_state(model)),
            Err(source) => rejected.push((
                row_number,
                DwuckError::invalid_state(
                    "INPUT.STATE_ROW",
                    format!("row {}: {}", row_number, source),
                ),
            )),
        }
    }
    Ok((states, rejected))
}

/// Reads a reference angular distribution as `angle, observable` columns. A
/// header row (or any row whose leading columns are not numeric) is skipped.
pub(super) fn read_reference_table(path: &Path) -> CodecResult<(Vec<f64>, Vec<f64>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| {
            DwuckError::io_system(
                "IO.REFERENCE_READ",
                format!(
                    "failed to read reference table '{}': {}",
                    path.display(),
                    source
                ),
            )
        })?;

    let mut angles = Vec::new();
    let mut observables = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| {
            DwuckError::io_system(
                "IO.REFERENCE_READ",
                format!(
                    "failed to read reference table '{}': {}",
                    path.display(),
                    source
                ),
            )
        })?;
        if record.len() < 2 {
            continue;
        }
        let (Ok(angle), Ok(observable)) =
            (record[0].parse::<f64>(), record[1].parse::<f64>())
        else {
            continue;
        };
        angles.push(angle);
        observables.push(observable);
    }

    if angles.is_empty() {
        return Err(DwuckError::invalid_state(
            "INPUT.REFERENCE_EMPTY",
            format!(
                "reference table '{}' contains no numeric angle/observable rows",
                path.display()
            ),
        ));
    }
    Ok((angles, observables))
}

pub(super) fn write_series_json(path: &Path, collection: &SeriesCollection) -> CodecResult<()> {
    let series: Vec<_> = collection.iter().collect();
    let json = serde_json::to_string_pretty(&series).map_err(|source| {
        DwuckError::internal(
            "SYS.SERIES_JSON",
            format!("failed to serialize decoded series: {}", source),
        )
    })?;
    fs::write(path, json).map_err(|source| {
        DwuckError::io_system(
            "IO.SERIES_JSON_WRITE",
            format!(
                "failed to write series JSON '{}': {}",
                path.display(),
                source
            ),
        )
    })
}
