use super::CliError;
use super::helpers::{read_reference_table, read_state_table, write_series_json};
use dwuck_core::cards::{CardEncoder, ProtocolProfile, RunSettings};
use dwuck_core::domain::StateInput;
use dwuck_core::potential::ParameterModel;
use dwuck_core::scanner::{ScanReport, ScannerConfig, SeriesScanner};
use dwuck_core::serialization::{read_report_text, write_card_document};
use dwuck_core::stats::{agreement_grade, compare_to_reference};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(clap::Args)]
pub(super) struct EncodeArgs {
    /// Per-state parameter table (CSV)
    #[arg(long)]
    states: PathBuf,

    /// Card deck output path
    #[arg(long)]
    output: PathBuf,

    /// Leave card tails unpadded (historical deck variant)
    #[arg(long)]
    unpadded: bool,
}

#[derive(clap::Args)]
pub(super) struct ScanArgs {
    /// Highest excitation energy in MeV
    #[arg(long)]
    max_ex_mev: f64,

    /// Excitation step in MeV
    #[arg(long, default_value_t = 1.0)]
    step_mev: f64,

    /// Ground-state Q-value in MeV
    #[arg(long, default_value_t = 2.079)]
    q_gs_mev: f64,

    /// Ground-state binding energy in MeV
    #[arg(long, default_value_t = -4.304)]
    e_bind_gs_mev: f64,

    /// Orbital label applied to every scan state
    #[arg(long, default_value = "0f7/2")]
    orbital: String,

    /// Transferred orbital angular momentum
    #[arg(long, default_value_t = 3)]
    l_transfer: u32,

    /// Transferred total angular momentum doubled
    #[arg(long, default_value_t = 7)]
    j2_transfer: u32,

    /// Radial node count
    #[arg(long, default_value_t = 0)]
    nodes: u32,

    /// Card deck output path
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct DecodeArgs {
    /// Engine report text file
    #[arg(long)]
    report: PathBuf,

    /// JSON output path for the decoded series
    #[arg(long)]
    output: Option<PathBuf>,

    /// Reaction label that marks series titles
    #[arg(long, default_value = "36S(d,p)")]
    reaction: String,
}

#[derive(clap::Args)]
pub(super) struct CompareArgs {
    /// Engine report text file
    #[arg(long)]
    report: PathBuf,

    /// Reference distribution CSV (angle, observable)
    #[arg(long)]
    reference: PathBuf,

    /// Label of the series to compare; defaults to the first decoded series
    #[arg(long)]
    label: Option<String>,

    /// Reaction label that marks series titles
    #[arg(long, default_value = "36S(d,p)")]
    reaction: String,
}

pub(super) fn run_encode_command(args: EncodeArgs) -> Result<i32, CliError> {
    let encoder = build_encoder(args.unpadded);
    let (states, rejected_rows) = read_state_table(&args.states, encoder.model())?;
    for (row, reason) in &rejected_rows {
        warn!("state table row {} rejected: {}", row, reason);
    }

    let report = encode_and_write(&encoder, &states, &args.output)?;
    info!(
        "encoded {} of {} states into '{}'",
        report.encoded_count(),
        states.len() + rejected_rows.len(),
        args.output.display()
    );
    println!(
        "Encoded {} state(s) into '{}' ({} skipped, {} field warning(s)).",
        report.encoded_count(),
        args.output.display(),
        report.skipped.len() + rejected_rows.len(),
        report.warnings.len()
    );
    Ok(0)
}

pub(super) fn run_scan_command(args: ScanArgs) -> Result<i32, CliError> {
    if args.step_mev <= 0.0 {
        return Err(CliError::Usage(format!(
            "Invalid --step-mev '{}'; expected a positive step.",
            args.step_mev
        )));
    }
    if args.max_ex_mev < 0.0 {
        return Err(CliError::Usage(format!(
            "Invalid --max-ex-mev '{}'; expected a non-negative bound.",
            args.max_ex_mev
        )));
    }

    let encoder = build_encoder(false);
    let exit_reference = encoder.model().exit_reference_energy_mev();
    let mut states = Vec::new();
    let mut excitation_mev = 0.0;
    while excitation_mev <= args.max_ex_mev + 1.0e-9 {
        states.push(StateInput {
            excitation_kev: excitation_mev * 1000.0,
            orbital: args.orbital.clone(),
            l_transfer: args.l_transfer,
            j2_transfer: args.j2_transfer,
            nodes: args.nodes,
            q_value_mev: args.q_gs_mev - excitation_mev,
            binding_energy_mev: args.e_bind_gs_mev + excitation_mev,
            exit_energy_mev: exit_reference - excitation_mev,
        });
        excitation_mev += args.step_mev;
    }

    let report = encode_and_write(&encoder, &states, &args.output)?;
    let bound_count = states
        .iter()
        .filter(|state| state.classify().is_bound())
        .count();
    info!(
        "scan deck: {} states ({} bound, {} unbound)",
        states.len(),
        bound_count,
        states.len() - bound_count
    );
    println!(
        "Encoded scan of {} state(s) up to {} MeV into '{}'.",
        report.encoded_count(),
        args.max_ex_mev,
        args.output.display()
    );
    Ok(0)
}

pub(super) fn run_decode_command(args: DecodeArgs) -> Result<i32, CliError> {
    let report = decode_report(&args.report, &args.reaction)?;

    println!(
        "Decoded {} series ({} rows) from '{}'.",
        report.collection.len(),
        report.rows_parsed,
        args.report.display()
    );
    for series in report.collection.iter() {
        println!("  {} [{} points]", series.label, series.len());
    }

    if let Some(output) = &args.output {
        write_series_json(output, &report.collection).map_err(CliError::Codec)?;
        println!("JSON series: {}", output.display());
    }
    Ok(0)
}

pub(super) fn run_compare_command(args: CompareArgs) -> Result<i32, CliError> {
    let report = decode_report(&args.report, &args.reaction)?;
    let series = match &args.label {
        Some(label) => report.collection.get(label).ok_or_else(|| {
            CliError::Usage(format!(
                "No decoded series matches label '{}'; decoded labels: {:?}",
                label,
                report.collection.labels()
            ))
        })?,
        None => report.collection.iter().next().ok_or_else(|| {
            CliError::Usage("The report decoded to zero series; nothing to compare.".to_string())
        })?,
    };

    let (reference_angles, reference_values) =
        read_reference_table(&args.reference).map_err(CliError::Codec)?;
    let summary = compare_to_reference(series, &reference_angles, &reference_values)
        .map_err(CliError::Codec)?;

    println!("Comparison for '{}' ({} points):", series.label, summary.point_count);
    println!("  RMS absolute difference: {:.4}", summary.rms_absolute);
    println!("  RMS relative difference: {:.2}%", summary.rms_relative_percent);
    println!("  Max absolute difference: {:.4}", summary.max_absolute);
    println!("  Max relative difference: {:.2}%", summary.max_relative_percent);
    println!("  Mean reference / model:  {:.4} / {:.4}", summary.mean_reference, summary.mean_model);
    println!("  Agreement: {}", agreement_grade(summary.rms_relative_percent));
    Ok(0)
}

fn build_encoder(unpadded: bool) -> CardEncoder {
    let profile = if unpadded {
        ProtocolProfile::unpadded()
    } else {
        ProtocolProfile::strict()
    };
    CardEncoder::new(profile, RunSettings::sulfur36_dp(), ParameterModel::standard())
}

fn encode_and_write(
    encoder: &CardEncoder,
    states: &[StateInput],
    output: &Path,
) -> Result<dwuck_core::cards::EncodeReport, CliError> {
    let report = encoder.encode(states).map_err(CliError::Codec)?;
    for skipped in &report.skipped {
        warn!(
            "state {} skipped: {}",
            skipped.state_index, skipped.reason
        );
    }
    for warning in &report.warnings {
        warn!("state {}: {}", warning.state_index, warning.detail);
    }
    write_card_document(output, &report.document).map_err(CliError::Codec)?;
    Ok(report)
}

fn decode_report(report_path: &Path, reaction: &str) -> Result<ScanReport, CliError> {
    let text = read_report_text(report_path).map_err(CliError::Codec)?;
    let config = ScannerConfig {
        title_token: reaction.to_string(),
        ..ScannerConfig::sulfur36_dp()
    };
    let report = SeriesScanner::new(config)
        .scan(&text)
        .map_err(CliError::Codec)?;
    for warning in &report.warnings {
        warn!(
            "series '{}' (line {}) has no table",
            warning.label, warning.title_line
        );
    }
    Ok(report)
}
