use crate::domain::{CodecResult, DwuckError};
use crate::series::ResultSeries;
use serde::Serialize;

/// Guard against division by a vanishing reference value.
const RELATIVE_FLOOR: f64 = 1.0e-10;

/// Summary statistics for one decoded series against a reference angular
/// distribution, after interpolating the model onto the reference angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub point_count: usize,
    pub rms_absolute: f64,
    pub rms_relative_percent: f64,
    pub max_absolute: f64,
    pub max_relative_percent: f64,
    pub mean_reference: f64,
    pub mean_model: f64,
}

/// Piecewise-linear interpolation with end clamping: queries outside the
/// tabulated range take the nearest end value.
pub fn interpolate_at(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.is_empty() {
        return f64::NAN;
    }
    if x <= xs[0] {
        return ys[0];
    }
    if let Some(last) = xs.last()
        && x >= *last
    {
        return ys[ys.len() - 1];
    }
    for window in 0..xs.len() - 1 {
        let (x0, x1) = (xs[window], xs[window + 1]);
        if x >= x0 && x <= x1 {
            let span = x1 - x0;
            if span.abs() < f64::EPSILON {
                return ys[window];
            }
            let t = (x - x0) / span;
            return ys[window] + t * (ys[window + 1] - ys[window]);
        }
    }
    ys[ys.len() - 1]
}

pub fn compare_to_reference(
    model: &ResultSeries,
    reference_angles: &[f64],
    reference_values: &[f64],
) -> CodecResult<ComparisonSummary> {
    if model.is_empty() {
        return Err(DwuckError::invalid_state(
            "STATS.EMPTY_SERIES",
            format!("series '{}' has no rows to compare", model.label),
        ));
    }
    if reference_angles.is_empty() || reference_angles.len() != reference_values.len() {
        return Err(DwuckError::invalid_state(
            "STATS.REFERENCE_SHAPE",
            format!(
                "reference must provide equal-length angle/value columns, got {}/{}",
                reference_angles.len(),
                reference_values.len()
            ),
        ));
    }

    let mut abs_square_sum = 0.0;
    let mut rel_square_sum = 0.0;
    let mut max_absolute = 0.0_f64;
    let mut max_relative = 0.0_f64;
    let mut reference_sum = 0.0;
    let mut model_sum = 0.0;

    for (angle, reference) in reference_angles.iter().zip(reference_values) {
        let interpolated = interpolate_at(&model.angles_deg, &model.values, *angle);
        let abs_diff = (reference - interpolated).abs();
        let rel_diff = abs_diff / (reference.abs() + RELATIVE_FLOOR);

        abs_square_sum += abs_diff * abs_diff;
        rel_square_sum += rel_diff * rel_diff;
        max_absolute = max_absolute.max(abs_diff);
        max_relative = max_relative.max(rel_diff);
        reference_sum += reference;
        model_sum += interpolated;
    }

    let count = reference_angles.len() as f64;
    Ok(ComparisonSummary {
        point_count: reference_angles.len(),
        rms_absolute: (abs_square_sum / count).sqrt(),
        rms_relative_percent: (rel_square_sum / count).sqrt() * 100.0,
        max_absolute,
        max_relative_percent: max_relative * 100.0,
        mean_reference: reference_sum / count,
        mean_model: model_sum / count,
    })
}

/// Coarse agreement bands used in run summaries.
pub fn agreement_grade(rms_relative_percent: f64) -> &'static str {
    if rms_relative_percent < 5.0 {
        "excellent"
    } else if rms_relative_percent < 10.0 {
        "good"
    } else if rms_relative_percent < 20.0 {
        "fair"
    } else {
        "poor"
    }
}
