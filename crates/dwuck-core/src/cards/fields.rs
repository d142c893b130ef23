use crate::domain::{CodecResult, DwuckError};

/// Exactly-`width` rendering of one card field. `precision_loss` is set
/// whenever the requested decimal count could not be honored, so callers can
/// surface a warning instead of silently shipping a coarser value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub text: String,
    pub precision_loss: bool,
}

/// Renders `value` into exactly `width` characters with an explicit sign and
/// `decimals` fractional digits, right-padded with spaces. The consuming
/// engine reads fields by character position, so padding is always trailing.
///
/// Too-long renderings drop one decimal digit at a time; at zero decimals the
/// Fortran-style trailing point is kept, and truncation to `width` is the
/// last resort. Integer digits are never dropped: a value whose sign and
/// integer part alone exceed `width` fails with a field-overflow error.
pub fn render_field(value: f64, width: usize, decimals: usize) -> CodecResult<RenderedField> {
    if !value.is_finite() {
        return Err(DwuckError::internal(
            "CARD.FIELD_VALUE",
            format!("field value must be finite, got {}", value),
        ));
    }

    let integer_only = format!("{:+.0}", value);
    if integer_only.len() > width {
        return Err(DwuckError::field_overflow(
            "CARD.FIELD_OVERFLOW",
            format!(
                "value {} needs {} columns for its integer part but the field is {} wide",
                value,
                integer_only.len(),
                width
            ),
        ));
    }

    let mut requested = decimals;
    let mut precision_loss = false;
    let mut text = render_at(value, requested);
    while text.len() > width && requested > 0 {
        requested -= 1;
        precision_loss = true;
        text = render_at(value, requested);
    }
    if text.len() > width {
        text.truncate(width);
        precision_loss = true;
    }
    while text.len() < width {
        text.push(' ');
    }

    Ok(RenderedField {
        text,
        precision_loss,
    })
}

/// Signed zero-padded integer field, e.g. `+03` in a 3-column slot. Used by
/// the quantum-number card, which the engine reads as nI3.
pub fn render_quantum_field(value: i32, width: usize) -> String {
    format!("{value:+0width$}", width = width)
}

fn render_at(value: f64, decimals: usize) -> String {
    if decimals == 0 {
        let mut text = format!("{:+.0}", value);
        text.push('.');
        text
    } else {
        format!("{value:+.decimals$}", decimals = decimals)
    }
}
