//! Numeric humanization for value-axis labels.

use gaugeview_types::FormatterKind;

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * KB;
const GB: f64 = 1024.0 * MB;
const TB: f64 = 1024.0 * GB;
const PB: f64 = 1024.0 * TB;

/// Render a byte count with a K/M/G/T/P suffix.
///
/// Values under 10K stay raw so small counts keep full precision; above
/// that the value is truncated (not rounded) to the largest unit that
/// keeps at least two digits: `15000` renders as `"14K"`, not `"15K"`.
/// NaN renders as the empty string.
pub fn humanize_bytes(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value < 10.0 * KB {
        return format!("{}", value);
    }
    if value < 10.0 * MB {
        return with_unit(value, KB, "K");
    }
    if value < 10.0 * GB {
        return with_unit(value, MB, "M");
    }
    if value < 10.0 * TB {
        return with_unit(value, GB, "G");
    }
    if value < 10.0 * PB {
        return with_unit(value, TB, "T");
    }
    if value > 0.0 {
        return with_unit(value, PB, "P");
    }
    format!("{}", value)
}

fn with_unit(value: f64, unit: f64, suffix: &str) -> String {
    format!("{}{}", (value / unit).trunc(), suffix)
}

/// Render a plain percentage.
pub fn percent(value: f64) -> String {
    format!("{}%", value)
}

/// Render a value-axis label according to the metric's formatter kind.
///
/// Without an explicit formatter, integral values are still humanized
/// (raw byte counts dominate the unformatted metrics) and fractional
/// values pass through untouched.
pub fn format_y_label(value: f64, kind: FormatterKind) -> String {
    match kind {
        FormatterKind::BytesHuman => humanize_bytes(value),
        FormatterKind::Percent => percent(value),
        _ => {
            if value.is_finite() && value.fract() == 0.0 {
                humanize_bytes(value)
            } else {
                format!("{}", value)
            }
        }
    }
}
