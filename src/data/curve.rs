//! Time-axis label synthesis for curve payloads.

use chrono::{DateTime, Utc};

use gaugeview_types::{
    AxisKind, ChartModel, ChartSeries, CurveProperty, DurationSpec, FillStyle, RawMetricPayload,
    RenderType,
};

const HOUR_SECS: u64 = 3600;

/// Axis type for a sampling granularity: sub-hour units fit on a
/// time-of-day axis, anything coarser needs the calendar date.
pub fn axis_for_unit(unit: u64) -> AxisKind {
    if unit < HOUR_SECS {
        AxisKind::Time
    } else {
        AxisKind::DateTime
    }
}

/// Synthesize `n` time labels ending at `timestamp`, one per sampling unit.
///
/// Label `i` corresponds to `timestamp - (n-1-i) * duration.unit`, so the
/// newest sample sits at the right edge. Labels are rendered in UTC;
/// timestamps outside the representable range degrade to empty labels.
pub fn curve_labels(timestamp: i64, duration: DurationSpec, n: usize) -> Vec<String> {
    let format = if duration.unit < HOUR_SECS {
        "%H:%M:%S"
    } else {
        "%Y/%m/%d %H:%M:%S"
    };

    (0..n)
        .map(|i| {
            let offset = (n - 1 - i) as i64 * duration.unit as i64;
            let t = timestamp - offset;
            DateTime::<Utc>::from_timestamp(t, 0)
                .map(|dt| dt.format(format).to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Convert a curve payload into a chart model.
///
/// One Line/Solid series per property code; labels are derived once from
/// the first non-empty property series and shared by every series. With no
/// non-empty series the model is empty but valid.
pub fn curve_chart(payload: &RawMetricPayload) -> ChartModel {
    let x_axis = axis_for_unit(payload.duration.unit);
    let y_formatter = payload.formatter();

    let Some(series_map) = payload.values.as_curve() else {
        return ChartModel::empty(x_axis, y_formatter);
    };

    let n = series_map
        .values()
        .map(Vec::len)
        .find(|len| *len > 0)
        .unwrap_or(0);
    if n == 0 {
        return ChartModel::empty(x_axis, y_formatter);
    }

    let labels = curve_labels(payload.timestamp, payload.duration, n);
    let series = series_map
        .iter()
        .map(|(code, values)| ChartSeries {
            name: CurveProperty::from_code(*code).name(),
            render: RenderType::Line,
            fill: FillStyle::Solid,
            data: values.clone(),
        })
        .collect();

    ChartModel {
        labels,
        series,
        x_axis,
        y_formatter,
    }
}
