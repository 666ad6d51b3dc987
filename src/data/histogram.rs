//! Histogram bucket remapping onto canonical separator ladders.
//!
//! Nodes report histograms over whatever bucket boundaries they were
//! configured with. For the byte-size and latency families the dashboard
//! shows a fixed ladder instead, so charts from different nodes line up:
//! each original bucket's count is assigned to the canonical bucket it
//! overlaps the most.

use gaugeview_types::{
    AxisKind, ChartModel, ChartSeries, FillStyle, FormatterKind, RawMetricPayload, RenderType,
};

/// Canonical byte-size bucket boundaries (4B .. 1GiB).
const BYTE_SEPARATORS: [f64; 15] = [
    4.0,
    16.0,
    64.0,
    256.0,
    1024.0,
    4096.0,
    16384.0,
    65536.0,
    262144.0,
    1048576.0,
    4194304.0,
    16777216.0,
    67108864.0,
    268435456.0,
    1073741824.0,
];

/// Canonical latency bucket boundaries (1ms .. 10s).
const SECOND_SEPARATORS: [f64; 13] = [
    0.001, 0.002, 0.005, 0.010, 0.020, 0.050, 0.100, 0.200, 0.500, 1.0, 2.0, 5.0, 10.0,
];

/// Parse a bucket boundary token. `-Inf`/`+Inf` are the open-ended
/// sentinels; unparseable tokens degrade to NaN, which the overlap scan
/// treats as no overlap anywhere.
fn parse_edge(token: &str) -> f64 {
    match token {
        "-Inf" => f64::NEG_INFINITY,
        "+Inf" => f64::INFINITY,
        _ => token.parse().unwrap_or(f64::NAN),
    }
}

/// Destination canonical bucket for an original bucket `[start, end)`.
///
/// Buckets below the ladder land in bucket 0, above it in bucket
/// `separators.len()`. Otherwise the bucket with the largest overlap wins;
/// ties (including the degenerate all-zero-overlap case) keep the first
/// bucket encountered in the ascending scan.
fn find_range(separators: &[f64], start: f64, end: f64) -> usize {
    if end <= separators[0] {
        return 0;
    }
    let last = separators.len() - 1;
    if start >= separators[last] {
        return separators.len();
    }

    let mut best = f64::NEG_INFINITY;
    let mut best_index = 0;
    for (j, pair) in separators.windows(2).enumerate() {
        let overlap = end.min(pair[1]) - start.max(pair[0]);
        if overlap > best {
            best = overlap;
            best_index = j;
        }
    }
    best_index
}

/// Remap original buckets onto a canonical ladder.
///
/// Returns one label and one accumulated count per canonical bucket
/// (ladder gaps plus the below/above-range buckets). Original buckets come
/// as `labels[i-1]..labels[i]` edge pairs with `counts[i-1]` inside;
/// missing counts are skipped rather than failing.
fn merge_values(
    separators: &[f64],
    edges: &[String],
    counts: &[f64],
    format: impl Fn(f64) -> String,
) -> (Vec<String>, Vec<f64>) {
    let last = separators.len() - 1;

    let mut labels = Vec::with_capacity(separators.len() + 1);
    labels.push(format!("<{}", format(separators[0])));
    for j in 1..separators.len() {
        labels.push(format!("{}~{}", format(separators[j - 1]), format(separators[j])));
    }
    labels.push(format!(">={}", format(separators[last])));

    let mut values = vec![0.0; separators.len() + 1];
    for i in 1..edges.len() {
        let Some(count) = counts.get(i - 1) else {
            continue;
        };
        let index = find_range(separators, parse_edge(&edges[i - 1]), parse_edge(&edges[i]));
        values[index] += count;
    }

    (labels, values)
}

/// Canonical byte-ladder label: `4`, `1K`, `16M`, `1G`.
fn format_space(s: f64) -> String {
    const K: f64 = 1024.0;
    const M: f64 = 1024.0 * K;
    const G: f64 = 1024.0 * M;
    if s < K {
        format!("{}", s)
    } else if s < M {
        format!("{}K", (s / K).trunc())
    } else if s < G {
        format!("{}M", (s / M).trunc())
    } else {
        format!("{}G", (s / G).trunc())
    }
}

/// Canonical latency-ladder label: `1ms`, `500ms`, `2s`. Half-up rounding.
fn format_seconds(d: f64) -> String {
    if d < 1.0 {
        format!("{}ms", (d / 0.001 + 0.5).floor())
    } else {
        format!("{}s", (d + 0.5).floor())
    }
}

/// Convert a histogram payload into a chart model.
///
/// Payloads whose descriptor selects a canonical ladder are remapped;
/// everything else passes through with the original bucket labels (leading
/// edge dropped so there is one label per bucket). Either way the result
/// is a single bar series on a category axis.
pub fn histogram_chart(payload: &RawMetricPayload) -> ChartModel {
    let y_formatter = payload.formatter();
    let counts = payload.values.as_histogram().unwrap_or(&[]);

    let (labels, values) = match y_formatter {
        FormatterKind::HistogramBytes => {
            merge_values(&BYTE_SEPARATORS, &payload.labels, counts, format_space)
        }
        FormatterKind::HistogramSeconds => {
            merge_values(&SECOND_SEPARATORS, &payload.labels, counts, format_seconds)
        }
        _ => (
            payload.labels.iter().skip(1).cloned().collect(),
            counts.to_vec(),
        ),
    };

    let name = payload
        .descriptor
        .as_ref()
        .map(|d| d.name.clone())
        .unwrap_or_default();

    ChartModel {
        labels,
        series: vec![ChartSeries {
            name,
            render: RenderType::Bar,
            fill: FillStyle::Gradient,
            data: values,
        }],
        x_axis: AxisKind::Category,
        y_formatter,
    }
}
