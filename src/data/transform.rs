//! Top-level payload-to-chart dispatch.

use thiserror::Error;

use gaugeview_types::{ChartModel, PayloadKind, RawMetricPayload};

use super::{curve, histogram};

/// Transformation failures. Degenerate payload *contents* never fail -
/// they produce empty models - but a payload of an unknown kind cannot be
/// charted at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("data kind should be one of (curve,histogram), but got {0}")]
    UnsupportedKind(String),
}

/// Convert a raw metric payload into its chart-ready model.
///
/// Deterministic: the same payload always produces the same model.
pub fn transform(payload: &RawMetricPayload) -> Result<ChartModel, TransformError> {
    match &payload.kind {
        PayloadKind::Curve => Ok(curve::curve_chart(payload)),
        PayloadKind::Histogram => Ok(histogram::histogram_chart(payload)),
        PayloadKind::Other(kind) => Err(TransformError::UnsupportedKind(kind.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaugeview_types::{DurationSpec, MetricValues};
    use std::collections::BTreeMap;

    fn sample_curve() -> RawMetricPayload {
        let mut series = BTreeMap::new();
        series.insert(1, vec![1.0, 2.0]);
        RawMetricPayload {
            kind: PayloadKind::Curve,
            timestamp: 1_700_000_000,
            duration: DurationSpec::new(60, 2),
            descriptor: None,
            values: MetricValues::Curve(series),
            labels: Vec::new(),
        }
    }

    #[test]
    fn dispatches_curves_and_histograms() {
        assert!(transform(&sample_curve()).is_ok());

        let histogram = RawMetricPayload {
            kind: PayloadKind::Histogram,
            values: MetricValues::Histogram(vec![1.0]),
            labels: vec!["0".into(), "1".into()],
            ..Default::default()
        };
        assert!(transform(&histogram).is_ok());
    }

    #[test]
    fn unknown_kind_names_the_valid_ones() {
        let payload = RawMetricPayload {
            kind: PayloadKind::Other("gauge".into()),
            ..Default::default()
        };
        let err = transform(&payload).unwrap_err();
        assert_eq!(err, TransformError::UnsupportedKind("gauge".into()));
        let message = err.to_string();
        assert!(message.contains("curve"));
        assert!(message.contains("histogram"));
        assert!(message.contains("gauge"));
    }

    #[test]
    fn transform_is_idempotent() {
        let payload = sample_curve();
        let first = transform(&payload).unwrap();
        let second = transform(&payload).unwrap();
        assert_eq!(first, second);
    }
}
