//! Metric descriptors as reported by a node's listing endpoint.

use alloc::string::String;
use alloc::vec::Vec;

use crate::DurationSpec;

/// Importance level of a metric, used to order metric listings.
///
/// Orders `Important < Info < Other`, so sorting a listing ascending puts
/// the important metrics first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MetricLevel {
    Important,
    Info,
    #[default]
    Other,
}

impl MetricLevel {
    /// The wire form of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Important => "important",
            Self::Info => "info",
            Self::Other => "other",
        }
    }
}

/// How a metric's values should be rendered on the value axis, and - for
/// histograms - which canonical bucket ladder applies.
///
/// Decoded from the wire string once at parse time; unknown or empty
/// strings resolve to [`FormatterKind::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum FormatterKind {
    /// No explicit formatter: integers are humanized, everything else is
    /// rendered raw.
    #[default]
    None,
    /// Byte counts humanized with a K/M/G/T/P ladder.
    BytesHuman,
    /// Plain percentage.
    Percent,
    /// Histogram over the canonical byte-size buckets.
    HistogramBytes,
    /// Histogram over the canonical latency buckets.
    HistogramSeconds,
}

impl FormatterKind {
    /// Decode a wire string. Unknown strings resolve to `None`.
    pub fn parse(s: &str) -> Self {
        match s {
            "bytes:human-readable" => Self::BytesHuman,
            "percent" => Self::Percent,
            "histogram:bytes" => Self::HistogramBytes,
            "histogram:seconds" => Self::HistogramSeconds,
            _ => Self::None,
        }
    }

    /// The wire form of this kind. `None` is the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::BytesHuman => "bytes:human-readable",
            Self::Percent => "percent",
            Self::HistogramBytes => "histogram:bytes",
            Self::HistogramSeconds => "histogram:seconds",
        }
    }

    /// Whether this kind selects a canonical histogram bucket ladder.
    pub fn is_histogram(&self) -> bool {
        matches!(self, Self::HistogramBytes | Self::HistogramSeconds)
    }
}

impl From<String> for FormatterKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<FormatterKind> for String {
    fn from(kind: FormatterKind) -> Self {
        String::from(kind.as_str())
    }
}

/// Everything a node reports about one metric: identity, importance, how
/// to format its values, and which sampling windows it keeps.
///
/// Immutable once fetched; selection state references descriptors by value.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricDescriptor {
    /// Unique per node and metric type.
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub level: MetricLevel,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub formatter: FormatterKind,

    /// Sampling windows this metric keeps, in the node's preferred order.
    /// May be empty for metrics sampled at a single implicit window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub durations: Vec<DurationSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering_puts_important_first() {
        assert!(MetricLevel::Important < MetricLevel::Info);
        assert!(MetricLevel::Info < MetricLevel::Other);
    }

    #[test]
    fn formatter_parse_known_kinds() {
        assert_eq!(
            FormatterKind::parse("bytes:human-readable"),
            FormatterKind::BytesHuman
        );
        assert_eq!(FormatterKind::parse("percent"), FormatterKind::Percent);
        assert_eq!(
            FormatterKind::parse("histogram:bytes"),
            FormatterKind::HistogramBytes
        );
        assert_eq!(
            FormatterKind::parse("histogram:seconds"),
            FormatterKind::HistogramSeconds
        );
    }

    #[test]
    fn formatter_parse_unknown_resolves_to_none() {
        assert_eq!(FormatterKind::parse(""), FormatterKind::None);
        assert_eq!(FormatterKind::parse("gauge"), FormatterKind::None);
    }

    #[test]
    fn formatter_histogram_predicate() {
        assert!(FormatterKind::HistogramBytes.is_histogram());
        assert!(FormatterKind::HistogramSeconds.is_histogram());
        assert!(!FormatterKind::BytesHuman.is_histogram());
        assert!(!FormatterKind::None.is_histogram());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn descriptor_deserializes_with_defaults() {
        let descriptor: MetricDescriptor =
            serde_json::from_str(r#"{"name":"heap_used"}"#).unwrap();
        assert_eq!(descriptor.name, "heap_used");
        assert_eq!(descriptor.level, MetricLevel::Other);
        assert_eq!(descriptor.formatter, FormatterKind::None);
        assert!(descriptor.durations.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn descriptor_deserializes_full() {
        let descriptor: MetricDescriptor = serde_json::from_str(
            r#"{
                "name": "disk_used",
                "level": "important",
                "description": "Bytes used on the data volume",
                "formatter": "bytes:human-readable",
                "durations": [{"unit": 60, "count": 60}, {"unit": 3600, "count": 24}]
            }"#,
        )
        .unwrap();
        assert_eq!(descriptor.level, MetricLevel::Important);
        assert_eq!(descriptor.formatter, FormatterKind::BytesHuman);
        assert_eq!(descriptor.durations.len(), 2);
        assert_eq!(descriptor.durations[1], DurationSpec::new(3600, 24));
    }
}
