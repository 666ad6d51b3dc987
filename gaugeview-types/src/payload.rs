//! Raw metric payloads as returned by a node's data endpoint.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{DurationSpec, FormatterKind, MetricDescriptor};

/// The shape of a payload's data: a time series or a distribution.
///
/// Anything other than `curve` or `histogram` is carried through verbatim
/// so the transformer can report the offending kind by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum PayloadKind {
    Curve,
    Histogram,
    Other(String),
}

impl PayloadKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Curve => "curve",
            Self::Histogram => "histogram",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for PayloadKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "curve" => Self::Curve,
            "histogram" => Self::Histogram,
            _ => Self::Other(s),
        }
    }
}

impl From<PayloadKind> for String {
    fn from(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::Other(s) => s,
            _ => String::from(kind.as_str()),
        }
    }
}

impl Default for PayloadKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// A named series within a curve payload.
///
/// Nodes key curve series by a numeric property code; the known codes map
/// to stable display names, anything else keeps its code visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveProperty {
    Cur,
    Sample,
    Interval,
    Min,
    Max,
    Unknown(u32),
}

impl CurveProperty {
    /// Decode a wire property code.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Cur,
            2 => Self::Sample,
            4 => Self::Interval,
            8 => Self::Min,
            16 => Self::Max,
            other => Self::Unknown(other),
        }
    }

    /// Display name for the series legend.
    pub fn name(&self) -> String {
        match self {
            Self::Cur => String::from("cur"),
            Self::Sample => String::from("sample"),
            Self::Interval => String::from("interval"),
            Self::Min => String::from("min"),
            Self::Max => String::from("max"),
            Self::Unknown(code) => format!("property({})", code),
        }
    }
}

/// Payload data: per-property series for curves, bucket counts for
/// histograms.
///
/// On the wire this is either an object keyed by property code or a bare
/// array of counts; deserialization accepts property codes as JSON
/// numbers or as stringified numbers (object keys always arrive as
/// strings).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetricValues {
    /// Property code -> sampled values, all series the same length.
    Curve(BTreeMap<u32, Vec<f64>>),
    /// One count per original histogram bucket.
    Histogram(Vec<f64>),
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MetricValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt;

        struct PropertyCode(u32);

        impl<'de> serde::Deserialize<'de> for PropertyCode {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct CodeVisitor;

                impl serde::de::Visitor<'_> for CodeVisitor {
                    type Value = PropertyCode;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("a numeric property code")
                    }

                    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<PropertyCode, E> {
                        Ok(PropertyCode(v as u32))
                    }

                    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<PropertyCode, E> {
                        Ok(PropertyCode(v as u32))
                    }

                    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<PropertyCode, E> {
                        v.parse().map(PropertyCode).map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(CodeVisitor)
            }
        }

        struct ValuesVisitor;

        impl<'de> serde::de::Visitor<'de> for ValuesVisitor {
            type Value = MetricValues;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a property-keyed map of series or an array of bucket counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<MetricValues, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut series = BTreeMap::new();
                while let Some((PropertyCode(code), values)) =
                    map.next_entry::<PropertyCode, Vec<f64>>()?
                {
                    series.insert(code, values);
                }
                Ok(MetricValues::Curve(series))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<MetricValues, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut counts = Vec::new();
                while let Some(count) = seq.next_element::<f64>()? {
                    counts.push(count);
                }
                Ok(MetricValues::Histogram(counts))
            }
        }

        deserializer.deserialize_any(ValuesVisitor)
    }
}

impl MetricValues {
    pub fn as_curve(&self) -> Option<&BTreeMap<u32, Vec<f64>>> {
        match self {
            Self::Curve(series) => Some(series),
            Self::Histogram(_) => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&[f64]> {
        match self {
            Self::Histogram(counts) => Some(counts),
            Self::Curve(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Curve(series) => series.is_empty(),
            Self::Histogram(counts) => counts.is_empty(),
        }
    }
}

impl Default for MetricValues {
    fn default() -> Self {
        Self::Histogram(Vec::new())
    }
}

/// A raw metric payload fetched from a node, before chart transformation.
///
/// For histogram payloads `labels` holds the bucket boundary tokens, one
/// more than there are counts; the tokens are numbers or the `-Inf`/`+Inf`
/// sentinels.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawMetricPayload {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: PayloadKind,

    /// Unix seconds of the newest sample.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: i64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: DurationSpec,

    #[cfg_attr(feature = "serde", serde(default))]
    pub descriptor: Option<MetricDescriptor>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub values: MetricValues,

    #[cfg_attr(feature = "serde", serde(default))]
    pub labels: Vec<String>,
}

impl RawMetricPayload {
    /// The formatter resolved from the embedded descriptor, if any.
    pub fn formatter(&self) -> FormatterKind {
        self.descriptor
            .as_ref()
            .map(|d| d.formatter)
            .unwrap_or_default()
    }
}
