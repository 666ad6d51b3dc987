//! Chart-ready output model.
//!
//! This is the boundary handed to the rendering layer: the transformer
//! produces a [`ChartModel`] and the renderer consumes it verbatim. Nothing
//! in here knows how pixels are drawn.

use alloc::string::String;
use alloc::vec::Vec;

use crate::FormatterKind;

/// How the x axis should be interpreted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AxisKind {
    /// Time-of-day labels (`HH:MM:SS`).
    Time,
    /// Full calendar labels (`YYYY/MM/DD HH:MM:SS`).
    DateTime,
    /// Discrete category labels (histogram buckets).
    Category,
}

/// Mark type for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RenderType {
    Line,
    Bar,
}

/// Fill treatment for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FillStyle {
    Solid,
    Gradient,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSeries {
    pub name: String,
    pub render: RenderType,
    pub fill: FillStyle,
    pub data: Vec<f64>,
}

/// The complete chart-ready model for one metric payload.
///
/// Invariant: every series' `data` has the same length as `labels`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub x_axis: AxisKind,
    /// Value-axis label rule, resolved from the metric descriptor.
    pub y_formatter: FormatterKind,
}

impl ChartModel {
    /// An empty but valid model: no labels, no series.
    pub fn empty(x_axis: AxisKind, y_formatter: FormatterKind) -> Self {
        Self {
            labels: Vec::new(),
            series: Vec::new(),
            x_axis,
            y_formatter,
        }
    }
}
