//! # gaugeview
//!
//! Dashboard core for visualizing runtime and metrics data collected from
//! remote nodes addressed by `(zone, family)`.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      SelectionPipeline                         │
//! │                                                                │
//! │  selection events ──▶ SelectionState ──▶ tagged fetches        │
//! │        │                    │                  │               │
//! │        ▼                    ▼                  ▼               │
//! │  DurationSelection   NodeRegistry        MetricFetch           │
//! │  (state machine)     (zone/family ──▶    (HTTP list/get)       │
//! │                       address)                 │               │
//! │                                                ▼               │
//! │                     RawMetricPayload ──▶ data::transform       │
//! │                                                │               │
//! │                                                ▼               │
//! │                                           ChartModel           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: the transformation pipeline - value-label humanization,
//!   time-axis label synthesis for curve payloads, and canonical bucket
//!   remapping for histograms, dispatched by payload kind
//! - **[`selection`]**: selection state and the duration-selection state
//!   machine that keeps the active window consistent across metric changes
//! - **[`pipeline`]**: the reactive chain from selection events to chart
//!   models, with stale fetch results discarded by selection-tuple tag
//! - **[`status`]**: leveled status messages shown in place of a chart
//! - **[`settings`]**: node registry loading from a config file
//!
//! Node addressing and HTTP access live in the `gaugeview-client` crate;
//! the wire schema and the chart output model live in `gaugeview-types`.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gaugeview::{MetricScope, SelectionEvent, SelectionPipeline};
//! use gaugeview_client::{MetricClient, Node, NodeRegistry};
//!
//! # tokio_test::block_on(async {
//! let registry = NodeRegistry::from_nodes(vec![Node {
//!     zone: "local".into(),
//!     family: "local".into(),
//!     address: "http://localhost:9100".into(),
//!     status: "success".into(),
//! }]);
//!
//! let mut pipeline = SelectionPipeline::new(registry, Arc::new(MetricClient::new()));
//! pipeline.apply(SelectionEvent::Scope(MetricScope::Metrics));
//! pipeline.apply(SelectionEvent::Zone("local".into()));
//! pipeline.apply(SelectionEvent::Family("local".into()));
//! pipeline.settle().await;
//!
//! for metric in pipeline.metrics() {
//!     println!("{}", metric.name);
//! }
//! # });
//! ```

pub mod data;
pub mod pipeline;
pub mod selection;
pub mod settings;
pub mod status;

pub use data::{transform, TransformError};
pub use pipeline::{FetchOutcome, ListKey, PayloadKey, SelectionPipeline};
pub use selection::{DurationSelection, MetricScope, SelectionEvent, SelectionState};
pub use status::{StatusLevel, StatusMessage};
