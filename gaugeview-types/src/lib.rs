//! # gaugeview-types
//!
//! Core schema for the gaugeview dashboard. This crate defines the types
//! exchanged with monitored nodes (metric descriptors and raw payloads) and
//! the chart-ready model handed to the rendering layer.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: the schema works without any
//!   serialization framework
//! - **Optional serialization**: enable the `serde` feature as needed
//! - **Structural equality**: durations and selection tuples compare by
//!   value, never by identity
//! - **Resolved at the boundary**: formatter kinds and curve property codes
//!   are decoded into closed enums once, when a payload is parsed, not
//!   re-interpreted per render
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `serde`: JSON serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use gaugeview_types::{DurationSpec, MetricDescriptor, MetricLevel};
//!
//! let descriptor = MetricDescriptor {
//!     name: "rpc_latency".into(),
//!     level: MetricLevel::Important,
//!     description: "RPC round-trip latency".into(),
//!     formatter: gaugeview_types::FormatterKind::HistogramSeconds,
//!     durations: vec![DurationSpec::new(60, 60), DurationSpec::new(3600, 24)],
//! };
//!
//! assert_eq!(descriptor.durations[0].window(), 3600);
//! assert_eq!(descriptor.durations[0].describe(), "1 Hour");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod chart;
mod descriptor;
mod duration;
mod payload;

pub use chart::*;
pub use descriptor::*;
pub use duration::*;
pub use payload::*;
