//! # gaugeview-client
//!
//! Node registry and HTTP metric client for the gaugeview dashboard.
//!
//! Monitored nodes are addressed by a `(zone, family)` pair; the
//! [`NodeRegistry`] resolves pairs to HTTP addresses and enumerates the
//! zones and families available for selection. The [`MetricClient`] talks
//! to a node's metric endpoints:
//!
//! - `GET {address}/{scope}/list` - the metrics a node exposes
//! - `GET {address}/{scope}/get?name=...&duration.unit=...&duration.count=...`
//!   - one raw metric payload
//!
//! where `scope` is `metrics` or `runtime`. Both endpoints may answer with
//! an `{"error": "..."}` body instead of data; that surfaces as
//! [`ClientError::Api`] so callers can distinguish a node-side refusal from
//! a transport failure.
//!
//! The [`MetricFetch`] trait abstracts the client so the selection pipeline
//! can be driven by a fake in tests.

mod error;
mod http;
mod registry;

pub use error::ClientError;
pub use http::{list_url, payload_url, MetricClient, MetricFetch};
pub use registry::{Node, NodeRegistry};
