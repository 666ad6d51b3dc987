//! The reactive selection pipeline.
//!
//! Folds selection events into state and drives the fetch chain:
//! node lookup -> metric-list fetch -> duration reconciliation -> payload
//! fetch -> chart transform. Fetches run on spawned tasks and report back
//! over a channel; each is tagged with the exact selection tuple that
//! issued it, and a result whose tag no longer matches the current
//! selection is discarded without touching any state. Last selection wins.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use gaugeview_client::{list_url, payload_url, ClientError, MetricFetch, NodeRegistry};
use gaugeview_types::{ChartModel, DurationSpec, MetricDescriptor, RawMetricPayload};

use crate::data::transform;
use crate::selection::{DurationSelection, MetricScope, SelectionEvent, SelectionState};
use crate::status::{StatusLevel, StatusMessage};

const SELECT_PROMPT: &str = "Select zone, family and name to show data";

/// Identity of a metric-list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListKey {
    pub scope: MetricScope,
    pub zone: String,
    pub family: String,
}

/// Identity of a payload fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadKey {
    pub scope: MetricScope,
    pub zone: String,
    pub family: String,
    pub metric: String,
    pub duration: DurationSpec,
}

/// A completed fetch, tagged with the selection tuple that issued it.
#[derive(Debug)]
pub enum FetchOutcome {
    MetricList {
        key: ListKey,
        url: String,
        result: Result<Vec<MetricDescriptor>, ClientError>,
    },
    Payload {
        key: PayloadKey,
        url: String,
        result: Result<RawMetricPayload, ClientError>,
    },
}

/// Owns all selection-derived state: the current selection, the fetched
/// metric list, the chart model, and the status message shown when there
/// is no chart.
///
/// All mutation goes through [`apply`](Self::apply) (selection events) and
/// [`handle`](Self::handle) (fetch outcomes); fetches never touch state
/// directly, so a superseded fetch cannot overwrite a newer selection.
///
/// Spawns fetch tasks, so it must live inside a tokio runtime.
pub struct SelectionPipeline {
    registry: NodeRegistry,
    client: Arc<dyn MetricFetch>,
    state: SelectionState,
    metrics: Vec<MetricDescriptor>,
    chart: Option<ChartModel>,
    status: StatusMessage,
    tx: mpsc::Sender<FetchOutcome>,
    rx: mpsc::Receiver<FetchOutcome>,
    in_flight: usize,
}

impl SelectionPipeline {
    pub fn new(registry: NodeRegistry, client: Arc<dyn MetricFetch>) -> Self {
        let (tx, rx) = mpsc::channel(16);
        Self {
            registry,
            client,
            state: SelectionState::default(),
            metrics: Vec::new(),
            chart: None,
            status: StatusMessage::info(SELECT_PROMPT),
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The fetched metric listing, sorted by `(level, name)`.
    pub fn metrics(&self) -> &[MetricDescriptor] {
        &self.metrics
    }

    pub fn chart(&self) -> Option<&ChartModel> {
        self.chart.as_ref()
    }

    pub fn status(&self) -> &StatusMessage {
        &self.status
    }

    /// Zones available for selection.
    pub fn zones(&self) -> Vec<String> {
        self.registry.zones()
    }

    /// Families available under the currently selected zone.
    pub fn families(&self) -> Vec<String> {
        self.registry.lookup_families(&self.state.zone)
    }

    /// Apply one selection event and spawn whatever fetches it triggers.
    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::Scope(scope) => {
                debug!("scope changed to {}", scope);
                self.state.scope = scope;
                self.state.metric = None;
                self.refresh_metrics();
            }
            SelectionEvent::Zone(zone) => {
                debug!("zone changed to {}", zone);
                self.state.zone = zone;
                self.state.metric = None;
                self.refresh_metrics();
            }
            SelectionEvent::Family(family) => {
                debug!("family changed to {}", family);
                self.state.family = family;
                self.state.metric = None;
                self.refresh_metrics();
            }
            SelectionEvent::Metric(name) => {
                debug!("metric changed to {}", name);
                self.chart = None;
                self.state.metric = self.metrics.iter().find(|m| m.name == name).cloned();
                if let Some(metric) = self.state.metric.clone() {
                    self.state.duration.reconcile(&metric.durations);
                    self.refresh_chart();
                }
            }
            SelectionEvent::Duration(duration) => {
                debug!("duration changed to {}x{}s", duration.count, duration.unit);
                self.state.duration = DurationSelection::Active(duration);
                self.refresh_chart();
            }
        }
    }

    /// Apply a completed fetch. Outcomes tagged with a superseded
    /// selection are discarded here; this is the only place fetch results
    /// touch state.
    pub fn handle(&mut self, outcome: FetchOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            FetchOutcome::MetricList { key, url, result } => {
                if key != self.list_key() {
                    debug!("discarding stale metric list for {}/{}", key.zone, key.family);
                    return;
                }
                match result {
                    Ok(mut metrics) => {
                        metrics.sort_by(|a, b| {
                            a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name))
                        });
                        self.metrics = metrics;
                        self.set_status(StatusMessage::info("Select name to show chart"));
                    }
                    Err(err) => self.report_fetch_error(&url, err),
                }
            }
            FetchOutcome::Payload { key, url, result } => {
                if self.payload_key().as_ref() != Some(&key) {
                    debug!("discarding stale payload for {}", key.metric);
                    return;
                }
                match result {
                    Ok(payload) => match transform(&payload) {
                        Ok(model) => self.chart = Some(model),
                        Err(err) => {
                            self.chart = None;
                            self.set_status(StatusMessage::error(err.to_string()));
                        }
                    },
                    Err(err) => self.report_fetch_error(&url, err),
                }
            }
        }
    }

    /// Wait for all outstanding fetches to complete and apply them.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(outcome) => self.handle(outcome),
                None => break,
            }
        }
    }

    /// Non-blocking drain of completed fetches, for interactive callers.
    /// Returns true if anything was applied.
    pub fn poll(&mut self) -> bool {
        let mut handled = false;
        while let Ok(outcome) = self.rx.try_recv() {
            self.handle(outcome);
            handled = true;
        }
        handled
    }

    fn list_key(&self) -> ListKey {
        ListKey {
            scope: self.state.scope,
            zone: self.state.zone.clone(),
            family: self.state.family.clone(),
        }
    }

    fn payload_key(&self) -> Option<PayloadKey> {
        let metric = self.state.metric.as_ref()?;
        Some(PayloadKey {
            scope: self.state.scope,
            zone: self.state.zone.clone(),
            family: self.state.family.clone(),
            metric: metric.name.clone(),
            duration: self.state.duration.effective(),
        })
    }

    /// Refetch the metric listing for the current target, clearing
    /// whatever the previous target had loaded.
    fn refresh_metrics(&mut self) {
        self.metrics.clear();
        self.chart = None;
        if !self.state.has_target() {
            self.set_status(StatusMessage::info(SELECT_PROMPT));
            return;
        }
        let Some(node) = self
            .registry
            .lookup_node(&self.state.zone, &self.state.family)
        else {
            self.set_status(StatusMessage::error(format!(
                "Node not found by zone {} and family {}",
                self.state.zone, self.state.family
            )));
            return;
        };

        let address = node.address.clone();
        let url = list_url(&address, self.state.scope.as_str());
        self.set_status(StatusMessage::info(format!("Loading {}...", url)));

        let key = self.list_key();
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = client.list_metrics(&address, key.scope.as_str()).await;
            let _ = tx.send(FetchOutcome::MetricList { key, url, result }).await;
        });
    }

    /// Refetch the payload for the current metric and duration.
    fn refresh_chart(&mut self) {
        self.chart = None;
        let Some(metric) = self.state.metric.clone() else {
            return;
        };
        if !self.state.has_target() {
            return;
        }
        let Some(node) = self
            .registry
            .lookup_node(&self.state.zone, &self.state.family)
        else {
            self.set_status(StatusMessage::error(format!(
                "Node not found by zone {} and family {}",
                self.state.zone, self.state.family
            )));
            return;
        };

        let address = node.address.clone();
        let duration = self.state.duration.effective();
        let url = payload_url(&address, self.state.scope.as_str(), &metric.name, duration);
        self.set_status(StatusMessage::info(format!("Loading {}...", url)));

        let key = PayloadKey {
            scope: self.state.scope,
            zone: self.state.zone.clone(),
            family: self.state.family.clone(),
            metric: metric.name.clone(),
            duration,
        };
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = client
                .fetch_payload(&address, key.scope.as_str(), &key.metric, key.duration)
                .await;
            let _ = tx.send(FetchOutcome::Payload { key, url, result }).await;
        });
    }

    fn report_fetch_error(&mut self, url: &str, err: ClientError) {
        match err {
            ClientError::Api { url, message } => self.set_status(StatusMessage::warn(format!(
                "An error returned from {}: {}",
                url, message
            ))),
            other => self.set_status(StatusMessage::error(format!(
                "Failed to fetch {}: {}",
                url, other
            ))),
        }
    }

    fn set_status(&mut self, status: StatusMessage) {
        match status.level {
            StatusLevel::Info => info!("{}", status.text),
            StatusLevel::Warn => warn!("{}", status.text),
            StatusLevel::Error => error!("{}", status.text),
        }
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gaugeview_client::{Node, NodeRegistry};
    use gaugeview_types::{MetricLevel, MetricValues, PayloadKind};
    use std::collections::BTreeMap;

    /// Canned fetcher standing in for the HTTP client.
    struct FakeFetch {
        metrics: Vec<MetricDescriptor>,
        payload: RawMetricPayload,
        refuse_list: bool,
    }

    #[async_trait]
    impl MetricFetch for FakeFetch {
        async fn list_metrics(
            &self,
            address: &str,
            scope: &str,
        ) -> Result<Vec<MetricDescriptor>, ClientError> {
            if self.refuse_list {
                return Err(ClientError::Api {
                    url: list_url(address, scope),
                    message: "listing disabled".into(),
                });
            }
            Ok(self.metrics.clone())
        }

        async fn fetch_payload(
            &self,
            _address: &str,
            _scope: &str,
            _name: &str,
            _duration: DurationSpec,
        ) -> Result<RawMetricPayload, ClientError> {
            Ok(self.payload.clone())
        }
    }

    fn sample_registry() -> NodeRegistry {
        NodeRegistry::from_nodes(vec![
            Node {
                zone: "us-east".into(),
                family: "storage".into(),
                address: "http://storage-1:9100".into(),
                status: "success".into(),
            },
            Node {
                zone: "eu-west".into(),
                family: "storage".into(),
                address: "http://storage-2:9100".into(),
                status: "success".into(),
            },
        ])
    }

    fn sample_metrics() -> Vec<MetricDescriptor> {
        vec![
            MetricDescriptor {
                name: "zz_requests".into(),
                level: MetricLevel::Important,
                durations: vec![DurationSpec::new(60, 60), DurationSpec::new(3600, 24)],
                ..Default::default()
            },
            MetricDescriptor {
                name: "aa_threads".into(),
                level: MetricLevel::Other,
                ..Default::default()
            },
            MetricDescriptor {
                name: "heap_used".into(),
                level: MetricLevel::Important,
                durations: vec![DurationSpec::new(60, 60)],
                ..Default::default()
            },
        ]
    }

    fn sample_payload() -> RawMetricPayload {
        let mut series = BTreeMap::new();
        series.insert(1, vec![1.0, 2.0, 3.0]);
        RawMetricPayload {
            kind: PayloadKind::Curve,
            timestamp: 1_700_000_000,
            duration: DurationSpec::new(60, 60),
            descriptor: None,
            values: MetricValues::Curve(series),
            labels: Vec::new(),
        }
    }

    fn pipeline_with(fetch: FakeFetch) -> SelectionPipeline {
        SelectionPipeline::new(sample_registry(), Arc::new(fetch))
    }

    fn select_target(pipeline: &mut SelectionPipeline, zone: &str, family: &str) {
        pipeline.apply(SelectionEvent::Scope(MetricScope::Metrics));
        pipeline.apply(SelectionEvent::Zone(zone.into()));
        pipeline.apply(SelectionEvent::Family(family.into()));
    }

    #[tokio::test]
    async fn metric_list_is_sorted_by_level_then_name() {
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: sample_metrics(),
            payload: sample_payload(),
            refuse_list: false,
        });
        select_target(&mut pipeline, "us-east", "storage");
        pipeline.settle().await;

        let names: Vec<&str> = pipeline.metrics().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["heap_used", "zz_requests", "aa_threads"]);
        assert_eq!(
            pipeline.status(),
            &StatusMessage::info("Select name to show chart")
        );
    }

    #[tokio::test]
    async fn unknown_target_reports_node_not_found() {
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: Vec::new(),
            payload: sample_payload(),
            refuse_list: false,
        });
        select_target(&mut pipeline, "ap-south", "storage");
        pipeline.settle().await;

        assert_eq!(pipeline.status().level, StatusLevel::Error);
        assert_eq!(
            pipeline.status().text,
            "Node not found by zone ap-south and family storage"
        );
        assert!(pipeline.metrics().is_empty());
    }

    #[tokio::test]
    async fn selecting_a_metric_produces_a_chart() {
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: sample_metrics(),
            payload: sample_payload(),
            refuse_list: false,
        });
        select_target(&mut pipeline, "us-east", "storage");
        pipeline.settle().await;

        pipeline.apply(SelectionEvent::Metric("heap_used".into()));
        pipeline.settle().await;

        let chart = pipeline.chart().expect("chart should be set");
        assert_eq!(chart.labels.len(), 3);
        assert_eq!(chart.series.len(), 1);
        // The metric's first window became active.
        assert_eq!(
            pipeline.state().duration.active(),
            Some(DurationSpec::new(60, 60))
        );
    }

    #[tokio::test]
    async fn active_duration_survives_metric_change_when_offered() {
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: sample_metrics(),
            payload: sample_payload(),
            refuse_list: false,
        });
        select_target(&mut pipeline, "us-east", "storage");
        pipeline.settle().await;

        pipeline.apply(SelectionEvent::Metric("heap_used".into()));
        pipeline.settle().await;
        assert_eq!(
            pipeline.state().duration.active(),
            Some(DurationSpec::new(60, 60))
        );

        // zz_requests also offers 60x60, so the window is preserved.
        pipeline.apply(SelectionEvent::Metric("zz_requests".into()));
        pipeline.settle().await;
        assert_eq!(
            pipeline.state().duration.active(),
            Some(DurationSpec::new(60, 60))
        );

        // aa_threads has no windows at all.
        pipeline.apply(SelectionEvent::Metric("aa_threads".into()));
        pipeline.settle().await;
        assert_eq!(pipeline.state().duration, DurationSelection::NoDurations);
        assert!(pipeline.chart().is_some());
    }

    #[tokio::test]
    async fn stale_payload_is_discarded() {
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: sample_metrics(),
            payload: sample_payload(),
            refuse_list: false,
        });
        select_target(&mut pipeline, "us-east", "storage");
        pipeline.settle().await;

        // A payload fetched for the old target arrives after the user has
        // moved on to another zone.
        let stale_key = PayloadKey {
            scope: MetricScope::Metrics,
            zone: "us-east".into(),
            family: "storage".into(),
            metric: "heap_used".into(),
            duration: DurationSpec::new(60, 60),
        };
        pipeline.apply(SelectionEvent::Zone("eu-west".into()));

        let status_before = pipeline.status().clone();
        pipeline.handle(FetchOutcome::Payload {
            key: stale_key,
            url: "http://storage-1:9100/metrics/get?name=heap_used".into(),
            result: Ok(sample_payload()),
        });

        assert!(pipeline.chart().is_none());
        assert_eq!(pipeline.status(), &status_before);
    }

    #[tokio::test]
    async fn stale_metric_list_is_discarded() {
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: Vec::new(),
            payload: sample_payload(),
            refuse_list: false,
        });
        select_target(&mut pipeline, "eu-west", "storage");
        pipeline.settle().await;

        pipeline.handle(FetchOutcome::MetricList {
            key: ListKey {
                scope: MetricScope::Metrics,
                zone: "us-east".into(),
                family: "storage".into(),
            },
            url: "http://storage-1:9100/metrics/list".into(),
            result: Ok(sample_metrics()),
        });

        assert!(pipeline.metrics().is_empty());
    }

    #[tokio::test]
    async fn api_error_surfaces_as_warning() {
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: sample_metrics(),
            payload: sample_payload(),
            refuse_list: true,
        });
        select_target(&mut pipeline, "us-east", "storage");
        pipeline.settle().await;

        assert_eq!(pipeline.status().level, StatusLevel::Warn);
        assert_eq!(
            pipeline.status().text,
            "An error returned from http://storage-1:9100/metrics/list: listing disabled"
        );
    }

    #[tokio::test]
    async fn unsupported_kind_reports_the_valid_kinds() {
        let mut payload = sample_payload();
        payload.kind = PayloadKind::Other("gauge".into());
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: sample_metrics(),
            payload,
            refuse_list: false,
        });
        select_target(&mut pipeline, "us-east", "storage");
        pipeline.settle().await;
        pipeline.apply(SelectionEvent::Metric("heap_used".into()));
        pipeline.settle().await;

        assert!(pipeline.chart().is_none());
        assert_eq!(pipeline.status().level, StatusLevel::Error);
        assert_eq!(
            pipeline.status().text,
            "data kind should be one of (curve,histogram), but got gauge"
        );
    }

    #[tokio::test]
    async fn changing_duration_refetches_the_payload() {
        let mut pipeline = pipeline_with(FakeFetch {
            metrics: sample_metrics(),
            payload: sample_payload(),
            refuse_list: false,
        });
        select_target(&mut pipeline, "us-east", "storage");
        pipeline.settle().await;
        pipeline.apply(SelectionEvent::Metric("zz_requests".into()));
        pipeline.settle().await;
        assert!(pipeline.chart().is_some());

        pipeline.apply(SelectionEvent::Duration(DurationSpec::new(3600, 24)));
        // The chart is cleared until the new payload lands.
        assert!(pipeline.chart().is_none());
        pipeline.settle().await;
        assert!(pipeline.chart().is_some());
        assert_eq!(
            pipeline.state().duration.active(),
            Some(DurationSpec::new(3600, 24))
        );
    }
}
