use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gaugeview::settings::load_registry;
use gaugeview::{MetricScope, SelectionEvent, SelectionPipeline, StatusLevel};
use gaugeview_client::MetricClient;
use gaugeview_types::DurationSpec;

#[derive(Parser, Debug)]
#[command(name = "gaugeview")]
#[command(about = "Fetch node metrics and print chart-ready models")]
struct Args {
    /// Path to the node registry config file
    #[arg(short, long, default_value = "gaugeview.toml")]
    config: PathBuf,

    /// Metric scope to browse (metrics or runtime)
    #[arg(short, long, default_value = "metrics")]
    scope: MetricScope,

    /// Zone of the target node
    #[arg(short, long)]
    zone: String,

    /// Family of the target node
    #[arg(short, long)]
    family: String,

    /// Metric name; omit to list the node's metrics instead
    #[arg(short, long)]
    name: Option<String>,

    /// Sampling unit in seconds (overrides the metric's default window)
    #[arg(long, requires = "count")]
    unit: Option<u64>,

    /// Sample count (used with --unit)
    #[arg(long, requires = "unit")]
    count: Option<u64>,

    /// Pretty-print the chart model
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let registry = load_registry(&args.config)?;
    let mut pipeline = SelectionPipeline::new(registry, Arc::new(MetricClient::new()));

    pipeline.apply(SelectionEvent::Scope(args.scope));
    pipeline.apply(SelectionEvent::Zone(args.zone));
    pipeline.apply(SelectionEvent::Family(args.family));
    pipeline.settle().await;

    if pipeline.metrics().is_empty() && pipeline.status().level != StatusLevel::Info {
        bail!("{}", pipeline.status());
    }

    let Some(name) = args.name else {
        print_listing(&pipeline);
        return Ok(());
    };

    if !pipeline.metrics().iter().any(|m| m.name == name) {
        bail!("metric {:?} not found; omit --name to list available metrics", name);
    }

    pipeline.apply(SelectionEvent::Metric(name));
    if let (Some(unit), Some(count)) = (args.unit, args.count) {
        pipeline.apply(SelectionEvent::Duration(DurationSpec::new(unit, count)));
    }
    pipeline.settle().await;

    match pipeline.chart() {
        Some(model) => {
            let json = if args.pretty {
                serde_json::to_string_pretty(model)?
            } else {
                serde_json::to_string(model)?
            };
            println!("{}", json);
            Ok(())
        }
        None => bail!("{}", pipeline.status()),
    }
}

fn print_listing(pipeline: &SelectionPipeline) {
    for metric in pipeline.metrics() {
        let windows: Vec<String> = metric.durations.iter().map(|d| d.describe()).collect();
        println!(
            "{:<10} {:<40} {}",
            metric.level.as_str(),
            metric.name,
            windows.join(", ")
        );
        if !metric.description.is_empty() {
            println!("{:<10} {}", "", metric.description);
        }
    }
}
