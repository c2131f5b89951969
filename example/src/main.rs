use metrics_cloudwatch_reporter::{schedule, Builder, ContextSnapshot, MetricsSnapshot, Unit, WriterTransport};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Stand-in for a real metrics registry, counts how many snapshots were taken
fn take_snapshot(taken: &mut u64) -> MetricsSnapshot {
    *taken += 1;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    MetricsSnapshot::new(timestamp).with_context(
        ContextSnapshot::new("example")
            .with_counter("snapshots", Unit::Items, *taken)
            .with_gauge("uptime", Unit::Seconds, *taken as f64 * 5.0),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .compact()
        .init();

    let reporter = Builder::new()
        .cloudwatch_namespace("MetricsTest")
        .with_dimension("Host", std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string()))
        .flush_interval(Duration::from_secs(5))
        .build(WriterTransport::new(std::io::stdout()))?;

    let (shutdown, signal) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(true);
        }
    });

    let mut taken = 0;
    schedule::run(&reporter, || take_snapshot(&mut taken), signal).await;
    Ok(())
}
