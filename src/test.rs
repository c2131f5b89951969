use super::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{MetricDatum, PutMetricDataRequest};
    use http::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::watch;

    /// Answers each call with the next scripted response, 200 once the script runs out
    #[derive(Default)]
    struct Scripted {
        responses: Mutex<VecDeque<Result<StatusCode, Error>>>,
        requests: Mutex<Vec<(String, Vec<MetricDatum>)>>,
    }

    impl Scripted {
        fn answering(responses: impl IntoIterator<Item = Result<StatusCode, Error>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                ..Default::default()
            }
        }

        fn requests(&self) -> Vec<(String, Vec<MetricDatum>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for Scripted {
        async fn put_metric_data(&self, request: &PutMetricDataRequest<'_>) -> Result<StatusCode, Error> {
            self.requests
                .lock()
                .unwrap()
                .push((request.namespace.to_string(), request.metric_data.to_vec()));
            self.responses.lock().unwrap().pop_front().unwrap_or(Ok(StatusCode::OK))
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn reporter(transport: Scripted) -> Reporter<Scripted> {
        init_tracing();
        Builder::new()
            .cloudwatch_namespace("namespace")
            .with_dimension("Address", "10.172.207.225")
            .build(transport)
            .unwrap()
    }

    fn counters(context: &str, count: usize) -> ContextSnapshot {
        (0..count).fold(ContextSnapshot::new(context), |context, index| {
            context.with_counter(format!("c{index}"), Unit::Items, index as u64)
        })
    }

    #[tokio::test]
    async fn single_counter() {
        let reporter = reporter(Scripted::default());
        let (_tx, cancel) = watch::channel(false);
        let snapshot =
            MetricsSnapshot::new(1687657545423).with_context(ContextSnapshot::new("web").with_counter("requests", Unit::Items, 42));

        assert!(reporter.flush(&snapshot, &cancel).await);

        let requests = reporter.transport().requests();
        assert_eq!(requests.len(), 1);
        let (namespace, data) = &requests[0];
        assert_eq!(namespace, "namespace");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].metric_name, "[web] requests-Items");
        assert_eq!(data[0].value, 42.0);
        assert_eq!(data[0].timestamp, 1687657545423);
        assert_eq!(&*data[0].dimensions, &[Dimension::new("Address", "10.172.207.225")]);
    }

    #[tokio::test]
    async fn twenty_five_counters_make_two_requests() {
        let reporter = reporter(Scripted::default());
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0).with_context(counters("web", 25));

        assert!(reporter.flush(&snapshot, &cancel).await);

        let requests = reporter.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].1.len(), 20);
        assert_eq!(requests[0].1[0].metric_name, "[web] c0-Items");
        assert_eq!(requests[0].1[19].metric_name, "[web] c19-Items");
        assert_eq!(requests[1].1.len(), 5);
        assert_eq!(requests[1].1[4].metric_name, "[web] c24-Items");
    }

    #[tokio::test]
    async fn exactly_twenty_sends_once() {
        let reporter = reporter(Scripted::default());
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0).with_context(counters("web", 20));

        assert!(reporter.flush(&snapshot, &cancel).await);
        assert_eq!(reporter.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn infinite_gauge_is_dropped() {
        let reporter = reporter(Scripted::default());
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0).with_context(
            ContextSnapshot::new("app")
                .with_gauge("a", Unit::Percent, 1.5)
                .with_gauge("b", Unit::Percent, f64::INFINITY)
                .with_gauge("c", Unit::Percent, f64::NAN)
                .with_gauge("d", Unit::Percent, 2.5),
        );

        assert!(reporter.flush(&snapshot, &cancel).await);

        let requests = reporter.transport().requests();
        assert_eq!(requests.len(), 1);
        let names: Vec<_> = requests[0].1.iter().map(|d| d.metric_name.as_str()).collect();
        assert_eq!(names, vec!["[app] a-Percent", "[app] d-Percent"]);
    }

    #[tokio::test]
    async fn rejected_status_fails_flush() {
        let reporter = reporter(Scripted::answering([Ok(StatusCode::INTERNAL_SERVER_ERROR)]));
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0).with_context(counters("web", 3));

        assert!(!reporter.flush(&snapshot, &cancel).await);
        assert_eq!(reporter.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn transport_error_fails_flush() {
        let reporter = reporter(Scripted::answering([Err(Error::from("connection reset"))]));
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0).with_context(counters("web", 1));

        assert!(!reporter.flush(&snapshot, &cancel).await);
    }

    #[tokio::test]
    async fn failure_stops_the_walk() {
        let reporter = reporter(Scripted::answering([Ok(StatusCode::OK), Ok(StatusCode::FORBIDDEN)]));
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0)
            .with_context(counters("first", 30))
            .with_context(counters("second", 30));

        assert!(!reporter.flush(&snapshot, &cancel).await);

        // 20 sent, the next 20 rejected and nothing after that attempted
        let requests = reporter.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].1[0].metric_name, "[first] c20-Items");
        assert_eq!(requests[1].1[19].metric_name, "[second] c9-Items");
    }

    #[tokio::test]
    async fn failed_batch_is_not_resent() {
        let reporter = reporter(Scripted::answering([Ok(StatusCode::SERVICE_UNAVAILABLE)]));
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0).with_context(counters("web", 2));

        assert!(!reporter.flush(&snapshot, &cancel).await);
        assert!(reporter.flush(&snapshot, &cancel).await);

        let requests = reporter.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].1.len(), 2);
    }

    #[tokio::test]
    async fn empty_snapshot_sends_nothing() {
        let reporter = reporter(Scripted::default());
        let (_tx, cancel) = watch::channel(false);

        assert!(reporter.flush(&MetricsSnapshot::new(0), &cancel).await);
        assert!(reporter.flush(&MetricsSnapshot::new(0).with_context(ContextSnapshot::new("idle")), &cancel).await);
        assert!(reporter.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn all_kinds_in_walk_order() {
        let reporter = reporter(Scripted::default());
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0).with_context(
            ContextSnapshot::new("svc")
                .with_timer(
                    "latency",
                    Unit::Milliseconds,
                    TimerValue {
                        count: 4,
                        histogram: HistogramValue {
                            mean: 8.25,
                            ..Default::default()
                        },
                    },
                )
                .with_meter(
                    "hits",
                    Unit::Requests,
                    MeterValue {
                        count: 9,
                        ..Default::default()
                    },
                )
                .with_gauge("memory", Unit::Megabytes, 512.0)
                .with_counter("errors", Unit::Errors, 2)
                .with_apdex(
                    "apdex",
                    Unit::Results,
                    ApdexValue {
                        score: 0.75,
                        ..Default::default()
                    },
                ),
        );

        assert!(reporter.flush(&snapshot, &cancel).await);

        let sent: Vec<_> = reporter.transport().requests()[0]
            .1
            .iter()
            .map(|d| (d.metric_name.clone(), d.value))
            .collect();
        assert_eq!(
            sent,
            vec![
                ("[svc] apdex-Results".to_string(), 0.75),
                ("[svc] errors-Errors".to_string(), 2.0),
                ("[svc] memory-Megabytes".to_string(), 512.0),
                ("[svc] hits-Requests".to_string(), 9.0),
                ("[svc] latency-Milliseconds".to_string(), 8.25),
            ]
        );
    }

    #[tokio::test]
    async fn filter_skips_measurements() {
        init_tracing();
        let reporter = Builder::new()
            .cloudwatch_namespace("namespace")
            .filter(|context: &str, kind: MetricKind, _: &str| context == "web" && kind == MetricKind::Counter)
            .build(Scripted::default())
            .unwrap();
        let (_tx, cancel) = watch::channel(false);
        let snapshot = MetricsSnapshot::new(0)
            .with_context(ContextSnapshot::new("web").with_counter("requests", Unit::Items, 1).with_gauge(
                "queue",
                Unit::Items,
                4.0,
            ))
            .with_context(counters("internal", 3));

        assert!(reporter.flush(&snapshot, &cancel).await);

        let requests = reporter.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1.len(), 1);
        assert_eq!(requests[0].1[0].metric_name, "[web] requests-Items");
    }

    #[test]
    fn empty_namespace_is_rejected() {
        assert!(matches!(
            Builder::new().cloudwatch_namespace("").build(Scripted::default()),
            Err(ConfigError::InvalidConfiguration(_))
        ));
        assert!(matches!(ReportingOptions::new(" "), Err(ConfigError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn writer_transport_end_to_end() {
        init_tracing();
        let mut output = Vec::new();
        {
            let reporter = Builder::new()
                .cloudwatch_namespace("namespace")
                .with_dimension("Port", "7779")
                .build(WriterTransport::new(&mut output))
                .unwrap();
            let (_tx, cancel) = watch::channel(false);
            let snapshot = MetricsSnapshot::new(1687657545423)
                .with_context(ContextSnapshot::new("web").with_counter("requests", Unit::Items, 42));

            assert!(reporter.flush(&snapshot, &cancel).await);
        }

        let output_str = std::str::from_utf8(&output).unwrap();
        assert_eq!(
            output_str,
            r#"{"Namespace":"namespace","MetricData":[{"MetricName":"[web] requests-Items","Dimensions":[{"Name":"Port","Value":"7779"}],"Timestamp":1687657545423,"Unit":"None","Value":42.0}]}
"#
        );
    }
}
