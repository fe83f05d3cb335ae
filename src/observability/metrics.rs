use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub deliveries_created_total: IntCounter,
    pub status_updates_total: IntCounterVec,
    pub drivers_created_total: IntCounter,
    pub notifications_marked_read_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let deliveries_created_total =
            IntCounter::new("deliveries_created_total", "Total deliveries created")
                .expect("valid deliveries_created_total metric");

        let status_updates_total = IntCounterVec::new(
            Opts::new("status_updates_total", "Total delivery status updates by new status"),
            &["status"],
        )
        .expect("valid status_updates_total metric");

        let drivers_created_total =
            IntCounter::new("drivers_created_total", "Total drivers created")
                .expect("valid drivers_created_total metric");

        let notifications_marked_read_total = IntCounter::new(
            "notifications_marked_read_total",
            "Total notifications transitioned from unread to read",
        )
        .expect("valid notifications_marked_read_total metric");

        registry
            .register(Box::new(deliveries_created_total.clone()))
            .expect("register deliveries_created_total");
        registry
            .register(Box::new(status_updates_total.clone()))
            .expect("register status_updates_total");
        registry
            .register(Box::new(drivers_created_total.clone()))
            .expect("register drivers_created_total");
        registry
            .register(Box::new(notifications_marked_read_total.clone()))
            .expect("register notifications_marked_read_total");

        Self {
            registry,
            deliveries_created_total,
            status_updates_total,
            drivers_created_total,
            notifications_marked_read_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Metrics;

    #[test]
    fn encoded_output_lists_action_counters() {
        let metrics = Metrics::new();
        metrics.deliveries_created_total.inc();
        metrics
            .status_updates_total
            .with_label_values(&["Delivered"])
            .inc();

        let body = metrics.encode().unwrap();
        assert!(body.contains("deliveries_created_total 1"));
        assert!(body.contains("status_updates_total{status=\"Delivered\"} 1"));
    }
}
