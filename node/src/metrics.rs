//! # Prometheus Metrics
//!
//! Counts what a replay did: calls committed and rejected, transfers that
//! paid a fee, and the fee volume routed to the collector.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] so they
//! do not collide with any default global registry consumers.

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use tollgate_contracts::CallOutcome;

/// Holds all Prometheus metric handles for a run.
#[derive(Clone)]
pub struct NodeMetrics {
    /// Prometheus registry that owns all metrics below.
    registry: Registry,
    /// Calls executed, by operation and result.
    pub calls_total: IntCounterVec,
    /// Transfers committed.
    pub transfers_total: IntCounter,
    /// Transfers that routed a non-zero fee to the collector.
    pub transfers_taxed_total: IntCounter,
    /// Fee volume collected, in the smallest unit (saturating at `u64::MAX`
    /// per increment).
    pub fees_collected_total: IntCounter,
    /// Fee rate after the last committed call.
    pub fee_rate: IntGauge,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("tollgate".into()), None)
            .expect("failed to create prometheus registry");

        let calls_total = IntCounterVec::new(
            Opts::new("calls_total", "Calls executed by the host"),
            &["call", "result"],
        )
        .expect("metric creation");
        registry
            .register(Box::new(calls_total.clone()))
            .expect("metric registration");

        let transfers_total =
            IntCounter::new("transfers_total", "Committed transfers").expect("metric creation");
        registry
            .register(Box::new(transfers_total.clone()))
            .expect("metric registration");

        let transfers_taxed_total = IntCounter::new(
            "transfers_taxed_total",
            "Committed transfers that paid a non-zero fee",
        )
        .expect("metric creation");
        registry
            .register(Box::new(transfers_taxed_total.clone()))
            .expect("metric registration");

        let fees_collected_total = IntCounter::new(
            "fees_collected_total",
            "Fee volume routed to the collector, smallest unit",
        )
        .expect("metric creation");
        registry
            .register(Box::new(fees_collected_total.clone()))
            .expect("metric registration");

        let fee_rate = IntGauge::new("fee_rate_percent", "Current fee rate in whole percent")
            .expect("metric creation");
        registry
            .register(Box::new(fee_rate.clone()))
            .expect("metric registration");

        Self {
            registry,
            calls_total,
            transfers_total,
            transfers_taxed_total,
            fees_collected_total,
            fee_rate,
        }
    }

    /// Folds one call outcome into the counters.
    pub fn record(&self, outcome: &CallOutcome) {
        let result = if outcome.ok { "committed" } else { "rejected" };
        self.calls_total
            .with_label_values(&[outcome.call.as_str(), result])
            .inc();

        if let Some(receipt) = &outcome.receipt {
            self.transfers_total.inc();
            if receipt.decision.is_charged() {
                self.transfers_taxed_total.inc();
                self.fees_collected_total
                    .inc_by(u64::try_from(receipt.fee).unwrap_or(u64::MAX));
            }
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus output is valid utf-8"))
    }
}
