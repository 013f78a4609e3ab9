//! Metrics collection
//!
//! Counter and histogram names for the core operations. Without an installed
//! recorder the macros are no-ops, so library users only pay for what they
//! wire up.

use std::time::Duration;

use metrics::{counter, histogram};

/// Metric names for record-store and AI operations
#[derive(Debug, Clone, Copy)]
pub struct MetricsCollector {
    /// Insert attempts, labeled by status
    pub inserts_total: &'static str,
    /// Insert latency in seconds
    pub insert_duration: &'static str,
    /// Full-table reads
    pub list_reads_total: &'static str,
    /// Full-table read latency in seconds
    pub list_read_duration: &'static str,
    /// Rows returned by full-table reads
    pub list_rows: &'static str,
    /// Classification calls, labeled by outcome
    pub classifications_total: &'static str,
    /// Classification latency in seconds
    pub classification_duration: &'static str,
    /// Report generations
    pub reports_total: &'static str,
    /// Report generation latency in seconds
    pub report_duration: &'static str,
    /// Errors by type
    pub errors_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            inserts_total: "social_metrics_inserts_total",
            insert_duration: "social_metrics_insert_duration_seconds",
            list_reads_total: "social_metrics_list_reads_total",
            list_read_duration: "social_metrics_list_read_duration_seconds",
            list_rows: "social_metrics_list_rows",
            classifications_total: "social_metrics_classifications_total",
            classification_duration: "social_metrics_classification_duration_seconds",
            reports_total: "social_metrics_reports_total",
            report_duration: "social_metrics_report_duration_seconds",
            errors_total: "social_metrics_errors_total",
        }
    }
}

impl MetricsCollector {
    /// Record an insert attempt
    pub fn record_insert(&self, success: bool, duration: Duration) {
        let status = if success { "success" } else { "error" };

        counter!(self.inserts_total, "status" => status).increment(1);
        histogram!(self.insert_duration).record(duration.as_secs_f64());

        if !success {
            counter!(self.errors_total, "type" => "persistence").increment(1);
        }
    }

    /// Record a full-table read
    pub fn record_list(&self, duration: Duration, rows: usize) {
        counter!(self.list_reads_total).increment(1);
        histogram!(self.list_read_duration).record(duration.as_secs_f64());
        histogram!(self.list_rows).record(rows as f64);
    }

    /// Record a classification call and whether the fallback was substituted
    pub fn record_classification(&self, fallback: bool, duration: Duration) {
        let outcome = if fallback { "fallback" } else { "model" };

        counter!(self.classifications_total, "outcome" => outcome).increment(1);
        histogram!(self.classification_duration).record(duration.as_secs_f64());
    }

    /// Record a report generation call
    pub fn record_report(&self, duration: Duration) {
        counter!(self.reports_total).increment(1);
        histogram!(self.report_duration).record(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_names() {
        let collector = MetricsCollector::default();
        assert_eq!(collector.inserts_total, "social_metrics_inserts_total");
    }

    #[test]
    fn test_recording_without_recorder_is_a_noop() {
        let collector = MetricsCollector::default();
        collector.record_insert(true, Duration::from_millis(3));
        collector.record_list(Duration::from_millis(1), 42);
    }
}
