use anyhow::Result;
use prometheus::{IntCounter, IntCounterVec};
use radar_core::metrics::Metrics;

pub struct PipelineMetrics {
    metrics: Metrics,
    pub records_total: IntCounterVec,
    pub classified_total: IntCounterVec,
    pub filtered_failed_total: IntCounter,
    pub calldata_fallback_total: IntCounter,
    pub merge_duplicates_total: IntCounter,
}

impl PipelineMetrics {
    pub fn new() -> Result<Self> {
        let metrics = Metrics::new();
        let records_total = metrics.int_counter_vec(
            "radar_records_total",
            "Total raw records read from feed pages",
            &["feed"],
        )?;
        let classified_total = metrics.int_counter_vec(
            "radar_classified_total",
            "Total classified transactions by category",
            &["category"],
        )?;
        let filtered_failed_total = metrics.int_counter(
            "radar_filtered_failed_total",
            "Total explorer items dropped because the transaction failed",
        )?;
        let calldata_fallback_total = metrics.int_counter(
            "radar_calldata_fallback_total",
            "Total transactions whose token flows were decoded from calldata",
        )?;
        let merge_duplicates_total = metrics.int_counter(
            "radar_merge_duplicates_total",
            "Total duplicate hashes dropped while merging pages",
        )?;

        Ok(Self {
            metrics,
            records_total,
            classified_total,
            filtered_failed_total,
            calldata_fallback_total,
            merge_duplicates_total,
        })
    }

    pub fn gather(&self) -> String {
        self.metrics.gather()
    }
}
