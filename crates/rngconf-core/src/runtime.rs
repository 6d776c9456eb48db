use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default number of worker threads when a pipeline does not set one.
pub const DEFAULT_WORKERS: u16 = 8;

/// Global pipeline configuration settings.
///
/// This is the record users edit to configure a pipeline. It is validated and
/// applied by the pipeline manager; here it is only (de)serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuntimeConfig {
    /// Enable CPU profiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_profiler: Option<bool>,
    /// Maximal delay in microseconds to wait for `min_batch_size_records` to
    /// get buffered by the controller, defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_buffering_delay_usecs: Option<u64>,
    /// Minimal input batch size.
    ///
    /// The controller delays pushing input records to the circuit until at
    /// least `min_batch_size_records` records have been received (total
    /// across all endpoints) or `max_buffering_delay_usecs` microseconds have
    /// passed since at least one input record has been buffered. Defaults
    /// to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_batch_size_records: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceConfig>,
    /// Persist pipeline state across restarts.
    ///
    /// When false the state lives in in-memory data structures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<bool>,
    /// Number of worker threads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<u16>,
}

impl RuntimeConfig {
    pub fn cpu_profiler(&self) -> bool {
        self.cpu_profiler.unwrap_or(false)
    }

    pub fn max_buffering_delay_usecs(&self) -> u64 {
        self.max_buffering_delay_usecs.unwrap_or(0)
    }

    pub fn min_batch_size_records(&self) -> u64 {
        self.min_batch_size_records.unwrap_or(0)
    }

    pub fn storage(&self) -> bool {
        self.storage.unwrap_or(false)
    }

    pub fn workers(&self) -> u16 {
        self.workers.unwrap_or(DEFAULT_WORKERS)
    }
}

/// Resource reservations and limits for a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_cores_min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_cores_max: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_mb_min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_mb_max: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_mb_max: Option<u64>,
    /// Storage class name used when provisioning persistent volumes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}
