use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CPU usage at a point in time.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CpuStats {
    /// When the sample was taken.
    pub time: Option<DateTime<Utc>>,

    /// Average usage in nanocores over the sampling window.
    pub usage_nano_cores: Option<u64>,

    /// Cumulative usage in core-nanoseconds since the object was created.
    pub usage_core_nano_seconds: Option<u64>,
}

/// Memory usage at a point in time.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemoryStats {
    /// When the sample was taken.
    pub time: Option<DateTime<Utc>>,

    /// Memory available for use (limit minus working set).
    pub available_bytes: Option<u64>,

    /// Total memory in use, including all memory regardless of when it was accessed.
    pub usage_bytes: Option<u64>,

    /// Memory the kernel considers in active use.
    pub working_set_bytes: Option<u64>,

    /// Anonymous and swap cache memory.
    pub rss_bytes: Option<u64>,

    /// Cumulative number of minor page faults.
    pub page_faults: Option<u64>,

    /// Cumulative number of major page faults.
    pub major_page_faults: Option<u64>,
}

/// Swap usage at a point in time.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwapStats {
    /// When the sample was taken.
    pub time: Option<DateTime<Utc>>,

    /// Swap available for use.
    pub swap_available_bytes: Option<u64>,

    /// Swap currently in use.
    pub swap_usage_bytes: Option<u64>,
}

/// Traffic counters for one network interface.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterfaceStats {
    /// Interface name, e.g. `eth0`.
    pub name: String,

    /// Cumulative bytes received.
    pub rx_bytes: Option<u64>,

    /// Cumulative receive errors.
    pub rx_errors: Option<u64>,

    /// Cumulative bytes transmitted.
    pub tx_bytes: Option<u64>,

    /// Cumulative transmit errors.
    pub tx_errors: Option<u64>,
}

/// Network usage. The top-level counters describe the default interface.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkStats {
    /// When the sample was taken.
    pub time: Option<DateTime<Utc>>,

    /// Counters for the default interface.
    #[serde(flatten)]
    pub default_interface: InterfaceStats,

    /// Counters for every interface.
    #[serde(default, deserialize_with = "crate::serde_null::deserialize")]
    pub interfaces: Vec<InterfaceStats>,
}

/// Filesystem usage.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FsStats {
    /// When the sample was taken.
    pub time: Option<DateTime<Utc>>,

    /// Bytes available to non-root users.
    pub available_bytes: Option<u64>,

    /// Total capacity of the filesystem.
    pub capacity_bytes: Option<u64>,

    /// Bytes used by the object this sample belongs to.
    pub used_bytes: Option<u64>,

    /// Free inodes in the filesystem.
    pub inodes_free: Option<u64>,

    /// Total inodes in the filesystem.
    pub inodes: Option<u64>,

    /// Inodes used by the object this sample belongs to.
    pub inodes_used: Option<u64>,
}

/// Usage of one accelerator attached to a container.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcceleratorStats {
    /// Vendor name, e.g. `nvidia`.
    pub make: String,

    /// Model name, e.g. `tesla-p100`.
    pub model: String,

    /// Vendor-assigned identifier.
    pub id: String,

    /// Total accelerator memory in bytes.
    pub memory_total: u64,

    /// Accelerator memory in use in bytes.
    pub memory_used: u64,

    /// Percentage of time the accelerator was busy over the sampling window.
    pub duty_cycle: u64,
}
