use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resources::{
    AcceleratorStats, CpuStats, FsStats, MemoryStats, NetworkStats, SwapStats,
};
use super::user_metrics::UserDefinedMetric;

/// Resource usage of one pod.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PodStats {
    /// Identifies the pod.
    pub pod_ref: PodReference,

    /// When the pod started being monitored.
    pub start_time: Option<DateTime<Utc>>,

    /// Usage of each container in the pod.
    #[serde(default, deserialize_with = "crate::serde_null::deserialize")]
    pub containers: Vec<ContainerStats>,

    /// Aggregate CPU usage of the pod.
    pub cpu: Option<CpuStats>,

    /// Aggregate memory usage of the pod.
    pub memory: Option<MemoryStats>,

    /// Network usage of the pod.
    pub network: Option<NetworkStats>,

    /// Usage of each volume mounted by the pod.
    #[serde(default, deserialize_with = "crate::serde_null::deserialize")]
    pub volume: Vec<VolumeStats>,

    /// Ephemeral storage used by the pod (writable layers, logs and emptyDir volumes).
    #[serde(rename = "ephemeral-storage")]
    pub ephemeral_storage: Option<FsStats>,

    /// Process counters of the pod.
    #[serde(rename = "process_stats")]
    pub process_stats: Option<ProcessStats>,

    /// Aggregate swap usage of the pod.
    pub swap: Option<SwapStats>,
}

/// Identifies a pod.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct PodReference {
    /// Pod name.
    pub name: String,

    /// Pod namespace.
    pub namespace: String,

    /// Pod UID.
    pub uid: String,
}

/// Resource usage of one container.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerStats {
    /// Container name.
    pub name: String,

    /// When the container started being monitored.
    pub start_time: Option<DateTime<Utc>>,

    /// Container CPU usage.
    pub cpu: Option<CpuStats>,

    /// Container memory usage.
    pub memory: Option<MemoryStats>,

    /// Usage of accelerators attached to the container.
    #[serde(default, deserialize_with = "crate::serde_null::deserialize")]
    pub accelerators: Vec<AcceleratorStats>,

    /// Usage of the container's writable layer.
    pub rootfs: Option<FsStats>,

    /// Usage of the container's log files.
    pub logs: Option<FsStats>,

    /// Metrics the container publishes itself.
    #[serde(default, deserialize_with = "crate::serde_null::deserialize")]
    pub user_defined_metrics: Vec<UserDefinedMetric>,

    /// Container swap usage.
    pub swap: Option<SwapStats>,
}

/// Usage of one volume mounted by a pod.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeStats {
    /// Volume usage.
    #[serde(flatten)]
    pub fs: FsStats,

    /// Volume name as given in the pod spec.
    pub name: String,

    /// Claim backing the volume, when it is a persistent volume.
    pub pvc_ref: Option<PvcReference>,
}

/// Identifies a persistent volume claim.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct PvcReference {
    /// Claim name.
    pub name: String,

    /// Claim namespace.
    pub namespace: String,
}

/// Process counters of a pod.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ProcessStats {
    /// Number of processes.
    pub process_count: Option<u64>,
}
