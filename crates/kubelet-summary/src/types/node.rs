use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pod::ContainerStats;
use super::resources::{CpuStats, FsStats, MemoryStats, NetworkStats, SwapStats};

/// Name of the kubelet system container.
pub const SYSTEM_CONTAINER_KUBELET: &str = "kubelet";

/// Name of the container runtime system container.
pub const SYSTEM_CONTAINER_RUNTIME: &str = "runtime";

/// Name of the system container holding unclassified system processes.
pub const SYSTEM_CONTAINER_MISC: &str = "misc";

/// Name of the system container that parents all pods.
pub const SYSTEM_CONTAINER_PODS: &str = "pods";

/// Node-level resource usage.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStats {
    /// Name of the node.
    pub node_name: String,

    /// Usage of node-level system daemons (see the `SYSTEM_CONTAINER_*` names).
    #[serde(default, deserialize_with = "crate::serde_null::deserialize")]
    pub system_containers: Vec<ContainerStats>,

    /// When the node started being monitored.
    pub start_time: Option<DateTime<Utc>>,

    /// Node CPU usage.
    pub cpu: Option<CpuStats>,

    /// Node memory usage.
    pub memory: Option<MemoryStats>,

    /// Node network usage.
    pub network: Option<NetworkStats>,

    /// Usage of the filesystem backing the node's root and kubelet data.
    pub fs: Option<FsStats>,

    /// Usage of the container runtime's filesystems.
    pub runtime: Option<RuntimeStats>,

    /// Process limits of the node.
    pub rlimit: Option<RlimitStats>,

    /// Node swap usage.
    pub swap: Option<SwapStats>,
}

impl NodeStats {
    /// Looks up a system container by name.
    #[must_use]
    pub fn system_container(&self, name: &str) -> Option<&ContainerStats> {
        self.system_containers.iter().find(|c| c.name == name)
    }
}

/// Filesystems used by the container runtime.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeStats {
    /// Filesystem holding container images.
    pub image_fs: Option<FsStats>,

    /// Filesystem holding container writable layers.
    pub container_fs: Option<FsStats>,
}

/// Process limits of the node.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RlimitStats {
    /// When the sample was taken.
    pub time: Option<DateTime<Utc>>,

    /// Maximum number of processes.
    #[serde(rename = "maxpid")]
    pub max_pid: Option<i64>,

    /// Number of running processes.
    #[serde(rename = "curproc")]
    pub num_of_running_processes: Option<i64>,
}
