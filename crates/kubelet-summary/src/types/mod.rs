//! Kubelet `stats/v1alpha1` summary schema.

mod node;
mod pod;
mod resources;
mod user_metrics;

pub use node::*;
pub use pod::*;
pub use resources::*;
pub use user_metrics::*;

use serde::{Deserialize, Serialize};

/// Summary metrics reported by a kubelet for its node and the pods on it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Summary {
    /// Node-level usage.
    pub node: NodeStats,

    /// Per-pod usage.
    #[serde(default, deserialize_with = "crate::serde_null::deserialize")]
    pub pods: Vec<PodStats>,
}
