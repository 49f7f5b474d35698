use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserDefinedMetricType {
    #[default]
    Gauge,
    Cumulative,
    Delta,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct UserDefinedMetricDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: UserDefinedMetricType,
    pub units: String,
    #[serde(default, deserialize_with = "crate::serde_null::deserialize")]
    pub labels: HashMap<String, String>,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct UserDefinedMetric {
    #[serde(flatten)]
    pub descriptor: UserDefinedMetricDescriptor,
    pub time: Option<DateTime<Utc>>,
    pub value: f64,
}
