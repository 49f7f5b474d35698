use serde::{Deserialize, Deserializer};

/// Deserialize a field that may be `null` (an empty Go slice or map) into its default
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
