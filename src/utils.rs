use serde::{Deserialize, Deserializer};

/// Deserializes into `Some(value)` whenever the field is present, so an
/// `Option<Option<T>>` target can tell an explicit JSON `null` (`Some(None)`)
/// apart from an absent key (`None`, via `#[serde(default)]`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
