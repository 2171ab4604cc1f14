use serde::{Deserialize, Deserializer};

/// Deserializes a patch field so that an explicit `null` stays
/// distinguishable from an absent key.
///
/// Paired with `#[serde(default)]`: an absent key keeps the outer
/// `None`, `null` becomes `Some(None)` and a value becomes
/// `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
