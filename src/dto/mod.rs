use serde::{Deserialize, Deserializer};

pub mod customers;
pub mod products;
pub mod sale_items;
pub mod sales;

/// Deserializer for nullable columns in partial updates.
///
/// Pair with `#[serde(default)]`: a missing key stays `None` (leave the column
/// alone), an explicit `null` becomes `Some(None)` (clear it) and a value
/// becomes `Some(Some(v))`.
pub fn nullable_patch<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
