use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A student record as served by the birthday endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "prodi", default, deserialize_with = "null_as_default")]
    pub program: String,
    /// Accepts a number or a numeric string; anything else reads as 0
    #[serde(rename = "usia", default, deserialize_with = "lenient_age")]
    pub age: i32,
    /// Birth date in "D MonthName" form, e.g. "15 Maret"
    #[serde(rename = "tanggal_lahir", default, deserialize_with = "null_as_default")]
    pub birth_date: String,
    /// Base64 payload or full data URL
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
}

impl PersonRecord {
    /// Check if the record carries a non-empty photo
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AgeValue {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_age<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let age = match Option::<AgeValue>::deserialize(deserializer)? {
        Some(AgeValue::Int(n)) => i32::try_from(n).unwrap_or(0),
        Some(AgeValue::Float(n)) => n.trunc() as i32,
        Some(AgeValue::Text(s)) => s.trim().parse().unwrap_or(0),
        Some(AgeValue::Other(_)) | None => 0,
    };
    Ok(age)
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
