//! Subset of the catalog's `GET /models/{id}` JSON used for downloads.
//!
//! Only `type` is required. Entries the resolver never selects may be
//! incomplete (null URLs on training data, video images), so their fields
//! are optional and checked by the caller on the entry it actually uses.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct ModelResponse {
    /// Model category ("Checkpoint", "LORA", ...); becomes the folder name.
    #[serde(rename = "type")]
    pub model_type: String,
    #[serde(default, rename = "modelVersions", deserialize_with = "null_as_empty")]
    pub model_versions: Vec<ModelVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelVersion {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<ModelFile>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<ModelImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelFile {
    #[serde(default, rename = "type")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "downloadUrl")]
    pub download_url: Option<String>,
}

impl ModelFile {
    pub fn has_type(&self, accepted: &[String]) -> bool {
        self.file_type
            .as_deref()
            .map_or(false, |t| accepted.iter().any(|a| a == t))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelImage {
    #[serde(default)]
    pub url: Option<String>,
}

/// `null` and a missing key both mean "no entries".
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
