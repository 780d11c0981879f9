//! Resolver interface for turning model page URLs into download descriptors.
//!
//! The pipeline only depends on this trait and does not know about the
//! catalog API or its payload format.

use thiserror::Error;

use crate::catalog::payload::ModelResponse;
use crate::http::HttpError;

/// Ready-to-fetch information about one model version's primary file.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    pub download_url: String,
    pub file_name: String,
    /// Category label used verbatim as the destination subfolder.
    pub model_type: String,
    /// Parsed catalog response, kept for the preview lookup.
    pub response: Option<ModelResponse>,
}

impl ModelDescriptor {
    /// URL of the first image of the first model version that has one.
    pub fn preview_url(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .model_versions
            .first()?
            .images
            .iter()
            .filter_map(|img| img.url.as_deref())
            .find(|u| !u.is_empty())
    }
}

/// Why a page URL could not be turned into a descriptor.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no model id in {url}")]
    NoModelId { url: String },
    #[error(transparent)]
    Transport(#[from] HttpError),
    #[error("catalog returned HTTP {status} for model {id}")]
    HttpStatus { id: String, status: u32 },
    #[error("malformed catalog response: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("model has no versions")]
    NoVersions,
    #[error("latest model version has no files")]
    NoFiles,
    #[error("no file of type {}", .accepted.join(" or "))]
    NoAcceptedFile { accepted: Vec<String> },
    #[error("selected file has no {field}")]
    IncompleteFile { field: &'static str },
    #[error("catalog {field} {value:?} is not usable as a path component")]
    UnsafeName { field: &'static str, value: String },
}

/// Turns a model page URL into a `ModelDescriptor`.
pub trait Resolver {
    fn resolve(&self, page_url: &str) -> Result<ModelDescriptor, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::payload::{ModelImage, ModelVersion};

    fn descriptor(response: Option<ModelResponse>) -> ModelDescriptor {
        ModelDescriptor {
            download_url: "https://cdn.example.com/x.safetensors".to_string(),
            file_name: "x.safetensors".to_string(),
            model_type: "Checkpoint".to_string(),
            response,
        }
    }

    #[test]
    fn preview_url_from_first_version_first_image() {
        let response = ModelResponse {
            model_type: "Checkpoint".to_string(),
            model_versions: vec![
                ModelVersion {
                    files: vec![],
                    images: vec![
                        ModelImage {
                            url: Some("https://img.example.com/1.jpeg".to_string()),
                        },
                        ModelImage {
                            url: Some("https://img.example.com/2.jpeg".to_string()),
                        },
                    ],
                },
                ModelVersion {
                    files: vec![],
                    images: vec![ModelImage {
                        url: Some("https://img.example.com/old.png".to_string()),
                    }],
                },
            ],
        };
        let d = descriptor(Some(response));
        assert_eq!(d.preview_url(), Some("https://img.example.com/1.jpeg"));
    }

    #[test]
    fn preview_url_absent() {
        assert_eq!(descriptor(None).preview_url(), None);
        let response = ModelResponse {
            model_type: "LORA".to_string(),
            model_versions: vec![ModelVersion {
                files: vec![],
                images: vec![],
            }],
        };
        assert_eq!(descriptor(Some(response)).preview_url(), None);
    }

    #[test]
    fn preview_url_skips_images_without_url() {
        let response = ModelResponse {
            model_type: "LORA".to_string(),
            model_versions: vec![ModelVersion {
                files: vec![],
                images: vec![
                    ModelImage { url: None },
                    ModelImage {
                        url: Some(String::new()),
                    },
                    ModelImage {
                        url: Some("https://img.example.com/3.png".to_string()),
                    },
                ],
            }],
        };
        assert_eq!(
            descriptor(Some(response)).preview_url(),
            Some("https://img.example.com/3.png")
        );
    }

    #[test]
    fn no_accepted_file_message_lists_types() {
        let err = ResolveError::NoAcceptedFile {
            accepted: vec!["Model".to_string(), "Negative".to_string()],
        };
        assert_eq!(err.to_string(), "no file of type Model or Negative");
    }
}
