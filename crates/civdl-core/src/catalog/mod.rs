//! Catalog API client: model page URL → `ModelDescriptor`.
//!
//! Queries `{api_base}/models/{id}`, takes the first model version and picks
//! its first file whose `type` is in the accepted set. Other files of the
//! version (VAEs, configs, training data) are never selected.

mod model_id;
pub mod payload;

pub use model_id::parse_model_id;

use crate::config::CivdlConfig;
use crate::http::HttpClient;
use crate::layout::is_safe_component;
use crate::resolver::{ModelDescriptor, ResolveError, Resolver};

use payload::ModelResponse;

/// Builds a descriptor from a catalog response body.
///
/// Pure function over the payload so selection rules can be checked without a server.
pub fn descriptor_from_body(
    body: &[u8],
    accepted_file_types: &[String],
) -> Result<ModelDescriptor, ResolveError> {
    let response: ModelResponse = serde_json::from_slice(body)?;

    let version = response
        .model_versions
        .first()
        .ok_or(ResolveError::NoVersions)?;
    if version.files.is_empty() {
        return Err(ResolveError::NoFiles);
    }
    let file = version
        .files
        .iter()
        .find(|f| f.has_type(accepted_file_types))
        .ok_or_else(|| ResolveError::NoAcceptedFile {
            accepted: accepted_file_types.to_vec(),
        })?;
    let file_name = file
        .name
        .clone()
        .ok_or(ResolveError::IncompleteFile { field: "name" })?;
    let download_url = file
        .download_url
        .clone()
        .filter(|u| !u.is_empty())
        .ok_or(ResolveError::IncompleteFile {
            field: "download URL",
        })?;

    if !is_safe_component(&file_name) {
        return Err(ResolveError::UnsafeName {
            field: "file name",
            value: file_name,
        });
    }
    if !is_safe_component(&response.model_type) {
        return Err(ResolveError::UnsafeName {
            field: "model type",
            value: response.model_type.clone(),
        });
    }

    Ok(ModelDescriptor {
        download_url,
        file_name,
        model_type: response.model_type.clone(),
        response: Some(response),
    })
}

/// Client for the public model catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api_base: String,
    http: HttpClient,
    accepted_file_types: Vec<String>,
}

impl CatalogClient {
    pub fn new(api_base: &str, http: HttpClient, accepted_file_types: Vec<String>) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            http,
            accepted_file_types,
        }
    }

    pub fn from_config(cfg: &CivdlConfig) -> Self {
        Self::new(
            &cfg.api_base,
            HttpClient::new(cfg.http_or_default()),
            cfg.accepted_file_types.clone(),
        )
    }

    /// Endpoint for one model: `{api_base}/models/{id}`.
    pub fn model_url(&self, id: &str) -> String {
        format!("{}/models/{}", self.api_base, id)
    }
}

impl Resolver for CatalogClient {
    fn resolve(&self, page_url: &str) -> Result<ModelDescriptor, ResolveError> {
        let id = parse_model_id(page_url).ok_or_else(|| ResolveError::NoModelId {
            url: page_url.to_string(),
        })?;
        let api_url = self.model_url(&id);
        tracing::debug!(page_url, api_url = %api_url, "querying catalog");

        let response = self.http.get(&api_url)?;
        if !response.head.is_ok() {
            return Err(ResolveError::HttpStatus {
                id,
                status: response.head.status,
            });
        }

        let descriptor = descriptor_from_body(&response.body, &self.accepted_file_types)?;
        tracing::info!(
            id = %id,
            model_type = %descriptor.model_type,
            file = %descriptor.file_name,
            "resolved model"
        );
        Ok(descriptor)
    }
}
