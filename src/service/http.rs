//! REST implementation of the mutation service.
//!
//! Uses reqwest's blocking client. It only ever runs on the mutation worker
//! thread, so no async runtime is needed.

use crate::domain::error::{PhotodeckError, Result};
use crate::domain::PhotoDetail;
use crate::service::backend::MutationService;
use crate::service::messages::{MutationRequest, ServiceResponse};
use crate::Config;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde_json::json;
use std::time::Duration;

/// Photo server client for batched mutations.
pub struct HttpMutationService {
    client: Client,
    api_root: String,
    auth_token: Option<String>,
}

impl HttpMutationService {
    /// Builds a client for the server named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_root: format!("{}/api", config.server_address),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Full URL of an endpoint relative to the API root.
    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_root, endpoint.trim_start_matches('/'))
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url_for(endpoint));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send(&self, builder: RequestBuilder, endpoint: &str) -> Result<reqwest::blocking::Response> {
        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PhotodeckError::Service {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

/// Maps a request to its endpoint, method and JSON body.
///
/// `RefreshPhotoDetails` is a read and has no body.
fn route_request(request: &MutationRequest) -> (Method, String, Option<serde_json::Value>) {
    match request {
        MutationRequest::SetFavorite { image_hashes, favorite, .. } => (
            Method::POST,
            "photosedit/favorite/".to_string(),
            Some(json!({ "image_hashes": image_hashes, "favorite": favorite })),
        ),
        MutationRequest::SetHidden { image_hashes, hidden, .. } => (
            Method::POST,
            "photosedit/hide/".to_string(),
            Some(json!({ "image_hashes": image_hashes, "hidden": hidden })),
        ),
        MutationRequest::SetPublic { image_hashes, val_public, .. } => (
            Method::POST,
            "photosedit/makepublic/".to_string(),
            Some(json!({ "image_hashes": image_hashes, "val_public": val_public })),
        ),
        MutationRequest::MarkDeleted { image_hashes, deleted, .. } => (
            Method::POST,
            "photosedit/setdeleted/".to_string(),
            Some(json!({ "image_hashes": image_hashes, "deleted": deleted })),
        ),
        MutationRequest::DownloadArchive { image_hashes, .. } => (
            Method::POST,
            "photos/download/".to_string(),
            Some(json!({ "image_hashes": image_hashes })),
        ),
        MutationRequest::RemoveFromAlbum { album_id, title, image_hashes, .. } => (
            Method::PATCH,
            format!("albums/user/edit/{album_id}/"),
            Some(json!({ "title": title, "removedPhotos": image_hashes })),
        ),
        MutationRequest::LabelFaces { face_ids, person_name, .. } => (
            Method::POST,
            "labelfaces/".to_string(),
            Some(json!({ "person_name": person_name, "face_ids": face_ids })),
        ),
        MutationRequest::DeleteFaces { face_ids, .. } => (
            Method::POST,
            "deletefaces/".to_string(),
            Some(json!({ "face_ids": face_ids })),
        ),
        MutationRequest::RefreshPhotoDetails { image_hash, .. } => {
            (Method::GET, format!("photos/{image_hash}/"), None)
        }
    }
}

impl MutationService for HttpMutationService {
    fn execute(&mut self, request: &MutationRequest) -> Result<ServiceResponse> {
        let (method, endpoint, body) = route_request(request);

        tracing::debug!(
            operation = request.operation(),
            method = %method,
            endpoint = %endpoint,
            item_count = request.item_count(),
            "sending request"
        );

        match body {
            Some(body) => {
                let builder = self.request(method, &endpoint).json(&body);
                self.send(builder, &endpoint)?;
            }
            None => {
                let builder = self.request(method, &endpoint);
                let detail: PhotoDetail = self.send(builder, &endpoint)?.json()?;
                return Ok(ServiceResponse::PhotoDetailsLoaded { detail });
            }
        }

        Ok(ServiceResponse::Completed {
            operation: request.operation().to_string(),
            item_count: request.item_count(),
        })
    }
}

impl std::fmt::Debug for HttpMutationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMutationService")
            .field("api_root", &self.api_root)
            .field("authenticated", &self.auth_token.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_from_album_patches_album_endpoint() {
        let request = MutationRequest::remove_from_album(12, "Trip".into(), vec!["a".into(), "b".into()]);
        let (method, endpoint, body) = route_request(&request);
        assert_eq!(method, Method::PATCH);
        assert_eq!(endpoint, "albums/user/edit/12/");
        assert_eq!(body, Some(json!({ "title": "Trip", "removedPhotos": ["a", "b"] })));
    }

    #[test]
    fn make_public_uses_val_public_field() {
        let request = MutationRequest::set_public(vec!["x".into()], true);
        let (method, endpoint, body) = route_request(&request);
        assert_eq!(method, Method::POST);
        assert_eq!(endpoint, "photosedit/makepublic/");
        assert_eq!(body, Some(json!({ "image_hashes": ["x"], "val_public": true })));
    }

    #[test]
    fn refresh_is_a_bodyless_get() {
        let request = MutationRequest::refresh_photo_details("abc".into());
        let (method, endpoint, body) = route_request(&request);
        assert_eq!(method, Method::GET);
        assert_eq!(endpoint, "photos/abc/");
        assert!(body.is_none());
    }

    #[test]
    fn urls_join_api_root_without_double_slash() {
        let config = Config {
            server_address: "https://photos.example".to_string(),
            ..Config::default()
        };
        let service = HttpMutationService::new(&config).unwrap();
        assert_eq!(service.url_for("/labelfaces/"), "https://photos.example/api/labelfaces/");
    }
}
