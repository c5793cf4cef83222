//! HTTP client for the content server

use super::error::ClientError;
use crate::core::entity::{Entity, Orderable};
use crate::core::validation::validate_payload;
use crate::entities::{ContactInfo, Enquiry, GalleryImage};
use crate::server::endpoints::UploadResponse;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;

/// Result of one file of a multi-file upload
#[derive(Debug)]
pub struct UploadOutcome {
    pub file_name: String,
    pub result: Result<String, ClientError>,
}

/// Thin typed wrapper over the REST API
///
/// Admin calls carry `Authorization: Bearer <token>` when a token is set.
/// Nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        action: &str,
        resource: &str,
    ) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                message: format!("Failed to {} {}", action, resource),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Prefer the server's own message, fall back to a generic one
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("Failed to {} {}", action, resource));

        tracing::warn!(status = status.as_u16(), %message, "request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ClientError> {
        response
            .json::<R>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Run the entity's validators locally before anything is sent
    fn check_form<T: Entity>(entity: &T) -> Result<Value, ClientError> {
        let payload =
            serde_json::to_value(entity).map_err(|e| ClientError::Validation(e.to_string()))?;
        validate_payload::<T>(payload.clone())
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        Ok(payload)
    }

    /// `GET /api/admin/{resource}`: every record, hidden ones included
    pub async fn fetch_all<T: Entity>(&self) -> Result<Vec<T>, ClientError> {
        let request = self.authorized(
            self.http
                .get(self.url(&format!("/api/admin/{}", T::resource_name()))),
        );
        let response = self.send(request, "fetch", T::resource_name()).await?;
        Self::decode(response).await
    }

    /// `GET /api/{resource}`: publicly visible records
    pub async fn fetch_public<T: Entity>(&self) -> Result<Vec<T>, ClientError> {
        let request = self
            .http
            .get(self.url(&format!("/api/{}", T::resource_name())));
        let response = self.send(request, "fetch", T::resource_name()).await?;
        Self::decode(response).await
    }

    /// `GET /api/admin/{resource}/{slugOrId}`
    pub async fn get<T: Entity>(&self, key: &str) -> Result<T, ClientError> {
        let request = self.authorized(
            self.http
                .get(self.url(&format!("/api/admin/{}/{}", T::resource_name(), key))),
        );
        let response = self
            .send(request, "fetch", T::resource_name_singular())
            .await?;
        Self::decode(response).await
    }

    pub async fn create<T: Entity>(&self, entity: &T) -> Result<T, ClientError> {
        let payload = Self::check_form(entity)?;
        let request = self.authorized(
            self.http
                .post(self.url(&format!("/api/admin/{}", T::resource_name())))
                .json(&payload),
        );
        let response = self
            .send(request, "create", T::resource_name_singular())
            .await?;
        Self::decode(response).await
    }

    pub async fn update<T: Entity>(&self, id: u64, entity: &T) -> Result<T, ClientError> {
        let payload = Self::check_form(entity)?;
        let request = self.authorized(
            self.http
                .put(self.url(&format!("/api/admin/{}/{}", T::resource_name(), id)))
                .json(&payload),
        );
        let response = self
            .send(request, "update", T::resource_name_singular())
            .await?;
        Self::decode(response).await
    }

    pub async fn delete<T: Entity>(&self, id: u64) -> Result<(), ClientError> {
        let request = self.authorized(
            self.http
                .delete(self.url(&format!("/api/admin/{}/{}", T::resource_name(), id))),
        );
        self.send(request, "delete", T::resource_name_singular())
            .await?;
        Ok(())
    }

    /// `PUT /api/admin/{resource}/reorder`
    pub async fn reorder<T: Orderable>(&self, ids: &[u64]) -> Result<Vec<T>, ClientError> {
        let request = self.authorized(
            self.http
                .put(self.url(&format!("/api/admin/{}/reorder", T::resource_name())))
                .json(&json!({ "ids": ids })),
        );
        let response = self.send(request, "reorder", T::resource_name()).await?;
        Self::decode(response).await
    }

    /// Public contact form
    pub async fn submit_enquiry(&self, enquiry: &Enquiry) -> Result<Enquiry, ClientError> {
        let payload = Self::check_form(enquiry)?;
        let request = self.http.post(self.url("/api/enquiries")).json(&payload);
        let response = self.send(request, "send", "enquiry").await?;
        Self::decode(response).await
    }

    pub async fn contact_info(&self) -> Result<ContactInfo, ClientError> {
        let request = self.http.get(self.url("/api/contact-info"));
        let response = self.send(request, "fetch", "contact info").await?;
        Self::decode(response).await
    }

    pub async fn put_contact_info(&self, info: &ContactInfo) -> Result<ContactInfo, ClientError> {
        let request =
            self.authorized(self.http.put(self.url("/api/admin/contact-info")).json(info));
        let response = self.send(request, "update", "contact info").await?;
        Self::decode(response).await
    }

    /// Upload one file, returning its public URL
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let request = self.authorized(
            self.http
                .post(self.url("/api/admin/upload"))
                .multipart(form),
        );
        let response = self.send(request, "upload", file_name).await?;
        let uploaded: UploadResponse = Self::decode(response).await?;
        Ok(uploaded.url)
    }

    /// Upload files one after another with `delay` between them
    ///
    /// A failure does not stop the batch and earlier uploads are kept; the
    /// outcome of every file is returned in input order.
    pub async fn upload_many(
        &self,
        files: Vec<(String, Vec<u8>)>,
        delay: Duration,
    ) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        let total = files.len();

        for (index, (file_name, bytes)) in files.into_iter().enumerate() {
            let result = self.upload(&file_name, bytes).await;
            if let Err(e) = &result {
                tracing::warn!(file = %file_name, "upload failed: {}", e);
            }
            outcomes.push(UploadOutcome { file_name, result });

            if index + 1 < total {
                tokio::time::sleep(delay).await;
            }
        }

        outcomes
    }

    /// Upload photos and add a gallery record for each stored file
    ///
    /// The caption defaults to the file name without extension.
    pub async fn add_gallery_images(
        &self,
        files: Vec<(String, Vec<u8>)>,
        category: &str,
        delay: Duration,
    ) -> Vec<UploadOutcome> {
        let mut outcomes = self.upload_many(files, delay).await;

        for outcome in &mut outcomes {
            let Ok(url) = &outcome.result else {
                continue;
            };
            let image = GalleryImage {
                id: 0,
                url: url.clone(),
                caption: caption_from(&outcome.file_name),
                category: category.to_string(),
            };
            if let Err(e) = self.create(&image).await {
                outcome.result = Err(e);
            }
        }

        outcomes
    }
}

fn caption_from(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .replace(['-', '_'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Tour;

    #[test]
    fn test_base_url_is_normalized() {
        let api = ApiClient::new("http://localhost:3001/");
        assert_eq!(api.base_url(), "http://localhost:3001");
        assert_eq!(api.url("/api/tours"), "http://localhost:3001/api/tours");
    }

    #[test]
    fn test_form_with_missing_title_is_blocked() {
        let result = ApiClient::check_form(&Tour::default());
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_caption_from_file_name() {
        assert_eq!(caption_from("lhasa_potala-palace.jpg"), "lhasa potala palace");
        assert_eq!(caption_from("noext"), "noext");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let api = ApiClient::new("http://127.0.0.1:1");
        let err = api.fetch_all::<Tour>().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
        assert_eq!(err.to_string(), "Failed to fetch tours");
    }
}
