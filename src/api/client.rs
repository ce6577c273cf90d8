//! Zoom REST API HTTP client.

use async_trait::async_trait;
use reqwest::{header, redirect, Client, Response};
use url::form_urlencoded;

use crate::api::auth::TokenMinter;
use crate::api::types::*;
use crate::config::Config;
use crate::error::{Error, Result};

/// Number of meetings requested per listing page.
pub const PAGE_SIZE: u32 = 100;

/// Operations the fetch, download and lifecycle layers need from the remote side.
#[async_trait]
pub trait RecordingsApi: Send + Sync {
    /// Fetch one page of the account's recordings.
    async fn list_recordings(&self, request: &ListRecordingsRequest) -> Result<RecordingsPage>;

    /// Request a signed download URL without following redirects.
    async fn request_download(&self, download_url: &str) -> Result<RedirectReply>;

    /// Move a meeting's recordings to the trash.
    async fn trash_recordings(&self, meeting_uuid: &str) -> Result<ApiReply>;

    /// Recover a meeting's recordings from the trash.
    async fn recover_recordings(&self, meeting_uuid: &str) -> Result<ApiReply>;
}

/// Encode a meeting uuid for use as a path segment.
///
/// Uuids carrying `/` must be encoded twice or the API answers 404.
pub fn encode_meeting_identifier(id_or_uuid: &str) -> String {
    if id_or_uuid.contains('/') {
        let single: String = form_urlencoded::byte_serialize(id_or_uuid.as_bytes()).collect();
        form_urlencoded::byte_serialize(single.as_bytes()).collect()
    } else {
        id_or_uuid.to_string()
    }
}

/// Zoom API client authenticated with freshly minted tokens.
pub struct ZoomApi {
    client: Client,
    base_url: String,
    minter: TokenMinter,
}

impl ZoomApi {
    /// Create a new API client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        // Signed download URLs answer with a redirect we must inspect, not follow
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.options.api_base_url.trim_end_matches('/').to_string(),
            minter: config.token_minter(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let token = self.minter.mint()?;
        let mut headers = header::HeaderMap::new();
        let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Config(format!("Invalid bearer token: {}", e)))?;
        headers.insert(header::AUTHORIZATION, value);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }

    async fn into_reply(response: Response) -> Result<ApiReply> {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Response status: {}", status);
        Ok(ApiReply { status, body })
    }
}

#[async_trait]
impl RecordingsApi for ZoomApi {
    async fn list_recordings(&self, request: &ListRecordingsRequest) -> Result<RecordingsPage> {
        let url = self.url("/accounts/me/recordings");
        tracing::debug!("GET {} {:?}", url, request);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .query(request)
            .send()
            .await?;

        let reply = Self::into_reply(response).await?;
        if reply.status != 200 {
            return Err(Error::RemoteApi {
                status: reply.status,
                body: reply.body,
            });
        }

        tracing::debug!("Recordings page response length: {} bytes", reply.body.len());
        let page: RecordingsPage = serde_json::from_str(&reply.body)?;
        Ok(page)
    }

    async fn request_download(&self, download_url: &str) -> Result<RedirectReply> {
        tracing::debug!("GET {}", download_url);
        let token = self.minter.mint()?;

        let response = self
            .client
            .get(download_url)
            .query(&[("access_token", token.as_str())])
            .send()
            .await?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();

        Ok(RedirectReply {
            status,
            location,
            body,
        })
    }

    async fn trash_recordings(&self, meeting_uuid: &str) -> Result<ApiReply> {
        let url = self.url(&format!(
            "/meetings/{}/recordings",
            encode_meeting_identifier(meeting_uuid)
        ));
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .query(&[("action", "trash")])
            .send()
            .await?;

        Self::into_reply(response).await
    }

    async fn recover_recordings(&self, meeting_uuid: &str) -> Result<ApiReply> {
        let url = self.url(&format!(
            "/meetings/{}/recordings/status",
            encode_meeting_identifier(meeting_uuid)
        ));
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .json(&serde_json::json!({ "action": "recover" }))
            .send()
            .await?;

        Self::into_reply(response).await
    }
}
