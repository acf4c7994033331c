//! HTTP client for catalog API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the catalog API, handling authentication, query parameters, status
//! checks and response parsing.

use super::CatalogError;
use log::*;
use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;

/// Makes requests to the catalog API and tries to conform response data to
/// the requested type.
///
#[derive(Clone)]
pub struct Client {
    pub(crate) access_token: Option<String>,
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional bearer
    /// token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Self {
        Client {
            access_token: access_token.map(str::to_owned),
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Issue a GET request for the path and decode the body.
    ///
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = self.url(path)?;
        self.fetch(url, params).await
    }

    /// Issue a GET request for one record below the path. The identifier is
    /// a single, percent-encoded path segment.
    ///
    pub async fn get_record<T: DeserializeOwned>(
        &self,
        path: &str,
        id: &str,
    ) -> Result<T, CatalogError> {
        let url = self.record_url(path, id)?;
        self.fetch(url, &[]).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let path = url.path().to_owned();
        let response = self.call(Method::GET, url, params).await?;
        let status = response.status();

        // Check status before trying to deserialize
        if !status.is_success() {
            let response_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            error!(
                "API request to '{}' failed with status {}: {}",
                path, status, response_text
            );
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: response_text,
            });
        }

        let response_bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&response_bytes).map_err(|e| {
            error!(
                "Failed to deserialize response from '{}': {}. Response body: {}",
                path,
                e,
                String::from_utf8_lossy(&response_bytes)
            );
            CatalogError::Deserialization(e)
        })
    }

    /// Build the absolute URL for a path relative to the base URL.
    ///
    pub(crate) fn url(&self, path: &str) -> Result<Url, CatalogError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Build the URL of one record, appending the identifier as a single
    /// path segment.
    ///
    pub(crate) fn record_url(&self, path: &str, id: &str) -> Result<Url, CatalogError> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(CatalogError::InvalidUrl(format!(
                "'{}' is not a record identifier",
                id
            )));
        }
        let mut url = self.url(path)?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(format!("{} cannot take a path segment", path)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Make request and return the raw response or a transport error.
    ///
    async fn call(
        &self,
        method: Method,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<Response, CatalogError> {
        debug!("{} {} {:?}", method, url, params);

        let mut request = self.http_client.request(method, url).query(params);
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        Ok(request.send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::Fake;
    use httpmock::MockServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = Client::new("http://localhost:3000/api/", None);
        assert_eq!(
            client.url("/albums/all").unwrap().as_str(),
            "http://localhost:3000/api/albums/all"
        );
        assert_eq!(
            client.url("albums").unwrap().as_str(),
            "http://localhost:3000/api/albums"
        );
    }

    #[test]
    fn url_rejects_garbage_base() {
        let client = Client::new("not a url", None);
        assert!(matches!(
            client.url("albums"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn record_url_keeps_identifier_in_one_segment() {
        let client = Client::new("http://localhost:3000/api", None);

        let url = client.record_url("albums", "1?admin=true").unwrap();
        assert_eq!(url.path(), "/api/albums/1%3Fadmin=true");
        assert_eq!(url.query(), None);

        let url = client.record_url("users", "a/b#c").unwrap();
        assert_eq!(url.path(), "/api/users/a%2Fb%23c");
        assert_eq!(url.fragment(), None);

        assert_eq!(
            client.record_url("musics", "42").unwrap().as_str(),
            "http://localhost:3000/api/musics/42"
        );
    }

    #[test]
    fn record_url_rejects_dot_segments() {
        let client = Client::new("http://localhost:3000/api", None);
        for id in ["", ".", ".."] {
            assert!(matches!(
                client.record_url("users", id),
                Err(CatalogError::InvalidUrl(_))
            ));
        }
    }

    #[tokio::test]
    async fn get_sends_bearer_token_and_params() -> Result<(), CatalogError> {
        let token: Uuid = UUIDv4.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/musics")
                    .header("Authorization", &format!("Bearer {}", &token))
                    .query_param("page", "3");
                then.status(200).json_body(json!({ "ok": true }));
            })
            .await;

        let client = Client::new(&server.base_url(), Some(&token.to_string()));
        let body: Value = client.get("musics", &[("page", "3".to_string())]).await?;
        assert_eq!(body["ok"], json!(true));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn get_surfaces_error_status() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/users");
                then.status(500).body("boom");
            })
            .await;

        let client = Client::new(&server.base_url(), None);
        let result: Result<Value, _> = client.get("users", &[]).await;
        match result {
            Err(CatalogError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected API error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_reports_undecodable_body() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/profile");
                then.status(200).body("<html>");
            })
            .await;

        let client = Client::new(&server.base_url(), None);
        let result: Result<Value, _> = client.get("profile", &[]).await;
        assert!(matches!(result, Err(CatalogError::Deserialization(_))));
    }
}
