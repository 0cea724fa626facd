//! Authenticated request plumbing shared by every endpoint

use log::debug;
use reqwest::Method;
use reqwest::header::ACCEPT;
use serde::Serialize;

use crate::FuncionariosClient;
use crate::error::ApiError;
use crate::error::Error;

impl FuncionariosClient {
    /// Sends one authenticated request to `path` under the API prefix.
    ///
    /// Non-success statuses are turned into [`ApiError`]s; the body of a
    /// successful response is left unread.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.request_url(path, query)?;

        let token = self
            .inner
            .token_provider
            .get_token(&self.inner.base_url)
            .await?;

        debug!("{} {}", method, url);

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .bearer_auth(&token.access_token)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|e| {
            debug!("Failed to read {} error body: {}", status, e);
            String::new()
        });
        Err(ApiError::from_status(status.as_u16(), &body).into())
    }

    /// Reads a successful response body and decodes it as JSON.
    pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, Error> {
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body).into())
    }

    fn request_url(&self, path: &str, query: &[(&str, &str)]) -> Result<url::Url, Error> {
        let raw = self.resource_url(path);
        let mut url = url::Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn map_send_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}
