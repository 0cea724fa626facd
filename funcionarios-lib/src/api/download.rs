//! Authenticated file downloads

use std::path::Path;

use log::debug;
use reqwest::Method;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderName;

use crate::FuncionariosClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Documento;

/// A downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    /// File name from `Content-Disposition`, if the backend sent one.
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// The extended `filename*=UTF-8''...` form wins over plain `filename=`.
fn disposition_file_name(value: &str) -> Option<String> {
    let params: Vec<(&str, &str)> = value
        .split(';')
        .filter_map(|part| part.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .collect();
    let param = |wanted: &str| {
        params
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, value)| *value)
    };

    param("filename*")
        .and_then(decode_extended_value)
        .or_else(|| param("filename").map(|name| name.trim_matches('"').to_string()))
        .filter(|name| !name.is_empty())
}

/// Decodes an RFC 5987 `charset'language'percent-encoded` value.
///
/// Only UTF-8 is decoded; other charsets fall back to `filename=`.
fn decode_extended_value(value: &str) -> Option<String> {
    let mut parts = value.trim_matches('"').splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    urlencoding::decode(encoded).ok().map(|name| name.into_owned())
}

impl FuncionariosClient {
    /// Downloads the raw bytes served at `path` under the API prefix.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let file = client.download(&documento.download_path()).await?;
    /// ```
    pub async fn download(&self, path: &str) -> Result<Download, Error> {
        let response = self.send::<()>(Method::GET, path, &[], None).await?;

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let file_name = header(CONTENT_DISPOSITION).and_then(|value| disposition_file_name(&value));

        let bytes = response.bytes().await.map_err(ApiError::from)?.to_vec();
        debug!("Downloaded {} ({} bytes)", path, bytes.len());

        Ok(Download {
            bytes,
            file_name,
            content_type,
        })
    }

    /// Downloads `path` and writes it to `dest`.
    pub async fn download_to(&self, path: &str, dest: impl AsRef<Path>) -> Result<Download, Error> {
        let download = self.download(path).await?;
        tokio::fs::write(dest.as_ref(), &download.bytes).await?;
        debug!("Wrote {} to {}", path, dest.as_ref().display());
        Ok(download)
    }

    /// Downloads the file attached to a [`Documento`].
    pub async fn download_documento(&self, documento: &Documento) -> Result<Download, Error> {
        self.download(&documento.download_path()).await
    }
}
