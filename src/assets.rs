//! Clinic logo resolution.
//!
//! The logo is fetched once from the fixed asset path and carried as a
//! base64 string until a composer embeds it. Every failure here (network,
//! non-2xx status, decode) degrades to `None`: header rendering falls back
//! to the two-line text mark and the rest of the document is unaffected.

use base64::Engine as _;
use image::DynamicImage;

use crate::config;

/// The clinic logo as a base64-encoded raster.
#[derive(Debug, Clone)]
pub struct Logo {
    base64: String,
}

impl Logo {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn as_base64(&self) -> &str {
        &self.base64
    }

    /// Decodes to a raster image. A corrupt payload degrades to `None`,
    /// same contract as a failed fetch.
    pub fn to_image(&self) -> Option<DynamicImage> {
        let bytes = match base64::engine::general_purpose::STANDARD.decode(&self.base64) {
            Ok(b) => b,
            Err(err) => {
                tracing::warn!(error = %err, "logo base64 decode failed; using text fallback");
                return None;
            }
        };
        match image::load_from_memory(&bytes) {
            Ok(img) => Some(img),
            Err(err) => {
                tracing::warn!(error = %err, "logo image decode failed; using text fallback");
                None
            }
        }
    }
}

/// Fetches the clinic logo from the configured asset path.
pub async fn load_logo(client: &reqwest::Client) -> Option<Logo> {
    fetch_logo(client, &config::logo_url()).await
}

async fn fetch_logo(client: &reqwest::Client, url: &str) -> Option<Logo> {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(err) => {
            tracing::warn!(%url, error = %err, "logo fetch failed; using text fallback");
            return None;
        }
    };
    let response = match response.error_for_status() {
        Ok(r) => r,
        Err(err) => {
            tracing::warn!(%url, error = %err, "logo fetch returned error status");
            return None;
        }
    };
    match response.bytes().await {
        Ok(bytes) => {
            tracing::debug!(%url, size = bytes.len(), "logo fetched");
            Some(Logo::from_bytes(&bytes))
        }
        Err(err) => {
            tracing::warn!(%url, error = %err, "logo body read failed");
            None
        }
    }
}
