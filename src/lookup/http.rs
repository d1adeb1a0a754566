//! HTTP adapter for an external scraping service.
//!
//! The browser automation that reads the court site runs in a separate
//! service. This adapter asks it for one cédula:
//!
//! ```text
//! GET {base}/consulta?codigo=12345&headless=true&timeout=60
//! 200 {"codigo_de_barras": "12345", "fuero": "CIV", ...}
//! ```

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::domain::{CedulaLookup, LookupError, QueryOptions, QueryResult};

/// Longest upstream error body echoed into a [`LookupError::Upstream`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// [`CedulaLookup`] backed by the scraping service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: reqwest::Client,
    base: Url,
}

impl HttpLookup {
    /// Creates an adapter for the service rooted at `base`.
    ///
    /// # Errors
    ///
    /// Returns a [`reqwest::Error`] if the HTTP client cannot be built.
    pub fn new(base: &Url) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cedula-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    fn request_url(&self, codigo: &str, options: QueryOptions) -> Result<Url, LookupError> {
        let mut url = self
            .base
            .join("consulta")
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("codigo", codigo)
            .append_pair("headless", if options.headless { "true" } else { "false" })
            .append_pair("timeout", &options.timeout.as_secs().to_string());
        Ok(url)
    }
}

#[async_trait]
impl CedulaLookup for HttpLookup {
    async fn query(
        &self,
        codigo: &str,
        options: QueryOptions,
    ) -> Result<QueryResult, LookupError> {
        let url = self.request_url(codigo, options)?;
        let transport = |e: reqwest::Error| {
            if e.is_timeout() {
                LookupError::Timeout(options.timeout)
            } else {
                LookupError::Unreachable(e.to_string())
            }
        };

        let response = self
            .client
            .get(url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::InvalidIdentifier(codigo.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Upstream {
                status: status.as_u16(),
                message: body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        response.json::<QueryResult>().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout(options.timeout)
            } else {
                LookupError::Decode(e.to_string())
            }
        })
    }
}
