use crate::config::EntsoeConfig;
use crate::entsoe::window::RequestWindow;
use crate::error::{EpexError, Result};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::ACCEPT;

/// Anything that can deliver a raw publication document for a window
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the XML body covering `window`
    async fn fetch_document(&self, window: &RequestWindow) -> Result<String>;
}

/// ENTSO-E transparency platform client
#[derive(Clone)]
pub struct EntsoeClient {
    http: reqwest::Client,
    base_url: String,
    document_type: String,
    in_domain: String,
    api_key: String,
    logger: StructuredLogger,
}

impl EntsoeClient {
    /// Create a client from configuration
    pub fn new(cfg: &EntsoeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("epex-monitor/", env!("APP_VERSION")))
            .build()?;
        let logger =
            get_logger_with_context(LogContext::new("entsoe").with_area(cfg.in_domain.clone()));
        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
            document_type: cfg.document_type.clone(),
            in_domain: cfg.in_domain.clone(),
            api_key: cfg.api_key.trim().to_string(),
            logger,
        })
    }

    /// Full request URL for a window
    pub fn build_url(&self, window: &RequestWindow) -> Result<Url> {
        let period_start = window.period_start();
        let period_end = window.period_end();
        Url::parse_with_params(
            &self.base_url,
            [
                ("documentType", self.document_type.as_str()),
                ("in_Domain", self.in_domain.as_str()),
                ("out_Domain", self.in_domain.as_str()),
                ("periodStart", period_start.as_str()),
                ("periodEnd", period_end.as_str()),
                ("securityToken", self.api_key.as_str()),
            ],
        )
        .map_err(|e| EpexError::config(format!("Invalid ENTSO-E base URL: {}", e)))
    }
}

/// URL with the security token masked, for logs
pub fn redact_token(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "securityToken" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

#[async_trait]
impl PriceSource for EntsoeClient {
    async fn fetch_document(&self, window: &RequestWindow) -> Result<String> {
        let url = self.build_url(window)?;
        self.logger
            .debug(&format!("Requesting day-ahead prices: {}", redact_token(&url)));

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/xml")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            // Error bodies are acknowledgement documents; keep them short in logs
            let snippet: String = body.chars().take(200).collect();
            return Err(EpexError::api(format!(
                "ENTSO-E API returned {}: {}",
                status, snippet
            )));
        }
        self.logger
            .trace(&format!("Received {} bytes from ENTSO-E", body.len()));
        Ok(body)
    }
}
