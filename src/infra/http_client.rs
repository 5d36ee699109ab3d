use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::constants::USER_AGENT;
use crate::error::Result;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub struct ReqwestHttp {
    client: reqwest::blocking::Client,
}

impl ReqwestHttp {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpClientPort for ReqwestHttp {
    fn get(&self, url: &str) -> Result<HttpGetResult> {
        tracing::info!("HTTP GET request to: {}", url);
        let resp = self.client.get(url).send()?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let bytes = resp.bytes()?.to_vec();
        tracing::debug!("HTTP response: status={}, size={} bytes", status, bytes.len());
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        Ok(HttpGetResult { status, bytes, content_type })
    }
}
