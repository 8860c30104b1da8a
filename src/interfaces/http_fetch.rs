use std::collections::BTreeMap;
use std::time::Duration;

use ureq::tls::{TlsConfig, TlsProvider};

use crate::config::STATION_PLACEHOLDER;

use super::fetch::{FetchError, Fetcher, RawPayload};

/// Posts the dashboard's search request straight to its gateway endpoint,
/// the same request the search button triggers in a browser.
pub struct HttpFetcher {
    agent: ureq::Agent,
    gateway_url: String,
    request_template: String,
    headers: BTreeMap<String, String>,
    referer: String,
}

impl HttpFetcher {
    pub fn new(
        gateway_url: &str,
        request_template: &str,
        headers: BTreeMap<String, String>,
        referer: &str,
        timeout: Duration,
    ) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            // Non-2xx answers are reported through RawPayload::status
            .http_status_as_error(false)
            .tls_config(TlsConfig::builder().provider(TlsProvider::NativeTls).build())
            .build()
            .into();
        HttpFetcher {
            agent,
            gateway_url: gateway_url.to_owned(),
            request_template: request_template.to_owned(),
            headers,
            referer: referer.to_owned(),
        }
    }

    fn request_body(&self, station: &str) -> Result<String, FetchError> {
        let quoted = serde_json::to_string(station)?;
        let escaped = &quoted[1..quoted.len() - 1];
        Ok(self.request_template.replace(STATION_PLACEHOLDER, escaped))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, station: &str) -> Result<RawPayload, FetchError> {
        let body = self.request_body(station)?;
        log::debug!("POST {} {}", self.gateway_url, body);

        let mut request = self
            .agent
            .post(self.gateway_url.as_str())
            .header("Content-Type", "application/json")
            .header("Referer", self.referer.as_str());
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let mut response = request.send(body)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        Ok(RawPayload { status, body })
    }
}
