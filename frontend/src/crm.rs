use gloo_net::http::Request;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::config;
use crate::lead::{CrmPayload, Endpoint, UNKNOWN_IP};

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for CrmError {
    fn from(err: gloo_net::Error) -> Self {
        CrmError::Network(err.to_string())
    }
}

/// Outbound calls made while submitting a lead.
#[allow(async_fn_in_trait)]
pub trait CrmTransport {
    /// Public address of the visitor, as seen by the IP echo service.
    async fn lookup_ip(&self) -> Result<String, CrmError>;
    async fn post(&self, payload: &CrmPayload) -> Result<(), CrmError>;
}

#[derive(Deserialize)]
struct IpEcho {
    #[serde(default)]
    ip: Option<String>,
}

impl IpEcho {
    fn into_ip(self) -> String {
        self.ip
            .filter(|ip| !ip.is_empty())
            .unwrap_or_else(|| UNKNOWN_IP.to_string())
    }
}

fn target(endpoint: Endpoint) -> (String, String) {
    match endpoint {
        Endpoint::Nura => (config::nura_lead_url(), config::nura_authorization()),
        Endpoint::TeleCrm => (config::telecrm_lead_url(), config::telecrm_authorization()),
    }
}

/// `fetch`-backed transport used in the browser.
#[derive(Clone, Copy, Default)]
pub struct HttpTransport;

impl CrmTransport for HttpTransport {
    async fn lookup_ip(&self) -> Result<String, CrmError> {
        let response = Request::get(config::IP_LOOKUP_URL).send().await?;
        let echo = response
            .json::<IpEcho>()
            .await
            .map_err(|e| CrmError::Decode(e.to_string()))?;
        Ok(echo.into_ip())
    }

    async fn post(&self, payload: &CrmPayload) -> Result<(), CrmError> {
        let endpoint = payload.endpoint();
        let (url, authorization) = target(endpoint);
        let response = Request::post(&url)
            .header("Authorization", &authorization)
            .json(payload)
            .map_err(|e| CrmError::Encode(e.to_string()))?
            .send()
            .await?;

        debug!("{} responded with {}", endpoint, response.status());
        if !response.ok() {
            return Err(CrmError::Status(response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_echo_variants() {
        let echo: IpEcho = serde_json::from_str(r#"{"ip":"198.51.100.4"}"#).unwrap();
        assert_eq!(echo.into_ip(), "198.51.100.4");

        let echo: IpEcho = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(echo.into_ip(), UNKNOWN_IP);

        let echo: IpEcho = serde_json::from_str(r#"{"ip":""}"#).unwrap();
        assert_eq!(echo.into_ip(), UNKNOWN_IP);
    }

    #[test]
    fn targets_carry_their_own_auth_scheme() {
        let (nura_url, nura_auth) = target(Endpoint::Nura);
        assert!(nura_url.ends_with("/api/resource/CRM%20Lead"));
        assert!(nura_auth.starts_with("token "));

        let (tele_url, tele_auth) = target(Endpoint::TeleCrm);
        assert!(tele_url.starts_with("https://next-api.telecrm.in/v2/enterprise/"));
        assert!(tele_url.ends_with("/autoupdatelead"));
        assert!(tele_auth.starts_with("Bearer "));
    }
}
