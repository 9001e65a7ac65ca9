//! Probely targets API client

use crate::domain::RemoteParameter;
use crate::error::{ImportError, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Read and write access to a target's custom API parameters.
pub trait TargetApi {
    /// Current `custom_api_parameters` of the target; missing settings read as empty.
    fn fetch_parameters(&self, target_id: &str) -> Result<Vec<RemoteParameter>>;

    /// Replace the target's `custom_api_parameters` with `parameters`.
    fn write_parameters(&self, target_id: &str, parameters: &[RemoteParameter]) -> Result<()>;
}

#[derive(Debug, Default, Deserialize)]
struct TargetResource {
    #[serde(default)]
    site: Option<SiteSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct SiteSettings {
    #[serde(default)]
    api_scan_settings: Option<ApiScanSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiScanSettings {
    #[serde(default)]
    custom_api_parameters: Option<Vec<RemoteParameter>>,
}

impl TargetResource {
    fn into_parameters(self) -> Vec<RemoteParameter> {
        self.site
            .and_then(|site| site.api_scan_settings)
            .and_then(|settings| settings.custom_api_parameters)
            .unwrap_or_default()
    }
}

/// Blocking HTTP implementation of [`TargetApi`].
pub struct HttpTargetApi {
    http: Client,
    base_url: Url,
    token: String,
}

impl HttpTargetApi {
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url, token: token.into() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn target_url(&self, target_id: &str) -> Result<Url> {
        validate_target_id(target_id)?;
        self.base_url.join(&format!("targets/{}/", target_id)).map_err(|e| {
            ImportError::InvalidBaseUrl { url: self.base_url.to_string(), reason: e.to_string() }
        })
    }

    fn auth_header(&self) -> String {
        format!("JWT {}", self.token)
    }
}

impl TargetApi for HttpTargetApi {
    fn fetch_parameters(&self, target_id: &str) -> Result<Vec<RemoteParameter>> {
        let url = self.target_url(target_id)?;
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if status != StatusCode::OK {
            return Err(ImportError::FetchFailed {
                target_id: target_id.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let resource: TargetResource = serde_json::from_str(&body).map_err(|source| {
            ImportError::InvalidResponse { target_id: target_id.to_string(), source }
        })?;
        Ok(resource.into_parameters())
    }

    fn write_parameters(&self, target_id: &str, parameters: &[RemoteParameter]) -> Result<()> {
        let url = self.target_url(target_id)?;
        tracing::debug!("PATCH {} ({} parameters)", url, parameters.len());

        let payload = json!({
            "site": {
                "api_scan_settings": {
                    "custom_api_parameters": parameters
                }
            }
        });

        let response = self
            .http
            .patch(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if status != StatusCode::OK {
            return Err(ImportError::WriteFailed {
                target_id: target_id.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Parse the API origin and make sure it ends in `/` so relative joins
/// append to its path instead of replacing the last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash =
        if trimmed.ends_with('/') { trimmed.to_string() } else { format!("{}/", trimmed) };

    let url = Url::parse(&with_slash)
        .map_err(|e| ImportError::InvalidBaseUrl { url: raw.to_string(), reason: e.to_string() })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ImportError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn validate_target_id(target_id: &str) -> Result<()> {
    let bad = target_id.trim().is_empty()
        || target_id.contains(['/', '?', '#'])
        || target_id == "."
        || target_id == "..";
    if bad {
        return Err(ImportError::InvalidTargetId(target_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpTargetApi {
        HttpTargetApi::new(base, "tok", Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.probely.com").expect("url").as_str(),
            "https://api.probely.com/"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8080/api").expect("url").as_str(),
            "http://localhost:8080/api/"
        );
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        assert!(normalize_base_url("ftp://api.probely.com").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn test_target_url_appends_to_base_path() {
        let url = api("http://localhost:8080/api").target_url("2Hd7kQ").expect("url");
        assert_eq!(url.as_str(), "http://localhost:8080/api/targets/2Hd7kQ/");
    }

    #[test]
    fn test_target_url_rejects_path_like_ids() {
        let api = api("https://api.probely.com");
        for id in ["", "  ", "a/b", "a?b", "a#b", ".."] {
            assert!(
                matches!(api.target_url(id), Err(ImportError::InvalidTargetId(_))),
                "id {:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn test_missing_settings_read_as_empty() {
        for body in [
            r#"{"id": "t1"}"#,
            r#"{"site": null}"#,
            r#"{"site": {"api_scan_settings": null}}"#,
            r#"{"site": {"api_scan_settings": {"custom_api_parameters": null}}}"#,
        ] {
            let resource: TargetResource = serde_json::from_str(body).expect("parse");
            assert!(resource.into_parameters().is_empty(), "body {}", body);
        }
    }

    #[test]
    fn test_parameters_extracted_from_nested_settings() {
        let body = r#"{"site": {"name": "x", "api_scan_settings": {"custom_api_parameters": [{"name": "A", "value": "1"}]}}}"#;
        let resource: TargetResource = serde_json::from_str(body).expect("parse");
        let params = resource.into_parameters();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "A");
    }
}
