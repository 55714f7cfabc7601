use crate::error::{Result, SwitchError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Destination and return configuration for a single browser switch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwitchOptions {
    pub request_code: Option<i32>,
    pub url: Option<String>,
    pub metadata: Option<Value>,
    pub return_url_scheme: Option<String>,
}

impl SwitchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_code(mut self, request_code: i32) -> Self {
        self.request_code = Some(request_code);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn return_url_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.return_url_scheme = Some(scheme.into());
        self
    }

}

/// The token describing a switch that has been started.
///
/// This is the only state that has to survive while the browser is in the
/// foreground, so it is plain data and round-trips through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRequest {
    pub request_code: i32,
    /// Kept as a raw string: hostless URIs such as `http://` must survive unchanged.
    pub url: String,
    pub metadata: Value,
    pub return_url_scheme: String,
    #[serde(rename = "shouldNotify")]
    pub should_notify_cancellation: bool,
}

impl SwitchRequest {
    pub fn new(
        request_code: i32,
        url: impl Into<String>,
        metadata: Value,
        return_url_scheme: impl Into<String>,
        should_notify_cancellation: bool,
    ) -> Self {
        Self {
            request_code,
            url: url.into(),
            metadata,
            return_url_scheme: return_url_scheme.into(),
            should_notify_cancellation,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The persisted form of the token.
    pub fn to_base64_encoded_json(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_json()?))
    }

    pub fn from_base64_encoded_json(encoded: &str) -> Result<Self> {
        let bytes = STANDARD.decode(encoded)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Outcome of asking the gateway to start a switch.
#[derive(Debug, Clone)]
pub enum SwitchPendingRequest {
    Started(SwitchRequest),
    Failure(Arc<SwitchError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchStatus {
    Success,
    Canceled,
}

/// A return payload matched against a started switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchResult {
    pub status: SwitchStatus,
    pub return_url: Option<String>,
    pub request_code: i32,
    pub request_url: String,
    pub request_metadata: Value,
}

impl SwitchResult {
    pub fn for_request(request: &SwitchRequest, status: SwitchStatus, return_url: Option<String>) -> Self {
        Self {
            status,
            return_url,
            request_code: request.request_code,
            request_url: request.url.clone(),
            request_metadata: request.metadata.clone(),
        }
    }
}

/// The host environment a switch is launched from.
#[derive(Debug, Clone, PartialEq)]
pub struct HostContext {
    pub package_name: String,
    /// Return url schemes the host has registered a handler for.
    pub declared_schemes: BTreeSet<String>,
    pub browser_available: bool,
}

impl HostContext {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            declared_schemes: BTreeSet::new(),
            browser_available: true,
        }
    }

    pub fn declare_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.declared_schemes.insert(scheme.into().to_lowercase());
        self
    }

    pub fn browser_available(mut self, available: bool) -> Self {
        self.browser_available = available;
        self
    }

    pub fn is_scheme_declared(&self, scheme: &str) -> bool {
        self.declared_schemes.contains(&scheme.to_lowercase())
    }
}

/// Data delivered when control returns to the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnPayload {
    pub data: Option<String>,
}

impl ReturnPayload {
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Scheme of the deep link, if the data looks like a URI at all.
    pub fn scheme(&self) -> Option<&str> {
        let data = self.data.as_deref()?;
        let (scheme, _) = data.split_once(':')?;
        let valid = !scheme.is_empty()
            && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then_some(scheme)
    }
}
