use thiserror::Error;

/// Where integrators are sent when the host cannot receive the browser switch return.
pub const BROWSER_SWITCH_SETUP_URL: &str =
    "https://developer.paypal.com/braintree/docs/guides/client-sdk/setup/android/v4#browser-switch-setup";

#[derive(Error, Debug)]
pub enum SwitchError {
    /// Raised by the switch gateway itself.
    #[error("{0}")]
    Switch(String),
    /// The capability check failed. The message is matched verbatim downstream.
    #[error(
        "AndroidManifest.xml is incorrectly configured or another app defines the same browser switch url as this app. See {url} for the correct configuration: {reason}",
        url = BROWSER_SWITCH_SETUP_URL
    )]
    Configuration { reason: String },
    #[error("Malformed return payload: {0}")]
    MalformedReturn(String),
    #[error("Pending request was never started: {0}")]
    NotStarted(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Encoding error: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    Storage(#[from] rocksdb::Error),
}

impl SwitchError {
    /// Wraps a failed capability check into the configuration error reported to callers.
    pub fn configuration(cause: &SwitchError) -> Self {
        Self::Configuration {
            reason: cause.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SwitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_embeds_reason() {
        let cause = SwitchError::Switch("browser switch error".to_string());
        let error = SwitchError::configuration(&cause);

        assert_eq!(
            error.to_string(),
            "AndroidManifest.xml is incorrectly configured or another app defines the same \
             browser switch url as this app. See https://developer.paypal.com/braintree/docs/\
             guides/client-sdk/setup/android/v4#browser-switch-setup for the correct \
             configuration: browser switch error"
        );
    }
}
