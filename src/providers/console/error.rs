//! Errors raised while talking to console-dns, and their mapping onto the
//! crate-wide [`Error`].

use crate::error::Error;
use crate::providers::console::types::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleDnsError {
    /// Transport failure or an undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API token is missing or was rejected.
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A generic record's `id` did not hold a provider record of its type.
    #[error("Record id error: {0}")]
    RecordId(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Rate limited")]
    RateLimited,
}

impl From<ApiError> for ConsoleDnsError {
    fn from(err: ApiError) -> Self {
        let ApiError { code, message } = err;
        match code.as_str() {
            "not_found" => Self::NotFound(message),
            "invalid_input" => Self::InvalidInput(message),
            "unauthorized" => Self::Credential(message),
            "rate_limited" => Self::RateLimited,
            _ => Self::Provider(message),
        }
    }
}

pub fn map_error(e: ConsoleDnsError) -> Error {
    match e {
        ConsoleDnsError::Http(err) => Error::ProviderError(err.to_string()),
        ConsoleDnsError::Credential(msg) => Error::CredentialError(msg),
        ConsoleDnsError::NotFound(msg) => Error::NotFound(msg),
        ConsoleDnsError::InvalidInput(msg) => Error::InvalidInput(msg),
        ConsoleDnsError::RecordId(err) => Error::InvalidInput(format!("record id: {err}")),
        ConsoleDnsError::Provider(msg) => Error::ProviderError(msg),
        ConsoleDnsError::RateLimited => Error::ProviderError("Rate limited".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn api(code: &str) -> ApiError {
        ApiError {
            code: code.to_string(),
            message: "msg".to_string(),
        }
    }

    #[test]
    fn test_map_error_keeps_message() {
        assert_matches!(
            map_error(ConsoleDnsError::Credential("token rejected".into())),
            Error::CredentialError(msg) if msg == "token rejected"
        );
        assert_matches!(
            map_error(ConsoleDnsError::NotFound("zone".into())),
            Error::NotFound(_)
        );
        assert_matches!(
            map_error(ConsoleDnsError::InvalidInput("bad".into())),
            Error::InvalidInput(_)
        );
        assert_matches!(
            map_error(ConsoleDnsError::Provider("fail".into())),
            Error::ProviderError(_)
        );
        assert_matches!(map_error(ConsoleDnsError::RateLimited), Error::ProviderError(_));
    }

    #[test]
    fn test_bad_record_id_is_invalid_input() {
        let json_err = serde_json::from_str::<u32>("{").unwrap_err();
        assert_matches!(
            map_error(ConsoleDnsError::RecordId(json_err)),
            Error::InvalidInput(msg) if msg.starts_with("record id:")
        );
    }

    #[test]
    fn test_api_error_codes() {
        assert_matches!(ConsoleDnsError::from(api("not_found")), ConsoleDnsError::NotFound(_));
        assert_matches!(
            ConsoleDnsError::from(api("invalid_input")),
            ConsoleDnsError::InvalidInput(_)
        );
        assert_matches!(
            ConsoleDnsError::from(api("unauthorized")),
            ConsoleDnsError::Credential(_)
        );
        assert_matches!(ConsoleDnsError::from(api("rate_limited")), ConsoleDnsError::RateLimited);
        assert_matches!(ConsoleDnsError::from(api("boom")), ConsoleDnsError::Provider(msg) if msg == "msg");
    }
}
