use crate::error::Error;
use std::env;
use std::path::PathBuf;

pub const TOKEN_KEY: &str = "console_dns_token";

pub trait CredentialManager: Send + Sync {
    fn get(&self, key: &str) -> Result<String, Error>;
}

/// Resolves the API token from an environment variable, falling back to a
/// secrets file.
pub struct EnvCredentialManager {
    token_var: String,
    token_file: PathBuf,
}

impl EnvCredentialManager {
    pub fn new() -> Self {
        let token_file = env::var("CONSOLE_DNS_TOKEN_FILE")
            .unwrap_or_else(|_| "/run/secrets/console-dns-token".to_string());
        Self::with_sources("CONSOLE_DNS_TOKEN", token_file)
    }

    pub fn with_sources(token_var: impl Into<String>, token_file: impl Into<PathBuf>) -> Self {
        Self {
            token_var: token_var.into(),
            token_file: token_file.into(),
        }
    }

    fn token(&self) -> Result<String, Error> {
        if let Ok(token) = env::var(&self.token_var) {
            if !token.trim().is_empty() {
                return Ok(token.trim().to_string());
            }
        }
        let contents = std::fs::read_to_string(&self.token_file).map_err(|e| {
            Error::CredentialError(format!(
                "{} unset and {} unreadable: {e}",
                self.token_var,
                self.token_file.display()
            ))
        })?;
        let token = contents.trim();
        if token.is_empty() {
            return Err(Error::CredentialError(format!(
                "{} is empty",
                self.token_file.display()
            )));
        }
        Ok(token.to_string())
    }
}

impl Default for EnvCredentialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialManager for EnvCredentialManager {
    fn get(&self, key: &str) -> Result<String, Error> {
        match key {
            TOKEN_KEY => self.token(),
            _ => Err(Error::CredentialError(format!("Unknown key: {key}"))),
        }
    }
}
