use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub min_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_vars(|key| env::var(key))
    }

    fn from_vars<F>(var: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        Ok(Config {
            api_url: var("CONSOLE_DNS_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            timeout: Duration::from_secs(parse_or(var("CONSOLE_DNS_TIMEOUT").ok(), 30)),
            min_delay: Duration::from_millis(parse_or(
                var("CONSOLE_DNS_MIN_DELAY_MS").ok(),
                500,
            )),
        })
    }
}

fn parse_or(value: Option<String>, default: u64) -> u64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}


#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, env::VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or(None, 30), 30);
        assert_eq!(parse_or(Some("abc".to_string()), 30), 30);
        assert_eq!(parse_or(Some(" 45 ".to_string()), 30), 45);
    }

    #[test]
    fn test_missing_api_url() {
        let result = Config::from_vars(lookup(&[("CONSOLE_DNS_TIMEOUT", "10")]));
        assert_matches!(result, Err(env::VarError::NotPresent));
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_vars(lookup(&[("CONSOLE_DNS_API_URL", "https://dns.internal/")])).unwrap();
        assert_eq!(config.api_url, "https://dns.internal");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.min_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(lookup(&[
            ("CONSOLE_DNS_API_URL", "https://dns.internal"),
            ("CONSOLE_DNS_TIMEOUT", "5"),
            ("CONSOLE_DNS_MIN_DELAY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.min_delay, Duration::ZERO);
    }
}
