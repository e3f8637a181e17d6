//! Server configuration from the environment.

use pagesmith_core::{PagesmithError, Result};

const DEFAULT_PORT: u16 = 3003;

/// Environment-derived server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bearer credential for the model provider. Never logged, never sent
    /// anywhere but the Authorization header.
    pub openrouter_api_key: String,
    /// Listen port.
    pub port: u16,
}

impl ServerConfig {
    /// Reads `OPENROUTER_API_KEY` (required) and `PORT` (default 3003).
    pub fn from_env() -> Result<Self> {
        let openrouter_api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| PagesmithError::config("OPENROUTER_API_KEY is not set"))?;
        let port = parse_port(std::env::var("PORT").ok())?;
        Ok(Self {
            openrouter_api_key,
            port,
        })
    }
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| PagesmithError::config(format!("invalid PORT value: '{value}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
    }

    #[test]
    fn test_port_parses_when_set() {
        assert_eq!(parse_port(Some("8080".to_string())).unwrap(), 8080);
    }

    #[test]
    fn test_bad_port_is_config_error() {
        let err = parse_port(Some("not-a-port".to_string())).unwrap_err();
        assert!(matches!(err, PagesmithError::Config(_)));
    }
}
