use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let session = SessionConfig {
            secret: session_secret(std::env::var("SESSION_SECRET").ok())?,
            cookie_secure: std::env::var("SESSION_COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(true),
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        Ok(Self {
            database_url,
            session,
            host,
            port,
        })
    }
}

fn session_secret(raw: Option<String>) -> anyhow::Result<String> {
    match raw {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => anyhow::bail!("SESSION_SECRET must be set"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_secret_is_fatal() {
        let err = session_secret(None).unwrap_err();
        assert_eq!(err.to_string(), "SESSION_SECRET must be set");
    }

    #[test]
    fn blank_session_secret_is_fatal() {
        assert!(session_secret(Some("   ".into())).is_err());
    }

    #[test]
    fn session_secret_is_kept_verbatim() {
        let secret = session_secret(Some("s3cr3t".into())).unwrap();
        assert_eq!(secret, "s3cr3t");
    }
}
