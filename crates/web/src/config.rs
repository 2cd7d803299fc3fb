use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secret_key: String,
    pub session_ttl_minutes: u64,
    pub secure_cookies: bool,
    pub allowed_origins: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            secret_key: std::env::var("SECRET_KEY")
                .context("Cannot load SECRET_KEY env variable")?,
            session_ttl_minutes: match std::env::var("SESSION_TTL_MINUTES") {
                Ok(raw) => raw
                    .parse()
                    .context("SESSION_TTL_MINUTES must be a number")?,
                Err(_) => 24 * 60,
            },
            secure_cookies: std::env::var("SECURE_COOKIES")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            allowed_origins: std::env::var("ALLOWED_ORIGINS").unwrap_or_default(),
        })
    }

    /// Database URL with credentials stripped, for logs
    pub fn database_host(&self) -> &str {
        self.database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}
