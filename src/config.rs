//! Service configuration loaded from the environment (and `.env`).

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Business details printed on every quotation
#[derive(Debug, Clone)]
pub struct BusinessProfile {
    pub name: String,
    pub tagline: String,
    pub phones: Vec<String>,
    pub email: String,
    /// International number without `+`, used for `wa.me` links
    pub whatsapp_number: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: "Borewell Drilling Services".to_string(),
            tagline: "Professional Borewell Solutions".to_string(),
            phones: vec![],
            email: String::new(),
            whatsapp_number: String::new(),
        }
    }
}

/// Runtime configuration for the HTTP service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    /// Base used for share links and QR codes, without trailing slash
    pub public_base_url: String,
    pub quote_validity_days: u32,
    pub business: BusinessProfile,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: None,
            public_base_url: "http://localhost:3000".to_string(),
            quote_validity_days: 30,
            business: BusinessProfile::default(),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from environment variables, falling back to defaults.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = match env_var("BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: {}", raw))?,
            None => defaults.bind_addr,
        };

        let quote_validity_days = match env_var("QUOTE_VALIDITY_DAYS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("QUOTE_VALIDITY_DAYS is not a number: {}", raw))?,
            None => defaults.quote_validity_days,
        };
        if quote_validity_days == 0 {
            anyhow::bail!("QUOTE_VALIDITY_DAYS must be at least 1");
        }

        let public_base_url = env_var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.public_base_url);

        let business = BusinessProfile {
            name: env_var("BUSINESS_NAME").unwrap_or(defaults.business.name),
            tagline: env_var("BUSINESS_TAGLINE").unwrap_or(defaults.business.tagline),
            phones: env_var("BUSINESS_PHONES")
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
            email: env_var("BUSINESS_EMAIL").unwrap_or_default(),
            whatsapp_number: env_var("WHATSAPP_NUMBER")
                .map(|n| n.trim_start_matches('+').replace(' ', ""))
                .unwrap_or_default(),
        };

        Ok(Self {
            bind_addr,
            database_url: env_var("DATABASE_URL"),
            public_base_url,
            quote_validity_days,
            business,
        })
    }

    /// Public URL of a saved quote
    pub fn share_url(&self, quote_id: &uuid::Uuid) -> String {
        format!("{}/quotes/{}", self.public_base_url, quote_id)
    }
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
