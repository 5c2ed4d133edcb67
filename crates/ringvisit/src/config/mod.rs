use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use url::Url;

use crate::forms::FormType;

const DEFAULT_WEBHOOK: &str = "https://n8n.panvatech.com/webhook/contact-form";
const DEFAULT_SITE_URL: &str = "https://ringvisit.com";
const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let contact = webhook_from_env("RINGVISIT_CONTACT_WEBHOOK")?;
        let partner = webhook_from_env("RINGVISIT_PARTNER_WEBHOOK")?;

        let base_url = env::var("RINGVISIT_SITE_URL")
            .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let webhook_timeout = match env::var("RINGVISIT_WEBHOOK_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => Duration::from_secs(DEFAULT_WEBHOOK_TIMEOUT_SECS),
        };

        let partner_simulated_delay = match env::var("RINGVISIT_PARTNER_SIMULATED_DELAY_MS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::InvalidSimulatedDelay)?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            site: SiteConfig {
                base_url,
                webhooks: WebhookEndpoints { contact, partner },
                webhook_timeout,
                partner_simulated_delay,
                ..SiteConfig::default()
            },
        })
    }
}

fn webhook_from_env(key: &'static str) -> Result<String, ConfigError> {
    let raw = env::var(key).unwrap_or_else(|_| DEFAULT_WEBHOOK.to_string());
    let parsed = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidWebhook {
        key,
        source: Some(source),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidWebhook { key, source: None });
    }
    Ok(parsed.to_string())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Outbound webhook target for each lead form. Both may point at the same URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEndpoints {
    pub contact: String,
    pub partner: String,
}

impl WebhookEndpoints {
    pub fn for_form(&self, form: FormType) -> &str {
        match form {
            FormType::Contact => &self.contact,
            FormType::Partner => &self.partner,
        }
    }
}

impl Default for WebhookEndpoints {
    fn default() -> Self {
        Self {
            contact: DEFAULT_WEBHOOK.to_string(),
            partner: DEFAULT_WEBHOOK.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl PostalAddress {
    pub fn single_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.locality, self.region, self.postal_code
        )
    }
}

/// Company constants, webhook targets, and envelope tags. Immutable once built
/// and handed to the payload builder, dispatcher, and SEO generator.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub company_name: String,
    pub phone: String,
    pub support_email: String,
    pub sales_email: String,
    pub address: PostalAddress,
    pub base_url: String,
    /// Envelope-level `source` tag.
    pub source_tag: String,
    /// `data.source` tag identifying the capturing channel.
    pub channel_tag: String,
    pub webhooks: WebhookEndpoints,
    pub webhook_timeout: Duration,
    /// When set, partner submissions skip the webhook and wait this long instead.
    pub partner_simulated_delay: Option<Duration>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            company_name: "RingVisit".to_string(),
            phone: "1-800-916-2459".to_string(),
            support_email: "support@panvatech.com".to_string(),
            sales_email: "sales@panvatech.com".to_string(),
            address: PostalAddress {
                street: "14269 Danielson St, Suite 400".to_string(),
                locality: "Poway".to_string(),
                region: "CA".to_string(),
                postal_code: "92064".to_string(),
                country: "US".to_string(),
            },
            base_url: DEFAULT_SITE_URL.to_string(),
            source_tag: "RingVisit".to_string(),
            channel_tag: "OneTriage Marketing Website".to_string(),
            webhooks: WebhookEndpoints::default(),
            webhook_timeout: Duration::from_secs(DEFAULT_WEBHOOK_TIMEOUT_SECS),
            partner_simulated_delay: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidWebhook {
        key: &'static str,
        source: Option<url::ParseError>,
    },
    InvalidTimeout,
    InvalidSimulatedDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWebhook { key, .. } => {
                write!(f, "{key} must be an absolute http(s) URL")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "RINGVISIT_WEBHOOK_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidSimulatedDelay => write!(
                f,
                "RINGVISIT_PARTNER_SIMULATED_DELAY_MS must be a whole number of milliseconds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidWebhook {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}
