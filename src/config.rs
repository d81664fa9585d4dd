use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: String,
    pub api_url: String,
    pub amazon_domain: String,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub from: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    pub privy_id: Option<String>,
    pub wallet_address: Option<String>,
    /// ES256 public key (PEM) that admin bearer tokens are signed with.
    pub verification_key_pem: Option<String>,
    /// Expected `aud` claim; audience is not checked when unset.
    pub app_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BanxicoConfig {
    pub token: Option<String>,
    pub base_url: String,
    pub series: String,
}

/// Everything the service reads from its environment, resolved once at
/// start-up and handed to the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub http_timeout: Duration,
    pub openai: OpenAiConfig,
    pub search: SearchConfig,
    pub telegram: Option<TelegramConfig>,
    pub mail: Option<MailConfig>,
    pub admin: AdminConfig,
    pub banxico: BanxicoConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Blank values
    /// are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port = parse_number("PORT", &or_default("PORT", "8080"))?;
        let timeout_secs: u64 =
            parse_number("HTTP_TIMEOUT_SECS", &or_default("HTTP_TIMEOUT_SECS", "30"))?;

        let telegram = match (get("TELEGRAM_BOT_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
                bot_token,
                chat_id,
                api_base: or_default("TELEGRAM_API_BASE", "https://api.telegram.org"),
            }),
            _ => None,
        };

        let mail = get("RESEND_API_KEY").map(|api_key| MailConfig {
            api_key,
            from: or_default("MAIL_FROM", "Coinshop <guides@mail.coinshop.world>"),
            api_base: or_default("RESEND_API_BASE", "https://api.resend.com"),
        });

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            host: or_default("HOST", "0.0.0.0"),
            port,
            http_timeout: Duration::from_secs(timeout_secs),
            openai: OpenAiConfig {
                api_key: require("API_KEY_OPENAI")?,
                model: or_default("OPENAI_MODEL", "gpt-4o-mini"),
                base_url: or_default("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            },
            search: SearchConfig {
                api_key: require("API_KEY")?,
                api_url: require("API_URL")?,
                amazon_domain: or_default("SEARCH_AMAZON_DOMAIN", "amazon.com.mx"),
            },
            telegram,
            mail,
            admin: AdminConfig {
                privy_id: get("ADMIN_PRIVY_ID"),
                wallet_address: get("ADMIN_WALLET_ADDRESS"),
                verification_key_pem: get("PRIVY_VERIFICATION_KEY"),
                app_id: get("PRIVY_APP_ID"),
            },
            banxico: BanxicoConfig {
                token: get("BMX_TOKEN"),
                base_url: or_default(
                    "BANXICO_BASE_URL",
                    "https://www.banxico.org.mx/SieAPIRest/service/v1",
                ),
                series: or_default("BANXICO_SERIES", "SF43718"),
            },
        })
    }
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}
