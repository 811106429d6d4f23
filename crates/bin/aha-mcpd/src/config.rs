use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;

use aha_core::control::RestSettings;
use aha_mcp::server::McpHttpServerConfig;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "aha-mcpd", version, about = "Aha! MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "AHA_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    #[arg(long, env = "AHA_DOMAIN")]
    domain: Option<String>,

    #[arg(
        long = "http",
        env = "AHA_MCP_HTTP",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_http: bool,

    #[arg(long, env = "AHA_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    http_addr: SocketAddr,

    #[arg(
        long,
        env = "AHA_MCP_STATELESS",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    stateless: bool,

    #[arg(long = "log", env = "AHA_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct AhaConfig {
    pub api_token: String,
    pub domain: String,
    pub enable_http: bool,
    pub http_addr: SocketAddr,
    pub stateful_mode: bool,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "{name} environment variable is required"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl AhaConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    #[must_use]
    pub fn rest_settings(&self) -> RestSettings {
        RestSettings::new(self.api_token.clone(), self.domain.clone())
    }

    #[must_use]
    pub fn http_server_config(&self) -> McpHttpServerConfig {
        McpHttpServerConfig::new(self.http_addr).with_stateful_mode(self.stateful_mode)
    }
}

impl TryFrom<CliArgs> for AhaConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let api_token = args
            .api_token
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingSetting("AHA_API_TOKEN"))?;
        let domain = args
            .domain
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSetting("AHA_DOMAIN"))?;

        // The domain is the account subdomain, interpolated into `{domain}.aha.io`.
        if !domain
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
        {
            return Err(ConfigError::InvalidSetting {
                name: "AHA_DOMAIN",
                value: domain,
            });
        }

        Ok(Self {
            api_token,
            domain,
            enable_http: args.enable_http,
            http_addr: args.http_addr,
            stateful_mode: !args.stateless,
            log_filter: args.log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            api_token: Some("secret".to_string()),
            domain: Some("acme".to_string()),
            enable_http: false,
            http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            stateless: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    #[test]
    fn token_and_domain_are_required() {
        let mut args = base_args();
        args.api_token = None;
        assert!(matches!(
            AhaConfig::try_from(args),
            Err(ConfigError::MissingSetting("AHA_API_TOKEN"))
        ));

        let mut args = base_args();
        args.domain = Some("   ".to_string());
        assert!(matches!(
            AhaConfig::try_from(args),
            Err(ConfigError::MissingSetting("AHA_DOMAIN"))
        ));
    }

    #[test]
    fn domain_must_be_a_subdomain() {
        let mut args = base_args();
        args.domain = Some("acme.aha.io".to_string());
        assert!(matches!(
            AhaConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "AHA_DOMAIN", .. })
        ));
    }

    #[test]
    fn rest_settings_carry_both_values() {
        let config = AhaConfig::try_from(base_args()).expect("config should parse");
        assert!(config.stateful_mode);
        assert_eq!(config.rest_settings(), RestSettings::new("secret", "acme"));
        assert!(config.rest_settings().auth().is_ok());
    }

    #[test]
    fn stateless_flag_disables_sessions() {
        let mut args = base_args();
        args.stateless = true;
        let config = AhaConfig::try_from(args).expect("config should parse");
        assert!(!config.http_server_config().stateful_mode);
    }
}
