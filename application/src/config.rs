//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use service::infra::api::http;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Remote inventory API configuration.
    pub api: Api,

    /// Inventory browsing configuration.
    pub browse: Browse,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Remote inventory API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the API.
    #[default("http://127.0.0.1:5000/api".to_owned())]
    pub base_url: String,

    /// Timeout of a whole API request.
    ///
    /// Requests never time out if unset.
    #[serde(with = "humantime_serde")]
    pub timeout: Option<time::Duration>,

    /// Service token authorizing the requests not carrying a user token.
    pub token: Option<String>,
}

impl TryFrom<Api> for http::Config {
    type Error = url::ParseError;

    fn try_from(value: Api) -> Result<Self, Self::Error> {
        let Api {
            base_url,
            timeout,
            token,
        } = value;

        Ok(Self {
            base_url: base_url.parse()?,
            timeout,
            token: token.map(SecretString::from),
        })
    }
}

/// Inventory browsing configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Browse {
    /// Quiet period of the live filtering before a page is requested.
    #[default(time::Duration::from_millis(500))]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,

    /// Default number of diamonds per page.
    #[default(20)]
    pub page_size: u32,

    /// Page sizes offered to choose from.
    #[default(vec![10, 20, 50, 100])]
    pub page_sizes: Vec<u32>,
}

impl From<&Browse> for service::Config {
    fn from(value: &Browse) -> Self {
        let Browse {
            debounce,
            page_size,
            page_sizes: _,
        } = value;

        Self {
            debounce: *debounce,
            page_size: *page_size,
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use secrecy::ExposeSecret as _;
    use service::infra::api::http;

    use super::{Api, Browse, Config};

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("definitely-missing.toml").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.api.base_url, "http://127.0.0.1:5000/api");
        assert!(conf.api.timeout.is_none());
        assert_eq!(conf.browse.debounce, Duration::from_millis(500));
        assert_eq!(conf.browse.page_sizes, [10, 20, 50, 100]);
    }

    #[test]
    fn converts_api_config() {
        let conf = http::Config::try_from(Api {
            base_url: "https://stones.test/api".into(),
            timeout: Some(Duration::from_secs(5)),
            token: Some("t0k3n".into()),
        })
        .unwrap();

        assert_eq!(conf.base_url.as_str(), "https://stones.test/api");
        assert_eq!(conf.timeout, Some(Duration::from_secs(5)));
        assert_eq!(conf.token.unwrap().expose_secret(), "t0k3n");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let res = http::Config::try_from(Api {
            base_url: "not a url".into(),
            ..Api::default()
        });

        assert!(res.is_err());
    }

    #[test]
    fn converts_browse_config() {
        let conf = service::Config::from(&Browse {
            debounce: Duration::from_millis(300),
            page_size: 50,
            page_sizes: vec![50],
        });

        assert_eq!(conf.debounce, Duration::from_millis(300));
        assert_eq!(conf.page_size, 50);
    }
}
