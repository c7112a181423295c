use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("LOG_FILE_PATH and LOG_ARCHIVE_PATTERN must be set together")]
    IncompleteLogFile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogFileConfig {
    pub file_path: String,
    pub archive_pattern: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
    pub jwt_secret: String,
    pub push_webhook_url: Option<String>,
    pub log_file: Option<LogFileConfig>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = get("MATCHDAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let http_port = match get("MATCHDAY_HTTP_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "MATCHDAY_HTTP_PORT",
                value,
            })?,
            None => DEFAULT_HTTP_PORT,
        };
        let jwt_secret =
            get("MATCHDAY_JWT_SECRET").ok_or(ConfigError::Missing("MATCHDAY_JWT_SECRET"))?;

        let push_webhook_url = match get("MATCHDAY_PUSH_WEBHOOK_URL") {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => Some(url),
            Some(value) => {
                return Err(ConfigError::Invalid {
                    key: "MATCHDAY_PUSH_WEBHOOK_URL",
                    value,
                });
            }
            None => None,
        };

        let log_file = match (get("LOG_FILE_PATH"), get("LOG_ARCHIVE_PATTERN")) {
            (Some(file_path), Some(archive_pattern)) => Some(LogFileConfig {
                file_path,
                archive_pattern,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteLogFile),
        };

        Ok(Self {
            host,
            http_port,
            jwt_secret,
            push_webhook_url,
            log_file,
        })
    }
}
