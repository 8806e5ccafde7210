use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://api.moonshot.cn/v1";
pub const DEFAULT_MODEL: &str = "moonshot-v1-8k";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;
const LOCAL_ORIGINS: [&str; 2] = ["http://127.0.0.1:3000", "http://localhost:3000"];

/// Where the process runs: on a developer machine or behind a hosting platform's router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Local,
    Hosted,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Local => "local",
            Profile::Hosted => "hosted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub upstream_timeout: Duration,
    pub port: u16,
    pub profile: Profile,
    pub cors_origins: AllowedOrigins,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let profile = match get("HOSTED") {
            None => Profile::Local,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Profile::Hosted,
                "0" | "false" | "no" => Profile::Local,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "HOSTED",
                        expected: "a boolean",
                        value: v,
                    })
                }
            },
        };

        let port = match get("PORT") {
            None => DEFAULT_PORT,
            Some(v) => v.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a port number",
                value: v.clone(),
            })?,
        };

        let timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "UPSTREAM_TIMEOUT_SECS",
                        expected: "a positive number of seconds",
                        value: v,
                    })
                }
            },
        };

        let cors_origins = match get("CORS_ORIGINS") {
            Some(v) => {
                let list: Vec<String> = v
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect();
                // A wildcard anywhere in the list opens CORS to every origin.
                if list.iter().any(|o| o == "*") {
                    AllowedOrigins::Any
                } else {
                    AllowedOrigins::List(list)
                }
            }
            None => match profile {
                Profile::Hosted => AllowedOrigins::Any,
                Profile::Local => {
                    AllowedOrigins::List(LOCAL_ORIGINS.iter().map(|o| o.to_string()).collect())
                }
            },
        };

        Ok(Self {
            api_key: get("KIMI_API_KEY"),
            api_base: get("KIMI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: get("KIMI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
            port,
            profile,
            cors_origins,
            public_dir: get("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./public")),
        })
    }

    /// Hosted deployments listen on every interface so the platform router can reach them.
    pub fn bind_addr(&self) -> (&'static str, u16) {
        match self.profile {
            Profile::Local => ("127.0.0.1", self.port),
            Profile::Hosted => ("0.0.0.0", self.port),
        }
    }
}
