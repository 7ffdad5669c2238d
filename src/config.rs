//! Runtime configuration.
//!
//! [`Config`] is built once at startup from the process environment and an
//! optional `.env` file, then passed by reference to each component.
//! Nothing below this module reads the environment.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::env_file::{EnvFileError, load_env_file};
use crate::recommend::PromptSource;

/// Plex server port used when `PLEX_PORT` is unset.
pub const DEFAULT_PLEX_PORT: u16 = 32400;
/// Chat-completion API base used when `OPENAI_BASE_URL` is unset.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Model identifier used when `OPENAI_MODEL` is unset.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Radarr root folder used when `RADARR_ROOT_FOLDER` is unset.
pub const DEFAULT_ROOT_FOLDER: &str = "/movies";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Required configuration keys, in the order they are reported when missing.
pub const REQUIRED_KEYS: [&str; 6] = [
    "PLEX_TOKEN",
    "PLEX_IP",
    "PLEX_SECTION_KEY",
    "OPENAI_API_KEY",
    "RADARR_URL",
    "RADARR_API_KEY",
];

/// Errors raised while assembling [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required keys are absent or empty.
    #[error(
        "missing required configuration: {}\n  \
         Suggestion: Set them in the environment or in a .env file",
        keys.join(", ")
    )]
    Missing {
        /// Every missing key.
        keys: Vec<&'static str>,
    },

    /// A key is present but its value cannot be used.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// Raw value as found.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The `.env` file could not be loaded.
    #[error(transparent)]
    EnvFile(#[from] EnvFileError),
}

/// Connection settings for the Plex media server.
#[derive(Clone)]
pub struct PlexSettings {
    /// Host name or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Library section to list.
    pub section_key: String,
    /// `X-Plex-Token` value.
    pub token: String,
}

impl PlexSettings {
    /// `http://{host}:{port}` base for all Plex requests.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for PlexSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlexSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("section_key", &self.section_key)
            .finish_non_exhaustive()
    }
}

/// Settings for the chat-completion service.
#[derive(Clone)]
pub struct OpenAiSettings {
    /// Bearer API key.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// API base, without trailing slash.
    pub base_url: String,
    /// Where the system instruction comes from.
    pub prompt: PromptSource,
}

impl fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

/// Settings for Radarr.
#[derive(Clone)]
pub struct RadarrSettings {
    /// Radarr base URL, without trailing slash.
    pub base_url: String,
    /// `X-Api-Key` value.
    pub api_key: String,
    /// Quality profile name to look up instead of the default id.
    pub quality_profile: Option<String>,
    /// Root folder path sent with every add request.
    pub root_folder: String,
}

impl fmt::Debug for RadarrSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadarrSettings")
            .field("base_url", &self.base_url)
            .field("quality_profile", &self.quality_profile)
            .field("root_folder", &self.root_folder)
            .finish_non_exhaustive()
    }
}

/// Whether the pipeline runs once or repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run a single time and exit.
    Once,
    /// Run, sleep this many days, repeat forever.
    EveryDays(NonZeroU32),
}

impl Schedule {
    /// Sleep between iterations, or `None` for run-once.
    #[must_use]
    pub fn interval(self) -> Option<Duration> {
        match self {
            Self::Once => None,
            Self::EveryDays(days) => Some(Duration::from_secs(
                u64::from(days.get()) * SECONDS_PER_DAY,
            )),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Media server settings.
    pub plex: PlexSettings,
    /// Language-model settings.
    pub openai: OpenAiSettings,
    /// Acquisition service settings.
    pub radarr: RadarrSettings,
    /// Run-once or periodic.
    pub schedule: Schedule,
}

impl Config {
    /// Loads configuration from the process environment, falling back to
    /// values from `env_file` for keys the environment does not set.
    ///
    /// A missing `env_file` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unreadable or malformed env file,
    /// missing required keys, or invalid values.
    pub fn load(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_vars = match env_file {
            Some(path) => load_env_file(path)?.unwrap_or_default(),
            None => BTreeMap::new(),
        };
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .filter(|value| !value.is_empty())
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Builds configuration from an arbitrary key lookup. Empty values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for missing required keys or invalid values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|&key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing { keys: missing });
        }
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing { keys: vec![key] });

        let plex = PlexSettings {
            host: required("PLEX_IP")?,
            port: parse_port(get("PLEX_PORT"))?,
            section_key: required("PLEX_SECTION_KEY")?,
            token: required("PLEX_TOKEN")?,
        };

        let prompt = get("RECOMMENDARR_PROMPT_FILE")
            .map_or(PromptSource::Embedded, |path| PromptSource::File(PathBuf::from(path)));
        let openai = OpenAiSettings {
            api_key: required("OPENAI_API_KEY")?,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            base_url: trim_base_url(
                get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            ),
            prompt,
        };

        let radarr = RadarrSettings {
            base_url: trim_base_url(required("RADARR_URL")?),
            api_key: required("RADARR_API_KEY")?,
            quality_profile: get("RADARR_QUALITY_PROFILE"),
            root_folder: get("RADARR_ROOT_FOLDER")
                .unwrap_or_else(|| DEFAULT_ROOT_FOLDER.to_string()),
        };

        Ok(Self {
            plex,
            openai,
            radarr,
            schedule: parse_schedule(get("RUN_INTERVAL_DAYS"))?,
        })
    }

    /// Returns the same configuration forced to run a single time.
    #[must_use]
    pub fn run_once(mut self) -> Self {
        self.schedule = Schedule::Once;
        self
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PLEX_PORT);
    };
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::Invalid {
            key: "PLEX_PORT",
            value: raw,
            reason: "expected a port number in 1..=65535".to_string(),
        }),
    }
}

fn parse_schedule(raw: Option<String>) -> Result<Schedule, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Schedule::Once);
    };
    let days = raw.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
        key: "RUN_INTERVAL_DAYS",
        value: raw.clone(),
        reason: "expected a non-negative whole number of days".to_string(),
    })?;
    Ok(NonZeroU32::new(days).map_or(Schedule::Once, Schedule::EveryDays))
}
