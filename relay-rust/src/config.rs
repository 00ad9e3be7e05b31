use crate::{params::DEFAULT_POST_DELAY, ConfigError, RelayError, StatusTemplate};
use savecast_sdk::{
    client_utils,
    mastodon::{MastodonPublisher, MastodonPublisherOptions},
    pocket::{PocketSource, PocketSourceOptions, DEFAULT_FETCH_COUNT},
    Visibility,
};
use std::{env, fmt, str::FromStr, time::Duration};

pub const POCKET_CONSUMER_KEY: &str = "POCKET_CONSUMER_KEY";
pub const POCKET_ACCESS_TOKEN: &str = "POCKET_ACCESS_TOKEN";
pub const MASTODON_SERVER: &str = "MASTODON_SERVER";
pub const MASTODON_TOKEN: &str = "MASTODON_TOKEN";

pub const FETCH_COUNT: &str = "SAVECAST_FETCH_COUNT";
pub const POST_DELAY_SECS: &str = "SAVECAST_POST_DELAY_SECS";
pub const REQUEST_TIMEOUT_SECS: &str = "SAVECAST_REQUEST_TIMEOUT_SECS";
pub const VISIBILITY: &str = "SAVECAST_VISIBILITY";
pub const STATUS_TEMPLATE: &str = "SAVECAST_STATUS_TEMPLATE";
pub const POCKET_BASE_URL: &str = "POCKET_BASE_URL";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_FETCH_COUNT: u32 = 100;

/// Credentials and settings for one relay run. Loaded once at startup and
/// passed to the clients; nothing below reads the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub pocket_consumer_key: String,
    pub pocket_access_token: String,
    /// Base URL of the Mastodon instance.
    pub mastodon_server: String,
    pub mastodon_token: String,
    pub settings: RelaySettings,
}

/// Optional tuning. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub fetch_count: u32,
    pub post_delay: Duration,
    pub request_timeout: Duration,
    pub visibility: Option<Visibility>,
    pub template: StatusTemplate,
    pub pocket_base_url: Option<String>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            fetch_count: DEFAULT_FETCH_COUNT,
            post_delay: DEFAULT_POST_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            visibility: None,
            template: StatusTemplate::default(),
            pocket_base_url: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("pocket_consumer_key", &"<redacted>")
            .field("pocket_access_token", &"<redacted>")
            .field("mastodon_server", &self.mastodon_server)
            .field("mastodon_token", &"<redacted>")
            .field("settings", &self.settings)
            .finish()
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key/value lookup. A required key that is missing or
    /// empty is reported together with every other missing key. Present
    /// values are kept as given.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str, missing: &mut Vec<&'static str>| {
            let value = lookup(key).filter(|value| !value.is_empty());
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let mut missing = Vec::new();
        let pocket_consumer_key = required(POCKET_CONSUMER_KEY, &mut missing);
        let pocket_access_token = required(POCKET_ACCESS_TOKEN, &mut missing);
        let mastodon_server = required(MASTODON_SERVER, &mut missing);
        let mastodon_token = required(MASTODON_TOKEN, &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingConfiguration(missing));
        }

        Ok(Self {
            pocket_consumer_key,
            pocket_access_token,
            mastodon_server,
            mastodon_token,
            settings: RelaySettings::from_lookup(&lookup)?,
        })
    }

    /// Pocket client for this configuration.
    pub fn pocket_source(&self) -> Result<PocketSource, RelayError> {
        let client = client_utils::build_client(self.settings.request_timeout)
            .map_err(RelayError::Client)?;

        Ok(PocketSource::new(PocketSourceOptions {
            consumer_key: self.pocket_consumer_key.clone(),
            access_token: self.pocket_access_token.clone(),
            base_url: self.settings.pocket_base_url.clone(),
            count: Some(self.settings.fetch_count),
            client: Some(client),
        }))
    }

    /// Mastodon client for this configuration.
    pub fn mastodon_publisher(&self) -> Result<MastodonPublisher, RelayError> {
        let client = client_utils::build_client(self.settings.request_timeout)
            .map_err(RelayError::Client)?;

        Ok(MastodonPublisher::new(MastodonPublisherOptions {
            server: self.mastodon_server.clone(),
            access_token: self.mastodon_token.clone(),
            client: Some(client),
        }))
    }
}

impl RelaySettings {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let fetch_count = parse_optional::<u32, _>(lookup, FETCH_COUNT)?
            .map(|count| {
                if (1..=MAX_FETCH_COUNT).contains(&count) {
                    Ok(count)
                } else {
                    Err(invalid(
                        FETCH_COUNT,
                        count.to_string(),
                        format!("must be between 1 and {MAX_FETCH_COUNT}"),
                    ))
                }
            })
            .transpose()?
            .unwrap_or(defaults.fetch_count);

        let post_delay = parse_optional::<u64, _>(lookup, POST_DELAY_SECS)?
            .map_or(defaults.post_delay, Duration::from_secs);

        let request_timeout = match parse_optional::<u64, _>(lookup, REQUEST_TIMEOUT_SECS)? {
            Some(0) => {
                return Err(invalid(
                    REQUEST_TIMEOUT_SECS,
                    "0".to_string(),
                    "must be at least 1 second".to_string(),
                ))
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.request_timeout,
        };

        let visibility = parse_optional::<Visibility, _>(lookup, VISIBILITY)?;

        let template = match optional(lookup, STATUS_TEMPLATE) {
            Some(value) => StatusTemplate::new(value.clone())
                .map_err(|reason| invalid(STATUS_TEMPLATE, value, reason))?,
            None => defaults.template,
        };

        Ok(Self {
            fetch_count,
            post_delay,
            request_timeout,
            visibility,
            template,
            pocket_base_url: optional(lookup, POCKET_BASE_URL),
        })
    }
}

/// An optional value; blank counts as unset.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn parse_optional<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|error| invalid(key, value.clone(), error.to_string()))
        })
        .transpose()
}

fn invalid(key: &'static str, value: String, reason: String) -> ConfigError {
    ConfigError::InvalidValue { key, value, reason }
}
