use crate::error::Error;
use crate::provider::{DynRecordProvider, InMemoryProvider, Route53Provider};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

/// Environment variable naming the config file when none is given on the command line.
pub const CONFIG_ENVIRONMENT_VAR: &str = "ROUTE53_DYNDNS_CONFIG";

/// Config file looked for in `$HOME` as a last resort.
pub const DEFAULT_CONFIG_FILE: &str = ".route53_dyndns.json";

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Route53,
    Memory,
}

#[serde_as]
#[derive(Deserialize, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub bad_user_agents: HashSet<String>,
    #[serde(default = "default_api_bind_addr")]
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_api_timeout")]
    pub api_timeout: Duration,
    #[serde(default)]
    pub provider: ProviderKind,
    pub aws_access_key: Option<String>,
    pub aws_secret_access_key: Option<String>,
    #[serde(default = "default_aws_region")]
    pub aws_region: String,
    pub hosted_zone_id: Option<String>,
    #[serde(default)]
    pub records: HashMap<String, String>,
}

fn default_api_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_api_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_aws_region() -> String {
    "us-east-1".to_string()
}

impl Config {
    /// Resolve which config file to load: an explicit path, then [`CONFIG_ENVIRONMENT_VAR`],
    /// then [`DEFAULT_CONFIG_FILE`] in the home directory.
    pub fn locate(explicit: Option<String>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os(CONFIG_ENVIRONMENT_VAR)
                    .filter(|path| !path.is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| {
                std::env::var_os("HOME").map(|home| Path::new(&home).join(DEFAULT_CONFIG_FILE))
            })
    }

    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        conf.sanity_check()?;
        Ok(conf)
    }

    /// Parse and check a config held in memory.
    pub fn try_from_json(json: &str) -> Result<Self, Error> {
        let conf: Config = serde_json::from_str(json)?;
        conf.sanity_check()?;
        Ok(conf)
    }

    pub fn sanity_check(&self) -> Result<(), Error> {
        required(Some(&self.username), "USERNAME")?;
        required(Some(&self.password), "PASSWORD")?;
        if self.provider == ProviderKind::Route53 {
            required(self.aws_access_key.as_ref(), "AWS_ACCESS_KEY")?;
            required(self.aws_secret_access_key.as_ref(), "AWS_SECRET_ACCESS_KEY")?;
            required(self.hosted_zone_id.as_ref(), "HOSTED_ZONE_ID")?;
        }
        Ok(())
    }

    pub fn credentials_match(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }

    pub fn user_agent_denied(&self, user_agent: &str) -> bool {
        self.bad_user_agents.contains(user_agent)
    }

    /// Build the record provider selected by [`Config::provider`].
    pub fn record_provider(&self) -> Result<DynRecordProvider, Error> {
        Ok(match self.provider {
            ProviderKind::Route53 => Arc::new(Route53Provider::new(
                required(self.aws_access_key.as_ref(), "AWS_ACCESS_KEY")?,
                required(self.aws_secret_access_key.as_ref(), "AWS_SECRET_ACCESS_KEY")?,
                &self.aws_region,
                required(self.hosted_zone_id.as_ref(), "HOSTED_ZONE_ID")?,
            )),
            ProviderKind::Memory => Arc::new(InMemoryProvider::with_records(self.records.clone())),
        })
    }
}

fn required<'a>(value: Option<&'a String>, setting: &'static str) -> Result<&'a str, Error> {
    match value {
        Some(value) if !value.is_empty() => Ok(value.as_str()),
        _ => Err(Error::MissingSetting(setting)),
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("bad_user_agents", &self.bad_user_agents)
            .field("api_bind_addr", &self.api_bind_addr)
            .field("api_timeout", &self.api_timeout)
            .field("provider", &self.provider)
            .field("aws_access_key", &self.aws_access_key)
            .field("aws_secret_access_key", &"<REDACTED>")
            .field("aws_region", &self.aws_region)
            .field("hosted_zone_id", &self.hosted_zone_id)
            .field("records", &self.records)
            .finish()
    }
}
