use core::num::ParseIntError;

/// Environment variable holding the seed every new [`Faker`](crate::Faker) starts from.
pub const SEED_ENV: &str = "PREFAB_SEED";

/// Settings read from the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Master seed for generated data. `None` picks a random one per process.
    pub seed: Option<u64>,
}

impl Config {
    /// Reads the environment. An unparsable seed is reported with a warning
    /// and ignored.
    pub fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; falling back to a random seed");
                Self::default()
            }
        }
    }

    /// Reads the environment, failing on an unparsable seed.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let seed = match std::env::var(SEED_ENV) {
            Ok(raw) => Some(parse_seed(&raw)?),
            Err(_) => None,
        };
        Ok(Self { seed })
    }
}

/// Parses a seed the way `PREFAB_SEED` is interpreted: a decimal `u64`,
/// surrounding whitespace ignored.
pub fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|source| ConfigError::InvalidSeed {
            raw: raw.to_string(),
            source,
        })
}

/// Errors that can occur while reading [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// `PREFAB_SEED` was set but is not a `u64`
    InvalidSeed {
        /// The value as found in the environment
        raw: String,
        /// Why it did not parse
        source: ParseIntError,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidSeed { raw, source } => {
                write!(f, "invalid {SEED_ENV} value {raw:?}: {source}")
            }
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ConfigError::InvalidSeed { source, .. } => Some(source),
        }
    }
}
