use derive_more::{Display, Error, From};
use lib::chess::Promotion;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

#[cfg(test)]
use proptest::{option, prelude::*, sample::select};

/// Configuration for the interactive game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// How often check flags are recomputed.
    #[serde(with = "humantime_serde")]
    #[cfg_attr(test, strategy((1..=3_600_000u64).prop_map(Duration::from_millis)))]
    pub refresh: Duration,

    /// The piece pawns are promoted to without asking, if any.
    #[cfg_attr(test, strategy(option::of(select(vec![
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ]))))]
    pub promotion: Option<Promotion>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            refresh: Duration::from_secs(1),
            promotion: None,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

/// The reason why parsing [`Config`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse game configuration")]
pub struct ParseConfigError(ron::de::SpannedError);

impl FromStr for Config {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
