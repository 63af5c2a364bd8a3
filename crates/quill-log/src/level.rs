//! Severity levels and the rank table used for threshold comparisons.
//!
//! Ranks follow the syslog ordering: higher rank means more severe.
//! `notice` sits just above `info` (210 vs 200).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};

/// Rank returned for names outside the table. Never assigned to a level.
pub const INVALID_RANK: u16 = 0;

/// Level names and their ranks, most severe first.
///
/// Indexed by `Level as usize`, so the order here must match the enum.
static RANKS: [(&str, u16); 8] = [
    ("emergency", 600),
    ("alert", 550),
    ("critical", 500),
    ("error", 400),
    ("warning", 300),
    ("notice", 210),
    ("info", 200),
    ("debug", 100),
];

/// Look up the rank of a level name.
///
/// Names are matched exactly and case-sensitively.
///
/// # Errors
///
/// Returns [`LogError::InvalidLevel`] if `name` is not one of the eight known
/// level names.
pub fn rank(name: &str) -> LogResult<u16> {
    let rank = RANKS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map_or(INVALID_RANK, |(_, rank)| *rank);

    if rank == INVALID_RANK {
        return Err(LogError::InvalidLevel {
            level: name.to_owned(),
        });
    }
    Ok(rank)
}

/// A log severity.
///
/// Ordering compares ranks, so `Level::Emergency > Level::Debug`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Runtime errors that do not require immediate action.
    Error,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Normal but significant events.
    Notice,
    /// Interesting events.
    Info,
    /// Detailed debug information. The most permissive threshold.
    #[default]
    Debug,
}

impl Level {
    /// Every level, most severe first.
    pub const ALL: [Level; 8] = [
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    /// Numeric rank of this level.
    #[must_use]
    pub fn rank(self) -> u16 {
        RANKS[self as usize].1
    }

    /// Lowercase level name, as accepted by [`rank`] and [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        RANKS[self as usize].0
    }

    /// Find the level with exactly this rank.
    #[must_use]
    pub fn from_rank(rank: u16) -> Option<Self> {
        RANKS
            .iter()
            .position(|(_, candidate)| *candidate == rank)
            .map(|index| Self::ALL[index])
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RANKS
            .iter()
            .position(|(name, _)| *name == s)
            .map(|index| Self::ALL[index])
            .ok_or_else(|| LogError::InvalidLevel {
                level: s.to_owned(),
            })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}
