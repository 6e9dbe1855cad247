//! Domain types shared by the repository and its callers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of chants in the corpus.
pub const CHANT_COUNT: u32 = 34;

/// Verses per tercet.
pub const TERCET_LEN: usize = 3;

/// Occurrences of each requested word within one chant, in request order.
/// A word requested twice keeps its first position.
pub type WordCounts = IndexMap<String, usize>;

/// A chant identifier, guaranteed to lie in `1..=CHANT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ChantNumber(u32);

impl ChantNumber {
    pub fn new(number: u32) -> Result<Self> {
        if (1..=CHANT_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(Error::ChantNotFound(i64::from(number)))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Every chant in ascending order.
    pub fn all() -> impl Iterator<Item = ChantNumber> {
        (1..=CHANT_COUNT).map(ChantNumber)
    }

    /// File name backing this chant, e.g. `Canto_7.txt`.
    pub fn file_name(self) -> String {
        format!("Canto_{}.txt", self.0)
    }
}

impl fmt::Display for ChantNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for ChantNumber {
    type Error = Error;

    fn try_from(number: u32) -> Result<Self> {
        Self::new(number)
    }
}

impl From<ChantNumber> for u32 {
    fn from(number: ChantNumber) -> Self {
        number.0
    }
}

impl FromStr for ChantNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let number: i64 = trimmed.parse().map_err(|_| {
            Error::InvalidArgument(format!("chant number must be an integer, got '{}'", trimmed))
        })?;
        u32::try_from(number)
            .map_err(|_| Error::ChantNotFound(number))
            .and_then(Self::new)
    }
}

/// How `read_lines` shapes its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Trim surrounding whitespace (including the line terminator) from each verse.
    pub strip: bool,
    /// Keep only the first `limit` verses.
    pub limit: Option<usize>,
}

impl ReadOptions {
    pub fn stripped() -> Self {
        Self { strip: true, limit: None }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The chant with the most verses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestChant {
    pub number: ChantNumber,
    pub verse_count: usize,
}

/// Corpus-wide statistics gathered in a single pass.
///
/// `unreadable` lists the chants that were skipped; every other field only
/// accounts for the chants that could be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub total_verses: usize,
    pub total_tercets: usize,
    pub mean_verse_length: f64,
    pub longest_chant: Option<LongestChant>,
    pub unreadable: Vec<ChantNumber>,
}
